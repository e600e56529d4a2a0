use std::process::ExitCode;

use anyhow::Context;
use flagset::{ConsoleSink, Exit, FlagSet, LoadedArguments, OutputSink};
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn declare(program: &str) -> anyhow::Result<FlagSet> {
    let mut flags = FlagSet::new(program).with_description("Pretend to serve some files.");

    flags
        .declare_boolean("verbose", "Enable verbose output", Some("v"), false)
        .context("failed to declare --verbose")?;
    flags
        .declare_string("config", "Path to the config file", Some("c"), "default.json")
        .context("failed to declare --config")?;
    flags
        .declare_number("port", "Port to listen on", Some("p"), 8080.0)
        .context("failed to declare --port")?;
    flags
        .declare_string_list("include", "Extra include paths", Some("i"), Vec::<String>::new())
        .context("failed to declare --include")?;

    Ok(flags)
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let args = LoadedArguments::from_env();
    let mut flags = declare(args.program_name())?;
    let mut sink = ConsoleSink;

    let remaining = match flagset::run(&mut flags, &args, &mut sink) {
        Exit::Proceed { remaining } => remaining,
        Exit::Success => return Ok(ExitCode::SUCCESS),
        Exit::Failure => return Ok(ExitCode::FAILURE),
    };

    tracing::info!(flags = flags.len(), "parsed arguments");

    for flag in flags.flags() {
        let marker = if flag.is_set() { "*" } else { " " };
        sink.log(&format!("{marker} {:10} {}", flag.name(), flag.value()));
    }

    if !remaining.is_empty() {
        sink.log(&format!("  remaining: {remaining:?}"));
    }

    Ok(ExitCode::SUCCESS)
}
