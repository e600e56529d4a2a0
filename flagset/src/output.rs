/*!
Reporting parse results to the user.

The library never prints or exits on its own. An entry point hands the result
of [`FlagSet::parse`] to [`report`] along with an [`OutputSink`], and gets back
an [`Exit`] telling it whether to keep going or which way to exit.
 */

use std::io::{self, Write as _};

use crate::arguments::ArgumentSource;
use crate::errors::ParseError;
use crate::flag_set::FlagSet;
use crate::state::Outcome;

/// Somewhere to send informational and error text
pub trait OutputSink {
    fn log(&mut self, text: &str);
    fn error(&mut self, text: &str);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn log(&mut self, text: &str) {
        (**self).log(text)
    }

    fn error(&mut self, text: &str) {
        (**self).error(text)
    }
}

/// Writes logs to stdout and errors to stderr. Write failures, such as a
/// closed pipe, are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn log(&mut self, text: &str) {
        let _ = write_text(&mut io::stdout().lock(), text);
    }

    fn error(&mut self, text: &str) {
        let _ = write_text(&mut io::stderr().lock(), text);
    }
}

/// Writes `text`, adding a trailing newline if it doesn't have one
fn write_text(out: &mut impl io::Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;

    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }

    out.flush()
}

/// Collects everything in memory. Mostly useful for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    pub logs: Vec<String>,
    pub errors: Vec<String>,
}

impl OutputSink for MemorySink {
    fn log(&mut self, text: &str) {
        self.logs.push(text.to_owned());
    }

    fn error(&mut self, text: &str) {
        self.errors.push(text.to_owned());
    }
}

/// What an entry point should do after a parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit<'arg> {
    /// Parsing succeeded; carry on with the uninterpreted tokens
    Proceed { remaining: Vec<&'arg str> },

    /// Help was printed; exit successfully
    Success,

    /// An error and the help were printed; exit with a failure
    Failure,
}

/**
Report a parse result through `sink`.

- On success nothing is printed.
- On a help request, the help goes to [`log`][OutputSink::log].
- On an error, the error goes to [`error`][OutputSink::error], followed by
  the help to [`log`][OutputSink::log].
 */
pub fn report<'arg>(
    result: Result<Outcome<'arg>, ParseError>,
    flags: &FlagSet,
    sink: &mut impl OutputSink,
) -> Exit<'arg> {
    match result {
        Ok(Outcome::Completed { remaining, .. }) => Exit::Proceed { remaining },
        Ok(Outcome::HelpRequested) => {
            sink.log(&flags.help().to_string());
            Exit::Success
        }
        Err(error) => {
            sink.error(&format!("error: {error}"));
            sink.log(&flags.help().to_string());
            Exit::Failure
        }
    }
}

/// Parse the tokens from `source` and [`report`] the result.
pub fn run<'arg>(
    flags: &mut FlagSet,
    source: &'arg (impl ArgumentSource + ?Sized),
    sink: &mut impl OutputSink,
) -> Exit<'arg> {
    let result = flags.parse(source.arguments().iter().map(String::as_str));
    report(result, flags, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> FlagSet {
        let mut flags = FlagSet::new("serve");
        flags
            .declare_number("port", "Port to listen on", Some("p"), 0.0)
            .unwrap();
        flags
    }

    #[test]
    fn completed_prints_nothing() {
        let mut flags = flags();
        let mut sink = MemorySink::default();
        let args = vec!["-p".to_owned(), "80".to_owned(), "site".to_owned()];

        let exit = run(&mut flags, &args, &mut sink);

        assert_eq!(
            exit,
            Exit::Proceed {
                remaining: vec!["site"]
            }
        );
        assert_eq!(sink, MemorySink::default());
        assert_eq!(flags.number("port"), Some(80.0));
    }

    #[test]
    fn help_goes_to_log() {
        let mut flags = flags();
        let mut sink = MemorySink::default();

        let args = ["--help".to_owned()];

        let exit = run(&mut flags, &args[..], &mut sink);

        assert_eq!(exit, Exit::Success);
        assert_eq!(sink.logs, [flags.help().to_string()]);
        assert!(sink.errors.is_empty());
    }

    #[test]
    fn error_then_help() {
        let mut flags = flags();
        let mut sink = MemorySink::default();

        let args = vec!["--port".to_owned()];

        let exit = run(&mut flags, &args, &mut sink);

        assert_eq!(exit, Exit::Failure);
        assert_eq!(sink.errors, ["error: flag --port requires a value"]);
        assert_eq!(sink.logs, [flags.help().to_string()]);
    }

    #[test]
    fn write_text_adds_missing_newline() {
        let mut out = Vec::new();

        write_text(&mut out, "one").unwrap();
        write_text(&mut out, "two\n").unwrap();

        assert_eq!(out, b"one\ntwo\n");
    }
}
