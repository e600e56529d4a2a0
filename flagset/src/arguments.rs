use std::path::Path;

/// Somewhere to get command-line tokens from. The tokens exclude the name of
/// the program.
pub trait ArgumentSource {
    fn arguments(&self) -> &[String];
}

impl ArgumentSource for [String] {
    fn arguments(&self) -> &[String] {
        self
    }
}

impl ArgumentSource for Vec<String> {
    fn arguments(&self) -> &[String] {
        self
    }
}

/// Helper type for loading arguments from the environment.
///
/// This type exists for roughly two purposes: to provide a convenient owned
/// container for args retrieved from [`std::env`], and to be an object that
/// a parse can borrow its tokens from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedArguments {
    argv0: String,
    arguments: Vec<String>,
}

impl LoadedArguments {
    /// Load the process arguments. Arguments that aren't valid unicode are
    /// converted lossily.
    #[must_use]
    pub fn from_env() -> Self {
        let mut args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
        let argv0 = args.next().unwrap_or_default();

        Self::new(argv0, args)
    }

    #[must_use]
    pub fn new(argv0: impl Into<String>, arguments: impl IntoIterator<Item = String>) -> Self {
        Self {
            argv0: argv0.into(),
            arguments: arguments.into_iter().collect(),
        }
    }

    /// The program's invocation name, exactly as given
    #[must_use]
    pub fn argv0(&self) -> &str {
        &self.argv0
    }

    /// The file name of `argv0`, for usage messages
    #[must_use]
    pub fn program_name(&self) -> &str {
        Path::new(&self.argv0)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.argv0)
    }
}

impl ArgumentSource for LoadedArguments {
    fn arguments(&self) -> &[String] {
        &self.arguments
    }
}
