/*!
A small registry of typed command-line flags.

Declare flags on a [`FlagSet`], each with a name, an optional one-character
alias, a description, and a typed default (boolean, string, number or list of
strings). Then hand the set a list of tokens to [`parse`][FlagSet::parse]:

```
use flagset::FlagSet;

let mut flags = FlagSet::new("serve");
flags.declare_boolean("verbose", "Log more", Some("v"), false)?;
flags.declare_string("config", "Config file", Some("c"), "default.json")?;
flags.declare_string_list("include", "Extra paths", Some("i"), Vec::<String>::new())?;

let outcome = flags.parse(["-v", "--include", "a", "-i=b", "--", "-c"])?;

assert_eq!(flags.boolean("verbose"), Some(true));
assert_eq!(flags.string("config"), Some("default.json"));
assert_eq!(flags.string_list("include"), Some(&["a".to_owned(), "b".to_owned()][..]));
assert_eq!(outcome.remaining(), ["-c"]);
# Ok::<(), Box<dyn std::error::Error>>(())
```

Flags must come before anything else. Parsing stops at `--` or at the first
token that isn't a flag, and the uninterpreted tokens are returned in the
[`Outcome`]. `-h` and `--help` produce [`Outcome::HelpRequested`] rather than
an error; [`output::report`] shows how an entry point is expected to react to
each result.

The library never touches the process arguments or the console directly. See
[`ArgumentSource`] and [`OutputSink`].
*/

mod arguments;
pub mod errors;
mod flag;
mod flag_set;
pub mod help;
pub mod output;
mod printers;
mod state;
pub mod value;

pub use arguments::{ArgumentSource, LoadedArguments};
pub use errors::{DefinitionError, ParseError, ValueParseError};
pub use flag::Flag;
pub use flag_set::FlagSet;
pub use flagset_parser::Stop;
pub use help::{Help, HelpStyle};
pub use output::{ConsoleSink, Exit, MemorySink, OutputSink, report, run};
pub use state::{Outcome, ParseState};
pub use value::{FlagValue, Kind};
