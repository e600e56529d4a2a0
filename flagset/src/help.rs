/*!
Usage messages for a [`FlagSet`].

[`FlagSet::help`] returns a [`Help`], which renders through [`Display`]:

```
use flagset::FlagSet;

let mut flags = FlagSet::new("serve");
flags.declare_boolean("verbose", "Log more", Some("v"), false)?;

let help = flags.help().to_string();
assert!(help.starts_with("Usage: serve [options]"));
assert!(help.contains("-v, --verbose[=boolean]  Log more"));
# Ok::<(), flagset::DefinitionError>(())
```
 */

use core::fmt::{self, Display};

use crate::flag_set::FlagSet;
use crate::printers;

/// Layout settings for usage messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpStyle {
    /// The widest the flag column gets. Flags wider than this put their
    /// description on the following line.
    pub max_column: usize,

    /// The line width descriptions are wrapped to
    pub width: usize,

    /// Indentation of each flag under the `Options:` header
    pub indent: usize,
}

impl Default for HelpStyle {
    fn default() -> Self {
        Self {
            max_column: 32,
            width: 80,
            indent: 2,
        }
    }
}

/// A usage message, ready to be displayed. Flags are listed sorted by name.
#[derive(Debug, Clone)]
pub struct Help<'a> {
    flags: &'a FlagSet,
    style: HelpStyle,
}

impl<'a> Help<'a> {
    pub(crate) fn new(flags: &'a FlagSet, style: HelpStyle) -> Self {
        Self { flags, style }
    }

    /// Write the usage message into any [`fmt::Write`]
    pub fn write_to(&self, out: &mut (impl fmt::Write + ?Sized)) -> fmt::Result {
        printers::write_help(out, self.flags, &self.style)
    }
}

impl Display for Help<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}
