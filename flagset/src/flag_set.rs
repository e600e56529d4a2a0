use std::collections::{BTreeMap, HashMap};

use flagset_parser::{ArgumentsParser, Stop};
use tracing::debug;

use crate::errors::{DefinitionError, ParseError};
use crate::flag::Flag;
use crate::help::{Help, HelpStyle};
use crate::state::{self, Applied, ApplyFlag, Outcome, ParseState};
use crate::value::FlagValue;

/**
The registry of declared flags.

A `FlagSet` owns every [`Flag`] declared on it, keyed by name, and keeps a
separate lookup table from alias characters to names. No name or alias is ever
used twice; that's checked when each flag is declared.

```
use flagset::FlagSet;

let mut flags = FlagSet::new("serve");
flags.declare_boolean("verbose", "Log more", Some("v"), false)?;
flags.declare_number("port", "Port to listen on", Some("p"), 8080.0)?;

let outcome = flags.parse(["-v", "--port=9090", "public"])?;

assert_eq!(flags.boolean("verbose"), Some(true));
assert_eq!(flags.number("port"), Some(9090.0));
assert_eq!(outcome.remaining(), ["public"]);
# Ok::<(), Box<dyn std::error::Error>>(())
```
 */
#[derive(Debug, Clone)]
pub struct FlagSet {
    program: String,
    description: Option<String>,
    flags: BTreeMap<String, Flag>,
    aliases: HashMap<char, String>,
    state: ParseState,
}

impl FlagSet {
    /// Create an empty set. `program` is the name shown in usage messages.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            description: None,
            flags: BTreeMap::new(),
            aliases: HashMap::new(),
            state: ParseState::Idle,
        }
    }

    /// Add a description, shown under the usage line of the help message
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn declare_boolean(
        &mut self,
        name: &str,
        description: &str,
        alias: Option<&str>,
        default: bool,
    ) -> Result<&Flag, DefinitionError> {
        self.declare(name, description, alias, FlagValue::boolean(default))
    }

    pub fn declare_string(
        &mut self,
        name: &str,
        description: &str,
        alias: Option<&str>,
        default: impl Into<String>,
    ) -> Result<&Flag, DefinitionError> {
        self.declare(name, description, alias, FlagValue::string(default))
    }

    pub fn declare_number(
        &mut self,
        name: &str,
        description: &str,
        alias: Option<&str>,
        default: f64,
    ) -> Result<&Flag, DefinitionError> {
        self.declare(name, description, alias, FlagValue::number(default))
    }

    pub fn declare_string_list<I>(
        &mut self,
        name: &str,
        description: &str,
        alias: Option<&str>,
        default: I,
    ) -> Result<&Flag, DefinitionError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.declare(name, description, alias, FlagValue::string_list(default))
    }

    /// Declare a flag holding an already-constructed value. The typed
    /// `declare_*` methods are usually more convenient.
    pub fn declare(
        &mut self,
        name: &str,
        description: &str,
        alias: Option<&str>,
        value: FlagValue,
    ) -> Result<&Flag, DefinitionError> {
        let flag = Flag::new(name, description, alias, value)?;
        self.check_available(&flag)?;

        let name = flag.name().to_owned();

        if let Some(alias) = flag.alias() {
            self.aliases.insert(alias, name.clone());
        }

        debug!(flag = %name, kind = %flag.kind(), "declared flag");
        Ok(self.flags.entry(name).or_insert(flag))
    }

    /// Names and aliases share a namespace: a new name can't match an
    /// existing alias, and a new alias can't match an existing
    /// single-character name.
    fn check_available(&self, flag: &Flag) -> Result<(), DefinitionError> {
        let name = flag.name();

        if state::is_help(name) {
            return Err(DefinitionError::Reserved {
                name: name.to_owned(),
            });
        }

        let name_taken = self.flags.contains_key(name)
            || state::single_char(name).is_some_and(|c| self.aliases.contains_key(&c));

        if name_taken {
            return Err(DefinitionError::DuplicateName {
                name: name.to_owned(),
            });
        }

        let Some(alias) = flag.alias() else {
            return Ok(());
        };

        if alias == 'h' {
            return Err(DefinitionError::Reserved {
                name: alias.to_string(),
            });
        }

        let alias_taken = self.aliases.contains_key(&alias)
            || self.flags.contains_key(alias.encode_utf8(&mut [0; 4]) as &str)
            || state::single_char(name) == Some(alias);

        match alias_taken {
            true => Err(DefinitionError::DuplicateAlias {
                name: name.to_owned(),
                alias,
            }),
            false => Ok(()),
        }
    }

    /// Get a flag by its full name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    /// Get a flag by alias or full name, the same way the parser does
    #[must_use]
    pub fn resolve(&self, identifier: &str) -> Option<&Flag> {
        let name = state::single_char(identifier)
            .and_then(|alias| self.aliases.get(&alias))
            .map_or(identifier, String::as_str);

        self.flags.get(name)
    }

    /// All declared flags, sorted by name
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    #[must_use]
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name)?.value().as_bool()
    }

    #[must_use]
    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name)?.value().as_str()
    }

    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name)?.value().as_number()
    }

    #[must_use]
    pub fn string_list(&self, name: &str) -> Option<&[String]> {
        self.get(name)?.value().as_list()
    }

    #[must_use]
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Whether the last parse ran to completion or failed. A help request
    /// doesn't count.
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        matches!(self.state, ParseState::Completed | ParseState::Failed)
    }

    /// Return every flag to its default and forget any previous parse
    pub fn reset(&mut self) {
        self.flags.values_mut().for_each(Flag::reset_to_default);
        self.state = ParseState::Idle;
        debug!(program = %self.program, "reset flags to defaults");
    }

    /**
    Parse command-line tokens, excluding the program name, applying each flag
    to this set.

    Flags must come first: parsing stops at a `--` (which is consumed) or at the
    first token that isn't a flag (which isn't). It also stops at the first
    error or help request; flags applied before that point keep their new
    values. If this set has been parsed before, it is reset first.
     */
    pub fn parse<'arg, I>(&mut self, arguments: I) -> Result<Outcome<'arg>, ParseError>
    where
        I: IntoIterator<Item = &'arg str>,
    {
        if self.state != ParseState::Idle {
            self.reset();
        }

        self.state = ParseState::Running;

        let mut parser = ArgumentsParser::new(arguments);

        let halted = loop {
            let visitor = ApplyFlag {
                flags: &mut self.flags,
                aliases: &self.aliases,
            };

            match parser.next_arg(visitor) {
                None => break Ok(None),
                Some(Ok(Applied::Flag)) => {}
                Some(Ok(Applied::HelpRequested)) => break Ok(Some(Outcome::HelpRequested)),
                Some(Err(error)) => break Err(error),
            }
        };

        let outcome = halted.map(|halted| {
            halted.unwrap_or_else(|| {
                let stop = parser.stopped().unwrap_or(Stop::Exhausted);
                let remaining = parser.into_remaining().collect();
                Outcome::Completed { remaining, stop }
            })
        });

        self.state = match outcome {
            Ok(Outcome::Completed { stop, .. }) => {
                debug!(program = %self.program, ?stop, "parsed flags");
                ParseState::Completed
            }
            Ok(Outcome::HelpRequested) => {
                debug!(program = %self.program, "help requested");
                ParseState::HelpRequested
            }
            Err(ref error) => {
                debug!(program = %self.program, %error, "failed to parse flags");
                ParseState::Failed
            }
        };

        outcome
    }

    /// The usage message for these flags, in the default style
    #[must_use]
    pub fn help(&self) -> Help<'_> {
        self.help_with(HelpStyle::default())
    }

    #[must_use]
    pub fn help_with(&self, style: HelpStyle) -> Help<'_> {
        Help::new(self, style)
    }
}
