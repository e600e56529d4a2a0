/*!
The parse state machine: what a [`FlagSet`][crate::FlagSet] does with each
classified token, and what a parse call reports back.
 */

use std::collections::{BTreeMap, HashMap};

use flagset_parser::{ArgAccess, FlagToken, Stop, Visitor};
use tracing::trace;

use crate::errors::ParseError;
use crate::flag::Flag;

/// Where a [`FlagSet`][crate::FlagSet] is in its parse lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseState {
    /// Freshly declared, or reset. All flags hold their defaults.
    #[default]
    Idle,

    /// A parse is in progress
    Running,

    /// The last parse consumed every flag it was given
    Completed,

    /// The last parse stopped at `-h` or `--help`
    HelpRequested,

    /// The last parse stopped at an error. Flags applied before the error
    /// keep their values.
    Failed,
}

/**
The successful result of a parse. Help requests are reported here, rather
than as an error, since asking for help isn't a failure.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'arg> {
    /// Every flag was applied. `remaining` holds the tokens this parse didn't
    /// interpret: everything after a `--`, or everything from the first
    /// non-flag token onward, as reported by `stop`.
    Completed {
        remaining: Vec<&'arg str>,
        stop: Stop,
    },

    /// `-h` or `--help` was found. Flags before it were applied; nothing
    /// after it was looked at.
    HelpRequested,
}

impl<'arg> Outcome<'arg> {
    #[must_use]
    pub fn is_help_requested(&self) -> bool {
        matches!(self, Self::HelpRequested)
    }

    /// The uninterpreted tokens, which are empty if help was requested
    #[must_use]
    pub fn remaining(&self) -> &[&'arg str] {
        match self {
            Self::Completed { remaining, .. } => remaining,
            Self::HelpRequested => &[],
        }
    }
}

/// What happened to a single flag token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Applied {
    Flag,
    HelpRequested,
}

pub(crate) fn is_help(identifier: &str) -> bool {
    matches!(identifier, "h" | "help")
}

/// Find a flag by alias, falling back to its full name.
pub(crate) fn lookup<'a>(
    flags: &'a mut BTreeMap<String, Flag>,
    aliases: &HashMap<char, String>,
    identifier: &str,
) -> Option<&'a mut Flag> {
    let name = single_char(identifier)
        .and_then(|alias| aliases.get(&alias))
        .map_or(identifier, String::as_str);

    flags.get_mut(name)
}

pub(crate) fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// The [`Visitor`] that resolves one flag token against the declared flags
/// and applies its value.
pub(crate) struct ApplyFlag<'a> {
    pub flags: &'a mut BTreeMap<String, Flag>,
    pub aliases: &'a HashMap<char, String>,
}

impl<'arg> Visitor<'arg> for ApplyFlag<'_> {
    type Value = Result<Applied, ParseError>;

    fn visit_flag(self, token: FlagToken<'arg>, argument: impl ArgAccess<'arg>) -> Self::Value {
        trace!(%token, "flag token");

        let identifier = token.identifier();

        if is_help(identifier) {
            return Ok(Applied::HelpRequested);
        }

        let flag = lookup(self.flags, self.aliases, identifier).ok_or_else(|| {
            ParseError::UnknownFlag {
                name: identifier.to_owned(),
            }
        })?;

        match token.inline() {
            Some(value) => flag.apply_explicit(value)?,
            None if flag.expects_explicit_value() => match argument.take() {
                Some(value) => flag.apply_explicit(value)?,
                None => {
                    return Err(ParseError::MissingValue {
                        flag: flag.name().to_owned(),
                    });
                }
            },
            None => flag.apply_implicit()?,
        }

        Ok(Applied::Flag)
    }

    fn visit_malformed(self, token: &'arg str) -> Self::Value {
        Err(ParseError::Malformed {
            token: token.to_owned(),
        })
    }
}
