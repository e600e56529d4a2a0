/*!
Error types for declaring flags and for parsing command lines.

Declaration problems ([`DefinitionError`]) are programming mistakes and are
reported as soon as the flag is declared. Everything that can go wrong with a
command line is a [`ParseError`]; a [`ValueParseError`] only describes a raw
string that doesn't fit a flag's type, and reaches callers wrapped in a
[`ParseError::InvalidValue`] that names the flag.
 */

use thiserror::Error;

/// A flag declaration was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("flag names must not be empty")]
    EmptyName,

    #[error("invalid flag name {name:?}: names can't start with '-' or contain '=' or whitespace")]
    InvalidName { name: String },

    #[error(
        "invalid alias {alias:?} for --{name}: an alias must be a single character other than '-' or '='"
    )]
    InvalidAlias { name: String, alias: String },

    #[error("--{name} collides with an existing flag or alias")]
    DuplicateName { name: String },

    #[error("alias -{alias} for --{name} collides with an existing flag or alias")]
    DuplicateAlias { name: String, alias: char },

    #[error("{name:?} is reserved for the help flag")]
    Reserved { name: String },
}

/// A raw string couldn't be coerced into a flag's type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueParseError {
    #[error("{raw:?} is not a boolean (expected true, false, 1 or 0)")]
    Boolean { raw: String },

    #[error("{raw:?} is not a number")]
    Number { raw: String },
}

impl ValueParseError {
    /// The string that failed to parse
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Boolean { raw } | Self::Number { raw } => raw,
        }
    }
}

/// Parsing a command line failed. Parsing stops at the first of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token started with a dash but had no usable name, like `---x`
    #[error("malformed flag {token:?}")]
    Malformed { token: String },

    #[error("unknown flag {name:?}")]
    UnknownFlag { name: String },

    /// The flag needs a value, and neither `=value` nor a usable following
    /// token was given
    #[error("flag --{flag} requires a value")]
    MissingValue { flag: String },

    #[error("invalid value {value:?} for flag --{flag}: {source}")]
    InvalidValue {
        flag: String,
        value: String,
        #[source]
        source: ValueParseError,
    },
}

impl ParseError {
    /// The name of the flag involved, when known. For
    /// [`UnknownFlag`][Self::UnknownFlag] this is the name as it was written.
    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        match self {
            Self::Malformed { .. } => None,
            Self::UnknownFlag { name } => Some(name),
            Self::MissingValue { flag } | Self::InvalidValue { flag, .. } => Some(flag),
        }
    }

    /// The offending raw text, when there was one: the rejected value, or the
    /// whole token if it was malformed
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { value, .. } => Some(value),
            Self::Malformed { token } => Some(token),
            Self::UnknownFlag { .. } | Self::MissingValue { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_message_names_flag_and_value() {
        let error = ParseError::InvalidValue {
            flag: "port".to_owned(),
            value: "abc".to_owned(),
            source: ValueParseError::Number {
                raw: "abc".to_owned(),
            },
        };

        assert_eq!(
            error.to_string(),
            r#"invalid value "abc" for flag --port: "abc" is not a number"#
        );
        assert_eq!(error.flag(), Some("port"));
        assert_eq!(error.value(), Some("abc"));
    }

    #[test]
    fn context_accessors() {
        let malformed = ParseError::Malformed {
            token: "---x".to_owned(),
        };
        assert_eq!(malformed.flag(), None);
        assert_eq!(malformed.value(), Some("---x"));

        let missing = ParseError::MissingValue {
            flag: "port".to_owned(),
        };
        assert_eq!(missing.flag(), Some("port"));
        assert_eq!(missing.value(), None);
        assert_eq!(missing.to_string(), "flag --port requires a value");
    }
}
