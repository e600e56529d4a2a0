use tracing::debug;

use crate::errors::{DefinitionError, ParseError};
use crate::value::{FlagValue, Kind};

/**
A single declared flag: a name, an optional one-character alias, a
description, and a [`FlagValue`].

Flags are created by the [`FlagSet`][crate::FlagSet] factory methods and live
as long as the set does. `is_set` tracks whether the flag was explicitly
assigned during the current parse.
 */
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    alias: Option<char>,
    description: String,
    value: FlagValue,
    default: String,
    set: bool,
}

impl Flag {
    /// Create a flag, validating its name and alias. The flag starts out
    /// holding the value's default.
    pub fn new(
        name: &str,
        description: &str,
        alias: Option<&str>,
        mut value: FlagValue,
    ) -> Result<Self, DefinitionError> {
        if name.is_empty() {
            return Err(DefinitionError::EmptyName);
        }

        if name.starts_with('-') || name.contains('=') || name.contains(char::is_whitespace) {
            return Err(DefinitionError::InvalidName {
                name: name.to_owned(),
            });
        }

        let alias = alias.map(|alias| parse_alias(name, alias)).transpose()?;
        value.reset_to_default();

        Ok(Self {
            name: name.to_owned(),
            alias,
            description: description.to_owned(),
            default: value.default_string(),
            value,
            set: false,
        })
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn alias(&self) -> Option<char> {
        self.alias
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &FlagValue {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    #[inline]
    #[must_use]
    pub fn expects_explicit_value(&self) -> bool {
        self.value.expects_explicit_value()
    }

    /// Whether this flag was explicitly assigned since the last reset
    #[inline]
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.set
    }

    /// The default value, rendered when the flag was declared
    #[inline]
    #[must_use]
    pub fn default_string(&self) -> &str {
        &self.default
    }

    /// Assign a value given on the command line
    pub fn apply_explicit(&mut self, raw: &str) -> Result<(), ParseError> {
        self.value
            .set(raw)
            .map_err(|source| ParseError::InvalidValue {
                flag: self.name.clone(),
                value: source.raw().to_owned(),
                source,
            })?;

        self.set = true;
        debug!(flag = %self.name, value = raw, "assigned flag");
        Ok(())
    }

    /// Assign the implicit `true` of a bare boolean flag. Flags of any other
    /// kind need an explicit value.
    pub fn apply_implicit(&mut self) -> Result<(), ParseError> {
        match self.value {
            FlagValue::Boolean {
                ref mut current, ..
            } => *current = true,
            _ => {
                return Err(ParseError::MissingValue {
                    flag: self.name.clone(),
                });
            }
        }

        self.set = true;
        debug!(flag = %self.name, "assigned implicit true");
        Ok(())
    }

    pub fn reset_to_default(&mut self) {
        self.value.reset_to_default();
        self.set = false;
    }
}

fn parse_alias(name: &str, alias: &str) -> Result<char, DefinitionError> {
    let mut chars = alias.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '-' && c != '=' && !c.is_whitespace() => Ok(c),
        _ => Err(DefinitionError::InvalidAlias {
            name: name.to_owned(),
            alias: alias.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port() -> Flag {
        Flag::new("port", "Port to listen on", Some("p"), FlagValue::number(0.0)).unwrap()
    }

    #[test]
    fn new_captures_default() {
        let flag = Flag::new(
            "config",
            "Config file",
            Some("c"),
            FlagValue::string("default.json"),
        )
        .unwrap();

        assert_eq!(flag.name(), "config");
        assert_eq!(flag.alias(), Some('c'));
        assert_eq!(flag.description(), "Config file");
        assert_eq!(flag.default_string(), "default.json");
        assert_eq!(flag.kind(), Kind::String);
        assert!(!flag.is_set());
    }

    #[test]
    fn new_starts_from_the_declared_default() {
        let mut flag = Flag::new(
            "port",
            "",
            None,
            FlagValue::Number {
                current: 5.0,
                default: 1.0,
            },
        )
        .unwrap();

        assert_eq!(flag.default_string(), "1");
        assert_eq!(flag.value().as_number(), Some(1.0));

        flag.apply_explicit("9").unwrap();
        flag.reset_to_default();
        assert_eq!(flag.value().as_string(), flag.default_string());
    }

    #[test]
    fn alias_must_be_one_usable_character() {
        for alias in ["", "pp", "-", "=", " "] {
            let error = Flag::new("port", "", Some(alias), FlagValue::number(0.0)).unwrap_err();

            assert_eq!(
                error,
                DefinitionError::InvalidAlias {
                    name: "port".to_owned(),
                    alias: alias.to_owned()
                }
            );
        }

        let flag = Flag::new("lambda", "", Some("λ"), FlagValue::boolean(false)).unwrap();
        assert_eq!(flag.alias(), Some('λ'));
    }

    #[test]
    fn names_are_validated() {
        assert_eq!(
            Flag::new("", "", None, FlagValue::boolean(false)).unwrap_err(),
            DefinitionError::EmptyName
        );

        for name in ["-v", "a=b", "two words"] {
            assert_eq!(
                Flag::new(name, "", None, FlagValue::boolean(false)).unwrap_err(),
                DefinitionError::InvalidName {
                    name: name.to_owned()
                }
            );
        }
    }

    #[test]
    fn explicit_value_marks_set() {
        let mut flag = port();

        flag.apply_explicit("8080").unwrap();
        assert_eq!(flag.value().as_number(), Some(8080.0));
        assert!(flag.is_set());
    }

    #[test]
    fn explicit_value_error_names_the_flag() {
        let mut flag = port();

        let error = flag.apply_explicit("not-a-number").unwrap_err();
        assert_eq!(error.flag(), Some("port"));
        assert_eq!(error.value(), Some("not-a-number"));
        assert!(!flag.is_set());
        assert_eq!(flag.value().as_number(), Some(0.0));
    }

    #[test]
    fn implicit_value_only_for_booleans() {
        let mut verbose = Flag::new("verbose", "", Some("v"), FlagValue::boolean(false)).unwrap();
        verbose.apply_implicit().unwrap();
        assert_eq!(verbose.value().as_bool(), Some(true));
        assert!(verbose.is_set());

        let mut flag = port();
        assert_eq!(
            flag.apply_implicit().unwrap_err(),
            ParseError::MissingValue {
                flag: "port".to_owned()
            }
        );
        assert!(!flag.is_set());
    }

    #[test]
    fn reset_clears_set() {
        let mut flag = Flag::new(
            "include",
            "",
            Some("i"),
            FlagValue::string_list(["base"]),
        )
        .unwrap();

        flag.apply_explicit("extra").unwrap();
        flag.reset_to_default();

        assert!(!flag.is_set());
        assert_eq!(flag.value().as_list(), Some(&["base".to_owned()][..]));
        assert_eq!(flag.default_string(), "base");
    }
}
