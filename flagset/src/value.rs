/*!
Typed flag values. Every flag holds exactly one [`FlagValue`], and its
[`Kind`] is fixed when the flag is declared.
 */

use core::fmt::{self, Display};

use joinery::JoinableIterator;

use crate::errors::ValueParseError;

/// The type of a flag's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Boolean,
    String,
    Number,
    StringList,
}

impl Kind {
    /// A stable tag for this kind, used in usage messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::StringList => "string-list",
        }
    }

    /// Whether a flag of this kind must be given a value with `=value` or a
    /// following token. Only booleans can appear bare.
    #[must_use]
    pub const fn expects_explicit_value(self) -> bool {
        !matches!(self, Kind::Boolean)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/**
The current value of a flag, along with the default it was declared with.

[`set`][FlagValue::set] either applies completely or leaves the value as it
was. For string lists it appends rather than replaces, and the declared default
sequence is kept separately so that [`reset_to_default`][FlagValue::reset_to_default]
can restore it regardless of what was appended.
 */
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Boolean { current: bool, default: bool },
    String { current: String, default: String },
    Number { current: f64, default: f64 },
    StringList { current: Vec<String>, default: Box<[String]> },
}

impl FlagValue {
    #[must_use]
    pub fn boolean(default: bool) -> Self {
        Self::Boolean {
            current: default,
            default,
        }
    }

    #[must_use]
    pub fn string(default: impl Into<String>) -> Self {
        let default = default.into();

        Self::String {
            current: default.clone(),
            default,
        }
    }

    #[must_use]
    pub fn number(default: f64) -> Self {
        Self::Number {
            current: default,
            default,
        }
    }

    #[must_use]
    pub fn string_list<I>(default: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let default: Box<[String]> = default.into_iter().map(Into::into).collect();

        Self::StringList {
            current: default.to_vec(),
            default,
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Boolean { .. } => Kind::Boolean,
            Self::String { .. } => Kind::String,
            Self::Number { .. } => Kind::Number,
            Self::StringList { .. } => Kind::StringList,
        }
    }

    #[must_use]
    pub fn expects_explicit_value(&self) -> bool {
        self.kind().expects_explicit_value()
    }

    /// Coerce `raw` into this value's type and store it. String lists append.
    pub fn set(&mut self, raw: &str) -> Result<(), ValueParseError> {
        match self {
            Self::Boolean { current, .. } => *current = parse_boolean(raw)?,
            Self::String { current, .. } => {
                current.clear();
                current.push_str(raw);
            }
            Self::Number { current, .. } => *current = parse_number(raw)?,
            Self::StringList { current, .. } => current.push(raw.to_owned()),
        }

        Ok(())
    }

    pub fn reset_to_default(&mut self) {
        match self {
            Self::Boolean { current, default } => *current = *default,
            Self::String { current, default } => current.clone_from(default),
            Self::Number { current, default } => *current = *default,
            Self::StringList { current, default } => {
                current.clear();
                current.extend(default.iter().cloned());
            }
        }
    }

    /// Canonical rendering of the current value. This is the same as the
    /// [`Display`] implementation.
    #[must_use]
    pub fn as_string(&self) -> String {
        self.to_string()
    }

    /// Canonical rendering of the declared default, in the same form as
    /// [`as_string`][Self::as_string].
    #[must_use]
    pub fn default_string(&self) -> String {
        match self {
            Self::Boolean { default, .. } => default.to_string(),
            Self::String { default, .. } => default.clone(),
            Self::Number { default, .. } => default.to_string(),
            Self::StringList { default, .. } => default.iter().join_with(',').to_string(),
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Boolean { current, .. } => Some(current),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String { current, .. } => Some(current),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Number { current, .. } => Some(current),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::StringList { current, .. } => Some(current),
            _ => None,
        }
    }
}

/// Booleans print as `true`/`false`, numbers in their shortest round-trip
/// form, and lists joined with commas.
impl Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean { current, .. } => write!(f, "{current}"),
            Self::String { current, .. } => f.write_str(current),
            Self::Number { current, .. } => write!(f, "{current}"),
            Self::StringList { current, .. } => write!(f, "{}", current.iter().join_with(',')),
        }
    }
}

fn parse_boolean(raw: &str) -> Result<bool, ValueParseError> {
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Ok(false)
    } else {
        Err(ValueParseError::Boolean {
            raw: raw.to_owned(),
        })
    }
}

fn parse_number(raw: &str) -> Result<f64, ValueParseError> {
    match raw.parse::<f64>() {
        Ok(number) if !number.is_nan() => Ok(number),
        _ => Err(ValueParseError::Number {
            raw: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_literals() {
        let mut value = FlagValue::boolean(false);

        for (raw, expected) in [
            ("true", true),
            ("FALSE", false),
            ("True", true),
            ("0", false),
            ("1", true),
        ] {
            value.set(raw).unwrap();
            assert_eq!(value.as_bool(), Some(expected), "{raw}");
            assert_eq!(value.as_string(), expected.to_string());
        }
    }

    #[test]
    fn bad_boolean_leaves_value_unchanged() {
        let mut value = FlagValue::boolean(true);

        let error = value.set("yes").unwrap_err();
        assert_eq!(
            error,
            ValueParseError::Boolean {
                raw: "yes".to_owned()
            }
        );
        assert_eq!(value.as_bool(), Some(true));
    }

    #[test]
    fn string_is_verbatim() {
        let mut value = FlagValue::string("default.json");

        value.set(" user file.json ").unwrap();
        assert_eq!(value.as_str(), Some(" user file.json "));
        assert_eq!(value.as_string(), " user file.json ");

        value.set("").unwrap();
        assert_eq!(value.as_str(), Some(""));
    }

    #[test]
    fn numbers_round_trip() {
        let mut value = FlagValue::number(0.0);

        for raw in ["8080", "-3", "0.5", "1e3", "2.5e-4"] {
            value.set(raw).unwrap();
            let parsed: f64 = raw.parse().unwrap();
            assert_eq!(value.as_number(), Some(parsed));

            let rendered = value.as_string();
            assert_eq!(rendered.parse::<f64>().unwrap(), parsed);
        }

        value.set("8080").unwrap();
        assert_eq!(value.as_string(), "8080");
    }

    #[test]
    fn nan_and_garbage_are_rejected() {
        let mut value = FlagValue::number(7.0);

        for raw in ["NaN", "nan", "", "12abc", "not-a-number"] {
            let error = value.set(raw).unwrap_err();
            assert_eq!(error.raw(), raw);
        }

        assert_eq!(value.as_number(), Some(7.0));
    }

    #[test]
    fn list_appends() {
        let mut value = FlagValue::string_list(["a"]);

        value.set("b").unwrap();
        value.set("c d").unwrap();

        assert_eq!(value.as_list(), Some(&["a", "b", "c d"].map(String::from)[..]));
        assert_eq!(value.as_string(), "a,b,c d");
    }

    #[test]
    fn default_string_ignores_current() {
        let mut list = FlagValue::string_list(["x", "y"]);
        list.set("z").unwrap();
        assert_eq!(list.default_string(), "x,y");

        let number = FlagValue::Number {
            current: 5.0,
            default: 1.0,
        };
        assert_eq!(number.default_string(), "1");
        assert_eq!(number.as_string(), "5");
    }

    #[test]
    fn reset_restores_original_list() {
        let mut value = FlagValue::string_list(["x", "y"]);

        value.set("z").unwrap();
        value.reset_to_default();
        assert_eq!(value.as_list(), Some(&["x", "y"].map(String::from)[..]));

        value.set("w").unwrap();
        value.reset_to_default();
        assert_eq!(value.as_list(), Some(&["x", "y"].map(String::from)[..]));
    }

    #[test]
    fn reset_restores_scalars() {
        let mut values = [
            FlagValue::boolean(false),
            FlagValue::string("d.json"),
            FlagValue::number(1.5),
        ];
        let originals = values.clone();

        for (value, raw) in values.iter_mut().zip(["true", "other.json", "99"]) {
            value.set(raw).unwrap();
        }
        assert_ne!(values, originals);

        values.iter_mut().for_each(FlagValue::reset_to_default);
        assert_eq!(values, originals);
    }

    #[test]
    fn kinds() {
        assert_eq!(FlagValue::boolean(false).kind(), Kind::Boolean);
        assert!(!FlagValue::boolean(false).expects_explicit_value());
        assert!(FlagValue::string("").expects_explicit_value());
        assert!(FlagValue::number(0.0).expects_explicit_value());
        assert!(FlagValue::string_list(Vec::<String>::new()).expects_explicit_value());
        assert_eq!(Kind::StringList.to_string(), "string-list");
    }
}
