use core::fmt;

/// The prefix that introduced a flag token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dashes {
    /// `-v`, `-v=true`, `-name value`
    Single,

    /// `--verbose`, `--port=8080`
    Double,
}

/**
A single flag token, split into its parts.

Given `--path=out.txt`, the identifier is `path` and the inline argument is
`out.txt`. Given `-p`, the identifier is `p` and there is no inline argument.
The identifier is guaranteed to be non-empty and to not start with a `-`;
tokens that break that rule are reported to
[`Visitor::visit_malformed`][crate::Visitor::visit_malformed] instead.

Whether the identifier is an alias or a full name is up to the caller. Both
`-v` and `-verbose` are single-dash tokens.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagToken<'arg> {
    pub(crate) raw: &'arg str,
    pub(crate) dashes: Dashes,
    pub(crate) identifier: &'arg str,
    pub(crate) inline: Option<&'arg str>,
}

impl<'arg> FlagToken<'arg> {
    /// The complete token as it appeared on the command line
    #[inline]
    #[must_use]
    pub const fn raw(&self) -> &'arg str {
        self.raw
    }

    #[inline]
    #[must_use]
    pub const fn dashes(&self) -> Dashes {
        self.dashes
    }

    /// The flag name or alias, without dashes or inline argument
    #[inline]
    #[must_use]
    pub const fn identifier(&self) -> &'arg str {
        self.identifier
    }

    /// The argument given after the first `=`, if any. This may be empty, as
    /// in `--name=`.
    #[inline]
    #[must_use]
    pub const fn inline(&self) -> Option<&'arg str> {
        self.inline
    }
}

impl fmt::Display for FlagToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}
