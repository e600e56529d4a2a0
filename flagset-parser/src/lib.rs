#![no_std]

/*!
Low-level classification of command-line tokens. Takes care of the `--`
terminator, the "flags come first" rule, stripping dashes and splitting off
inline `=value` arguments. No name resolution or type handling happens here;
usually this is too low level to use directly.
*/

#[cfg(test)]
extern crate std;

mod token;

pub use token::{Dashes, FlagToken};

/**
The [`ArgumentsParser`] type operates by passing the flags it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor<'arg> {
    type Value;

    /// A well-formed flag token, such as `--verbose`, `-p=80` or `-name`.
    /// The visitor can request a value from the following token through
    /// `argument`; if it doesn't, that token is classified independently.
    fn visit_flag(self, flag: FlagToken<'arg>, argument: impl ArgAccess<'arg>) -> Self::Value;

    /// A token that starts with a dash but has no usable identifier, such as
    /// `---x`, `-=value` or `--=`.
    fn visit_malformed(self, token: &'arg str) -> Self::Value;
}

/**
[`ArgAccess`] allows a visitor to decide if a given flag needs a value, based
on the identity of the flag.

Consider `--foo bar`. Is `bar` the value of `--foo`, or the first non-flag
argument? The [`ArgumentsParser`] can't independently classify it, so instead a
visitor requests the value through this trait only for flags that need one.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Take the next token as a value. This should only be called by flags that
    need a value; others should ignore it, so that the next token is parsed
    independently.

    This returns [`None`] without consuming anything if the arguments have been
    exhausted, or if the next token starts with a `-`. A token that looks like
    a flag is never consumed as a value.
    */
    fn take(self) -> Option<&'arg str>;
}

/// The reason an [`ArgumentsParser`] stopped producing flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stop {
    /// Every token was consumed as a flag or flag value
    Exhausted,

    /// A raw `--` was consumed. Tokens after it are left untouched.
    Terminator,

    /// A token that isn't a flag (including a lone `-`) was found. It is left
    /// unconsumed, along with everything after it.
    NonFlag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    Stopped(Stop),
}

/**
An `ArgumentsParser` is the main entry point into `flagset_parser`. Each call
to [`next_arg`][ArgumentsParser::next_arg] classifies one token and sends it to
the given [`Visitor`], until a terminator, a non-flag token, or the end of the
input is reached.

The parser operates entirely on borrowed data; the ubiquitous `'arg` lifetime
refers to the command line tokens, which are expected to outlive the parse.
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<'arg, I> {
    state: State,
    pending: Option<&'arg str>,
    args: I,
}

impl<'arg, I> ArgumentsParser<'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    /**
    Create a new [`ArgumentsParser`] from an iterator of string tokens. This
    list should *exclude* the name of the program, which is commonly passed as
    the first argument in the list.
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Ready,
            pending: None,
            args: args.into_iter(),
        }
    }

    #[inline]
    fn peek(&mut self) -> Option<&'arg str> {
        if self.pending.is_none() {
            self.pending = self.args.next();
        }

        self.pending
    }

    #[inline]
    fn advance(&mut self) -> Option<&'arg str> {
        self.pending.take().or_else(|| self.args.next())
    }

    #[inline]
    fn stop<T>(&mut self, stop: Stop) -> Option<T> {
        self.state = State::Stopped(stop);
        None
    }

    /// Classify the next token. Returns [`None`] once the parser has stopped;
    /// [`stopped`][Self::stopped] reports why.
    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        if let State::Stopped(_) = self.state {
            return None;
        }

        let Some(token) = self.peek() else {
            return self.stop(Stop::Exhausted);
        };

        let body = match token {
            "--" => {
                self.advance();
                return self.stop(Stop::Terminator);
            }
            "-" => return self.stop(Stop::NonFlag),
            token => match token.strip_prefix('-') {
                None => return self.stop(Stop::NonFlag),
                Some(body) => body,
            },
        };

        self.advance();

        let (dashes, body) = match body.strip_prefix('-') {
            Some(long) => (Dashes::Double, long),
            None => (Dashes::Single, body),
        };

        let (identifier, inline) = match split_once(body, b'=') {
            Some((identifier, inline)) => (identifier, Some(inline)),
            None => (body, None),
        };

        if identifier.is_empty() || identifier.starts_with('-') {
            return Some(visitor.visit_malformed(token));
        }

        let flag = FlagToken {
            raw: token,
            dashes,
            identifier,
            inline,
        };

        Some(visitor.visit_flag(flag, NextArgAccess { parent: self }))
    }

    /// Why the parser stopped, or [`None`] if it can still produce flags
    #[inline]
    #[must_use]
    pub fn stopped(&self) -> Option<Stop> {
        match self.state {
            State::Ready => None,
            State::Stopped(stop) => Some(stop),
        }
    }

    /// Consume the parser, returning every token it hasn't consumed. After a
    /// [`Stop::NonFlag`], this begins with the non-flag token itself.
    pub fn into_remaining(self) -> impl Iterator<Item = &'arg str> {
        self.pending.into_iter().chain(self.args)
    }
}

/// ArgAccess implementation that gets the next token from the list, as long
/// as it doesn't look like a flag.
struct NextArgAccess<'a, 'arg, I> {
    parent: &'a mut ArgumentsParser<'arg, I>,
}

impl<'arg, I> ArgAccess<'arg> for NextArgAccess<'_, 'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    fn take(self) -> Option<&'arg str> {
        match self.parent.peek()? {
            next if next.starts_with('-') => None,
            _ => self.parent.advance(),
        }
    }
}

/// `delimiter` must be ASCII, so that both halves fall on char boundaries.
fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    debug_assert!(delimiter.is_ascii());

    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}
