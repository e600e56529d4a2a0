use core::fmt::{self, Display};
use std::borrow::Cow;

use indent_write::fmt::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::flag::Flag;
use crate::flag_set::FlagSet;
use crate::help::HelpStyle;
use crate::value::{FlagValue, Kind};

/// Space between the tag column and the descriptions
const GAP: usize = 2;

/// Descriptions are never wrapped narrower than this
const MIN_WRAP: usize = 20;

/*
Overall structure:

Usage: command [options]

DESCRIPTION

Options:
  -c, --config <string>    Path to the config file (default: default.json)
      --include <string-list>
                           Extra include paths
  -v, --verbose[=boolean]  Log more
 */
pub fn write_help(
    out: &mut (impl fmt::Write + ?Sized),
    flags: &FlagSet,
    style: &HelpStyle,
) -> fmt::Result {
    writeln!(out, "Usage: {} [options]", flags.program())?;

    if let Some(description) = flags.description() {
        writeln!(out, "\n{description}")?;
    }

    let tags: Vec<(String, &Flag)> = flags
        .flags()
        .map(|flag| (tag(flag).to_string(), flag))
        .collect();

    let column = tags
        .iter()
        .map(|(tag, _)| tag.chars().count())
        .max()
        .unwrap_or(0)
        .min(style.max_column);

    let wrap = style
        .width
        .saturating_sub(style.indent + column + GAP)
        .max(MIN_WRAP);

    let indent = " ".repeat(style.indent);

    maybe_section(out, "Options", &indent, tags, |out, (tag, flag)| {
        describe(out, &tag, &summary(flag), column, wrap)
    })
}

/// `-c, --config <string>`, or `    --verbose[=boolean]` without an alias
fn tag(flag: &Flag) -> impl Display + '_ {
    let name = flag.name();

    let tags = lazy_format!(match (flag.alias()) {
        Some(alias) => "-{alias}, --{name}",
        None => "    --{name}",
    });

    lazy_format!(match (flag.kind()) {
        Kind::Boolean => "{tags}[=boolean]",
        kind => "{tags} <{kind}>",
    })
}

/// The description, followed by the default if it's worth mentioning
fn summary(flag: &Flag) -> String {
    match (flag.description(), notable_default(flag.value())) {
        (description, None) => description.to_owned(),
        ("", Some(default)) => format!("(default: {default})"),
        (description, Some(default)) => format!("{description} (default: {default})"),
    }
}

/// Defaults are only shown when they're something other than the type's
/// empty value.
fn notable_default(value: &FlagValue) -> Option<String> {
    match value {
        FlagValue::Boolean { default, .. } => default.then(|| "true".to_owned()),
        FlagValue::String { default, .. } if !default.is_empty() => {
            Some(quoted(default).into_owned())
        }
        FlagValue::Number { default, .. } if *default != 0.0 => Some(default.to_string()),
        FlagValue::StringList { default, .. } if !default.is_empty() => Some(
            default
                .iter()
                .map(String::as_str)
                .map(quoted)
                .join_with(", ")
                .to_string(),
        ),
        _ => None,
    }
}

/// Strings containing whitespace are shown JSON-quoted, so that their
/// boundaries are visible.
fn quoted(text: &str) -> Cow<'_, str> {
    match text.contains(char::is_whitespace) {
        true => Cow::Owned(serde_json::Value::from(text).to_string()),
        false => Cow::Borrowed(text),
    }
}

/// Write a section by writing a newline, then the `header`, then an
/// indented `body`.
fn section<O: fmt::Write + ?Sized, T>(
    out: &mut O,
    header: &str,
    indent: &str,
    body: impl FnOnce(IndentWriter<&mut O>) -> Result<T, fmt::Error>,
) -> Result<T, fmt::Error> {
    writeln!(out, "\n{header}:")?;
    body(IndentWriter::new(indent, out))
}

/// Write an optional section, only if the iterator is not empty.
/// Otherwise identical to `section`.
fn maybe_section<O: fmt::Write + ?Sized, I: IntoIterator>(
    out: &mut O,
    header: &str,
    indent: &str,
    items: I,
    body: impl Fn(&mut dyn fmt::Write, I::Item) -> fmt::Result,
) -> fmt::Result {
    let mut items = items.into_iter();

    match items.next() {
        None => Ok(()),
        Some(first) => section(out, header, indent, |mut out| {
            body(&mut out, first)?;
            items.try_for_each(|item| body(&mut out, item))
        }),
    }
}

/// Describe an item by printing the item, padded out to `column`, followed by
/// its wrapped description. If the item is wider than the column, the
/// description starts on the next line instead.
fn describe(
    out: &mut dyn fmt::Write,
    item: &str,
    description: &str,
    column: usize,
    wrap: usize,
) -> fmt::Result {
    out.write_str(item)?;

    if description.is_empty() {
        return writeln!(out);
    }

    let width = item.chars().count();
    let pad = column + GAP;

    match width <= column {
        true => write!(out, "{:1$}", "", pad - width)?,
        false => write!(out, "\n{:pad$}", "")?,
    }

    let options = textwrap::Options::new(wrap).wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);
    let mut lines = textwrap::wrap(description, options).into_iter();

    if let Some(first) = lines.next() {
        writeln!(out, "{first}")?;
    }

    lines.try_for_each(|line| writeln!(out, "{:pad$}{line}", ""))
}
