//! Dotted-line to tree conversion.
//!
//! [`unflatten`] reads lines in order and assigns each value through
//! [`NestedMap::set`], so a later line for the same path replaces an earlier
//! one, and a line below a former leaf turns that leaf into a branch.
//!
//! Parsing is deliberately permissive:
//!
//! - blank lines are skipped
//! - a line whose first non-whitespace character is `#` is a comment
//! - the first `=` splits path from value; a line without `=` is a path with an empty value
//! - one leading and one trailing `"` are stripped from the value; nothing is unescaped
//!
//! Every value comes back as a [`DottedValue::String`].

use crate::{DottedValue, Error, NestedMap, Result};
use std::io::BufRead;

/// Splits one line into `(path, value)`, or returns `None` for blank and
/// comment lines.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::parse_line;
///
/// assert_eq!(parse_line(r#"a.b="x=1""#), Some(("a.b", "x=1")));
/// assert_eq!(parse_line(r#"  key = "padded"  "#), Some(("key", "padded")));
/// assert_eq!(parse_line("no_equals"), Some(("no_equals", "")));
/// assert_eq!(parse_line("   # comment"), None);
/// assert_eq!(parse_line(""), None);
/// ```
#[must_use]
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (path, raw) = line.split_once('=').unwrap_or((line, ""));
    Some((path.trim(), strip_quotes(raw.trim())))
}

fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Builds a [`NestedMap`] from dotted lines.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{dotted, unflatten};
///
/// let text = "# Created 'x.txt'\nx.y=\"5\"\n";
/// let map = unflatten(text.lines(), ".");
/// assert_eq!(map.into_value(), dotted!({ "x": { "y": "5" } }));
/// ```
pub fn unflatten<I>(lines: I, separator: &str) -> NestedMap
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut loader = Loader::new(separator);
    for line in lines {
        loader.push(line.as_ref());
    }
    loader.finish()
}

/// Builds a [`NestedMap`] from a reader, one line at a time.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails or the input is not valid UTF-8.
pub fn unflatten_reader<R>(reader: R, separator: &str) -> Result<NestedMap>
where
    R: BufRead,
{
    let mut loader = Loader::new(separator);
    for line in reader.lines() {
        let line = line.map_err(|e| Error::io(&e.to_string()))?;
        loader.push(&line);
    }
    Ok(loader.finish())
}

/// Applies lines in order, tracking line numbers and how many lines carried data.
struct Loader {
    map: NestedMap,
    line: usize,
    applied: usize,
}

impl Loader {
    fn new(separator: &str) -> Self {
        Loader {
            map: NestedMap::with_separator(separator),
            line: 0,
            applied: 0,
        }
    }

    fn push(&mut self, line: &str) {
        self.line += 1;
        match parse_line(line) {
            Some((path, value)) => {
                if !line.contains('=') {
                    tracing::debug!(
                        line = self.line,
                        path,
                        "no '=' on line, storing an empty value"
                    );
                }
                self.map.set(path, DottedValue::String(value.to_string()));
                self.applied += 1;
            }
            None => tracing::trace!(line = self.line, "skipping blank or comment line"),
        }
    }

    fn finish(self) -> NestedMap {
        tracing::debug!(
            lines = self.line,
            applied = self.applied,
            separator = self.map.separator(),
            "unflattened dotted text"
        );
        self.map
    }
}
