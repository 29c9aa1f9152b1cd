//! Tree to dotted-line conversion.
//!
//! [`flatten`] walks a document in pre-order and yields one `path="value"` line
//! per leaf. The walk is lazy: nothing is rendered until the iterator is
//! advanced, so a caller can write each line straight to its destination.
//!
//! ```rust
//! use serde_dotted::{dotted, flatten};
//!
//! let doc = dotted!({ "a": { "b": { "c": 1 } }, "d": "x" });
//! let lines: Vec<String> = flatten(doc.as_object().unwrap(), ".").collect();
//! assert_eq!(lines, vec![r#"a.b.c="1""#, r#"d="x""#]);
//! ```
//!
//! Values are written between a pair of double quotes with no escaping. A leaf
//! containing a newline, or a key containing the separator, will not read back
//! as it was written. Empty objects produce no line at all.

use crate::{DottedMap, DottedValue};
use indexmap::map::Iter;

/// Returns a lazy iterator over the `(path, leaf)` pairs of `map`.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{dotted, flatten_entries, DottedValue};
///
/// let doc = dotted!({ "a": { "b": true } });
/// let entries: Vec<(String, &DottedValue)> =
///     flatten_entries(doc.as_object().unwrap(), "/").collect();
/// assert_eq!(entries, vec![("a/b".to_string(), &DottedValue::Bool(true))]);
/// ```
pub fn flatten_entries<'a>(map: &'a DottedMap, separator: &'a str) -> Entries<'a> {
    Entries {
        separator,
        stack: vec![map.iter()],
        path: Vec::new(),
    }
}

/// Returns a lazy iterator over the `path="value"` lines of `map`.
pub fn flatten<'a>(map: &'a DottedMap, separator: &'a str) -> Flatten<'a> {
    Flatten {
        entries: flatten_entries(map, separator),
    }
}

/// Renders one line of dotted text.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{format_line, DottedValue};
///
/// assert_eq!(format_line("a.b", &DottedValue::from(2)), r#"a.b="2""#);
/// ```
#[must_use]
pub fn format_line(path: &str, value: &DottedValue) -> String {
    format!("{}=\"{}\"", path, value)
}

/// Pre-order walk over the leaves of a document. See [`flatten_entries`].
pub struct Entries<'a> {
    separator: &'a str,
    stack: Vec<Iter<'a, String, DottedValue>>,
    path: Vec<&'a str>,
}

impl<'a> Entries<'a> {
    fn join(&self, key: &str) -> String {
        let mut joined = String::with_capacity(
            self.path.iter().map(|s| s.len() + self.separator.len()).sum::<usize>() + key.len(),
        );
        for segment in &self.path {
            joined.push_str(segment);
            joined.push_str(self.separator);
        }
        joined.push_str(key);
        joined
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = (String, &'a DottedValue);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.next() {
                Some((key, DottedValue::Object(child))) => {
                    self.path.push(key);
                    self.stack.push(child.iter());
                }
                Some((key, leaf)) => return Some((self.join(key), leaf)),
                None => {
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
    }
}

/// Pre-order walk rendering each leaf as a line. See [`flatten`].
pub struct Flatten<'a> {
    entries: Entries<'a>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.entries
            .next()
            .map(|(path, value)| format_line(&path, value))
    }
}
