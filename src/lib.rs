//! # serde_dotted
//!
//! Convert nested documents to and from flat dotted-key text.
//!
//! ## What is dotted text?
//!
//! Every leaf of a tree becomes one line. The line's key joins the names of
//! all enclosing objects with a separator (`.` by default) and the value is
//! written between double quotes:
//!
//! ```text
//! # Created 'server.txt' at UTC: 2024-05-01 10:00:00.000000
//! server.host="localhost"
//! server.port="8080"
//! ```
//!
//! Lines are easy to grep, diff, sort and edit with line-oriented tools, and
//! reading them back rebuilds the tree.
//!
//! ## Key Features
//!
//! - **Dotted-path map**: [`NestedMap`] reads and writes nested entries with a single `a.b.c` key
//! - **Lazy flattening**: [`flatten`] yields lines one at a time in document order
//! - **Permissive parsing**: [`unflatten`] skips comments and blank lines and never rejects a line
//! - **Serde Compatible**: any `T: Serialize` can be flattened, any `T: Deserialize` read back
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_dotted::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     server: Server,
//! }
//!
//! let config = Config {
//!     server: Server { host: "localhost".to_string(), port: 8080 },
//! };
//!
//! let text = to_string(&config).unwrap();
//! assert_eq!(text, "server.host=\"localhost\"\nserver.port=\"8080\"\n");
//!
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(config, back);
//! ```
//!
//! ### Dynamic Documents
//!
//! Text carries no types, so leaves always come back as strings:
//!
//! ```rust
//! use serde_dotted::{dotted, flatten, unflatten};
//!
//! let doc = dotted!({ "a": { "b": { "c": 1 } } });
//! let lines: Vec<String> = flatten(doc.as_object().unwrap(), ".").collect();
//! assert_eq!(lines, vec!["a.b.c=\"1\""]);
//!
//! let back = unflatten(&lines, ".");
//! assert_eq!(back.into_value(), dotted!({ "a": { "b": { "c": "1" } } }));
//! ```
//!
//! ### JSON Files
//!
//! ```rust
//! use serde_dotted::{json_to_text, text_to_json, DottedOptions};
//!
//! let options = DottedOptions::new();
//! let text = json_to_text(r#"{"x": {"y": "5"}}"#, &options).unwrap();
//! assert_eq!(text, "x.y=\"5\"\n");
//!
//! let json = text_to_json(&text, &options).unwrap();
//! assert_eq!(json, "{\n  \"x\": {\n    \"y\": \"5\"\n  }\n}\n");
//! ```
//!
//! ## Limitations
//!
//! - Values are not escaped: a value containing a newline cannot be represented
//! - Keys containing the separator are split on read
//! - Empty objects produce no line and are lost on the way back

pub mod de;
pub mod error;
pub mod flatten;
pub mod macros;
pub mod map;
pub mod nested;
pub mod options;
pub mod ser;
pub mod unflatten;
pub mod value;

pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use flatten::{flatten, flatten_entries, format_line, Entries, Flatten};
pub use map::DottedMap;
pub use nested::NestedMap;
pub use options::{DottedOptions, DEFAULT_SEPARATOR};
pub use ser::ValueSerializer;
pub use unflatten::{parse_line, unflatten, unflatten_reader};
pub use value::{DottedValue, Number};

/// Shorthand for [`DottedValue`].
pub type Value = DottedValue;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Convert any `T: Serialize` to a `DottedValue`.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{to_value, DottedValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: DottedValue = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if a map key does not serialize to a string.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<DottedValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Deserialize an instance of type `T` from a `DottedValue`.
///
/// String leaves are parsed into the requested types.
///
/// # Errors
///
/// Returns an error if a leaf cannot be converted to the type `T` expects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: DottedValue) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Serialize any `T: Serialize` to dotted text, one line per leaf.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(text, "x=\"1\"\ny=\"2\"\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value does not serialize to an object.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &DottedOptions::default())
}

/// Serialize any `T: Serialize` to dotted text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{to_string_with_options, DottedOptions};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("key", "value");
///
/// let options = DottedOptions::new().with_header("generated");
/// let text = to_string_with_options(&map, &options).unwrap();
/// assert_eq!(text, "# generated\nkey=\"value\"\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value does not serialize to an object.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &DottedOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::with_capacity(256);
    to_writer_with_options(&mut buffer, value, options)?;
    String::from_utf8(buffer).map_err(Error::custom)
}

/// Serialize any `T: Serialize` to a writer as dotted text.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x=\"1\"\ny=\"2\"\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value does not serialize to an object or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &DottedOptions::default())
}

/// Serialize any `T: Serialize` to a writer as dotted text with custom options.
///
/// The header comment, if any, is written first. Lines are written one at a
/// time as the document is walked.
///
/// # Errors
///
/// Returns an error if the value does not serialize to an object or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &DottedOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    write_document(&mut writer, &to_value(value)?, options)
}

fn write_document<W>(writer: &mut W, value: &DottedValue, options: &DottedOptions) -> Result<()>
where
    W: io::Write,
{
    let map = value.as_object().ok_or_else(|| {
        Error::unsupported_type(&format!(
            "only objects can be flattened, found {}",
            value.kind()
        ))
    })?;

    let write_err = |e: io::Error| Error::io(&e.to_string());
    for line in options.header_lines() {
        writeln!(writer, "{}", line).map_err(write_err)?;
    }
    let mut count = 0usize;
    for line in flatten(map, &options.separator) {
        writeln!(writer, "{}", line).map_err(write_err)?;
        count += 1;
    }
    tracing::debug!(lines = count, separator = %options.separator, "flattened document");
    Ok(())
}

/// Deserialize an instance of type `T` from dotted text.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("# comment\nx=\"1\"\ny=\"2\"").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if a leaf cannot be converted to the type `T` expects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &DottedOptions::default())
}

/// Deserialize an instance of type `T` from dotted text using `options.separator`.
///
/// # Errors
///
/// Returns an error if a leaf cannot be converted to the type `T` expects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &DottedOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(unflatten(s.lines(), &options.separator).into_value())
}

/// Deserialize an instance of type `T` from an I/O stream of dotted text.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::from_reader;
/// use std::collections::HashMap;
/// use std::io::Cursor;
///
/// let input = Cursor::new(b"a=\"1\"\nb=\"2\"\n");
/// let map: HashMap<String, u8> = from_reader(input).unwrap();
/// assert_eq!(map["b"], 2);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or a leaf cannot be converted.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let map = unflatten_reader(io::BufReader::new(reader), DEFAULT_SEPARATOR)?;
    from_value(map.into_value())
}

/// Deserialize an instance of type `T` from bytes of dotted text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or a leaf cannot be converted.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(s)
}

/// Convert a JSON document to dotted text.
///
/// Numbers, booleans, nulls and arrays are written in their JSON text form.
/// Integers keep every digit, however wide.
///
/// # Errors
///
/// Returns [`Error::Document`] if `json` is not valid JSON, or
/// [`Error::UnsupportedType`] if its top level is not an object.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn json_to_text(json: &str, options: &DottedOptions) -> Result<String> {
    let document: DottedValue = serde_json::from_str(json).map_err(Error::document)?;
    let mut buffer = Vec::with_capacity(json.len());
    write_document(&mut buffer, &document, options)?;
    String::from_utf8(buffer).map_err(Error::custom)
}

/// Convert dotted text to a pretty-printed JSON document (two-space indent,
/// trailing newline). Every leaf becomes a JSON string.
///
/// # Errors
///
/// Returns [`Error::Document`] if the JSON cannot be rendered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn text_to_json(text: &str, options: &DottedOptions) -> Result<String> {
    let map = unflatten(text.lines(), &options.separator);
    let mut json = serde_json::to_string_pretty(&map).map_err(Error::document)?;
    json.push('\n');
    Ok(json)
}
