//! Error types for dotted-key conversion.
//!
//! The nested map and the codec share one [`Error`] type:
//!
//! - **Key errors**: a dynamic source offered a key that is not a string, or a
//!   dotted path that does not exist was read or removed
//! - **Source errors**: a bulk update was given something that is neither a map
//!   nor a sequence of `[key, value]` pairs
//! - **Type mismatches**: a text leaf could not be parsed into the requested Rust type
//! - **Document / I/O errors**: JSON text or the underlying reader/writer failed
//!
//! Malformed lines are never an error: the line parser is permissive.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotted::{Error, NestedMap};
//!
//! let map = NestedMap::new();
//! let err = map.get("a.b").unwrap_err();
//! assert!(matches!(err, Error::KeyNotFound { .. }));
//! assert!(err.to_string().contains("a.b"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the nested map and the codec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A key presented to the nested map is not a string
    #[error("Invalid key: {0} is not a string")]
    InvalidKey(String),

    /// An element of a pair sequence is not a `[key, value]` pair
    #[error("Invalid entry: {0} is not a [key, value] pair")]
    InvalidEntry(String),

    /// The source of a bulk update is neither a map nor a pair sequence
    #[error("Invalid source: {0} is not a map or a sequence of pairs")]
    InvalidSource(String),

    /// A dotted path is missing at some depth
    #[error("No such key: {key}")]
    KeyNotFound { key: String },

    /// A leaf could not be converted to the requested type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Unsupported type for flattening
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// The JSON side of a conversion failed to parse or render
    #[error("Document error: {0}")]
    Document(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid-key error, rendering the offending key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::Error;
    ///
    /// let err = Error::invalid_key(7);
    /// assert_eq!(err.to_string(), "Invalid key: 7 is not a string");
    /// ```
    pub fn invalid_key<T: fmt::Display>(key: T) -> Self {
        Error::InvalidKey(key.to_string())
    }

    /// Creates an invalid-entry error for a malformed pair.
    pub fn invalid_entry<T: fmt::Display>(entry: T) -> Self {
        Error::InvalidEntry(entry.to_string())
    }

    /// Creates an invalid-source error for an update source of the wrong kind.
    pub fn invalid_source<T: fmt::Display>(source: T) -> Self {
        Error::InvalidSource(source.to_string())
    }

    /// Creates a key-not-found error for the full dotted key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::Error;
    ///
    /// let err = Error::key_not_found("w.z");
    /// assert_eq!(err.to_string(), "No such key: w.z");
    /// ```
    pub fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound {
            key: key.to_string(),
        }
    }

    /// Creates a type mismatch error when a leaf cannot become the requested type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::Error;
    ///
    /// let err = Error::type_mismatch("u32", "abc");
    /// assert!(err.to_string().contains("expected u32"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a document error from a JSON failure.
    pub fn document<T: fmt::Display>(msg: T) -> Self {
        Error::Document(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

/// What a map visitor expects when it meets a key that is not a string.
pub(crate) const STRING_KEY: &str = "a string key";

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    fn invalid_type(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        let expected = exp.to_string();
        if expected == STRING_KEY {
            Error::InvalidKey(unexp.to_string())
        } else {
            Error::type_mismatch(&expected, &unexp.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
