//! Configuration options for dotted text.
//!
//! [`DottedOptions`] controls the path separator used on both sides of the codec
//! and the optional comment header written before the data lines.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotted::{to_string_with_options, DottedOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Inner { port: u16 }
//! #[derive(Serialize)]
//! struct Data { server: Inner }
//!
//! let data = Data { server: Inner { port: 8080 } };
//!
//! let options = DottedOptions::new().with_separator("/");
//! let text = to_string_with_options(&data, &options).unwrap();
//! assert_eq!(text, "server/port=\"8080\"\n");
//! ```

use chrono::Utc;

/// The default path separator.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Configuration options for flattening and unflattening.
///
/// The same separator must be used to write and to read a file: mixed
/// separators are not detected.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::DottedOptions;
///
/// let options = DottedOptions::new();
/// assert_eq!(options.separator, ".");
/// assert!(options.header.is_none());
///
/// let options = DottedOptions::new()
///     .with_separator("::")
///     .with_header("generated");
/// assert_eq!(options.separator, "::");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DottedOptions {
    pub separator: String,
    pub header: Option<String>,
}

impl Default for DottedOptions {
    fn default() -> Self {
        DottedOptions {
            separator: DEFAULT_SEPARATOR.to_string(),
            header: None,
        }
    }
}

impl DottedOptions {
    /// Creates default options (`.` separator, no header).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the separator joining path segments.
    ///
    /// An empty separator turns splitting off: every key is a single segment.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets a header written as `# `-prefixed comment lines before the data.
    ///
    /// Multi-line headers produce one comment line per header line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::DottedOptions;
    ///
    /// let options = DottedOptions::new().with_header("first\nsecond");
    /// assert_eq!(options.header_lines(), vec!["# first", "# second"]);
    /// ```
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Sets the header to `Created '<name>' at UTC: <now>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::DottedOptions;
    ///
    /// let options = DottedOptions::new().with_timestamp_header("settings.txt");
    /// let header = options.header.unwrap();
    /// assert!(header.starts_with("Created 'settings.txt' at UTC: "));
    /// ```
    #[must_use]
    pub fn with_timestamp_header(self, name: &str) -> Self {
        let created = format!(
            "Created '{}' at UTC: {}",
            name,
            Utc::now().format("%Y-%m-%d %H:%M:%S%.6f")
        );
        self.with_header(created)
    }

    /// The header rendered as comment lines, empty when no header is set.
    #[must_use]
    pub fn header_lines(&self) -> Vec<String> {
        match &self.header {
            Some(header) => header.lines().map(|line| format!("# {}", line)).collect(),
            None => Vec::new(),
        }
    }
}
