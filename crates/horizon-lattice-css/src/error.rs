//! Error types for the CSS engine.
//!
//! Grammar errors inside a stylesheet never surface here; they are reported
//! through the [`ErrorCollector`](crate::collector::ErrorCollector). These
//! variants cover failures that prevent a parse from starting at all, and
//! failures of the converter side.

use std::path::PathBuf;

/// Result type alias for CSS operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when loading stylesheets or converting values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// CSS parsing error.
    #[error("CSS parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },

    /// A URL could not be parsed or joined against its base.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Only `file:` stylesheets can be loaded by the parser itself.
    #[error("Unsupported URL scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },

    /// File I/O error.
    #[error("Failed to read stylesheet '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A parsed value does not have the shape its converter expects.
    #[error("Cannot convert value with {converter}: {message}")]
    Conversion { converter: String, message: String },

    /// A looked-up name had no value at conversion time.
    #[error("Unresolved lookup '{name}'")]
    UnresolvedLookup { name: String },
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a URL error.
    pub fn invalid_url(url: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a conversion error.
    pub fn conversion(converter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conversion {
            converter: converter.into(),
            message: message.into(),
        }
    }
}
