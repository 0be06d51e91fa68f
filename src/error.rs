//! Unified error types for spdx-tools.
//!
//! Parsing problems are collected per element and surfaced as one
//! [`SpdxParsingError`] per input. Everything the outer layers can fail on
//! is wrapped by [`SpdxError`], which carries a chain of context strings.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for spdx-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SpdxError {
    /// Errors during document parsing
    #[error("Failed to parse SPDX document: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// The document was rejected by the write-side validation gate
    #[error("Document is not valid: {}", .messages.join("; "))]
    Validation { messages: Vec<String> },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// No codec is registered for the file suffix
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Checksum computation for an algorithm without a local implementation
    #[error("Unsupported checksum algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Writing a document or payload failed
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error(transparent)]
    Spdx(#[from] SpdxParsingError),

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Invalid XML structure: {0}")]
    InvalidXml(String),

    #[error("Invalid RDF graph: {0}")]
    InvalidRdf(String),
}

/// Aggregated parse messages for one input.
///
/// Raised once all elements have been visited, so it carries every problem
/// found rather than only the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxParsingError {
    pub messages: Vec<String>,
}

impl SpdxParsingError {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }
}

impl fmt::Display for SpdxParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

impl std::error::Error for SpdxParsingError {}

/// Batch of per-field type errors raised by entity constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join("; "))]
pub struct ConstructionError {
    pub messages: Vec<String>,
}

impl ConstructionError {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for spdx-tools operations
pub type Result<T> = std::result::Result<T, SpdxError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl SpdxError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error from rendered validation messages
    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation { messages }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Messages of an aggregated parse error, if this is one.
    #[must_use]
    pub fn parsing_messages(&self) -> Option<&[String]> {
        match self {
            Self::Parse {
                source: ParseErrorKind::Spdx(err),
                ..
            } => Some(&err.messages),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for SpdxError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<SpdxParsingError> for SpdxError {
    fn from(err: SpdxParsingError) -> Self {
        Self::parse("", ParseErrorKind::Spdx(err))
    }
}

impl From<serde_json::Error> for SpdxError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for SpdxError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse(
            "YAML deserialization",
            ParseErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
///
/// ```ignore
/// use spdx_tools::error::ErrorContext;
///
/// let content = std::fs::read_to_string(path)
///     .with_context(|| format!("reading {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SpdxError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: SpdxError, new_ctx: &str) -> SpdxError {
    match err {
        SpdxError::Parse {
            context: existing,
            source,
        } => SpdxError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SpdxError::Io {
            path,
            message,
            source,
        } => SpdxError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        SpdxError::UnsupportedFormat(msg) => {
            SpdxError::UnsupportedFormat(chain_context(new_ctx, &msg))
        }
        SpdxError::Serialization(msg) => SpdxError::Serialization(chain_context(new_ctx, &msg)),
        other @ SpdxError::UnsupportedAlgorithm(_) => other,
        SpdxError::Config(msg) => SpdxError::Config(chain_context(new_ctx, &msg)),
        // Validation messages are user facing and kept verbatim.
        other @ SpdxError::Validation { .. } => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
