//! Error types for the Remap core library
//!
//! This module defines the error handling system for Remap, using thiserror
//! for ergonomic error definitions and anyhow for flexible error contexts.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for Remap operations
#[derive(Error, Debug)]
pub enum Error {
    /// Strict-mode path resolution failure: the first missing segment aborts
    /// the traversal
    #[error("path resolution failed: missing segment '{segment}' (depth {depth}) in '{path}'")]
    PathResolution {
        path: String,
        segment: String,
        depth: usize,
    },

    /// JSON serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Generic internal error with context
    #[error("internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Resolution policy for reading dotted paths out of the source document
///
/// The original engine descended permissively, so a missing key produced an
/// absent value rather than an error. That behavior is preserved as the
/// `Lenient` default; `Strict` fails fast on the first missing segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionMode {
    /// A missing segment yields an absent value; no error is raised
    Lenient,
    /// The first missing segment raises `Error::PathResolution`
    Strict,
}

/// Severity levels for report items
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Informational, no action required
    Info,
    /// Warning, should be reviewed
    Warning,
    /// Error, operation may fail
    Error,
    /// Critical, operation will fail
    Critical,
}

/// Codes for write outcomes that deviate from a plain insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportCode {
    /// Write suppressed because the target slot already held a value
    Collision,
    /// Existing value replaced under the last-write-wins policy
    Overwrite,
    /// Source path did not resolve, write skipped
    MissingSource,
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMode::Lenient => write!(f, "Lenient"),
            ResolutionMode::Strict => write!(f, "Strict"),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl fmt::Display for ReportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportCode::Collision => write!(f, "Collision"),
            ReportCode::Overwrite => write!(f, "Overwrite"),
            ReportCode::MissingSource => write!(f, "MissingSource"),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}
