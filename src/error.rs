// Error types for the fixture exporter
//
// This module defines the error taxonomy for reading extractor test tables,
// writing the exported fixture document and loading it back, with stable
// numeric codes suitable for scripting around the CLI.

use log::error;
use std::fmt;
use std::path::Path;

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

/// Log an export error with structured context
///
/// Emits the numeric code, the failing component and the message on a single
/// error-level line.
pub fn log_export_error(err: &ExportError, context: &str) {
    error!(
        "Export error in {}: code={}, component=FixtureExporter, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Export-related errors
///
/// Input access failures (3001-3003) and output write failures (3004) abort
/// the export. Values that JSON cannot represent never show up here: the
/// fallback encoder absorbs them.
///
/// Error code ranges: 3001-3006
#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    /// The record collection is missing or unreadable
    InputUnavailable { source: String, reason: String },

    /// No embedded test table is registered under this extractor name
    UnknownExtractor { name: String },

    /// An input entry is not a mapping
    InvalidRecord { index: usize, reason: String },

    /// The destination could not be created or written
    OutputWrite { path: String, reason: String },

    /// The serializer failed mid-document
    Serialization { reason: String },

    /// An exported fixture file could not be parsed back
    FixtureParse { path: String, reason: String },
}

impl ExportError {
    pub(crate) fn input(source: impl Into<String>, reason: impl fmt::Display) -> Self {
        ExportError::InputUnavailable {
            source: source.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn output(path: &Path, reason: impl fmt::Display) -> Self {
        ExportError::OutputWrite {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn fixture(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        ExportError::FixtureParse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl ErrorCode for ExportError {
    fn code(&self) -> i32 {
        match self {
            ExportError::InputUnavailable { .. } => 3001,
            ExportError::UnknownExtractor { .. } => 3002,
            ExportError::InvalidRecord { .. } => 3003,
            ExportError::OutputWrite { .. } => 3004,
            ExportError::Serialization { .. } => 3005,
            ExportError::FixtureParse { .. } => 3006,
        }
    }

    fn message(&self) -> String {
        match self {
            ExportError::InputUnavailable { source, reason } => {
                format!("Test cases from {} unavailable: {}", source, reason)
            }
            ExportError::UnknownExtractor { name } => {
                format!("No test table registered for extractor '{}'", name)
            }
            ExportError::InvalidRecord { index, reason } => {
                format!("Test case #{} is not a mapping: {}", index, reason)
            }
            ExportError::OutputWrite { path, reason } => {
                format!("Failed to write {}: {}", path, reason)
            }
            ExportError::Serialization { reason } => {
                format!("Failed to serialize test cases: {}", reason)
            }
            ExportError::FixtureParse { path, reason } => {
                format!("Failed to load fixtures from {}: {}", path, reason)
            }
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message(), self.code())
    }
}

impl std::error::Error for ExportError {}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization {
            reason: err.to_string(),
        }
    }
}
