//! # Error Types
//!
//! Structured error types for shade_core. The configurator itself never
//! fails (bad input is repaired, see [`crate::normalize`]); these errors only
//! surface at the edges: settings files, PDF rendering and CLI input.
//!
//! ## Example
//!
//! ```rust
//! use shade_core::errors::{ShadeError, ShadeResult};
//!
//! fn parse_qty(raw: &str) -> ShadeResult<u32> {
//!     raw.trim().parse().map_err(|_| {
//!         ShadeError::invalid_input("qty", raw, "Quantity must be a whole number")
//!     })
//! }
//!
//! assert!(parse_qty("two").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for shade_core operations
pub type ShadeResult<T> = Result<T, ShadeError>;

/// Structured error type for fallible operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ShadeError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A catalog option id that strict parsing does not recognize
    #[error("Unknown {kind}: {value}")]
    UnknownOption { kind: String, value: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Quote sheet could not be compiled or rendered
    #[error("Render failed: {stage} - {reason}")]
    RenderFailed { stage: String, reason: String },
}

impl ShadeError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ShadeError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownOption error
    pub fn unknown_option(kind: impl Into<String>, value: impl Into<String>) -> Self {
        ShadeError::UnknownOption {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        ShadeError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        ShadeError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        ShadeError::RenderFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ShadeError::InvalidInput { .. } => "INVALID_INPUT",
            ShadeError::UnknownOption { .. } => "UNKNOWN_OPTION",
            ShadeError::FileError { .. } => "FILE_ERROR",
            ShadeError::SerializationError { .. } => "SERIALIZATION_ERROR",
            ShadeError::VersionMismatch { .. } => "VERSION_MISMATCH",
            ShadeError::RenderFailed { .. } => "RENDER_FAILED",
        }
    }
}
