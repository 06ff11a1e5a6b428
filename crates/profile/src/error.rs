//! Error types for the gosetup-profile crate

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for profile patching operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// I/O error with path context
    #[error("I/O error during {operation} ({}): {source}", display_path(path.as_deref()))]
    #[diagnostic(
        code(gosetup_profile::io::error),
        help("Check that the file exists and that you have permission to modify it")
    )]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// The path where the I/O error occurred, if applicable
        path: Option<Box<Path>>,
        /// Description of the operation that failed
        operation: String,
    },

    /// The confirmation channel failed
    #[error("Prompt failed: {message}")]
    #[diagnostic(code(gosetup_profile::prompt))]
    Prompt {
        /// The error message describing the prompt failure
        message: String,
    },

    /// The patch target cannot be used
    #[error("Invalid patch target: {message}")]
    #[diagnostic(code(gosetup_profile::target::invalid))]
    InvalidTarget {
        /// The error message describing the invalid target
        message: String,
    },
}

fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "<unknown path>".to_string(), |p| p.display().to_string())
}

impl Error {
    /// Create an I/O error with context
    pub fn io(source: std::io::Error, path: Option<PathBuf>, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: path.map(PathBuf::into_boxed_path),
            operation: operation.into(),
        }
    }

    /// Create a prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }

    /// Create an invalid target error
    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            message: message.into(),
        }
    }

    /// The path this error refers to, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}

/// Result type for gosetup-profile operations
pub type Result<T> = std::result::Result<T, Error>;
