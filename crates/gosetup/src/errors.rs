//! CLI error types, exit codes and miette-based reporting

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Successful run
pub const EXIT_OK: i32 = 0;
/// Usage error or unusable installation
pub const EXIT_CLI: i32 = 2;
/// Fatal I/O error
pub const EXIT_IO: i32 = 3;

/// CLI-specific error types with diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// An argument or configuration value was rejected
    #[error("Invalid argument: {message}")]
    #[diagnostic(
        code(gosetup::cli::invalid_argument),
        help("Run 'gosetup --help' to see available options")
    )]
    InvalidArgument {
        /// What was wrong
        message: String,
    },

    /// The installation root does not hold a usable toolchain
    #[error("No toolchain installation found at {}: {reason}", path.display())]
    #[diagnostic(
        code(gosetup::cli::invalid_installation),
        help("Install or extract the toolchain first, or point --root at it")
    )]
    InvalidInstallation {
        /// Installation root that was checked
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// A filesystem operation outside the profile failed
    #[error("File operation failed: {operation} ({})", path.display())]
    #[diagnostic(
        code(gosetup::cli::file_error),
        help("Check file permissions; system locations usually require root")
    )]
    FileError {
        /// Operation that was attempted
        operation: String,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Reading, staging or replacing the profile failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Profile(#[from] gosetup_profile::Error),

    /// Tracing could not be set up
    #[error("Tracing initialization failed")]
    #[diagnostic(
        code(gosetup::cli::tracing_error),
        help("Check the RUST_LOG environment variable")
    )]
    TracingError {
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        /// Configuration in effect
        config_used: String,
    },
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid installation error
    pub fn invalid_installation(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidInstallation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a file error
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileError {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a tracing error
    pub fn tracing(
        source: impl std::error::Error + Send + Sync + 'static,
        config_used: impl Into<String>,
    ) -> Self {
        Self::TracingError {
            source: Box::new(source),
            config_used: config_used.into(),
        }
    }
}

/// Process exit code for an error
#[must_use]
pub fn exit_code_for(error: &CliError) -> i32 {
    match error {
        CliError::InvalidArgument { .. }
        | CliError::InvalidInstallation { .. }
        | CliError::Profile(gosetup_profile::Error::InvalidTarget { .. }) => EXIT_CLI,
        CliError::FileError { .. } | CliError::Profile(_) => EXIT_IO,
        CliError::TracingError { .. } => 1,
    }
}

/// Write a miette report for `error` to stderr
#[allow(clippy::print_stderr)]
pub fn render_error(error: CliError) {
    eprintln!("{:?}", miette::Report::new(error));
}
