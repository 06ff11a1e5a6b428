//! Command-line definition

use crate::tracing::{LogLevel, TracingConfig, TracingFormat};
use clap::{Args, Parser, Subcommand};
use gosetup_profile::{DEFAULT_ROOT_VAR, DEFAULT_WORKSPACE_VAR};
use std::path::PathBuf;

/// Top-level arguments
#[derive(Parser, Debug)]
#[command(name = "gosetup")]
#[command(about = "Wire an installed toolchain into the system shell profile")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Log verbosity when `RUST_LOG` is unset
    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    /// Log line format
    #[arg(long, global = true, help = "Log output format", value_enum)]
    pub log_format: Option<TracingFormat>,

    /// Shorthand for `--log-format json`
    #[arg(long, global = true, help = "Output logs in JSON format")]
    pub json: bool,
}

impl Cli {
    /// Tracing settings selected by the global flags; `--json` wins over
    /// `--log-format`.
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        let format = if self.json {
            TracingFormat::Json
        } else {
            self.log_format.unwrap_or(TracingFormat::Compact)
        };
        TracingConfig {
            format,
            level: self.level.into(),
            ..TracingConfig::default()
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print version information
    #[command(about = "Show version information")]
    Version,
    /// Interactive patch
    #[command(about = "Patch the profile interactively, after showing the diff")]
    Apply(TargetArgs),
    /// Read-only preview
    #[command(about = "Print the changes apply would make, without writing anything")]
    Diff(TargetArgs),
    /// Read-only inspection
    #[command(about = "Show which toolchain variables the profile currently sets")]
    Status(TargetArgs),
}

/// Where the toolchain lives and which profile to patch.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TargetArgs {
    /// Toolchain installation root
    #[arg(long, env = "GOSETUP_ROOT", default_value = "/usr/local/share/go")]
    pub root: PathBuf,

    /// Workspace directory, created if missing
    #[arg(long, env = "GOSETUP_WORKSPACE", default_value = "/usr/local/share/gopath")]
    pub workspace: PathBuf,

    /// Shell profile to patch
    #[arg(long, env = "GOSETUP_PROFILE", default_value = "/etc/profile")]
    pub profile: PathBuf,

    /// Variable holding the installation root
    #[arg(long, env = "GOSETUP_ROOT_VAR", default_value = DEFAULT_ROOT_VAR)]
    pub root_var: String,

    /// Variable holding the workspace path
    #[arg(long, env = "GOSETUP_WORKSPACE_VAR", default_value = DEFAULT_WORKSPACE_VAR)]
    pub workspace_var: String,

    /// Executable expected under `<root>/bin`
    #[arg(long, env = "GOSETUP_TOOLCHAIN_BIN", default_value = "go")]
    pub toolchain_bin: String,
}

/// Parse the process arguments, exiting with usage help on error.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
