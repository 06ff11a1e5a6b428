//! Checks on the toolchain installation and its workspace directory.

use crate::errors::CliError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Subdirectories a fresh workspace gets.
pub const WORKSPACE_SUBDIRS: [&str; 3] = ["bin", "src", "pkg"];

/// Require `root` to be a directory holding `bin/<toolchain_bin>`.
///
/// # Errors
///
/// Returns [`CliError::InvalidInstallation`] describing the first thing that
/// is missing.
#[instrument]
pub fn verify_installation(root: &Path, toolchain_bin: &str) -> Result<(), CliError> {
    if !root.is_dir() {
        return Err(CliError::invalid_installation(root, "not a directory"));
    }
    let bin_dir = root.join("bin");
    if !bin_dir.is_dir() {
        return Err(CliError::invalid_installation(root, "bin directory is missing"));
    }
    if !bin_dir.join(toolchain_bin).is_file() {
        return Err(CliError::invalid_installation(
            root,
            format!("bin/{toolchain_bin} is missing"),
        ));
    }
    tracing::debug!("Toolchain installation found");
    Ok(())
}

/// Create the workspace directory and its subdirectories where missing.
///
/// Returns the directories that were created, outermost first.
///
/// # Errors
///
/// Returns [`CliError::FileError`] if a directory cannot be created or the
/// path exists but is not a directory.
#[instrument]
pub fn ensure_workspace(workspace: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut created = Vec::new();

    for dir in std::iter::once(workspace.to_path_buf())
        .chain(WORKSPACE_SUBDIRS.iter().map(|sub| workspace.join(sub)))
    {
        if dir.is_dir() {
            continue;
        }
        if dir.exists() {
            return Err(CliError::file_error(
                "create workspace directory",
                &dir,
                std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists but is not a directory"),
            ));
        }
        fs::create_dir_all(&dir)
            .map_err(|e| CliError::file_error("create workspace directory", &dir, e))?;
        tracing::info!(path = %dir.display(), "Created workspace directory");
        created.push(dir);
    }

    Ok(created)
}
