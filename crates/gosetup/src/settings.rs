//! Validated settings for the profile commands.

use crate::cli::TargetArgs;
use crate::errors::CliError;
use gosetup_profile::{BindingNames, Target};
use std::path::{Path, PathBuf};

/// Everything a profile command needs, checked before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSettings {
    /// Desired root and workspace bindings
    pub target: Target,
    /// Profile to read and patch
    pub profile: PathBuf,
    /// Executable expected under `<root>/bin`
    pub toolchain_bin: String,
}

impl PatchSettings {
    /// Installation root as a path.
    #[must_use]
    pub fn root(&self) -> &Path {
        Path::new(self.target.root())
    }

    /// Workspace directory as a path.
    #[must_use]
    pub fn workspace(&self) -> &Path {
        Path::new(self.target.workspace())
    }
}

impl TryFrom<TargetArgs> for PatchSettings {
    type Error = CliError;

    fn try_from(args: TargetArgs) -> Result<Self, Self::Error> {
        if !args.profile.is_absolute() {
            return Err(CliError::invalid_argument(format!(
                "--profile must be an absolute path, got '{}'",
                args.profile.display()
            )));
        }
        if args.toolchain_bin.is_empty() || args.toolchain_bin.contains('/') {
            return Err(CliError::invalid_argument(format!(
                "--toolchain-bin must be a plain file name, got '{}'",
                args.toolchain_bin
            )));
        }

        let names = BindingNames::new(args.root_var, args.workspace_var);
        let target = Target::new(&args.root, &args.workspace, names)?;

        Ok(Self {
            target,
            profile: args.profile,
            toolchain_bin: args.toolchain_bin,
        })
    }
}
