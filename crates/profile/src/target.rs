//! What the patched profile must export.

use crate::export::{PATH_VAR, is_identifier};
use crate::{Error, Result};
use std::fmt;
use std::path::Path;

/// Default name of the installation root variable.
pub const DEFAULT_ROOT_VAR: &str = "GOROOT";
/// Default name of the workspace variable.
pub const DEFAULT_WORKSPACE_VAR: &str = "GOPATH";

/// Names of the two scalar bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingNames {
    /// Installation root variable, e.g. `GOROOT`
    pub root: String,
    /// Workspace variable, e.g. `GOPATH`
    pub workspace: String,
}

impl Default for BindingNames {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT_VAR.to_string(),
            workspace: DEFAULT_WORKSPACE_VAR.to_string(),
        }
    }
}

impl BindingNames {
    /// Create a new set of names.
    pub fn new(root: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            workspace: workspace.into(),
        }
    }

    /// Variable name of a binding.
    #[must_use]
    pub fn name(&self, binding: Binding) -> &str {
        match binding {
            Binding::Root => &self.root,
            Binding::Workspace => &self.workspace,
            Binding::Path => PATH_VAR,
        }
    }
}

/// The three bindings the patcher maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Binding {
    /// Installation root scalar
    Root,
    /// Workspace scalar
    Workspace,
    /// Search path list
    Path,
}

impl Binding {
    /// All bindings in synthesis order.
    pub const ALL: [Self; 3] = [Self::Root, Self::Workspace, Self::Path];
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Root => "root",
            Self::Workspace => "workspace",
            Self::Path => "path",
        })
    }
}

/// Desired values for one patching run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    root: String,
    workspace: String,
    names: BindingNames,
}

impl Target {
    /// Validate and build a target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTarget`] when a path is relative, not UTF-8,
    /// or holds characters that cannot be written into a profile safely, or
    /// when a variable name is not a shell identifier.
    pub fn new(root: &Path, workspace: &Path, names: BindingNames) -> Result<Self> {
        for name in [&names.root, &names.workspace] {
            if !is_identifier(name) || name == PATH_VAR {
                return Err(Error::invalid_target(format!(
                    "'{name}' is not a usable variable name"
                )));
            }
        }
        if names.root == names.workspace {
            return Err(Error::invalid_target(format!(
                "root and workspace variables must differ (both are '{}')",
                names.root
            )));
        }

        Ok(Self {
            root: profile_safe_path(root)?,
            workspace: profile_safe_path(workspace)?,
            names,
        })
    }

    /// Installation root path.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Workspace path.
    #[must_use]
    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    /// Binding names.
    #[must_use]
    pub const fn names(&self) -> &BindingNames {
        &self.names
    }

    /// Desired scalar value for a binding; `None` for `PATH`.
    #[must_use]
    pub fn value(&self, binding: Binding) -> Option<&str> {
        match binding {
            Binding::Root => Some(&self.root),
            Binding::Workspace => Some(&self.workspace),
            Binding::Path => None,
        }
    }
}

fn profile_safe_path(path: &Path) -> Result<String> {
    let text = path.to_str().ok_or_else(|| {
        Error::invalid_target(format!("{} is not valid UTF-8", path.display()))
    })?;
    if !path.is_absolute() {
        return Err(Error::invalid_target(format!(
            "{text} must be an absolute path"
        )));
    }
    if text
        .chars()
        .any(|c| c.is_control() || matches!(c, '"' | '\\' | '$' | '`'))
    {
        return Err(Error::invalid_target(format!(
            "{text} contains characters that cannot be exported safely"
        )));
    }
    Ok(text.to_string())
}
