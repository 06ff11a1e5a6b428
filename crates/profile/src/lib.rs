//! Idempotent shell-profile patching for toolchain installs
//!
//! This crate edits a POSIX shell profile (typically `/etc/profile`) so that
//! it exports a toolchain's installation root and workspace variables and
//! puts both `bin` directories on `PATH`:
//! - Existing exports are updated in place; unrelated lines are never touched
//! - `PATH` entries are recognized in literal and `$VAR/bin` form and never
//!   duplicated
//! - Missing exports are inserted before the first `PATH` export, or appended
//!
//! # Overview
//!
//! Patching is split into pure steps followed by the I/O step:
//!
//! 1. [`classify`](classify::classify) scans the lines and rewrites recognized
//!    exports in place
//! 2. [`plan_insertions`](plan::plan_insertions) decides where missing
//!    exports go
//! 3. [`commit`](commit::commit) stages the result next to the profile,
//!    shows the diff against a timestamped backup and, on confirmation,
//!    atomically replaces the profile
//!
//! ```no_run
//! use gosetup_profile::{Backup, BindingNames, ProfileDocument, ProfileEnvPatcher, Target};
//! use std::path::Path;
//!
//! # fn main() -> gosetup_profile::Result<()> {
//! let target = Target::new(
//!     Path::new("/usr/local/share/go"),
//!     Path::new("/usr/local/share/gopath"),
//!     BindingNames::default(),
//! )?;
//! let profile = Path::new("/etc/profile");
//! let patch = ProfileEnvPatcher::new(target).patch(&ProfileDocument::load(profile)?);
//! print!("{}", patch.diff("a/profile", "b/profile"));
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod commit;
pub mod document;
mod error;
pub mod export;
pub mod path_list;
pub mod patcher;
pub mod plan;
pub mod summary;
pub mod target;

pub use classify::{BindingsFound, Classification, MalformedLine, ObservedBinding, PathRefs};
pub use commit::{Backup, CommitOutcome, Prompter, StagedProfile, commit, unified_diff};
pub use document::ProfileDocument;
pub use error::{Error, Result};
pub use patcher::{Patch, ProfileEnvPatcher, ProfileStatus};
pub use plan::{PendingEdit, PlannedEdit};
pub use summary::{BindingChange, ChangeKind, ChangeSummary};
pub use target::{Binding, BindingNames, DEFAULT_ROOT_VAR, DEFAULT_WORKSPACE_VAR, Target};
