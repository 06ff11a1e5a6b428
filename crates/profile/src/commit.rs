//! Backing up, materializing, reviewing and replacing the real profile.
//!
//! The real profile is only ever touched by the final rename of a fully
//! written temporary sibling, and only after the user accepted the diff.

use crate::patcher::Patch;
use crate::summary::ChangeSummary;
use crate::{Error, Result};
use similar::TextDiff;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Interaction with whoever approves profile changes.
pub trait Prompter {
    /// Show a block of text, typically a diff.
    ///
    /// # Errors
    ///
    /// Returns an error if the output channel fails.
    fn present(&mut self, text: &str) -> Result<()>;

    /// Ask a yes/no question. `default_yes` decides an empty answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the input or output channel fails.
    fn confirm_action(&mut self, message: &str, default_yes: bool) -> Result<bool>;
}

/// Unified diff between two texts; empty when they are equal.
#[must_use]
pub fn unified_diff(old: &str, new: &str, from_label: &str, to_label: &str) -> String {
    if old == new {
        return String::new();
    }
    let diff = TextDiff::from_lines(old, new);
    diff.unified_diff().header(from_label, to_label).to_string()
}

/// A timestamped copy of the profile taken before any edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    path: PathBuf,
}

impl Backup {
    /// Copy `profile` to a fresh sibling named
    /// `<name>.gosetup-<YYYYmmddHHMMSS>.bak`, adding `-N` when taken.
    ///
    /// # Errors
    ///
    /// Returns an I/O error naming the backup path if the copy fails.
    #[instrument(level = "debug")]
    pub fn create(profile: &Path) -> Result<Self> {
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
        let path = unique_backup_path(profile, &stamp);
        std::fs::copy(profile, &path)
            .map_err(|e| Error::io(e, Some(path.clone()), "create profile backup"))?;
        tracing::info!(backup = %path.display(), "Backed up profile");
        Ok(Self { path })
    }

    /// Location of the backup file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Content of the backup.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backup cannot be read.
    pub fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .map_err(|e| Error::io(e, Some(self.path.clone()), "read profile backup"))
    }

    /// Delete the backup file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be removed.
    pub fn remove(self) -> Result<()> {
        std::fs::remove_file(&self.path)
            .map_err(|e| Error::io(e, Some(self.path.clone()), "remove profile backup"))?;
        tracing::info!(backup = %self.path.display(), "Removed profile backup");
        Ok(())
    }
}

fn unique_backup_path(profile: &Path, stamp: &str) -> PathBuf {
    let name = profile
        .file_name()
        .map_or_else(|| "profile".into(), |n| n.to_string_lossy().into_owned());
    let base = format!("{name}.gosetup-{stamp}");
    let candidate = profile.with_file_name(format!("{base}.bak"));
    if !candidate.exists() {
        return candidate;
    }
    (1..)
        .map(|n| profile.with_file_name(format!("{base}-{n}.bak")))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

/// The patched content written to a temporary file next to the profile.
///
/// Dropping it without [`StagedProfile::install`] deletes the temporary file.
#[derive(Debug)]
pub struct StagedProfile {
    file: tempfile::NamedTempFile,
    profile: PathBuf,
    content: String,
}

impl StagedProfile {
    /// Write `content` to a temporary sibling of `profile`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the temporary file cannot be created or
    /// written. The profile itself is never opened for writing.
    #[instrument(level = "debug", skip(content))]
    pub fn write(profile: &Path, content: String) -> Result<Self> {
        let dir = profile
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut file = tempfile::Builder::new()
            .prefix(".gosetup-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| Error::io(e, Some(dir.to_path_buf()), "create temporary profile"))?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| Error::io(e, Some(file.path().to_path_buf()), "write temporary profile"))?;

        Ok(Self {
            file,
            profile: profile.to_path_buf(),
            content,
        })
    }

    /// The staged content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Atomically replace the profile with the staged content, keeping the
    /// profile's permission bits.
    ///
    /// # Errors
    ///
    /// Returns an I/O error naming the profile if the replacement fails.
    #[instrument(level = "debug", skip(self), fields(profile = %self.profile.display()))]
    pub fn install(self) -> Result<()> {
        let permissions = std::fs::metadata(&self.profile)
            .map_err(|e| Error::io(e, Some(self.profile.clone()), "read profile permissions"))?
            .permissions();
        self.file
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| Error::io(e, Some(self.file.path().to_path_buf()), "set temporary profile permissions"))?;
        self.file
            .persist(&self.profile)
            .map_err(|e| Error::io(e.error, Some(self.profile.clone()), "replace profile"))?;
        tracing::info!("Profile replaced");
        Ok(())
    }
}

/// Result of [`commit`].
#[derive(Debug)]
pub enum CommitOutcome {
    /// Nothing to change; the backup is identical and may be discarded.
    Unchanged {
        /// Backup taken before the run
        backup: Backup,
    },
    /// The user accepted and the profile was replaced.
    Applied {
        /// What changed
        summary: ChangeSummary,
        /// Backup of the previous content
        backup: Backup,
    },
    /// The user declined; the profile is untouched.
    Declined {
        /// Backup, kept on disk
        backup: Backup,
    },
}

impl CommitOutcome {
    /// The backup associated with the outcome.
    #[must_use]
    pub fn backup(&self) -> &Backup {
        match self {
            Self::Unchanged { backup } | Self::Applied { backup, .. } | Self::Declined { backup } => {
                backup
            }
        }
    }
}

/// Diff the backup against the patched document and, on confirmation,
/// replace the profile.
///
/// # Errors
///
/// Returns an I/O error if the backup cannot be read, the staged copy cannot
/// be written, or the final replacement fails, and a prompt error if the
/// prompter fails. In every error case the profile is left untouched.
#[instrument(skip(backup, patch, prompter), fields(backup_path = %backup.path().display()))]
pub fn commit(
    profile: &Path,
    backup: Backup,
    patch: &Patch,
    prompter: &mut dyn Prompter,
) -> Result<CommitOutcome> {
    let staged = StagedProfile::write(profile, patch.patched().render())?;
    let before = backup.read()?;
    let diff = unified_diff(
        &before,
        staged.content(),
        &backup.path().display().to_string(),
        &profile.display().to_string(),
    );

    if diff.is_empty() {
        tracing::info!("No changes needed");
        return Ok(CommitOutcome::Unchanged { backup });
    }

    prompter.present(&diff)?;
    let question = format!("Apply these changes to {}?", profile.display());
    if !prompter.confirm_action(&question, false)? {
        tracing::info!("Profile change declined");
        return Ok(CommitOutcome::Declined { backup });
    }

    staged.install()?;
    Ok(CommitOutcome::Applied {
        summary: patch.summary(),
        backup,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ProfileDocument;
    use crate::patcher::ProfileEnvPatcher;
    use crate::target::{BindingNames, Target};
    use std::fs;

    struct Scripted {
        answer: bool,
        shown: Vec<String>,
        asked: usize,
    }

    impl Prompter for Scripted {
        fn present(&mut self, text: &str) -> Result<()> {
            self.shown.push(text.to_string());
            Ok(())
        }

        fn confirm_action(&mut self, _message: &str, _default_yes: bool) -> Result<bool> {
            self.asked += 1;
            Ok(self.answer)
        }
    }

    fn scripted(answer: bool) -> Scripted {
        Scripted {
            answer,
            shown: Vec::new(),
            asked: 0,
        }
    }

    fn patcher() -> ProfileEnvPatcher {
        ProfileEnvPatcher::new(
            Target::new(
                Path::new("/usr/local/share/go"),
                Path::new("/usr/local/share/gopath"),
                BindingNames::default(),
            )
            .unwrap(),
        )
    }

    fn run(profile: &Path, prompter: &mut Scripted) -> CommitOutcome {
        let doc = ProfileDocument::load(profile).unwrap();
        let patch = patcher().patch(&doc);
        let backup = Backup::create(profile).unwrap();
        commit(profile, backup, &patch, prompter).unwrap()
    }

    #[test]
    fn test_unified_diff_equal_is_empty() {
        assert!(unified_diff("a\n", "a\n", "x", "y").is_empty());
        assert!(unified_diff("a\n", "b\n", "x", "y").contains("-a\n+b"));
    }

    #[test]
    fn test_backup_names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join("profile");
        fs::write(&profile, "x\n").unwrap();

        let first = Backup::create(&profile).unwrap();
        let second = Backup::create(&profile).unwrap();
        assert_ne!(first.path(), second.path());
        assert_eq!(fs::read_to_string(second.path()).unwrap(), "x\n");
        assert!(
            first
                .path()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("profile.gosetup-")
        );
    }

    #[test]
    fn test_accepted_commit_replaces_profile() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join("profile");
        fs::write(&profile, "# site profile\n").unwrap();

        let mut prompter = scripted(true);
        let outcome = run(&profile, &mut prompter);

        assert!(matches!(outcome, CommitOutcome::Applied { .. }));
        assert_eq!(prompter.asked, 1);
        assert!(prompter.shown[0].contains("+export GOROOT=/usr/local/share/go"));
        let written = fs::read_to_string(&profile).unwrap();
        assert!(written.starts_with("# site profile\n"));
        assert!(written.ends_with("export PATH=$PATH:$GOROOT/bin:$GOPATH/bin\n"));
        assert_eq!(
            fs::read_to_string(outcome.backup().path()).unwrap(),
            "# site profile\n"
        );
    }

    #[test]
    fn test_declined_commit_leaves_profile() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join("profile");
        fs::write(&profile, "export GOROOT=/opt/old\n").unwrap();

        let outcome = run(&profile, &mut scripted(false));

        assert!(matches!(outcome, CommitOutcome::Declined { .. }));
        assert_eq!(fs::read_to_string(&profile).unwrap(), "export GOROOT=/opt/old\n");
        assert!(outcome.backup().path().exists());
        let leftovers = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_unchanged_commit_does_not_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join("profile");
        fs::write(
            &profile,
            "export GOROOT=/usr/local/share/go\n\
             export GOPATH=/usr/local/share/gopath\n\
             export PATH=$PATH:$GOROOT/bin:$GOPATH/bin\n",
        )
        .unwrap();

        let mut prompter = scripted(true);
        let outcome = run(&profile, &mut prompter);
        assert!(matches!(outcome, CommitOutcome::Unchanged { .. }));
        assert_eq!(prompter.asked, 0);
        assert!(prompter.shown.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_install_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join("profile");
        fs::write(&profile, "").unwrap();
        fs::set_permissions(&profile, fs::Permissions::from_mode(0o644)).unwrap();

        let staged = StagedProfile::write(&profile, "export A=1\n".to_string()).unwrap();
        staged.install().unwrap();

        let mode = fs::metadata(&profile).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert_eq!(fs::read_to_string(&profile).unwrap(), "export A=1\n");
    }
}
