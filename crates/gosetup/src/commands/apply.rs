//! The interactive `apply` flow.

use super::{describe_bindings, describe_malformed};
use crate::errors::CliError;
use crate::install::{ensure_workspace, verify_installation};
use crate::settings::PatchSettings;
use gosetup_profile::{
    Backup, CommitOutcome, ProfileDocument, ProfileEnvPatcher, Prompter, commit,
};
use tracing::instrument;

/// Verify the installation, patch the profile after confirmation and return
/// the final report.
///
/// # Errors
///
/// Fails before touching the profile if the installation is incomplete or
/// the workspace cannot be created; any profile I/O failure is fatal and
/// leaves the profile as it was.
#[instrument(skip(prompter), fields(profile = %settings.profile.display()))]
pub fn execute_apply(
    settings: &PatchSettings,
    prompter: &mut dyn Prompter,
) -> Result<String, CliError> {
    let span = crate::command_span!("apply");
    let _guard = span.enter();

    verify_installation(settings.root(), &settings.toolchain_bin)?;
    let created = ensure_workspace(settings.workspace())?;

    let document = ProfileDocument::load(&settings.profile)?;
    let patcher = ProfileEnvPatcher::new(settings.target.clone());
    let patch = patcher.patch(&document);
    let backup = Backup::create(&settings.profile)?;

    let mut report: Vec<String> = created
        .iter()
        .map(|dir| format!("Created {}", dir.display()))
        .collect();

    let profile = settings.profile.display();
    let effective_document = match commit(&settings.profile, backup, &patch, prompter)? {
        CommitOutcome::Unchanged { backup } => {
            backup.remove()?;
            report.push(format!("No changes needed; {profile} is already up to date."));
            patch.original()
        }
        CommitOutcome::Applied { summary, backup } => {
            prompter.present(&format!("Updated {profile}:\n{summary}"))?;
            let question = format!("Remove backup {}?", backup.path().display());
            if prompter.confirm_action(&question, false)? {
                backup.remove()?;
                report.push("Backup removed.".to_string());
            } else {
                report.push(format!("Backup kept at {}", backup.path().display()));
            }
            report.push(format!(
                "Run 'source {profile}' or log in again to pick up the changes."
            ));
            patch.patched()
        }
        CommitOutcome::Declined { backup } => {
            report.push(format!(
                "No changes made to {profile}. Backup kept at {}",
                backup.path().display()
            ));
            patch.original()
        }
    };

    let status = patcher.inspect(effective_document);
    report.push(format!(
        "Effective values:\n{}",
        describe_bindings(&status, &settings.target).trim_end()
    ));
    if let Some(note) = describe_malformed(patch.classification().malformed.len()) {
        report.push(note);
    }

    Ok(report.join("\n"))
}
