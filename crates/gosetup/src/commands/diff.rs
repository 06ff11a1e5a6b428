//! Read-only preview of the patch

use super::describe_malformed;
use crate::errors::CliError;
use crate::settings::PatchSettings;
use gosetup_profile::{ProfileDocument, ProfileEnvPatcher};
use tracing::instrument;

/// Show the diff `apply` would present. Writes nothing.
///
/// # Errors
///
/// Returns an I/O error if the profile cannot be read.
#[instrument(fields(profile = %settings.profile.display()))]
pub fn execute_diff(settings: &PatchSettings) -> Result<String, CliError> {
    let span = crate::command_span!("diff");
    let _guard = span.enter();

    let document = ProfileDocument::load(&settings.profile)?;
    let patch = ProfileEnvPatcher::new(settings.target.clone()).patch(&document);

    let profile = settings.profile.display().to_string();
    let mut output = if patch.is_unchanged() {
        format!("No changes needed; {profile} is already up to date.")
    } else {
        patch
            .diff(&profile, &format!("{profile} (patched)"))
            .trim_end()
            .to_string()
    };
    if let Some(note) = describe_malformed(patch.classification().malformed.len()) {
        output.push('\n');
        output.push_str(&note);
    }
    Ok(output)
}
