//! Read-only report of the profile's current bindings

use super::{describe_bindings, describe_malformed};
use crate::errors::CliError;
use crate::settings::PatchSettings;
use gosetup_profile::{ProfileDocument, ProfileEnvPatcher};
use tracing::instrument;

/// Report what the profile currently exports, without changing it.
///
/// # Errors
///
/// Returns an I/O error if the profile cannot be read.
#[instrument(fields(profile = %settings.profile.display()))]
pub fn execute_status(settings: &PatchSettings) -> Result<String, CliError> {
    let span = crate::command_span!("status");
    let _guard = span.enter();

    let document = ProfileDocument::load(&settings.profile)?;
    let status = ProfileEnvPatcher::new(settings.target.clone()).inspect(&document);

    let mut output = format!("Profile: {}\n", settings.profile.display());
    output.push_str(&describe_bindings(&status, &settings.target));
    for binding in &status.bindings {
        output.push_str(&format!(
            "  line {}: {}\n",
            binding.line + 1,
            settings.target.names().name(binding.binding)
        ));
    }
    for line in &status.malformed {
        output.push_str(&format!("  line {}: {} (unparsed)\n", line.line + 1, line.name));
    }
    if let Some(note) = describe_malformed(status.malformed.len()) {
        output.push_str(&note);
    }
    Ok(output.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gosetup_profile::{BindingNames, Target};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_status_lists_bindings_and_lines() {
        let dir = TempDir::new().unwrap();
        let profile = dir.path().join("profile");
        let content = "# header\nexport GOROOT=/usr/local/share/go\nexport GOPATH=$(go env GOPATH)\n";
        fs::write(&profile, content).unwrap();
        let settings = PatchSettings {
            target: Target::new(
                Path::new("/usr/local/share/go"),
                Path::new("/usr/local/share/gopath"),
                BindingNames::default(),
            )
            .unwrap(),
            profile: profile.clone(),
            toolchain_bin: "go".into(),
        };

        let output = execute_status(&settings).unwrap();

        assert!(output.starts_with(&format!("Profile: {}", profile.display())));
        assert!(output.contains("GOROOT  /usr/local/share/go (ok)"));
        assert!(output.contains("GOPATH  not set"));
        assert!(output.contains("line 2: GOROOT"));
        assert!(output.contains("line 3: GOPATH (unparsed)"));
        assert!(output.contains("1 export line(s)"));
        assert_eq!(fs::read_to_string(&profile).unwrap(), content);
    }
}
