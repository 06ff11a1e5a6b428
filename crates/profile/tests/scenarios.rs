//! End-to-end patching scenarios against real files

// Integration tests can use unwrap/expect for cleaner assertions
#![allow(clippy::unwrap_used, clippy::expect_used)]

use gosetup_profile::{
    Backup, BindingNames, ChangeKind, CommitOutcome, ProfileDocument, ProfileEnvPatcher, Prompter,
    Result, Target, commit,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ROOT: &str = "/usr/local/share/go";
const WORKSPACE: &str = "/usr/local/share/gopath";

struct Answer(bool);

impl Prompter for Answer {
    fn present(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn confirm_action(&mut self, _message: &str, _default_yes: bool) -> Result<bool> {
        Ok(self.0)
    }
}

fn patcher() -> ProfileEnvPatcher {
    let target = Target::new(
        Path::new(ROOT),
        Path::new(WORKSPACE),
        BindingNames::new("ROOT_VAR", "PATH_BASE_VAR"),
    )
    .expect("valid target");
    ProfileEnvPatcher::new(target)
}

fn profile_with(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::Builder::new()
        .prefix("gosetup_test_")
        .tempdir()
        .expect("Failed to create temp directory");
    let profile = dir.path().join("profile");
    fs::write(&profile, content).unwrap();
    (dir, profile)
}

fn run(profile: &Path, accept: bool) -> CommitOutcome {
    let document = ProfileDocument::load(profile).unwrap();
    let patch = patcher().patch(&document);
    let backup = Backup::create(profile).unwrap();
    commit(profile, backup, &patch, &mut Answer(accept)).unwrap()
}

#[test]
fn test_empty_profile_gets_three_lines() {
    let (_dir, profile) = profile_with("");

    let outcome = run(&profile, true);

    assert!(matches!(outcome, CommitOutcome::Applied { .. }));
    assert_eq!(
        fs::read_to_string(&profile).unwrap(),
        "export ROOT_VAR=/usr/local/share/go\n\
         export PATH_BASE_VAR=/usr/local/share/gopath\n\
         export PATH=$PATH:$ROOT_VAR/bin:$PATH_BASE_VAR/bin\n"
    );
}

#[test]
fn test_stale_version_is_updated() {
    let (_dir, profile) =
        profile_with("# toolchain\nexport ROOT_VAR=/opt/old/go\nexport PATH=$PATH:$ROOT_VAR/bin\n");

    let outcome = run(&profile, true);

    let CommitOutcome::Applied { summary, .. } = outcome else {
        panic!("expected the change to be applied");
    };
    let written = fs::read_to_string(&profile).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "# toolchain");
    assert_eq!(lines[1], "export ROOT_VAR=/usr/local/share/go");
    assert_eq!(lines[2], "export PATH_BASE_VAR=/usr/local/share/gopath");
    assert_eq!(lines[3], "export PATH=$PATH:$ROOT_VAR/bin:$PATH_BASE_VAR/bin");
    assert_eq!(lines.len(), 4);

    let root = summary.get(gosetup_profile::Binding::Root).unwrap();
    assert_eq!(
        root.kind,
        ChangeKind::Updated {
            from: "/opt/old/go".into(),
            to: ROOT.into()
        }
    );
}

#[test]
fn test_already_correct_profile_is_untouched() {
    let content = "# managed\n\
                   export ROOT_VAR=/usr/local/share/go\n\
                   export PATH_BASE_VAR=/usr/local/share/gopath\n\
                   export PATH=$PATH:/usr/local/share/go/bin:/usr/local/share/gopath/bin\n";
    let (_dir, profile) = profile_with(content);

    let outcome = run(&profile, true);

    assert!(matches!(outcome, CommitOutcome::Unchanged { .. }));
    assert_eq!(fs::read(&profile).unwrap(), content.as_bytes());
}

#[test]
fn test_declined_change_keeps_profile_and_backup() {
    let content = "export ROOT_VAR=/opt/old/go\n";
    let (_dir, profile) = profile_with(content);

    let outcome = run(&profile, false);

    let CommitOutcome::Declined { backup } = outcome else {
        panic!("expected the change to be declined");
    };
    assert_eq!(fs::read(&profile).unwrap(), content.as_bytes());
    assert!(backup.path().exists());
    assert_eq!(fs::read_to_string(backup.path()).unwrap(), content);
}

#[test]
fn test_second_run_needs_no_changes() {
    let (_dir, profile) = profile_with(
        "if [ -d /etc/profile.d ]; then\n  for i in /etc/profile.d/*.sh; do . $i; done\nfi\n\
         export PATH=\"/usr/bin:/bin\"\n",
    );

    assert!(matches!(run(&profile, true), CommitOutcome::Applied { .. }));
    let after_first = fs::read_to_string(&profile).unwrap();
    assert!(after_first.contains("export PATH=\"/usr/bin:/bin:$ROOT_VAR/bin:$PATH_BASE_VAR/bin\""));

    assert!(matches!(run(&profile, true), CommitOutcome::Unchanged { .. }));
    assert_eq!(fs::read_to_string(&profile).unwrap(), after_first);
}

#[test]
fn test_unreadable_profile_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let err = ProfileDocument::load(&missing).unwrap_err();

    assert!(err.to_string().contains("read profile"));
    assert_eq!(err.path(), Some(missing.as_path()));
}
