//! Subcommand implementations

pub mod apply;
pub mod diff;
pub mod status;
pub mod version;

use crate::cli::Commands;
use crate::errors::CliError;
use crate::settings::PatchSettings;
use gosetup_profile::{Binding, ProfileStatus, Prompter, Target};

/// A parsed and validated subcommand
#[derive(Debug, Clone)]
pub enum Command {
    /// Print version information
    Version,
    /// Interactive patch
    Apply(PatchSettings),
    /// Read-only preview
    Diff(PatchSettings),
    /// Read-only inspection
    Status(PatchSettings),
}

impl TryFrom<Commands> for Command {
    type Error = CliError;

    fn try_from(cmd: Commands) -> Result<Self, Self::Error> {
        Ok(match cmd {
            Commands::Version => Self::Version,
            Commands::Apply(args) => Self::Apply(args.try_into()?),
            Commands::Diff(args) => Self::Diff(args.try_into()?),
            Commands::Status(args) => Self::Status(args.try_into()?),
        })
    }
}

/// Run a command and return what should be printed on stdout.
///
/// # Errors
///
/// Returns the command's failure; nothing is printed in that case.
pub fn execute(command: &Command, prompter: &mut dyn Prompter) -> Result<String, CliError> {
    match command {
        Command::Version => Ok(version::get_version_info()),
        Command::Apply(settings) => apply::execute_apply(settings, prompter),
        Command::Diff(settings) => diff::execute_diff(settings),
        Command::Status(settings) => status::execute_status(settings),
    }
}

/// One line per scalar binding plus the `PATH` bin references, as seen by a
/// login shell reading the profile.
pub(crate) fn describe_bindings(status: &ProfileStatus, target: &Target) -> String {
    let names = target.names();
    let width = names.root.len().max(names.workspace.len());
    let mut out = String::new();

    for binding in [Binding::Root, Binding::Workspace] {
        let name = names.name(binding);
        let verdict = match (status.effective(binding), target.value(binding)) {
            (None, _) => "not set".to_string(),
            (Some(current), Some(wanted)) if current == wanted => format!("{current} (ok)"),
            (Some(current), wanted) => {
                format!("{current} (expected {})", wanted.unwrap_or_default())
            }
        };
        out.push_str(&format!("  {name:<width$}  {verdict}\n"));
    }

    let yes_no = |present: bool| if present { "yes" } else { "no" };
    out.push_str(&format!(
        "  PATH has ${}/bin: {}, ${}/bin: {}\n",
        names.root,
        yes_no(status.path_refs.root_bin),
        names.workspace,
        yes_no(status.path_refs.workspace_bin),
    ));
    out
}

/// Note for export lines that were left alone because they did not parse.
pub(crate) fn describe_malformed(count: usize) -> Option<String> {
    (count > 0).then(|| {
        format!("note: {count} export line(s) could not be parsed and were left unchanged")
    })
}
