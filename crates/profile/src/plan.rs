//! Planning of insertions for bindings the scan did not find.

use crate::classify::BindingsFound;
use crate::document::ProfileDocument;
use crate::export::{PATH_VAR, shell_word};
use crate::path_list::bin_reference;
use crate::target::{Binding, Target};

/// How a binding's line gets into the final document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingEdit {
    /// An existing line was rewritten in place
    UpdateInPlace {
        /// Zero-based index of the rewritten line
        line: usize,
    },
    /// A new line goes immediately before the first `PATH` export
    InsertBeforePath {
        /// Zero-based index of the first `PATH` export in the scanned document
        line: usize,
    },
    /// A new line goes at the end of the document
    AppendAtEnd,
}

/// One edit together with the line text it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEdit {
    /// Binding the edit belongs to
    pub binding: Binding,
    /// Where the edit lands
    pub edit: PendingEdit,
    /// Full text of the resulting line
    pub text: String,
    /// Raw value before an in-place update
    pub previous: Option<String>,
}

/// Default `export` line for a binding.
#[must_use]
pub fn default_line(binding: Binding, target: &Target) -> String {
    let names = target.names();
    match binding {
        Binding::Root => format!("export {}={}", names.root, shell_word(target.root())),
        Binding::Workspace => format!(
            "export {}={}",
            names.workspace,
            shell_word(target.workspace())
        ),
        Binding::Path => format!(
            "export {PATH_VAR}=${PATH_VAR}:{}:{}",
            bin_reference(&names.root),
            bin_reference(&names.workspace)
        ),
    }
}

/// Synthesize lines for every binding missing from the scanned document.
///
/// With a `PATH` export present, the missing scalars are placed right before
/// its first occurrence so they are defined before use. Otherwise every
/// missing line is appended, in root, workspace, path order.
#[must_use]
pub fn plan_insertions(found: &BindingsFound, target: &Target) -> Vec<PlannedEdit> {
    let missing = Binding::ALL
        .into_iter()
        .filter(|binding| !found.contains(*binding));

    let edit = match found.first_path_line {
        Some(line) => PendingEdit::InsertBeforePath { line },
        None => PendingEdit::AppendAtEnd,
    };

    missing
        .map(|binding| PlannedEdit {
            binding,
            edit,
            text: default_line(binding, target),
            previous: None,
        })
        .collect()
}

/// Apply planned insertions to an already classified document.
///
/// In-place updates are applied during classification and skipped here.
pub fn apply_insertions(document: &mut ProfileDocument, insertions: &[PlannedEdit]) {
    let mut shift = 0;
    for planned in insertions {
        match planned.edit {
            PendingEdit::InsertBeforePath { line } => {
                document.insert(line + shift, planned.text.clone());
                shift += 1;
            }
            PendingEdit::AppendAtEnd => document.push(planned.text.clone()),
            PendingEdit::UpdateInPlace { .. } => {}
        }
    }
}
