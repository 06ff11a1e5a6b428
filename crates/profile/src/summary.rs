//! Human-readable summary of what a patch changes.

use crate::target::Binding;
use std::fmt;

/// What happened to one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    /// A new export line was added
    Added {
        /// Full text of the new line
        line: String,
    },
    /// An existing scalar export got a new value
    Updated {
        /// Previous value
        from: String,
        /// New value
        to: String,
    },
    /// The `PATH` export got new entries
    Extended {
        /// Appended entries
        entries: Vec<String>,
    },
    /// Already correct
    Unchanged,
}

/// Change record for one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingChange {
    /// Which binding
    pub binding: Binding,
    /// Variable name
    pub name: String,
    /// What happened
    pub kind: ChangeKind,
}

/// Per-binding summary of a patch, in root, workspace, path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    /// One entry per binding
    pub changes: Vec<BindingChange>,
}

impl ChangeSummary {
    /// Whether any binding changed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.changes
            .iter()
            .any(|c| c.kind != ChangeKind::Unchanged)
    }

    /// Change record for a binding.
    #[must_use]
    pub fn get(&self, binding: Binding) -> Option<&BindingChange> {
        self.changes.iter().find(|c| c.binding == binding)
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for change in &self.changes {
            match &change.kind {
                ChangeKind::Added { line } => writeln!(f, "  new      {}: {line}", change.name)?,
                ChangeKind::Updated { from, to } => {
                    writeln!(f, "  updated  {}: {from} -> {to}", change.name)?;
                }
                ChangeKind::Extended { entries } => {
                    writeln!(f, "  updated  {}: appended {}", change.name, entries.join(", "))?;
                }
                ChangeKind::Unchanged => writeln!(f, "  ok       {}", change.name)?,
            }
        }
        Ok(())
    }
}
