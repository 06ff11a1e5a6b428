//! The profile patcher: classification and insertion planning composed into
//! a single pure transformation.

use crate::classify::{Classification, MalformedLine, ObservedBinding, PathRefs, classify};
use crate::commit::unified_diff;
use crate::document::ProfileDocument;
use crate::plan::{PendingEdit, PlannedEdit, apply_insertions, plan_insertions};
use crate::summary::{BindingChange, ChangeKind, ChangeSummary};
use crate::target::{Binding, Target};

/// Patches a profile so it exports the target's bindings.
#[derive(Debug, Clone)]
pub struct ProfileEnvPatcher {
    target: Target,
}

impl ProfileEnvPatcher {
    /// Create a patcher for `target`.
    #[must_use]
    pub const fn new(target: Target) -> Self {
        Self { target }
    }

    /// The desired values.
    #[must_use]
    pub const fn target(&self) -> &Target {
        &self.target
    }

    /// Compute the patched document. Performs no I/O.
    #[must_use]
    pub fn patch(&self, document: &ProfileDocument) -> Patch {
        let classification = classify(document, &self.target);
        let insertions = plan_insertions(&classification.found, &self.target);
        let mut patched = classification.document.clone();
        apply_insertions(&mut patched, &insertions);

        tracing::debug!(
            updates = classification.edits.len(),
            insertions = insertions.len(),
            malformed = classification.malformed.len(),
            "Computed profile patch"
        );

        Patch {
            original: document.clone(),
            patched,
            classification,
            insertions,
            target: self.target.clone(),
        }
    }

    /// Report the bindings currently present in `document`.
    #[must_use]
    pub fn inspect(&self, document: &ProfileDocument) -> ProfileStatus {
        let classification = classify(document, &self.target);
        ProfileStatus {
            bindings: classification.observed,
            path_refs: classification.path_refs,
            malformed: classification.malformed,
        }
    }
}

/// Outcome of [`ProfileEnvPatcher::patch`].
#[derive(Debug, Clone)]
pub struct Patch {
    original: ProfileDocument,
    patched: ProfileDocument,
    classification: Classification,
    insertions: Vec<PlannedEdit>,
    target: Target,
}

impl Patch {
    /// The document as it was read.
    #[must_use]
    pub const fn original(&self) -> &ProfileDocument {
        &self.original
    }

    /// The document after patching.
    #[must_use]
    pub const fn patched(&self) -> &ProfileDocument {
        &self.patched
    }

    /// Scan results.
    #[must_use]
    pub const fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Lines synthesized for missing bindings.
    #[must_use]
    pub fn insertions(&self) -> &[PlannedEdit] {
        &self.insertions
    }

    /// Whether patching leaves the content byte-identical.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.original.render() == self.patched.render()
    }

    /// Unified diff from the original to the patched content.
    #[must_use]
    pub fn diff(&self, from_label: &str, to_label: &str) -> String {
        unified_diff(
            &self.original.render(),
            &self.patched.render(),
            from_label,
            to_label,
        )
    }

    /// Per-binding change summary.
    #[must_use]
    pub fn summary(&self) -> ChangeSummary {
        let names = self.target.names();
        let changes = Binding::ALL
            .into_iter()
            .map(|binding| BindingChange {
                binding,
                name: names.name(binding).to_string(),
                kind: self.change_kind(binding),
            })
            .collect();
        ChangeSummary { changes }
    }

    fn change_kind(&self, binding: Binding) -> ChangeKind {
        if let Some(inserted) = self.insertions.iter().find(|p| p.binding == binding) {
            return ChangeKind::Added {
                line: inserted.text.clone(),
            };
        }

        let updated = self.classification.edits.iter().find(|p| {
            p.binding == binding && matches!(p.edit, PendingEdit::UpdateInPlace { .. })
        });
        match (updated, self.target.value(binding)) {
            (None, _) => ChangeKind::Unchanged,
            (Some(_), None) => ChangeKind::Extended {
                entries: self.classification.appended.clone(),
            },
            (Some(edit), Some(desired)) => ChangeKind::Updated {
                from: edit.previous.clone().unwrap_or_default(),
                to: desired.to_string(),
            },
        }
    }
}

/// Read-only view of a profile's bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStatus {
    /// Recognized binding lines in document order
    pub bindings: Vec<ObservedBinding>,
    /// Bin references present in the `PATH` exports
    pub path_refs: PathRefs,
    /// Tracked export lines that could not be parsed
    pub malformed: Vec<MalformedLine>,
}

impl ProfileStatus {
    /// Last recognized value of a binding, which is the one a login shell
    /// ends up with.
    #[must_use]
    pub fn effective(&self, binding: Binding) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.binding == binding)
            .map(|b| b.value.as_str())
    }
}
