//! Forward scan over a profile: recognize export lines and fix them in place.

use crate::document::ProfileDocument;
use crate::export::{ExportLine, PATH_VAR, ScalarValue};
use crate::path_list::{PathListValue, bin_reference};
use crate::plan::{PendingEdit, PlannedEdit};
use crate::target::{Binding, Target};

/// Which bindings the scan found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindingsFound {
    /// A root export line was recognized
    pub root: bool,
    /// A workspace export line was recognized
    pub workspace: bool,
    /// Index of the first recognized `PATH` export line
    pub first_path_line: Option<usize>,
}

impl BindingsFound {
    /// Whether `binding` was found.
    #[must_use]
    pub const fn contains(&self, binding: Binding) -> bool {
        match binding {
            Binding::Root => self.root,
            Binding::Workspace => self.workspace,
            Binding::Path => self.first_path_line.is_some(),
        }
    }
}

/// Whether every `PATH` export already referenced each bin directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathRefs {
    /// `<root>/bin` or `$ROOT/bin` present
    pub root_bin: bool,
    /// `<workspace>/bin` or `$WORKSPACE/bin` present
    pub workspace_bin: bool,
}

/// A recognized binding as it appeared before patching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedBinding {
    /// Which binding
    pub binding: Binding,
    /// Zero-based line index
    pub line: usize,
    /// Value as written, unquoted for scalars, raw for `PATH`
    pub value: String,
}

/// An export line for a tracked variable whose value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// Zero-based line index
    pub line: usize,
    /// Variable name on that line
    pub name: String,
}

/// Result of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Document with in-place updates applied
    pub document: ProfileDocument,
    /// Bindings found during the scan
    pub found: BindingsFound,
    /// In-place updates, in line order
    pub edits: Vec<PlannedEdit>,
    /// Every recognized binding line
    pub observed: Vec<ObservedBinding>,
    /// Bin references present before patching
    pub path_refs: PathRefs,
    /// Entries appended to `PATH` exports, without repeats
    pub appended: Vec<String>,
    /// Tracked export lines left untouched because they did not parse
    pub malformed: Vec<MalformedLine>,
}

enum LineKind<'a> {
    Scalar(Binding, ExportLine<'a>, ScalarValue),
    Path(ExportLine<'a>, PathListValue),
    Other,
}

fn recognize<'a>(
    index: usize,
    line: &'a str,
    target: &Target,
    malformed: &mut Vec<MalformedLine>,
) -> LineKind<'a> {
    let Some(export) = ExportLine::parse(line) else {
        return LineKind::Other;
    };

    let names = target.names();
    let kind = if export.name == names.root {
        ScalarValue::parse(export.value).map(|v| LineKind::Scalar(Binding::Root, export, v))
    } else if export.name == names.workspace {
        ScalarValue::parse(export.value).map(|v| LineKind::Scalar(Binding::Workspace, export, v))
    } else if export.name == PATH_VAR {
        PathListValue::parse(export.value).map(|v| LineKind::Path(export, v))
    } else {
        return LineKind::Other;
    };

    kind.unwrap_or_else(|| {
        tracing::warn!(
            line = index + 1,
            name = export.name,
            "Leaving export line with unsupported quoting unchanged"
        );
        malformed.push(MalformedLine {
            line: index,
            name: export.name.to_string(),
        });
        LineKind::Other
    })
}

fn path_line_refs(value: &PathListValue, target: &Target) -> PathRefs {
    let names = target.names();
    PathRefs {
        root_bin: value.references_bin(&names.root, target.root()),
        workspace_bin: value.references_bin(&names.workspace, target.workspace()),
    }
}

/// Scan `document` line by line.
///
/// Scalar bindings with a stale value are rewritten in place, keeping their
/// quote style when it can hold the new value. Each `PATH` export is checked
/// on its own and gets the bin references it lacks appended in variable
/// form, so a later `PATH` reset cannot drop them and no `PATH` value lists
/// a bin directory twice. Every other line is copied unchanged.
#[must_use]
pub fn classify(document: &ProfileDocument, target: &Target) -> Classification {
    let names = target.names();
    let mut malformed = Vec::new();
    let kinds: Vec<LineKind<'_>> = document
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| recognize(index, line, target, &mut malformed))
        .collect();

    let mut path_refs: Option<PathRefs> = None;
    for kind in &kinds {
        if let LineKind::Path(_, value) = kind {
            let line_refs = path_line_refs(value, target);
            let refs = path_refs.get_or_insert(line_refs);
            refs.root_bin &= line_refs.root_bin;
            refs.workspace_bin &= line_refs.workspace_bin;
        }
    }

    let mut patched = document.clone();
    let mut found = BindingsFound::default();
    let mut edits = Vec::new();
    let mut observed = Vec::new();
    let mut appended = Vec::new();

    for (index, kind) in kinds.into_iter().enumerate() {
        match kind {
            LineKind::Scalar(binding, export, value) => {
                match binding {
                    Binding::Root => found.root = true,
                    _ => found.workspace = true,
                }
                observed.push(ObservedBinding {
                    binding,
                    line: index,
                    value: value.text.clone(),
                });

                let Some(desired) = target.value(binding) else {
                    continue;
                };
                if value.text != desired {
                    let text = export.with_value(&value.replaced(desired));
                    tracing::debug!(line = index + 1, %binding, from = %value.text, to = desired, "Updating export");
                    patched.replace(index, text.clone());
                    edits.push(PlannedEdit {
                        binding,
                        edit: PendingEdit::UpdateInPlace { line: index },
                        text,
                        previous: Some(value.text),
                    });
                }
            }
            LineKind::Path(export, mut value) => {
                observed.push(ObservedBinding {
                    binding: Binding::Path,
                    line: index,
                    value: export.value.to_string(),
                });
                found.first_path_line.get_or_insert(index);

                let refs = path_line_refs(&value, target);
                let missing: Vec<String> = [
                    (refs.root_bin, &names.root),
                    (refs.workspace_bin, &names.workspace),
                ]
                .into_iter()
                .filter(|(present, _)| !present)
                .map(|(_, var)| bin_reference(var))
                .collect();
                if missing.is_empty() {
                    continue;
                }

                for entry in &missing {
                    value.push(entry.clone());
                    if !appended.contains(entry) {
                        appended.push(entry.clone());
                    }
                }
                let text = export.with_value(&value.render());
                tracing::debug!(line = index + 1, appended = ?missing, "Extending PATH export");
                patched.replace(index, text.clone());
                edits.push(PlannedEdit {
                    binding: Binding::Path,
                    edit: PendingEdit::UpdateInPlace { line: index },
                    text,
                    previous: Some(export.value.to_string()),
                });
            }
            LineKind::Other => {}
        }
    }

    Classification {
        document: patched,
        found,
        edits,
        observed,
        path_refs: path_refs.unwrap_or_default(),
        appended,
        malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::BindingNames;
    use std::path::Path;

    fn target() -> Target {
        Target::new(
            Path::new("/usr/local/share/go"),
            Path::new("/usr/local/share/gopath"),
            BindingNames::default(),
        )
        .unwrap()
    }

    fn run(content: &str) -> Classification {
        classify(&ProfileDocument::parse(content), &target())
    }

    #[test]
    fn test_empty_document_finds_nothing() {
        let result = run("");
        assert_eq!(result.found, BindingsFound::default());
        assert!(result.edits.is_empty());
        assert!(result.document.is_empty());
    }

    #[test]
    fn test_stale_root_rewritten_in_place() {
        let result = run("# go\n  export GOROOT=\"/opt/old/go\"  \nexport GOPATH=/usr/local/share/gopath\n");
        assert!(result.found.root);
        assert!(result.found.workspace);
        assert_eq!(
            result.document.lines()[1],
            "  export GOROOT=\"/usr/local/share/go\"  "
        );
        assert_eq!(result.edits.len(), 1);
        assert_eq!(result.edits[0].previous.as_deref(), Some("/opt/old/go"));
        assert_eq!(result.edits[0].edit, PendingEdit::UpdateInPlace { line: 1 });
    }

    #[test]
    fn test_correct_scalar_left_alone() {
        let content = "export GOROOT='/usr/local/share/go'\n";
        let result = run(content);
        assert!(result.edits.is_empty());
        assert_eq!(result.document.render(), content);
    }

    #[test]
    fn test_path_extended_with_missing_references() {
        let result = run("export PATH=\"$PATH:/usr/local/bin\"\n");
        assert_eq!(result.found.first_path_line, Some(0));
        assert_eq!(
            result.document.lines()[0],
            "export PATH=\"$PATH:/usr/local/bin:$GOROOT/bin:$GOPATH/bin\""
        );
        assert_eq!(result.appended, ["$GOROOT/bin", "$GOPATH/bin"]);
    }

    #[test]
    fn test_literal_reference_counts_as_present() {
        let result = run("export PATH=$PATH:/usr/local/share/go/bin\n");
        assert!(result.path_refs.root_bin);
        assert!(!result.path_refs.workspace_bin);
        assert_eq!(
            result.document.lines()[0],
            "export PATH=$PATH:/usr/local/share/go/bin:$GOPATH/bin"
        );
    }

    #[test]
    fn test_empty_path_value_gets_no_leading_colon() {
        let result = run("export PATH=\n");
        assert_eq!(result.document.lines()[0], "export PATH=$GOROOT/bin:$GOPATH/bin");
    }

    #[test]
    fn test_each_path_line_is_checked_on_its_own() {
        let content = "export PATH=/usr/bin\nexport PATH=$PATH:$GOROOT/bin\n";
        let result = run(content);
        assert_eq!(result.found.first_path_line, Some(0));
        assert_eq!(
            result.document.lines()[0],
            "export PATH=/usr/bin:$GOROOT/bin:$GOPATH/bin"
        );
        assert_eq!(
            result.document.lines()[1],
            "export PATH=$PATH:$GOROOT/bin:$GOPATH/bin"
        );
        assert_eq!(result.appended, ["$GOROOT/bin", "$GOPATH/bin"]);
        assert_eq!(result.edits.len(), 2);
        assert_eq!(result.observed.len(), 2);
    }

    #[test]
    fn test_later_path_reset_is_extended() {
        let content = "export PATH=/usr/bin:$GOROOT/bin:$GOPATH/bin\nexport PATH=/opt/bin\n";
        let result = run(content);
        assert_eq!(result.document.lines()[0], "export PATH=/usr/bin:$GOROOT/bin:$GOPATH/bin");
        assert_eq!(result.document.lines()[1], "export PATH=/opt/bin:$GOROOT/bin:$GOPATH/bin");
        assert_eq!(result.path_refs, PathRefs::default());
    }

    #[test]
    fn test_stale_value_needing_quotes_is_requoted() {
        let target = Target::new(
            Path::new("/opt/my go"),
            Path::new("/opt/it's"),
            BindingNames::default(),
        )
        .unwrap();
        let document = ProfileDocument::parse("export GOROOT=/opt/old\nexport GOPATH='/opt/old'\n");

        let first = classify(&document, &target);
        assert_eq!(first.document.lines()[0], "export GOROOT='/opt/my go'");
        assert_eq!(first.document.lines()[1], "export GOPATH=\"/opt/it's\"");

        let second = classify(&first.document, &target);
        assert!(second.malformed.is_empty());
        assert!(second.edits.is_empty());
    }

    #[test]
    fn test_malformed_lines_pass_through() {
        let content = "export PATH=\"$PATH\":/x\nexport GOROOT=$(go env GOROOT)\n";
        let result = run(content);
        assert_eq!(result.found, BindingsFound::default());
        assert_eq!(result.document.render(), content);
        assert_eq!(result.malformed.len(), 2);
        assert_eq!(result.malformed[1].name, "GOROOT");
    }

    #[test]
    fn test_unrelated_exports_untouched() {
        let content = "export GOROOT_FINAL=/x\nexport EDITOR=vim\n";
        let result = run(content);
        assert_eq!(result.document.render(), content);
        assert!(result.observed.is_empty());
    }

    #[test]
    fn test_every_stale_scalar_line_is_updated() {
        let result = run("export GOPATH=/a\nexport GOPATH=/b\n");
        assert_eq!(result.edits.len(), 2);
        assert!(
            result
                .document
                .lines()
                .iter()
                .all(|l| l == "export GOPATH=/usr/local/share/gopath")
        );
    }
}
