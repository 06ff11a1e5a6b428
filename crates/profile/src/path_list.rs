//! The colon-separated value of a `PATH` export.

use crate::export::{Quote, quoted, split_quotes};

/// Parsed `PATH` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathListValue {
    quote: Option<Quote>,
    entries: Vec<String>,
}

impl PathListValue {
    /// Parse a raw `PATH` value; `None` if its quoting is unsupported.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (quote, inner) = split_quotes(raw)?;
        let entries = if inner.is_empty() {
            Vec::new()
        } else {
            inner.split(':').map(str::to_string).collect()
        };
        Some(Self { quote, entries })
    }

    /// The entries in order, empty segments included.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Quote wrapping the original value.
    #[must_use]
    pub const fn quote(&self) -> Option<Quote> {
        self.quote
    }

    /// Whether any entry refers to `<dir>/bin`, either literally or as
    /// `$var/bin` / `${var}/bin`.
    #[must_use]
    pub fn references_bin(&self, var: &str, dir: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry_refers_to_bin(entry, var, dir))
    }

    /// Number of entries referring to `<dir>/bin`.
    #[must_use]
    pub fn count_bin_references(&self, var: &str, dir: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry_refers_to_bin(entry, var, dir))
            .count()
    }

    /// Append an entry at the end of the list.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Render back to a raw value with the original quoting.
    #[must_use]
    pub fn render(&self) -> String {
        quoted(self.quote, &self.entries.join(":"))
    }
}

/// Variable form of a bin directory entry, e.g. `$GOROOT/bin`.
#[must_use]
pub fn bin_reference(var: &str) -> String {
    format!("${var}/bin")
}

fn entry_refers_to_bin(entry: &str, var: &str, dir: &str) -> bool {
    let entry = entry.trim_end_matches('/');
    if entry == format!("${var}/bin") || entry == format!("${{{var}}}/bin") {
        return true;
    }

    let dir = dir.trim_end_matches('/');
    !dir.is_empty() && entry == format!("{dir}/bin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_list() {
        let value = PathListValue::parse("$PATH:/usr/local/bin").unwrap();
        assert_eq!(value.entries(), ["$PATH", "/usr/local/bin"]);
        assert_eq!(value.quote(), None);
        assert_eq!(value.render(), "$PATH:/usr/local/bin");
    }

    #[test]
    fn test_parse_keeps_empty_segments() {
        let value = PathListValue::parse("/a::/b").unwrap();
        assert_eq!(value.entries(), ["/a", "", "/b"]);
        assert_eq!(value.render(), "/a::/b");
    }

    #[test]
    fn test_references_variable_forms() {
        let value = PathListValue::parse("$PATH:$GOROOT/bin:${GOPATH}/bin/").unwrap();
        assert!(value.references_bin("GOROOT", "/usr/local/share/go"));
        assert!(value.references_bin("GOPATH", "/usr/local/share/gopath"));
        assert!(!value.references_bin("GOBIN", "/opt/gobin"));
    }

    #[test]
    fn test_references_literal_form() {
        let value = PathListValue::parse("\"$PATH:/usr/local/share/go/bin\"").unwrap();
        assert!(value.references_bin("GOROOT", "/usr/local/share/go"));
        assert!(value.references_bin("GOROOT", "/usr/local/share/go/"));
        assert!(!value.references_bin("GOROOT", "/usr/local/share/go2"));
    }

    #[test]
    fn test_variable_name_must_match_exactly() {
        let value = PathListValue::parse("$GOROOT_OLD/bin").unwrap();
        assert!(!value.references_bin("GOROOT", "/x"));
    }

    #[test]
    fn test_push_into_empty_value_has_no_leading_colon() {
        let mut value = PathListValue::parse("").unwrap();
        value.push(bin_reference("GOROOT"));
        value.push(bin_reference("GOPATH"));
        assert_eq!(value.render(), "$GOROOT/bin:$GOPATH/bin");
    }

    #[test]
    fn test_push_inside_quotes() {
        let mut value = PathListValue::parse("'$PATH:/opt/bin'").unwrap();
        value.push(bin_reference("GOPATH"));
        assert_eq!(value.render(), "'$PATH:/opt/bin:$GOPATH/bin'");
    }

    #[test]
    fn test_unsupported_quoting_is_rejected() {
        assert!(PathListValue::parse("\"$PATH\":/x").is_none());
        assert!(PathListValue::parse("$(getconf PATH)").is_none());
        assert!(PathListValue::parse("\"$PATH:\\\"x\\\"\"").is_none());
    }

    #[test]
    fn test_count_bin_references() {
        let value = PathListValue::parse("$GOROOT/bin:/usr/local/go/bin").unwrap();
        assert_eq!(value.count_bin_references("GOROOT", "/usr/local/go"), 2);
    }
}
