//! In-memory representation of a shell profile file.

use crate::{Error, Result};
use std::path::Path;
use tracing::instrument;

/// An ordered sequence of lines read from a profile file.
///
/// Lines are split on `\n` only, so a `\r` from CRLF files stays part of the
/// line and is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileDocument {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl ProfileDocument {
    /// Build a document from raw file content.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        if content.is_empty() {
            return Self::default();
        }

        let trailing_newline = content.ends_with('\n');
        let body = content.strip_suffix('\n').unwrap_or(content);
        Self {
            lines: body.split('\n').map(str::to_string).collect(),
            trailing_newline,
        }
    }

    /// Build a document from already split lines.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        let trailing_newline = !lines.is_empty();
        Self {
            lines,
            trailing_newline,
        }
    }

    /// Read and parse the profile at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error naming the path if the file cannot be read or is
    /// not valid UTF-8.
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(e, Some(path.to_path_buf()), "read profile"))?;
        tracing::debug!(bytes = content.len(), "Loaded profile");
        Ok(Self::parse(&content))
    }

    /// The lines of the document, without line terminators.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Replace the line at `index`.
    pub(crate) fn replace(&mut self, index: usize, line: String) {
        self.lines[index] = line;
    }

    /// Insert a line before `index`.
    pub(crate) fn insert(&mut self, index: usize, line: String) {
        if self.lines.is_empty() {
            self.trailing_newline = true;
        }
        self.lines.insert(index, line);
    }

    /// Append a line at the end.
    pub(crate) fn push(&mut self, line: String) {
        if self.lines.is_empty() {
            self.trailing_newline = true;
        }
        self.lines.push(line);
    }

    /// Render the document back to file content.
    #[must_use]
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }

        let mut out = self.lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}
