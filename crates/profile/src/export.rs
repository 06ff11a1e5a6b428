//! Recognition of `export NAME=VALUE` lines and their shell quoting.
//!
//! Only a conservative subset of shell syntax is understood. A value is
//! accepted when it is a bare word, or a single word wrapped in one pair of
//! matching quotes. Anything else (escaped or mixed quotes, command
//! substitution, unquoted whitespace, shell operators) makes the line
//! malformed, and malformed lines are never rewritten.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)] // literal pattern
static EXPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*export\s+)([A-Za-z_][A-Za-z0-9_]*)=(.*)$").expect("valid export pattern")
});

/// Name of the list-valued search path binding.
pub const PATH_VAR: &str = "PATH";

/// A line of the form `export NAME=VALUE`, split into its parts.
///
/// `prefix` holds the leading whitespace and the `export` keyword,
/// `trailer` the trailing whitespace (including a CRLF `\r`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportLine<'a> {
    /// Leading whitespace plus `export` and the separator after it
    pub prefix: &'a str,
    /// Variable name
    pub name: &'a str,
    /// Raw value text, quotes included
    pub value: &'a str,
    /// Trailing whitespace
    pub trailer: &'a str,
}

impl<'a> ExportLine<'a> {
    /// Match a profile line against the export pattern.
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = EXPORT_LINE.captures(line)?;
        let prefix = caps.get(1)?.as_str();
        let name = caps.get(2)?.as_str();
        let rest = caps.get(3)?.as_str();
        let value = rest.trim_end();
        Some(Self {
            prefix,
            name,
            value,
            trailer: &rest[value.len()..],
        })
    }

    /// Rebuild the line with a different raw value.
    #[must_use]
    pub fn with_value(&self, value: &str) -> String {
        format!("{}{}={}{}", self.prefix, self.name, value, self.trailer)
    }
}

/// Quote character wrapping a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// `'...'`
    Single,
    /// `"..."`
    Double,
}

impl Quote {
    /// The quote character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            _ => None,
        }
    }
}

/// Wrap `inner` in the given quote, if any.
#[must_use]
pub fn quoted(quote: Option<Quote>, inner: &str) -> String {
    match quote {
        Some(q) => format!("{0}{1}{0}", q.as_char(), inner),
        None => inner.to_string(),
    }
}

/// Split a raw value into its quote style and the text between the quotes.
///
/// Returns `None` for anything outside the supported subset.
#[must_use]
pub fn split_quotes(raw: &str) -> Option<(Option<Quote>, &str)> {
    let Some(first) = raw.chars().next() else {
        return Some((None, raw));
    };

    match Quote::from_char(first) {
        Some(quote) => {
            let q = quote.as_char();
            let inner = raw.strip_prefix(q)?.strip_suffix(q)?;
            if inner.contains(q) {
                return None;
            }
            if quote == Quote::Double && has_expansion_hazard(inner) {
                return None;
            }
            Some((Some(quote), inner))
        }
        None => {
            let bare_ok = !raw.chars().any(|c| {
                c.is_whitespace() || matches!(c, '\'' | '"' | ';' | '&' | '|' | '<' | '>' | '(' | ')')
            });
            (bare_ok && !has_expansion_hazard(raw)).then_some((None, raw))
        }
    }
}

/// Escapes and command substitution cannot be reasoned about statically.
fn has_expansion_hazard(text: &str) -> bool {
    text.contains('\\') || text.contains('`') || text.contains("$(")
}

/// A scalar export value: one word, optionally quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarValue {
    /// Quote style of the original value
    pub quote: Option<Quote>,
    /// Unquoted text
    pub text: String,
}

impl ScalarValue {
    /// Parse a raw scalar value.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (quote, inner) = split_quotes(raw)?;
        Some(Self {
            quote,
            text: inner.to_string(),
        })
    }

    /// Same quote style, different text.
    ///
    /// Falls back to [`shell_word`] when the old style cannot hold `text`
    /// as a single word that parses back unchanged.
    #[must_use]
    pub fn replaced(&self, text: &str) -> String {
        let kept = quoted(self.quote, text);
        match split_quotes(&kept) {
            Some((_, inner)) if inner == text => kept,
            _ => shell_word(text),
        }
    }
}

/// Render a value for a freshly synthesized `export` line.
///
/// Plain paths stay bare; anything needing protection is quoted.
#[must_use]
pub fn shell_word(value: &str) -> String {
    let bare = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:,@%=~".contains(c));
    if bare {
        value.to_string()
    } else if !value.contains('\'') {
        quoted(Some(Quote::Single), value)
    } else {
        quoted(Some(Quote::Double), value)
    }
}

/// Whether `name` is a valid shell variable identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
