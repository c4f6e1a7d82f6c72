//! Whitespace handling for form input.
//!
//! Unicode `White_Space` plus U+FEFF (zero width no-break space), which
//! browsers treat as whitespace and which often arrives as a stray BOM in
//! pasted text.

const ZERO_WIDTH_NO_BREAK_SPACE: char = '\u{FEFF}';

/// Returns `true` if `c` counts as whitespace in form input.
#[must_use]
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || c == ZERO_WIDTH_NO_BREAK_SPACE
}

/// Trim leading and trailing whitespace as defined by [`is_space`].
#[must_use]
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_space)
}
