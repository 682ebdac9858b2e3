//! Style values - computed style strings and numeric parsing.
//!
//! Styles are carried as exact strings ("16px", "normal",
//! "font-size 200ms ease-in-out"). The engine restores the exact captured
//! string, never a recomputed value, so byte-identical round-trips matter
//! more than a structured representation.

// =============================================================================
// Computed Style
// =============================================================================

/// The style triple the magnifier reads and writes on an element.
///
/// Values are kept as strings with the same shape a computed-style query
/// would return: lengths as "<number>px", line-height possibly the
/// keyword "normal", transition as a full shorthand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    pub font_size: String,
    pub line_height: String,
    pub transition: String,
}

impl ComputedStyle {
    /// Create a style from its three raw values.
    pub fn new(
        font_size: impl Into<String>,
        line_height: impl Into<String>,
        transition: impl Into<String>,
    ) -> Self {
        Self {
            font_size: font_size.into(),
            line_height: line_height.into(),
            transition: transition.into(),
        }
    }
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self::new("16px", "normal", "all 0s ease 0s")
    }
}

// =============================================================================
// Numeric Parsing
// =============================================================================

/// Parse the leading float of a style value, ignoring any trailing unit.
///
/// Mirrors `parseFloat` semantics: "16px" -> 16.0, "24.5px" -> 24.5,
/// "-3em" -> -3.0. Returns `None` when the value does not start with a
/// number (keywords like "normal").
pub fn parse_leading_f32(value: &str) -> Option<f32> {
    let trimmed = value.trim_start();
    let mut end = 0;
    let bytes = trimmed.as_bytes();
    if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
        end += 1;
    }
    let digits_start = end;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if end == digits_start {
        return None;
    }
    trimmed[..end].parse().ok()
}

/// Format a pixel length the way a template literal would: no trailing
/// zeros, no exponent ("32px", "24.75px").
pub fn format_px(value: f32) -> String {
    format!("{value}px")
}

// =============================================================================
// Tests
// =============================================================================
