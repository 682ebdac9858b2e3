//! Element resolution - from a gaze point to a readable element.
//!
//! Hit-test the topmost element under the point, then walk up the
//! ancestor chain (self first, at most [`MAX_ANCESTOR_DEPTH`] levels)
//! until an element qualifies as text-bearing: tag on the allow-list and
//! trimmed text content strictly between 0 and [`MAX_TEXT_LEN`]
//! characters. The upper bound is the "small readable unit, not a whole
//! section" heuristic. First match wins; no comparison among candidates.

use crate::dom::Document;
use crate::types::{ElementId, GazePoint};

// =============================================================================
// Classification
// =============================================================================

/// Tags eligible for magnification.
pub const TEXT_TAGS: [&str; 18] = [
    "p", "span", "div", "a", "li", "h1", "h2", "h3", "h4", "h5", "h6", "td", "th", "label",
    "strong", "em", "b", "i",
];

/// Exclusive upper bound on trimmed text length.
pub const MAX_TEXT_LEN: usize = 500;

/// Levels walked up from the hit element (self counts as the first).
pub const MAX_ANCESTOR_DEPTH: usize = 5;

/// Check whether an element is a small readable unit.
pub fn has_readable_text(document: &Document, id: ElementId) -> bool {
    let Some(tag) = document.tag(id) else {
        return false;
    };
    if !TEXT_TAGS.contains(&tag) {
        return false;
    }

    let Some(text) = document.text_content(id) else {
        return false;
    };
    let len = text.trim().chars().count();
    len > 0 && len < MAX_TEXT_LEN
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve the readable element under a gaze point.
///
/// Returns `None` when nothing is under the point or no ancestor within
/// the depth limit qualifies -- a normal "nothing to magnify" outcome,
/// not an error.
pub fn resolve_target(document: &Document, point: GazePoint) -> Option<ElementId> {
    let mut current = document.element_from_point(point);
    let mut depth = 0;

    while let Some(id) = current {
        if depth >= MAX_ANCESTOR_DEPTH {
            return None;
        }
        if has_readable_text(document, id) {
            return Some(id);
        }
        current = document.parent(id);
        depth += 1;
    }

    None
}

// =============================================================================
// Tests
// =============================================================================
