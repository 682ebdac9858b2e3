//! Core types for gazelens.
//!
//! These types define the foundation that everything builds on.
//! They flow through the engine pipeline and define what the document
//! model and the magnifier understand.

// =============================================================================
// Gaze Point
// =============================================================================

/// A screen coordinate currently treated as the user's focus target.
///
/// Ephemeral: the engine keeps exactly one and overwrites it on every
/// sample. No history is retained.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GazePoint {
    pub x: f32,
    pub y: f32,
}

impl GazePoint {
    /// Create a new gaze point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// =============================================================================
// Rect
// =============================================================================

/// Axis-aligned bounding rectangle of an element, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check whether a point falls inside this rect.
    ///
    /// Edges are half-open: the left/top edge is inside, the
    /// right/bottom edge is not.
    #[inline]
    pub fn contains(&self, point: GazePoint) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

// =============================================================================
// Element Id
// =============================================================================

/// Stable identifier for an element in a [`Document`](crate::dom::Document).
///
/// Generational: the arena bumps the slot generation when an element is
/// removed, so a stale id held across a removal never aliases a newly
/// created element. Liveness is checked explicitly with
/// `Document::contains` -- this stands in for the weak references the
/// engine would hold against a garbage-collected DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl ElementId {
    /// Raw slot index. Only meaningful together with the generation.
    pub fn index(&self) -> u32 {
        self.index
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 100.0, 20.0);

        assert!(rect.contains(GazePoint::new(10.0, 10.0)));
        assert!(rect.contains(GazePoint::new(50.0, 15.0)));
        assert!(rect.contains(GazePoint::new(109.9, 29.9)));

        // Right/bottom edges are exclusive
        assert!(!rect.contains(GazePoint::new(110.0, 15.0)));
        assert!(!rect.contains(GazePoint::new(50.0, 30.0)));
        assert!(!rect.contains(GazePoint::new(9.9, 15.0)));
    }

    #[test]
    fn test_gaze_point_overwrite() {
        let mut point = GazePoint::default();
        assert_eq!(point, GazePoint::new(0.0, 0.0));

        point = GazePoint::new(42.0, 7.0);
        assert_eq!(point.x, 42.0);
        assert_eq!(point.y, 7.0);
    }
}
