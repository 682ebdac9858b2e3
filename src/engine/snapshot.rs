//! Style snapshots - exact originals captured before magnification.
//!
//! A snapshot is taken lazily the first time an element is magnified and
//! restored byte-identically afterwards: "16px" in, "16px" out, never a
//! recomputed value. The table is keyed by element id; entries for
//! detached elements are inert (the engine checks liveness before
//! touching styles) and the whole table is cleared when tracking stops.

use std::collections::HashMap;

use crate::dom::{ComputedStyle, Document};
use crate::types::ElementId;

// =============================================================================
// Snapshot
// =============================================================================

/// The original font-size/line-height/transition strings of an element.
pub type StyleSnapshot = ComputedStyle;

// =============================================================================
// Table
// =============================================================================

/// Element-keyed snapshot side table.
///
/// At most one live snapshot per element: re-magnifying an element
/// reuses the entry captured on first magnification.
#[derive(Debug, Default)]
pub struct SnapshotTable {
    entries: HashMap<ElementId, StyleSnapshot>,
}

impl SnapshotTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture an element's current style unless already captured.
    ///
    /// Returns the snapshot to restore to, or `None` when the element is
    /// not live in the document.
    pub fn capture(&mut self, document: &Document, id: ElementId) -> Option<&StyleSnapshot> {
        if !document.contains(id) {
            return None;
        }
        if !self.entries.contains_key(&id) {
            let style = document.style(id)?.clone();
            self.entries.insert(id, style);
        }
        self.entries.get(&id)
    }

    /// Look up a previously captured snapshot.
    pub fn get(&self, id: ElementId) -> Option<&StyleSnapshot> {
        self.entries.get(&id)
    }

    /// Whether a snapshot exists for this element.
    pub fn has(&self, id: ElementId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Drop a single entry.
    pub fn remove(&mut self, id: ElementId) {
        self.entries.remove(&id);
    }

    /// Drop everything (tracking stopped).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of captured snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
