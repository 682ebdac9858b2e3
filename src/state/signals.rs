//! Reactive mirrors of engine state.
//!
//! The engine owns an [`EngineSignals`] and writes every observable
//! state change into it; hosts clone the signals they care about and
//! react without polling the engine. This is also how a host renders a
//! gaze cursor: subscribe to `gaze_x`/`gaze_y`.

use spark_signals::{Signal, signal};

use crate::types::{ElementId, GazePoint};

// =============================================================================
// Engine Signals
// =============================================================================

/// Observable engine state. Cheap to clone; clones share the underlying
/// signals.
#[derive(Clone)]
pub struct EngineSignals {
    /// Last recorded gaze X, screen coordinates.
    pub gaze_x: Signal<f32>,
    /// Last recorded gaze Y, screen coordinates.
    pub gaze_y: Signal<f32>,
    /// Whether tracking is enabled (Running or Idle).
    pub enabled: Signal<bool>,
    /// Whether the engine is idle.
    pub is_idle: Signal<bool>,
    /// The element currently magnified, if any.
    pub current_element: Signal<Option<ElementId>>,
}

impl EngineSignals {
    /// Create a fresh set of signals.
    pub fn new() -> Self {
        Self {
            gaze_x: signal(0.0),
            gaze_y: signal(0.0),
            enabled: signal(false),
            is_idle: signal(false),
            current_element: signal(None),
        }
    }

    /// Mirror a new gaze point.
    pub fn set_gaze(&self, point: GazePoint) {
        self.gaze_x.set(point.x);
        self.gaze_y.set(point.y);
    }
}

impl Default for EngineSignals {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
