//! Pointer-based gaze source - the always-available fallback.
//!
//! One sample per pointer-move event, rate-limited to one accepted
//! sample per 50 ms; excess samples inside the interval are dropped, not
//! queued. In the terminal reference host, pointer events come from
//! crossterm mouse capture and are converted here.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event as CrosstermEvent, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};

use crate::engine::throttle::Throttle;
use crate::state::ActivityKind;
use crate::types::GazePoint;

use super::GazeSource;

/// Minimum interval between accepted pointer samples.
pub const POINTER_SAMPLE_INTERVAL: Duration = Duration::from_millis(50);

// =============================================================================
// Pointer Source
// =============================================================================

/// Rate-limited pointer sampling.
pub struct PointerSource {
    throttle: Throttle,
    armed: bool,
}

impl PointerSource {
    /// Create a pointer source with the default 50 ms interval.
    pub fn new() -> Self {
        Self::with_interval(POINTER_SAMPLE_INTERVAL)
    }

    /// Create a pointer source with a custom minimum interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            throttle: Throttle::new(interval),
            armed: true,
        }
    }

    /// Feed a raw pointer position.
    ///
    /// Returns the accepted sample, or `None` when it fell inside the
    /// rate-limit window (dropped) or the source is disarmed.
    pub fn sample(&mut self, x: f32, y: f32, now: Instant) -> Option<GazePoint> {
        if !self.armed || !self.throttle.accept(now) {
            return None;
        }
        Some(GazePoint::new(x, y))
    }
}

impl Default for PointerSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GazeSource for PointerSource {
    // Pointer sampling stays armed while idle; the engine gates samples
    // at the point of use instead.
    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn end(&mut self) {
        self.armed = false;
        self.throttle.reset();
    }
}

// =============================================================================
// Crossterm Conversion
// =============================================================================

/// What a terminal input event means to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// A pointer position plus the activity it represents.
    Move(GazePoint),
    /// Qualifying activity with no position (keys, clicks, scrolls).
    Activity(ActivityKind),
}

/// Convert a crossterm event into engine input.
///
/// Returns `None` for events the engine does not care about (resize,
/// focus, paste).
pub fn convert_event(event: &CrosstermEvent) -> Option<PointerInput> {
    match event {
        CrosstermEvent::Mouse(mouse) => Some(convert_mouse_event(mouse)),
        CrosstermEvent::Key(_) => Some(PointerInput::Activity(ActivityKind::KEY)),
        _ => None,
    }
}

fn convert_mouse_event(event: &CrosstermMouseEvent) -> PointerInput {
    match event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => PointerInput::Move(GazePoint::new(
            f32::from(event.column),
            f32::from(event.row),
        )),
        MouseEventKind::Down(_) | MouseEventKind::Up(_) => {
            PointerInput::Activity(ActivityKind::CLICK)
        }
        MouseEventKind::ScrollUp
        | MouseEventKind::ScrollDown
        | MouseEventKind::ScrollLeft
        | MouseEventKind::ScrollRight => PointerInput::Activity(ActivityKind::SCROLL),
    }
}

// =============================================================================
// Tests
// =============================================================================
