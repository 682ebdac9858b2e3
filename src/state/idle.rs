//! Idle detection - suspend expensive tracking when the user goes quiet.
//!
//! Any qualifying activity (pointer move, key press, scroll, click)
//! resets a 30 s window; when the window elapses without activity the
//! engine goes idle and pauses the model-based gaze source. Pointer
//! sampling stays armed the whole time and is gated by the idle flag at
//! the point of use.
//!
//! Deadline-based, no timer thread: the host drives [`IdleTracker::check`]
//! from its tick and a late check against a superseded deadline is a
//! no-op.

use std::time::{Duration, Instant};

use bitflags::bitflags;

/// Inactivity window after which tracking suspends the gaze model.
pub const DEFAULT_IDLE_WINDOW: Duration = Duration::from_secs(30);

// =============================================================================
// Activity Kinds
// =============================================================================

bitflags! {
    /// User-activity event kinds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ActivityKind: u8 {
        const POINTER_MOVE = 1 << 0;
        const KEY          = 1 << 1;
        const SCROLL       = 1 << 2;
        const CLICK        = 1 << 3;

        /// Everything that resets the idle window.
        const QUALIFYING = Self::POINTER_MOVE.bits()
            | Self::KEY.bits()
            | Self::SCROLL.bits()
            | Self::CLICK.bits();
    }
}

// =============================================================================
// Idle Tracker
// =============================================================================

/// Deadline-based idle state for one engine.
#[derive(Debug)]
pub struct IdleTracker {
    window: Duration,
    deadline: Option<Instant>,
    is_idle: bool,
}

impl IdleTracker {
    /// Create a tracker with the given inactivity window. Detection is
    /// disarmed until [`arm`](Self::arm) is called.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
            is_idle: false,
        }
    }

    /// Start detection (engine entered Running).
    pub fn arm(&mut self, now: Instant) {
        self.is_idle = false;
        self.deadline = Some(now + self.window);
    }

    /// Stop detection (engine stopped).
    pub fn disarm(&mut self) {
        self.deadline = None;
        self.is_idle = false;
    }

    /// Record a qualifying activity event.
    ///
    /// Returns true when this activity woke the engine from idle (the
    /// caller resumes the model source on that edge).
    pub fn touch(&mut self, kind: ActivityKind, now: Instant) -> bool {
        if self.deadline.is_none() || !kind.intersects(ActivityKind::QUALIFYING) {
            return false;
        }
        let woke = self.is_idle;
        self.is_idle = false;
        self.deadline = Some(now + self.window);
        woke
    }

    /// Advance the clock.
    ///
    /// Returns true exactly once per Running -> Idle edge (the caller
    /// pauses the model source on that edge).
    pub fn check(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if self.is_idle || now < deadline {
            return false;
        }
        self.is_idle = true;
        true
    }

    /// Whether the engine is currently idle.
    pub fn is_idle(&self) -> bool {
        self.is_idle
    }
}

impl Default for IdleTracker {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_WINDOW)
    }
}

// =============================================================================
// Tests
// =============================================================================
