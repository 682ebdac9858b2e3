//! Pacing primitives - sample throttling and frame coalescing.
//!
//! Two distinct rate limits are at work:
//!
//! - [`Throttle`] drops events arriving faster than a fixed minimum
//!   interval (pointer samples at 50 ms, mutation sweeps at 1 s).
//!   Dropped events are discarded, never queued.
//! - [`FrameGate`] coalesces any number of pending samples into at most
//!   one unit of work per display tick, and additionally enforces an
//!   update-rate ceiling (~16 ms, 60 Hz): a tick landing inside the
//!   window discards the coalesced work entirely instead of deferring it.
//!
//! All pacing is driven by an explicit `now` so tests control the clock.

use std::time::{Duration, Instant};

// =============================================================================
// Throttle
// =============================================================================

/// Fixed-minimum-interval gate. The first event always passes.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Create a throttle with the given minimum interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Accept or drop an event at `now`.
    ///
    /// Returns true (and arms the interval) when enough time has passed
    /// since the last accepted event.
    pub fn accept(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last accepted event, so the next one passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

// =============================================================================
// Frame Gate
// =============================================================================

/// One-pending-update coalescer with an update-rate ceiling.
#[derive(Debug)]
pub struct FrameGate {
    scheduled: bool,
    min_interval: Duration,
    last_update: Option<Instant>,
}

impl FrameGate {
    /// Create a gate with the given minimum interval between applied
    /// updates.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            scheduled: false,
            min_interval,
            last_update: None,
        }
    }

    /// Request an update on the next tick.
    ///
    /// Returns true when this call newly scheduled work; false when an
    /// update was already pending (the samples coalesce).
    pub fn schedule(&mut self) -> bool {
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    /// True when an update is pending for the next tick.
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Consume the pending update at tick time.
    ///
    /// Returns true when the tick should do work. The pending flag is
    /// cleared either way: a tick inside the minimum interval discards
    /// the coalesced work rather than deferring it.
    pub fn take(&mut self, now: Instant) -> bool {
        if !self.scheduled {
            return false;
        }
        self.scheduled = false;

        if let Some(last) = self.last_update {
            if now.duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.last_update = Some(now);
        true
    }

    /// Cancel any pending update and forget pacing history.
    pub fn cancel(&mut self) {
        self.scheduled = false;
        self.last_update = None;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_first_event_passes() {
        let mut throttle = Throttle::new(Duration::from_millis(50));
        assert!(throttle.accept(Instant::now()));
    }

    #[test]
    fn test_throttle_drops_within_interval() {
        let mut throttle = Throttle::new(Duration::from_millis(50));
        let start = Instant::now();

        assert!(throttle.accept(start));
        assert!(!throttle.accept(start + Duration::from_millis(10)));
        assert!(!throttle.accept(start + Duration::from_millis(49)));
        assert!(throttle.accept(start + Duration::from_millis(50)));
    }

    #[test]
    fn test_throttle_drops_do_not_queue() {
        let mut throttle = Throttle::new(Duration::from_millis(50));
        let start = Instant::now();

        assert!(throttle.accept(start));
        // Three dropped events do not earn three later passes
        assert!(!throttle.accept(start + Duration::from_millis(10)));
        assert!(!throttle.accept(start + Duration::from_millis(20)));
        assert!(!throttle.accept(start + Duration::from_millis(30)));
        assert!(throttle.accept(start + Duration::from_millis(60)));
        assert!(!throttle.accept(start + Duration::from_millis(70)));
    }

    #[test]
    fn test_throttle_reset() {
        let mut throttle = Throttle::new(Duration::from_millis(50));
        let start = Instant::now();

        assert!(throttle.accept(start));
        throttle.reset();
        assert!(throttle.accept(start + Duration::from_millis(1)));
    }

    #[test]
    fn test_gate_coalesces_to_one() {
        let mut gate = FrameGate::new(Duration::from_millis(16));

        assert!(gate.schedule());
        assert!(!gate.schedule()); // coalesced
        assert!(!gate.schedule());
        assert!(gate.is_scheduled());

        let now = Instant::now();
        assert!(gate.take(now)); // one unit of work
        assert!(!gate.take(now)); // nothing pending afterwards
    }

    #[test]
    fn test_gate_update_ceiling_discards() {
        let mut gate = FrameGate::new(Duration::from_millis(16));
        let start = Instant::now();

        gate.schedule();
        assert!(gate.take(start));

        // Tick inside the 16 ms window: work discarded, not deferred
        gate.schedule();
        assert!(!gate.take(start + Duration::from_millis(8)));
        assert!(!gate.is_scheduled());

        // Next scheduled tick outside the window runs
        gate.schedule();
        assert!(gate.take(start + Duration::from_millis(20)));
    }

    #[test]
    fn test_gate_cancel_clears_pending() {
        let mut gate = FrameGate::new(Duration::from_millis(16));
        gate.schedule();
        gate.cancel();

        assert!(!gate.is_scheduled());
        assert!(!gate.take(Instant::now()));
    }
}
