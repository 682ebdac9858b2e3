//! Magnification Engine - the per-page gaze-to-text state machine.
//!
//! Consumes gaze samples, resolves the readable element under the gaze
//! point, and applies/restores a font-size transform, throttled to a
//! frame budget. Three states:
//!
//! ```text
//! Stopped --enable--> Running --30s quiet--> Idle
//!    ^                   |  ^------activity------'
//!    '-----disable-------'
//! ```
//!
//! Everything is single-threaded and event-driven: the host feeds typed
//! [`Event`]s with an explicit `now`, and timers are deadlines checked on
//! `Tick`. A late deadline whose state has moved on is a no-op.
//!
//! # Ordering invariant
//!
//! At most one element is magnified at any instant. Moving to a new
//! element always restores the previous one first, within the same tick.

pub mod resolve;
pub mod snapshot;
pub mod throttle;

use std::time::{Duration, Instant};

use crate::dom::{Document, format_px, parse_leading_f32};
use crate::settings::{Settings, SettingsPatch};
use crate::source::{GazeSource as _, ModelSource};
use crate::state::{ActivityKind, EngineSignals, IdleTracker};
use crate::types::{ElementId, GazePoint};

use resolve::resolve_target;
use snapshot::SnapshotTable;
use throttle::{FrameGate, Throttle};

// =============================================================================
// Constants
// =============================================================================

/// Class marking a currently magnified element.
pub const MAGNIFIED_CLASS: &str = "gazelens-magnified";

/// Update-rate ceiling: at most one applied style update per window
/// (~60 Hz).
pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_millis(16);

/// Coarse throttle for the dynamic-content sweep.
pub const MUTATION_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

// =============================================================================
// Events & Status
// =============================================================================

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Stopped,
    Running,
    Idle,
}

/// Typed input to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A gaze sample from any source.
    Gaze(GazePoint),
    /// Qualifying user activity (resets the idle window).
    Activity(ActivityKind),
    /// Display-refresh tick; all scheduled work happens here.
    Tick,
    /// Enable/disable command.
    Toggle(bool),
    /// Partial settings update.
    Settings(SettingsPatch),
}

// =============================================================================
// Pending Restores
// =============================================================================

/// A transition write-back waiting for the restore animation to finish.
#[derive(Debug)]
struct PendingRestore {
    id: ElementId,
    due: Instant,
    transition: String,
}

// =============================================================================
// Engine
// =============================================================================

/// One page's magnification engine.
pub struct MagnifierEngine {
    settings: Settings,
    running: bool,
    gaze: GazePoint,
    current: Option<ElementId>,
    snapshots: SnapshotTable,
    frame_gate: FrameGate,
    mutation_sweep: Throttle,
    last_seen_mutations: u64,
    idle: IdleTracker,
    pending_restores: Vec<PendingRestore>,
    model: Option<ModelSource>,
    signals: EngineSignals,
}

impl MagnifierEngine {
    /// Create a stopped engine with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            running: false,
            gaze: GazePoint::default(),
            current: None,
            snapshots: SnapshotTable::new(),
            frame_gate: FrameGate::new(MIN_UPDATE_INTERVAL),
            mutation_sweep: Throttle::new(MUTATION_SWEEP_INTERVAL),
            last_seen_mutations: 0,
            idle: IdleTracker::default(),
            pending_restores: Vec::new(),
            model: None,
            signals: EngineSignals::new(),
        }
    }

    /// Attach a model-based gaze source. Started on the next
    /// [`start`](Self::start); a failed start logs and falls back to
    /// pointer tracking.
    pub fn set_model(&mut self, model: ModelSource) {
        self.model = Some(model);
    }

    /// Observable engine state for hosts.
    pub fn signals(&self) -> &EngineSignals {
        &self.signals
    }

    /// Current lifecycle state.
    pub fn status(&self) -> EngineStatus {
        if !self.running {
            EngineStatus::Stopped
        } else if self.idle.is_idle() {
            EngineStatus::Idle
        } else {
            EngineStatus::Running
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The element currently magnified, if any.
    pub fn current_element(&self) -> Option<ElementId> {
        self.current
    }

    // -------------------------------------------------------------------------
    // Event Intake
    // -------------------------------------------------------------------------

    /// Feed one typed event.
    pub fn handle_event(&mut self, document: &mut Document, event: Event, now: Instant) {
        match event {
            Event::Gaze(point) => self.on_gaze(point),
            Event::Activity(kind) => self.on_activity(kind, now),
            Event::Tick => self.on_tick(document, now),
            Event::Toggle(enabled) => {
                if enabled {
                    self.start(now);
                } else {
                    self.stop(document, now);
                }
            }
            Event::Settings(patch) => self.settings.apply(&patch),
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Stopped -> Running. Starts sources and idle detection.
    pub fn start(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.idle.arm(now);

        if let Some(model) = &mut self.model {
            if let Err(err) = model.begin() {
                log::info!("eye tracking not available, using pointer fallback: {err}");
                self.model = None;
            }
        }

        self.signals.enabled.set(true);
        self.signals.is_idle.set(false);
    }

    /// Running/Idle -> Stopped. Cancels pending work, restores every
    /// magnified element to its snapshot, clears the side table and ends
    /// the sources.
    pub fn stop(&mut self, document: &mut Document, now: Instant) {
        if !self.running {
            return;
        }
        self.running = false;

        self.frame_gate.cancel();
        self.mutation_sweep.reset();

        // Restore-before-teardown: every magnified element goes back to
        // its captured snapshot. No ticks arrive while stopped, so the
        // transition write-backs are flushed immediately as well.
        for id in document.elements_with_class(MAGNIFIED_CLASS) {
            self.restore_element(document, id, now);
        }
        for pending in self.pending_restores.drain(..) {
            if document.contains(pending.id) {
                document.set_transition(pending.id, pending.transition);
            }
        }

        self.snapshots.clear();
        self.current = None;
        self.idle.disarm();

        if let Some(model) = &mut self.model {
            model.end();
        }

        self.signals.enabled.set(false);
        self.signals.is_idle.set(false);
        self.signals.current_element.set(None);
    }

    // -------------------------------------------------------------------------
    // Samples & Activity
    // -------------------------------------------------------------------------

    /// Record a gaze sample and schedule one coalesced update.
    ///
    /// Ignored while stopped or idle (pointer sampling stays armed but
    /// is gated here, at the point of use).
    pub fn on_gaze(&mut self, point: GazePoint) {
        if !self.running || self.idle.is_idle() {
            return;
        }
        self.gaze = point;
        self.signals.set_gaze(point);
        self.frame_gate.schedule();
    }

    /// Record qualifying user activity; wakes the engine from idle.
    pub fn on_activity(&mut self, kind: ActivityKind, now: Instant) {
        if !self.running {
            return;
        }
        if self.idle.touch(kind, now) {
            if let Some(model) = &mut self.model {
                model.resume();
            }
            self.signals.is_idle.set(false);
        }
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Advance the engine clock: idle edge, due restores, mutation
    /// sweep, model-sample drain, and at most one magnification update.
    pub fn on_tick(&mut self, document: &mut Document, now: Instant) {
        if !self.running {
            return;
        }

        if self.idle.check(now) {
            if let Some(model) = &mut self.model {
                model.pause();
            }
            self.signals.is_idle.set(true);
        }

        self.process_restores(document, now);
        self.sweep_mutations(document, now);

        if !self.idle.is_idle() {
            self.drain_model(now);
        }

        if self.frame_gate.take(now) {
            self.update_magnification(document, now);
        }
    }

    fn drain_model(&mut self, _now: Instant) {
        let Some(model) = &mut self.model else { return };
        let mut latest = None;
        while let Some(point) = model.poll() {
            latest = Some(point);
        }
        if let Some(point) = latest {
            self.gaze = point;
            self.signals.set_gaze(point);
            self.frame_gate.schedule();
        }
    }

    /// Coarse dynamic-content check: if the current element left the
    /// document, drop the reference without restoring style (a detached
    /// element needs no visual cleanup).
    fn sweep_mutations(&mut self, document: &Document, now: Instant) {
        if self.idle.is_idle() {
            return;
        }
        let mutations = document.mutation_count();
        if mutations == self.last_seen_mutations {
            return;
        }
        if !self.mutation_sweep.accept(now) {
            return;
        }
        self.last_seen_mutations = mutations;

        if let Some(current) = self.current {
            if !document.contains(current) {
                // The id never comes back (generations), so its snapshot
                // is dead weight too.
                self.snapshots.remove(current);
                self.current = None;
                self.signals.current_element.set(None);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Magnification
    // -------------------------------------------------------------------------

    fn update_magnification(&mut self, document: &mut Document, now: Instant) {
        let target = resolve_target(document, self.gaze);

        if target != self.current {
            // Restore strictly before apply
            if let Some(previous) = self.current {
                self.restore_element(document, previous, now);
            }

            if let Some(next) = target {
                self.magnify_element(document, next);
            }

            self.current = target;
            self.signals.current_element.set(target);
        }
    }

    fn magnify_element(&mut self, document: &mut Document, id: ElementId) {
        let Some(snapshot) = self.snapshots.capture(document, id) else {
            return;
        };
        let Some(original_size) = parse_leading_f32(&snapshot.font_size) else {
            return;
        };
        let original_line_height = parse_leading_f32(&snapshot.line_height);

        let level = self.settings.magnification_level;
        let duration = self.settings.transition_duration;

        document.set_transition(
            id,
            format!("font-size {duration}ms ease-in-out, line-height {duration}ms ease-in-out"),
        );
        document.set_font_size(id, format_px(original_size * level));

        // Keyword line-heights ("normal") are left alone
        if let Some(line_height) = original_line_height {
            document.set_line_height(id, format_px(line_height * level));
        }

        document.add_class(id, MAGNIFIED_CLASS);
    }

    /// Write the exact captured strings back and drop the marker. The
    /// original transition comes back later, once the restore animation
    /// has had its duration -- unless the element is current again by
    /// then.
    fn restore_element(&mut self, document: &mut Document, id: ElementId, now: Instant) {
        let Some(snapshot) = self.snapshots.get(id) else {
            return;
        };
        if !document.contains(id) {
            return;
        }

        document.set_font_size(id, snapshot.font_size.clone());
        document.set_line_height(id, snapshot.line_height.clone());
        document.remove_class(id, MAGNIFIED_CLASS);

        self.pending_restores.push(PendingRestore {
            id,
            due: now + Duration::from_millis(u64::from(self.settings.transition_duration)),
            transition: snapshot.transition.clone(),
        });
    }

    fn process_restores(&mut self, document: &mut Document, now: Instant) {
        if self.pending_restores.is_empty() {
            return;
        }
        let current = self.current;
        let mut due = Vec::new();
        self.pending_restores.retain(|pending| {
            if pending.due <= now {
                due.push((pending.id, pending.transition.clone()));
                false
            } else {
                true
            }
        });

        for (id, transition) in due {
            // Superseded: the element was re-entered during the restore
            // window, its transition belongs to the new magnification.
            if current == Some(id) {
                continue;
            }
            if document.contains(id) {
                document.set_transition(id, transition);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ComputedStyle;
    use crate::types::Rect;

    const T0_TRANSITION: &str = "color 1s linear";

    fn page() -> (Document, ElementId, ElementId) {
        let mut doc = Document::new();
        let body = doc.append(None, "div", "", Rect::new(0.0, 0.0, 800.0, 600.0));
        let hello = doc.append(Some(body), "span", "Hello", Rect::new(10.0, 10.0, 50.0, 20.0));
        doc.set_style(hello, ComputedStyle::new("16px", "24px", T0_TRANSITION));
        let world = doc.append(Some(body), "p", "World", Rect::new(100.0, 10.0, 50.0, 20.0));
        doc.set_style(world, ComputedStyle::new("20px", "normal", T0_TRANSITION));
        (doc, hello, world)
    }

    fn engine(level: f32) -> MagnifierEngine {
        let mut settings = Settings::default();
        settings.magnification_level = level;
        MagnifierEngine::new(settings)
    }

    fn gaze_and_tick(
        engine: &mut MagnifierEngine,
        doc: &mut Document,
        point: GazePoint,
        now: Instant,
    ) {
        engine.on_gaze(point);
        engine.on_tick(doc, now);
    }

    #[test]
    fn test_stopped_engine_ignores_everything() {
        let (mut doc, hello, _) = page();
        let mut engine = engine(2.0);
        let now = Instant::now();

        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), now);

        assert_eq!(engine.status(), EngineStatus::Stopped);
        assert_eq!(doc.style(hello).unwrap().font_size, "16px");
        assert_eq!(engine.current_element(), None);
    }

    #[test]
    fn test_magnifies_span_under_gaze() {
        let (mut doc, hello, _) = page();
        let mut engine = engine(2.0);
        let now = Instant::now();

        engine.start(now);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), now);

        assert_eq!(engine.current_element(), Some(hello));
        let style = doc.style(hello).unwrap();
        assert_eq!(style.font_size, "32px");
        assert_eq!(style.line_height, "48px");
        assert_eq!(
            style.transition,
            "font-size 200ms ease-in-out, line-height 200ms ease-in-out"
        );
        assert!(doc.has_class(hello, MAGNIFIED_CLASS));
    }

    #[test]
    fn test_keyword_line_height_left_alone() {
        let (mut doc, _, world) = page();
        let mut engine = engine(2.0);
        let now = Instant::now();

        engine.start(now);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(120.0, 15.0), now);

        let style = doc.style(world).unwrap();
        assert_eq!(style.font_size, "40px");
        assert_eq!(style.line_height, "normal");
    }

    #[test]
    fn test_restore_before_apply_on_element_change() {
        let (mut doc, hello, world) = page();
        let mut engine = engine(2.0);
        let start = Instant::now();

        engine.start(start);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), start);
        assert!(doc.has_class(hello, MAGNIFIED_CLASS));

        let later = start + Duration::from_millis(20);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(120.0, 15.0), later);

        // Previous restored byte-identically, new one magnified
        let old = doc.style(hello).unwrap();
        assert_eq!(old.font_size, "16px");
        assert_eq!(old.line_height, "24px");
        assert!(!doc.has_class(hello, MAGNIFIED_CLASS));

        assert_eq!(doc.style(world).unwrap().font_size, "40px");
        assert!(doc.has_class(world, MAGNIFIED_CLASS));
        assert_eq!(engine.current_element(), Some(world));
    }

    #[test]
    fn test_same_element_is_idempotent() {
        let (mut doc, hello, _) = page();
        let mut engine = engine(2.0);
        let start = Instant::now();

        engine.start(start);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), start);

        // Gazing around inside the same element never re-applies
        for step in 1..5 {
            let now = start + Duration::from_millis(20 * step);
            gaze_and_tick(&mut engine, &mut doc, GazePoint::new(22.0 + step as f32, 16.0), now);
        }

        let style = doc.style(hello).unwrap();
        assert_eq!(style.font_size, "32px"); // not 16 * 2 * 2 * ...
        assert_eq!(engine.current_element(), Some(hello));
    }

    #[test]
    fn test_update_ceiling_coalesces_samples() {
        let (mut doc, hello, world) = page();
        let mut engine = engine(2.0);
        let start = Instant::now();

        engine.start(start);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), start);
        assert_eq!(engine.current_element(), Some(hello));

        // A burst of samples within one 16 ms window: the coalesced
        // update is discarded by the ceiling, styles stay put.
        engine.on_gaze(GazePoint::new(120.0, 15.0));
        engine.on_gaze(GazePoint::new(121.0, 15.0));
        engine.on_gaze(GazePoint::new(122.0, 15.0));
        engine.on_tick(&mut doc, start + Duration::from_millis(8));

        assert_eq!(engine.current_element(), Some(hello));
        assert!(!doc.has_class(world, MAGNIFIED_CLASS));

        // The next sample after the window goes through
        gaze_and_tick(
            &mut engine,
            &mut doc,
            GazePoint::new(120.0, 15.0),
            start + Duration::from_millis(20),
        );
        assert_eq!(engine.current_element(), Some(world));
    }

    #[test]
    fn test_transition_restored_after_duration() {
        let (mut doc, hello, _) = page();
        let mut engine = engine(2.0);
        let start = Instant::now();

        engine.start(start);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), start);

        // Leave the element (gaze outside the page)
        let leave = start + Duration::from_millis(20);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(900.0, 700.0), leave);
        assert_eq!(engine.current_element(), None);

        // Transition still the animated one until the duration elapses
        assert_ne!(doc.style(hello).unwrap().transition, T0_TRANSITION);

        engine.on_tick(&mut doc, leave + Duration::from_millis(199));
        assert_ne!(doc.style(hello).unwrap().transition, T0_TRANSITION);

        engine.on_tick(&mut doc, leave + Duration::from_millis(200));
        assert_eq!(doc.style(hello).unwrap().transition, T0_TRANSITION);
    }

    #[test]
    fn test_reentry_keeps_new_transition() {
        let (mut doc, hello, _) = page();
        let mut engine = engine(2.0);
        let start = Instant::now();

        engine.start(start);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), start);

        // Leave, then re-enter before the restore window closes
        let leave = start + Duration::from_millis(20);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(900.0, 700.0), leave);

        let reenter = leave + Duration::from_millis(100);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), reenter);
        assert_eq!(engine.current_element(), Some(hello));

        // The late restore deadline must not clobber the fresh transition
        engine.on_tick(&mut doc, leave + Duration::from_millis(250));
        assert_eq!(
            doc.style(hello).unwrap().transition,
            "font-size 200ms ease-in-out, line-height 200ms ease-in-out"
        );
    }

    #[test]
    fn test_idle_after_quiet_window_ignores_gaze() {
        let (mut doc, hello, world) = page();
        let mut engine = engine(2.0);
        let start = Instant::now();

        engine.start(start);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), start);

        // 30 s of silence
        let quiet = start + Duration::from_secs(31);
        engine.on_tick(&mut doc, quiet);
        assert_eq!(engine.status(), EngineStatus::Idle);

        // Samples are ignored while idle
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(120.0, 15.0), quiet + Duration::from_millis(20));
        assert_eq!(engine.current_element(), Some(hello));
        assert!(!doc.has_class(world, MAGNIFIED_CLASS));

        // Qualifying activity wakes it up
        engine.on_activity(ActivityKind::SCROLL, quiet + Duration::from_secs(1));
        assert_eq!(engine.status(), EngineStatus::Running);

        gaze_and_tick(
            &mut engine,
            &mut doc,
            GazePoint::new(120.0, 15.0),
            quiet + Duration::from_secs(2),
        );
        assert_eq!(engine.current_element(), Some(world));
    }

    #[test]
    fn test_disable_restores_magnified_element() {
        let (mut doc, hello, _) = page();
        let mut engine = engine(2.0);
        let start = Instant::now();

        engine.start(start);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), start);
        assert!(doc.has_class(hello, MAGNIFIED_CLASS));

        engine.stop(&mut doc, start + Duration::from_millis(20));

        let style = doc.style(hello).unwrap();
        assert_eq!(style.font_size, "16px");
        assert_eq!(style.line_height, "24px");
        assert_eq!(style.transition, T0_TRANSITION); // flushed at stop
        assert!(!doc.has_class(hello, MAGNIFIED_CLASS));
        assert_eq!(engine.status(), EngineStatus::Stopped);
        assert_eq!(engine.current_element(), None);
    }

    #[test]
    fn test_restart_after_stop() {
        let (mut doc, hello, _) = page();
        let mut engine = engine(2.0);
        let start = Instant::now();

        engine.start(start);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), start);
        engine.stop(&mut doc, start + Duration::from_millis(20));

        // Stopped is re-enterable
        let again = start + Duration::from_secs(1);
        engine.start(again);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), again);
        assert_eq!(doc.style(hello).unwrap().font_size, "32px");
    }

    #[test]
    fn test_detached_current_cleared_without_restore() {
        let (mut doc, hello, _) = page();
        let mut engine = engine(2.0);
        let start = Instant::now();

        engine.start(start);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), start);
        assert_eq!(engine.current_element(), Some(hello));

        doc.remove(hello);

        // Coarse sweep runs on a later tick and drops the stale id,
        // snapshot included
        engine.on_tick(&mut doc, start + Duration::from_secs(2));
        assert_eq!(engine.current_element(), None);
        assert!(!engine.snapshots.has(hello));
    }

    #[test]
    fn test_toggle_events() {
        let (mut doc, hello, _) = page();
        let mut engine = engine(2.0);
        let now = Instant::now();

        engine.handle_event(&mut doc, Event::Toggle(true), now);
        assert_eq!(engine.status(), EngineStatus::Running);

        engine.handle_event(&mut doc, Event::Gaze(GazePoint::new(20.0, 15.0)), now);
        engine.handle_event(&mut doc, Event::Tick, now);
        assert_eq!(engine.current_element(), Some(hello));

        engine.handle_event(&mut doc, Event::Toggle(false), now + Duration::from_millis(20));
        assert_eq!(engine.status(), EngineStatus::Stopped);
        assert_eq!(doc.style(hello).unwrap().font_size, "16px");
    }

    #[test]
    fn test_settings_update_applies_to_next_magnification() {
        let (mut doc, hello, world) = page();
        let mut engine = engine(2.0);
        let start = Instant::now();

        engine.start(start);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), start);
        assert_eq!(doc.style(hello).unwrap().font_size, "32px");

        engine.handle_event(
            &mut doc,
            Event::Settings(SettingsPatch {
                magnification_level: Some(3.0),
                transition_duration: None,
            }),
            start,
        );

        gaze_and_tick(
            &mut engine,
            &mut doc,
            GazePoint::new(120.0, 15.0),
            start + Duration::from_millis(20),
        );
        assert_eq!(doc.style(world).unwrap().font_size, "60px");
    }

    #[test]
    fn test_signals_mirror_state() {
        let (mut doc, hello, _) = page();
        let mut engine = engine(2.0);
        let signals = engine.signals().clone();
        let start = Instant::now();

        assert!(!signals.enabled.get());

        engine.start(start);
        assert!(signals.enabled.get());

        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), start);
        assert_eq!(signals.gaze_x.get(), 20.0);
        assert_eq!(signals.current_element.get(), Some(hello));

        engine.on_tick(&mut doc, start + Duration::from_secs(31));
        assert!(signals.is_idle.get());

        engine.stop(&mut doc, start + Duration::from_secs(32));
        assert!(!signals.enabled.get());
        assert_eq!(signals.current_element.get(), None);
    }

    #[test]
    fn test_snapshot_capture_count_stays_one() {
        let (mut doc, hello, _) = page();
        let mut engine = engine(2.0);
        let start = Instant::now();

        engine.start(start);
        gaze_and_tick(&mut engine, &mut doc, GazePoint::new(20.0, 15.0), start);

        // Leave and re-enter: the snapshot from the first capture is
        // reused, so restore still yields the true original.
        gaze_and_tick(
            &mut engine,
            &mut doc,
            GazePoint::new(900.0, 700.0),
            start + Duration::from_millis(20),
        );
        gaze_and_tick(
            &mut engine,
            &mut doc,
            GazePoint::new(20.0, 15.0),
            start + Duration::from_millis(40),
        );
        gaze_and_tick(
            &mut engine,
            &mut doc,
            GazePoint::new(900.0, 700.0),
            start + Duration::from_millis(60),
        );

        let style = doc.style(hello).unwrap();
        assert_eq!(style.font_size, "16px");
        assert_eq!(style.line_height, "24px");
        assert_eq!(engine.snapshots.len(), 1);
    }
}
