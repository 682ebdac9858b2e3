//! Session - one page's wiring of settings, sources and engine.
//!
//! The analogue of the content-script entry point: load settings (with
//! defaults on failure), stand up the engine, start it when `enabled`,
//! and route bridge messages and input events into it.
//!
//! # Example
//!
//! ```ignore
//! use gazelens::session::Session;
//! use gazelens::settings::MemoryStore;
//! use gazelens::dom::Document;
//! use std::time::Instant;
//!
//! let store = MemoryStore::default();
//! let mut session = Session::mount(&store, Document::new(), None, Instant::now());
//!
//! // Host event loop
//! loop {
//!     if !session.pump_terminal(std::time::Duration::from_millis(16))? {
//!         break;
//!     }
//! }
//! session.unmount(Instant::now());
//! ```

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, poll, read};
use crossterm::execute;

use crate::bridge::{Request, Response, parse_request};
use crate::dom::Document;
use crate::engine::{Event, MagnifierEngine};
use crate::settings::{SettingsStore, load_or_default};
use crate::source::{GazePredictor, GazeSource as _, ModelSource, PointerSource};
use crate::state::{ActivityKind, EngineSignals};

// =============================================================================
// Session
// =============================================================================

/// One page's live magnifier: document, engine, sources.
pub struct Session {
    document: Document,
    engine: MagnifierEngine,
    pointer: PointerSource,
}

impl Session {
    /// Stand up a page session.
    ///
    /// Settings come from the store (defaults when it fails, logged).
    /// When `enabled` is set, the engine starts immediately; a predictor
    /// whose startup fails is logged and dropped, leaving pointer
    /// tracking in place.
    pub fn mount(
        store: &dyn SettingsStore,
        document: Document,
        predictor: Option<Box<dyn GazePredictor>>,
        now: Instant,
    ) -> Self {
        let settings = load_or_default(store);
        let enabled = settings.enabled;

        let mut engine = MagnifierEngine::new(settings);
        if let Some(predictor) = predictor {
            engine.set_model(ModelSource::new(predictor));
        }
        if enabled {
            engine.start(now);
        }

        Self {
            document,
            engine,
            pointer: PointerSource::new(),
        }
    }

    /// Tear the session down, restoring any magnified element.
    pub fn unmount(&mut self, now: Instant) {
        self.engine.stop(&mut self.document, now);
        self.pointer.end();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The page's document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for hosts that change the page.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The engine driving this page.
    pub fn engine(&self) -> &MagnifierEngine {
        &self.engine
    }

    /// Observable engine state.
    pub fn signals(&self) -> &EngineSignals {
        self.engine.signals()
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Feed a raw pointer position.
    ///
    /// Pointer movement is qualifying activity (wakes from idle) and,
    /// when it survives the 50 ms rate limit, a gaze sample.
    pub fn pointer_moved(&mut self, x: f32, y: f32, now: Instant) {
        self.engine.on_activity(ActivityKind::POINTER_MOVE, now);
        if let Some(point) = self.pointer.sample(x, y, now) {
            self.engine.on_gaze(point);
        }
    }

    /// Feed non-pointer qualifying activity (keys, clicks, scrolls).
    pub fn activity(&mut self, kind: ActivityKind, now: Instant) {
        self.engine.on_activity(kind, now);
    }

    /// Advance the engine clock one display tick.
    pub fn tick(&mut self, now: Instant) {
        self.engine.on_tick(&mut self.document, now);
    }

    // -------------------------------------------------------------------------
    // Bridge
    // -------------------------------------------------------------------------

    /// Handle a parsed bridge request and acknowledge.
    pub fn respond(&mut self, request: &Request, now: Instant) -> Response {
        match request {
            Request::Toggle { enabled } => {
                self.engine
                    .handle_event(&mut self.document, Event::Toggle(*enabled), now);
            }
            Request::UpdateSettings { settings } => {
                self.engine
                    .handle_event(&mut self.document, Event::Settings(*settings), now);
            }
            Request::Ping => {}
        }
        Response::OK
    }

    /// Handle a raw JSON bridge message and produce the JSON ack.
    ///
    /// Malformed payloads are logged and answered with a failure ack;
    /// they never take the page down.
    pub fn handle_message(&mut self, payload: &str, now: Instant) -> String {
        let response = match parse_request(payload) {
            Ok(request) => self.respond(&request, now),
            Err(err) => {
                log::warn!("dropping malformed bridge message: {err}");
                Response::FAILED
            }
        };
        match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(_) => r#"{"success":false}"#.to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Terminal Pump
    // -------------------------------------------------------------------------

    /// Enable terminal mouse capture for [`pump_terminal`](Self::pump_terminal).
    pub fn enable_mouse() -> io::Result<()> {
        execute!(io::stdout(), EnableMouseCapture)
    }

    /// Disable terminal mouse capture.
    pub fn disable_mouse() -> io::Result<()> {
        execute!(io::stdout(), DisableMouseCapture)
    }

    /// Run one iteration of a crossterm-driven event loop: poll with a
    /// short timeout, convert the event, then tick.
    ///
    /// Returns `Ok(true)`; hosts decide their own stop condition.
    pub fn pump_terminal(&mut self, timeout: Duration) -> io::Result<bool> {
        if poll(timeout)? {
            let event = read()?;
            let now = Instant::now();
            match crate::source::pointer::convert_event(&event) {
                Some(crate::source::pointer::PointerInput::Move(point)) => {
                    self.pointer_moved(point.x, point.y, now);
                }
                Some(crate::source::pointer::PointerInput::Activity(kind)) => {
                    self.activity(kind, now);
                }
                None => {}
            }
        }
        self.tick(Instant::now());
        Ok(true)
    }
}

// =============================================================================
// Tests
// =============================================================================
