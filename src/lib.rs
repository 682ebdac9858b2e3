//! # gazelens
//!
//! Gaze-driven text magnification engine.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! observable engine state.
//!
//! ## Architecture
//!
//! A per-page, single-threaded, event-driven pipeline: gaze samples (from a
//! rate-limited pointer fallback or an optional model-based predictor) are
//! resolved against a generational-arena document model to the readable text
//! element under the point, and a font-size transform is applied and later
//! restored byte-identically from a style snapshot.
//!
//! ```text
//! GazeSource → MagnifierEngine → resolve_target → magnify/restore → Document
//! ```
//!
//! All timing is explicit: every entry point takes `now: Instant`, and the
//! engine's timers are deadlines checked on `Tick`. Nothing sleeps, nothing
//! spawns.
//!
//! ## Modules
//!
//! - [`types`] - Core types (GazePoint, Rect, ElementId)
//! - [`dom`] - Document model and computed-style strings
//! - [`engine`] - The magnification state machine
//! - [`source`] - Gaze sources (pointer fallback, model predictor)
//! - [`state`] - Idle detection and observable signals
//! - [`settings`] - Persisted configuration and its store
//! - [`bridge`] - Coordinator/page message schema
//! - [`session`] - Per-page wiring and the terminal reference host

pub mod bridge;
pub mod dom;
pub mod engine;
pub mod session;
pub mod settings;
pub mod source;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use dom::{ComputedStyle, Document, format_px, parse_leading_f32};

pub use engine::{
    Event, EngineStatus, MAGNIFIED_CLASS, MIN_UPDATE_INTERVAL, MUTATION_SWEEP_INTERVAL,
    MagnifierEngine,
};

pub use source::{GazePredictor, GazeSource, ModelSource, PointerSource, PredictorError};

pub use state::{ActivityKind, DEFAULT_IDLE_WINDOW, EngineSignals, IdleTracker};

pub use settings::{
    DEFAULT_MAGNIFICATION_LEVEL, DEFAULT_TRANSITION_DURATION_MS, MemoryStore, Sensitivity,
    Settings, SettingsPatch, SettingsStore, StoreError, load_or_default,
};

pub use bridge::{
    BridgeError, Coordinator, PageEndpoint, Request, Response, parse_request,
};

pub use session::Session;
