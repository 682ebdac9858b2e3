//! Interaction state - idle detection and observable engine state.

pub mod idle;
pub mod signals;

pub use idle::{ActivityKind, DEFAULT_IDLE_WINDOW, IdleTracker};
pub use signals::EngineSignals;
