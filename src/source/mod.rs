//! Gaze sources - best-effort streams of gaze point samples.
//!
//! Two variants share one capability set: the pointer-based fallback
//! (always available, rate-limited) and the model-based source (an
//! optional external predictor; absence or failure is never fatal).
//! Delivery rate is implementation-chosen and not guaranteed periodic.

pub mod model;
pub mod pointer;

pub use model::{GazePredictor, ModelSource, PredictorError};
pub use pointer::PointerSource;

/// Capability set common to all gaze sources.
pub trait GazeSource {
    /// Temporarily stop producing samples (idle).
    fn pause(&mut self);

    /// Resume after a pause.
    fn resume(&mut self);

    /// Shut the source down (tracking disabled).
    fn end(&mut self);
}
