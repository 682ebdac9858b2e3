//! Model-based gaze source - an optional external predictor.
//!
//! The predictor itself (camera, calibration, regression model) is
//! opaque to this crate: hosts implement [`GazePredictor`] over whatever
//! library they load. If the predictor fails to start, the engine logs
//! and continues on pointer tracking alone. Non-fatal, silent fallback.

use thiserror::Error;

use crate::types::GazePoint;

use super::GazeSource;

// =============================================================================
// Predictor
// =============================================================================

/// Failure to load or run an external gaze predictor.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("gaze predictor failed to load: {0}")]
    Load(String),
    #[error("gaze predictor failed to start: {0}")]
    Start(String),
}

/// An external gaze-prediction provider.
///
/// Samples are pushed by the provider at its own rate; the host loop
/// drains them with [`poll`](Self::poll) each tick.
pub trait GazePredictor {
    /// Start the predictor. Called once when tracking starts.
    fn begin(&mut self) -> Result<(), PredictorError>;

    /// Take the next pending sample, if any.
    fn poll(&mut self) -> Option<GazePoint>;

    /// Suspend prediction (battery saving while idle).
    fn pause(&mut self);

    /// Resume after a pause.
    fn resume(&mut self);

    /// Shut the predictor down.
    fn end(&mut self);
}

// =============================================================================
// Model Source
// =============================================================================

/// The model-based gaze source: a started predictor plus pause state.
pub struct ModelSource {
    predictor: Box<dyn GazePredictor>,
    paused: bool,
}

impl ModelSource {
    /// Wrap a predictor. [`begin`](Self::begin) must succeed before the
    /// source produces samples.
    pub fn new(predictor: Box<dyn GazePredictor>) -> Self {
        Self {
            predictor,
            paused: false,
        }
    }

    /// Start the underlying predictor.
    pub fn begin(&mut self) -> Result<(), PredictorError> {
        self.paused = false;
        self.predictor.begin()
    }

    /// Drain one pending sample. Returns `None` while paused.
    pub fn poll(&mut self) -> Option<GazePoint> {
        if self.paused {
            return None;
        }
        self.predictor.poll()
    }
}

impl GazeSource for ModelSource {
    fn pause(&mut self) {
        self.paused = true;
        self.predictor.pause();
    }

    fn resume(&mut self) {
        self.paused = false;
        self.predictor.resume();
    }

    fn end(&mut self) {
        self.predictor.end();
    }
}

// =============================================================================
// Tests
// =============================================================================
