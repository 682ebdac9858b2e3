//! Settings - the engine's persisted configuration.
//!
//! Four keys live in a host-provided key-value store: `enabled`,
//! `magnificationLevel`, `transitionDuration`, `sensitivity`. The store
//! gives no transactional guarantees and may fail; a failed load is
//! logged and the built-in defaults take over (never fatal).
//!
//! # Example
//!
//! ```ignore
//! use gazelens::settings::{MemoryStore, SettingsStore, load_or_default};
//!
//! let store = MemoryStore::default();
//! let settings = load_or_default(&store);
//! assert_eq!(settings.magnification_level, 1.5);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Defaults
// =============================================================================

/// Factor applied to the original font size (>1.0).
pub const DEFAULT_MAGNIFICATION_LEVEL: f32 = 1.5;

/// Transition duration for the font-size/line-height animation.
pub const DEFAULT_TRANSITION_DURATION_MS: u32 = 200;

// =============================================================================
// Sensitivity
// =============================================================================

/// Tracking sensitivity, stored as 1-3.
///
/// Displayed in host UIs; the core stores it but does not consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Sensitivity {
    Low,
    Medium,
    High,
}

impl Sensitivity {
    /// UI label for this level.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self::Medium
    }
}

impl TryFrom<u8> for Sensitivity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            other => Err(format!("sensitivity out of range: {other}")),
        }
    }
}

impl From<Sensitivity> for u8 {
    fn from(value: Sensitivity) -> Self {
        match value {
            Sensitivity::Low => 1,
            Sensitivity::Medium => 2,
            Sensitivity::High => 3,
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// The persisted configuration, JSON-compatible with the original keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub enabled: bool,
    pub magnification_level: f32,
    /// Milliseconds.
    pub transition_duration: u32,
    pub sensitivity: Sensitivity,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: false,
            magnification_level: DEFAULT_MAGNIFICATION_LEVEL,
            transition_duration: DEFAULT_TRANSITION_DURATION_MS,
            sensitivity: Sensitivity::default(),
        }
    }
}

impl Settings {
    /// Apply a partial update. Absent fields leave the current value
    /// untouched, as do zero, negative and non-finite values -- a level
    /// of 0 would collapse magnified text to nothing.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(level) = patch.magnification_level {
            if level > 0.0 {
                self.magnification_level = level;
            }
        }
        if let Some(duration) = patch.transition_duration {
            if duration > 0.0 {
                self.transition_duration = duration as u32;
            }
        }
    }
}

/// Partial settings update as carried by the message bridge.
///
/// `transitionDuration` arrives as a float on the wire and is truncated
/// to whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnification_level: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_duration: Option<f32>,
}

// =============================================================================
// Store
// =============================================================================

/// Settings store failure. Never fatal to the engine.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings backend unavailable: {0}")]
    Unavailable(String),
}

/// Key-value settings backend. No transactional guarantees.
pub trait SettingsStore {
    fn load(&self) -> Result<Settings, StoreError>;
    fn save(&mut self, settings: &Settings) -> Result<(), StoreError>;
}

/// In-memory store, the default backend for tests and embedded hosts.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    settings: Settings,
}

impl MemoryStore {
    /// Create a store pre-seeded with the given settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Settings, StoreError> {
        Ok(self.settings.clone())
    }

    fn save(&mut self, settings: &Settings) -> Result<(), StoreError> {
        self.settings = settings.clone();
        Ok(())
    }
}

/// Load settings, falling back to defaults on store failure.
pub fn load_or_default(store: &dyn SettingsStore) -> Settings {
    match store.load() {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("failed to load settings, using defaults: {err}");
            Settings::default()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
