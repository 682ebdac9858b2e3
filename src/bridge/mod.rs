//! Message bridge - one-shot commands between coordinator and pages.
//!
//! Fire-and-forget request/response: a privileged coordinator sends a
//! command, the page's engine reacts and acknowledges. The JSON shape is
//! the original extension's wire schema, byte-for-byte:
//!
//! ```json
//! {"action":"toggle","enabled":true}
//! {"action":"updateSettings","settings":{"magnificationLevel":2.0}}
//! {"action":"ping"}
//! ```
//!
//! The core never initiates messages; it only reacts.

pub mod coordinator;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::SettingsPatch;

pub use coordinator::{Coordinator, PageEndpoint};

// =============================================================================
// Wire Schema
// =============================================================================

/// A command delivered to a page's engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Enable or disable tracking.
    Toggle { enabled: bool },
    /// Partial settings update.
    UpdateSettings { settings: SettingsPatch },
    /// Liveness probe; any response signals presence.
    Ping,
}

/// Acknowledgement for any request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
}

impl Response {
    pub const OK: Self = Self { success: true };
    pub const FAILED: Self = Self { success: false };
}

// =============================================================================
// Errors
// =============================================================================

/// Bridge delivery failure. Best-effort semantics: callers may ignore.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The page has no live engine instance (silently skipped by
    /// broadcasts).
    #[error("no live engine in page")]
    NoReceiver,
    /// The payload did not parse as a known request.
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parse a request off the wire.
pub fn parse_request(payload: &str) -> Result<Request, BridgeError> {
    Ok(serde_json::from_str(payload)?)
}

// =============================================================================
// Tests
// =============================================================================
