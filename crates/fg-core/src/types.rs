//! Core type definitions for FocusGuard
//!
//! The session descriptor is owned by the external session store; the engine
//! only ever reads it. Field names follow the camelCase JSON the store writes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// Session Mode
// =============================================================================

/// How the session's URL list is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Only listed URLs are reachable.
    Allowlist,
    /// Only listed URLs are blocked.
    Blocklist,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allowlist => "allowlist",
            Self::Blocklist => "blocklist",
        }
    }
}

// =============================================================================
// Session Status
// =============================================================================

/// Lifecycle state of a session. The engine only acts on `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
    Stopped,
}

// =============================================================================
// Session Descriptor
// =============================================================================

/// Error type for session decoding.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid session JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A focus session as seen by the restriction engine.
///
/// Only `mode`, `status` and `urls` drive decisions. Metadata the engine
/// never reads is decoded leniently: a value of an unexpected shape becomes
/// `None` instead of rejecting the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Store document id, if the provider supplies one
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub mode: Mode,
    /// Hostnames, hostname+path, or full URLs; scheme optional
    #[serde(default, deserialize_with = "url_list")]
    pub urls: Vec<String>,
    pub status: SessionStatus,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Start time in milliseconds since the Unix epoch
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub started_at: Option<u64>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// `null` or a non-array is an empty list; non-string entries are dropped.
fn url_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let urls = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(url) => Some(url),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(urls)
}

impl Session {
    /// Create an active session with the given mode and list.
    pub fn new<I, S>(mode: Mode, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            mode,
            urls: urls.into_iter().map(Into::into).collect(),
            status: SessionStatus::Active,
            duration_minutes: None,
            started_at: None,
        }
    }

    /// Same session with a different status.
    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = status;
        self
    }

    /// Decode a session from the store's JSON representation.
    pub fn from_json(text: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(text)?)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }
}

// =============================================================================
// Verdict
// =============================================================================

/// Outcome of evaluating one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Navigation may proceed
    Allow,
    /// Navigation must show the restriction overlay
    Block {
        /// Explanation suitable for the overlay
        reason: String,
    },
}

impl Verdict {
    #[inline]
    pub fn is_block(&self) -> bool {
        matches!(self, Self::Block { .. })
    }
}
