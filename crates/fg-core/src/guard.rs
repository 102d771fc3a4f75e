//! Navigation Guard
//!
//! Glue between a browser's navigation events and the policy. The host
//! registers [`NavigationGuard::observe`] against its event source and acts on
//! the returned [`Verdict`]. The guard itself keeps no decision state; it only
//! borrows the always-allowed cache and forwards blocked attempts to a sink.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::allowed::AllowedDomainCache;
use crate::policy::decide;
use crate::types::{Session, Verdict};

// =============================================================================
// Events
// =============================================================================

/// Browser event that triggers an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigationKind {
    /// Navigation began (first evaluation of a page)
    Started,
    /// Page finished loading
    Completed,
    /// An existing tab was brought to the foreground
    TabActivated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEvent {
    pub url: String,
    pub kind: NavigationKind,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

// =============================================================================
// Attempt Logging
// =============================================================================

/// A navigation that was blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedAttempt {
    pub url: String,
    pub timestamp_ms: u64,
}

/// Destination for blocked attempts (e.g. the session store's attempt log).
pub trait AttemptSink {
    fn record(&self, attempt: &BlockedAttempt);
}

impl<T: AttemptSink + ?Sized> AttemptSink for &T {
    fn record(&self, attempt: &BlockedAttempt) {
        (**self).record(attempt)
    }
}

/// Discards all attempts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl AttemptSink for NoopSink {
    fn record(&self, _attempt: &BlockedAttempt) {}
}

/// Keeps attempts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    attempts: Mutex<Vec<BlockedAttempt>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> Vec<BlockedAttempt> {
        self.attempts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.attempts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AttemptSink for MemorySink {
    fn record(&self, attempt: &BlockedAttempt) {
        self.attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(attempt.clone());
    }
}

// =============================================================================
// Guard
// =============================================================================

pub struct NavigationGuard<'a, S: AttemptSink> {
    allowed: &'a AllowedDomainCache,
    sink: S,
}

impl<'a, S: AttemptSink> NavigationGuard<'a, S> {
    pub fn new(allowed: &'a AllowedDomainCache, sink: S) -> Self {
        Self { allowed, sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Evaluate one navigation event against the current session.
    ///
    /// Only blocked `Started` events are recorded, so one navigation is
    /// logged once even though it is re-checked on completion and on tab
    /// activation.
    pub fn observe(&self, event: &NavigationEvent, session: Option<&Session>) -> Verdict {
        let allowed = self.allowed.snapshot();
        let verdict = decide(&event.url, session, &allowed[..]);

        if verdict.is_block() && event.kind == NavigationKind::Started {
            self.sink.record(&BlockedAttempt {
                url: event.url.clone(),
                timestamp_ms: event.timestamp_ms,
            });
        }

        verdict
    }
}
