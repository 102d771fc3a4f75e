//! WebAssembly bindings for FocusGuard
//!
//! The extension's background script owns one [`Engine`] and calls it from
//! its navigation listeners. Sessions cross the boundary as the JSON the
//! session store produces; the always-allowed list is pushed in after the
//! script fetches it.

use wasm_bindgen::prelude::*;
use fg_core::{
    blocked_reason, endpoint_urls, is_internal_url, matches_any, policy, AllowedDomainCache, Session,
    DEFAULT_CONFIG_ENDPOINTS, DEFAULT_CONFIG_PATH,
};

fn parse_session(session_json: &str) -> Option<Session> {
    let trimmed = session_json.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return None;
    }
    match Session::from_json(trimmed) {
        Ok(session) => Some(session),
        Err(e) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!("FocusGuard: ignoring session: {}", e)));
            None
        }
    }
}

fn js_strings(value: &JsValue) -> Vec<String> {
    js_sys::Array::from(value)
        .iter()
        .filter_map(|v| v.as_string())
        .collect()
}

/// Empty `endpoints` or a missing `path` fall back to the built-in defaults.
fn resolve_endpoint_urls(endpoints: Vec<String>, path: Option<String>) -> Vec<String> {
    let path = path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let urls = endpoint_urls(&endpoints[..], path);
    if urls.is_empty() {
        endpoint_urls(DEFAULT_CONFIG_ENDPOINTS, path)
    } else {
        urls
    }
}

fn millis(now_ms: f64) -> u64 {
    if now_ms.is_finite() && now_ms > 0.0 {
        now_ms as u64
    } else {
        0
    }
}

#[wasm_bindgen]
pub struct Engine {
    allowed: AllowedDomainCache,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        Engine {
            allowed: AllowedDomainCache::new(),
        }
    }

    /// Whether navigation to `url` must be blocked. Malformed session JSON
    /// counts as "no session".
    pub fn should_block(&self, url: &str, session_json: &str) -> bool {
        let session = parse_session(session_json);
        policy::should_block(url, session.as_ref(), &self.allowed.snapshot()[..])
    }

    /// `{ block: bool, reason?: string }` for the overlay.
    pub fn decide(&self, url: &str, session_json: &str) -> JsValue {
        let session = parse_session(session_json);
        let verdict = policy::decide(url, session.as_ref(), &self.allowed.snapshot()[..]);

        let result = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&result, &"block".into(), &JsValue::from(verdict.is_block()));
        if let fg_core::Verdict::Block { reason } = verdict {
            let _ = js_sys::Reflect::set(&result, &"reason".into(), &JsValue::from_str(&reason));
        }
        result.into()
    }

    /// Overlay text for `url`, or `undefined` without a usable session.
    pub fn blocked_message(&self, url: &str, session_json: &str) -> Option<String> {
        parse_session(session_json).map(|session| blocked_reason(url, &session))
    }

    pub fn needs_refresh(&self, now_ms: f64) -> bool {
        self.allowed.needs_refresh(millis(now_ms))
    }

    /// Store a freshly fetched list. Returns `false` if it was unusable and
    /// the previous list was kept.
    pub fn set_allowed_domains(&self, domains: JsValue, now_ms: f64) -> bool {
        self.allowed.replace(js_strings(&domains), millis(now_ms))
    }

    /// Start the cool-down after every endpoint failed.
    pub fn record_failed_refresh(&self, now_ms: f64) {
        self.allowed.record_failed_attempt(millis(now_ms));
    }

    pub fn allowed_domains(&self) -> js_sys::Array {
        self.allowed
            .snapshot()
            .iter()
            .map(|d| JsValue::from_str(d))
            .collect()
    }
}

#[wasm_bindgen]
pub fn is_internal_url_js(url: &str) -> bool {
    is_internal_url(url)
}

/// Config URLs for the background script to try in order, first usable
/// answer wins. Pass an empty array for the built-in endpoints.
#[wasm_bindgen]
pub fn config_endpoint_urls(endpoints: JsValue, path: Option<String>) -> js_sys::Array {
    resolve_endpoint_urls(js_strings(&endpoints), path)
        .iter()
        .map(|url| JsValue::from_str(url))
        .collect()
}

/// List check used by the popup to show whether the current tab is listed.
#[wasm_bindgen]
pub fn url_matches_list(url: &str, entries: JsValue) -> bool {
    matches_any(url, &js_strings(&entries))
}
