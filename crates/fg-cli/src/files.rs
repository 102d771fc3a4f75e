use std::fs;

use fg_core::{NavigationEvent, Session};

pub fn read_text(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path, e))
}

pub fn read_session(path: &str) -> Result<Session, String> {
    let text = read_text(path)?;
    Session::from_json(&text).map_err(|e| format!("'{}': {}", path, e))
}

pub fn read_events(path: &str) -> Result<Vec<NavigationEvent>, String> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|e| format!("Invalid navigation events in '{}': {}", path, e))
}
