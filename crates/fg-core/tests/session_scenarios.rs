use fg_core::{
    blocked_reason, decide, should_block, AllowedDomainCache, MemorySink, Mode, NavigationEvent,
    NavigationGuard, NavigationKind, Session, SessionStatus, Verdict,
};

fn active(mode: Mode, urls: &[&str]) -> Session {
    Session::new(mode, urls.iter().copied())
}

fn blocks(url: &str, session: &Session) -> bool {
    let cache = AllowedDomainCache::new();
    should_block(url, Some(session), &cache.snapshot()[..])
}

#[test]
fn deep_work_allowlist_session() {
    let session = Session::from_json(
        r#"{"mode":"allowlist","urls":["https://docs.google.com"],"durationMinutes":25,"status":"active"}"#,
    )
    .unwrap();

    assert!(!blocks("https://docs.google.com/document/d/abc", &session));
    assert!(blocks("https://youtube.com/watch?v=xyz", &session));
    assert!(!blocks("https://localhost:3000/dashboard", &session));
    assert!(!blocks("chrome://settings", &session));
}

#[test]
fn finished_session_stops_enforcing() {
    let session = active(Mode::Allowlist, &[]);
    assert!(blocks("https://anything.com", &session));

    let session = session.with_status(SessionStatus::Completed);
    assert!(!blocks("https://anything.com", &session));
}

#[test]
fn blocklist_with_hostname_and_path_entries() {
    let session = active(Mode::Blocklist, &["reddit.com", "youtube.com/shorts", "www.twitter.com/"]);

    assert!(blocks("https://reddit.com/", &session));
    assert!(blocks("https://old.reddit.com/r/rust?sort=new", &session));
    assert!(blocks("https://youtube.com/shorts/abc", &session));
    assert!(!blocks("https://youtube.com/watch?v=lecture", &session));
    assert!(blocks("https://twitter.com/home", &session));
    assert!(!blocks("https://example.com", &session));
}

#[test]
fn entry_subdomain_of_target_matches_parent() {
    // A listed subdomain also matches its parent host.
    let allow = active(Mode::Allowlist, &["sub.example.com"]);
    assert!(!blocks("https://example.com", &allow));

    let block = active(Mode::Blocklist, &["sub.example.com"]);
    assert!(blocks("https://example.com", &block));
}

#[test]
fn malformed_targets_never_block() {
    for session in [active(Mode::Allowlist, &[]), active(Mode::Blocklist, &["example.com"])] {
        assert!(!blocks("not a url!!", &session));
        assert!(!blocks("", &session));
    }
}

#[test]
fn decision_is_repeatable() {
    let session = active(Mode::Allowlist, &["docs.google.com"]);
    let urls = ["https://docs.google.com/a", "https://news.ycombinator.com", "about:blank"];
    let first: Vec<bool> = urls.iter().map(|u| blocks(u, &session)).collect();
    let second: Vec<bool> = urls.iter().map(|u| blocks(u, &session)).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec![false, true, false]);
}

#[test]
fn guard_replays_a_browsing_session() {
    let cache = AllowedDomainCache::new();
    let sink = MemorySink::new();
    let guard = NavigationGuard::new(&cache, &sink);
    let session = active(Mode::Allowlist, &["docs.google.com"]);

    let events = [
        ("https://docs.google.com/document/d/abc", NavigationKind::Started),
        ("https://youtube.com/", NavigationKind::Started),
        ("https://youtube.com/", NavigationKind::Completed),
        ("https://focusguard.app/session", NavigationKind::Started),
        ("https://youtube.com/", NavigationKind::TabActivated),
    ];

    let verdicts: Vec<bool> = events
        .iter()
        .enumerate()
        .map(|(i, (url, kind))| {
            let event = NavigationEvent {
                url: url.to_string(),
                kind: *kind,
                timestamp_ms: 1_000 + i as u64,
            };
            guard.observe(&event, Some(&session)).is_block()
        })
        .collect();

    assert_eq!(verdicts, vec![false, true, true, false, true]);
    let attempts = sink.attempts();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].url, "https://youtube.com/");
    assert_eq!(attempts[0].timestamp_ms, 1_001);
}

#[test]
fn blocked_verdict_carries_overlay_message() {
    let session = active(Mode::Allowlist, &["docs.google.com"]);
    let cache = AllowedDomainCache::new();
    let verdict = decide("https://youtube.com/watch?v=xyz", Some(&session), &cache.snapshot()[..]);
    assert_eq!(
        verdict,
        Verdict::Block {
            reason: blocked_reason("https://youtube.com/watch?v=xyz", &session),
        }
    );
}

#[test]
fn engine_is_shareable_across_threads() {
    let cache = std::sync::Arc::new(AllowedDomainCache::new());
    let session = std::sync::Arc::new(active(Mode::Blocklist, &["youtube.com"]));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = std::sync::Arc::clone(&cache);
            let session = std::sync::Arc::clone(&session);
            std::thread::spawn(move || should_block("https://youtube.com/", Some(session.as_ref()), &cache.snapshot()[..]))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
