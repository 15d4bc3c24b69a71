//! Integration tests for the redirect session over parsed pages

use unpaywall_core::{
    Config, Decision, Element, MutationRecord, RedirectSession, RuntimeMessage, SessionState,
    SkipReason,
};

const MEDIUM_STORY: &str = r#"<!DOCTYPE html>
<html>
<head><title>A story</title></head>
<body>
  <article>
    <div class="pw-post-body">
      <div><div><p class="badge">Member-only story</p></div></div>
      <h1>How we rewrote everything</h1>
      <p>Lorem ipsum dolor sit amet.</p>
    </div>
  </article>
</body>
</html>"#;

const FREE_STORY: &str = r#"<!DOCTYPE html>
<html><body><article><h1>Free for all</h1><p>Nothing to see.</p></article></body></html>"#;

#[test]
fn test_member_story_redirects() {
    let mut session = RedirectSession::default();
    let document = Element::parse_document(MEDIUM_STORY);

    let decision = session.evaluate("https://medium.com/@u/post?x=1#y", &document);

    assert_eq!(
        decision,
        Decision::Redirect {
            target: "https://freedium.cfd/https://medium.com/@u/post?x=1&freedium-redirected=1#y"
                .to_string()
        }
    );
}

#[test]
fn test_redirected_page_never_scans() {
    let mut session = RedirectSession::default();
    let document = Element::parse_document(MEDIUM_STORY);

    let decision = session.evaluate("https://medium.com/@u/post?freedium-redirected=1", &document);

    assert_eq!(decision, Decision::Skip(SkipReason::AlreadyRedirected));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_non_whitelisted_domain() {
    let mut session = RedirectSession::default();
    let document = Element::parse_document(MEDIUM_STORY);

    let decision = session.evaluate("https://example.com/@u/post", &document);
    assert_eq!(decision, Decision::Skip(SkipReason::NotWhitelisted));
}

#[test]
fn test_spa_navigation_streams_marker_in() {
    let mut session = RedirectSession::default();
    let location = "https://infosecwriteups.com/some-writeup-123";

    let initial = session.evaluate(location, &Element::parse_document(FREE_STORY));
    assert_eq!(initial, Decision::Skip(SkipReason::NoPaywall));

    let first = [MutationRecord::from_html("<nav><span>Home</span></nav>")];
    assert!(!session.process_mutations(location, &first).is_redirect());

    let second = [
        MutationRecord::from_html("<div><span>Member-only story</span></div>"),
        MutationRecord::from_html("<div><span>Member-only story</span></div>"),
    ];
    let decision = session.process_mutations(location, &second);
    assert!(decision.is_redirect());

    let third = [MutationRecord::from_html("<p>Member-only story</p>")];
    assert_eq!(
        session.process_mutations(location, &third),
        Decision::Skip(SkipReason::AlreadyAttempted)
    );
}

#[test]
fn test_whitelist_push_between_batches() {
    let mut session = RedirectSession::default();
    let location = "https://blog.example.org/post";
    let batch = [MutationRecord::from_html("<div><p>Member-only story</p></div>")];

    assert_eq!(
        session.process_mutations(location, &batch),
        Decision::Skip(SkipReason::NotWhitelisted)
    );

    let message =
        RuntimeMessage::from_json(r#"{"action":"updateWhitelist","whitelist":["example.org"]}"#)
            .unwrap();
    session.apply_message(message);

    assert!(session.process_mutations(location, &batch).is_redirect());
}

#[test]
fn test_session_from_config() {
    let config = Config::from_toml(
        r#"
[whitelist]
domains = ["example.org"]

[redirect]
proxy_origin = "https://mirror.example/"
flag_param = "seen"
"#,
    )
    .unwrap();

    let mut session = RedirectSession::from_config(&config);
    let document = Element::parse_document(MEDIUM_STORY);

    assert_eq!(
        session.evaluate("https://medium.com/p", &document),
        Decision::Skip(SkipReason::NotWhitelisted)
    );
    assert_eq!(
        session.evaluate("https://example.org/p?seen=1", &document),
        Decision::Skip(SkipReason::AlreadyRedirected)
    );
    assert_eq!(
        session.evaluate("https://example.org/p", &document).target(),
        Some("https://mirror.example/https://example.org/p?seen=1")
    );
}

#[test]
fn test_independent_sessions() {
    let document = Element::parse_document(MEDIUM_STORY);
    let mut first = RedirectSession::default();
    let mut second = RedirectSession::default();

    assert!(first.evaluate("https://medium.com/a", &document).is_redirect());
    assert!(second.evaluate("https://medium.com/a", &document).is_redirect());
}
