//! End-to-end tests: upstream feed simulated with wiremock, API served on a
//! local port.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use livescore_feed::api::{self, ApiState};
use livescore_feed::config::UpstreamConfig;
use livescore_feed::data::enrichment::{
    HANDICAP_LADDER, KEY_MAGNITUDE, OVER_UNDER_LADDER, POSSESSION_HOME,
};
use livescore_feed::data::feed::{FallbackReason, MatchFeed, Origin};
use livescore_feed::data::sofascore::SofascoreSource;
use livescore_feed::data::synthetic::SyntheticRoster;
use livescore_feed::models::{is_live_status, Match};

const EVENTS_PATH: &str = r"^/api/v1/sport/football/scheduled-events/\d{4}-\d{2}-\d{2}$";
const TEST_USER_AGENT: &str = "Mozilla/5.0 (livescore test)";

fn feed_for(base_url: &str, timeout_seconds: u64) -> MatchFeed {
    let config = UpstreamConfig {
        base_url: base_url.to_string(),
        timeout_seconds,
        user_agent: TEST_USER_AGENT.to_string(),
        max_events: None,
    };
    let source = SofascoreSource::new(&config).expect("client should build");
    MatchFeed::new(
        Box::new(source),
        SyntheticRoster::default(),
        Duration::from_secs(timeout_seconds),
    )
}

fn event(home: &str, away: &str, status: &str) -> Value {
    json!({
        "tournament": {"name": "Premier League"},
        "homeTeam": {"name": home},
        "awayTeam": {"name": away},
        "homeScore": {"current": "-"},
        "awayScore": {"current": "-"},
        "status": {"description": status},
        "startTimestamp": 1_760_000_000
    })
}

async fn upstream_with(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(EVENTS_PATH))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

fn assert_invariants(matches: &[Match]) {
    assert!(!matches.is_empty());
    for m in matches {
        assert_eq!(m.is_live(), is_live_status(m.status()));
        if !m.is_live() && m.status() == "Scheduled" {
            assert_eq!(m.fixture.home_score, None);
            assert_eq!(m.fixture.away_score, None);
        }

        let e = &m.enrichment;
        assert!(HANDICAP_LADDER.contains(&e.handicap_line));
        assert!(OVER_UNDER_LADDER.contains(&e.over_under_line));
        let home = e.possession_home.expect("possession present");
        let away = e.possession_away.expect("possession present");
        assert!(POSSESSION_HOME.contains(&home));
        assert_eq!(u32::from(home) + u32::from(away), 100);
        assert!(KEY_MAGNITUDE.contains(&e.key_home.expect("key present").abs()));
        assert!(KEY_MAGNITUDE.contains(&e.key_away.expect("key present").abs()));
        assert_eq!(e.predicted_score.len(), 3);
    }
}

// ──────────────────────────────────────────
// Acquisition
// ──────────────────────────────────────────

#[tokio::test]
async fn upstream_events_are_normalized_and_enriched() {
    let events = vec![
        event("Arsenal", "Chelsea", "1st half"),
        event("Everton", "Fulham", "Scheduled"),
        event("Brighton", "Wolves", "Halftime"),
    ];
    let server = upstream_with(ResponseTemplate::new(200).set_body_json(json!({"events": events}))).await;

    let report = feed_for(&server.uri(), 5).acquire_report().await.unwrap();

    assert!(!report.is_fallback());
    assert_eq!(report.matches.len(), 3);
    assert_eq!(report.matches[0].fixture.home_team, "Arsenal");
    assert!(report.matches[0].is_live());
    assert!(!report.matches[1].is_live());
    assert_invariants(&report.matches);
}

#[tokio::test]
async fn request_carries_browser_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(EVENTS_PATH))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"events": [event("Ajax", "PSV", "Live")]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let report = feed_for(&server.uri(), 5).acquire_report().await.unwrap();
    assert!(!report.is_fallback());
    assert_eq!(report.matches.len(), 1);
}

#[tokio::test]
async fn empty_events_fall_back_to_roster() {
    let server = upstream_with(ResponseTemplate::new(200).set_body_json(json!({"events": []}))).await;

    let report = feed_for(&server.uri(), 5).acquire_report().await.unwrap();

    match &report.origin {
        Origin::Fallback(FallbackReason::Fetch(e)) => assert_eq!(e.class(), "empty"),
        other => panic!("expected empty fallback, got {other:?}"),
    }
    assert_eq!(report.matches.len(), 20);
    assert_invariants(&report.matches);
}

#[tokio::test]
async fn malformed_body_falls_back() {
    let server = upstream_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>")).await;

    let report = feed_for(&server.uri(), 5).acquire_report().await.unwrap();

    match &report.origin {
        Origin::Fallback(FallbackReason::Fetch(e)) => assert_eq!(e.class(), "parse"),
        other => panic!("expected parse fallback, got {other:?}"),
    }
    assert_eq!(report.matches.len(), 20);
}

#[tokio::test]
async fn server_error_falls_back() {
    let server = upstream_with(ResponseTemplate::new(503)).await;

    let report = feed_for(&server.uri(), 5).acquire_report().await.unwrap();

    match &report.origin {
        Origin::Fallback(FallbackReason::Fetch(e)) => assert_eq!(e.class(), "transport"),
        other => panic!("expected transport fallback, got {other:?}"),
    }
    assert_eq!(report.matches.len(), 20);
}

#[tokio::test]
async fn slow_upstream_times_out_to_roster() {
    let server = upstream_with(
        ResponseTemplate::new(200)
            .set_body_json(json!({"events": [event("Ajax", "PSV", "Live")]}))
            .set_delay(Duration::from_secs(4)),
    )
    .await;

    let report = feed_for(&server.uri(), 1).acquire_report().await.unwrap();

    match &report.origin {
        Origin::Fallback(FallbackReason::Fetch(e)) => assert_eq!(e.class(), "transport"),
        other => panic!("expected timeout fallback, got {other:?}"),
    }
    assert_eq!(report.matches.len(), 20);
    assert_invariants(&report.matches);
}

#[tokio::test]
async fn unreachable_upstream_still_returns_matches() {
    // Nothing listens on port 9 locally
    let matches = feed_for("http://127.0.0.1:9", 2).acquire().await.unwrap();
    assert_eq!(matches.len(), 20);
    assert_invariants(&matches);
}

#[tokio::test]
async fn placeholder_score_and_missing_tournament() {
    let mut no_tournament = event("Milan", "Roma", "2nd half");
    no_tournament.as_object_mut().unwrap().remove("tournament");
    no_tournament["homeScore"] = json!({"current": 1});
    no_tournament["awayScore"] = json!({"current": 0});

    let mut dash = event("Porto", "Benfica", "Live");
    dash["awayScore"] = json!({"current": 2});

    let server = upstream_with(
        ResponseTemplate::new(200).set_body_json(json!({"events": [dash, no_tournament]})),
    )
    .await;

    let matches = feed_for(&server.uri(), 5).acquire().await.unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].fixture.home_score, None);
    assert_eq!(matches[0].fixture.away_score, Some(2));
    assert_eq!(matches[1].fixture.league.as_deref(), Some("Unknown League"));
    assert_eq!(matches[1].fixture.home_score, Some(1));
}

#[tokio::test]
async fn bad_events_are_skipped_not_fatal() {
    let server = upstream_with(ResponseTemplate::new(200).set_body_json(json!({
        "events": [event("Celtic", "Rangers", "Scheduled"), "junk", {"homeTeam": null}]
    })))
    .await;

    let report = feed_for(&server.uri(), 5).acquire_report().await.unwrap();

    assert!(!report.is_fallback());
    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.skipped, 2);
}

// ──────────────────────────────────────────
// HTTP API
// ──────────────────────────────────────────

async fn spawn_api(feed: MatchFeed) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(api::serve(listener, ApiState::new(feed)));
    format!("http://{addr}")
}

#[tokio::test]
async fn matches_endpoint_wraps_list_in_envelope() {
    let base = spawn_api(feed_for("http://127.0.0.1:9", 1)).await;

    let response = reqwest::get(format!("{base}/api/matches")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 20);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 20);
    for m in data {
        assert!(m["home_team"].is_string());
        assert!(m["kickoff_time"].is_string());
        assert!(m["is_live"].is_boolean());
        assert!(m["handicap_line"].is_number());
        assert!(m["predicted_score"].is_string());
    }
}

#[tokio::test]
async fn matches_endpoint_reports_internal_fault() {
    let config = UpstreamConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_seconds: 1,
        ..UpstreamConfig::default()
    };
    let feed = MatchFeed::new(
        Box::new(SofascoreSource::new(&config).unwrap()),
        SyntheticRoster::with_catalog(Vec::new(), 0.2),
        Duration::from_secs(1),
    );
    let base = spawn_api(feed).await;

    let response = reqwest::get(format!("{base}/api/matches")).await.unwrap();
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("roster"));
}

#[tokio::test]
async fn stats_endpoint_is_fixed() {
    let base = spawn_api(feed_for("http://127.0.0.1:9", 1)).await;

    let body: Value = reqwest::get(format!("{base}/api/stats"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["win_rate"], 87);
    assert_eq!(body["total_predictions"], 1247);
    assert_eq!(body["vip_members"], 152);
    assert_eq!(body["win_streak"], 9);
}
