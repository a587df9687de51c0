use std::time::Duration;

use roster_ingest::testing::{RecordingSleeper, ScriptedTransport};
use roster_ingest::{FetchError, SourceFetcher, TransportResponse};
use roster_model::{Catalog, FetchOptions, Organization, SourceKind};

const DEPTH_URL: &str = "https://www.espn.com/nfl/team/depth/_/name/buf";
const ROSTER_URL: &str = "https://www.espn.com/nfl/team/roster/_/name/buf";
const API_BY_ID: &str = "https://site.api.espn.com/apis/site/v2/sports/football/nfl/teams/2/roster";
const API_BY_SLUG: &str =
    "https://site.api.espn.com/apis/site/v2/sports/football/nfl/teams/buf/roster";
const TABLE: &str = "<table><tr><th>QB</th></tr><tr><td>Josh Allen</td></tr></table>";

fn buf() -> Organization {
    Catalog::standard().get("BUF").copied().unwrap()
}

fn fetcher(
    transport: &ScriptedTransport,
    sleeper: &RecordingSleeper,
) -> SourceFetcher<ScriptedTransport, RecordingSleeper> {
    SourceFetcher::new(transport.clone(), sleeper.clone(), &FetchOptions::default())
}

#[test]
fn two_failures_then_success_surfaces_no_failure() {
    let transport = ScriptedTransport::new()
        .timeouts(DEPTH_URL, 1)
        .respond(
            DEPTH_URL,
            Ok(TransportResponse {
                status: 503,
                body: String::new(),
            }),
        )
        .ok(DEPTH_URL, TABLE);
    let sleeper = RecordingSleeper::new();

    let payload = fetcher(&transport, &sleeper)
        .fetch(&buf(), SourceKind::Primary)
        .unwrap();

    assert_eq!(payload.attempts, 3);
    assert_eq!(payload.endpoint, "depth_chart");
    assert_eq!(payload.body, TABLE);
    assert_eq!(
        sleeper.recorded(),
        vec![Duration::from_millis(1000), Duration::from_millis(2000)]
    );
}

#[test]
fn exhausted_endpoints_surface_failure_with_total_attempts() {
    let transport = ScriptedTransport::new()
        .timeouts(API_BY_ID, 3)
        .timeouts(API_BY_SLUG, 3);
    let sleeper = RecordingSleeper::new();

    let failure = fetcher(&transport, &sleeper)
        .fetch(&buf(), SourceKind::Secondary)
        .unwrap_err();

    assert_eq!(failure.organization, "BUF");
    assert_eq!(failure.source_kind, SourceKind::Secondary);
    assert_eq!(failure.attempts, 6);
    assert!(matches!(failure.last_error, FetchError::Timeout { ref url } if url == API_BY_SLUG));
    // no pause after the last attempt of an endpoint
    assert_eq!(sleeper.recorded().len(), 4);
}

#[test]
fn malformed_body_is_retried() {
    let transport = ScriptedTransport::new()
        .ok(DEPTH_URL, "<html>maintenance</html>")
        .ok(DEPTH_URL, TABLE);
    let sleeper = RecordingSleeper::new();

    let payload = fetcher(&transport, &sleeper)
        .fetch(&buf(), SourceKind::Primary)
        .unwrap();

    assert_eq!(payload.attempts, 2);
    assert_eq!(transport.request_count(DEPTH_URL), 2);
}

#[test]
fn falls_back_to_roster_page_when_depth_chart_is_down() {
    let transport = ScriptedTransport::new()
        .timeouts(DEPTH_URL, 3)
        .ok(ROSTER_URL, TABLE);
    let sleeper = RecordingSleeper::new();

    let payload = fetcher(&transport, &sleeper)
        .fetch(&buf(), SourceKind::Primary)
        .unwrap();

    assert_eq!(payload.endpoint, "roster_page");
    assert_eq!(payload.url, ROSTER_URL);
    assert_eq!(payload.attempts, 1);
}

#[test]
fn empty_extraction_moves_to_next_endpoint_without_retry() {
    let transport = ScriptedTransport::new()
        .ok(API_BY_ID, r#"{"athletes":[]}"#)
        .ok(API_BY_SLUG, r#"{"athletes":[{"displayName":"A"}]}"#);
    let sleeper = RecordingSleeper::new();

    let endpoint = fetcher(&transport, &sleeper)
        .fetch_until(&buf(), SourceKind::Secondary, |payload| {
            payload.body.contains("displayName").then_some(payload.endpoint)
        })
        .unwrap();

    assert_eq!(endpoint, "roster_api_by_slug");
    assert_eq!(transport.requests(), vec![API_BY_ID.to_string(), API_BY_SLUG.to_string()]);
    assert!(sleeper.recorded().is_empty());
}

#[test]
fn invalid_request_is_not_retried() {
    let transport = ScriptedTransport::new()
        .respond(DEPTH_URL, Err(FetchError::InvalidRequest("bad".to_string())))
        .ok(ROSTER_URL, TABLE);
    let sleeper = RecordingSleeper::new();

    let payload = fetcher(&transport, &sleeper)
        .fetch(&buf(), SourceKind::Primary)
        .unwrap();

    assert_eq!(transport.request_count(DEPTH_URL), 1);
    assert_eq!(payload.endpoint, "roster_page");
    assert!(sleeper.recorded().is_empty());
}
