// Integration tests for `ResyClient` using wiremock.
#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tablewatch_api::{Error, ResyClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ResyClient) {
    let server = MockServer::start().await;
    let client = ResyClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_venue_calendar_query_and_parse() {
    let (server, client) = setup().await;

    let body = json!({
        "scheduled": [
            { "date": "2025-01-10", "inventory": { "reservation": "available" } },
            { "date": "2025-01-11", "inventory": { "reservation": "sold-out" } },
            { "date": "2025-01-12", "inventory": {} },
        ]
    });

    Mock::given(method("GET"))
        .and(path("/venue/calendar"))
        .and(query_param("venue_id", "551"))
        .and(query_param("num_seats", "2"))
        .and(query_param("start_date", "2025-01-01"))
        .and(query_param("end_date", "2025-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let calendar = client
        .venue_calendar(551, 2, date("2025-01-01"), date("2025-01-31"))
        .await
        .unwrap();

    assert_eq!(calendar.scheduled.len(), 3);
    assert!(calendar.scheduled[0].is_available());
    assert!(!calendar.scheduled[1].is_available());
    assert!(!calendar.scheduled[2].is_available());
}

#[tokio::test]
async fn test_find_slots_query_and_parse() {
    let (server, client) = setup().await;

    let body = json!({
        "results": {
            "venues": [{
                "slots": [
                    { "date": { "start": "2025-01-10 18:00:00" }, "config": { "type": "Dining Room" } },
                    { "date": { "start": "2025-01-10 19:30:00" }, "config": { "type": "Patio" } },
                ]
            }]
        }
    });

    Mock::given(method("GET"))
        .and(path("/find"))
        .and(query_param("lat", "0"))
        .and(query_param("long", "0"))
        .and(query_param("day", "2025-01-10"))
        .and(query_param("party_size", "2"))
        .and(query_param("venue_id", "551"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let found = client.find_slots(551, date("2025-01-10"), 2).await.unwrap();

    let slots = found.first_venue_slots();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].date.start, "2025-01-10 18:00:00");
    assert_eq!(slots[1].config.seating_type, "Patio");
}

#[tokio::test]
async fn test_base_url_with_version_segment() {
    let (server, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/4/find"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client =
        ResyClient::from_reqwest(&format!("{}/4", server.uri()), reqwest::Client::new()).unwrap();
    let found = client.find_slots(551, date("2025-01-10"), 2).await.unwrap();

    assert!(found.first_venue_slots().is_empty());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_500_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client
        .venue_calendar(551, 2, date("2025-01-01"), date("2025-01-31"))
        .await;

    match result {
        Err(Error::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_401_is_auth() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client
        .find_slots(551, date("2025-01-10"), 2)
        .await
        .unwrap_err();

    assert!(err.is_auth(), "expected auth error, got: {err:?}");
}

#[tokio::test]
async fn test_error_non_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client
        .find_slots(551, date("2025-01-10"), 2)
        .await
        .unwrap_err();

    match err {
        Error::Deserialization { body, .. } => assert!(body.contains("maintenance")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
