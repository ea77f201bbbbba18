//! HTTP sources against a mock backend.

use chrono::{FixedOffset, NaiveDate};
use serde_json::json;
use wiremock::matchers::{
    body_partial_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meetsync_client::{AvailabilityOverlay, MeetsyncClient};
use meetsync_core::calendar::{DateRange, EventDraft, EventId, RemoteId, UNTITLED_EVENT};
use meetsync_core::recommend::CalculationStatus;
use meetsync_core::source::{CalendarSource, RecommendationSource};

fn tokyo() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn client(server: &MockServer) -> MeetsyncClient {
    MeetsyncClient::new(server.uri())
        .with_credential(Some("secret".to_string()))
        .with_offset(tokyo())
}

fn december() -> DateRange {
    DateRange::month(2025, 12).unwrap()
}

#[tokio::test]
async fn test_load_follows_pages_and_normalizes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendar/events"))
        .and(header("authorization", "Bearer secret"))
        .and(query_param("time_min", "2025-12-01T00:00:00+09:00"))
        .and(query_param("time_max", "2025-12-31T23:59:59+09:00"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [
                {
                    "id": "e1",
                    "summary": "Standup",
                    "start": {"dateTime": "2025-12-10T09:00:00+09:00"},
                    "end": {"dateTime": "2025-12-10T09:30:00+09:00"}
                },
                {"id": "e2", "start": {"date": "2025-12-11"}},
                {"id": "e3", "summary": "No start"}
            ],
            "nextPageToken": "p2"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/calendar/events"))
        .and(query_param("page_token", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [{
                "id": "e4",
                "summary": "Offsite",
                "start": {"date": "2025-12-12"},
                "end": {"date": "2025-12-14"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut overlay = AvailabilityOverlay::new(client(&server));
    let loaded = overlay.load_base(december()).await.unwrap();

    assert_eq!(loaded, 3);
    let base = overlay.base();
    assert_eq!(base[0].title, "Standup");
    assert!(!base[0].all_day);
    assert_eq!(base[1].title, UNTITLED_EVENT);
    assert!(base[1].all_day);
    assert_eq!(
        base[1].end.date(),
        NaiveDate::from_ymd_opt(2025, 12, 12).unwrap()
    );
    assert_eq!(base[2].id, EventId::Remote(RemoteId::new("e4")));
}

#[tokio::test]
async fn test_unauthorized_clears_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendar/events"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"code": "google_reauth_required"})),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let error = client.list_events(december(), None).await.unwrap_err();

    assert!(error.requires_reauth());
    assert!(!client.has_credential().await);
}

#[tokio::test]
async fn test_insufficient_scope_is_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/calendar/events"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"detail": "insufficient_scope"})),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let draft = EventDraft::all_day(
        "Trip",
        NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
        NaiveDate::from_ymd_opt(2025, 12, 21).unwrap(),
    );
    let error = client.create_event(&draft).await.unwrap_err();

    assert!(error.requires_reauth());
}

#[tokio::test]
async fn test_server_error_is_transient_and_keeps_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendar/events"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = client(&server);
    let error = client.list_events(december(), None).await.unwrap_err();

    assert!(error.is_retryable());
    assert_eq!(error.status(), Some(503));
    assert!(client.has_credential().await);
}

#[tokio::test]
async fn test_missing_credential_never_calls_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = MeetsyncClient::new(server.uri());
    let error = client.list_events(december(), None).await.unwrap_err();

    assert!(error.requires_reauth());
}

#[tokio::test]
async fn test_create_sends_instants_in_offset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/calendar/events"))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(json!({
            "summary": "Lunch",
            "start": {"dateTime": "2025-12-10T12:00:00+09:00"},
            "end": {"dateTime": "2025-12-10T13:00:00+09:00"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "new-1",
            "summary": "Lunch",
            "start": {"dateTime": "2025-12-10T12:00:00+09:00"},
            "end": {"dateTime": "2025-12-10T13:00:00+09:00"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let day = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
    let draft = EventDraft::timed(
        "Lunch",
        day.and_hms_opt(12, 0, 0).unwrap(),
        day.and_hms_opt(13, 0, 0).unwrap(),
    );
    let created = client(&server).create_event(&draft).await.unwrap();

    assert_eq!(created.id, EventId::Remote(RemoteId::new("new-1")));
    assert_eq!(created.start, draft.start);
}

#[tokio::test]
async fn test_delete_of_missing_event_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/calendar/events/abc%40google.com"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .delete_event(&RemoteId::new("abc@google.com"))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_optimal_times_decode_to_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/appointments/inv-1/optimal-times"))
        .and(query_param("min_duration_minutes", "60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appointment_name": "Team dinner",
            "total_participants": 3,
            "calculation_status": "complete",
            "optimal_times": [
                {
                    "date": "2025-12-10",
                    "start_time": "10:00",
                    "end_time": "12:00",
                    "duration_minutes": 120,
                    "participant_count": 3,
                    "total_participants": 3
                },
                {
                    "date": "2025-12-11",
                    "start_time": "14:00",
                    "end_time": "13:00"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let set = client(&server).candidates("inv-1", 60).await.unwrap();

    assert_eq!(set.appointment_name.as_deref(), Some("Team dinner"));
    assert_eq!(set.status, CalculationStatus::Complete);
    assert_eq!(set.intervals.len(), 1);
    assert_eq!(set.intervals[0].duration_minutes(), 120);
}
