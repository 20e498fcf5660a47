#![allow(clippy::expect_used)]
//! Tests for the event resource.
//!
//! Covers validation responses, CRUD round trips and range listing.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

fn sunday_service() -> serde_json::Value {
    json!({
        "description": "Sunday Service",
        "start_time": "2021-07-18T10:00",
        "end_time": "2021-07-18T11:30",
        "frequency": "Weekly",
        "event_location": "234 Gebroni Road, Raleigh, NC 12345"
    })
}

async fn create(app: &TestApp, body: &serde_json::Value) -> String {
    let created = TestRequest::post("/api/events")
        .json_body(body)
        .send(app)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    created["id"].as_str().expect("id should be a string").to_string()
}

// ============================================================================
// Create
// ============================================================================

/// ## Summary
/// A valid payload is stored and echoed back with its id.
#[test_log::test(tokio::test)]
async fn create_event_returns_created() {
    let app = create_test_service(date(2021, 7, 17));

    let created = TestRequest::post("/api/events")
        .json_body(&sunday_service())
        .send(&app)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(created["description"], "Sunday Service");
    assert_eq!(created["frequency"], "Weekly");
    assert_eq!(created["start_time"], "2021-07-18T10:00:00");
}

/// ## Summary
/// Missing required fields are reported together as a 422.
#[test_log::test(tokio::test)]
async fn create_event_without_fields_is_unprocessable() {
    let app = create_test_service(date(2021, 7, 17));

    let body = TestRequest::post("/api/events")
        .json_body(&json!({ "start_time": "2021-07-18", "end_time": "2021-07-18" }))
        .send(&app)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .json();

    assert_eq!(
        body["error"],
        "Description can't be blank and Event location can't be blank"
    );
}

#[test_log::test(tokio::test)]
async fn create_event_with_unknown_frequency_is_unprocessable() {
    let app = create_test_service(date(2021, 7, 17));
    let mut payload = sunday_service();
    payload["frequency"] = json!("Fortnightly");

    TestRequest::post("/api/events")
        .json_body(&payload)
        .send(&app)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .assert_body_contains("Frequency is not included in the list");
}

#[test_log::test(tokio::test)]
async fn malformed_body_is_bad_request() {
    let app = create_test_service(date(2021, 7, 17));

    TestRequest::post("/api/events")
        .header("Content-Type", "application/json")
        .body("{not json")
        .send(&app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Show / update / delete
// ============================================================================

#[test_log::test(tokio::test)]
async fn show_update_delete_round_trip() {
    let app = create_test_service(date(2021, 7, 17));
    let id = create(&app, &sunday_service()).await;
    let path = format!("/api/events/{id}");

    let shown = TestRequest::get(&path)
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(shown["id"], id.as_str());
    assert_eq!(shown["members"], json!([]));

    let mut changed = sunday_service();
    changed["description"] = json!("Evening Service");
    changed["frequency"] = json!("");
    let updated = TestRequest::put(&path)
        .json_body(&changed)
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["description"], "Evening Service");
    assert_eq!(updated["frequency"], "None");

    TestRequest::delete(&path)
        .send(&app)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    TestRequest::get(&path)
        .send(&app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn unknown_or_malformed_ids_are_not_found() {
    let app = create_test_service(date(2021, 7, 17));

    TestRequest::get("/api/events/0190d4a0-0000-7000-8000-000000000000")
        .send(&app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    TestRequest::get("/api/events/42")
        .send(&app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    TestRequest::delete("/api/events/42")
        .send(&app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn update_with_invalid_payload_keeps_event() {
    let app = create_test_service(date(2021, 7, 17));
    let id = create(&app, &sunday_service()).await;
    let path = format!("/api/events/{id}");

    let mut broken = sunday_service();
    broken["end_time"] = json!("2021-07-17T09:00");
    TestRequest::put(&path)
        .json_body(&broken)
        .send(&app)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .assert_body_contains("End time must be on or after start time");

    let shown = TestRequest::get(&path).send(&app).await.json();
    assert_eq!(shown["end_time"], "2021-07-18T11:30:00");
}

// ============================================================================
// Listing
// ============================================================================

/// ## Summary
/// Without bounds the listing covers the grid of the current month and
/// includes the weekly occurrences inside it.
#[test_log::test(tokio::test)]
async fn list_defaults_to_current_month_grid() {
    let app = create_test_service(date(2021, 7, 17));
    create(&app, &sunday_service()).await;
    create(
        &app,
        &json!({
            "description": "Harvest Festival",
            "start_time": "2021-09-12",
            "end_time": "2021-09-12",
            "event_location": "Fellowship Hall"
        }),
    )
    .await;

    let index = TestRequest::get("/api/events")
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(index["window"]["start"], "2021-06-27");
    assert_eq!(index["window"]["end"], "2021-07-31");
    assert_eq!(index["events"].as_array().map(Vec::len), Some(1));
    assert_eq!(
        occurrence_dates(&index["occurrences"]),
        vec!["2021-07-18", "2021-07-25"]
    );
}

#[test_log::test(tokio::test)]
async fn list_with_range_spans_both_month_grids() {
    let app = create_test_service(date(2021, 7, 17));
    create(&app, &sunday_service()).await;

    let index = TestRequest::get("/api/events?start_time=2021-07-01&end_time=2021-08-20")
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(index["window"]["start"], "2021-06-27");
    assert_eq!(index["window"]["end"], "2021-09-04");
    // The 30-day horizon stops the series after Aug 15.
    assert_eq!(
        occurrence_dates(&index["occurrences"]),
        vec!["2021-07-18", "2021-07-25", "2021-08-01", "2021-08-08", "2021-08-15"]
    );
}

/// ## Summary
/// Occurrences of overlapping series come back in time order, including a
/// series that started before the listed range.
#[test_log::test(tokio::test)]
async fn list_interleaves_occurrences_chronologically() {
    let app = create_test_service(date(2021, 7, 17));
    for (description, start) in [
        ("Vespers", "2021-06-20"),
        ("Thursday prayer", "2021-07-01"),
        ("Friday choir", "2021-07-02"),
    ] {
        create(
            &app,
            &json!({
                "description": description,
                "start_time": start,
                "end_time": start,
                "frequency": "Weekly",
                "event_location": "Chapel"
            }),
        )
        .await;
    }

    let index = TestRequest::get("/api/events")
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(index["events"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        occurrence_dates(&index["occurrences"]),
        vec![
            "2021-06-27", "2021-07-01", "2021-07-02", "2021-07-04", "2021-07-08",
            "2021-07-09", "2021-07-11", "2021-07-15", "2021-07-16", "2021-07-18",
            "2021-07-22", "2021-07-23", "2021-07-29", "2021-07-30",
        ]
    );
}

/// ## Summary
/// Offset timestamps are accepted the same way the calendar accepts them.
#[test_log::test(tokio::test)]
async fn create_event_accepts_rfc3339_times() {
    let app = create_test_service(date(2021, 7, 17));

    let created = TestRequest::post("/api/events")
        .json_body(&json!({
            "description": "Sunrise Service",
            "start_time": "2021-07-18T06:00:00Z",
            "end_time": "2021-07-18T07:00:00+00:00",
            "event_location": "Hilltop"
        }))
        .send(&app)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created["start_time"], "2021-07-18T06:00:00");

    TestRequest::get("/api/calendar?date=2021-07-18T06:00:00Z")
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("Sunrise Service");
}

#[test_log::test(tokio::test)]
async fn list_with_bad_date_is_bad_request() {
    let app = create_test_service(date(2021, 7, 17));

    TestRequest::get("/api/events?start_time=yesterday")
        .send(&app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_body_contains("error");
}
