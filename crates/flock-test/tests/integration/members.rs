#![allow(clippy::expect_used)]
//! Tests for member management and roster import.

use salvo::http::StatusCode;
use serde_json::{Value, json};

use super::helpers::*;

fn roster(rows: &[Value]) -> Value {
    let mut sheet = vec![json!(["Grace Fellowship"]), json!([]), json!([]), json!([])];
    sheet.push(json!(["First Name", "Last Name", "Email", "Phone"]));
    sheet.extend(rows.iter().cloned());
    json!({ "rows": sheet })
}

#[test_log::test(tokio::test)]
async fn import_then_list_members() {
    let app = create_test_service(date(2021, 7, 1));

    let outcome = TestRequest::post("/api/members/import")
        .json_body(&roster(&[
            json!(["Ruth", "Moabite", "ruth@example.org", 5_550_100]),
            json!(["Boaz", "Bethlehem", null, null]),
        ]))
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["imported"], 2);

    let members = TestRequest::get("/api/members")
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let names: Vec<_> = members
        .as_array()
        .expect("members should be an array")
        .iter()
        .map(|m| m["first_name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["Boaz", "Ruth"]);
    assert_eq!(members[1]["phone"], "5550100");
}

/// ## Summary
/// One bad row rejects the whole sheet and names the spreadsheet row.
#[test_log::test(tokio::test)]
async fn invalid_row_rejects_import() {
    let app = create_test_service(date(2021, 7, 1));

    let outcome = TestRequest::post("/api/members/import")
        .json_body(&roster(&[
            json!(["Ruth", "Moabite", "", ""]),
            json!(["Naomi", "", "naomi-at-example", ""]),
        ]))
        .send(&app)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .json();

    assert_eq!(outcome["success"], false);
    assert_eq!(
        outcome["row_errors"],
        json!(["Row 7: Last name can't be blank", "Row 7: Email is invalid"])
    );
    let members = TestRequest::get("/api/members").send(&app).await.json();
    assert_eq!(members, json!([]));
}

#[test_log::test(tokio::test)]
async fn import_without_rows_field_is_bad_request() {
    let app = create_test_service(date(2021, 7, 1));

    TestRequest::post("/api/members/import")
        .json_body(&json!({ "sheet": [] }))
        .send(&app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

/// ## Summary
/// Members assigned to an event are listed on the event page.
#[test_log::test(tokio::test)]
async fn event_shows_assigned_members() {
    let app = create_test_service(date(2021, 7, 1));
    TestRequest::post("/api/members/import")
        .json_body(&roster(&[json!(["Ruth", "Moabite", "", ""])]))
        .send(&app)
        .await
        .assert_status(StatusCode::OK);
    let members = TestRequest::get("/api/members").send(&app).await.json();
    let ruth_id = members[0]["id"].clone();

    let created = TestRequest::post("/api/events")
        .json_body(&json!({
            "description": "Choir",
            "start_time": "2021-07-08T19:00",
            "end_time": "2021-07-08T20:00",
            "event_location": "Choir Loft",
            "member_ids": [ruth_id]
        }))
        .send(&app)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let id = created["id"].as_str().expect("id should be a string");
    let shown = TestRequest::get(&format!("/api/events/{id}")).send(&app).await.json();
    assert_eq!(shown["members"][0]["first_name"], "Ruth");
}

// ============================================================================
// Single members
// ============================================================================

/// ## Summary
/// A member can be created, shown, updated and deleted on its own.
#[test_log::test(tokio::test)]
async fn member_crud_round_trip() {
    let app = create_test_service(date(2021, 7, 1));

    let created = TestRequest::post("/api/members")
        .json_body(&json!({ "first_name": "Naomi", "last_name": "Bethlehem" }))
        .send(&app)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let id = created["id"].as_str().expect("id should be a string");
    let path = format!("/api/members/{id}");

    TestRequest::get(&path)
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("Naomi");

    let updated = TestRequest::put(&path)
        .json_body(&json!({
            "first_name": "Mara",
            "last_name": "Bethlehem",
            "email": "mara@example.org"
        }))
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["email"], "mara@example.org");

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
async fn invalid_member_is_unprocessable() {
    let app = create_test_service(date(2021, 7, 1));

    TestRequest::post("/api/members")
        .json_body(&json!({ "first_name": "Naomi", "email": "nowhere" }))
        .send(&app)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .assert_body_contains("Last name can't be blank and Email is invalid");

    let members = TestRequest::get("/api/members").send(&app).await.json();
    assert_eq!(members, json!([]));
}

#[test_log::test(tokio::test)]
async fn unknown_or_malformed_member_ids_are_not_found() {
    let app = create_test_service(date(2021, 7, 1));

    TestRequest::get("/api/members/not-a-uuid")
        .send(&app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    TestRequest::put("/api/members/0190aa3c-0000-7000-8000-000000000000")
        .json_body(&json!({ "first_name": "Ruth", "last_name": "Moabite" }))
        .send(&app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// Deleting a member removes it from the events it was assigned to.
#[test_log::test(tokio::test)]
async fn deleted_member_leaves_events() {
    let app = create_test_service(date(2021, 7, 1));
    let ruth = TestRequest::post("/api/members")
        .json_body(&json!({ "first_name": "Ruth", "last_name": "Moabite" }))
        .send(&app)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let event = TestRequest::post("/api/events")
        .json_body(&json!({
            "description": "Gleaning",
            "start_time": "2021-07-08T07:00",
            "end_time": "2021-07-08T12:00",
            "event_location": "Field of Boaz",
            "member_ids": [ruth["id"].clone()]
        }))
        .send(&app)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let ruth_id = ruth["id"].as_str().expect("id should be a string");
    TestRequest::delete(&format!("/api/members/{ruth_id}"))
        .send(&app)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let event_id = event["id"].as_str().expect("id should be a string");
    let shown = TestRequest::get(&format!("/api/events/{event_id}"))
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(shown["member_ids"], json!([]));
    assert_eq!(shown["members"], json!([]));
}
