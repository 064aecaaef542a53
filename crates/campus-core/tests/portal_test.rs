#![allow(clippy::unwrap_used)]
// End-to-end scenarios for `Portal` against a wiremock server: the full
// fetch → mutate → invalidate → refetch loop that every dashboard page
// relies on.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campus_core::{
    AttendanceStatus, NewStudent, Portal, PortalConfig, RecordId,
};

fn portal_for(server: &MockServer) -> Portal {
    let config = PortalConfig::from_url_str(&server.uri()).unwrap();
    Portal::new(&config).unwrap()
}

fn bob() -> serde_json::Value {
    json!({
        "id": 1,
        "firstName": "Bob",
        "lastName": "Byron",
        "email": "bob@example.com",
        "phone": "5559876543"
    })
}

fn ada() -> serde_json::Value {
    json!({
        "id": 2,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "phone": "5551234567"
    })
}

// ── Create-then-list ────────────────────────────────────────────────

#[tokio::test]
async fn created_student_appears_in_post_invalidation_list() {
    let server = MockServer::start().await;

    // First fetch sees only Bob; every fetch after the create sees Ada too.
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([bob()])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([bob(), ada()])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/students"))
        .and(body_json(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": "5551234567"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(ada()))
        .mount(&server)
        .await;

    let portal = portal_for(&server);

    let mut students = portal.students();
    let before = students.ready().await.unwrap();
    assert_eq!(before.len(), 1);

    let created = portal
        .create_student(NewStudent {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "5551234567".into(),
            batch_id: None,
            joined_on: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, RecordId::new(2));

    // The mutation's invalidation scheduled a refetch before returning.
    assert!(students.snapshot().is_fetching);

    let after = students.settled().await.data.unwrap();
    assert!(
        after
            .iter()
            .any(|s| s.id == created.id
                && s.first_name == "Ada"
                && s.email == "ada@example.com"),
        "refetched list must include the created student"
    );
}

// ── Status update round-trip ────────────────────────────────────────

#[tokio::test]
async fn attendance_status_update_round_trips() {
    let server = MockServer::start().await;

    let record = |status: &str| {
        json!({
            "id": 7,
            "studentId": 1,
            "batchId": 3,
            "date": "2026-03-02",
            "status": status
        })
    };

    Mock::given(method("GET"))
        .and(path("/api/attendance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record("present")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/attendance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record("absent")])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/attendance/7"))
        .and(body_json(json!({ "status": "absent" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(record("absent")))
        .mount(&server)
        .await;

    let portal = portal_for(&server);

    let mut attendance = portal.attendance();
    let before = attendance.ready().await.unwrap();
    assert_eq!(before[0].status, AttendanceStatus::Present);

    portal
        .set_attendance_status(RecordId::new(7), AttendanceStatus::Absent)
        .await
        .unwrap();

    let after = attendance.settled().await.data.unwrap();
    let updated = after
        .iter()
        .find(|r| r.id == RecordId::new(7))
        .expect("record 7 still present");
    assert_eq!(updated.status, AttendanceStatus::Absent);
    // All other fields unchanged.
    assert_eq!(updated.student_id, before[0].student_id);
    assert_eq!(updated.batch_id, before[0].batch_id);
    assert_eq!(updated.date, before[0].date);
}

// ── Delete removes from subsequent fetch ────────────────────────────

#[tokio::test]
async fn deleted_teacher_disappears_from_refetched_collection() {
    let server = MockServer::start().await;

    let teacher = |id: i64| {
        json!({
            "id": id,
            "firstName": format!("T{id}"),
            "lastName": "Staff",
            "email": format!("t{id}@example.com"),
            "phone": "5550000000"
        })
    };

    Mock::given(method("GET"))
        .and(path("/api/teachers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([teacher(1), teacher(3)])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/teachers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([teacher(1)])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/teachers/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let portal = portal_for(&server);

    let mut teachers = portal.teachers();
    assert_eq!(teachers.ready().await.unwrap().len(), 2);

    portal.delete_teacher(RecordId::new(3)).await.unwrap();

    let after = teachers.settled().await.data.unwrap();
    assert!(!after.iter().any(|t| t.id == RecordId::new(3)));
    assert_eq!(after.len(), 1);
}

// ── Validation short-circuits before the network ────────────────────

#[tokio::test]
async fn invalid_input_never_reaches_the_server() {
    // No POST mock is mounted: any request would fail with a 404 API
    // error, so a Validation error proves the call never went out.
    let server = MockServer::start().await;
    let portal = portal_for(&server);

    let err = portal
        .create_student(NewStudent {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "not-an-email".into(),
            phone: "5551234567".into(),
            batch_id: None,
            joined_on: None,
        })
        .await
        .unwrap_err();

    assert!(err.is_validation(), "expected Validation, got: {err:?}");
}

// ── Deduplication through the portal ────────────────────────────────

#[tokio::test]
async fn simultaneous_subscriptions_hit_the_server_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([bob()])))
        .expect(1)
        .mount(&server)
        .await;

    let portal = portal_for(&server);

    let mut first = portal.students();
    let mut second = portal.students();

    let a = first.ready().await.unwrap();
    let b = second.ready().await.unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);

    // MockServer verifies the expect(1) bound on drop.
}
