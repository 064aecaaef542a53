#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campus_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Collection fetches ──────────────────────────────────────────────

#[tokio::test]
async fn list_students_parses_collection() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "phone": "5551234567",
                "batchId": 3
            },
            {
                "id": 2,
                "firstName": "Bob",
                "lastName": "Byron",
                "email": "bob@example.com",
                "phone": "5559876543"
            }
        ])))
        .mount(&server)
        .await;

    let students = client.list_students().await.unwrap();

    assert_eq!(students.len(), 2);
    assert_eq!(students[0].first_name, "Ada");
    assert_eq!(students[0].batch_id, Some(3));
    assert_eq!(students[1].batch_id, None);
}

#[tokio::test]
async fn dashboard_metrics_parses_summary() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalStudents": 120,
            "totalTeachers": 8,
            "totalCourses": 5,
            "activeBatches": 6,
            "attendanceRatePct": 91.5,
            "feesCollected": 45000.0,
            "feesPending": 12000.0
        })))
        .mount(&server)
        .await;

    let metrics = client.dashboard_metrics().await.unwrap();

    assert_eq!(metrics.total_students, 120);
    assert_eq!(metrics.attendance_rate_pct, Some(91.5));
}

// ── Mutating verbs ──────────────────────────────────────────────────

#[tokio::test]
async fn create_student_posts_body_and_returns_created() {
    let (server, client) = setup().await;

    let payload = json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "phone": "5551234567"
    });

    Mock::given(method("POST"))
        .and(path("/api/students"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": "5551234567"
        })))
        .mount(&server)
        .await;

    let created = client.create_student(&payload).await.unwrap();

    assert_eq!(created.id, 42);
    assert_eq!(created.last_name, "Lovelace");
}

#[tokio::test]
async fn update_attendance_puts_partial_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/attendance/7"))
        .and(body_json(json!({ "status": "absent" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "studentId": 1,
            "batchId": 3,
            "date": "2026-03-02",
            "status": "absent"
        })))
        .mount(&server)
        .await;

    let updated = client
        .update_attendance(7, &json!({ "status": "absent" }))
        .await
        .unwrap();

    assert_eq!(updated.id, 7);
    assert_eq!(updated.status, "absent");
}

#[tokio::test]
async fn delete_teacher_tolerates_empty_response() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/teachers/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_teacher(3).await.unwrap();
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn non_2xx_becomes_api_error_with_status_and_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let err = client.list_students().await.unwrap_err();

    match err {
        Error::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn not_found_is_detectable() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/teachers/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such teacher"))
        .mount(&server)
        .await;

    let err = client.delete_teacher(99).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn malformed_body_becomes_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.list_students().await.unwrap_err();

    assert!(
        matches!(err, Error::Deserialization { .. }),
        "expected Deserialization error, got: {err:?}"
    );
}
