//! Wire records as the server sends them.
//!
//! Field names follow the server's camelCase JSON; dates stay ISO-8601
//! strings and statuses stay raw strings at this layer. `campus-core`
//! converts these into domain types (chrono dates, typed status enums)
//! at the client boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub batch_id: Option<i64>,
    /// ISO-8601 date the student joined, if recorded.
    #[serde(default)]
    pub joined_on: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRecord {
    pub id: i64,
    pub student_id: i64,
    pub batch_id: i64,
    #[serde(default)]
    pub enrolled_on: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub batch_id: i64,
    /// ISO-8601 date of the session.
    pub date: String,
    /// Raw status string: `"present"`, `"absent"`, or `"late"`.
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecord {
    pub id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub due_date: String,
    #[serde(default)]
    pub paid_on: Option<String>,
    /// Raw status string: `"pending"` or `"paid"`.
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub held_on: String,
    pub max_marks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub marks: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: i64,
    pub sender: String,
    pub recipient: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub body: String,
    /// ISO-8601 timestamp the message was sent.
    pub sent_at: String,
}

/// Precomputed summary from `/api/dashboard/metrics`.
///
/// Treated like any other cached resource by consumers; the server owns
/// the aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRecord {
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_courses: u64,
    pub active_batches: u64,
    #[serde(default)]
    pub attendance_rate_pct: Option<f64>,
    pub fees_collected: f64,
    pub fees_pending: f64,
}
