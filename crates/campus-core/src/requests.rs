// ── Mutation payloads ──
//
// Serializable bodies for every create/update call, spelled in the
// server's camelCase. Update payloads are partial: only present fields
// are serialized, so a `PUT` changes exactly the listed fields.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{AttendanceStatus, FeeStatus, RecordId};

// ── Students ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<RecordId>,
}

// ── Teachers ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

// ── Courses ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<RecordId>,
}

// ── Batches ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBatch {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

// ── Enrollments ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEnrollment {
    pub student_id: RecordId,
    pub batch_id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrolled_on: Option<NaiveDate>,
}

// ── Attendance ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceInput {
    pub student_id: RecordId,
    pub batch_id: RecordId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Partial update: only the status field changes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUpdate {
    pub status: AttendanceStatus,
}

// ── Fees ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFee {
    pub student_id: RecordId,
    pub amount: f64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FeeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_on: Option<NaiveDate>,
}

// ── Exams & results ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExam {
    pub course_id: RecordId,
    pub name: String,
    pub held_on: NaiveDate,
    pub max_marks: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultInput {
    pub exam_id: RecordId,
    pub student_id: RecordId,
    pub marks: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultUpdate {
    pub marks: f64,
}

// ── Messages ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub sender: String,
    pub recipient: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_payloads_serialize_only_present_fields() {
        let update = StudentUpdate {
            phone: Some("5550001111".into()),
            ..StudentUpdate::default()
        };
        let json = serde_json::to_value(&update).expect("serializable");
        assert_eq!(json, serde_json::json!({ "phone": "5550001111" }));
    }

    #[test]
    fn attendance_update_uses_lowercase_status() {
        let update = AttendanceUpdate {
            status: crate::model::AttendanceStatus::Absent,
        };
        let json = serde_json::to_value(&update).expect("serializable");
        assert_eq!(json, serde_json::json!({ "status": "absent" }));
    }

    #[test]
    fn dates_serialize_as_iso8601() {
        let fee = NewFee {
            student_id: RecordId::new(4),
            amount: 1200.0,
            due_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
        };
        let json = serde_json::to_value(&fee).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({ "studentId": 4, "amount": 1200.0, "dueDate": "2026-09-01" })
        );
    }
}
