// ── Wire → domain conversion ──
//
// The server ships camelCase JSON with ISO-8601 date strings and raw
// status strings; everything is normalized here, at the client boundary.
// Parsing is lenient: a malformed date or unknown status degrades that
// one field (with a warning) instead of failing the whole collection,
// matching how the dashboard renders fallback labels for bad references.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use campus_api::types as wire;

use crate::model::{
    AttendanceRecord, AttendanceStatus, Batch, Course, DashboardMetrics, Enrollment, Exam,
    ExamResult, Fee, FeeStatus, Message, RecordId, Student, Teacher,
};

// ── Field parsers ───────────────────────────────────────────────────

fn parse_date(raw: &str, field: &'static str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or_else(|_| {
        warn!(raw, field, "unparseable date; substituting epoch");
        NaiveDate::default()
    })
}

fn parse_opt_date(raw: Option<&str>, field: &'static str) -> Option<NaiveDate> {
    let raw = raw?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(raw, field, "unparseable date; dropping field");
            None
        }
    }
}

fn parse_timestamp(raw: &str, field: &'static str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(_) => {
            warn!(raw, field, "unparseable timestamp; dropping field");
            None
        }
    }
}

fn attendance_status(raw: &str) -> AttendanceStatus {
    AttendanceStatus::from_str(raw).unwrap_or_else(|_| {
        warn!(raw, "unknown attendance status; defaulting");
        AttendanceStatus::default()
    })
}

fn fee_status(raw: &str) -> FeeStatus {
    FeeStatus::from_str(raw).unwrap_or_else(|_| {
        warn!(raw, "unknown fee status; defaulting");
        FeeStatus::default()
    })
}

// ── Record conversions ──────────────────────────────────────────────

pub fn student(rec: wire::StudentRecord) -> Student {
    Student {
        id: RecordId::new(rec.id),
        first_name: rec.first_name,
        last_name: rec.last_name,
        email: rec.email,
        phone: rec.phone,
        batch_id: rec.batch_id.map(RecordId::new),
        joined_on: parse_opt_date(rec.joined_on.as_deref(), "joinedOn"),
    }
}

pub fn teacher(rec: wire::TeacherRecord) -> Teacher {
    Teacher {
        id: RecordId::new(rec.id),
        first_name: rec.first_name,
        last_name: rec.last_name,
        email: rec.email,
        phone: rec.phone,
        subject: rec.subject,
    }
}

pub fn course(rec: wire::CourseRecord) -> Course {
    Course {
        id: RecordId::new(rec.id),
        name: rec.name,
        code: rec.code,
        description: rec.description,
        teacher_id: rec.teacher_id.map(RecordId::new),
    }
}

pub fn batch(rec: wire::BatchRecord) -> Batch {
    Batch {
        id: RecordId::new(rec.id),
        name: rec.name,
        course_id: rec.course_id.map(RecordId::new),
        start_date: parse_opt_date(rec.start_date.as_deref(), "startDate"),
        capacity: rec.capacity,
    }
}

pub fn enrollment(rec: wire::EnrollmentRecord) -> Enrollment {
    Enrollment {
        id: RecordId::new(rec.id),
        student_id: RecordId::new(rec.student_id),
        batch_id: RecordId::new(rec.batch_id),
        enrolled_on: parse_opt_date(rec.enrolled_on.as_deref(), "enrolledOn"),
    }
}

pub fn attendance(rec: wire::AttendanceRecord) -> AttendanceRecord {
    AttendanceRecord {
        id: RecordId::new(rec.id),
        student_id: RecordId::new(rec.student_id),
        batch_id: RecordId::new(rec.batch_id),
        date: parse_date(&rec.date, "date"),
        status: attendance_status(&rec.status),
    }
}

pub fn fee(rec: wire::FeeRecord) -> Fee {
    Fee {
        id: RecordId::new(rec.id),
        student_id: RecordId::new(rec.student_id),
        amount: rec.amount,
        due_date: parse_date(&rec.due_date, "dueDate"),
        paid_on: parse_opt_date(rec.paid_on.as_deref(), "paidOn"),
        status: fee_status(&rec.status),
    }
}

pub fn exam(rec: wire::ExamRecord) -> Exam {
    Exam {
        id: RecordId::new(rec.id),
        course_id: RecordId::new(rec.course_id),
        name: rec.name,
        held_on: parse_date(&rec.held_on, "heldOn"),
        max_marks: rec.max_marks,
    }
}

pub fn exam_result(rec: wire::ResultRecord) -> ExamResult {
    ExamResult {
        id: RecordId::new(rec.id),
        exam_id: RecordId::new(rec.exam_id),
        student_id: RecordId::new(rec.student_id),
        marks: rec.marks,
    }
}

pub fn message(rec: wire::MessageRecord) -> Message {
    Message {
        id: RecordId::new(rec.id),
        sender: rec.sender,
        recipient: rec.recipient,
        subject: rec.subject,
        body: rec.body,
        sent_at: parse_timestamp(&rec.sent_at, "sentAt"),
    }
}

pub fn metrics(rec: wire::MetricsRecord) -> DashboardMetrics {
    DashboardMetrics {
        total_students: rec.total_students,
        total_teachers: rec.total_teachers,
        total_courses: rec.total_courses,
        active_batches: rec.active_batches,
        attendance_rate_pct: rec.attendance_rate_pct,
        fees_collected: rec.fees_collected,
        fees_pending: rec.fees_pending,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn attendance_parses_date_and_status() {
        let rec = wire::AttendanceRecord {
            id: 7,
            student_id: 1,
            batch_id: 3,
            date: "2026-03-02".into(),
            status: "absent".into(),
        };
        let domain = attendance(rec);

        assert_eq!(domain.id, RecordId::new(7));
        assert_eq!(domain.status, AttendanceStatus::Absent);
        assert_eq!(
            domain.date,
            NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
        );
    }

    #[test]
    fn unknown_status_degrades_instead_of_failing() {
        let rec = wire::AttendanceRecord {
            id: 1,
            student_id: 1,
            batch_id: 1,
            date: "2026-01-10".into(),
            status: "excused".into(),
        };
        assert_eq!(attendance(rec).status, AttendanceStatus::Present);
    }

    #[test]
    fn bad_optional_date_drops_to_none() {
        let rec = wire::StudentRecord {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "5551234567".into(),
            batch_id: None,
            joined_on: Some("yesterday".into()),
        };
        assert_eq!(student(rec).joined_on, None);
    }

    #[test]
    fn message_timestamp_is_utc() {
        let rec = wire::MessageRecord {
            id: 1,
            sender: "admin".into(),
            recipient: "front-desk".into(),
            subject: None,
            body: "staff meeting at noon".into(),
            sent_at: "2026-02-01T09:30:00+05:30".into(),
        };
        let domain = message(rec);
        let sent = domain.sent_at.expect("parseable timestamp");
        assert_eq!(sent.to_rfc3339(), "2026-02-01T04:00:00+00:00");
    }
}
