// ── Academic structure: courses, batches, enrollments, exams ──

use chrono::NaiveDate;
use serde::Serialize;

use super::RecordId;

/// A course of study (e.g. "Mathematics", code "MATH-101").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub id: RecordId,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    /// Teacher responsible for the course, if assigned.
    pub teacher_id: Option<RecordId>,
}

/// A scheduled group of students working through a course together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch {
    pub id: RecordId,
    pub name: String,
    pub course_id: Option<RecordId>,
    pub start_date: Option<NaiveDate>,
    pub capacity: Option<u32>,
}

/// Membership of one student in one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrollment {
    pub id: RecordId,
    pub student_id: RecordId,
    pub batch_id: RecordId,
    pub enrolled_on: Option<NaiveDate>,
}

/// A scheduled examination for a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exam {
    pub id: RecordId,
    pub course_id: RecordId,
    pub name: String,
    pub held_on: NaiveDate,
    pub max_marks: u32,
}

/// One student's marks in one exam.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamResult {
    pub id: RecordId,
    pub exam_id: RecordId,
    pub student_id: RecordId,
    pub marks: f64,
}

impl ExamResult {
    /// Marks as a percentage of the exam's maximum, if the maximum is
    /// known and positive.
    pub fn percentage(&self, exam: &Exam) -> Option<f64> {
        (exam.max_marks > 0).then(|| 100.0 * self.marks / f64::from(exam.max_marks))
    }
}
