// ── Filter predicates for cached collections ──
//
// Used by list views to narrow snapshots without re-querying the server.
// Search is a case-insensitive substring match, applied to whatever the
// entity's natural display fields are.

use chrono::NaiveDate;

use crate::model::{
    AttendanceRecord, AttendanceStatus, Fee, FeeStatus, RecordId, Student, Teacher,
};

fn matches_term(term: &str, candidates: &[&str]) -> bool {
    let needle = term.to_lowercase();
    candidates
        .iter()
        .any(|c| c.to_lowercase().contains(&needle))
}

/// Filter predicate for student collections.
pub enum StudentFilter {
    All,
    /// Case-insensitive substring match on first or last name.
    Search(String),
    ByBatch(RecordId),
    Custom(Box<dyn Fn(&Student) -> bool + Send + Sync>),
}

impl StudentFilter {
    pub fn matches(&self, student: &Student) -> bool {
        match self {
            Self::All => true,
            Self::Search(term) => {
                matches_term(term, &[&student.first_name, &student.last_name])
            }
            Self::ByBatch(batch_id) => student.batch_id == Some(*batch_id),
            Self::Custom(f) => f(student),
        }
    }
}

/// Filter predicate for teacher collections.
pub enum TeacherFilter {
    All,
    Search(String),
    BySubject(String),
}

impl TeacherFilter {
    pub fn matches(&self, teacher: &Teacher) -> bool {
        match self {
            Self::All => true,
            Self::Search(term) => {
                matches_term(term, &[&teacher.first_name, &teacher.last_name])
            }
            Self::BySubject(subject) => teacher
                .subject
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(subject)),
        }
    }
}

/// Filter predicate for attendance collections.
pub enum AttendanceFilter {
    All,
    ByBatch(RecordId),
    ByStudent(RecordId),
    OnDate(NaiveDate),
    ByStatus(AttendanceStatus),
}

impl AttendanceFilter {
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        match self {
            Self::All => true,
            Self::ByBatch(id) => record.batch_id == *id,
            Self::ByStudent(id) => record.student_id == *id,
            Self::OnDate(date) => record.date == *date,
            Self::ByStatus(status) => record.status == *status,
        }
    }
}

/// Filter predicate for fee collections.
pub enum FeeFilter {
    All,
    ByStudent(RecordId),
    ByStatus(FeeStatus),
    /// Unpaid and past due as of the given day.
    Overdue(NaiveDate),
}

impl FeeFilter {
    pub fn matches(&self, fee: &Fee) -> bool {
        match self {
            Self::All => true,
            Self::ByStudent(id) => fee.student_id == *id,
            Self::ByStatus(status) => fee.status == *status,
            Self::Overdue(today) => fee.is_overdue(*today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: i64, first: &str, last: &str) -> Student {
        Student {
            id: RecordId::new(id),
            first_name: first.into(),
            last_name: last.into(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: "5551234567".into(),
            batch_id: None,
            joined_on: None,
        }
    }

    #[test]
    fn search_is_case_insensitive_on_both_names() {
        let students = [student(1, "Ada", "Lovelace"), student(2, "Bob", "Byron")];
        let filter = StudentFilter::Search("ada".into());

        let hits: Vec<_> = students.iter().filter(|s| filter.matches(s)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, RecordId::new(1));

        // Last names match too.
        let filter = StudentFilter::Search("BYRON".into());
        assert!(students.iter().any(|s| filter.matches(s)));
    }

    #[test]
    fn search_with_no_match_yields_empty() {
        let students = [student(1, "Ada", "Lovelace")];
        let filter = StudentFilter::Search("zelda".into());
        assert!(!students.iter().any(|s| filter.matches(s)));
    }

    #[test]
    fn overdue_filter_tracks_reference_day() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date");
        let fee = Fee {
            id: RecordId::new(1),
            student_id: RecordId::new(1),
            amount: 900.0,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"),
            paid_on: None,
            status: FeeStatus::Pending,
        };

        assert!(FeeFilter::Overdue(today).matches(&fee));
        assert!(!FeeFilter::ByStatus(FeeStatus::Paid).matches(&fee));
    }
}
