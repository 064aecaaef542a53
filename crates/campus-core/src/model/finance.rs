// ── Fees ──

use chrono::NaiveDate;
use serde::Serialize;
use strum::{Display, EnumString};

use super::RecordId;

/// Payment state of a fee. "Overdue" is derived client-side from the due
/// date, never stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FeeStatus {
    #[default]
    Pending,
    Paid,
}

/// A fee owed by one student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fee {
    pub id: RecordId,
    pub student_id: RecordId,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid_on: Option<NaiveDate>,
    pub status: FeeStatus,
}

impl Fee {
    /// Unpaid and past its due date as of `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != FeeStatus::Paid && self.due_date < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee(status: FeeStatus, due: NaiveDate) -> Fee {
        Fee {
            id: RecordId::new(1),
            student_id: RecordId::new(1),
            amount: 500.0,
            due_date: due,
            paid_on: None,
            status,
        }
    }

    #[test]
    fn overdue_requires_unpaid_and_past_due() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date");
        let past = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        let future = NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date");

        assert!(fee(FeeStatus::Pending, past).is_overdue(today));
        assert!(!fee(FeeStatus::Paid, past).is_overdue(today));
        assert!(!fee(FeeStatus::Pending, future).is_overdue(today));
        assert!(!fee(FeeStatus::Pending, today).is_overdue(today));
    }
}
