// ── Derived statistics ──
//
// Pure aggregations over already-fetched collections. These back the
// attendance and fees summary panels; the dashboard totals themselves
// come precomputed from /api/dashboard/metrics.

use chrono::NaiveDate;

use crate::model::{AttendanceRecord, AttendanceStatus, Fee, FeeStatus};

/// Counts and rate over a slice of attendance records.
///
/// Late arrivals count as attended for the rate; they are still reported
/// separately.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
}

impl AttendanceSummary {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            present: 0,
            absent: 0,
            late: 0,
        };
        for record in records {
            match record.status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Late => summary.late += 1,
            }
        }
        summary
    }

    /// Attended sessions (present + late) as a percentage of all
    /// sessions. `None` when there are no records to rate.
    pub fn rate_pct(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
        let rate = 100.0 * (self.present + self.late) as f64 / self.total as f64;
        Some(rate)
    }
}

/// Money totals over a slice of fees.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeSummary {
    pub total_amount: f64,
    pub collected: f64,
    pub pending: f64,
    pub overdue_count: usize,
}

impl FeeSummary {
    pub fn from_fees(fees: &[Fee], today: NaiveDate) -> Self {
        let mut summary = Self {
            total_amount: 0.0,
            collected: 0.0,
            pending: 0.0,
            overdue_count: 0,
        };
        for fee in fees {
            summary.total_amount += fee.amount;
            match fee.status {
                FeeStatus::Paid => summary.collected += fee.amount,
                FeeStatus::Pending => summary.pending += fee.amount,
            }
            if fee.is_overdue(today) {
                summary.overdue_count += 1;
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;

    fn attendance(status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: RecordId::new(1),
            student_id: RecordId::new(1),
            batch_id: RecordId::new(1),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
            status,
        }
    }

    #[test]
    fn attendance_summary_counts_and_rates() {
        let records = vec![
            attendance(AttendanceStatus::Present),
            attendance(AttendanceStatus::Present),
            attendance(AttendanceStatus::Late),
            attendance(AttendanceStatus::Absent),
        ];
        let summary = AttendanceSummary::from_records(&records);

        assert_eq!(summary.present, 2);
        assert_eq!(summary.late, 1);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.rate_pct(), Some(75.0));
    }

    #[test]
    fn empty_attendance_has_no_rate() {
        let summary = AttendanceSummary::from_records(&[]);
        assert_eq!(summary.rate_pct(), None);
    }

    #[test]
    fn fee_summary_splits_collected_and_pending() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date");
        let due_past = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        let due_future = NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date");

        let fee = |status, due: NaiveDate, amount: f64| Fee {
            id: RecordId::new(1),
            student_id: RecordId::new(1),
            amount,
            due_date: due,
            paid_on: None,
            status,
        };

        let fees = vec![
            fee(FeeStatus::Paid, due_past, 1000.0),
            fee(FeeStatus::Pending, due_past, 600.0),
            fee(FeeStatus::Pending, due_future, 400.0),
        ];
        let summary = FeeSummary::from_fees(&fees, today);

        assert_eq!(summary.total_amount, 2000.0);
        assert_eq!(summary.collected, 1000.0);
        assert_eq!(summary.pending, 1000.0);
        assert_eq!(summary.overdue_count, 1);
    }
}
