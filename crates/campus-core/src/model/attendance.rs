// ── Attendance ──

use chrono::NaiveDate;
use serde::Serialize;
use strum::{Display, EnumString};

use super::RecordId;

/// Per-session attendance status.
///
/// Wire format and update payloads both use the lowercase form
/// (`"present"`, `"absent"`, `"late"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
}

/// One student's attendance for one session of one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRecord {
    pub id: RecordId,
    pub student_id: RecordId,
    pub batch_id: RecordId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}
