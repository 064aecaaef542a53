// ── Domain model ──
//
// Canonical client-side types for every server resource. Plain records
// with integer identifiers; foreign keys are `RecordId` references
// resolved client-side through lookup indexes, never by server joins.

mod academics;
mod attendance;
mod finance;
mod id;
mod message;
mod metrics;
mod people;

pub use academics::{Batch, Course, Enrollment, Exam, ExamResult};
pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use finance::{Fee, FeeStatus};
pub use id::RecordId;
pub use message::Message;
pub use metrics::DashboardMetrics;
pub use people::{Student, Teacher};
