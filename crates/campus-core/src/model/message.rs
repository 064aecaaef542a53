// ── Internal messaging ──

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::RecordId;

/// An internal message between staff members or to a student's account.
///
/// Sender and recipient are free-form account names; the server does not
/// enforce that they reference existing records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: RecordId,
    pub sender: String,
    pub recipient: String,
    pub subject: Option<String>,
    pub body: String,
    /// `None` when the server sent an unparseable timestamp.
    pub sent_at: Option<DateTime<Utc>>,
}
