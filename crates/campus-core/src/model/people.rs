// ── People: students and teachers ──

use chrono::NaiveDate;
use serde::Serialize;

use super::RecordId;

/// A student enrolled at the institute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Batch the student currently belongs to, if assigned.
    pub batch_id: Option<RecordId>,
    pub joined_on: Option<NaiveDate>,
}

impl Student {
    /// Display name used in tables and message headers.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A teacher on staff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Teacher {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: Option<String>,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
