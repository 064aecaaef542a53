// ── Dashboard metrics ──

use serde::Serialize;

/// Precomputed summary from `/api/dashboard/metrics`.
///
/// The server owns this aggregation; the client caches it under its own
/// resource key and refreshes it whenever a mutation touches one of the
/// feeding collections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_courses: u64,
    pub active_batches: u64,
    pub attendance_rate_pct: Option<f64>,
    pub fees_collected: f64,
    pub fees_pending: f64,
}
