//! Reactive data layer between `campus-api` and UI consumers.
//!
//! Every screen of a campus dashboard follows the same shape: fetch a
//! collection, filter it client-side, render it, submit a mutation, and
//! refetch whatever that mutation could have changed. This crate owns the
//! machinery that makes that shape safe to repeat:
//!
//! - **[`QueryCache`]** -- process-wide, key-addressed cache of server
//!   resources. Entries are created lazily, deduplicate concurrent fetches,
//!   serve stale data during background refetches, and refetch on
//!   invalidation while they have live subscribers.
//!
//! - **[`Mutation`]** -- a single create/update/delete action plus its
//!   success protocol: on success, every declared [`ResourceKey`] prefix is
//!   invalidated before the caller resumes. No optimistic updates, no
//!   automatic retries.
//!
//! - **[`Portal`]** -- the facade consumers hold. Owns the HTTP client and
//!   the cache, vends typed collection handles ([`ResourceHandle`]) whose
//!   fetchers convert wire records into domain types, and exposes one
//!   validated method per mutation with a per-entity invalidation scope.
//!
//! - **Domain model** ([`model`]) -- plain records with integer
//!   [`RecordId`]s and foreign-key references resolved client-side through
//!   [`LookupIndex`] maps, never by server-side joins.

pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod filter;
pub mod key;
pub mod lookup;
pub mod model;
pub mod mutation;
pub mod portal;
pub mod requests;
pub mod stats;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{FetchStatus, QueryCache, Resource, ResourceHandle};
pub use config::PortalConfig;
pub use error::CoreError;
pub use key::{ResourceKey, keys};
pub use lookup::LookupIndex;
pub use mutation::{Mutation, MutationState, MutationStatus};
pub use portal::Portal;
pub use requests::*;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AttendanceRecord,
    AttendanceStatus,
    Batch,
    Course,
    DashboardMetrics,
    Enrollment,
    Exam,
    ExamResult,
    Fee,
    FeeStatus,
    Message,
    RecordId,
    Student,
    Teacher,
};
