// ── Resource keys ──
//
// Stable identifiers for cacheable server resources. Keys are ordered
// segment sequences compared structurally, so `["/api/batches"]` is a
// prefix of `["/api/batches", 5]` but unrelated to `["/api/students"]`.
// Invalidating a collection prefix therefore reaches every detail entry
// under it without touching other collections.

use std::fmt;

use crate::model::RecordId;

/// One segment of a [`ResourceKey`]: a path fragment or a record id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeySegment {
    Text(String),
    Id(i64),
}

impl fmt::Display for KeySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for KeySegment {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<RecordId> for KeySegment {
    fn from(id: RecordId) -> Self {
        Self::Id(id.get())
    }
}

/// Stable identifier for a fetchable resource or resource collection.
///
/// Compared structurally (deep equality), never by reference. Keys should
/// be built through the [`keys`] constructors so that every call site and
/// every invalidation scope agrees on the exact segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    segments: Vec<KeySegment>,
}

impl ResourceKey {
    /// A single-segment key rooted at an API path, e.g. `"/api/students"`.
    pub fn root(path: &str) -> Self {
        Self {
            segments: vec![KeySegment::from(path)],
        }
    }

    /// Append a record id segment, turning a collection key into a
    /// detail key.
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.segments.push(KeySegment::from(id));
        self
    }

    pub fn segments(&self) -> &[KeySegment] {
        &self.segments
    }

    /// `true` if `prefix`'s segments are a leading subsequence of this
    /// key's segments. Every key is a prefix of itself.
    pub fn starts_with(&self, prefix: &ResourceKey) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

/// Canonical key constructors, one per server resource.
///
/// Invalidation scopes and fetchers both build keys here, so a mutation
/// and the views it must refresh can never disagree on spelling.
pub mod keys {
    use super::ResourceKey;
    use crate::model::RecordId;

    pub fn students() -> ResourceKey {
        ResourceKey::root("/api/students")
    }

    pub fn student(id: RecordId) -> ResourceKey {
        students().with_id(id)
    }

    pub fn teachers() -> ResourceKey {
        ResourceKey::root("/api/teachers")
    }

    pub fn courses() -> ResourceKey {
        ResourceKey::root("/api/courses")
    }

    pub fn batches() -> ResourceKey {
        ResourceKey::root("/api/batches")
    }

    pub fn batch(id: RecordId) -> ResourceKey {
        batches().with_id(id)
    }

    pub fn enrollments() -> ResourceKey {
        ResourceKey::root("/api/enrollments")
    }

    pub fn attendance() -> ResourceKey {
        ResourceKey::root("/api/attendance")
    }

    pub fn fees() -> ResourceKey {
        ResourceKey::root("/api/fees")
    }

    pub fn exams() -> ResourceKey {
        ResourceKey::root("/api/exams")
    }

    pub fn results() -> ResourceKey {
        ResourceKey::root("/api/results")
    }

    pub fn messages() -> ResourceKey {
        ResourceKey::root("/api/messages")
    }

    pub fn dashboard_metrics() -> ResourceKey {
        ResourceKey::root("/api/dashboard/metrics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equality() {
        assert_eq!(keys::students(), keys::students());
        assert_ne!(keys::students(), keys::teachers());
        assert_ne!(
            keys::students(),
            keys::student(RecordId::new(5)),
        );
    }

    #[test]
    fn prefix_matching_respects_segment_boundaries() {
        let collection = keys::batches();
        let detail = keys::batch(RecordId::new(5));

        assert!(detail.starts_with(&collection));
        assert!(collection.starts_with(&collection));
        assert!(!collection.starts_with(&detail));
        assert!(!keys::students().starts_with(&collection));
    }

    #[test]
    fn display_joins_segments() {
        insta::assert_snapshot!(
            keys::student(RecordId::new(5)).to_string(),
            @"/api/students/5"
        );
    }
}
