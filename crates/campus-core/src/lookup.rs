// ── Client-side relational lookups ──
//
// Related records are resolved from cached collections, not server-side
// joins. Building an id → record index once per fetched collection
// replaces per-row linear scans, and every accessor degrades to a
// fallback label when the referenced record is missing -- a dangling
// foreign key renders as "unknown", it never errors.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{Batch, Course, Exam, RecordId, Student, Teacher};

/// Trait for records addressable by [`RecordId`].
pub trait Keyed {
    fn record_id(&self) -> RecordId;
}

impl Keyed for Student {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Keyed for Teacher {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Keyed for Course {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Keyed for Batch {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Keyed for Exam {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

/// Id → record map built once per fetched collection.
pub struct LookupIndex<T> {
    by_id: HashMap<RecordId, Arc<T>>,
}

impl<T: Keyed> LookupIndex<T> {
    /// Build from a fetched collection snapshot.
    pub fn build(records: &Arc<Vec<T>>) -> Self
    where
        T: Clone,
    {
        Self {
            by_id: records
                .iter()
                .map(|r| (r.record_id(), Arc::new(r.clone())))
                .collect(),
        }
    }

    pub fn get(&self, id: RecordId) -> Option<&Arc<T>> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

// ── Display accessors with fallback labels ──────────────────────────

/// Label rendered for any dangling reference.
pub const UNKNOWN_LABEL: &str = "unknown";

pub fn student_name(index: &LookupIndex<Student>, id: RecordId) -> String {
    index
        .get(id)
        .map_or_else(|| UNKNOWN_LABEL.to_owned(), |s| s.full_name())
}

pub fn teacher_name(index: &LookupIndex<Teacher>, id: RecordId) -> String {
    index
        .get(id)
        .map_or_else(|| UNKNOWN_LABEL.to_owned(), |t| t.full_name())
}

pub fn course_name(index: &LookupIndex<Course>, id: RecordId) -> String {
    index
        .get(id)
        .map_or_else(|| UNKNOWN_LABEL.to_owned(), |c| c.name.clone())
}

pub fn batch_name(index: &LookupIndex<Batch>, id: RecordId) -> String {
    index
        .get(id)
        .map_or_else(|| UNKNOWN_LABEL.to_owned(), |b| b.name.clone())
}

pub fn exam_name(index: &LookupIndex<Exam>, id: RecordId) -> String {
    index
        .get(id)
        .map_or_else(|| UNKNOWN_LABEL.to_owned(), |e| e.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students() -> Arc<Vec<Student>> {
        Arc::new(vec![Student {
            id: RecordId::new(1),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "5551234567".into(),
            batch_id: None,
            joined_on: None,
        }])
    }

    #[test]
    fn resolves_present_records() {
        let index = LookupIndex::build(&students());
        assert_eq!(student_name(&index, RecordId::new(1)), "Ada Lovelace");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn missing_reference_renders_fallback_label() {
        let index = LookupIndex::build(&students());
        assert_eq!(student_name(&index, RecordId::new(99)), UNKNOWN_LABEL);
        assert!(!index.contains(RecordId::new(99)));
    }
}
