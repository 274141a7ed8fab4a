use std::collections::HashSet;

use super::records::TypeRecord;
use super::rules::Category;

/// Per-category accumulator deduplicating records by canonical name.
///
/// First-seen wins: a record whose canonical name is already present is
/// dropped, not merged. Reporting order is canonical name ascending, not
/// insertion order.
pub struct CategoryRegistry {
    category: Category,
    seen: HashSet<String>,
    records: Vec<TypeRecord>,
}

impl CategoryRegistry {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            seen: HashSet::new(),
            records: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Store the record unless its canonical name was already registered.
    /// Returns whether the record was inserted.
    pub fn register(&mut self, record: TypeRecord) -> bool {
        if self.seen.insert(record.canonical_name()) {
            self.records.push(record);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records sorted by canonical name ascending; the sort is stable, so
    /// ties keep their discovery order.
    pub fn into_sorted(self) -> Vec<TypeRecord> {
        let mut records = self.records;
        records.sort_by_key(|record| record.canonical_name());
        records
    }
}
