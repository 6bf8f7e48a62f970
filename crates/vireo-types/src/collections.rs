use std::collections::HashMap;

use crate::ClassId;

/// Binary names of the read-only collection interfaces paired with their mutable counterparts.
pub const COLLECTION_PAIRS: &[(&str, &str)] = &[
    ("kotlin.collections.Iterable", "kotlin.collections.MutableIterable"),
    ("kotlin.collections.Collection", "kotlin.collections.MutableCollection"),
    ("kotlin.collections.List", "kotlin.collections.MutableList"),
    ("kotlin.collections.Set", "kotlin.collections.MutableSet"),
    ("kotlin.collections.Map", "kotlin.collections.MutableMap"),
    ("kotlin.collections.Map.Entry", "kotlin.collections.MutableMap.MutableEntry"),
    ("kotlin.collections.Iterator", "kotlin.collections.MutableIterator"),
    ("kotlin.collections.ListIterator", "kotlin.collections.MutableListIterator"),
];

/// Fixed table between read-only collection views and their mutable counterparts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionMapping {
    read_only_to_mutable: HashMap<ClassId, ClassId>,
    mutable_to_read_only: HashMap<ClassId, ClassId>,
}

impl CollectionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, read_only: ClassId, mutable: ClassId) {
        self.read_only_to_mutable.insert(read_only, mutable);
        self.mutable_to_read_only.insert(mutable, read_only);
    }

    pub fn read_only_to_mutable(&self, id: ClassId) -> Option<ClassId> {
        self.read_only_to_mutable.get(&id).copied()
    }

    pub fn mutable_to_read_only(&self, id: ClassId) -> Option<ClassId> {
        self.mutable_to_read_only.get(&id).copied()
    }

    /// Maps a read-only view to its mutable counterpart; every other id maps to itself.
    pub fn normalize(&self, id: ClassId) -> ClassId {
        self.read_only_to_mutable(id).unwrap_or(id)
    }
}
