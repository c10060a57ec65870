//! Per-node attribute collection.
//!
//! Attributes keep insertion order. Overwriting an attribute keeps its
//! original slot, and removal preserves the order of the remaining ones,
//! so enumeration is stable across repeated reads.

use core_types::{AttributeId, AttributeValue};
use indexmap::IndexMap;

/// Ordered map from attribute id to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    entries: IndexMap<AttributeId, AttributeValue>,
}

impl AttributeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite an attribute, returning the previous value
    pub fn set(&mut self, id: AttributeId, value: AttributeValue) -> Option<AttributeValue> {
        self.entries.insert(id, value)
    }

    /// Look up an attribute
    pub fn get(&self, id: AttributeId) -> Option<&AttributeValue> {
        self.entries.get(&id)
    }

    /// Remove an attribute, returning its value if it was present
    pub fn remove(&mut self, id: AttributeId) -> Option<AttributeValue> {
        self.entries.shift_remove(&id)
    }

    /// Remove every attribute
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no attribute is set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the attribute is present
    pub fn contains(&self, id: AttributeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// First attribute in enumeration order
    pub fn first(&self) -> Option<AttributeId> {
        self.entries.first().map(|(id, _)| *id)
    }

    /// Last attribute in enumeration order
    pub fn last(&self) -> Option<AttributeId> {
        self.entries.last().map(|(id, _)| *id)
    }

    /// Ordinal of an attribute in enumeration order
    pub fn index_of(&self, id: AttributeId) -> Option<usize> {
        self.entries.get_index_of(&id)
    }

    /// Attribute at an ordinal
    pub fn id_at(&self, index: usize) -> Option<AttributeId> {
        self.entries.get_index(index).map(|(id, _)| *id)
    }

    /// Iterate in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (AttributeId, &AttributeValue)> {
        self.entries.iter().map(|(id, value)| (*id, value))
    }
}
