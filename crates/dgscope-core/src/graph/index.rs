//! Bidirectional mapping between external vertex names and dense IDs.
//!
//! IDs are assigned in first-seen order and are never reused, so the ID
//! space is always exactly `0..len()`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// What to do when a name has not been seen before.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VertexLookup {
    /// Assign the next free ID to unknown names.
    #[default]
    Create,
    /// Leave the index untouched and return the sentinel `len()`.
    IgnoreUnknown,
}

/// Name ⇄ ID registry owned by a [`crate::DirectedGraph`].
#[derive(Debug, Clone, Default)]
pub struct VertexIndex {
    name_to_id: HashMap<String, usize>,
    id_to_name: Vec<String>,
}

impl VertexIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of known vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_to_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }

    /// Return the ID for `name`, creating it if allowed.
    ///
    /// With [`VertexLookup::IgnoreUnknown`] an unseen name yields the
    /// sentinel `self.len()` and nothing is recorded.
    pub fn get_or_create(&mut self, name: &str, lookup: VertexLookup) -> usize {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = self.id_to_name.len();
        if lookup == VertexLookup::Create {
            self.name_to_id.insert(name.to_owned(), id);
            self.id_to_name.push(name.to_owned());
        }
        id
    }

    #[must_use]
    pub fn id(&self, name: &str) -> Option<usize> {
        self.name_to_id.get(name).copied()
    }

    #[must_use]
    pub fn name(&self, id: usize) -> Option<&str> {
        self.id_to_name.get(id).map(String::as_str)
    }

    /// Names indexed by ID.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.id_to_name
    }
}
