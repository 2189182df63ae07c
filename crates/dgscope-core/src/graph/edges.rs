//! Deduplicating, ordered set of directed edges.

use std::collections::BTreeSet;

/// The edge set of a simple directed graph: no self-loops, no multi-edges.
///
/// Edges are kept in `(source, target)` order, so iteration is
/// deterministic and grouped by source.
#[derive(Debug, Clone, Default)]
pub struct EdgeStore {
    edges: BTreeSet<(usize, usize)>,
}

impl EdgeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `source → target`.
    ///
    /// Returns `false`, leaving the set untouched, for self-loops, for
    /// endpoints outside `0..vertex_count`, and for edges already present.
    pub fn insert(&mut self, source: usize, target: usize, vertex_count: usize) -> bool {
        if source == target || source >= vertex_count || target >= vertex_count {
            return false;
        }
        self.edges.insert((source, target))
    }

    #[must_use]
    pub fn contains(&self, source: usize, target: usize) -> bool {
        self.edges.contains(&(source, target))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate edges in ascending `(source, target)` order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }
}
