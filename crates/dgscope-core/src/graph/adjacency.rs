//! Per-vertex in/out neighbor lists derived from the edge store.
//!
//! The adjacency is a [`petgraph`] `DiGraph` whose node indices coincide
//! with vertex IDs. It is rebuilt in full from the [`EdgeStore`] and
//! stamped with the graph generation it was built at; it is never updated
//! incrementally.

use std::collections::BTreeSet;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

use crate::graph::edges::EdgeStore;

/// Neighbor lists for every vertex in `0..vertex_count()`.
#[derive(Debug, Clone)]
pub struct Adjacency {
    graph: DiGraph<(), ()>,
    built_at: u64,
}

impl Adjacency {
    /// Build from scratch with one pass over `edges`.
    #[instrument(skip(edges))]
    pub fn build(vertex_count: usize, edges: &EdgeStore, generation: u64) -> Self {
        let mut graph = DiGraph::with_capacity(vertex_count, edges.len());
        for _ in 0..vertex_count {
            graph.add_node(());
        }
        for (source, target) in edges.iter() {
            graph.add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
        }
        debug!(
            vertices = graph.node_count(),
            edges = graph.edge_count(),
            "adjacency built"
        );
        Self {
            graph,
            built_at: generation,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        self.built_at == generation
    }

    /// Sources of edges ending at `v`.
    pub fn in_neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(v), Direction::Incoming)
            .map(|n| n.index())
    }

    /// Targets of edges starting at `v`.
    pub fn out_neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(v), Direction::Outgoing)
            .map(|n| n.index())
    }

    #[must_use]
    pub fn in_degree(&self, v: usize) -> usize {
        self.in_neighbors(v).count()
    }

    #[must_use]
    pub fn out_degree(&self, v: usize) -> usize {
        self.out_neighbors(v).count()
    }

    /// `in_degree + out_degree`; a mutual pair counts twice.
    #[must_use]
    pub fn total_degree(&self, v: usize) -> usize {
        self.in_degree(v) + self.out_degree(v)
    }

    /// Union of in- and out-neighbors, deduplicated and sorted.
    #[must_use]
    pub fn undirected_neighbors(&self, v: usize) -> BTreeSet<usize> {
        self.graph
            .neighbors_undirected(NodeIndex::new(v))
            .map(|n| n.index())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(edges: &[(usize, usize)], n: usize) -> EdgeStore {
        let mut store = EdgeStore::new();
        for &(u, v) in edges {
            store.insert(u, v, n);
        }
        store
    }

    #[test]
    fn neighbor_lists_follow_edges() {
        let edges = store(&[(0, 1), (0, 2), (2, 0)], 3);
        let adj = Adjacency::build(3, &edges, 7);

        let mut out0: Vec<_> = adj.out_neighbors(0).collect();
        out0.sort_unstable();
        assert_eq!(out0, vec![1, 2]);
        assert_eq!(adj.in_neighbors(0).collect::<Vec<_>>(), vec![2]);
        assert_eq!(adj.in_degree(1), 1);
        assert_eq!(adj.out_degree(1), 0);
        assert_eq!(adj.total_degree(0), 3);
        assert!(adj.is_current(7));
        assert!(!adj.is_current(8));
    }

    #[test]
    fn undirected_neighbors_merge_mutual_pairs() {
        let edges = store(&[(0, 1), (1, 0), (2, 0)], 3);
        let adj = Adjacency::build(3, &edges, 0);
        let n: Vec<_> = adj.undirected_neighbors(0).into_iter().collect();
        assert_eq!(n, vec![1, 2]);
    }

    #[test]
    fn isolated_vertices_are_present() {
        let adj = Adjacency::build(4, &EdgeStore::new(), 0);
        assert_eq!(adj.vertex_count(), 4);
        assert_eq!(adj.total_degree(3), 0);
        assert!(adj.undirected_neighbors(3).is_empty());
    }
}
