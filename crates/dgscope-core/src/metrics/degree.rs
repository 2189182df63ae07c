//! In/out degree sequences and graph density.
//!
//! - **in-degree / out-degree**: size of each vertex's in/out neighbor list,
//!   stored as the [`VertexProp::InDegree`] / [`VertexProp::OutDegree`]
//!   vertex properties.
//! - **density**: fraction of the `|V|(|V|-1)` possible directed edges that
//!   are present.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::properties::VertexProp;
use crate::graph::{DirectedGraph, Stamped, current};

/// Counts of vertices with very low total degree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DegreeTallies {
    /// Vertices with no edges at all.
    pub isolated: usize,
    /// Vertices with `in_degree + out_degree == 1`.
    pub degree_one: usize,
}

impl DirectedGraph {
    /// Compute in/out degrees for every vertex.
    ///
    /// Uses the adjacency when it is current, otherwise counts directly
    /// from the edge set (same cost, no adjacency build).
    #[instrument(skip(self), fields(vertices = self.vertex_count()))]
    pub fn compute_degrees(&mut self) -> DegreeTallies {
        let (in_degree, out_degree) = self.degree_sequences();

        let mut tallies = DegreeTallies::default();
        for (&i, &o) in in_degree.iter().zip(&out_degree) {
            match i + o {
                0 => tallies.isolated += 1,
                1 => tallies.degree_one += 1,
                _ => {}
            }
        }

        let generation = self.generation;
        self.properties
            .store_computed(VertexProp::InDegree, as_f64(&in_degree), generation);
        self.properties
            .store_computed(VertexProp::OutDegree, as_f64(&out_degree), generation);
        self.metrics.degrees = Some(Stamped::new(tallies, generation));

        debug!(
            isolated = tallies.isolated,
            degree_one = tallies.degree_one,
            "degrees computed"
        );
        tallies
    }

    /// `(in_degree, out_degree)` indexed by vertex ID.
    ///
    /// Reads the adjacency when it is current, otherwise counts directly from
    /// the edge set.
    pub(crate) fn degree_sequences(&self) -> (Vec<usize>, Vec<usize>) {
        let n = self.vertex_count();
        let mut in_degree = vec![0_usize; n];
        let mut out_degree = vec![0_usize; n];

        match self.adjacency.as_ref() {
            Some(adj) if adj.is_current(self.generation) => {
                for (v, (i, o)) in in_degree.iter_mut().zip(&mut out_degree).enumerate() {
                    *i = adj.in_degree(v);
                    *o = adj.out_degree(v);
                }
            }
            _ => {
                for (source, target) in self.edges.iter() {
                    out_degree[source] += 1;
                    in_degree[target] += 1;
                }
            }
        }
        (in_degree, out_degree)
    }

    /// Degree tallies, computing degrees first if needed.
    pub fn degree_tallies(&mut self) -> DegreeTallies {
        if let Some(t) = current(self.metrics.degrees.as_ref(), self.generation) {
            return *t;
        }
        self.compute_degrees()
    }

    /// Directed density `|E| / (|V|(|V|-1))`.
    ///
    /// Defined as `0.0` for graphs with fewer than two vertices.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn density(&self) -> f64 {
        let n = self.vertex_count();
        if n < 2 {
            return 0.0;
        }
        self.edge_count() as f64 / (n * (n - 1)) as f64
    }
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(counts: &[usize]) -> Vec<f64> {
    counts.iter().map(|&c| c as f64).collect()
}
