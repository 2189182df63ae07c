//! Edge-level and vertex-level reciprocity.
//!
//! # Definitions
//!
//! A pair `{u, v}` is *reciprocal* when both `u → v` and `v → u` exist.
//!
//! - **reciprocal edges**: `2 ×` the number of reciprocal pairs (both
//!   directions are counted).
//! - **ratio**: `reciprocal_edges / |E|`.
//! - **stat**: `(ratio − density) / (1 − density)`, the ratio normalized
//!   against the reciprocity expected from density alone.
//!
//! Per vertex, with `r` the number of reciprocal pairs the vertex is part of:
//!
//! - `reciprocal_degree = r`
//! - `reciprocity_jaccard = r / (in + out − r)`, the overlap of the in- and
//!   out-neighborhoods over their union.
//! - `reciprocity_ratio = 2r / (in + out)`.
//!
//! Vertices with no edges get `0.0` for both ratios.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::properties::VertexProp;
use crate::graph::{DirectedGraph, Stamped, current};

/// Graph-level reciprocity figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reciprocity {
    /// Edges whose reverse edge also exists.
    pub reciprocal_edges: usize,
    /// Fraction of edges that are reciprocated; `0.0` without edges.
    pub ratio: f64,
    /// Density-normalized ratio; `None` when density is 1.
    pub stat: Option<f64>,
}

impl DirectedGraph {
    /// Compute reciprocity at graph and vertex level.
    ///
    /// Computes degrees first if they are missing or stale.
    #[instrument(skip(self), fields(edges = self.edge_count()))]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute_reciprocity(&mut self) -> Reciprocity {
        if current(self.metrics.degrees.as_ref(), self.generation).is_none() {
            self.compute_degrees();
        }
        let n = self.vertex_count();

        let mut pairs = vec![0_usize; n];
        let mut reciprocal_edges = 0_usize;
        for (u, v) in self.edges.iter() {
            if u < v && self.edges.contains(v, u) {
                reciprocal_edges += 2;
                pairs[u] += 1;
                pairs[v] += 1;
            }
        }

        let (in_degree, out_degree) = self.degree_sequences();
        let mut jaccard = Vec::with_capacity(n);
        let mut ratio = Vec::with_capacity(n);
        for ((&r, &i), &o) in pairs.iter().zip(&in_degree).zip(&out_degree) {
            let total = i + o;
            if total == 0 {
                jaccard.push(0.0);
                ratio.push(0.0);
            } else {
                jaccard.push(r as f64 / (total - r) as f64);
                ratio.push(2.0 * r as f64 / total as f64);
            }
        }

        let density = self.density();
        let edges = self.edge_count();
        let ratio_g = if edges == 0 {
            0.0
        } else {
            reciprocal_edges as f64 / edges as f64
        };
        let stat = (density < 1.0).then(|| (ratio_g - density) / (1.0 - density));
        let result = Reciprocity {
            reciprocal_edges,
            ratio: ratio_g,
            stat,
        };

        let generation = self.generation;
        self.properties.store_computed(
            VertexProp::ReciprocalDegree,
            pairs.iter().map(|&r| r as f64).collect(),
            generation,
        );
        self.properties
            .store_computed(VertexProp::ReciprocityJaccard, jaccard, generation);
        self.properties
            .store_computed(VertexProp::ReciprocityRatio, ratio, generation);
        self.metrics.reciprocity = Some(Stamped::new(result, generation));

        debug!(
            reciprocal_edges,
            ratio = result.ratio,
            "reciprocity computed"
        );
        result
    }

    /// Reciprocity figures, computing them first if needed.
    pub fn reciprocity(&mut self) -> Reciprocity {
        if let Some(r) = current(self.metrics.reciprocity.as_ref(), self.generation) {
            return *r;
        }
        self.compute_reciprocity()
    }

    /// Number of reciprocated edges (both directions counted).
    pub fn reciprocal_edge_count(&mut self) -> usize {
        self.reciprocity().reciprocal_edges
    }
}
