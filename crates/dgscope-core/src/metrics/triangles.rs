//! Triangle census and undirected clustering.
//!
//! A *triangle* is a vertex triple whose three pairs are each joined by at
//! least one directed edge. Direction is ignored for discovery; it only
//! matters for classification (see [`crate::metrics::spectrum`]).
//!
//! # Algorithm
//!
//! ```text
//! for v1 with total degree > 1:
//!     N1 = undirected neighbors of v1
//!     for v2 in N1, v2 > v1, total degree > 1:
//!         for v3 in undirected neighbors of v2 with v3 > v2:
//!             if v3 ∈ N1: triangle (v1, v2, v3)
//! ```
//!
//! The `v1 < v2 < v3` ordering means each triangle is found exactly once.
//!
//! # Clustering
//!
//! With `d` the size of a vertex's undirected neighbor set, the vertex sits
//! at the center of `d(d-1)/2` triads. Local clustering is the number of
//! triangles through the vertex divided by its triads (`0.0` when `d <= 1`).
//! Global clustering is `3T / Σ triads`.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::properties::VertexProp;
use crate::graph::{DirectedGraph, Stamped, current, refresh_adjacency};

/// Options for [`DirectedGraph::survey_triangles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleSurvey {
    /// Keep the list of discovered triangles (needed for the spectrum).
    pub build_list: bool,
    /// Store per-vertex undirected local clustering.
    pub local_clustering: bool,
}

impl Default for TriangleSurvey {
    fn default() -> Self {
        Self {
            build_list: true,
            local_clustering: true,
        }
    }
}

/// Graph-level triangle figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TriangleCensus {
    pub triangle_count: usize,
    /// Sum over vertices of `d(d-1)/2`.
    pub total_triads: usize,
    /// `3T / total_triads`; `0.0` when there are no triads.
    pub global_clustering: f64,
}

impl DirectedGraph {
    /// Enumerate every triangle once and compute clustering.
    #[instrument(skip(self), fields(vertices = self.vertex_count(), edges = self.edge_count()))]
    #[allow(clippy::cast_precision_loss)]
    pub fn survey_triangles(&mut self, survey: TriangleSurvey) -> TriangleCensus {
        let n = self.index.len();
        let generation = self.generation;
        let adj = refresh_adjacency(&mut self.adjacency, n, &self.edges, generation);

        let neighbors: Vec<BTreeSet<usize>> =
            (0..n).map(|v| adj.undirected_neighbors(v)).collect();
        let eligible: Vec<bool> = (0..n).map(|v| adj.total_degree(v) > 1).collect();

        let mut list = Vec::new();
        let mut through = vec![0_usize; n];
        let mut triangle_count = 0_usize;

        for v1 in (0..n).filter(|&v| eligible[v]) {
            let n1 = &neighbors[v1];
            for &v2 in n1.range(v1 + 1..).filter(|&&v| eligible[v]) {
                for &v3 in neighbors[v2].range(v2 + 1..) {
                    if !n1.contains(&v3) {
                        continue;
                    }
                    triangle_count += 1;
                    through[v1] += 1;
                    through[v2] += 1;
                    through[v3] += 1;
                    if survey.build_list {
                        list.push([v1, v2, v3]);
                    }
                }
            }
        }

        let mut local = vec![0.0; n];
        let mut total_triads = 0_usize;
        for (v, set) in neighbors.iter().enumerate() {
            let d = set.len();
            if d > 1 {
                let triads = d * (d - 1) / 2;
                total_triads += triads;
                local[v] = through[v] as f64 / triads as f64;
            }
        }

        let global_clustering = if total_triads == 0 {
            0.0
        } else {
            3.0 * triangle_count as f64 / total_triads as f64
        };
        let census = TriangleCensus {
            triangle_count,
            total_triads,
            global_clustering,
        };

        if survey.local_clustering {
            self.properties
                .store_computed(VertexProp::UndirLocalClust, local, generation);
        }
        self.triangles = survey
            .build_list
            .then(|| Stamped::new(list, generation));
        self.metrics.census = Some(Stamped::new(census, generation));

        debug!(
            triangles = triangle_count,
            triads = total_triads,
            global_clustering,
            "triangle survey complete"
        );
        census
    }

    /// Triangle census, surveying first if needed.
    pub fn triangle_census(&mut self) -> TriangleCensus {
        if let Some(c) = current(self.metrics.census.as_ref(), self.generation) {
            return *c;
        }
        self.survey_triangles(TriangleSurvey::default())
    }

    pub fn triangle_count(&mut self) -> usize {
        self.triangle_census().triangle_count
    }

    pub fn total_triads(&mut self) -> usize {
        self.triangle_census().total_triads
    }

    pub fn global_clustering(&mut self) -> f64 {
        self.triangle_census().global_clustering
    }

    /// Triangles from the last survey, as `[a, b, c]` with `a < b < c`.
    ///
    /// `None` if no list was built or the graph changed since.
    #[must_use]
    pub fn triangles(&self) -> Option<&[[usize; 3]]> {
        current(self.triangles.as_ref(), self.generation).map(Vec::as_slice)
    }
}
