//! One-shot structural report.

use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::graph::DirectedGraph;
use crate::graph::properties::VertexProp;
use crate::metrics::spectrum::TriangleSpectrum;
use crate::metrics::triangles::TriangleSurvey;

/// Graph-level metrics, frozen at the generation they were computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub vertices: usize,
    pub edges: usize,
    pub density: f64,
    pub average_in_degree: f64,
    pub average_out_degree: f64,
    /// Vertices with no edges.
    pub isolated: usize,
    /// Vertices with exactly one incident edge.
    pub degree_one: usize,
    pub reciprocal_edges: usize,
    pub reciprocity_ratio: f64,
    pub reciprocity_stat: Option<f64>,
    pub triangles: usize,
    pub triads: usize,
    pub average_local_clustering: f64,
    pub global_clustering: f64,
    pub spectrum: TriangleSpectrum,
}

impl DirectedGraph {
    /// Run every metric pass and collect the graph-level results.
    ///
    /// # Errors
    ///
    /// Only if a freshly computed property cannot be read back, which
    /// indicates a bug rather than bad input.
    #[instrument(skip(self))]
    pub fn summarize(&mut self) -> Result<GraphSummary> {
        let tallies = self.compute_degrees();
        let reciprocity = self.compute_reciprocity();
        let census = self.survey_triangles(TriangleSurvey::default());
        let spectrum = self.compile_triangle_spectrum();

        Ok(GraphSummary {
            vertices: self.vertex_count(),
            edges: self.edge_count(),
            density: self.density(),
            average_in_degree: self.average_vertex_property(VertexProp::InDegree.name())?,
            average_out_degree: self.average_vertex_property(VertexProp::OutDegree.name())?,
            isolated: tallies.isolated,
            degree_one: tallies.degree_one,
            reciprocal_edges: reciprocity.reciprocal_edges,
            reciprocity_ratio: reciprocity.ratio,
            reciprocity_stat: reciprocity.stat,
            triangles: census.triangle_count,
            triads: census.total_triads,
            average_local_clustering: self
                .average_vertex_property(VertexProp::UndirLocalClust.name())?,
            global_clustering: census.global_clustering,
            spectrum,
        })
    }
}
