//! The directed graph object and its owned building blocks.
//!
//! # Overview
//!
//! [`DirectedGraph`] owns every structure involved in an analysis:
//!
//! ```text
//! names / (name, name) pairs
//!        ↓  index::VertexIndex, edges::EdgeStore
//! vertex IDs 0..|V|, ordered edge set
//!        ↓  adjacency::Adjacency::build()
//! in/out neighbor lists
//!        ↓  crate::metrics (degrees, reciprocity, triangles, spectrum)
//! properties::PropertyStore + cached scalar metrics
//! ```
//!
//! ## Staleness
//!
//! Every successful mutation (new vertex, new edge) bumps
//! [`DirectedGraph::generation`]. Derived structures remember the generation
//! they were built at. The adjacency and scalar metrics are rebuilt on demand
//! when stale; computed vertex properties refuse to be read when stale.
//!
//! ## Threading
//!
//! Mutation and lazy computation need `&mut DirectedGraph`. Once a caller
//! stops mutating, shared references (or a [`crate::GraphSummary`]) can be
//! handed to other threads.

pub mod adjacency;
pub mod edges;
pub mod index;
pub mod properties;

use tracing::{instrument, trace};

use crate::error::{GraphError, Result};
use crate::metrics::degree::DegreeTallies;
use crate::metrics::reciprocity::Reciprocity;
use crate::metrics::spectrum::TriangleSpectrum;
use crate::metrics::triangles::TriangleCensus;

pub use adjacency::Adjacency;
pub use edges::EdgeStore;
pub use index::{VertexIndex, VertexLookup};
pub use properties::{PropertyStore, VertexProp};

// ---------------------------------------------------------------------------
// Generation-stamped cache entries
// ---------------------------------------------------------------------------

/// A derived value together with the generation it was computed at.
#[derive(Debug, Clone)]
pub(crate) struct Stamped<T> {
    pub(crate) value: T,
    pub(crate) generation: u64,
}

impl<T> Stamped<T> {
    pub(crate) const fn new(value: T, generation: u64) -> Self {
        Self { value, generation }
    }
}

/// Read a cache slot only if it matches `generation`.
pub(crate) fn current<T>(slot: Option<&Stamped<T>>, generation: u64) -> Option<&T> {
    slot.filter(|s| s.generation == generation).map(|s| &s.value)
}

/// Scalar graph-level results, each computed lazily.
#[derive(Debug, Clone, Default)]
pub(crate) struct MetricCache {
    pub(crate) degrees: Option<Stamped<DegreeTallies>>,
    pub(crate) reciprocity: Option<Stamped<Reciprocity>>,
    pub(crate) census: Option<Stamped<TriangleCensus>>,
    pub(crate) spectrum: Option<Stamped<TriangleSpectrum>>,
}

/// Return `slot`'s adjacency, rebuilding it first if missing or stale.
pub(crate) fn refresh_adjacency<'a>(
    slot: &'a mut Option<Adjacency>,
    vertex_count: usize,
    edges: &EdgeStore,
    generation: u64,
) -> &'a Adjacency {
    let adjacency = slot
        .take()
        .filter(|adj| adj.is_current(generation))
        .unwrap_or_else(|| Adjacency::build(vertex_count, edges, generation));
    slot.insert(adjacency)
}

// ---------------------------------------------------------------------------
// DirectedGraph
// ---------------------------------------------------------------------------

/// A directed, unweighted, simple graph plus everything derived from it.
#[derive(Debug, Clone, Default)]
pub struct DirectedGraph {
    pub(crate) index: VertexIndex,
    pub(crate) edges: EdgeStore,
    pub(crate) adjacency: Option<Adjacency>,
    pub(crate) properties: PropertyStore,
    pub(crate) metrics: MetricCache,
    pub(crate) triangles: Option<Stamped<Vec<[usize; 3]>>>,
    pub(crate) generation: u64,
}

impl DirectedGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(source, target)` name pairs.
    #[must_use]
    pub fn from_named_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut graph = Self::new();
        for (source, target) in edges {
            graph.add_edge_by_name(source, target, VertexLookup::Create);
        }
        graph
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Mutation counter; increases on every new vertex or edge.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    // -- vertices -----------------------------------------------------------

    /// Return the ID for `name`, creating the vertex if `lookup` allows.
    ///
    /// With [`VertexLookup::IgnoreUnknown`] an unknown name returns the
    /// sentinel [`Self::vertex_count`] and the graph is not modified.
    pub fn add_vertex(&mut self, name: &str, lookup: VertexLookup) -> usize {
        let before = self.index.len();
        let id = self.index.get_or_create(name, lookup);
        if self.index.len() != before {
            self.generation += 1;
            trace!(name, id, "vertex created");
        }
        id
    }

    #[must_use]
    pub fn vertex_id(&self, name: &str) -> Option<usize> {
        self.index.id(name)
    }

    #[must_use]
    pub fn vertex_name(&self, id: usize) -> Option<&str> {
        self.index.name(id)
    }

    /// Vertex names indexed by ID.
    #[must_use]
    pub fn vertex_names(&self) -> &[String] {
        self.index.names()
    }

    // -- edges --------------------------------------------------------------

    /// Add `source → target` by ID.
    ///
    /// Returns `false` without touching the graph for self-loops, unknown
    /// IDs and edges that already exist.
    pub fn add_edge(&mut self, source: usize, target: usize) -> bool {
        let added = self.edges.insert(source, target, self.index.len());
        if added {
            self.generation += 1;
        }
        added
    }

    /// Add `source → target` by name.
    ///
    /// Self-loops are rejected before any vertex is created. With
    /// [`VertexLookup::IgnoreUnknown`] the edge is refused unless both
    /// endpoints already exist.
    pub fn add_edge_by_name(&mut self, source: &str, target: &str, lookup: VertexLookup) -> bool {
        if source == target {
            return false;
        }
        let u = self.add_vertex(source, lookup);
        if u == self.vertex_count() {
            return false;
        }
        let v = self.add_vertex(target, lookup);
        if v == self.vertex_count() {
            return false;
        }
        self.add_edge(u, v)
    }

    #[must_use]
    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        self.edges.contains(source, target)
    }

    /// Edges in ascending `(source, target)` order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter()
    }

    // -- adjacency ----------------------------------------------------------

    /// Rebuild the adjacency unconditionally.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn build_adjacency(&mut self) -> &Adjacency {
        self.adjacency
            .insert(Adjacency::build(self.index.len(), &self.edges, self.generation))
    }

    /// The adjacency for the current generation, rebuilt if stale.
    pub fn adjacency(&mut self) -> &Adjacency {
        refresh_adjacency(
            &mut self.adjacency,
            self.index.len(),
            &self.edges,
            self.generation,
        )
    }

    /// `true` if an adjacency exists and reflects the current edge set.
    #[must_use]
    pub fn has_current_adjacency(&self) -> bool {
        self.adjacency
            .as_ref()
            .is_some_and(|adj| adj.is_current(self.generation))
    }

    // -- vertex properties --------------------------------------------------

    /// Register a custom real-valued vertex property, zero-initialized.
    ///
    /// Fill it with [`Self::set_vertex_property`].
    ///
    /// # Errors
    ///
    /// [`crate::GraphError::PropertyExists`] if the name is taken.
    pub fn add_vertex_property(&mut self, name: &str, header: &str) -> Result<()> {
        self.properties.register(name, header, false)?;
        self.properties
            .store_loaded(name, vec![0.0; self.vertex_count()]);
        Ok(())
    }

    /// Register a custom integer-valued vertex property, zero-initialized.
    ///
    /// # Errors
    ///
    /// [`crate::GraphError::PropertyExists`] if the name is taken.
    pub fn add_vertex_integer_property(&mut self, name: &str, header: &str) -> Result<()> {
        self.properties.register(name, header, true)?;
        self.properties
            .store_loaded(name, vec![0.0; self.vertex_count()]);
        Ok(())
    }

    /// Replace the values of a custom vertex property, one per vertex ID.
    ///
    /// Also the way to refill a custom column after vertices were added.
    ///
    /// # Errors
    ///
    /// - [`GraphError::UnknownProperty`] if `name` is not registered.
    /// - [`GraphError::BuiltinProperty`] for [`VertexProp`] names.
    /// - [`GraphError::PropertyLength`] unless there is one value per vertex.
    pub fn set_vertex_property(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if VertexProp::from_name(name).is_some() {
            return Err(GraphError::BuiltinProperty {
                name: name.to_owned(),
            });
        }
        if !self.properties.is_registered(name) {
            return Err(GraphError::UnknownProperty {
                name: name.to_owned(),
            });
        }
        if values.len() != self.vertex_count() {
            return Err(GraphError::PropertyLength {
                name: name.to_owned(),
                expected: self.vertex_count(),
                found: values.len(),
            });
        }
        self.properties.store_loaded(name, values);
        Ok(())
    }

    /// Values of a vertex property, one per vertex ID.
    ///
    /// # Errors
    ///
    /// Unknown, never computed, wrong-length or stale properties are errors;
    /// see [`PropertyStore::get`].
    pub fn vertex_property(&self, name: &str) -> Result<&[f64]> {
        self.properties
            .get(name, self.vertex_count(), self.generation)
    }

    /// # Errors
    ///
    /// [`crate::GraphError::UnknownProperty`] for unregistered names.
    pub fn vertex_property_header(&self, name: &str) -> Result<&str> {
        self.properties.header(name)
    }

    /// # Errors
    ///
    /// [`crate::GraphError::UnknownProperty`] for unregistered names.
    pub fn is_integer_property(&self, name: &str) -> Result<bool> {
        self.properties.is_integer(name)
    }

    /// Read-only view of the property registry.
    #[must_use]
    pub const fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    /// Mean of a vertex property; `0.0` for an empty graph.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::vertex_property`].
    #[allow(clippy::cast_precision_loss)]
    pub fn average_vertex_property(&self, name: &str) -> Result<f64> {
        let values = self.vertex_property(name)?;
        if values.is_empty() {
            return Ok(0.0);
        }
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::table::{TableOptions, VertexIdMode, write_vertex_properties};

    #[test]
    fn edge_count_tracks_successful_inserts() {
        let mut g = DirectedGraph::new();
        assert!(g.add_edge_by_name("a", "b", VertexLookup::Create));
        assert!(!g.add_edge_by_name("a", "b", VertexLookup::Create));
        assert!(g.add_edge_by_name("b", "a", VertexLookup::Create));
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn named_self_loop_creates_nothing() {
        let mut g = DirectedGraph::new();
        assert!(!g.add_edge_by_name("a", "a", VertexLookup::Create));
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.generation(), 0);
    }

    #[test]
    fn ignore_unknown_refuses_new_endpoints() {
        let mut g = DirectedGraph::new();
        g.add_vertex("a", VertexLookup::Create);
        assert!(!g.add_edge_by_name("a", "b", VertexLookup::IgnoreUnknown));
        assert!(!g.add_edge_by_name("b", "a", VertexLookup::IgnoreUnknown));
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.edge_count(), 0);

        g.add_vertex("b", VertexLookup::Create);
        assert!(g.add_edge_by_name("a", "b", VertexLookup::IgnoreUnknown));
    }

    #[test]
    fn id_based_add_rejects_unknown_ids() {
        let mut g = DirectedGraph::new();
        g.add_vertex("a", VertexLookup::Create);
        assert!(!g.add_edge(0, 1));
        assert!(!g.add_edge(0, 0));
    }

    #[test]
    fn generation_bumps_only_on_change() {
        let mut g = DirectedGraph::from_named_edges([("a", "b")]);
        let before = g.generation();
        g.add_edge_by_name("a", "b", VertexLookup::Create);
        g.add_vertex("a", VertexLookup::Create);
        assert_eq!(g.generation(), before);
        g.add_edge_by_name("b", "a", VertexLookup::Create);
        assert_eq!(g.generation(), before + 1);
    }

    #[test]
    fn adjacency_refreshes_after_edge_between_known_vertices() {
        let mut g = DirectedGraph::from_named_edges([("a", "b"), ("b", "c")]);
        assert_eq!(g.adjacency().out_degree(0), 1);
        assert!(g.has_current_adjacency());

        // No new vertex: only the generation reveals the change.
        assert!(g.add_edge(0, 2));
        assert!(!g.has_current_adjacency());
        assert_eq!(g.adjacency().out_degree(0), 2);
        assert!(g.has_current_adjacency());
        assert_eq!(g.adjacency().in_degree(2), 2);
    }

    #[test]
    fn custom_property_starts_at_zero() {
        let mut g = DirectedGraph::from_named_edges([("a", "b")]);
        g.add_vertex_property("weight", "W").expect("new name");
        assert_eq!(g.vertex_property("weight").expect("registered"), &[0.0, 0.0]);
        assert_eq!(g.vertex_property_header("weight").expect("registered"), "W");
        assert!(!g.is_integer_property("weight").expect("registered"));

        let err = g.add_vertex_integer_property("weight", "").expect_err("taken");
        assert!(matches!(err, GraphError::PropertyExists { .. }));
    }

    #[test]
    fn property_goes_invalid_when_vertices_are_added() {
        let mut g = DirectedGraph::from_named_edges([("a", "b")]);
        g.add_vertex_integer_property("label", "").expect("new name");
        g.add_vertex("c", VertexLookup::Create);
        let err = g.vertex_property("label").expect_err("length mismatch");
        assert!(matches!(
            err,
            GraphError::PropertyNotComputed {
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn custom_property_can_be_filled_and_written() {
        let mut g = DirectedGraph::from_named_edges([("a", "b"), ("bb", "a")]);
        g.add_vertex_integer_property("rank", "Rank").expect("new name");
        g.set_vertex_property("rank", vec![3.0, 1.0, 2.0])
            .expect("one value per vertex");
        assert_eq!(g.vertex_property("rank").expect("set"), &[3.0, 1.0, 2.0]);
        assert!((g.average_vertex_property("rank").expect("set") - 2.0).abs() < 1e-12);

        let mut out = Vec::new();
        let options = TableOptions {
            id_mode: VertexIdMode::Name,
            width: 4,
            header: true,
        };
        write_vertex_properties(&mut out, &g, &["rank"], options).expect("writable");
        let text = String::from_utf8(out).expect("utf-8");
        assert_eq!(text, "#Vertex Rank \n   a    3 \n   b    1 \n  bb    2 \n");
    }

    #[test]
    fn set_vertex_property_rejects_bad_input() {
        let mut g = DirectedGraph::from_named_edges([("a", "b")]);
        g.add_vertex_property("weight", "W").expect("new name");

        let err = g.set_vertex_property("weight", vec![1.0]).expect_err("short");
        assert!(matches!(
            err,
            GraphError::PropertyLength {
                expected: 2,
                found: 1,
                ..
            }
        ));
        let err = g.set_vertex_property("mass", vec![1.0, 2.0]).expect_err("unregistered");
        assert!(matches!(err, GraphError::UnknownProperty { .. }));
        let err = g
            .set_vertex_property("in-degree", vec![1.0, 2.0])
            .expect_err("builtin");
        assert!(matches!(err, GraphError::BuiltinProperty { .. }));
        assert_eq!(g.vertex_property("weight").expect("untouched"), &[0.0, 0.0]);
    }

    #[test]
    fn custom_property_is_refilled_after_growth() {
        let mut g = DirectedGraph::from_named_edges([("a", "b")]);
        g.add_vertex_property("weight", "").expect("new name");
        g.add_vertex("c", VertexLookup::Create);
        assert!(g.vertex_property("weight").is_err());
        g.set_vertex_property("weight", vec![0.5, 1.5, 2.5])
            .expect("one value per vertex");
        assert_eq!(g.vertex_property("weight").expect("refilled").len(), 3);
    }

    #[test]
    fn average_of_empty_graph_is_zero() {
        let mut g = DirectedGraph::new();
        g.add_vertex_property("x", "").expect("new name");
        assert!((g.average_vertex_property("x").expect("valid") - 0.0).abs() < f64::EPSILON);
    }
}
