#![forbid(unsafe_code)]
//! dgscope-core: structural analysis of directed simple graphs.
//!
//! Builds a [`DirectedGraph`] from named edges and computes degrees,
//! density, reciprocity, triangle census with undirected clustering, and the
//! triangle spectrum (triangles grouped by directed wiring).
//!
//! ```rust
//! use dgscope_core::{DirectedGraph, TriangleTopology};
//!
//! let mut g = DirectedGraph::from_named_edges([
//!     ("A", "B"), ("B", "A"), ("B", "C"), ("C", "B"), ("A", "C"),
//! ]);
//! assert_eq!(g.edge_count(), 5);
//! assert_eq!(g.triangle_count(), 1);
//! assert_eq!(g.triangle_spectrum().get(TriangleTopology::FiveCycle), 1);
//! ```
//!
//! # Conventions
//!
//! - **Errors**: fallible operations return [`Result`] with [`GraphError`].
//!   Rejected edges (self-loops, repeats, unknown names) are not errors and
//!   show up as `false` return values.
//! - **Logging**: `tracing` macros only; every metric pass is
//!   `#[instrument]`ed and ends with a `debug!` summary. Installing a
//!   subscriber is up to the caller.

pub mod error;
pub mod graph;
pub mod io;
pub mod metrics;

pub use error::{GraphError, Result};
pub use graph::{DirectedGraph, VertexLookup, VertexProp};
pub use io::edgelist::{load_edgelist, read_edgelist};
pub use io::properties::{PropertyColumn, load_vertex_property, read_vertex_property};
pub use io::table::{TableOptions, VertexIdMode, save_vertex_properties, write_vertex_properties};
pub use metrics::degree::DegreeTallies;
pub use metrics::reciprocity::Reciprocity;
pub use metrics::spectrum::{PairLink, TriangleSpectrum, TriangleTopology};
pub use metrics::summary::GraphSummary;
pub use metrics::triangles::{TriangleCensus, TriangleSurvey};
