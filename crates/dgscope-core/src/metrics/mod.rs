//! Structural metrics computed on a [`crate::DirectedGraph`].
//!
//! # Overview
//!
//! Each submodule adds methods to `DirectedGraph` for one family of metrics:
//!
//! - **Degree** (`degree`): in/out degree per vertex, isolated and
//!   degree-one tallies, density.
//! - **Reciprocity** (`reciprocity`): how many edges are returned, at graph
//!   and vertex level.
//! - **Triangles** (`triangles`): triangle enumeration plus undirected local
//!   and global clustering.
//! - **Spectrum** (`spectrum`): triangles grouped into seven classes by
//!   their directed wiring.
//! - **Summary** (`summary`): everything above as one serializable report.
//!
//! # Usage
//!
//! `compute_*` / `survey_*` methods always recompute. The plain accessors
//! (`reciprocity()`, `triangle_count()`, ...) reuse a cached value when it
//! was computed at the current graph generation.
//!
//! ```rust
//! use dgscope_core::DirectedGraph;
//!
//! let mut g = DirectedGraph::from_named_edges([("a", "b"), ("b", "c"), ("c", "a")]);
//! assert_eq!(g.triangle_count(), 1);
//! assert_eq!(g.reciprocal_edge_count(), 0);
//! ```

pub mod degree;
pub mod reciprocity;
pub mod spectrum;
pub mod summary;
pub mod triangles;
