//! Vertex property column reader.
//!
//! Each line is `name value1 value2 ...`. One value column is selected
//! (1-based, counted after the name) and stored as a new vertex property.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::graph::{DirectedGraph, VertexLookup};
use crate::io::{at_path, is_comment, lossy_lines};

/// Which column to read and how to register it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PropertyColumn {
    /// Registry name of the new property.
    pub name: String,
    /// Table header; empty means "same as name".
    #[serde(default)]
    pub header: String,
    /// 1-based index among the value columns.
    #[serde(default = "default_column")]
    pub column: usize,
    /// What to do with names not yet in the graph.
    #[serde(default = "default_lookup")]
    pub lookup: VertexLookup,
}

const fn default_column() -> usize {
    1
}

const fn default_lookup() -> VertexLookup {
    VertexLookup::IgnoreUnknown
}

impl PropertyColumn {
    /// Read the first value column, ignoring unknown vertices.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: String::new(),
            column: default_column(),
            lookup: default_lookup(),
        }
    }

    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    #[must_use]
    pub const fn column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    #[must_use]
    pub const fn lookup(mut self, lookup: VertexLookup) -> Self {
        self.lookup = lookup;
        self
    }
}

/// Load one property column from `reader` into `graph`.
///
/// Vertices not listed keep the value `0.0`. The property is flagged
/// integer-valued when every value read is integral. Returns the number of
/// values assigned.
///
/// Nothing is registered unless the whole input parses; vertices created
/// along the way (in [`VertexLookup::Create`] mode) are kept.
///
/// # Errors
///
/// - [`GraphError::PropertyExists`] if the name is already registered.
/// - [`GraphError::InvalidColumn`] for column `0`.
/// - [`GraphError::MissingColumn`] / [`GraphError::InvalidValue`] with the
///   1-based line number of the offending line.
/// - [`GraphError::Stream`] if reading fails.
#[instrument(skip(reader, graph), fields(property = %prop.name))]
pub fn read_vertex_property<R: BufRead>(
    reader: R,
    graph: &mut DirectedGraph,
    prop: &PropertyColumn,
) -> Result<usize> {
    if graph.properties.is_registered(&prop.name) {
        return Err(GraphError::PropertyExists {
            name: prop.name.clone(),
        });
    }
    if prop.column == 0 {
        return Err(GraphError::InvalidColumn { column: 0 });
    }
    let column = prop.column;

    let mut values = vec![0.0; graph.vertex_count()];
    let mut integral = true;
    let mut assigned = 0;
    let mut unknown = 0;
    for (line_no, line) in lossy_lines(reader).enumerate() {
        let line = line.map_err(GraphError::Stream)?;
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            continue;
        };
        if is_comment(name) {
            continue;
        }

        let id = graph.add_vertex(name, prop.lookup);
        if id == graph.vertex_count() {
            unknown += 1;
            continue;
        }

        let token = tokens.nth(column - 1).ok_or(GraphError::MissingColumn {
            line: line_no + 1,
            column,
        })?;
        let value: f64 = token.parse().map_err(|_| GraphError::InvalidValue {
            line: line_no + 1,
            token: token.to_owned(),
        })?;

        if id >= values.len() {
            values.resize(graph.vertex_count(), 0.0);
        }
        values[id] = value;
        integral &= value.fract() == 0.0;
        assigned += 1;
    }
    values.resize(graph.vertex_count(), 0.0);

    graph.properties.register(&prop.name, &prop.header, integral)?;
    graph.properties.store_loaded(&prop.name, values);

    debug!(assigned, unknown, integral, "vertex property loaded");
    Ok(assigned)
}

/// [`read_vertex_property`] on the file at `path`.
///
/// # Errors
///
/// As [`read_vertex_property`]; I/O failures are reported as
/// [`GraphError::Io`] naming `path`.
pub fn load_vertex_property(
    path: impl AsRef<Path>,
    graph: &mut DirectedGraph,
    prop: &PropertyColumn,
) -> Result<usize> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
    read_vertex_property(BufReader::new(file), graph, prop).map_err(at_path(path))
}
