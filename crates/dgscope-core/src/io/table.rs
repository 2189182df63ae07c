//! Fixed-width vertex property table writer.
//!
//! ```text
//! #        Vertex           InDeg          OutDeg    ReciproRatio
//!               a               0               1    0.000000e+00
//!               b               1               0    0.000000e+00
//! ```
//!
//! Every cell is right-aligned to the column width and followed by a single
//! space. Rows are ordered by name length, then lexicographically. Integer
//! properties print without decimals, all others in C-style scientific
//! notation with six digits.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::graph::DirectedGraph;

/// How rows identify their vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexIdMode {
    /// Vertex name.
    #[default]
    Name,
    /// Internal vertex ID.
    Numeric,
    /// No identifier column.
    None,
}

impl VertexIdMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Numeric => "numeric",
            Self::None => "none",
        }
    }
}

impl fmt::Display for VertexIdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VertexIdMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "numeric" | "num" => Ok(Self::Numeric),
            "none" => Ok(Self::None),
            other => Err(format!(
                "unknown vertex id mode '{other}' (expected name, numeric or none)"
            )),
        }
    }
}

/// Layout options for [`write_vertex_properties`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub id_mode: VertexIdMode,
    /// Column width in characters.
    pub width: usize,
    /// Emit the `#`-prefixed header line.
    pub header: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            id_mode: VertexIdMode::Name,
            width: 15,
            header: true,
        }
    }
}

struct Column<'g> {
    header: &'g str,
    integer: bool,
    values: &'g [f64],
}

/// Look up every requested property before anything is written.
fn collect_columns<'g, S: AsRef<str>>(
    graph: &'g DirectedGraph,
    props: &[S],
) -> Result<Vec<Column<'g>>> {
    props
        .iter()
        .map(|name| {
            let name = name.as_ref();
            Ok(Column {
                values: graph.vertex_property(name)?,
                header: graph.vertex_property_header(name)?,
                integer: graph.is_integer_property(name)?,
            })
        })
        .collect()
}

/// Vertex IDs ordered by name length, then name.
fn row_order(graph: &DirectedGraph) -> Vec<usize> {
    let names = graph.vertex_names();
    let mut order: Vec<usize> = (0..names.len()).collect();
    order.sort_by(|&a, &b| {
        let (x, y) = (&names[a], &names[b]);
        x.len().cmp(&y.len()).then_with(|| x.cmp(y)).then(a.cmp(&b))
    });
    order
}

/// Format like C's `%.6e`: two-digit signed exponent, lowercase specials.
#[must_use]
pub fn scientific(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    let formatted = format!("{value:.6e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

fn write_table<W: Write>(
    out: &mut W,
    graph: &DirectedGraph,
    columns: &[Column<'_>],
    options: TableOptions,
) -> std::io::Result<()> {
    let width = options.width;

    if options.header {
        let mut headers: Vec<&str> = Vec::with_capacity(columns.len() + 1);
        if options.id_mode != VertexIdMode::None {
            headers.push("Vertex");
        }
        headers.extend(columns.iter().map(|c| c.header));

        write!(out, "#")?;
        for (i, header) in headers.iter().enumerate() {
            let w = if i == 0 { width.saturating_sub(1) } else { width };
            write!(out, "{header:>w$} ")?;
        }
        writeln!(out)?;
    }

    for v in row_order(graph) {
        match options.id_mode {
            VertexIdMode::Name => {
                let name = graph.vertex_name(v).unwrap_or_default();
                write!(out, "{name:>width$} ")?;
            }
            VertexIdMode::Numeric => write!(out, "{v:>width$} ")?,
            VertexIdMode::None => {}
        }
        for column in columns {
            let value = column.values[v];
            if column.integer {
                write!(out, "{value:>width$.0} ")?;
            } else {
                write!(out, "{:>width$} ", scientific(value))?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write the requested vertex properties as a table.
///
/// # Errors
///
/// - Property errors from [`DirectedGraph::vertex_property`], raised before
///   any byte is written.
/// - [`GraphError::Stream`] if writing fails.
#[instrument(skip(out, graph, props))]
pub fn write_vertex_properties<W: Write, S: AsRef<str>>(
    mut out: W,
    graph: &DirectedGraph,
    props: &[S],
    options: TableOptions,
) -> Result<()> {
    let columns = collect_columns(graph, props)?;
    write_table(&mut out, graph, &columns, options).map_err(GraphError::Stream)?;
    out.flush().map_err(GraphError::Stream)?;
    debug!(
        rows = graph.vertex_count(),
        columns = columns.len(),
        "vertex table written"
    );
    Ok(())
}

/// [`write_vertex_properties`] into a new file at `path`.
///
/// The file is only created once every property has been validated.
///
/// # Errors
///
/// As [`write_vertex_properties`]; I/O failures are reported as
/// [`GraphError::Io`] naming `path`.
pub fn save_vertex_properties<S: AsRef<str>>(
    path: impl AsRef<Path>,
    graph: &DirectedGraph,
    props: &[S],
    options: TableOptions,
) -> Result<()> {
    let path = path.as_ref();
    let columns = collect_columns(graph, props)?;
    let file = File::create(path).map_err(|e| GraphError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_table(&mut out, graph, &columns, options)
        .and_then(|()| out.flush())
        .map_err(|e| GraphError::io(path, e))?;
    debug!(path = %path.display(), rows = graph.vertex_count(), "vertex table saved");
    Ok(())
}
