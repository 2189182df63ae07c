//! Edge list reader.
//!
//! One edge per line: `source target [ignored...]`, names separated by
//! whitespace. Blank lines, comments and lines with a single token are
//! skipped. Names are not required to be valid UTF-8; invalid bytes are
//! replaced with `U+FFFD`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::error::{GraphError, Result};
use crate::graph::{DirectedGraph, VertexLookup};
use crate::io::{at_path, is_comment, lossy_lines};

/// Add every edge listed in `reader` to `graph`, creating vertices as needed.
///
/// Returns the number of edges actually inserted; self-loops and repeats
/// are skipped silently.
///
/// # Errors
///
/// [`GraphError::Stream`] if reading fails.
#[instrument(skip_all)]
pub fn read_edgelist<R: BufRead>(reader: R, graph: &mut DirectedGraph) -> Result<usize> {
    let mut inserted = 0;
    let mut skipped = 0;
    for (line_no, line) in lossy_lines(reader).enumerate() {
        let line = line.map_err(GraphError::Stream)?;
        let mut tokens = line.split_whitespace();
        let Some(source) = tokens.next() else {
            continue;
        };
        if is_comment(source) {
            continue;
        }
        let Some(target) = tokens.next() else {
            trace!(line = line_no + 1, "single-token line skipped");
            continue;
        };
        if graph.add_edge_by_name(source, target, VertexLookup::Create) {
            inserted += 1;
        } else {
            skipped += 1;
        }
    }
    debug!(
        inserted,
        skipped,
        vertices = graph.vertex_count(),
        "edge list read"
    );
    Ok(inserted)
}

/// [`read_edgelist`] on the file at `path`.
///
/// # Errors
///
/// [`GraphError::Io`] naming `path` if it cannot be opened or read.
pub fn load_edgelist(path: impl AsRef<Path>, graph: &mut DirectedGraph) -> Result<usize> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
    read_edgelist(BufReader::new(file), graph).map_err(at_path(path))
}
