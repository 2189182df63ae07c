//! Human and JSON rendering of command results.

use std::io::{self, Write};

use dgscope_core::GraphSummary;
use serde::Serialize;

/// Render a left-aligned key/value line.
pub fn kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<26} {}", format!("{key}:"), value.as_ref())
}

/// Pretty-printed JSON followed by a newline.
pub fn json<T: Serialize>(w: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}

fn float(x: f64) -> String {
    format!("{x:.6}")
}

/// The aligned text report for `dgs summary`.
pub fn summary(w: &mut dyn Write, s: &GraphSummary) -> io::Result<()> {
    kv(w, "vertices", s.vertices.to_string())?;
    kv(w, "edges", s.edges.to_string())?;
    kv(w, "density", float(s.density))?;
    kv(w, "average in-degree", float(s.average_in_degree))?;
    kv(w, "average out-degree", float(s.average_out_degree))?;
    kv(w, "isolated vertices", s.isolated.to_string())?;
    kv(w, "degree-one vertices", s.degree_one.to_string())?;
    kv(w, "reciprocal edges", s.reciprocal_edges.to_string())?;
    kv(w, "reciprocity ratio", float(s.reciprocity_ratio))?;
    kv(
        w,
        "reciprocity statistic",
        s.reciprocity_stat.map_or_else(|| "undefined".to_string(), float),
    )?;
    kv(w, "triangles", s.triangles.to_string())?;
    kv(w, "triads", s.triads.to_string())?;
    kv(w, "average local clustering", float(s.average_local_clustering))?;
    kv(w, "global clustering", float(s.global_clustering))?;
    for (topology, count) in s.spectrum.iter() {
        kv(w, &format!("triangles ({topology})"), count.to_string())?;
    }
    Ok(())
}
