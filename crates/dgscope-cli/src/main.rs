#![forbid(unsafe_code)]

mod config;
mod output;

use std::env;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dgscope_core::{
    DirectedGraph, PropertyColumn, VertexIdMode, load_edgelist, load_vertex_property,
    save_vertex_properties,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "dgs: structural analysis of directed graphs",
    long_about = None
)]
struct Cli {
    /// Settings file (defaults to ./dgs.toml when present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Shared inputs: the edge list plus optional property columns.
#[derive(clap::Args, Debug)]
struct GraphArgs {
    /// Whitespace-separated edge list, one `source target` pair per line.
    #[arg(value_name = "EDGELIST")]
    edgelist: PathBuf,

    /// Load a vertex property column, as FILE:COLUMN:NAME (repeatable).
    #[arg(long = "prop", value_name = "FILE:COL:NAME")]
    prop_files: Vec<PropArg>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Print graph-level metrics")]
    Summary {
        #[command(flatten)]
        graph: GraphArgs,

        /// Emit JSON instead of aligned text.
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Write a per-vertex property table")]
    Vertices {
        #[command(flatten)]
        graph: GraphArgs,

        /// Output file.
        #[arg(long, short, value_name = "FILE")]
        out: PathBuf,

        /// Comma-separated property names (default: config, then all).
        #[arg(long, value_delimiter = ',')]
        props: Option<Vec<String>>,

        /// Row identifier: name, numeric or none.
        #[arg(long)]
        id_mode: Option<VertexIdMode>,

        /// Column width.
        #[arg(long)]
        width: Option<usize>,

        /// Omit the header line.
        #[arg(long)]
        no_header: bool,
    },

    #[command(about = "List every triangle by vertex names")]
    Triangles {
        #[command(flatten)]
        graph: GraphArgs,
    },
}

/// `FILE:COLUMN:NAME`; the file part may itself contain `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PropArg {
    path: PathBuf,
    column: usize,
    name: String,
}

impl FromStr for PropArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, ':');
        let (Some(name), Some(column), Some(path)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("expected FILE:COLUMN:NAME, got '{s}'"));
        };
        let column: usize = column
            .parse()
            .map_err(|_| format!("column '{column}' is not a positive integer"))?;
        if column == 0 || name.is_empty() || path.is_empty() {
            return Err(format!("expected FILE:COLUMN:NAME, got '{s}'"));
        }
        Ok(Self {
            path: PathBuf::from(path),
            column,
            name: name.to_string(),
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DGS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "dgscope=debug,dgs=debug,info"
        } else {
            "dgscope=info,dgs=info,warn"
        })
    });

    let format = env::var("DGS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

/// Load the edge list, then every requested property column.
fn load_graph(args: &GraphArgs) -> Result<DirectedGraph> {
    let mut graph = DirectedGraph::new();
    let edges = load_edgelist(&args.edgelist, &mut graph)
        .with_context(|| format!("failed to load edge list {}", args.edgelist.display()))?;
    info!(
        edges,
        vertices = graph.vertex_count(),
        path = %args.edgelist.display(),
        "edge list loaded"
    );

    for prop in &args.prop_files {
        let column = PropertyColumn::new(prop.name.clone()).column(prop.column);
        load_vertex_property(&prop.path, &mut graph, &column).with_context(|| {
            format!(
                "failed to load property {} from {}",
                prop.name,
                prop.path.display()
            )
        })?;
    }
    Ok(graph)
}

fn run_summary(args: &GraphArgs, json: bool) -> Result<()> {
    let mut graph = load_graph(args)?;
    let summary = graph.summarize().context("failed to compute graph metrics")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if json {
        output::json(&mut out, &summary)?;
    } else {
        output::summary(&mut out, &summary)?;
    }
    out.flush()?;
    Ok(())
}

struct VertexTableArgs<'a> {
    out: &'a Path,
    props: Option<&'a [String]>,
    id_mode: Option<VertexIdMode>,
    width: Option<usize>,
    no_header: bool,
}

fn run_vertices(
    args: &GraphArgs,
    table: &VertexTableArgs<'_>,
    config: &config::CliConfig,
) -> Result<()> {
    let mut graph = load_graph(args)?;
    graph.summarize().context("failed to compute graph metrics")?;

    let mut options = config.output.table_options();
    if let Some(mode) = table.id_mode {
        options.id_mode = mode;
    }
    if let Some(width) = table.width {
        options.width = width;
    }
    if table.no_header {
        options.header = false;
    }
    if options.width == 0 {
        bail!("column width must be at least 1");
    }

    let columns: Vec<String> = match table.props {
        Some(names) => names.to_vec(),
        None => config
            .output
            .properties
            .iter()
            .cloned()
            .chain(args.prop_files.iter().map(|p| p.name.clone()))
            .collect(),
    };

    save_vertex_properties(table.out, &graph, &columns, options)
        .with_context(|| format!("failed to write vertex table {}", table.out.display()))?;
    info!(
        path = %table.out.display(),
        rows = graph.vertex_count(),
        columns = columns.len(),
        "vertex table written"
    );
    Ok(())
}

fn run_triangles(args: &GraphArgs) -> Result<()> {
    let mut graph = load_graph(args)?;
    let count = graph.triangle_count();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for triangle in graph.triangles().unwrap_or_default() {
        let names: Vec<&str> = triangle
            .iter()
            .map(|&v| graph.vertex_name(v).unwrap_or_default())
            .collect();
        writeln!(out, "{}", names.join(" "))?;
    }
    out.flush()?;
    info!(triangles = count, "triangles listed");
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Summary { graph, json } => run_summary(graph, *json),
        Commands::Vertices {
            graph,
            out,
            props,
            id_mode,
            width,
            no_header,
        } => run_vertices(
            graph,
            &VertexTableArgs {
                out,
                props: props.as_deref(),
                id_mode: *id_mode,
                width: *width,
                no_header: *no_header,
            },
            &config,
        ),
        Commands::Triangles { graph } => run_triangles(graph),
    }
}
