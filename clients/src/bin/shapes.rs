//! `tasty-shapes`: Compiles every shape file under a directory into one SHACL graph.
//!
//! **Usage:**
//! ```text
//! tasty-shapes <dir> [--out <path>] [--format turtle|ntriples]
//!              [--schema <schema>] [--ontology-version <v>] [--config <settings.toml>]
//! ```
//!
//! Shape files are the `*.json` files below `<dir>`, loaded in path order.
//! Without `--out` the graph is written to stdout.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tasty_clients::{init_logging, OntologyArgs, Settings};
use tasty_shapes::{to_ntriples, to_turtle, ShapeFile, ShapeLibrary};
use tracing::info;
use walkdir::WalkDir;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Turtle,
    Ntriples,
}

/// Compile shape files.
#[derive(Parser)]
#[command(name = "tasty-shapes", about = "Compile shape files into a SHACL shapes graph")]
struct Args {
    /// Directory searched for `*.json` shape files.
    dir: PathBuf,

    /// Output file (default: stdout).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output serialization.
    #[arg(long, value_enum, default_value = "turtle")]
    format: Format,

    #[command(flatten)]
    ontology: OntologyArgs,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let settings = Settings::resolve(&args.ontology)?;
    let view = settings.view()?;

    let mut library = ShapeLibrary::new();
    for entry in WalkDir::new(&args.dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", args.dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let src = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file = ShapeFile::from_json(&src)
            .with_context(|| format!("Invalid shape file {}", path.display()))?;
        library
            .add_file(file)
            .with_context(|| format!("Failed to add {}", path.display()))?;
    }
    info!(files = library.files().len(), shapes = library.len(), "loaded shape files");

    let graph = library
        .compile_all(&view)
        .context("Failed to compile shapes")?;
    let text = match args.format {
        Format::Turtle => to_turtle(&graph),
        Format::Ntriples => to_ntriples(&graph),
    };

    match &args.out {
        Some(out) => {
            fs::write(out, &text).with_context(|| format!("Failed to write {}", out.display()))?;
            info!(statements = graph.len(), path = %out.display(), "written");
        }
        None => print!("{text}"),
    }
    Ok(())
}
