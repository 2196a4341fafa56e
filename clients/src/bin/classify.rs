//! `tasty-classify`: Classifies a hyphen-joined tag string against an ontology.
//!
//! **Usage:**
//! ```text
//! tasty-classify <tags> [--fields <json>] [--schema <schema>] [--ontology-version <v>]
//!                [--ontology <defs.ttl>] [--max-tokens <n>] [--config <settings.toml>]
//! ```
//!
//! Prints the classification as JSON. With `--fields`, explicit property
//! metadata is merged in the same way templates merge it.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value;
use tasty_clients::{init_logging, OntologyArgs, Settings};
use tasty_templates::EntityTemplate;

/// Classify a tag string.
#[derive(Parser)]
#[command(name = "tasty-classify", about = "Classify a Haystack or Brick tag string")]
struct Args {
    /// Hyphen-joined tags, e.g. `discharge-air-temp-sensor-point`.
    tags: String,

    /// Property metadata as a JSON object.
    #[arg(long)]
    fields: Option<String>,

    #[command(flatten)]
    ontology: OntologyArgs,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let settings = Settings::resolve(&args.ontology)?;
    let view = settings.view()?;

    let fields = match &args.fields {
        Some(src) => match serde_json::from_str::<Value>(src).context("--fields is not valid JSON")? {
            Value::Object(map) => Some(map),
            _ => bail!("--fields must be a JSON object"),
        },
        None => None,
    };

    let entity = EntityTemplate::resolve(&view, &args.tags, fields.as_ref(), &settings.classifier())
        .with_context(|| format!("Failed to classify '{}'", args.tags))?;
    let out = serde_json::to_string_pretty(&entity).context("Failed to serialize classification")?;
    println!("{out}");
    Ok(())
}
