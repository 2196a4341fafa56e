//! `tasty-templates`: Validates and resolves template files.
//!
//! **Usage:**
//! ```text
//! tasty-templates <file>... [--schema <schema>] [--ontology-version <v>]
//!                 [--ontology <defs.ttl>] [--config <settings.toml>]
//! ```
//!
//! Point-group templates from every file are resolved and registered first,
//! then equipment templates. Exits non-zero if any template fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tasty_clients::{init_logging, OntologyArgs, Settings};
use tasty_templates::{
    load_templates_json, load_templates_yaml, template_type, EquipmentTemplate,
    PointGroupTemplate, TemplateContext, TemplateRegistry, TemplateType,
};

/// Resolve template files.
#[derive(Parser)]
#[command(name = "tasty-templates", about = "Validate and resolve template files")]
struct Args {
    /// YAML (`.yaml`, `.yml`) or JSON template files.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    ontology: OntologyArgs,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let settings = Settings::resolve(&args.ontology)?;
    let ctx = TemplateContext::new(settings.catalog()?, settings.classifier());
    let registry = TemplateRegistry::new();

    let mut records: Vec<(String, Value)> = Vec::new();
    for path in &args.files {
        let src = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let loaded = if is_json {
            load_templates_json(&src)
        } else {
            load_templates_yaml(&src)
        }
        .with_context(|| format!("Failed to load {}", path.display()))?;
        records.extend(loaded.into_iter().map(|r| (path.display().to_string(), r)));
    }

    let mut failed = 0usize;
    let label = |file: &str, record: &Value| {
        let symbol = record.get("symbol").and_then(Value::as_str).unwrap_or("?");
        format!("{file}: {symbol}")
    };

    println!("Point groups");
    for (file, record) in records
        .iter()
        .filter(|(_, r)| template_type(r) == Some(TemplateType::PointGroup))
    {
        match PointGroupTemplate::build(record.clone(), &ctx, &registry) {
            Ok(pg) => println!(
                "  [PASS] {} ({} telemetry points)",
                label(file, record),
                pg.telemetry_points().len()
            ),
            Err(e) => {
                failed += 1;
                println!("  [FAIL] {}: {e}", label(file, record));
            }
        }
    }

    println!("Equipment");
    for (file, record) in records
        .iter()
        .filter(|(_, r)| template_type(r) == Some(TemplateType::Equipment))
    {
        match EquipmentTemplate::build(record.clone(), &ctx, &registry) {
            Ok(eq) if eq.is_fully_resolved() => println!(
                "  [PASS] {} extends {}",
                label(file, record),
                eq.extends().map(|c| c.curie()).unwrap_or_default()
            ),
            Ok(eq) => {
                let missing: Vec<&str> = eq.unresolved().collect();
                println!(
                    "  [WARN] {}: unresolved telemetry {}",
                    label(file, record),
                    missing.join(", ")
                );
            }
            Err(e) => {
                failed += 1;
                println!("  [FAIL] {}: {e}", label(file, record));
            }
        }
    }

    let skipped = records
        .iter()
        .filter(|(_, r)| {
            !matches!(
                template_type(r),
                Some(TemplateType::PointGroup | TemplateType::Equipment)
            )
        })
        .count();
    println!();
    println!(
        "Summary: {} templates, {} entities interned, {} skipped, {} failed",
        records.len(),
        registry.entity_count(),
        skipped,
        failed
    );

    if failed > 0 {
        eprintln!("Template resolution FAILED: {failed} template(s) did not resolve.");
        process::exit(1);
    }
    Ok(())
}
