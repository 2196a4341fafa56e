//! Shared plumbing for the `tasty-*` binaries: the settings file, ontology
//! selection and logging.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use tasty_ontology::{
    schema::V3_9_9, ClassifierConfig, OntologyCatalog, OntologyView, Schema,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Settings read from an optional TOML file.
///
/// ```toml
/// schema = "Haystack"
/// version = "3.9.9"
/// max_tokens = 8
/// ontology = "defs.ttl"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Ontology schema.
    pub schema: Schema,
    /// Ontology version.
    pub version: String,
    /// Classifier token ceiling.
    pub max_tokens: usize,
    /// Turtle defs file replacing the built-in ontology.
    pub ontology: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema: Schema::Haystack,
            version: V3_9_9.to_string(),
            max_tokens: ClassifierConfig::default().max_tokens,
            ontology: None,
        }
    }
}

/// Flags shared by every binary; each overrides the settings file.
#[derive(Debug, Clone, Default, Args)]
pub struct OntologyArgs {
    /// TOML settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Ontology schema (`Haystack` or `Brick`).
    #[arg(long, global = true)]
    pub schema: Option<Schema>,

    /// Ontology version.
    #[arg(long = "ontology-version", global = true)]
    pub version: Option<String>,

    /// Turtle defs file replacing the built-in ontology.
    #[arg(long, global = true)]
    pub ontology: Option<PathBuf>,

    /// Maximum distinct tokens per tag string.
    #[arg(long, global = true)]
    pub max_tokens: Option<usize>,
}

impl Settings {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed TOML or unknown keys.
    pub fn from_toml(src: &str) -> Result<Self> {
        toml::from_str(src).context("Failed to parse settings")
    }

    /// Reads a settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&src).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Loads the settings file named by `args`, if any, and applies the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded.
    pub fn resolve(args: &OntologyArgs) -> Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(schema) = args.schema {
            settings.schema = schema;
        }
        if let Some(version) = &args.version {
            settings.version.clone_from(version);
        }
        if let Some(path) = &args.ontology {
            settings.ontology = Some(path.clone());
        }
        if let Some(max_tokens) = args.max_tokens {
            settings.max_tokens = max_tokens;
        }
        Ok(settings)
    }

    /// Classifier limits.
    #[must_use]
    pub fn classifier(&self) -> ClassifierConfig {
        ClassifierConfig {
            max_tokens: self.max_tokens,
        }
    }

    /// A catalogue of the built-ins, plus the Turtle defs file if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the defs file cannot be read or parsed.
    pub fn catalog(&self) -> Result<OntologyCatalog> {
        let mut catalog = OntologyCatalog::new();
        if let Some(path) = &self.ontology {
            let src = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let view = OntologyView::from_turtle(self.schema, &self.version, &src)
                .with_context(|| format!("Failed to load ontology {}", path.display()))?;
            info!(path = %path.display(), subjects = view.subject_count(), "loaded ontology");
            catalog.insert(Arc::new(view));
        }
        Ok(catalog)
    }

    /// The view for the configured schema and version.
    ///
    /// # Errors
    ///
    /// Returns an error if the pair is unsupported or the defs file fails to load.
    pub fn view(&self) -> Result<Arc<OntologyView>> {
        self.catalog()?
            .get(self.schema, &self.version)
            .with_context(|| format!("No ontology for {} {}", self.schema, self.version))
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_haystack_3_9_9() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.classifier(), ClassifierConfig::default());
    }

    #[test]
    fn flags_override_file() {
        let mut settings = Settings::from_toml("schema = \"Brick\"\nversion = \"1.1\"\nmax_tokens = 4\n").unwrap();
        assert_eq!(settings.schema, Schema::Brick);
        assert_eq!(settings.max_tokens, 4);

        settings = Settings::resolve(&OntologyArgs {
            max_tokens: Some(6),
            ..OntologyArgs::default()
        })
        .unwrap();
        assert_eq!(settings.max_tokens, 6);
        assert_eq!(settings.schema, Schema::Haystack);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_toml("colour = \"red\"").is_err());
    }

    #[test]
    fn builtin_view_without_defs_file() {
        let view = Settings::default().view().unwrap();
        assert_eq!(view.version(), "3.9.9");
    }
}
