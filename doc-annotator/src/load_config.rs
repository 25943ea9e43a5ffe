/// `load_config` module: Loads a YAML processing configuration and maps it into the core
/// [`AnnotateConfig`].
///
/// This module is the only place where user-supplied YAML is parsed.
///
/// # Schema
/// ```yaml
/// root: ./project          # optional, defaults to "."
/// documents:               # optional, defaults to the built-in list
///   - path: docs/guide.md
///     language: en
///   - path: 使用手册.md
///     language: cn
/// ```
///
/// # Errors
/// All errors in this module use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use doc_annotator_core::config::{default_documents, AnnotateConfig};
use doc_annotator_core::contract::DocumentEntry;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub documents: Option<Vec<DocumentEntry>>,
}

impl CliConfig {
    /// Fill in defaults for anything the file left out.
    pub fn into_annotate_config(self) -> AnnotateConfig {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let documents = match self.documents {
            Some(docs) => docs,
            None => {
                info!("No documents listed in config, using built-in list");
                default_documents()
            }
        };
        AnnotateConfig::new(root, documents)
    }
}

/// Loads a YAML config file into an [`AnnotateConfig`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AnnotateConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: CliConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if let Some(docs) = &raw.documents {
        if docs.is_empty() {
            warn!(config_path = ?path_ref, "Config lists no documents; nothing will be annotated");
        }
        if let Some(abs) = docs.iter().find(|d| d.path.is_absolute()) {
            error!(path = %abs.path.display(), "Document paths must be relative to root");
            anyhow::bail!(
                "Document path {} must be relative to the configured root",
                abs.path.display()
            );
        }
    }

    let config = raw.into_annotate_config();
    config.trace_loaded();
    Ok(config)
}
