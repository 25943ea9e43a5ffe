use crate::contract::{DocumentEntry, Language};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Documents annotated when no explicit list is configured.
pub const DEFAULT_DOCUMENTS: &[(&str, Language)] = &[
    ("docs/01_SYSTEM_ARCHITECTURE.md", Language::En),
    ("docs/02_STRATEGY_GUIDE.md", Language::En),
    ("docs/03_API_REFERENCE.md", Language::En),
    ("docs/04_DEPLOYMENT_GUIDE.md", Language::En),
    ("docs/05_FRONTEND_ARCHITECTURE.md", Language::En),
    ("docs/06_FRONTEND_IMPLEMENTATION_SUMMARY.md", Language::En),
    ("frontend/README.md", Language::En),
    ("QUICK_START.md", Language::En),
    ("快速启动指南.md", Language::Cn),
    ("使用手册.md", Language::Cn),
];

pub fn default_documents() -> Vec<DocumentEntry> {
    DEFAULT_DOCUMENTS
        .iter()
        .map(|(path, language)| DocumentEntry::new(*path, *language))
        .collect()
}

/// Where documents live and which of them to annotate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateConfig {
    pub root: PathBuf,
    pub documents: Vec<DocumentEntry>,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            documents: default_documents(),
        }
    }
}

impl AnnotateConfig {
    pub fn new(root: impl Into<PathBuf>, documents: Vec<DocumentEntry>) -> Self {
        Self {
            root: root.into(),
            documents,
        }
    }

    /// Resolve a configured relative path against the root.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn trace_loaded(&self) {
        info!(
            root = %self.root.display(),
            documents_count = self.documents.len(),
            "Loaded AnnotateConfig"
        );
        debug!(?self, "AnnotateConfig loaded (full debug)");
    }
}
