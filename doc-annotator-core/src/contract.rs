//! # contract: shared types and the storage seam for the annotator
//!
//! This module defines the plain data types that flow between the configuration layer,
//! the annotator and its callers, plus the single trait ([`DocumentStore`]) through which
//! the annotator touches persistent storage.
//!
//! ## Interface & Extensibility
//! - Implement [`DocumentStore`] to annotate documents held somewhere other than the local
//!   filesystem (the production implementation is [`crate::store::FsStore`]).
//! - Errors from a store are plain `std::io::Error`s; the annotator wraps them with the
//!   offending path.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate deterministic mocks
//!   for unit/integration tests (enabled by the `test-export-mocks` feature).

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Selects which attribution template and marker strings apply to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "cn", alias = "zh")]
    Cn,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => f.write_str("en"),
            Language::Cn => f.write_str("cn"),
        }
    }
}

/// One configured target: a path relative to the processing root and its language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub path: PathBuf,
    pub language: Language,
}

impl DocumentEntry {
    pub fn new(path: impl Into<PathBuf>, language: Language) -> Self {
        Self {
            path: path.into(),
            language,
        }
    }
}

/// What happened to a single configured document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotateOutcome {
    /// The resolved path does not exist; nothing was read or written.
    Missing,
    Processed(ProcessedDocument),
}

/// Diagnostics for a document that was read and rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessedDocument {
    /// The document already carried an attribution marker for its language.
    pub already_attributed: bool,
    /// An attribution block was spliced in during this run.
    pub attribution_added: bool,
    /// Total number of brand matches replaced across all rules.
    pub replacements: usize,
    /// Substitution left the text different from what it was before.
    pub references_changed: bool,
}

impl ProcessedDocument {
    pub fn substituted(&self) -> bool {
        self.references_changed
    }
}

/// Storage seam used by the annotator for every read and write.
///
/// All paths handed to a store are already resolved against the processing root.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait DocumentStore {
    /// Whether a document exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the full UTF-8 content of the document at `path`.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Overwrite the document at `path` with `content`, encoded as UTF-8.
    fn write(&self, path: &Path, content: &str) -> std::io::Result<()>;
}
