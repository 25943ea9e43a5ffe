//! Error types for the annotator core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort annotation.
///
/// A missing document is not an error; see [`crate::contract::AnnotateOutcome::Missing`].
#[derive(Error, Debug)]
pub enum AnnotateError {
    /// Reading or writing a document failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A substitution rule pattern could not be compiled
    #[error("invalid substitution pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A rule would rewrite text that a later, more specific rule needs to see
    #[error("substitution rule {earlier:?} shadows later rule {later:?}; order the most specific pattern first")]
    RuleOrder { earlier: String, later: String },
}
