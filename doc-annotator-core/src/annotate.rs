//! Annotator: read each configured document, stamp attribution, rename brands, write back.
//!
//! # Major Types
//! - [`Annotator`]: bundles the configuration, a [`DocumentStore`] and the substitution rules
//! - [`RunReport`]: per-document outcomes of one pass over the configured list
//!
//! # Error Handling
//! A configured document that does not exist is logged and reported as
//! [`AnnotateOutcome::Missing`]; the run continues. Any read or write failure aborts the
//! run with [`AnnotateError::Io`].

use crate::attribution::{insert_attribution, AttributionBlock};
use crate::config::AnnotateConfig;
use crate::contract::{AnnotateOutcome, DocumentEntry, DocumentStore, Language, ProcessedDocument};
use crate::error::AnnotateError;
use crate::substitute::RuleSet;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Outcome for one configured document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub language: Language,
    pub outcome: AnnotateOutcome,
}

/// Progress notifications emitted while a pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotateEvent<'a> {
    /// The document exists and is about to be read.
    Started(&'a DocumentEntry),
    /// The document is done, including when it was missing.
    Finished(&'a DocumentReport),
}

/// Outcomes for a whole pass, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub documents: Vec<DocumentReport>,
}

impl RunReport {
    fn processed(&self) -> impl Iterator<Item = &ProcessedDocument> {
        self.documents.iter().filter_map(|d| match &d.outcome {
            AnnotateOutcome::Processed(p) => Some(p),
            AnnotateOutcome::Missing => None,
        })
    }

    pub fn processed_count(&self) -> usize {
        self.processed().count()
    }

    pub fn missing_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| d.outcome == AnnotateOutcome::Missing)
            .count()
    }

    pub fn attributed_count(&self) -> usize {
        self.processed().filter(|p| p.attribution_added).count()
    }

    pub fn substituted_count(&self) -> usize {
        self.processed().filter(|p| p.substituted()).count()
    }
}

/// Apply attribution insertion and brand substitution to in-memory text.
pub fn annotate_text(
    content: &str,
    language: Language,
    rules: &RuleSet,
) -> (String, ProcessedDocument) {
    let mut report = ProcessedDocument {
        already_attributed: AttributionBlock::for_language(language).is_present_in(content),
        ..Default::default()
    };

    let attributed = match insert_attribution(content, language) {
        Some(spliced) => {
            report.attribution_added = true;
            spliced
        }
        None => content.to_string(),
    };

    let substituted = rules.apply(&attributed);
    report.replacements = substituted.replacements;
    report.references_changed = substituted.changed;
    (substituted.content, report)
}

pub struct Annotator<S> {
    config: AnnotateConfig,
    store: S,
    rules: RuleSet,
}

impl<S: DocumentStore> Annotator<S> {
    /// Build an annotator using the built-in brand rules.
    pub fn new(config: AnnotateConfig, store: S) -> Result<Self, AnnotateError> {
        Ok(Self::with_rules(config, store, RuleSet::brand()?))
    }

    pub fn with_rules(config: AnnotateConfig, store: S, rules: RuleSet) -> Self {
        Self {
            config,
            store,
            rules,
        }
    }

    /// Annotate one document in place.
    pub fn annotate(&self, entry: &DocumentEntry) -> Result<AnnotateOutcome, AnnotateError> {
        self.annotate_with(entry, &mut |_: AnnotateEvent<'_>| {})
    }

    fn annotate_with<F>(
        &self,
        entry: &DocumentEntry,
        on_event: &mut F,
    ) -> Result<AnnotateOutcome, AnnotateError>
    where
        F: FnMut(AnnotateEvent<'_>),
    {
        let full_path = self.config.resolve(&entry.path);

        if !self.store.exists(&full_path) {
            warn!(path = %entry.path.display(), resolved = %full_path.display(), "Document not found, skipping");
            return Ok(AnnotateOutcome::Missing);
        }

        info!(path = %entry.path.display(), language = %entry.language, "Processing document");
        on_event(AnnotateEvent::Started(entry));

        let content = self.store.read_to_string(&full_path).map_err(|e| {
            error!(error = ?e, path = %full_path.display(), "Failed to read document");
            AnnotateError::Io {
                path: full_path.clone(),
                source: e,
            }
        })?;

        let (updated, report) = annotate_text(&content, entry.language, &self.rules);

        if report.already_attributed {
            debug!(path = %entry.path.display(), "Attribution marker already present");
        } else if report.attribution_added {
            info!(path = %entry.path.display(), "Inserted attribution block");
        } else {
            debug!(path = %entry.path.display(), "No heading found, attribution not inserted");
        }
        if report.substituted() {
            info!(path = %entry.path.display(), replacements = report.replacements, "Renamed brand references");
        }

        self.store.write(&full_path, &updated).map_err(|e| {
            error!(error = ?e, path = %full_path.display(), "Failed to write document");
            AnnotateError::Io {
                path: full_path.clone(),
                source: e,
            }
        })?;

        Ok(AnnotateOutcome::Processed(report))
    }

    /// Annotate every configured document in order, stopping at the first I/O error.
    pub fn annotate_all(&self) -> Result<RunReport, AnnotateError> {
        self.annotate_each(|_: AnnotateEvent<'_>| {})
    }

    /// Like [`Annotator::annotate_all`], reporting progress to `on_event` as it goes.
    pub fn annotate_each<F>(&self, mut on_event: F) -> Result<RunReport, AnnotateError>
    where
        F: FnMut(AnnotateEvent<'_>),
    {
        info!(
            root = %self.config.root.display(),
            documents = self.config.documents.len(),
            "Starting annotation pass"
        );
        let mut report = RunReport::default();
        for entry in &self.config.documents {
            let outcome = self.annotate_with(entry, &mut on_event)?;
            let doc = DocumentReport {
                path: entry.path.clone(),
                language: entry.language,
                outcome,
            };
            on_event(AnnotateEvent::Finished(&doc));
            report.documents.push(doc);
        }
        info!(
            processed = report.processed_count(),
            missing = report.missing_count(),
            attributed = report.attributed_count(),
            substituted = report.substituted_count(),
            "Annotation pass complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribution::ENGLISH_BLOCK;
    use crate::contract::MockDocumentStore;
    use crate::substitute::SubstitutionRule;
    use std::path::Path;

    fn rules() -> RuleSet {
        RuleSet::brand().unwrap()
    }

    #[test]
    fn annotate_text_matches_worked_example() {
        let input = "# My Doc\n\nClaude Code was used with Claude Sonnet 4.5.\n";
        let (out, report) = annotate_text(input, Language::En, &rules());
        assert_eq!(
            out,
            format!(
                "# My Doc\n{}\n\nSolSniper Pro was used with AI Assistant.\n",
                ENGLISH_BLOCK.text
            )
        );
        assert!(report.attribution_added);
        assert!(!report.already_attributed);
        assert_eq!(report.replacements, 2);
    }

    #[test]
    fn annotate_text_without_heading_still_substitutes() {
        let (out, report) = annotate_text("Built with Claude.\n", Language::En, &rules());
        assert_eq!(out, "Built with AI.\n");
        assert!(!report.attribution_added);
        assert!(!report.already_attributed);
        assert_eq!(report.replacements, 1);
    }

    #[test]
    fn annotate_text_is_idempotent() {
        let input = "# Doc\n---\nAnthropic made Claude Opus.\n";
        let (once, _) = annotate_text(input, Language::En, &rules());
        let (twice, report) = annotate_text(&once, Language::En, &rules());
        assert_eq!(once, twice);
        assert!(report.already_attributed);
        assert!(!report.attribution_added);
        assert!(!report.substituted());
    }

    #[test]
    fn missing_document_is_skipped_without_io() {
        let mut store = MockDocumentStore::new();
        store.expect_exists().times(1).return_const(false);
        store.expect_read_to_string().never();
        store.expect_write().never();

        let config = AnnotateConfig::new("/root", vec![]);
        let annotator = Annotator::new(config, store).unwrap();
        let outcome = annotator
            .annotate(&DocumentEntry::new("gone.md", Language::En))
            .unwrap();
        assert_eq!(outcome, AnnotateOutcome::Missing);
    }

    #[test]
    fn annotate_writes_back_to_resolved_path() {
        let mut store = MockDocumentStore::new();
        store
            .expect_exists()
            .withf(|p: &Path| p == Path::new("/proj/docs/a.md"))
            .return_const(true);
        store
            .expect_read_to_string()
            .withf(|p: &Path| p == Path::new("/proj/docs/a.md"))
            .returning(|_| Ok("# A\n\nby Claude\n".to_string()));
        store
            .expect_write()
            .withf(|p: &Path, content: &str| {
                p == Path::new("/proj/docs/a.md")
                    && content.contains("**Author**: Aitachi")
                    && content.ends_with("by AI\n")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let config = AnnotateConfig::new("/proj", vec![]);
        let annotator = Annotator::new(config, store).unwrap();
        let outcome = annotator
            .annotate(&DocumentEntry::new("docs/a.md", Language::En))
            .unwrap();
        assert_eq!(
            outcome,
            AnnotateOutcome::Processed(ProcessedDocument {
                already_attributed: false,
                attribution_added: true,
                replacements: 1,
                references_changed: true,
            })
        );
    }

    #[test]
    fn read_failure_aborts_the_run() {
        let mut store = MockDocumentStore::new();
        store.expect_exists().return_const(true);
        store.expect_read_to_string().returning(|_| {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            ))
        });
        store.expect_write().never();

        let config = AnnotateConfig::new(
            "/proj",
            vec![
                DocumentEntry::new("first.md", Language::En),
                DocumentEntry::new("second.md", Language::Cn),
            ],
        );
        let annotator = Annotator::new(config, store).unwrap();
        match annotator.annotate_all() {
            Err(AnnotateError::Io { path, source }) => {
                assert_eq!(path, PathBuf::from("/proj/first.md"));
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn annotate_each_reports_documents_in_order() {
        let mut store = MockDocumentStore::new();
        store
            .expect_exists()
            .returning(|p: &Path| p.ends_with("b.md"));
        store
            .expect_read_to_string()
            .returning(|_| Ok("# B\n".to_string()));
        store.expect_write().times(1).returning(|_, _| Ok(()));

        let config = AnnotateConfig::new(
            "/proj",
            vec![
                DocumentEntry::new("a.md", Language::En),
                DocumentEntry::new("b.md", Language::Cn),
            ],
        );
        let annotator = Annotator::new(config, store).unwrap();
        let mut seen = Vec::new();
        let report = annotator
            .annotate_each(|event| match event {
                AnnotateEvent::Started(entry) => seen.push(format!("start {}", entry.path.display())),
                AnnotateEvent::Finished(doc) => seen.push(format!("done {}", doc.path.display())),
            })
            .unwrap();
        assert_eq!(seen, vec!["done a.md", "start b.md", "done b.md"]);
        assert_eq!(report.missing_count(), 1);
        assert_eq!(report.attributed_count(), 1);
    }

    #[test]
    fn write_failure_aborts_the_run() {
        let mut store = MockDocumentStore::new();
        store.expect_exists().return_const(true);
        store
            .expect_read_to_string()
            .times(1)
            .returning(|_| Ok("# First\n\nClaude\n".to_string()));
        store.expect_write().times(1).returning(|_, _| {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            ))
        });

        let config = AnnotateConfig::new(
            "/proj",
            vec![
                DocumentEntry::new("first.md", Language::En),
                DocumentEntry::new("second.md", Language::En),
            ],
        );
        let annotator = Annotator::new(config, store).unwrap();
        match annotator.annotate_all() {
            Err(AnnotateError::Io { path, source }) => {
                assert_eq!(path, PathBuf::from("/proj/first.md"));
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn started_is_reported_before_a_failing_read() {
        let mut store = MockDocumentStore::new();
        store.expect_exists().return_const(true);
        store.expect_read_to_string().returning(|_| {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "not utf-8",
            ))
        });
        store.expect_write().never();

        let config = AnnotateConfig::new("/proj", vec![DocumentEntry::new("bad.md", Language::En)]);
        let annotator = Annotator::new(config, store).unwrap();
        let mut started = Vec::new();
        let mut finished = 0;
        let result = annotator.annotate_each(|event| match event {
            AnnotateEvent::Started(entry) => started.push(entry.path.clone()),
            AnnotateEvent::Finished(_) => finished += 1,
        });
        assert!(result.is_err());
        assert_eq!(started, vec![PathBuf::from("bad.md")]);
        assert_eq!(finished, 0);
    }

    #[test]
    fn identity_rule_is_not_reported_as_a_change() {
        let rules = RuleSet::new(&[SubstitutionRule::ignore_case("Docs", "Docs")]).unwrap();
        let (out, report) = annotate_text("Docs only\n", Language::En, &rules);
        assert_eq!(out, "Docs only\n");
        assert_eq!(report.replacements, 1);
        assert!(!report.substituted());
    }

    #[test]
    fn run_report_counts_outcomes() {
        let report = RunReport {
            documents: vec![
                DocumentReport {
                    path: "a.md".into(),
                    language: Language::En,
                    outcome: AnnotateOutcome::Missing,
                },
                DocumentReport {
                    path: "b.md".into(),
                    language: Language::En,
                    outcome: AnnotateOutcome::Processed(ProcessedDocument {
                        already_attributed: false,
                        attribution_added: true,
                        replacements: 0,
                        references_changed: false,
                    }),
                },
                DocumentReport {
                    path: "c.md".into(),
                    language: Language::Cn,
                    outcome: AnnotateOutcome::Processed(ProcessedDocument {
                        already_attributed: true,
                        attribution_added: false,
                        replacements: 4,
                        references_changed: true,
                    }),
                },
            ],
        };
        assert_eq!(report.missing_count(), 1);
        assert_eq!(report.processed_count(), 2);
        assert_eq!(report.attributed_count(), 1);
        assert_eq!(report.substituted_count(), 1);
    }
}
