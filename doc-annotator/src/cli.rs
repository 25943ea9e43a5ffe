///
/// This module implements the CLI interface for doc-annotator: command parsing, turning
/// arguments into an [`AnnotateConfig`], running the annotator and printing progress.
///
/// All annotation logic (templates, rules, the read-modify-write cycle) lives in the
/// [`doc-annotator-core`] crate. This module is strictly CLI glue.
///
/// ## How To Use
/// - For command-line users: `doc-annotator annotate --root <DIR> [--config <FILE>]`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`doc-annotator-core`]: ../../doc-annotator-core/
use crate::load_config::load_config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use doc_annotator_core::annotate::{AnnotateEvent, Annotator, RunReport};
use doc_annotator_core::config::AnnotateConfig;
use doc_annotator_core::contract::AnnotateOutcome;
use doc_annotator_core::store::FsStore;
use std::path::PathBuf;

const RULE: &str = "============================================================";

/// CLI for doc-annotator: stamp author attribution and rename brand references in docs.
#[derive(Parser)]
#[clap(
    name = "doc-annotator",
    version,
    about = "Insert author attribution into documentation files and rename third-party brand references"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate every configured document in place
    Annotate {
        /// Directory the document paths are relative to (overrides `root` from the config file)
        #[clap(long)]
        root: Option<PathBuf>,
        /// Path to a YAML config file listing documents; the built-in list is used otherwise
        #[clap(long)]
        config: Option<PathBuf>,
    },
}

/// Merge the optional config file and `--root` override into one configuration.
pub fn resolve_config(root: Option<PathBuf>, config: Option<PathBuf>) -> Result<AnnotateConfig> {
    let mut resolved = match config {
        Some(path) => load_config(path)?,
        None => AnnotateConfig::default(),
    };
    if let Some(root) = root {
        tracing::info!(root = %root.display(), "Root directory overridden from command line");
        resolved.root = root;
    }
    Ok(resolved)
}

fn print_progress(event: AnnotateEvent<'_>) {
    match event {
        AnnotateEvent::Started(entry) => {
            println!("[*] Processing: {}", entry.path.display());
        }
        AnnotateEvent::Finished(doc) => match &doc.outcome {
            AnnotateOutcome::Missing => {
                println!("[X] File not found: {}", doc.path.display());
            }
            AnnotateOutcome::Processed(p) => {
                if p.already_attributed {
                    println!("   [OK] Already has author info");
                } else if p.attribution_added {
                    println!("   [+] Added author info");
                } else {
                    println!("   [-] No heading found, author info not added");
                }
                if p.substituted() {
                    println!("   [+] Removed references ({} replacements)", p.replacements);
                }
                println!("   [DONE]");
                println!();
            }
        },
    }
}

fn print_summary(report: &RunReport) {
    println!("{RULE}");
    println!(
        "[SUCCESS] Processed {} of {} documents ({} missing, {} attributed, {} with references removed)",
        report.processed_count(),
        report.documents.len(),
        report.missing_count(),
        report.attributed_count(),
        report.substituted_count()
    );
    println!("{RULE}");
}

/// Extracted CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Annotate { root, config } => {
            let config = resolve_config(root, config)?;
            tracing::info!(command = "annotate", root = %config.root.display(), "Starting annotation");

            println!("{RULE}");
            println!("Process Docs - Add Author Info and Rename Brand References");
            println!("{RULE}");
            println!();

            let annotator = Annotator::new(config, FsStore)?;
            match annotator.annotate_each(print_progress) {
                Ok(report) => {
                    print_summary(&report);
                    tracing::info!(command = "annotate", ?report, "Annotation complete");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "annotate", error = %e, "Annotation failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}
