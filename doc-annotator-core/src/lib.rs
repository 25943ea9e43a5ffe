#![doc = "doc-annotator-core: core logic library for doc-annotator."]

//! This crate contains the document annotation logic: attribution templates and the
//! insertion point after a document's first heading, the ordered brand-substitution rules,
//! and the annotator that reads, rewrites and writes each configured document.
//!
//! # Usage
//! Build an [`annotate::Annotator`] from an [`config::AnnotateConfig`] and a
//! [`contract::DocumentStore`] (usually [`store::FsStore`]) and call `annotate_all`.

pub mod annotate;
pub mod attribution;
pub mod config;
pub mod contract;
pub mod error;
pub mod store;
pub mod substitute;
