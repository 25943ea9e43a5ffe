//! Filesystem-backed [`DocumentStore`].

use crate::contract::DocumentStore;
use std::fs;
use std::path::Path;

/// Reads and writes documents directly on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl DocumentStore for FsStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> std::io::Result<()> {
        fs::write(path, content.as_bytes())
    }
}
