//! Side table from source files to the XML documents of their classes.
//!
//! The log is made of blocks: a `warning:<file path>` line followed by one
//! XML document path per line.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::Config;

/// Immutable mapping from a normalized source path to XML documents.
#[derive(Debug, Clone, Default)]
pub struct ClassDocuments {
    by_file: BTreeMap<String, Vec<PathBuf>>,
}

impl ClassDocuments {
    /// Build the mapping from the content of `class_methods.log`.
    #[must_use]
    pub fn parse(content: &str, config: &Config) -> Self {
        let mut by_file: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        let mut current: Option<String> = None;

        for line in content.lines() {
            if let Some(file) = line.strip_prefix("warning:") {
                let file = config.normalize_source_path(file.trim()).to_string();
                by_file.entry(file.clone()).or_default();
                current = Some(file);
                continue;
            }
            let doc = line.trim();
            if doc.is_empty() {
                continue;
            }
            // text before the first block is not part of any mapping
            let Some(file) = &current else {
                continue;
            };
            let doc = config.resolve(doc);
            let docs = by_file.entry(file.clone()).or_default();
            if !docs.contains(&doc) {
                docs.push(doc);
            }
        }

        Self { by_file }
    }

    /// XML documents listed for `file_path` (normalized), in first-seen order.
    #[must_use]
    pub fn documents_for(&self, file_path: &str) -> &[PathBuf] {
        self.by_file.get(file_path).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_file.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }
}
