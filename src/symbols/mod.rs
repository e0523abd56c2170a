//! Nearest-following-declaration lookups against the Doxygen XML export.
//!
//! A warning usually points at the comment block that precedes the
//! declaration it documents. When a class overloads a method, Doxygen's own
//! cross-reference picks the wrong signature, so the declaration is
//! recovered independently: the first declaration in the same file whose
//! line is strictly greater than the warning line. A file split over several
//! documents gets one such candidate per document.

pub mod xml;

use std::collections::HashMap;

use crate::error::{read_input, Result};
use crate::ingest::ClassDocuments;
use crate::models::SymbolEntry;

/// First entry of a sorted slice whose line is strictly greater than `line`.
#[must_use]
pub fn nearest_after(entries: &[SymbolEntry], line: u32) -> Option<&SymbolEntry> {
    let idx = entries.partition_point(|e| e.declaration_line <= line);
    entries.get(idx)
}

/// Per-file declaration cache over a fixed set of XML documents.
pub struct SymbolIndex {
    documents: ClassDocuments,
    source_root_marker: String,
    /// Declarations per normalized file path, one sorted list per document.
    cache: HashMap<String, Vec<Vec<SymbolEntry>>>,
}

impl SymbolIndex {
    pub fn new(documents: ClassDocuments, source_root_marker: impl Into<String>) -> Self {
        Self {
            documents,
            source_root_marker: source_root_marker.into(),
            cache: HashMap::new(),
        }
    }

    /// Declarations of `file_path`, grouped by document. Loaded on first use.
    pub fn declarations(&mut self, file_path: &str) -> Result<&[Vec<SymbolEntry>]> {
        if !self.cache.contains_key(file_path) {
            let loaded = self.load(file_path)?;
            self.cache.insert(file_path.to_string(), loaded);
        }
        Ok(self.cache.get(file_path).map(Vec::as_slice).unwrap_or_default())
    }

    fn load(&self, file_path: &str) -> Result<Vec<Vec<SymbolEntry>>> {
        self.documents
            .documents_for(file_path)
            .iter()
            .map(|doc| -> Result<Vec<SymbolEntry>> {
                let content = read_input(doc)?;
                let entries =
                    xml::read_declarations(&content, doc, file_path, &self.source_root_marker)?;
                tracing::debug!(
                    file_path,
                    doc = %doc.display(),
                    declarations = entries.len(),
                    "loaded declarations"
                );
                Ok(entries)
            })
            .collect()
    }

    /// Nearest declaration after `line` in each document, in document order.
    ///
    /// Every document answers on its own. A document with no declaration
    /// after `line`, or whose nearest one has no parameter list, contributes
    /// nothing.
    pub fn nearest_declarations(&mut self, file_path: &str, line: u32) -> Result<Vec<SymbolEntry>> {
        let found = self
            .declarations(file_path)?
            .iter()
            .filter_map(|entries| nearest_after(entries, line))
            .filter(|entry| !entry.parameter_list.is_empty())
            .cloned()
            .collect();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn entry(line: u32, args: &str) -> SymbolEntry {
        SymbolEntry {
            declaration_line: line,
            parameter_list: args.to_string(),
        }
    }

    fn member(line: u32, args: &str) -> String {
        format!(
            "<memberdef kind=\"function\"><argsstring>{args}</argsstring><location file=\"/ci/src/f.hpp\" line=\"{line}\"/></memberdef>"
        )
    }

    fn write_doc(dir: &TempDir, name: &str, members: &[String]) {
        let xml = format!("<doxygen><compounddef>{}</compounddef></doxygen>", members.concat());
        std::fs::write(dir.path().join(name), xml).unwrap();
    }

    #[test]
    fn nearest_after_picks_first_greater_line() {
        let entries = vec![entry(10, "(a)"), entry(25, "(b)"), entry(40, "(c)")];
        assert_eq!(nearest_after(&entries, 12).unwrap().parameter_list, "(b)");
        assert_eq!(nearest_after(&entries, 10).unwrap().parameter_list, "(b)");
        assert_eq!(nearest_after(&entries, 0).unwrap().parameter_list, "(a)");
        assert!(nearest_after(&entries, 40).is_none());
        assert!(nearest_after(&entries, 41).is_none());
        assert!(nearest_after(&[], 1).is_none());
    }

    #[test]
    fn documents_without_later_declaration_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write_doc(&tmp, "a.xml", &[member(5, "(int a)")]);
        write_doc(&tmp, "b.xml", &[member(30, "(int b)")]);

        let cfg = Config::new(tmp.path());
        let docs = ClassDocuments::parse("warning:/ci/src/f.hpp\na.xml\nb.xml\n", &cfg);
        let mut index = SymbolIndex::new(docs, "src/");

        let found = index.nearest_declarations("src/f.hpp", 12).unwrap();
        assert_eq!(found, vec![entry(30, "(int b)")]);
        assert!(index.nearest_declarations("src/f.hpp", 30).unwrap().is_empty());
    }

    #[test]
    fn every_document_contributes_its_own_candidate() {
        let tmp = TempDir::new().unwrap();
        write_doc(&tmp, "a.xml", &[member(100, "(int other)")]);
        write_doc(&tmp, "b.xml", &[member(34, "(int count, double *buf)")]);

        let cfg = Config::new(tmp.path());
        let docs = ClassDocuments::parse("warning:/ci/src/f.hpp\na.xml\nb.xml\n", &cfg);
        let mut index = SymbolIndex::new(docs, "src/");

        let found = index.nearest_declarations("src/f.hpp", 30).unwrap();
        assert_eq!(
            found,
            vec![entry(100, "(int other)"), entry(34, "(int count, double *buf)")]
        );
        assert_eq!(
            index.nearest_declarations("src/f.hpp", 50).unwrap(),
            vec![entry(100, "(int other)")]
        );
    }

    #[test]
    fn empty_parameter_list_yields_no_answer() {
        let tmp = TempDir::new().unwrap();
        write_doc(&tmp, "a.xml", &[member(20, ""), member(25, "(int late)")]);

        let cfg = Config::new(tmp.path());
        let docs = ClassDocuments::parse("warning:src/f.hpp\na.xml\n", &cfg);
        let mut index = SymbolIndex::new(docs, "src/");
        assert!(index.nearest_declarations("src/f.hpp", 12).unwrap().is_empty());
    }

    #[test]
    fn unknown_file_has_no_declarations() {
        let mut index = SymbolIndex::new(ClassDocuments::default(), "src/");
        assert!(index.declarations("src/b.cpp").unwrap().is_empty());
        assert!(index.nearest_declarations("src/b.cpp", 5).unwrap().is_empty());
    }

    #[test]
    fn missing_document_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let cfg = Config::new(tmp.path());
        let docs = ClassDocuments::parse("warning:src/f.hpp\ngone.xml\n", &cfg);
        let mut index = SymbolIndex::new(docs, "src/");
        assert!(index.nearest_declarations("src/f.hpp", 1).is_err());
    }

    #[test]
    fn documents_are_cached() {
        let tmp = TempDir::new().unwrap();
        write_doc(&tmp, "a.xml", &[member(5, "(int a)")]);
        let cfg = Config::new(tmp.path());
        let docs = ClassDocuments::parse("warning:src/f.hpp\na.xml\n", &cfg);
        let mut index = SymbolIndex::new(docs, "src/");

        assert_eq!(index.nearest_declarations("src/f.hpp", 1).unwrap().len(), 1);
        std::fs::remove_file(tmp.path().join("a.xml")).unwrap();
        assert_eq!(index.nearest_declarations("src/f.hpp", 1).unwrap().len(), 1);
    }

    proptest! {
        #[test]
        fn nearest_after_matches_linear_scan(
            mut lines in prop::collection::vec(1u32..200, 0..20),
            query in 0u32..220,
        ) {
            lines.sort_unstable();
            let entries: Vec<SymbolEntry> = lines.iter().map(|&l| entry(l, "(x)")).collect();
            let expected = lines.iter().copied().find(|&l| l > query);
            prop_assert_eq!(nearest_after(&entries, query).map(|e| e.declaration_line), expected);
        }
    }
}
