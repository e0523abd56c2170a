//! Collapse repeated warnings into one record per `(file, line, headline)`.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::normalize_source_path;
use crate::models::{RawWarning, WarningKey, WarningRecord};

/// Counts known once all raw warnings have been folded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupStats {
    /// Raw occurrences processed.
    pub total: usize,
    /// Distinct keys produced.
    pub unique: usize,
}

/// Folds raw warnings into deduplicated records.
#[derive(Debug)]
pub struct Deduplicator {
    source_root_marker: String,
    records: BTreeMap<WarningKey, BTreeSet<String>>,
    total: usize,
}

impl Deduplicator {
    pub fn new(source_root_marker: impl Into<String>) -> Self {
        Self {
            source_root_marker: source_root_marker.into(),
            records: BTreeMap::new(),
            total: 0,
        }
    }

    /// Add one occurrence; context lines of colliding keys are unioned.
    pub fn add(&mut self, raw: &RawWarning) {
        self.total += 1;
        let key = WarningKey {
            file_path: normalize_source_path(&raw.file_path, &self.source_root_marker)
                .to_string(),
            line: raw.line,
            headline: raw.headline().to_string(),
        };
        let context = self.records.entry(key).or_default();
        context.extend(raw.context_lines().map(str::to_string));
    }

    #[must_use]
    pub fn stats(&self) -> DedupStats {
        DedupStats {
            total: self.total,
            unique: self.records.len(),
        }
    }

    /// Records in `(file, line, headline)` order.
    #[must_use]
    pub fn finish(self) -> (Vec<WarningRecord>, DedupStats) {
        let stats = self.stats();
        let records = self
            .records
            .into_iter()
            .map(|(key, context_lines)| WarningRecord {
                file_path: key.file_path,
                line: key.line,
                headline: key.headline,
                context_lines,
            })
            .collect();
        (records, stats)
    }
}

impl Extend<RawWarning> for Deduplicator {
    fn extend<I: IntoIterator<Item = RawWarning>>(&mut self, iter: I) {
        for raw in iter {
            self.add(&raw);
        }
    }
}
