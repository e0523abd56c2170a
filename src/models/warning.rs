use std::collections::BTreeSet;

use serde::Serialize;

/// One warning occurrence as read from a log, before deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWarning {
    /// File path as printed by the generator.
    pub file_path: String,
    /// 1-based source line.
    pub line: u32,
    /// Full message; may span several lines.
    pub message: String,
}

impl RawWarning {
    pub fn new(file_path: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            message: message.into(),
        }
    }

    /// First line of the message, with a trailing carriage return removed.
    #[must_use]
    pub fn headline(&self) -> &str {
        let first = self.message.split('\n').next().unwrap_or_default();
        first.strip_suffix('\r').unwrap_or(first)
    }

    /// Remaining message lines, trimmed; blank lines are dropped.
    pub fn context_lines(&self) -> impl Iterator<Item = &str> {
        self.message
            .split('\n')
            .skip(1)
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

/// Deduplication key. Field order gives the report order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WarningKey {
    pub file_path: String,
    pub line: u32,
    pub headline: String,
}

/// A deduplicated warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningRecord {
    /// Path relative to the source root.
    pub file_path: String,
    pub line: u32,
    pub headline: String,
    /// Union of the context lines of all merged occurrences.
    pub context_lines: BTreeSet<String>,
}
