//! Deterministic text report and exit status.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::dedup::DedupStats;
use crate::error::Result;
use crate::models::WarningRecord;

static ARGUMENT_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*\)").unwrap());

/// Exit code when no warnings are left.
pub const EXIT_CLEAN: i32 = 0;
/// Exit code when at least one warning is left.
pub const EXIT_WARNINGS: i32 = 1;
/// Exit code when the tool itself failed.
pub const EXIT_FAILURE: i32 = 2;

/// Counts printed in the report header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Unique warnings left after filtering.
    pub kept: usize,
    /// Raw occurrences read from both logs.
    pub total: usize,
    /// Unique warnings before filtering.
    pub unique: usize,
    /// Unique warnings removed by the filter.
    pub ignored: usize,
}

impl Summary {
    #[must_use]
    pub fn new(stats: DedupStats, kept: usize) -> Self {
        Self {
            kept,
            total: stats.total,
            unique: stats.unique,
            ignored: stats.unique.saturating_sub(kept),
        }
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.kept == 0 {
            EXIT_CLEAN
        } else {
            EXIT_WARNINGS
        }
    }
}

/// Collapse the parenthesized part of a headline to `()`.
#[must_use]
pub fn normalize_headline(headline: &str) -> Cow<'_, str> {
    ARGUMENT_LIST.replace_all(headline, "()")
}

/// Render the report. Empty when nothing is left.
#[must_use]
pub fn render(records: &[WarningRecord], summary: &Summary, separator: &str) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut by_file: BTreeMap<&str, Vec<&WarningRecord>> = BTreeMap::new();
    for record in records {
        by_file.entry(record.file_path.as_str()).or_default().push(record);
    }

    let mut out = format!(
        "The documentation generated {} unique warnings (total: {}, ignored: {}):\n",
        summary.kept, summary.total, summary.ignored
    );
    for (file_path, mut warnings) in by_file {
        warnings.sort_by(|a, b| (a.line, &a.headline).cmp(&(b.line, &b.headline)));
        out.push_str(file_path);
        out.push_str(":\n");
        for w in warnings {
            let mut line = format!("  line {}: {}", w.line, normalize_headline(&w.headline));
            if !w.context_lines.is_empty() {
                let context: Vec<&str> = w.context_lines.iter().map(|c| c.trim()).collect();
                line.push_str(": ");
                line.push_str(&context.join(separator));
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Write the report, truncating any previous content.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn record(file: &str, line: u32, headline: &str, ctx: &[&str]) -> WarningRecord {
        WarningRecord {
            file_path: file.to_string(),
            line,
            headline: headline.to_string(),
            context_lines: ctx.iter().map(|s| (*s).to_string()).collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn normalize_collapses_argument_lists() {
        assert_eq!(
            normalize_headline("argument 'x' of command @param is not found in the argument list of Foo::bar(int x, double y)"),
            "argument 'x' of command @param is not found in the argument list of Foo::bar()"
        );
        assert_eq!(normalize_headline("f(a) and g(b)"), "f()");
        assert_eq!(normalize_headline("no parens"), "no parens");
    }

    #[test]
    fn summary_counts() {
        let summary = Summary::new(DedupStats { total: 7, unique: 5 }, 2);
        assert_eq!(summary.ignored, 3);
        assert_eq!(summary.exit_code(), EXIT_WARNINGS);
        assert_eq!(Summary::new(DedupStats::default(), 0).exit_code(), EXIT_CLEAN);
    }

    #[test]
    fn render_groups_by_file_then_line() {
        let records = vec![
            record("src/b.hpp", 3, "late", &[]),
            record("src/a.hpp", 20, "second", &[]),
            record("src/a.hpp", 4, "first f(int a)", &["b detail", "a detail"]),
        ];
        let summary = Summary::new(DedupStats { total: 4, unique: 4 }, 3);
        let text = render(&records, &summary, ", ");
        assert_eq!(
            text,
            "The documentation generated 3 unique warnings (total: 4, ignored: 1):\n\
             src/a.hpp:\n\
             \x20 line 4: first f(): a detail, b detail\n\
             \x20 line 20: second\n\
             src/b.hpp:\n\
             \x20 line 3: late\n"
        );
    }

    #[test]
    fn render_empty_is_empty() {
        let summary = Summary::new(DedupStats { total: 3, unique: 1 }, 0);
        assert_eq!(render(&[], &summary, ", "), "");
    }

    #[test]
    fn write_report_truncates() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dox_warnings.log");
        std::fs::write(&path, "stale content\n").unwrap();
        write_report(&path, "").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
