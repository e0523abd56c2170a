//! Log-to-report pipeline: ingest, deduplicate, filter, report.

use crate::config::Config;
use crate::dedup::Deduplicator;
use crate::error::{read_input, Result};
use crate::filter::FilterPipeline;
use crate::ingest::{parse_empty_params, parse_warnings, ClassDocuments};
use crate::models::SymbolEntry;
use crate::report::{self, Summary};
use crate::symbols::SymbolIndex;

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct TriageResult {
    pub summary: Summary,
    /// Text written to the report file.
    pub report: String,
}

/// Load the class-document side table.
pub fn load_class_documents(config: &Config) -> Result<ClassDocuments> {
    let content = read_input(&config.class_methods_log)?;
    Ok(ClassDocuments::parse(&content, config))
}

/// Run the pipeline without touching the report file.
pub fn triage(config: &Config) -> Result<TriageResult> {
    let documents = load_class_documents(config)?;
    let warnings_log = read_input(&config.warnings_log)?;
    let empty_params_log = read_input(&config.empty_params_log)?;

    let empty_params = parse_empty_params(
        &empty_params_log,
        &config.empty_params_log,
        &config.settings.ingest.source_extensions,
    )?;

    let marker = &config.settings.paths.source_root_marker;
    let mut dedup = Deduplicator::new(marker.as_str());
    dedup.extend(parse_warnings(&warnings_log));
    dedup.extend(empty_params);
    let (records, stats) = dedup.finish();
    tracing::info!(total = stats.total, unique = stats.unique, "deduplicated warnings");

    let mut index = SymbolIndex::new(documents, marker.as_str());
    let records = FilterPipeline::default().retain(records, &mut index)?;
    let summary = Summary::new(stats, records.len());
    tracing::info!(kept = summary.kept, ignored = summary.ignored, "filtered warnings");

    let report = report::render(&records, &summary, &config.settings.report.context_separator);
    Ok(TriageResult { summary, report })
}

/// Run the pipeline and write the report. Nothing is written on error.
pub fn run(config: &Config) -> Result<TriageResult> {
    let result = triage(config)?;
    report::write_report(&config.report_path, &result.report)?;
    tracing::info!(path = %config.report_path.display(), "report written");
    Ok(result)
}

/// Nearest declaration after `line` in each document of `file_path`, as used by the filter.
pub fn lookup(config: &Config, file_path: &str, line: u32) -> Result<Vec<SymbolEntry>> {
    let documents = load_class_documents(config)?;
    let file_path = config.normalize_source_path(file_path);
    let mut index = SymbolIndex::new(documents, config.settings.paths.source_root_marker.as_str());
    index.nearest_declarations(file_path, line)
}
