//! Parser for the log of `@param`/`@tparam` blocks without a description.
//!
//! Every non-blank line must have the shape
//! `<path>:<line>:<indent>[@\]t?param ... <name>`. Anything else means the
//! upstream format changed, which is a hard error.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DoxError, Result};
use crate::models::RawWarning;

static EMPTY_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+):(\d+):[\s*]*([@\\]t?param).*\s(\S+)\s*$").unwrap()
});

/// Parse the empty-params log into synthesized warnings.
///
/// `log_path` is only used for error reporting. Lines whose file extension
/// is not in `extensions` (compared case-insensitively) are discarded.
pub fn parse_empty_params(
    content: &str,
    log_path: &Path,
    extensions: &[String],
) -> Result<Vec<RawWarning>> {
    let mut warnings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let malformed = || DoxError::MalformedLine {
            path: log_path.to_path_buf(),
            line_no: idx + 1,
            text: line.to_string(),
        };

        let caps = EMPTY_PARAM.captures(line).ok_or_else(malformed)?;
        let file_path = &caps[1];
        let lineno: u32 = caps[2].parse().map_err(|_| malformed())?;
        let command = &caps[3];
        let name = &caps[4];

        if !has_source_extension(file_path, extensions) {
            tracing::debug!(file_path, "skipping non-source file");
            continue;
        }

        warnings.push(RawWarning::new(
            file_path,
            lineno,
            format!(
                "argument '{name}' of {command} has no description, either add one or remove {command}"
            ),
        ));
    }

    Ok(warnings)
}

fn has_source_extension(file_path: &str, extensions: &[String]) -> bool {
    let Some(ext) = Path::new(file_path).extension() else {
        return false;
    };
    let ext = format!(".{}", ext.to_string_lossy().to_lowercase());
    extensions.iter().any(|allowed| allowed.to_lowercase() == ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IngestSettings;

    fn exts() -> Vec<String> {
        IngestSettings::default().source_extensions
    }

    #[test]
    fn empty_content_yields_nothing() {
        let warnings = parse_empty_params("", Path::new("e.log"), &exts()).unwrap();
        assert!(warnings.is_empty());
        let warnings = parse_empty_params("\n  \n", Path::new("e.log"), &exts()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn synthesizes_param_warning() {
        let log = "/ci/src/core/a.hpp:42: * @param box_l\n";
        let warnings = parse_empty_params(log, Path::new("e.log"), &exts()).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].file_path, "/ci/src/core/a.hpp");
        assert_eq!(warnings[0].line, 42);
        assert_eq!(
            warnings[0].message,
            "argument 'box_l' of @param has no description, either add one or remove @param"
        );
    }

    #[test]
    fn tparam_with_backslash_and_direction() {
        let log = "src/b.cpp:3:   \\tparam[in] T  \n";
        let warnings = parse_empty_params(log, Path::new("e.log"), &exts()).unwrap();
        assert_eq!(
            warnings[0].message,
            "argument 'T' of \\tparam has no description, either add one or remove \\tparam"
        );
    }

    #[test]
    fn non_source_files_are_discarded() {
        let log = "doc/sphinx/intro.rst:5: @param x\nsrc/A.HPP:6: @param y\n";
        let warnings = parse_empty_params(log, Path::new("e.log"), &exts()).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].file_path, "src/A.HPP");
    }

    #[test]
    fn malformed_line_is_fatal() {
        let log = "src/a.hpp:1: @param x\nthis is not a param line\n";
        let err = parse_empty_params(log, Path::new("e.log"), &exts()).unwrap_err();
        match err {
            DoxError::MalformedLine { line_no, text, .. } => {
                assert_eq!(line_no, 2);
                assert_eq!(text, "this is not a param line");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
