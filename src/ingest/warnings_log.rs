//! Parser for the primary Doxygen warning log.
//!
//! A record looks like `doxygen:<path>:<line>: warning: <message>`; the
//! message continues on following lines as long as they start with
//! whitespace (or are empty).

use std::iter::Peekable;
use std::str::Lines;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::RawWarning;

/// Marker token prefixed to every record of the primary log.
pub const MARKER: &str = "doxygen";

static RECORD_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{}:(.+?):(\d+): warning: (.+)$",
        regex::escape(MARKER)
    ))
    .unwrap()
});

/// Lazy iterator over the records of a warning log.
pub struct WarningLog<'a> {
    lines: Peekable<Lines<'a>>,
}

impl<'a> WarningLog<'a> {
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().peekable(),
        }
    }
}

impl Iterator for WarningLog<'_> {
    type Item = RawWarning;

    fn next(&mut self) -> Option<RawWarning> {
        loop {
            let line = self.lines.next()?;
            let Some(caps) = RECORD_START.captures(line) else {
                continue;
            };
            let Ok(lineno) = caps[2].parse::<u32>() else {
                tracing::debug!(line, "line number out of range, skipping record");
                continue;
            };

            let mut message = caps[3].to_string();
            while let Some(next) = self.lines.peek() {
                if !next.is_empty() && !next.starts_with(char::is_whitespace) {
                    break;
                }
                message.push('\n');
                message.push_str(next);
                self.lines.next();
            }

            return Some(RawWarning::new(&caps[1], lineno, message));
        }
    }
}

/// Parse a warning log into raw records.
#[must_use]
pub fn parse_warnings(content: &str) -> WarningLog<'_> {
    WarningLog::new(content)
}
