//! Suppression of known Doxygen false positives.
//!
//! Each rule looks at one record on its own; a record is dropped as soon as
//! any rule suppresses it, so rule order never changes the result.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::models::WarningRecord;
use crate::symbols::SymbolIndex;

static GROUP_CONFLICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^member \S+ belongs to two different groups\. The second one found here will be ignored\.$",
    )
    .unwrap()
});

static UNDECLARED_SYMBOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^documented symbol `\S+' was not declared or defined\.$").unwrap()
});

static NO_UNIQUE_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^no uniquely matching class member found for $").unwrap());

static UNDOCUMENTED_PARAMETERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^The following parameters of .+ are not documented:$").unwrap()
});

static ARGUMENT_NOT_FOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^argument '(\S+)' of command [@\\]t?param is not found in the argument list of ")
        .unwrap()
});

/// A suppression rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Member documented in one group and defined in another.
    GroupConflict,
    /// Documented symbol reported as not declared (Doxygen bug).
    UndeclaredSymbol,
    /// Empty "no uniquely matching class member" (Doxygen bug).
    NoUniqueMember,
    /// Undocumented parameters; not enforced.
    UndocumentedParameters,
    /// `@param` name reported missing although the declaration has it.
    ArgumentNotFound,
}

impl Rule {
    pub const ALL: [Rule; 5] = [
        Rule::GroupConflict,
        Rule::UndeclaredSymbol,
        Rule::NoUniqueMember,
        Rule::UndocumentedParameters,
        Rule::ArgumentNotFound,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::GroupConflict => "group_conflict",
            Rule::UndeclaredSymbol => "undeclared_symbol",
            Rule::NoUniqueMember => "no_unique_member",
            Rule::UndocumentedParameters => "undocumented_parameters",
            Rule::ArgumentNotFound => "argument_not_found",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Rule::GroupConflict => {
                "member declared in one group and defined in another; always ignored"
            }
            Rule::UndeclaredSymbol => {
                "documented symbol was not declared or defined; known Doxygen bug"
            }
            Rule::NoUniqueMember => {
                "no uniquely matching class member found for <empty>; known Doxygen bug"
            }
            Rule::UndocumentedParameters => {
                "undocumented parameters; Doxygen may capture the next line as description"
            }
            Rule::ArgumentNotFound => {
                "@param not in argument list; ignored when the nearest following declaration has it"
            }
        }
    }

    /// Whether this rule drops `record`.
    pub fn suppresses(&self, record: &WarningRecord, index: &mut SymbolIndex) -> Result<bool> {
        let headline = record.headline.as_str();
        let suppressed = match self {
            Rule::GroupConflict => GROUP_CONFLICT.is_match(headline),
            Rule::UndeclaredSymbol => UNDECLARED_SYMBOL.is_match(headline),
            Rule::NoUniqueMember => NO_UNIQUE_MEMBER.is_match(headline),
            Rule::UndocumentedParameters => UNDOCUMENTED_PARAMETERS.is_match(headline),
            Rule::ArgumentNotFound => {
                let Some(caps) = ARGUMENT_NOT_FOUND.captures(headline) else {
                    return Ok(false);
                };
                index
                    .nearest_declarations(&record.file_path, record.line)?
                    .iter()
                    .any(|decl| has_argument(&decl.parameter_list, &caps[1]))
            }
        };
        Ok(suppressed)
    }
}

/// `name` appears as a whole token followed by `,` or by the final `)`.
#[must_use]
pub fn has_argument(parameter_list: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let parameter_list = parameter_list.trim_end();
    parameter_list.match_indices(name).any(|(idx, _)| {
        let bounded = parameter_list[..idx]
            .chars()
            .next_back()
            .is_some_and(|c| !(c.is_ascii_alphanumeric() || c == '_'));
        let rest = parameter_list[idx + name.len()..].trim_start();
        bounded && (rest.starts_with(',') || rest == ")")
    })
}

/// Ordered set of rules applied to every record.
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    rules: Vec<Rule>,
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self {
            rules: Rule::ALL.to_vec(),
        }
    }
}

impl FilterPipeline {
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The first rule suppressing `record`, if any.
    pub fn classify(&self, record: &WarningRecord, index: &mut SymbolIndex) -> Result<Option<Rule>> {
        for rule in &self.rules {
            if rule.suppresses(record, index)? {
                return Ok(Some(*rule));
            }
        }
        Ok(None)
    }

    /// Keep the records no rule suppresses.
    pub fn retain(
        &self,
        records: Vec<WarningRecord>,
        index: &mut SymbolIndex,
    ) -> Result<Vec<WarningRecord>> {
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            match self.classify(&record, index)? {
                Some(rule) => tracing::debug!(
                    rule = rule.as_str(),
                    file = %record.file_path,
                    line = record.line,
                    "suppressed"
                ),
                None => kept.push(record),
            }
        }
        Ok(kept)
    }
}
