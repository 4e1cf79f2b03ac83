//! LaTeX comparison table.
//!
//! One row per case: reference, abstract interpreter and subject success,
//! then the subject's failure reason. Rows where the subject passed come
//! first.

use crate::harness::{CaseResult, SuiteResults};
use crate::tools::ToolKind;
use crate::verdict::FailureReason;
use std::fmt;

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    /// Sanitized case id.
    pub key: String,
    /// Reference analyzer success.
    pub reference: bool,
    /// Abstract interpreter success.
    pub abstract_interpreter: bool,
    /// Subject analyzer success.
    pub subject: bool,
    /// Why the subject failed.
    pub subject_failure: FailureReason,
}

impl ComparisonRow {
    /// Build a row; unconfigured tools count as failed.
    pub fn new(id: &str, case: &CaseResult) -> Self {
        Self {
            key: sanitize_key(id),
            reference: case.passed(ToolKind::Reference),
            abstract_interpreter: case.passed(ToolKind::AbstractInterpreter),
            subject: case.passed(ToolKind::Subject),
            subject_failure: case
                .verdict(ToolKind::Subject)
                .map_or(FailureReason::None, |v| v.failure_reason),
        }
    }
}

impl fmt::Display for ComparisonRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} & {} & {} & {} & {} \\\\",
            self.key, self.reference, self.abstract_interpreter, self.subject, self.subject_failure
        )?;
        writeln!(f, "\\hline")
    }
}

/// Escape underscores and turn path separators into spaces.
pub fn sanitize_key(id: &str) -> String {
    id.replace('_', "\\_").replace('/', " ")
}

/// Rows in case-id order, then stably moved so subject successes lead.
pub fn rows(results: &SuiteResults) -> Vec<ComparisonRow> {
    let mut rows: Vec<ComparisonRow> = results
        .cases
        .iter()
        .map(|(id, case)| ComparisonRow::new(id, case))
        .collect();
    rows.sort_by_key(|row| !row.subject);
    rows
}

/// Render the full table.
pub fn render(results: &SuiteResults) -> String {
    rows(results).iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::ToolVerdict;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn verdict(reason: FailureReason) -> ToolVerdict {
        ToolVerdict {
            success: reason == FailureReason::None,
            failure_reason: reason,
            total_time: Duration::ZERO,
            raw_results: vec![],
        }
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(
            sanitize_key("memory/double_free/01_a.c"),
            "memory double\\_free 01\\_a.c"
        );
    }

    #[test]
    fn test_row_format() {
        let mut case = BTreeMap::new();
        case.insert(ToolKind::Reference, verdict(FailureReason::None));
        case.insert(ToolKind::Subject, verdict(FailureReason::FalseNegative));
        let row = ComparisonRow::new("x_1.c", &CaseResult(case));

        assert_eq!(
            row.to_string(),
            "x\\_1.c & true & false & false & false negative \\\\\n\\hline\n"
        );
    }

    #[test]
    fn test_subject_successes_first_and_stable() {
        let mut cases = BTreeMap::new();
        for (id, reason) in [
            ("a", FailureReason::FalsePositive),
            ("b", FailureReason::None),
            ("c", FailureReason::FalseNegative),
            ("d", FailureReason::None),
        ] {
            let mut case = BTreeMap::new();
            case.insert(ToolKind::Subject, verdict(reason));
            cases.insert(id.to_string(), CaseResult(case));
        }
        let results = SuiteResults {
            cases,
            tools: vec![ToolKind::Subject],
        };

        let keys: Vec<String> = rows(&results).into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["b", "d", "a", "c"]);

        let table = render(&results);
        assert_eq!(table.lines().count(), 8);
        assert!(table.starts_with("b & false & false & true &  \\\\\n"));
    }
}
