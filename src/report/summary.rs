//! Per-tool aggregation of case verdicts.

use crate::harness::SuiteResults;
use crate::tools::ToolKind;
use crate::verdict::FailureReason;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

/// Totals for one tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolSummary {
    /// Summed `total_time` over every case.
    #[serde(with = "crate::duration_secs")]
    pub total_runtime: Duration,
    /// Cases the tool passed.
    pub passed: usize,
    /// Cases the tool ran on.
    pub total: usize,
    /// Count per failure reason; passing cases are not counted.
    pub failure_reasons: BTreeMap<FailureReason, usize>,
}

impl ToolSummary {
    /// Fraction of cases passed, `0.0` for an empty suite.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }
}

/// Aggregate view of a suite run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of cases.
    pub total_tests: usize,
    /// Per-tool totals.
    pub tools: BTreeMap<ToolKind, ToolSummary>,
}

impl Summary {
    /// One line per tool, for logs and terminal output.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (kind, tool) in &self.tools {
            let _ = write!(
                out,
                "{kind}: {}/{} passed ({:.1}%) in {:.2}s",
                tool.passed,
                tool.total,
                tool.pass_rate() * 100.0,
                tool.total_runtime.as_secs_f64()
            );
            for (reason, count) in &tool.failure_reasons {
                let _ = write!(out, ", {count} {reason}");
            }
            out.push('\n');
        }
        out
    }
}

/// Fold every case verdict into per-tool totals.
///
/// Pure: the same results always give the same summary.
pub fn aggregate(results: &SuiteResults) -> Summary {
    let mut tools: BTreeMap<ToolKind, ToolSummary> = results
        .tools
        .iter()
        .map(|kind| (*kind, ToolSummary::default()))
        .collect();

    for case in results.cases.values() {
        for (kind, verdict) in &case.0 {
            let tool = tools.entry(*kind).or_default();
            tool.total += 1;
            tool.total_runtime += verdict.total_time;
            if verdict.success {
                tool.passed += 1;
            } else {
                *tool.failure_reasons.entry(verdict.failure_reason).or_default() += 1;
            }
        }
    }

    Summary {
        total_tests: results.cases.len(),
        tools,
    }
}
