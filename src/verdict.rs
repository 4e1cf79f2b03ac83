//! False-positive / false-negative classification of one tool on one case.

use crate::tools::ToolRunResult;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::time::Duration;

/// What a case variant is expected to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// The analyzer must stay silent.
    Clean,
    /// The analyzer must report at least one diagnostic.
    Flagged,
}

/// Why a tool failed a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The tool passed.
    None,
    /// A diagnostic was reported on a must-be-clean variant.
    FalsePositive,
    /// No diagnostic was reported on a must-be-flagged variant.
    FalseNegative,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::FalsePositive => write!(f, "false positive"),
            Self::FalseNegative => write!(f, "false negative"),
        }
    }
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// True iff `failure_reason` is [`FailureReason::None`].
    pub success: bool,
    /// Why the tool failed, if it did.
    pub failure_reason: FailureReason,
    /// Summed elapsed time of every input run.
    pub total_time: Duration,
}

/// Classify a tool's runs on one case.
///
/// A diagnostic on any must-be-clean run is a false positive, and that takes
/// precedence over everything else. Otherwise a silent must-be-flagged run
/// is a false negative. An empty `must_be_flagged` can therefore never
/// produce a false negative.
pub fn classify<R: Borrow<ToolRunResult>>(
    must_be_clean: &[R],
    must_be_flagged: &[R],
) -> Classification {
    let total_time: Duration = must_be_clean
        .iter()
        .chain(must_be_flagged)
        .map(|r| r.borrow().elapsed_time)
        .sum();

    let failure_reason = if must_be_clean.iter().any(|r| r.borrow().has_diagnostics()) {
        FailureReason::FalsePositive
    } else if must_be_flagged.iter().any(|r| !r.borrow().has_diagnostics()) {
        FailureReason::FalseNegative
    } else {
        FailureReason::None
    };

    Classification {
        success: failure_reason == FailureReason::None,
        failure_reason,
        total_time,
    }
}

/// One labeled run of a tool on a case variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRun {
    /// Variant label (`correct`, `catch_bad`, `incorrect`).
    pub variant: String,
    /// What the variant should produce.
    pub expectation: Expectation,
    /// Raw result of the run.
    pub result: ToolRunResult,
}

/// Verdict of one tool on one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolVerdict {
    /// True iff `failure_reason` is [`FailureReason::None`].
    pub success: bool,
    /// Why the tool failed, if it did.
    pub failure_reason: FailureReason,
    /// Summed elapsed time of every run.
    #[serde(with = "crate::duration_secs")]
    pub total_time: Duration,
    /// Every run in variant order.
    pub raw_results: Vec<VariantRun>,
}

impl ToolVerdict {
    /// Classify labeled runs, keeping them as the verdict's raw results.
    pub fn from_runs(runs: Vec<VariantRun>) -> Self {
        let (clean, flagged): (Vec<&VariantRun>, Vec<&VariantRun>) = runs
            .iter()
            .partition(|run| run.expectation == Expectation::Clean);
        let clean: Vec<&ToolRunResult> = clean.into_iter().map(|run| &run.result).collect();
        let flagged: Vec<&ToolRunResult> = flagged.into_iter().map(|run| &run.result).collect();

        let classification = classify(&clean, &flagged);

        Self {
            success: classification.success,
            failure_reason: classification.failure_reason,
            total_time: classification.total_time,
            raw_results: runs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(errors: u32, warnings: u32, millis: u64) -> ToolRunResult {
        ToolRunResult {
            error_count: errors,
            warning_count: warnings,
            elapsed_time: Duration::from_millis(millis),
            ..Default::default()
        }
    }

    #[test]
    fn test_success_when_clean_is_silent_and_flagged_reports() {
        let c = classify(&[run(0, 0, 10)], &[run(1, 0, 20)]);
        assert!(c.success);
        assert_eq!(c.failure_reason, FailureReason::None);
        assert_eq!(c.total_time, Duration::from_millis(30));
    }

    #[test]
    fn test_false_positive_on_warning() {
        let c = classify(&[run(0, 1, 0)], &[run(1, 0, 0)]);
        assert!(!c.success);
        assert_eq!(c.failure_reason, FailureReason::FalsePositive);
    }

    #[test]
    fn test_false_negative_when_flagged_is_silent() {
        let c = classify(&[run(0, 0, 0)], &[run(0, 0, 0)]);
        assert!(!c.success);
        assert_eq!(c.failure_reason, FailureReason::FalseNegative);
    }

    #[test]
    fn test_false_positive_wins_over_false_negative() {
        let c = classify(&[run(0, 0, 0), run(2, 0, 0)], &[run(0, 0, 0)]);
        assert_eq!(c.failure_reason, FailureReason::FalsePositive);
    }

    #[test]
    fn test_empty_flagged_is_vacuously_satisfied() {
        let c = classify(&[run(0, 0, 5)], &[] as &[ToolRunResult]);
        assert!(c.success);
    }

    #[test]
    fn test_from_runs_partitions_by_expectation() {
        let runs = vec![
            VariantRun {
                variant: "correct".into(),
                expectation: Expectation::Clean,
                result: run(0, 0, 1),
            },
            VariantRun {
                variant: "catch_bad".into(),
                expectation: Expectation::Clean,
                result: run(0, 0, 1),
            },
            VariantRun {
                variant: "incorrect".into(),
                expectation: Expectation::Flagged,
                result: run(0, 3, 1),
            },
        ];
        let verdict = ToolVerdict::from_runs(runs);
        assert!(verdict.success);
        assert_eq!(verdict.total_time, Duration::from_millis(3));
        assert_eq!(verdict.raw_results.len(), 3);
        assert_eq!(verdict.raw_results[2].variant, "incorrect");
    }

    #[test]
    fn test_failure_reason_display() {
        assert_eq!(FailureReason::None.to_string(), "");
        assert_eq!(FailureReason::FalsePositive.to_string(), "false positive");
        assert_eq!(FailureReason::FalseNegative.to_string(), "false negative");
    }

    #[test]
    fn test_failure_reason_serializes_snake_case() {
        let json = serde_json::to_string(&FailureReason::FalseNegative).unwrap();
        assert_eq!(json, "\"false_negative\"");
    }
}
