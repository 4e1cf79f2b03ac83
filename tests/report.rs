//! Aggregation and table properties over generated suite results.

use analyzer_bench::report::table;
use analyzer_bench::{aggregate, CaseResult, FailureReason, SuiteResults, ToolKind, ToolVerdict};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::time::Duration;

fn reason() -> impl Strategy<Value = FailureReason> {
    prop_oneof![
        Just(FailureReason::None),
        Just(FailureReason::FalsePositive),
        Just(FailureReason::FalseNegative),
    ]
}

fn verdict() -> impl Strategy<Value = ToolVerdict> {
    (reason(), 0u64..10_000).prop_map(|(reason, ms)| ToolVerdict {
        success: reason == FailureReason::None,
        failure_reason: reason,
        total_time: Duration::from_millis(ms),
        raw_results: vec![],
    })
}

fn suite_results() -> impl Strategy<Value = SuiteResults> {
    prop::collection::btree_map(
        "[a-z]{1,3}/[a-z_]{1,6}\\.c",
        (verdict(), verdict(), verdict()),
        0..12,
    )
    .prop_map(|cases| SuiteResults {
        cases: cases
            .into_iter()
            .map(|(id, (r, s, a))| {
                let mut case = BTreeMap::new();
                case.insert(ToolKind::Reference, r);
                case.insert(ToolKind::Subject, s);
                case.insert(ToolKind::AbstractInterpreter, a);
                (id, CaseResult(case))
            })
            .collect(),
        tools: ToolKind::ALL.to_vec(),
    })
}

proptest! {
    #[test]
    fn aggregate_is_idempotent(results in suite_results()) {
        prop_assert_eq!(aggregate(&results), aggregate(&results));
    }

    #[test]
    fn passed_plus_failures_is_total(results in suite_results()) {
        let summary = aggregate(&results);
        prop_assert_eq!(summary.total_tests, results.cases.len());
        for tool in summary.tools.values() {
            let failed: usize = tool.failure_reasons.values().sum();
            prop_assert_eq!(tool.passed + failed, tool.total);
            prop_assert!(!tool.failure_reasons.contains_key(&FailureReason::None));
        }
    }

    #[test]
    fn table_puts_subject_successes_first(results in suite_results()) {
        let rows = table::rows(&results);
        prop_assert_eq!(rows.len(), results.cases.len());

        let first_failure = rows.iter().position(|r| !r.subject).unwrap_or(rows.len());
        prop_assert!(rows[first_failure..].iter().all(|r| !r.subject));
        for row in &rows {
            prop_assert!(!row.key.contains('/'));
            prop_assert_eq!(row.subject, row.subject_failure == FailureReason::None);
        }
    }
}

#[test]
fn unconfigured_tools_render_as_false() {
    let mut case = BTreeMap::new();
    case.insert(
        ToolKind::Subject,
        ToolVerdict {
            success: true,
            failure_reason: FailureReason::None,
            total_time: Duration::ZERO,
            raw_results: vec![],
        },
    );
    let mut cases = BTreeMap::new();
    cases.insert("only_subject.c".to_string(), CaseResult(case));
    let results = SuiteResults {
        cases,
        tools: vec![ToolKind::Subject],
    };

    assert_eq!(
        table::render(&results),
        "only\\_subject.c & false & false & true &  \\\\\n\\hline\n"
    );
    let summary = aggregate(&results);
    assert_eq!(summary.tools.len(), 1);
    assert_eq!(summary.tools[&ToolKind::Subject].passed, 1);
}
