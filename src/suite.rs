//! Named suites: discovery, execution and reporting in one call.

use crate::config::SuiteConfig;
use crate::discovery::{source_for, TestCase};
use crate::error::BenchResult;
use crate::harness::{Harness, SuiteResults};
use crate::report::{ReportPaths, ReportWriter, Summary};

/// What a finished suite produced.
#[derive(Debug, Clone)]
pub struct SuiteOutcome {
    /// Suite name, also the report prefix.
    pub name: String,
    /// Every case result.
    pub results: SuiteResults,
    /// Aggregated totals.
    pub summary: Summary,
    /// Written artifacts.
    pub paths: ReportPaths,
}

/// Discover every case of `suite`, group by group.
pub fn discover_suite(suite: &SuiteConfig) -> BenchResult<Vec<TestCase>> {
    let mut cases = Vec::new();
    for group in &suite.groups {
        let source = source_for(&suite.convention, group);
        let found = source.discover()?;
        tracing::debug!("{}: {} cases", source.describe(), found.len());
        cases.extend(found);
    }
    Ok(cases)
}

/// Run `suite` end to end and write its reports.
pub fn run_suite(
    harness: &Harness,
    suite: &SuiteConfig,
    writer: &mut ReportWriter,
) -> BenchResult<SuiteOutcome> {
    let cases = discover_suite(suite)?;
    tracing::info!(
        "Running suite {} ({} cases, {} tools)",
        suite.name,
        cases.len(),
        harness.tools().len()
    );

    let results = harness.run_cases(&cases)?;
    let (summary, paths) = writer.write(&suite.name, &results)?;

    Ok(SuiteOutcome {
        name: suite.name.clone(),
        results,
        summary,
        paths,
    })
}
