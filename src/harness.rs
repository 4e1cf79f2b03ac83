//! Case execution.
//!
//! Every (case, tool) pair is an independent unit. Units run on a bounded
//! rayon pool; each analyzer invocation gets its own scratch directory, so
//! nothing mutable is shared between workers. Results land in ordered maps,
//! so report content does not depend on scheduling.

use crate::config::HarnessConfig;
use crate::discovery::TestCase;
use crate::error::{BenchError, BenchResult};
use crate::tools::{create_adapters, ToolAdapter, ToolKind};
use crate::verdict::{ToolVerdict, VariantRun};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Verdicts of every configured tool on one case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseResult(pub BTreeMap<ToolKind, ToolVerdict>);

impl CaseResult {
    /// Verdict of `kind`, if it was configured.
    pub fn verdict(&self, kind: ToolKind) -> Option<&ToolVerdict> {
        self.0.get(&kind)
    }

    /// Whether `kind` was configured and passed.
    pub fn passed(&self, kind: ToolKind) -> bool {
        self.verdict(kind).is_some_and(|v| v.success)
    }
}

/// All case results of one suite run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteResults {
    /// Case id to per-tool verdicts.
    pub cases: BTreeMap<String, CaseResult>,
    /// Configured tools, in report order.
    pub tools: Vec<ToolKind>,
}

/// Runs analyzers over test cases.
pub struct Harness {
    adapters: Vec<Box<dyn ToolAdapter>>,
    pool: rayon::ThreadPool,
}

impl Harness {
    /// Create a harness over `adapters` with up to `jobs` workers.
    ///
    /// `jobs` is clamped to `1..=available_parallelism`; `None` uses every
    /// available core.
    pub fn new(adapters: Vec<Box<dyn ToolAdapter>>, jobs: Option<usize>) -> BenchResult<Self> {
        let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
        let threads = jobs.unwrap_or(cores).clamp(1, cores);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("bench-worker-{i}"))
            .build()
            .map_err(|e| BenchError::WorkerPool(e.to_string()))?;

        tracing::debug!("worker pool with {threads} threads");
        Ok(Self { adapters, pool })
    }

    /// Build a harness from configuration.
    ///
    /// Fails with [`BenchError::MissingTool`] before anything runs if the
    /// subject analyzer is enabled but absent.
    pub fn from_config(config: &HarnessConfig) -> BenchResult<Self> {
        let adapters = create_adapters(&config.tools, &config.runner())?;
        Self::new(adapters, config.jobs)
    }

    /// Configured tools, in report order.
    pub fn tools(&self) -> Vec<ToolKind> {
        self.adapters.iter().map(|a| a.kind()).collect()
    }

    /// Number of worker threads.
    pub fn jobs(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run every configured tool on one case.
    pub fn run_case(&self, case: &TestCase) -> BenchResult<CaseResult> {
        case.ensure_inputs_exist()?;
        tracing::info!("Running test case {}", case.id);

        let mut result = BTreeMap::new();
        for adapter in &self.adapters {
            result.insert(adapter.kind(), run_unit(adapter.as_ref(), case)?);
        }
        Ok(CaseResult(result))
    }

    /// Run every configured tool on every case.
    ///
    /// All inputs are checked before the first analyzer starts; the first
    /// fatal error aborts the run.
    pub fn run_cases(&self, cases: &[TestCase]) -> BenchResult<SuiteResults> {
        for adapter in &self.adapters {
            adapter.validate()?;
        }
        for case in cases {
            case.ensure_inputs_exist()?;
        }

        let units: Vec<(&TestCase, &dyn ToolAdapter)> = cases
            .iter()
            .flat_map(|case| self.adapters.iter().map(move |a| (case, a.as_ref())))
            .collect();

        let verdicts: Vec<(&str, ToolKind, ToolVerdict)> = self.pool.install(|| {
            units
                .par_iter()
                .map(|(case, adapter)| {
                    tracing::info!("Running test case {} with {}", case.id, adapter.kind());
                    let verdict = run_unit(*adapter, case)?;
                    Ok((case.id.as_str(), adapter.kind(), verdict))
                })
                .collect::<BenchResult<_>>()
        })?;

        let mut results = SuiteResults {
            cases: BTreeMap::new(),
            tools: self.tools(),
        };
        for (id, kind, verdict) in verdicts {
            let case = results.cases.entry(id.to_string()).or_default();
            if case.0.insert(kind, verdict).is_some() {
                tracing::warn!("case id {id} appears more than once; keeping the last run");
            }
        }
        Ok(results)
    }
}

/// Run one tool over every variant of one case, in variant order.
fn run_unit(adapter: &dyn ToolAdapter, case: &TestCase) -> BenchResult<ToolVerdict> {
    let runs = case
        .variants
        .iter()
        .map(|variant| {
            let result = adapter.analyze(&variant.options, &variant.file)?;
            Ok(VariantRun {
                variant: variant.label.clone(),
                expectation: variant.expectation,
                result,
            })
        })
        .collect::<BenchResult<Vec<_>>>()?;

    let verdict = ToolVerdict::from_runs(runs);
    if !verdict.success {
        tracing::debug!(
            "{} on {}: {}",
            adapter.kind(),
            case.id,
            verdict.failure_reason
        );
    }
    Ok(verdict)
}
