//! Report artifacts.
//!
//! For a report prefix `p`, [`ReportWriter`] writes:
//!
//! - `p_results.json` - case id to tool to verdict, with raw runs
//! - `p_results_summary.json` - the per-tool [`Summary`]
//! - `p_results_table.tex` - the LaTeX comparison rows

mod summary;
pub mod table;

pub use summary::{aggregate, Summary, ToolSummary};

use crate::error::{BenchError, BenchResult};
use crate::harness::SuiteResults;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Paths of the artifacts written for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// Detail report.
    pub details: PathBuf,
    /// Summary report.
    pub summary: PathBuf,
    /// Comparison table.
    pub table: PathBuf,
}

impl ReportPaths {
    fn new(output_dir: &Path, prefix: &str) -> Self {
        Self {
            details: output_dir.join(format!("{prefix}_results.json")),
            summary: output_dir.join(format!("{prefix}_results_summary.json")),
            table: output_dir.join(format!("{prefix}_results_table.tex")),
        }
    }
}

/// Writes report artifacts, each prefix at most once.
#[derive(Debug)]
pub struct ReportWriter {
    output_dir: PathBuf,
    written: HashSet<String>,
}

impl ReportWriter {
    /// Writer targeting `output_dir` (created on first write).
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: HashSet::new(),
        }
    }

    /// Target directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write all three artifacts for `prefix` and return the summary.
    ///
    /// Fails with [`BenchError::DuplicateReport`] if `prefix` was already
    /// written by this writer.
    pub fn write(&mut self, prefix: &str, results: &SuiteResults) -> BenchResult<(Summary, ReportPaths)> {
        if self.written.contains(prefix) {
            return Err(BenchError::DuplicateReport(prefix.to_string()));
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            BenchError::io(format!("creating {}", self.output_dir.display()), e)
        })?;

        let paths = ReportPaths::new(&self.output_dir, prefix);
        let summary = aggregate(results);

        write_file(&paths.details, serde_json::to_string_pretty(&results.cases)?)?;
        write_file(&paths.summary, serde_json::to_string_pretty(&summary)?)?;
        write_file(&paths.table, table::render(results))?;

        self.written.insert(prefix.to_string());
        tracing::info!("wrote {prefix} reports to {}", self.output_dir.display());
        Ok((summary, paths))
    }
}

fn write_file(path: &Path, contents: String) -> BenchResult<()> {
    std::fs::write(path, contents)
        .map_err(|e| BenchError::io(format!("writing {}", path.display()), e))
}
