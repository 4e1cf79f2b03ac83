//! clang static analyzer adapter.

use super::parse::parse_compiler_summary;
use super::{with_flags, CommandLine, ToolAdapter, ToolKind, ToolRunResult, SUPPRESS_RETURN_TYPE};
use crate::error::BenchResult;
use crate::process::ProcessRunner;
use std::path::{Path, PathBuf};

/// Runs `clang --analyze` and reads its `N warnings generated` summary.
#[derive(Debug, Clone)]
pub struct ReferenceAnalyzer {
    command: PathBuf,
    runner: ProcessRunner,
}

impl ReferenceAnalyzer {
    /// Create an adapter invoking `command` (looked up on `PATH` if bare).
    pub fn new(command: impl Into<PathBuf>, runner: ProcessRunner) -> Self {
        Self {
            command: command.into(),
            runner,
        }
    }
}

impl ToolAdapter for ReferenceAnalyzer {
    fn kind(&self) -> ToolKind {
        ToolKind::Reference
    }

    fn command_line(&self, options: &[String], file: &Path) -> CommandLine {
        CommandLine::new(&self.command)
            .arg("--analyze")
            .args(with_flags(options, &[SUPPRESS_RETURN_TYPE]))
            .arg(file)
    }

    fn analyze(&self, options: &[String], file: &Path) -> BenchResult<ToolRunResult> {
        let output = self.command_line(options, file).run(&self.runner)?;
        let counts = parse_compiler_summary(&output.stderr);
        Ok(ToolRunResult::from_output(self.kind(), output, counts))
    }
}
