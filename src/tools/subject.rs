//! Adapter for the analyzer under evaluation.
//!
//! The subject analyzer is a clang-based tool, so it shares the reference
//! analyzer's stderr summary format. It is always invoked syntax-only.

use super::parse::parse_compiler_summary;
use super::{
    with_flags, CommandLine, ToolAdapter, ToolKind, ToolRunResult, SUPPRESS_RETURN_TYPE,
    SYNTAX_ONLY,
};
use crate::error::{BenchError, BenchResult};
use crate::process::ProcessRunner;
use std::path::{Path, PathBuf};

/// Runs the subject analyzer binary from its configured path.
#[derive(Debug, Clone)]
pub struct SubjectAnalyzer {
    path: PathBuf,
    runner: ProcessRunner,
}

impl SubjectAnalyzer {
    /// Create an adapter for the executable at `path`.
    ///
    /// The path is resolved to an absolute one because analyzers run inside
    /// per-invocation scratch directories.
    pub fn new(path: impl AsRef<Path>, runner: ProcessRunner) -> BenchResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BenchError::MissingTool {
                path: path.to_path_buf(),
            });
        }
        let path = path
            .canonicalize()
            .map_err(|e| BenchError::io(format!("resolving {}", path.display()), e))?;

        Ok(Self { path, runner })
    }

    /// Absolute path of the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ToolAdapter for SubjectAnalyzer {
    fn kind(&self) -> ToolKind {
        ToolKind::Subject
    }

    fn validate(&self) -> BenchResult<()> {
        if !self.path.exists() {
            return Err(BenchError::MissingTool {
                path: self.path.clone(),
            });
        }
        Ok(())
    }

    fn command_line(&self, options: &[String], file: &Path) -> CommandLine {
        CommandLine::new(&self.path)
            .args(with_flags(options, &[SUPPRESS_RETURN_TYPE, SYNTAX_ONLY]))
            .arg(file)
    }

    fn analyze(&self, options: &[String], file: &Path) -> BenchResult<ToolRunResult> {
        self.validate()?;
        let output = self.command_line(options, file).run(&self.runner)?;
        let counts = parse_compiler_summary(&output.stderr);
        Ok(ToolRunResult::from_output(self.kind(), output, counts))
    }
}
