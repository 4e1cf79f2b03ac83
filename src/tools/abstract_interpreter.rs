//! Frama-C value-analysis adapter.
//!
//! Frama-C does not take compiler flags directly. Every option is forwarded
//! to its preprocessor through a single `-cpp-extra-args=` argument, and the
//! diagnostic summary is printed on stdout rather than stderr.

use super::parse::parse_kernel_summary;
use super::{CommandLine, ToolAdapter, ToolKind, ToolRunResult};
use crate::error::BenchResult;
use crate::process::ProcessRunner;
use std::path::{Path, PathBuf};

/// Placeholder stored instead of output when output retention is off.
const REMOVED_OUTPUT: &str = "removed";

/// Runs `frama-c -eva` and reads its kernel summary.
#[derive(Debug, Clone)]
pub struct AbstractInterpreter {
    command: PathBuf,
    runner: ProcessRunner,
    keep_output: bool,
}

impl AbstractInterpreter {
    /// Create an adapter invoking `command`. Output is retained by default.
    pub fn new(command: impl Into<PathBuf>, runner: ProcessRunner) -> Self {
        Self {
            command: command.into(),
            runner,
            keep_output: true,
        }
    }

    /// Whether raw stdout/stderr are kept in results. Frama-C output is
    /// large; dropping it keeps detail reports small.
    pub fn keep_output(mut self, keep: bool) -> Self {
        self.keep_output = keep;
        self
    }
}

impl ToolAdapter for AbstractInterpreter {
    fn kind(&self) -> ToolKind {
        ToolKind::AbstractInterpreter
    }

    fn command_line(&self, options: &[String], file: &Path) -> CommandLine {
        CommandLine::new(&self.command)
            .arg("-eva")
            .arg(format!("-cpp-extra-args={}", options.join(" ")))
            .arg(file)
    }

    fn analyze(&self, options: &[String], file: &Path) -> BenchResult<ToolRunResult> {
        let output = self.command_line(options, file).run(&self.runner)?;
        let counts = parse_kernel_summary(&output.stdout);
        let mut result = ToolRunResult::from_output(self.kind(), output, counts);

        if !self.keep_output {
            result.stdout = REMOVED_OUTPUT.to_string();
            result.stderr = REMOVED_OUTPUT.to_string();
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_options_joined_into_one_argument() {
        let adapter = AbstractInterpreter::new("frama-c", ProcessRunner::new("temp"));
        let options: Vec<String> = ["-I", "/support", "-DINCLUDEMAIN", "-DOMITGOOD"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let cmd = adapter.command_line(&options, Path::new("/c/CWE126_a.c"));

        assert_eq!(
            cmd.args,
            vec![
                OsString::from("-eva"),
                OsString::from("-cpp-extra-args=-I /support -DINCLUDEMAIN -DOMITGOOD"),
                OsString::from("/c/CWE126_a.c"),
            ]
        );
    }

    #[test]
    fn test_no_return_type_suppression_injected() {
        let adapter = AbstractInterpreter::new("frama-c", ProcessRunner::new("temp"));
        let cmd = adapter.command_line(&[], Path::new("a.c"));
        assert_eq!(cmd.args[1], OsString::from("-cpp-extra-args="));
    }
}
