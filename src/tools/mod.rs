//! Analyzer adapters.
//!
//! Each supported analyzer is one [`ToolAdapter`] implementation. An adapter
//! owns its command template and its output-parsing rule; the rest of the
//! harness only ever sees the uniform `analyze(options, file)` contract and
//! the normalized [`ToolRunResult`] it returns.
//!
//! - [`ReferenceAnalyzer`] - clang static analyzer (`clang --analyze`)
//! - [`SubjectAnalyzer`] - the analyzer under evaluation
//! - [`AbstractInterpreter`] - Frama-C value analysis (`frama-c -eva`)

mod abstract_interpreter;
pub mod parse;
mod reference;
mod subject;

pub use abstract_interpreter::AbstractInterpreter;
pub use parse::DiagnosticCounts;
pub use reference::ReferenceAnalyzer;
pub use subject::SubjectAnalyzer;

use crate::config::ToolsConfig;
use crate::error::{BenchError, BenchResult};
use crate::process::{ProcessOutput, ProcessRunner};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Return-type warnings are noise for the benchmark corpora.
pub const SUPPRESS_RETURN_TYPE: &str = "-Wno-return-type";

/// Keeps the subject analyzer from attempting to link.
pub const SYNTAX_ONLY: &str = "-fsyntax-only";

/// Supported analyzer roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Reference compiler-based analyzer (clang).
    Reference,
    /// The analyzer under evaluation.
    Subject,
    /// Abstract-interpretation analyzer (Frama-C).
    AbstractInterpreter,
}

impl ToolKind {
    /// Every supported kind, in report order.
    pub const ALL: [ToolKind; 3] = [
        ToolKind::Reference,
        ToolKind::Subject,
        ToolKind::AbstractInterpreter,
    ];

    /// Stable machine name, identical to the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Reference => "reference",
            ToolKind::Subject => "subject",
            ToolKind::AbstractInterpreter => "abstract_interpreter",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ToolKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reference" | "clang" => Ok(ToolKind::Reference),
            "subject" | "smacpp" => Ok(ToolKind::Subject),
            "abstract_interpreter" | "abstract-interpreter" | "frama" | "frama-c" => {
                Ok(ToolKind::AbstractInterpreter)
            }
            _ => Err(BenchError::UnknownTool(s.to_string())),
        }
    }
}

/// Normalized result of one analyzer invocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToolRunResult {
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
    /// Exit code, `None` if the process was killed.
    pub exit_code: Option<i32>,
    /// Parsed error count.
    pub error_count: u32,
    /// Parsed warning count.
    pub warning_count: u32,
    /// Wall-clock time of the invocation.
    #[serde(with = "crate::duration_secs")]
    pub elapsed_time: Duration,
    /// Whether the invocation hit the timeout.
    pub timed_out: bool,
    /// Whether the diagnostic summary pattern was found in the output.
    pub summary_found: bool,
}

impl ToolRunResult {
    /// Combine process output with parsed counts.
    ///
    /// A run that exited non-zero without any parseable summary is
    /// indistinguishable from a clean run by counts alone, so it is logged.
    /// A timed-out run keeps its partial output but always has zero counts.
    pub fn from_output(kind: ToolKind, output: ProcessOutput, counts: DiagnosticCounts) -> Self {
        let counts = if output.timed_out {
            DiagnosticCounts::default()
        } else {
            counts
        };

        if !counts.summary_found && !output.timed_out {
            if output.exit_code == Some(0) {
                tracing::debug!("{kind}: no diagnostic summary, counted as clean");
            } else {
                tracing::warn!(
                    "{kind}: exit code {:?} without a diagnostic summary, counted as clean",
                    output.exit_code
                );
            }
        }

        Self {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.exit_code,
            error_count: counts.errors,
            warning_count: counts.warnings,
            elapsed_time: output.elapsed,
            timed_out: output.timed_out,
            summary_found: counts.summary_found,
        }
    }

    /// True if the analyzer reported at least one error or warning.
    pub fn has_diagnostics(&self) -> bool {
        self.error_count > 0 || self.warning_count > 0
    }
}

/// A fully built analyzer command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable to start.
    pub program: PathBuf,
    /// Arguments, file path last.
    pub args: Vec<OsString>,
}

impl CommandLine {
    /// Start an empty command line for `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Execute through `runner`.
    pub fn run(&self, runner: &ProcessRunner) -> BenchResult<ProcessOutput> {
        tracing::debug!("running: {self}");
        runner.run(&self.program, &self.args)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Uniform contract over every analyzer.
pub trait ToolAdapter: Send + Sync {
    /// Which analyzer this is.
    fn kind(&self) -> ToolKind;

    /// Check that the analyzer can be invoked at all.
    fn validate(&self) -> BenchResult<()> {
        Ok(())
    }

    /// Build the command line for `file` compiled with `options`.
    ///
    /// Tool-specific flags are added to a copy; `options` is never modified.
    fn command_line(&self, options: &[String], file: &Path) -> CommandLine;

    /// Run the analyzer on `file` and parse its diagnostics.
    fn analyze(&self, options: &[String], file: &Path) -> BenchResult<ToolRunResult>;
}

/// Copy `options`, appending each of `flags` that is not already present.
pub fn with_flags(options: &[String], flags: &[&str]) -> Vec<String> {
    let mut combined = options.to_vec();
    for flag in flags {
        if !combined.iter().any(|o| o == flag) {
            combined.push((*flag).to_string());
        }
    }
    combined
}

/// Build the adapter for `kind` from the tool configuration.
///
/// Fails with [`BenchError::MissingTool`] if the subject analyzer is absent.
pub fn create_adapter(
    kind: ToolKind,
    tools: &ToolsConfig,
    runner: ProcessRunner,
) -> BenchResult<Box<dyn ToolAdapter>> {
    let adapter: Box<dyn ToolAdapter> = match kind {
        ToolKind::Reference => Box::new(ReferenceAnalyzer::new(&tools.reference_command, runner)),
        ToolKind::Subject => Box::new(SubjectAnalyzer::new(&tools.subject_path, runner)?),
        ToolKind::AbstractInterpreter => Box::new(
            AbstractInterpreter::new(&tools.abstract_command, runner)
                .keep_output(tools.keep_abstract_output),
        ),
    };
    Ok(adapter)
}

/// Build every enabled adapter, in configuration order.
pub fn create_adapters(
    tools: &ToolsConfig,
    runner: &ProcessRunner,
) -> BenchResult<Vec<Box<dyn ToolAdapter>>> {
    tools
        .enabled_kinds()?
        .into_iter()
        .map(|kind| create_adapter(kind, tools, runner.clone()))
        .collect()
}
