//! Error handling for the benchmark harness.
//!
//! Every variant here is fatal to the run. Recoverable conditions (an
//! analyzer whose output has no diagnostic summary, an analyzer that hits
//! its timeout) are recorded in the run result instead and never reach
//! this type.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal conditions the harness can report.
#[derive(Debug, Error)]
pub enum BenchError {
    /// A test-case input file is missing from disk.
    #[error("missing input for case '{case}': {}", path.display())]
    MissingInput {
        /// Case identifier (or corpus folder when no case exists yet).
        case: String,
        /// The path that was expected to exist.
        path: PathBuf,
    },

    /// The subject analyzer executable is absent at its configured path.
    #[error("subject analyzer missing at {}", path.display())]
    MissingTool {
        /// Configured executable path.
        path: PathBuf,
    },

    /// A tool name outside the supported set.
    #[error("unknown tool '{0}'. Valid options: reference, subject, abstract_interpreter")]
    UnknownTool(String),

    /// An analyzer process could not be started.
    #[error("failed to start '{command}': {source}")]
    Spawn {
        /// Command that was being started.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Filesystem failure outside of process spawning.
    #[error("{context}: {source}")]
    Io {
        /// What the harness was doing.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid or unreadable configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Report serialization failure.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// The worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),

    /// A report name was written twice in the same run.
    #[error("report '{0}' was already written in this run")]
    DuplicateReport(String),
}

impl BenchError {
    /// Wrap an I/O error with a description of the failed operation.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Build a missing-input error for a case.
    pub fn missing_input(case: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingInput {
            case: case.into(),
            path: path.into(),
        }
    }
}

/// Result type for harness operations.
pub type BenchResult<T> = Result<T, BenchError>;
