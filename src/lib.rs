//! analyzer-bench - correctness benchmark for static analyzers.
//!
//! Runs several C/C++ static analyzers over labeled test corpora, turns
//! their textual output into error/warning counts, and classifies each
//! analyzer's verdict per case as a pass, a false positive or a false
//! negative.
//!
//! # Architecture
//!
//! - [`process`] - one external command in a scoped scratch directory
//! - [`tools`] - one adapter per analyzer, plus output parsing
//! - [`verdict`] - false-positive / false-negative classification
//! - [`discovery`] - test-case enumeration for both corpus layouts
//! - [`harness`] - parallel execution of (case, tool) units
//! - [`report`] - aggregation and report artifacts
//! - [`suite`] - named suites tying the above together
//! - [`config`] - JSON configuration with built-in defaults
//! - [`error`] - fatal error type

// Library code propagates errors instead of panicking.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![warn(missing_docs)]

pub mod config;
pub mod discovery;
mod duration_secs;
pub mod error;
pub mod harness;
pub mod process;
pub mod report;
pub mod suite;
pub mod tools;
pub mod verdict;

// Re-export commonly used types
pub use config::{CorpusConvention, HarnessConfig, SuiteConfig, ToolsConfig};
pub use discovery::{CaseSource, CaseVariant, TestCase};
pub use error::{BenchError, BenchResult};
pub use harness::{CaseResult, Harness, SuiteResults};
pub use report::{aggregate, ReportWriter, Summary};
pub use suite::{discover_suite, run_suite, SuiteOutcome};
pub use tools::{ToolAdapter, ToolKind, ToolRunResult};
pub use verdict::{classify, Classification, Expectation, FailureReason, ToolVerdict};
