//! Harness configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration and reproduces the built-in JM2018TS and Juliet suites.

use crate::error::{BenchError, BenchResult};
use crate::process::ProcessRunner;
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

const JM_ROOT: &str = "test/data/JM2018TS";
const JULIET_ROOT: &str = "test/data/Juliet_Test_Suite_v1.3_for_C_Cpp/C";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Analyzer selection and commands.
    pub tools: ToolsConfig,
    /// Root under which per-invocation scratch directories are created.
    pub scratch_dir: PathBuf,
    /// Directory receiving the report artifacts.
    pub output_dir: PathBuf,
    /// Per-invocation timeout in seconds; `0` disables it.
    pub timeout_secs: u64,
    /// Worker threads; `None` uses every available core.
    pub jobs: Option<usize>,
    /// Suites run when none is selected explicitly.
    pub suites: Vec<SuiteConfig>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            tools: ToolsConfig::default(),
            scratch_dir: PathBuf::from("temp"),
            output_dir: PathBuf::from("."),
            timeout_secs: 300,
            jobs: None,
            suites: vec![SuiteConfig::jm2018ts(), SuiteConfig::juliet_cwe126()],
        }
    }
}

impl HarnessConfig {
    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> BenchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| BenchError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| BenchError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// The timeout as a [`Duration`], `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Process runner over the scratch root, with the timeout armed.
    pub fn runner(&self) -> ProcessRunner {
        let runner = ProcessRunner::new(&self.scratch_dir);
        match self.timeout() {
            Some(timeout) => runner.with_timeout(timeout),
            None => runner,
        }
    }

    /// Look up a suite by name.
    pub fn suite(&self, name: &str) -> Option<&SuiteConfig> {
        self.suites.iter().find(|s| s.name == name)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> BenchResult<()> {
        self.tools.enabled_kinds()?;

        if self.jobs == Some(0) {
            return Err(BenchError::Config("jobs must be at least 1".to_string()));
        }

        let mut names = HashSet::new();
        for suite in &self.suites {
            if suite.name.is_empty() {
                return Err(BenchError::Config("suite with empty name".to_string()));
            }
            if !names.insert(suite.name.as_str()) {
                return Err(BenchError::Config(format!(
                    "duplicate suite '{}'",
                    suite.name
                )));
            }
        }
        Ok(())
    }
}

/// Analyzer selection and invocation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Tools to run, by name or alias, in report order.
    pub enabled: Vec<String>,
    /// Command for the reference analyzer.
    pub reference_command: PathBuf,
    /// Path of the subject analyzer executable.
    pub subject_path: PathBuf,
    /// Command for the abstract interpreter.
    pub abstract_command: PathBuf,
    /// Keep the abstract interpreter's raw output in detail reports.
    pub keep_abstract_output: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: ToolKind::ALL.iter().map(|k| k.name().to_string()).collect(),
            reference_command: PathBuf::from("clang"),
            subject_path: PathBuf::from("build/src/smacpp"),
            abstract_command: PathBuf::from("frama-c"),
            keep_abstract_output: true,
        }
    }
}

impl ToolsConfig {
    /// Parse `enabled` into tool kinds, rejecting empty and duplicate lists.
    pub fn enabled_kinds(&self) -> BenchResult<Vec<ToolKind>> {
        if self.enabled.is_empty() {
            return Err(BenchError::Config("no tools enabled".to_string()));
        }

        let mut kinds = Vec::with_capacity(self.enabled.len());
        for name in &self.enabled {
            let kind: ToolKind = name.parse()?;
            if kinds.contains(&kind) {
                return Err(BenchError::Config(format!("tool '{kind}' enabled twice")));
            }
            kinds.push(kind);
        }
        Ok(kinds)
    }
}

/// A named suite: report prefix, corpus convention and folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Report prefix.
    pub name: String,
    /// How cases are laid out on disk.
    pub convention: CorpusConvention,
    /// Corpus folders, each scanned independently.
    pub groups: Vec<PathBuf>,
}

impl SuiteConfig {
    /// The JM2018TS memory and string groups.
    pub fn jm2018ts() -> Self {
        let groups = [
            "strings/unbounded_copy",
            "strings/overflow",
            "memory/double_free",
            "memory/access_uninit",
            "memory/leak",
            "memory/refer_free",
            "memory/zero_alloc",
        ];
        Self {
            name: "jm".to_string(),
            convention: CorpusConvention::TripleFile {
                common_include: Path::new(JM_ROOT).join("common"),
            },
            groups: groups.iter().map(|g| Path::new(JM_ROOT).join(g)).collect(),
        }
    }

    /// Juliet CWE126 buffer over-read cases.
    pub fn juliet_cwe126() -> Self {
        let base = Path::new(JULIET_ROOT).join("testcases/CWE126_Buffer_Overread");
        Self {
            name: "juliet".to_string(),
            convention: CorpusConvention::DefineFlags {
                support_include: Path::new(JULIET_ROOT).join("testcasesupport"),
            },
            groups: vec![base.join("s01"), base.join("s02")],
        }
    }
}

/// On-disk corpus layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorpusConvention {
    /// Separate correct, catch-bad and incorrect files per case.
    TripleFile {
        /// Shared include directory.
        common_include: PathBuf,
    },
    /// One file per case, good/bad selected by preprocessor defines.
    DefineFlags {
        /// Support-code include directory.
        support_include: PathBuf,
    },
}
