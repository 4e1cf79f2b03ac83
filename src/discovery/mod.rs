//! Test-case discovery.
//!
//! A [`CaseSource`] turns one corpus folder into convention-agnostic
//! [`TestCase`] values. Two layouts are supported:
//!
//! - [`TripleFileGroup`] - separate correct, catch-bad and incorrect files
//! - [`DefineFlagGroup`] - one file, good/bad selected with `-D` flags

mod defines;
mod triple;

pub use defines::DefineFlagGroup;
pub use triple::TripleFileGroup;

use crate::config::CorpusConvention;
use crate::error::{BenchError, BenchResult};
use crate::verdict::Expectation;
use std::path::{Path, PathBuf};

/// One labeled input of a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseVariant {
    /// Variant label (`correct`, `catch_bad`, `incorrect`).
    pub label: String,
    /// Source file to analyze.
    pub file: PathBuf,
    /// Compiler-style options for this variant.
    pub options: Vec<String>,
    /// What the analyzer should produce.
    pub expectation: Expectation,
}

/// One logical test case and its variants, in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Unique identifier within a suite.
    pub id: String,
    /// Every variant of the case.
    pub variants: Vec<CaseVariant>,
}

impl TestCase {
    /// Fail with [`BenchError::MissingInput`] if any variant file is absent.
    pub fn ensure_inputs_exist(&self) -> BenchResult<()> {
        match self.variants.iter().find(|v| !v.file.is_file()) {
            Some(missing) => Err(BenchError::missing_input(&self.id, &missing.file)),
            None => Ok(()),
        }
    }
}

/// A corpus folder that can enumerate its test cases.
pub trait CaseSource: Send + Sync {
    /// Human-readable description for logs.
    fn describe(&self) -> String;

    /// Enumerate every case, sorted by file name.
    fn discover(&self) -> BenchResult<Vec<TestCase>>;
}

/// Build the case source for one group folder of a suite.
pub fn source_for(convention: &CorpusConvention, folder: &Path) -> Box<dyn CaseSource> {
    match convention {
        CorpusConvention::TripleFile { common_include } => {
            Box::new(TripleFileGroup::new(folder, common_include))
        }
        CorpusConvention::DefineFlags { support_include } => {
            Box::new(DefineFlagGroup::new(folder, support_include))
        }
    }
}

/// Resolve `folder` to an absolute path, failing if it does not exist.
fn resolve_folder(folder: &Path) -> BenchResult<PathBuf> {
    if !folder.is_dir() {
        return Err(BenchError::missing_input(
            folder.display().to_string(),
            folder,
        ));
    }
    folder
        .canonicalize()
        .map_err(|e| BenchError::io(format!("resolving {}", folder.display()), e))
}

/// Make an include directory absolute without requiring it to exist.
///
/// Analyzers run inside scratch directories, so relative include paths
/// would resolve against the wrong directory.
fn absolute_include(dir: &Path) -> BenchResult<PathBuf> {
    std::path::absolute(dir)
        .map_err(|e| BenchError::io(format!("resolving {}", dir.display()), e))
}

/// Names of the regular files directly inside `folder`, sorted.
fn list_files(folder: &Path) -> BenchResult<Vec<String>> {
    let entries = std::fs::read_dir(folder)
        .map_err(|e| BenchError::io(format!("scanning {}", folder.display()), e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| BenchError::io(format!("scanning {}", folder.display()), e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| BenchError::io(format!("inspecting {}", entry.path().display()), e))?;
        if file_type.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => tracing::debug!("skipping non UTF-8 file name {name:?}"),
        }
    }
    names.sort();
    Ok(names)
}

/// `-I <dir>` pairs for each directory.
fn include_flags<'a>(dirs: impl IntoIterator<Item = &'a Path>) -> Vec<String> {
    dirs.into_iter()
        .flat_map(|dir| ["-I".to_string(), dir.display().to_string()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_list_files_sorted_without_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("02_b.c"), "").unwrap();
        fs::write(dir.path().join("01_a.c"), "").unwrap();
        fs::create_dir(dir.path().join("00_dir")).unwrap();

        assert_eq!(list_files(dir.path()).unwrap(), vec!["01_a.c", "02_b.c"]);
    }

    #[test]
    fn test_missing_folder_is_missing_input() {
        let err = resolve_folder(Path::new("/nonexistent/group")).unwrap_err();
        assert!(matches!(err, BenchError::MissingInput { .. }));
    }

    #[test]
    fn test_ensure_inputs_exist_names_case() {
        let case = TestCase {
            id: "memory/leak/01_a.c".to_string(),
            variants: vec![CaseVariant {
                label: "correct".to_string(),
                file: PathBuf::from("/nonexistent/01_a.c"),
                options: vec![],
                expectation: Expectation::Clean,
            }],
        };
        let err = case.ensure_inputs_exist().unwrap_err();
        assert!(err.to_string().contains("memory/leak/01_a.c"));
    }

    #[test]
    fn test_include_flags_pairs() {
        let flags = include_flags([Path::new("/a"), Path::new("/b")]);
        assert_eq!(flags, vec!["-I", "/a", "-I", "/b"]);
    }
}
