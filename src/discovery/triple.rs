//! JM2018TS layout: one file name, three sibling variant folders.
//!
//! ```text
//! <folder>/01_strcpy.c
//! <folder>/test_correct/01_strcpy.c            clean
//! <folder>/test_correct_catch_bad/01_strcpy.c  clean
//! <folder>/test_incorrect/01_strcpy.c          flagged
//! ```

use super::{absolute_include, include_flags, list_files, resolve_folder};
use super::{CaseSource, CaseVariant, TestCase};
use crate::error::BenchResult;
use crate::verdict::Expectation;
use std::path::{Path, PathBuf};

/// Variant folders with their labels and expectations.
const VARIANTS: [(&str, &str, Expectation); 3] = [
    ("correct", "test_correct", Expectation::Clean),
    ("catch_bad", "test_correct_catch_bad", Expectation::Clean),
    ("incorrect", "test_incorrect", Expectation::Flagged),
];

/// A group folder in the triple-file convention.
#[derive(Debug, Clone)]
pub struct TripleFileGroup {
    folder: PathBuf,
    common_include: PathBuf,
}

impl TripleFileGroup {
    /// Group at `folder`, compiled with `common_include` on the include path.
    pub fn new(folder: impl Into<PathBuf>, common_include: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            common_include: common_include.into(),
        }
    }
}

impl CaseSource for TripleFileGroup {
    fn describe(&self) -> String {
        format!("triple-file group {}", self.folder.display())
    }

    fn discover(&self) -> BenchResult<Vec<TestCase>> {
        let folder = resolve_folder(&self.folder)?;
        let common = absolute_include(&self.common_include)?;
        let options = include_flags([folder.as_path(), common.as_path()]);
        let prefix = id_prefix(&folder);

        let mut cases = Vec::new();
        for name in list_files(&folder)? {
            if !is_case_file(&name) {
                continue;
            }

            let case = TestCase {
                id: format!("{prefix}/{name}"),
                variants: VARIANTS
                    .iter()
                    .map(|(label, dir, expectation)| CaseVariant {
                        label: (*label).to_string(),
                        file: folder.join(dir).join(&name),
                        options: options.clone(),
                        expectation: *expectation,
                    })
                    .collect(),
            };
            case.ensure_inputs_exist()?;
            cases.push(case);
        }
        Ok(cases)
    }
}

/// Two digits followed by an underscore anywhere in the name.
fn is_case_file(name: &str) -> bool {
    name.as_bytes()
        .windows(3)
        .any(|w| w[0].is_ascii_digit() && w[1].is_ascii_digit() && w[2] == b'_')
}

/// Last two components of `folder`, joined with `/`.
fn id_prefix(folder: &Path) -> String {
    let mut tail: Vec<String> = folder
        .components()
        .rev()
        .take(2)
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    tail.reverse();
    tail.join("/")
}
