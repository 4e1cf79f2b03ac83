//! Juliet layout: one file per case, good and bad paths selected with
//! preprocessor defines.

use super::{absolute_include, include_flags, list_files, resolve_folder};
use super::{CaseSource, CaseVariant, TestCase};
use crate::error::{BenchError, BenchResult};
use crate::verdict::Expectation;
use std::path::PathBuf;

/// Compiles the test-case `main`.
const INCLUDE_MAIN: &str = "-DINCLUDEMAIN";

/// A Juliet test-case folder.
#[derive(Debug, Clone)]
pub struct DefineFlagGroup {
    folder: PathBuf,
    support_include: PathBuf,
}

impl DefineFlagGroup {
    /// Group at `folder`, compiled with `support_include` on the include path.
    pub fn new(folder: impl Into<PathBuf>, support_include: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            support_include: support_include.into(),
        }
    }
}

impl CaseSource for DefineFlagGroup {
    fn describe(&self) -> String {
        format!("define-flag group {}", self.folder.display())
    }

    fn discover(&self) -> BenchResult<Vec<TestCase>> {
        let folder = resolve_folder(&self.folder)?;

        // Folders without a Makefile only build on Windows.
        let makefile = folder.join("Makefile");
        if !makefile.is_file() {
            return Err(BenchError::missing_input(
                self.folder.display().to_string(),
                makefile,
            ));
        }

        let support = absolute_include(&self.support_include)?;
        let mut base = include_flags([support.as_path()]);
        base.push(INCLUDE_MAIN.to_string());

        let variant = |label: &str, define: &str, expectation, file: PathBuf| {
            let mut options = base.clone();
            options.push(define.to_string());
            CaseVariant {
                label: label.to_string(),
                file,
                options,
                expectation,
            }
        };

        let cases = list_files(&folder)?
            .into_iter()
            .filter(|name| is_case_file(name))
            .map(|name| {
                let file = folder.join(&name);
                TestCase {
                    variants: vec![
                        variant("correct", "-DOMITBAD", Expectation::Clean, file.clone()),
                        variant("incorrect", "-DOMITGOOD", Expectation::Flagged, file),
                    ],
                    id: name,
                }
            })
            .collect();
        Ok(cases)
    }
}

/// Case-insensitive `cwe`, followed somewhere later by `.c`.
fn is_case_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower
        .find("cwe")
        .is_some_and(|at| lower[at + 3..].contains(".c"))
}
