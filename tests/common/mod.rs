//! Shared fixtures: fake analyzers and corpus trees.
//!
//! Every fake analyzer script is written once, before any test spawns a
//! process, so no executable is ever open for writing while a child forks.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

/// Source of a variant that must stay clean.
pub const CLEAN_SOURCE: &str = "int main(void) { return 0; }\n";

/// Source of a variant that must be flagged.
pub const BUGGY_SOURCE: &str = "int main(void) { char b[1]; return b[2]; /* BUG */ }\n";

/// Clang-style: one warning for files containing BUG unless -DOMITBAD.
const COMPILER_SCRIPT: &str = r#"#!/bin/sh
for last; do :; done
case " $* " in *" -DOMITBAD "*) exit 0 ;; esac
if grep -q BUG "$last"; then
    echo "$last:1:40: warning: array index 2 is past the end of the array" >&2
    echo "1 warning generated." >&2
fi
exit 0
"#;

/// Frama-C-style: kernel summary on stdout, options in -cpp-extra-args.
const KERNEL_SCRIPT: &str = r#"#!/bin/sh
for last; do :; done
echo "[kernel] Parsing $last (with preprocessing)"
case "$*" in *-DOMITBAD*) echo "[kernel] Frama-C kernel: 0 errors 0 warnings"; exit 0 ;; esac
if grep -q BUG "$last"; then
    echo "[kernel] Frama-C kernel: 0 errors 1 warning"
else
    echo "[kernel] Frama-C kernel: 0 errors 0 warnings"
fi
exit 0
"#;

/// Never reports anything.
const SILENT_SCRIPT: &str = "#!/bin/sh\nexit 0\n";

/// Always reports, even on clean input.
const NOISY_SCRIPT: &str = "#!/bin/sh\necho \"2 warnings generated.\" >&2\nexit 0\n";

/// Never finishes on its own; the shell waits on a child it forked.
const HANGING_SCRIPT: &str = "#!/bin/sh\nsleep 30\necho done\n";

/// Prints a summary line, then hangs.
const STALLING_SCRIPT: &str =
    "#!/bin/sh\necho \"1 warning generated.\" >&2\nexec sleep 30\n";

/// Crashes without printing a summary.
const CRASHING_SCRIPT: &str = "#!/bin/sh\necho \"Segmentation fault\" >&2\nexit 139\n";

/// Paths of the installed fake analyzers.
pub struct FakeTools {
    _dir: TempDir,
    pub compiler: PathBuf,
    pub kernel: PathBuf,
    pub silent: PathBuf,
    pub noisy: PathBuf,
    pub hanging: PathBuf,
    pub stalling: PathBuf,
    pub crashing: PathBuf,
}

/// The fake analyzers, installed on first use.
pub fn fake_tools() -> &'static FakeTools {
    static TOOLS: OnceLock<FakeTools> = OnceLock::new();
    TOOLS.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        let install = |name: &str, body: &str| {
            let path = dir.path().join(name);
            fs::write(&path, body).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        };

        let compiler = install("fake-clang", COMPILER_SCRIPT);
        let kernel = install("fake-frama-c", KERNEL_SCRIPT);
        let silent = install("fake-silent", SILENT_SCRIPT);
        let noisy = install("fake-noisy", NOISY_SCRIPT);
        let hanging = install("fake-hanging", HANGING_SCRIPT);
        let stalling = install("fake-stalling", STALLING_SCRIPT);
        let crashing = install("fake-crashing", CRASHING_SCRIPT);

        FakeTools {
            _dir: dir,
            compiler,
            kernel,
            silent,
            noisy,
            hanging,
            stalling,
            crashing,
        }
    })
}

/// Write one triple-file case into `group`.
pub fn write_triple_case(group: &Path, name: &str) {
    for (dir, source) in [
        ("test_correct", CLEAN_SOURCE),
        ("test_correct_catch_bad", CLEAN_SOURCE),
        ("test_incorrect", BUGGY_SOURCE),
    ] {
        fs::create_dir_all(group.join(dir)).unwrap();
        fs::write(group.join(dir).join(name), source).unwrap();
    }
    fs::write(group.join(name), CLEAN_SOURCE).unwrap();
}

/// Write a define-flag group with a Makefile and the given case files.
pub fn write_define_group(folder: &Path, names: &[&str]) {
    fs::create_dir_all(folder).unwrap();
    fs::write(folder.join("Makefile"), "all:\n").unwrap();
    for name in names {
        fs::write(folder.join(name), BUGGY_SOURCE).unwrap();
    }
}
