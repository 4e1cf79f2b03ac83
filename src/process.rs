//! Scoped execution of external analyzer processes.
//!
//! Every invocation gets its own scratch directory under the runner's
//! scratch root. The directory is the child's working directory and also
//! holds the files stdout and stderr are redirected into, so a child that
//! leaves grandchildren behind can never block the harness on an open pipe.
//! The directory is removed when the call returns, whatever the outcome.

use crate::error::{BenchError, BenchResult};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running child is polled while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Everything the child wrote to stdout (lossy UTF-8).
    pub stdout: String,
    /// Everything the child wrote to stderr (lossy UTF-8).
    pub stderr: String,
    /// Exit code, or `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Wall-clock time from spawn to reap.
    pub elapsed: Duration,
    /// Whether the child was killed for exceeding the timeout.
    pub timed_out: bool,
}

impl ProcessOutput {
    /// True if the child exited on its own with code 0.
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Runs external commands synchronously with an optional timeout.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    scratch_root: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner that places per-invocation scratch directories
    /// under `scratch_root`. No timeout is armed by default.
    pub fn new(scratch_root: impl Into<PathBuf>) -> Self {
        Self {
            scratch_root: scratch_root.into(),
            timeout: None,
        }
    }

    /// Arm a per-invocation timeout. A zero duration disables it.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// The armed timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Root under which scratch directories are created.
    pub fn scratch_root(&self) -> &Path {
        &self.scratch_root
    }

    /// Run `program` with `args` and wait for it to finish.
    ///
    /// A non-zero exit code is not an error; it is returned as-is. Only a
    /// failure to set up the scratch directory, start the child, or read its
    /// captured output is reported as `Err`.
    pub fn run<I, S>(&self, program: impl AsRef<OsStr>, args: I) -> BenchResult<ProcessOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program = program.as_ref();
        let command_name = program.to_string_lossy().into_owned();

        fs::create_dir_all(&self.scratch_root).map_err(|e| {
            BenchError::io(
                format!("creating scratch root {}", self.scratch_root.display()),
                e,
            )
        })?;
        let scratch = tempfile::Builder::new()
            .prefix("run-")
            .tempdir_in(&self.scratch_root)
            .map_err(|e| BenchError::io("creating scratch directory", e))?;

        let stdout_path = scratch.path().join("stdout.log");
        let stderr_path = scratch.path().join("stderr.log");
        let stdout_file = File::create(&stdout_path)
            .map_err(|e| BenchError::io("creating stdout capture", e))?;
        let stderr_file = File::create(&stderr_path)
            .map_err(|e| BenchError::io("creating stderr capture", e))?;

        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(scratch.path())
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_file))
            .stderr(Stdio::from(stderr_file));
        // Own process group, so a timeout can take down everything the
        // analyzer started.
        #[cfg(unix)]
        std::os::unix::process::CommandExt::process_group(&mut command, 0);

        let started = Instant::now();
        let mut child = command
            .spawn()
            .map_err(|source| BenchError::Spawn {
                command: command_name.clone(),
                source,
            })?;

        let (status, timed_out) = wait_for_child(&mut child, self.timeout, &command_name)?;
        let elapsed = started.elapsed();

        if timed_out {
            tracing::warn!(
                "'{}' killed after exceeding {:?} timeout",
                command_name,
                self.timeout.unwrap_or_default()
            );
        }

        Ok(ProcessOutput {
            stdout: read_capture(&stdout_path)?,
            stderr: read_capture(&stderr_path)?,
            exit_code: status.code(),
            elapsed,
            timed_out,
        })
    }
}

/// Wait for `child`, killing it once `timeout` has elapsed.
fn wait_for_child(
    child: &mut Child,
    timeout: Option<Duration>,
    command: &str,
) -> BenchResult<(ExitStatus, bool)> {
    let Some(limit) = timeout else {
        let status = child
            .wait()
            .map_err(|e| BenchError::io(format!("waiting for '{command}'"), e))?;
        return Ok((status, false));
    };

    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((status, false)),
            Ok(None) if started.elapsed() >= limit => {
                kill_process_tree(child);
                let status = child
                    .wait()
                    .map_err(|e| BenchError::io(format!("reaping '{command}' after kill"), e))?;
                return Ok((status, true));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => return Err(BenchError::io(format!("waiting for '{command}'"), e)),
        }
    }
}

/// Kill `child` and, on unix, every process in its process group.
fn kill_process_tree(child: &mut Child) {
    #[cfg(unix)]
    if let Ok(pid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: kill(2) with a negated pid only signals the child's own
        // process group, which was created for this invocation.
        unsafe {
            libc::kill(-pid, libc::SIGKILL);
        }
    }
    // The child can exit between try_wait and kill; the kill error is moot then.
    let _ = child.kill();
}

fn read_capture(path: &Path) -> BenchResult<String> {
    let bytes = fs::read(path)
        .map_err(|e| BenchError::io(format!("reading {}", path.display()), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
