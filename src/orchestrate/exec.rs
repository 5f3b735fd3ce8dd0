use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use crate::foundation::error::{TrajviewError, TrajviewResult};

/// Why a simulator run did not succeed.
#[derive(Debug)]
pub enum ExecutionFailure {
    /// The executable vanished between discovery and launch.
    NotFound,
    /// The OS refused to start the process.
    Launch(std::io::Error),
    /// The process ran and exited unsuccessfully.
    Exited {
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Human-readable exit status.
        status: String,
    },
}

/// Outcome of one blocking simulator run.
#[derive(Debug)]
pub struct ExecutionResult {
    /// Executable that was launched.
    pub executable: PathBuf,
    /// Wall-clock time from launch to exit.
    pub elapsed: Duration,
    /// `None` on success.
    pub failure: Option<ExecutionFailure>,
}

impl ExecutionResult {
    /// `true` when the process exited with status 0.
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Convert into the elapsed time, or the matching [`TrajviewError`].
    pub fn into_result(self) -> TrajviewResult<Duration> {
        match self.failure {
            None => Ok(self.elapsed),
            Some(ExecutionFailure::NotFound) => {
                let name = self
                    .executable
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let root = self
                    .executable
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                Err(TrajviewError::ExecutableNotFound { name, root })
            }
            Some(ExecutionFailure::Launch(source)) => Err(TrajviewError::Launch {
                path: self.executable,
                source,
            }),
            Some(ExecutionFailure::Exited { code, status }) => Err(TrajviewError::ProcessFailed {
                path: self.executable,
                code,
                status,
            }),
        }
    }
}

/// Run `executable` with `cwd` as working directory and wait for it to exit.
///
/// Stdio is inherited. There is no timeout: a hung process blocks the caller.
#[tracing::instrument]
pub fn run_process(executable: &Path, cwd: &Path) -> ExecutionResult {
    let start = Instant::now();
    let status = Command::new(executable).current_dir(cwd).status();
    let elapsed = start.elapsed();

    let failure = match status {
        Ok(status) if status.success() => None,
        Ok(status) => Some(ExecutionFailure::Exited {
            code: status.code(),
            status: status.to_string(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Some(ExecutionFailure::NotFound),
        Err(e) => Some(ExecutionFailure::Launch(e)),
    };

    match &failure {
        None => tracing::info!(elapsed_s = elapsed.as_secs_f64(), "simulator finished"),
        Some(f) => tracing::error!(failure = ?f, elapsed_s = elapsed.as_secs_f64(), "simulator failed"),
    }

    ExecutionResult {
        executable: executable.to_path_buf(),
        elapsed,
        failure,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrate/exec.rs"]
mod tests;
