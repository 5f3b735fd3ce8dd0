use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env::detect::{RenderMode, detect_render_mode};
use crate::foundation::error::TrajviewResult;
use crate::orchestrate::discover::find_executable;
use crate::orchestrate::exec::{ExecutionResult, run_process};
use crate::path::parse::parse_point_file;
use crate::render::present::{RenderOutcome, visualize_with_mode};
use crate::render::session::RenderOpts;

/// Default simulator executable name.
pub const DEFAULT_EXE_NAME: &str = "UAVPathSimulation";

/// Default location of the simulator's point file, relative to the project root.
pub const DEFAULT_POINT_FILE: &str = "resources/pathOutput.txt";

/// Where the simulator lives and where it writes its output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project root: search root for the executable and its working directory.
    pub root: PathBuf,
    /// Executable base name (`.exe` suffix is also accepted).
    pub exe_name: String,
    /// Point file written by the simulator, relative to `root`.
    pub point_file: PathBuf,
}

impl ProjectLayout {
    /// Layout with the default executable name and point file under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exe_name: DEFAULT_EXE_NAME.to_string(),
            point_file: PathBuf::from(DEFAULT_POINT_FILE),
        }
    }

    /// Return a layout with a different executable name.
    pub fn with_exe_name(mut self, name: impl Into<String>) -> Self {
        self.exe_name = name.into();
        self
    }

    /// Absolute (root-joined) point file path.
    pub fn point_file_path(&self) -> PathBuf {
        self.root.join(&self.point_file)
    }
}

/// Summary of rendering one point file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderReport {
    /// Mode the animation was presented in.
    pub mode: RenderMode,
    /// Malformed point-file lines that were skipped.
    pub skipped_lines: usize,
    /// What the renderer produced.
    pub outcome: RenderOutcome,
}

/// Summary of a successful end-to-end run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Executable that was run.
    pub executable: PathBuf,
    /// Simulator wall-clock time.
    pub elapsed: Duration,
    /// Rendering summary.
    pub render: RenderReport,
}

/// Runs the simulator, then renders its output.
///
/// The steps are exposed separately so callers can report the execution result before an
/// interactive window takes over the thread.
#[derive(Clone, Debug)]
pub struct Orchestrator {
    layout: ProjectLayout,
}

impl Orchestrator {
    /// Orchestrator for `layout`.
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    /// Project layout.
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Discover and run the simulator, blocking until it exits.
    ///
    /// Discovery failure is returned as an error before anything is launched; a launched
    /// process's failure is reported inside the [`ExecutionResult`].
    pub fn execute(&self) -> TrajviewResult<ExecutionResult> {
        let exe = find_executable(&self.layout.root, &self.layout.exe_name)?;
        Ok(run_process(&exe, &self.layout.root))
    }

    /// Parse the simulator output and animate it.
    ///
    /// `mode` of `None` classifies the host with [`detect_render_mode`].
    pub fn render_output(
        &self,
        mode: Option<RenderMode>,
        opts: RenderOpts,
    ) -> TrajviewResult<RenderReport> {
        render_point_file(&self.layout.point_file_path(), mode, opts)
    }

    /// Full run: execute, then render on success. Errors are never retried.
    #[tracing::instrument(skip(self, opts), fields(root = %self.layout.root.display()))]
    pub fn run(&self, mode: Option<RenderMode>, opts: RenderOpts) -> TrajviewResult<RunReport> {
        let result = self.execute()?;
        let executable = result.executable.clone();
        let elapsed = result.into_result()?;
        let render = self.render_output(mode, opts)?;
        Ok(RunReport {
            executable,
            elapsed,
            render,
        })
    }
}

/// Parse `path`, pick the render mode, and animate.
pub fn render_point_file(
    path: &Path,
    mode: Option<RenderMode>,
    opts: RenderOpts,
) -> TrajviewResult<RenderReport> {
    let parsed = parse_point_file(path)?;
    let mode = mode.unwrap_or_else(detect_render_mode);
    let skipped_lines = parsed.skipped.len();
    let outcome = visualize_with_mode(parsed.dataset, mode, opts)?;
    Ok(RenderReport {
        mode,
        skipped_lines,
        outcome,
    })
}

/// Convenience wrapper around [`Orchestrator::run`].
pub fn run_and_visualize(
    layout: ProjectLayout,
    mode: Option<RenderMode>,
    opts: RenderOpts,
) -> TrajviewResult<RunReport> {
    Orchestrator::new(layout).run(mode, opts)
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrate/pipeline.rs"]
mod tests;
