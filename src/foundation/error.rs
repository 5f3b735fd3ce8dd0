use std::path::PathBuf;

/// Convenience result type used across trajview.
pub type TrajviewResult<T> = Result<T, TrajviewError>;

/// Top-level error taxonomy.
///
/// Malformed point-stream lines are not represented here: the parser absorbs them and reports
/// them as [`crate::SkippedLine`] records.
#[derive(thiserror::Error, Debug)]
pub enum TrajviewError {
    /// Invalid user-provided options or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The simulator executable could not be located before launch.
    #[error("no '{name}' executable found under '{}'", root.display())]
    ExecutableNotFound {
        /// Executable base name that was searched for.
        name: String,
        /// Directory the search started from.
        root: PathBuf,
    },

    /// The executable was found but the OS refused to start it.
    #[error("failed to launch '{}': {source}", path.display())]
    Launch {
        /// Executable path.
        path: PathBuf,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The simulator ran and exited unsuccessfully.
    #[error("'{}' exited with {status}", path.display())]
    ProcessFailed {
        /// Executable path.
        path: PathBuf,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Human-readable exit status.
        status: String,
    },

    /// Errors while rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding or writing an output artifact.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors from the interactive display surface.
    #[error("display error: {0}")]
    Display(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrajviewError {
    /// Build a [`TrajviewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TrajviewError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TrajviewError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`TrajviewError::Display`] value.
    pub fn display(msg: impl Into<String>) -> Self {
        Self::Display(msg.into())
    }

    /// `true` for failures that happen before any process is launched.
    pub fn is_discovery(&self) -> bool {
        matches!(self, Self::ExecutableNotFound { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
