//! Encoding sinks.
//!
//! Sinks consume rendered frames in animation order and are driven by
//! [`crate::RenderSession::render_pass`].

/// Animated GIF artifact sink.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
/// Single-frame PNG export.
pub mod still;

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::TrajviewResult;

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> TrajviewResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
