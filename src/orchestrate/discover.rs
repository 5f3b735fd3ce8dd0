use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::foundation::error::{TrajviewError, TrajviewResult};

/// Find `name` (or `name.exe`) anywhere under `root`.
///
/// The shallowest match wins; matches at equal depth are ordered by file name so the result is
/// stable across runs. Unreadable directories are skipped.
pub fn find_executable(root: &Path, name: &str) -> TrajviewResult<PathBuf> {
    let exe_name = format!("{name}.exe");
    let found = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let file_name = e.file_name();
            file_name == OsStr::new(name) || file_name == OsStr::new(&exe_name)
        })
        .min_by_key(|e| e.depth());

    match found {
        Some(entry) => {
            let path = entry.into_path();
            tracing::info!(path = %path.display(), "found executable");
            Ok(path)
        }
        None => Err(TrajviewError::ExecutableNotFound {
            name: name.to_string(),
            root: root.to_path_buf(),
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrate/discover.rs"]
mod tests;
