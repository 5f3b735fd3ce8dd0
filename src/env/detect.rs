use std::path::PathBuf;

/// How a run presents its animation. Decided once, before any drawing surface exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Live looping window.
    Interactive,
    /// Off-screen rasterization with a single exported artifact.
    Headless,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Interactive => "interactive",
            Self::Headless => "headless",
        })
    }
}

/// Control-group path fragments that indicate container membership.
const CONTAINER_CGROUP_MARKERS: &[&str] = &["docker", "containerd", "kubepods", "libpod", "lxc"];

/// Host indicators consulted by [`HostProbe::render_mode`].
///
/// The defaults point at the real host; tests substitute scratch files.
#[derive(Clone, Debug)]
pub struct HostProbe {
    /// Whether the host is Linux-family. Container checks only apply there.
    pub linux: bool,
    /// File whose presence marks a container (`/.dockerenv`).
    pub marker_file: PathBuf,
    /// Control-group membership of the init process (`/proc/1/cgroup`).
    pub cgroup_file: PathBuf,
}

impl Default for HostProbe {
    fn default() -> Self {
        Self {
            linux: cfg!(target_os = "linux"),
            marker_file: PathBuf::from("/.dockerenv"),
            cgroup_file: PathBuf::from("/proc/1/cgroup"),
        }
    }
}

impl HostProbe {
    /// `true` when the host looks like a container or sandbox.
    pub fn is_containerized(&self) -> bool {
        if !self.linux {
            return false;
        }
        if self.marker_file.exists() {
            return true;
        }
        // An unreadable cgroup file is treated as "not a container".
        std::fs::read_to_string(&self.cgroup_file)
            .map(|s| {
                s.lines()
                    .any(|l| CONTAINER_CGROUP_MARKERS.iter().any(|m| l.contains(m)))
            })
            .unwrap_or(false)
    }

    /// Classify the host.
    pub fn render_mode(&self) -> RenderMode {
        if self.is_containerized() {
            RenderMode::Headless
        } else {
            RenderMode::Interactive
        }
    }
}

/// Classify the current host using the default probe.
pub fn detect_render_mode() -> RenderMode {
    let mode = HostProbe::default().render_mode();
    tracing::info!(%mode, "render mode detected");
    mode
}

#[cfg(test)]
#[path = "../../tests/unit/env/detect.rs"]
mod tests;
