use super::*;

fn probe_in(dir: &std::path::Path, linux: bool) -> HostProbe {
    HostProbe {
        linux,
        marker_file: dir.join("dockerenv"),
        cgroup_file: dir.join("cgroup"),
    }
}

#[test]
fn bare_linux_host_is_interactive() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cgroup"), "0::/init.scope\n").unwrap();
    let probe = probe_in(dir.path(), true);
    assert!(!probe.is_containerized());
    assert_eq!(probe.render_mode(), RenderMode::Interactive);
}

#[test]
fn marker_file_means_headless() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dockerenv"), "").unwrap();
    assert_eq!(probe_in(dir.path(), true).render_mode(), RenderMode::Headless);
}

#[test]
fn container_cgroup_means_headless() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("cgroup"),
        "12:cpu:/\n11:memory:/docker/4f2a9c\n",
    )
    .unwrap();
    assert_eq!(probe_in(dir.path(), true).render_mode(), RenderMode::Headless);

    std::fs::write(dir.path().join("cgroup"), "0::/kubepods/besteffort/pod1\n").unwrap();
    assert_eq!(probe_in(dir.path(), true).render_mode(), RenderMode::Headless);
}

#[test]
fn missing_indicators_mean_interactive() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        probe_in(dir.path(), true).render_mode(),
        RenderMode::Interactive
    );
}

#[test]
fn non_linux_is_always_interactive() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dockerenv"), "").unwrap();
    std::fs::write(dir.path().join("cgroup"), "1:name=systemd:/docker/abc\n").unwrap();
    assert_eq!(
        probe_in(dir.path(), false).render_mode(),
        RenderMode::Interactive
    );
}

#[test]
fn mode_display_is_lowercase() {
    assert_eq!(RenderMode::Headless.to_string(), "headless");
    assert_eq!(RenderMode::Interactive.to_string(), "interactive");
}
