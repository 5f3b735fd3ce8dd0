use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::error::TrajviewError;

#[cfg(unix)]
fn fake_simulator(root: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt as _;
    let bin = root.join("build").join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    let exe = bin.join(DEFAULT_EXE_NAME);
    std::fs::write(&exe, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
}

fn headless_opts(root: &Path) -> RenderOpts {
    RenderOpts::default()
        .with_canvas(Canvas::new(32, 32).unwrap())
        .with_artifact_path(root.join("animation.gif"))
}

#[test]
fn layout_defaults() {
    let layout = ProjectLayout::new("/proj");
    assert_eq!(layout.exe_name, DEFAULT_EXE_NAME);
    assert_eq!(
        layout.point_file_path(),
        PathBuf::from("/proj/resources/pathOutput.txt")
    );
}

#[cfg(unix)]
#[test]
fn end_to_end_headless_run() {
    let dir = tempfile::tempdir().unwrap();
    fake_simulator(
        dir.path(),
        "mkdir -p resources\nprintf '(0,0)\\n(1,1)\\n(2,2)\\nbad_line\\n(3,3)\\n' > resources/pathOutput.txt",
    );
    let report = run_and_visualize(
        ProjectLayout::new(dir.path()),
        Some(RenderMode::Headless),
        headless_opts(dir.path()),
    )
    .unwrap();

    assert_eq!(report.render.mode, RenderMode::Headless);
    assert_eq!(report.render.skipped_lines, 1);
    assert_eq!(
        report.render.outcome,
        RenderOutcome::Exported {
            frames: 5,
            path: Some(dir.path().join("animation.gif")),
        }
    );
    assert!(dir.path().join("animation.gif").is_file());
}

#[cfg(unix)]
#[test]
fn failed_simulator_skips_rendering() {
    let dir = tempfile::tempdir().unwrap();
    fake_simulator(
        dir.path(),
        "mkdir -p resources\necho '(0,0)' > resources/pathOutput.txt\nexit 1",
    );
    let err = run_and_visualize(
        ProjectLayout::new(dir.path()),
        Some(RenderMode::Headless),
        headless_opts(dir.path()),
    )
    .unwrap_err();
    assert!(matches!(err, TrajviewError::ProcessFailed { code: Some(1), .. }));
    assert!(!dir.path().join("animation.gif").exists());
}

#[test]
fn missing_simulator_is_a_discovery_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Orchestrator::new(ProjectLayout::new(dir.path()))
        .execute()
        .unwrap_err();
    assert!(err.is_discovery());
}

#[cfg(unix)]
#[test]
fn empty_output_is_no_data() {
    let dir = tempfile::tempdir().unwrap();
    fake_simulator(
        dir.path(),
        "mkdir -p resources\necho 'nothing here' > resources/pathOutput.txt",
    );
    let report = run_and_visualize(
        ProjectLayout::new(dir.path()),
        Some(RenderMode::Headless),
        headless_opts(dir.path()),
    )
    .unwrap();
    assert_eq!(report.render.outcome, RenderOutcome::NoData);
    assert!(!dir.path().join("animation.gif").exists());
}
