use super::*;

#[cfg(unix)]
fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt as _;
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn successful_run_reports_elapsed_time() {
    let dir = tempfile::tempdir().unwrap();
    let exe = script(dir.path(), "sim", "exit 0");
    let result = run_process(&exe, dir.path());
    assert!(result.is_success());
    assert_eq!(result.executable, exe);
    assert!(result.into_result().is_ok());
}

#[cfg(unix)]
#[test]
fn runs_in_the_given_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let exe = script(dir.path(), "sim", "echo here > marker.txt");
    let cwd = dir.path().join("work");
    std::fs::create_dir_all(&cwd).unwrap();
    assert!(run_process(&exe, &cwd).is_success());
    assert!(cwd.join("marker.txt").exists());
}

#[cfg(unix)]
#[test]
fn non_zero_exit_is_a_process_failure() {
    let dir = tempfile::tempdir().unwrap();
    let exe = script(dir.path(), "sim", "exit 3");
    let result = run_process(&exe, dir.path());
    assert!(!result.is_success());
    match result.into_result().unwrap_err() {
        TrajviewError::ProcessFailed { code, path, .. } => {
            assert_eq!(code, Some(3));
            assert_eq!(path, exe);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn vanished_executable_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("gone");
    let result = run_process(&exe, dir.path());
    assert!(matches!(result.failure, Some(ExecutionFailure::NotFound)));
    assert!(result.into_result().unwrap_err().is_discovery());
}

#[cfg(unix)]
#[test]
fn non_executable_file_is_a_launch_failure() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("sim");
    std::fs::write(&exe, "not a program").unwrap();
    let result = run_process(&exe, dir.path());
    assert!(matches!(result.failure, Some(ExecutionFailure::Launch(_))));
    assert!(matches!(
        result.into_result(),
        Err(TrajviewError::Launch { .. })
    ));
}
