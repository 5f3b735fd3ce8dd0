use super::*;

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"").unwrap();
}

#[test]
fn finds_nested_executable() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("build").join("bin").join("Sim");
    touch(&exe);
    assert_eq!(find_executable(dir.path(), "Sim").unwrap(), exe);
}

#[test]
fn accepts_exe_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("x64").join("Debug").join("Sim.exe");
    touch(&exe);
    assert_eq!(find_executable(dir.path(), "Sim").unwrap(), exe);
}

#[test]
fn shallowest_match_wins() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("a").join("b").join("Sim"));
    let shallow = dir.path().join("z").join("Sim");
    touch(&shallow);
    assert_eq!(find_executable(dir.path(), "Sim").unwrap(), shallow);
}

#[test]
fn directories_and_near_names_do_not_match() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("Sim")).unwrap();
    touch(&dir.path().join("Sim.txt"));
    touch(&dir.path().join("SimX"));
    let err = find_executable(dir.path(), "Sim").unwrap_err();
    assert!(err.is_discovery());
    match err {
        TrajviewError::ExecutableNotFound { name, root } => {
            assert_eq!(name, "Sim");
            assert_eq!(root, dir.path());
        }
        other => panic!("unexpected error: {other}"),
    }
}
