use std::process::Command;

use netcdf_smoke::smoke;

fn smoke_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_netcdf-smoke"))
}

#[test]
fn succeeds_in_writable_directory() {
    let d = tempfile::tempdir().unwrap();

    let out = smoke_bin().current_dir(d.path()).output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        format!("{}\n", smoke::SUCCESS_MESSAGE)
    );

    let path = d.path().join("simple.nc");
    assert!(smoke::inspect(path).unwrap().is_smoke_output());
}

#[test]
fn rerun_succeeds() {
    let d = tempfile::tempdir().unwrap();
    for _ in 0..2 {
        let status = smoke_bin().current_dir(d.path()).status().unwrap();
        assert_eq!(status.code(), Some(0));
    }
}

#[test]
fn logs_stay_off_stdout() {
    let d = tempfile::tempdir().unwrap();

    let out = smoke_bin()
        .arg("-vvv")
        .current_dir(d.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap().trim_end(),
        smoke::SUCCESS_MESSAGE
    );
}

#[test]
fn fails_with_exit_code_two() {
    let d = tempfile::tempdir().unwrap();
    // nc_create can not replace a directory
    std::fs::create_dir(d.path().join("simple.nc")).unwrap();

    let out = smoke_bin().current_dir(d.path()).output().unwrap();
    assert_eq!(out.status.code(), Some(2));

    let stdout = String::from_utf8(out.stdout).unwrap();
    let message = stdout
        .strip_prefix("Error: ")
        .expect("stdout starts with the error prefix")
        .trim_end();
    assert!(!message.is_empty());
    assert!(d.path().join("simple.nc").is_dir());
}

#[test]
fn netcdf4_check() {
    let d = tempfile::tempdir().unwrap();

    let out = smoke_bin()
        .arg("--netcdf4")
        .current_dir(d.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        format!("{}\n", smoke::NETCDF4_SUCCESS_MESSAGE)
    );

    let path = d.path().join("test.nc");
    assert!(smoke::inspect(path).unwrap().is_netcdf4_output());
    assert!(!d.path().join("simple.nc").exists());
}
