#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn cli() -> Command {
    Command::cargo_bin("aruco-solids").expect("binary")
}

#[test]
fn no_arguments_generates_default_batch() {
    let dir = tempfile::tempdir().expect("tempdir");
    cli()
        .current_dir(dir.path())
        .arg("--log-level=warn")
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 16 markers"));

    let out = dir.path().join("output");
    let mut names: Vec<String> = fs::read_dir(&out)
        .expect("output dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 16);
    assert!(names.contains(&"marker_DICT_4X4_50_id=0.stl".to_string()));
    assert!(names.contains(&"marker_DICT_4X4_50_id=15.stl".to_string()));
}

#[test]
fn generate_flags_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    cli()
        .current_dir(dir.path())
        .args([
            "generate",
            "-d",
            "4x4_1000",
            "--ids",
            "4,999",
            "--margin",
            "0",
            "--square-corners",
            "--ascii",
            "-o",
            "stl",
        ])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("stl/marker_DICT_4X4_1000_id=999.stl"))
        .expect("ascii stl");
    assert!(text.starts_with("solid "));
    assert!(dir.path().join("stl/marker_DICT_4X4_1000_id=4.stl").exists());
}

#[test]
fn invalid_geometry_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    cli()
        .current_dir(dir.path())
        .args(["generate", "--black-thickness", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("black_cell_thickness"));
}

#[test]
fn dictionaries_lists_builtins() {
    cli()
        .arg("dictionaries")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("DICT_4X4_50").and(predicate::str::contains("DICT_4X4_1000")),
        );
}

#[test]
fn init_config_round_trips_through_generate() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = dir.path().join("markers.json");
    cli().arg("init-config").arg(&cfg).assert().success();

    let json = fs::read_to_string(&cfg).expect("config");
    assert!(json.contains("\"dictionary\": \"DICT_4X4_50\""));

    cli()
        .arg("init-config")
        .arg(&cfg)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    cli()
        .current_dir(dir.path())
        .args(["generate", "--count", "2", "-c"])
        .arg(&cfg)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 2 markers"));
    assert!(dir.path().join("output/marker_DICT_4X4_50_id=1.stl").exists());
}
