//! Integration tests for zippack-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn zippack_cmd() -> Command {
    cargo_bin_cmd!("zippack")
}

#[test]
fn test_version_flag() {
    zippack_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zippack"));
}

#[test]
fn test_help_flag() {
    zippack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Packs files and directories into a ZIP archive",
        ));
}

#[test]
fn test_requires_sources() {
    zippack_cmd().assert().failure();
}

#[test]
fn test_packs_single_file() {
    let src = TempDir::new().expect("failed to create temp dir");
    let dest = TempDir::new().expect("failed to create temp dir");
    fs::write(src.path().join("readme.txt"), "hello").unwrap();

    zippack_cmd()
        .arg(src.path().join("readme.txt"))
        .arg("--name")
        .arg("report")
        .arg("--dest")
        .arg(dest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("report.zip"));

    assert!(dest.path().join("report.zip").is_file());
}

#[test]
fn test_packs_directory() {
    let src = TempDir::new().expect("failed to create temp dir");
    let dest = TempDir::new().expect("failed to create temp dir");
    let code = src.path().join("code");
    fs::create_dir(&code).unwrap();
    fs::write(code.join("main.txt"), "content").unwrap();

    zippack_cmd()
        .arg(&code)
        .arg("--name")
        .arg("code.zip")
        .arg("--dest")
        .arg(dest.path())
        .assert()
        .success();

    let archive = dest.path().join("code.zip");
    assert!(archive.is_file());

    let data = fs::read(archive).unwrap();
    assert_eq!(&data[0..4], b"PK\x03\x04");
}

#[test]
fn test_creates_missing_destination() {
    let src = TempDir::new().expect("failed to create temp dir");
    let dest = TempDir::new().expect("failed to create temp dir");
    fs::write(src.path().join("a.txt"), "a").unwrap();

    let nested = dest.path().join("out").join("archives");

    zippack_cmd()
        .arg(src.path().join("a.txt"))
        .arg("--dest")
        .arg(&nested)
        .assert()
        .success();

    assert!(nested.join("archive.zip").is_file());
}

#[test]
fn test_missing_source_fails() {
    let dest = TempDir::new().expect("failed to create temp dir");

    zippack_cmd()
        .arg("/no/such/source.txt")
        .arg("--dest")
        .arg(dest.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_json_output() {
    let src = TempDir::new().expect("failed to create temp dir");
    let dest = TempDir::new().expect("failed to create temp dir");
    fs::write(src.path().join("a.txt"), "a").unwrap();
    fs::write(src.path().join("b.txt"), "b").unwrap();

    let output = zippack_cmd()
        .arg(src.path().join("a.txt"))
        .arg(src.path().join("b.txt"))
        .arg("--json")
        .arg("--dest")
        .arg(dest.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["sources"], 2);
    assert!(
        json["archive"]
            .as_str()
            .unwrap()
            .ends_with("archive.zip")
    );
}

#[test]
fn test_quiet_suppresses_output() {
    let src = TempDir::new().expect("failed to create temp dir");
    let dest = TempDir::new().expect("failed to create temp dir");
    fs::write(src.path().join("a.txt"), "a").unwrap();

    zippack_cmd()
        .arg(src.path().join("a.txt"))
        .arg("--quiet")
        .arg("--dest")
        .arg(dest.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_name_extension_is_appended() {
    let src = TempDir::new().expect("failed to create temp dir");
    let dest = TempDir::new().expect("failed to create temp dir");
    fs::write(src.path().join("a.txt"), "a").unwrap();

    zippack_cmd()
        .arg(src.path().join("a.txt"))
        .arg("--name")
        .arg("../../evil")
        .arg("--dest")
        .arg(dest.path())
        .assert()
        .success();

    assert!(dest.path().join("evil.zip").is_file());
}
