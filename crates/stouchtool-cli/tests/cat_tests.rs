//! End-to-end tests for `s-cat`.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use stouchtool_adapters::TouchstoneFiles;
use stouchtool_core::prelude::*;
use tempfile::TempDir;

const A: &str = "./tests/data/evalboard_in_outp_outn_50ohm_5V_pinm20dBm.s2p";
const B: &str = "./tests/data/evalboard_in_outn_outp_50ohm_5V_pinm20dBm.s2p";
const C: &str = "./tests/data/evalboard_outp_outn_in_50ohm_5V_pinm20dBm.s2p";

/// A scratch directory holding a copy of `tests/data`.
fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("tests").join("data");
    fs::create_dir_all(&data).unwrap();
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data");
    for entry in fs::read_dir(source).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), data.join(entry.file_name())).unwrap();
    }
    temp
}

fn s_cat(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("s-cat").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn load(path: &Path) -> Network {
    TouchstoneFiles::default().load(path).unwrap()
}

#[test]
fn three_files_make_a_three_port_named_after_the_inputs() {
    let dir = workspace();

    s_cat(&dir)
        .args([A, B, C])
        .assert()
        .success()
        .stdout(format!(
            "The cat from files ['{A}', '{B}', '{C}'] has been stored in \
             ./tests/data/evalboard_in_out.s3p\n"
        ));

    let result = load(&dir.path().join("tests/data/evalboard_in_out.s3p"));
    let golden = load(&dir.path().join("tests/data/golden.s3p"));
    assert_eq!(result.nports(), 3);
    assert!(result.approx_eq(&golden, 1e-9));
}

#[test]
fn explicit_port_count_matching_the_files() {
    let dir = workspace();

    s_cat(&dir)
        .args(["-p", "3", A, B, C])
        .assert()
        .success();

    assert!(dir.path().join("tests/data/evalboard_in_out.s3p").exists());
}

#[test]
fn port_count_disagreeing_with_files_fails() {
    let dir = workspace();

    s_cat(&dir)
        .args(["-p", "4", A, B, C])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Wrong number of files: 3"));

    assert!(!dir.path().join("tests/data/evalboard_in_out.s4p").exists());
    assert!(!dir.path().join("tests/data/evalboard_in_out.s3p").exists());
}

#[test]
fn oversized_port_count_is_a_mismatch() {
    let dir = workspace();

    s_cat(&dir)
        .args(["-p", &usize::MAX.to_string(), A, B, C])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Wrong number of files: 3"));
}

#[test]
fn two_files_is_not_a_pair_count() {
    let dir = workspace();

    s_cat(&dir)
        .args([A, B])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Wrong number of files: 2"));
}

#[test]
fn six_files_make_a_four_port() {
    let dir = workspace();

    s_cat(&dir)
        .args(["-o", "board.s4p", A, B, C, B, C, C])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("has been stored in board.s4p\n"));

    let result = load(&dir.path().join("board.s4p"));
    let golden = load(&dir.path().join("tests/data/golden.s4p"));
    assert_eq!(result.nports(), 4);
    assert!(result.approx_eq(&golden, 1e-9));
}

#[test]
fn json_summary_carries_the_report() {
    let dir = workspace();

    let output = s_cat(&dir)
        .args(["--output-format", "json", "-o", "out.s3p", A, B, C])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["result"]["output"], "out.s3p");
    assert_eq!(json["result"]["inputs"].as_array().unwrap().len(), 3);
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .starts_with("The cat from files")
    );
}

#[test]
fn quiet_run_prints_nothing() {
    let dir = workspace();

    s_cat(&dir)
        .args(["-q", "-o", "out.s3p", A, B, C])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.path().join("out.s3p").exists());
}

#[test]
fn missing_input_fails_without_output() {
    let dir = workspace();

    s_cat(&dir)
        .args(["-o", "out.s3p", A, "./tests/data/absent.s2p", C])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("absent.s2p"));

    assert!(!dir.path().join("out.s3p").exists());
}

#[test]
fn no_arguments_is_a_usage_error() {
    let dir = workspace();

    s_cat(&dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn version_flag() {
    let dir = workspace();

    s_cat(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
