//! End-to-end tests for `s-plot`.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use printpdf::lopdf;
use tempfile::TempDir;

const INPUT: &str = "evalboard_in_outp_outn_50ohm_5V_pinm20dBm.s2p";

fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data");
    for name in [INPUT, "golden.s3p"] {
        fs::copy(data.join(name), temp.path().join(name)).unwrap();
    }
    temp
}

fn s_plot(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("s-plot").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn load_pdf(path: &Path) -> lopdf::Document {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    lopdf::Document::load_mem(&bytes).unwrap()
}

fn page_count(path: &Path) -> usize {
    load_pdf(path).get_pages().len()
}

fn page_text(path: &Path) -> String {
    load_pdf(path).extract_text(&[1]).unwrap()
}

#[test]
fn plots_next_to_the_input() {
    let dir = workspace();

    s_plot(&dir)
        .arg(INPUT)
        .assert()
        .success()
        .stdout(format!(
            "The plot from file {INPUT} has 2 ports and has been plotted in \
             evalboard_in_outp_outn_50ohm_5V_pinm20dBm.pdf\n"
        ));

    let pdf = dir.path().join("evalboard_in_outp_outn_50ohm_5V_pinm20dBm.pdf");
    assert_eq!(page_count(&pdf), 1);
    let text = page_text(&pdf);
    assert!(
        text.contains("evalboard_in_outp_outn_50ohm_5V_pinm20dBm"),
        "extracted: {text}"
    );
}

#[test]
fn three_port_with_title_and_output() {
    let dir = workspace();

    s_plot(&dir)
        .args(["-t", "Eval board", "-o", "board.pdf", "golden.s3p"])
        .assert()
        .success()
        .stdout(predicate::str::contains("has 3 ports"))
        .stdout(predicate::str::contains("plotted in board.pdf"));

    let pdf = dir.path().join("board.pdf");
    assert_eq!(page_count(&pdf), 1);
    let text = page_text(&pdf);
    assert!(text.contains("Eval board"), "extracted: {text}");
    assert!(!text.contains("golden"), "extracted: {text}");
    assert!(!dir.path().join("golden.pdf").exists());
}

#[test]
fn missing_input_writes_no_pdf() {
    let dir = workspace();

    s_plot(&dir)
        .arg("absent.s2p")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("absent.s2p"));

    assert!(!dir.path().join("absent.pdf").exists());
}

#[test]
fn oversized_port_extension_fails_cleanly() {
    let dir = workspace();
    fs::write(
        dir.path().join("huge.s4294967296p"),
        "# GHz S RI R 50\n1 0 0\n",
    )
    .unwrap();

    s_plot(&dir)
        .arg("huge.s4294967296p")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("huge.s4294967296p"));

    assert!(!dir.path().join("huge.pdf").exists());
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = workspace();
    fs::copy(dir.path().join(INPUT), dir.path().join("capture.txt")).unwrap();

    s_plot(&dir)
        .arg("capture.txt")
        .assert()
        .code(1);

    assert!(!dir.path().join("capture.pdf").exists());
}

#[test]
fn input_is_required() {
    let dir = workspace();

    s_plot(&dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_options() {
    let dir = workspace();

    s_plot(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--title"))
        .stdout(predicate::str::contains("--output"));
}
