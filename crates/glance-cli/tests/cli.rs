//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn write_temp_md(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".md")
        .tempfile()
        .expect("temp file");
    file.write_all(content.as_bytes()).expect("write");
    file
}

#[test]
fn renders_container_to_stdout() {
    let input = write_temp_md(":::tip\nHello\n:::\n");

    Command::cargo_bin("glance-md")
        .expect("binary")
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"class="tip custom-block""#))
        .stdout(predicate::str::contains("Hello"));
}

#[test]
fn writes_output_file() {
    let input = write_temp_md("# Title\n");
    let out_dir = tempfile::tempdir().expect("temp dir");
    let out_path = out_dir.path().join("out.html");

    Command::cargo_bin("glance-md")
        .expect("binary")
        .arg(input.path())
        .arg("-o")
        .arg(&out_path)
        .assert()
        .success();

    let html = std::fs::read_to_string(&out_path).expect("output file");
    assert!(html.contains("<h1"));
    assert!(html.contains("Title"));
}

#[test]
fn copy_label_flag_reaches_wrapper() {
    let input = write_temp_md("```rust\nfn main() {}\n```\n");

    Command::cargo_bin("glance-md")
        .expect("binary")
        .arg(input.path())
        .arg("--copy-label")
        .arg("复制")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"title="复制""#));
}

#[test]
fn unknown_theme_fails() {
    let input = write_temp_md("# hi\n");

    Command::cargo_bin("glance-md")
        .expect("binary")
        .arg(input.path())
        .arg("--theme")
        .arg("no-such-theme")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-theme"));
}

#[test]
fn missing_input_fails() {
    Command::cargo_bin("glance-md")
        .expect("binary")
        .arg("/definitely/not/here.md")
        .assert()
        .failure();
}

#[test]
fn size_limit_enforced() {
    let input = write_temp_md(&"a".repeat(256));

    Command::cargo_bin("glance-md")
        .expect("binary")
        .arg(input.path())
        .arg("--max-size")
        .arg("16")
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}
