//! End-to-end CLI behavior: argument parsing, stdin/file input,
//! output formatting, and exit codes.

use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("preconfig").unwrap()
}

#[test]
fn resolves_a_template_file_with_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("template.tpl");
    std::fs::write(&file, "hello ${para:name}").unwrap();

    cmd()
        .arg(&file)
        .args(["-p", "name=world"])
        .assert()
        .success()
        .stdout(contains("hello world"));
}

#[test]
#[serial_test::serial(preconfig_env)]
fn reads_from_stdin_when_no_file_is_given() {
    unsafe {
        std::env::set_var("PRECONFIG_CLI_TEST_VAR", "hi");
    }
    cmd()
        .write_stdin("stdin says ${env:PRECONFIG_CLI_TEST_VAR}")
        .assert()
        .success()
        .stdout(contains("stdin says hi"));
    unsafe {
        std::env::remove_var("PRECONFIG_CLI_TEST_VAR");
    }
}

#[test]
fn json_format_reformats_resolved_output() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("template.tpl");
    std::fs::write(&file, r#"{"greeting": "${para:greeting}"}"#).unwrap();

    cmd()
        .arg(&file)
        .args(["-p", "greeting=hi"])
        .args(["-f", "json"])
        .assert()
        .success()
        .stdout(contains("\"greeting\""))
        .stdout(contains("\"hi\""));
}

#[test]
fn missing_parameter_exits_nonzero_with_a_reference_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("template.tpl");
    std::fs::write(&file, "${para:missing}").unwrap();

    cmd().arg(&file).assert().failure().stderr(contains("unresolvable reference"));
}

#[test]
fn missing_file_argument_exits_nonzero_with_a_reference_error() {
    cmd().arg("/does/not/exist.tpl").assert().failure().stderr(contains("file not found"));
}

#[test]
fn syntax_error_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("template.tpl");
    std::fs::write(&file, "${unterminated").unwrap();

    cmd().arg(&file).assert().failure().stderr(contains("missing closing"));
}

#[test]
fn malformed_parameter_pair_is_a_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("template.tpl");
    std::fs::write(&file, "hello ${para:name}").unwrap();

    cmd()
        .arg(&file)
        .args(["-p", "no-equals-sign"])
        .assert()
        .failure()
        .stderr(contains("invalid input"));
}
