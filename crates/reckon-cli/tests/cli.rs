use predicates::prelude::*;
use assert_cmd::Command;

fn reckon() -> Command {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.env("RECKON_PROMPT", "0");
    cmd
}

#[test]
fn evaluates_inline_expression() {
    reckon()
        .args(["-e", "0.1 + 0.2"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0.3\n"));
}

#[test]
fn prints_deterministic_form() {
    reckon()
        .args(["--var", "hp=12", "--det", "-e", "hp + 2 * 3"])
        .assert()
        .success()
        .stdout(predicate::str::diff("12 + 2 * 3\n"));
}

#[test]
fn runs_file_line_by_line() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("sheet.rk");
    std::fs::write(&path, "# character sheet\nstr = 14\n\nmod = floor((str - 10) / 2)\n'mod: ' + mod\n").unwrap();

    reckon()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::diff("14\n2\nmod: 2\n"));
}

#[test]
fn undefined_variable_is_nonzero() {
    reckon()
        .args(["-e", "missing + 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Undefined variable: missing"));
}

#[test]
fn parse_error_shows_position() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let bad_path = tmp_dir.path().join("bad.rk");
    std::fs::write(&bad_path, "max(1, 2\n").unwrap();

    reckon()
        .arg(bad_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"))
        .stderr(predicate::str::contains("^"));
}

#[test]
fn prompt_variables_read_stdin() {
    Command::cargo_bin("reckon")
        .unwrap()
        .env_remove("RECKON_PROMPT")
        .args(["-e", "?bonus * 2"])
        .write_stdin("21\n")
        .assert()
        .success()
        .stdout(predicate::str::diff("42\n"));
}

#[test]
fn missing_file_is_reported() {
    reckon()
        .arg("does-not-exist.rk")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn repl_evaluates_and_reports_stats() {
    reckon()
        .write_stdin("x = 3\nx * x\n:stats\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("9"))
        .stdout(predicate::str::contains("function calls"));
}
