use predicates::prelude::*;
use std::fs::File;
use std::io::Write;
use assert_cmd::Command;
use tempfile::tempdir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("check-coding-style").unwrap();
    cmd.arg("--color=never");
    cmd
}

#[test]
fn help_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("coding style"));
}

#[test]
fn stdin_is_reported_as_stdin() {
    cmd()
        .write_stdin("if(x){y=1;}\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "STDIN:1: Missing space after `if' (col 0): if(x){y=1;}\n",
        ));
}

#[test]
fn files_are_checked_in_order() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.c");
    let second = dir.path().join("second.c");
    let mut f = File::create(&first).unwrap();
    writeln!(f, "int a;  ").unwrap();
    let mut f = File::create(&second).unwrap();
    writeln!(f, "int b;").unwrap();
    writeln!(f, "int c\t;").unwrap();

    let expected = format!(
        "{}:1: Trailing whitespace characters\n{}:2: Tab character (col 5)\n",
        first.display(),
        second.display()
    );
    cmd()
        .arg(&first)
        .arg(&second)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn unreadable_file_does_not_stop_others() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.c");
    let present = dir.path().join("present.c");
    let mut f = File::create(&present).unwrap();
    writeln!(f, "x=1;").unwrap();

    cmd()
        .arg(&missing)
        .arg(&present)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing.c: error: cannot read input"))
        .stdout(predicate::str::contains("present.c:1: Missing spaces around `='"));
}

#[test]
fn exit_status_flag_fails_on_warnings() {
    cmd()
        .arg("--exit-status")
        .write_stdin("x=1;\n")
        .assert()
        .code(1);

    cmd()
        .arg("--exit-status")
        .write_stdin("x = 1;\n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn lex_errors_go_to_stderr() {
    cmd()
        .write_stdin("a = 1;\nb = $c;\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "STDIN:2: error: Completely ugly code (trying to sync): $c;",
        ));
}

#[test]
fn disabled_rules_are_not_reported() {
    cmd()
        .args(["--disable", "spaces-around", "--disable", "multiple-statements"])
        .write_stdin("a=1; b=2;\n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn max_line_length_is_configurable() {
    let line = format!("int {};\n", "x".repeat(70));
    cmd()
        .args(["--max-line-length", "60"])
        .write_stdin(line.clone())
        .assert()
        .success()
        .stdout(predicate::str::contains("Line longer than 60 characters"));

    cmd().write_stdin(line).assert().success().stdout("");
}

#[test]
fn list_rules_names_every_rule() {
    cmd()
        .arg("--list-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("trailing-whitespace"))
        .stdout(predicate::str::contains("boolean-arguments"));
}
