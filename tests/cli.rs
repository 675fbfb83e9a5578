use assert_cmd::Command;
use pretty_assertions::assert_eq;
use predicates::prelude::*;

const BLUE_STDOUT: &str = "\x1b[34m[stdout]\x1b[m";
const RED_STDERR: &str = "\x1b[31m[stderr]\x1b[m";

#[allow(deprecated)]
fn demo(color: &str) -> Command {
    let mut cmd = Command::cargo_bin("demo").unwrap();
    cmd.env_remove("NO_COLOR")
        .env_remove("DEMO_LOG")
        .env("DEMO_COLOR", color);
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_hello_is_prefixed_in_blue() {
    demo("always")
        .arg("hello")
        .assert()
        .success()
        .stdout(format!("{BLUE_STDOUT}hello world\n"))
        .stderr("");
}

#[test]
fn test_warnings_share_real_stdout_in_red() {
    let out = stdout_of(demo("always").args(["hello", "--flag"]));
    assert!(out.contains(&format!(
        "{RED_STDERR}Flag --flag has been deprecated, please don't use it\n"
    )));
    assert!(out.contains(&format!("{BLUE_STDOUT}hello world\n")));
}

#[test]
fn test_deprecated_command() {
    demo("never")
        .arg("hullo")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[stderr]Command \"hullo\" is deprecated, use hello instead\n",
        ))
        .stdout(predicate::str::contains("[stdout]hullo wurld\n"));
}

#[test]
fn test_root_help_every_line_prefixed() {
    let out = stdout_of(demo("never").arg("--help"));
    assert!(out.starts_with("[stdout]LONG TEXT\n[stdout]\n[stdout]Usage:\n[stdout]  demo [command]\n"));
    assert!(out.lines().all(|line| line.starts_with("[stdout]")));

    let bare = stdout_of(&mut demo("never"));
    assert_eq!(out, bare);
}

#[test]
fn test_unknown_command_exits_with_diagnostic() {
    demo("never")
        .arg("nonexist")
        .assert()
        .code(1)
        .stdout(
            "[stderr]Error: unknown command \"nonexist\" for \"demo\"\n\
             [stderr]Run 'demo --help' for usage.\n",
        )
        .stderr(
            "Execute() error (UnknownCommand): unknown command \"nonexist\" for \"demo\"\n",
        );
}

#[test]
fn test_invalid_flag_value_exits_with_diagnostic() {
    demo("never")
        .args(["hello", "--num=true"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[stderr]Usage:\n[stderr]  demo hello [flags]\n"))
        .stdout(predicate::str::contains("[stdout]").not())
        .stderr(predicate::str::starts_with(
            "Execute() error (InvalidFlagValue): invalid argument \"true\" for \"--num\" flag",
        ));
}

#[test]
fn test_no_color_env_disables_colors() {
    let mut cmd = demo("auto");
    cmd.env("NO_COLOR", "1").arg("hello");
    cmd.assert().success().stdout("[stdout]hello world\n");
}

#[test]
fn test_invalid_color_mode_is_a_config_error() {
    demo("rainbow")
        .arg("hello")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("invalid DEMO_COLOR value \"rainbow\""));
}

#[test]
fn test_completion_script_for_bash() {
    demo("never")
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"))
        .stdout(predicate::str::contains("--num"));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_argument_is_an_error_not_a_panic() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    demo("never")
        .arg(OsStr::from_bytes(b"\xff"))
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("[stderr]Error: "))
        .stderr(predicate::str::starts_with("Execute() error ("));

    demo("never")
        .args([OsStr::new("hullo"), OsStr::from_bytes(b"a\xff")])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "[stderr]Error: invalid UTF-8 was detected in one or more arguments\n",
        ))
        .stderr("Execute() error (InvalidUtf8): invalid UTF-8 was detected in one or more arguments\n");
}

#[test]
fn test_digit_separators_in_int_flag() {
    demo("never")
        .args(["hello", "--num=1_000"])
        .assert()
        .success()
        .stdout("[stdout]hello world\n");
}
