use std::ffi::OsStr;

mod schedule;

/// The date every test treats as today. It's a Saturday.
const NOW: &str = "20240720";

/// Return a command for the `nextdate` binary and no argument.
fn nextdate_bare() -> crate::command::Command {
    crate::command::bin("nextdate")
        .env("TZ", "America/New_York")
        .env("NEXTDATE_NOW", NOW)
        .env_remove("NEXTDATE_LOG")
        .env_remove("RUST_BACKTRACE")
}

/// Return a command for the `nextdate` binary with the given arguments
/// appended to it.
fn nextdate<T: AsRef<OsStr>>(
    args: impl IntoIterator<Item = T>,
) -> crate::command::Command {
    nextdate_bare().args(args)
}

/// Test that calling `nextdate` with no arguments prints today's date.
#[test]
fn no_args() {
    crate::command::assert_cmd_snapshot!(
        nextdate_bare(),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20240720

    ----- stderr -----
    ",
    );
}

/// `-n/--now` wins over `NEXTDATE_NOW`, which is never even read when the
/// flag is given.
#[test]
fn now_flag_overrides_env() {
    crate::command::assert_cmd_snapshot!(
        nextdate(["next", "-n", "20240101", "20240101", "d 1"])
            .env("NEXTDATE_NOW", "2024-07-20"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20240102

    ----- stderr -----
    ",
    );
}

#[test]
fn unknown_command() {
    crate::command::assert_cmd_snapshot!(
        nextdate(["later"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    unrecognized command 'later'
    ",
    );
}

#[test]
fn unknown_log_level() {
    crate::command::assert_cmd_snapshot!(
        nextdate_bare().env("NEXTDATE_LOG", "loud"),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    unrecognized log level 'loud'
    ",
    );
}

#[test]
fn version() {
    let snap = nextdate(["--version"]).snapshot();
    assert!(snap.snapshot().starts_with("success: true\n"));
    assert!(snap.snapshot().contains("nextdate "));
}
