use crate::command::assert_cmd_snapshot;

fn schedule() -> crate::command::Command {
    crate::nextdate(["schedule"])
}

#[test]
fn empty_date_is_today() {
    assert_cmd_snapshot!(
        schedule().arg(""),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20240720

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        schedule().args(["", "d 3"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20240720

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        schedule().args(["-n", "20240101", ""]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20240101

    ----- stderr -----
    ",
    );
}

#[test]
fn future_dates_are_kept() {
    assert_cmd_snapshot!(
        schedule().arg("20240801"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20240801

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        schedule().args(["20240801", "w 1"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20240801

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        schedule().args(["20240720", "d 3"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20240720

    ----- stderr -----
    ",
    );
}

#[test]
fn past_dates_move_forward() {
    assert_cmd_snapshot!(
        schedule().arg("20240101"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20240720

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        schedule().args(["20240101", ""]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20240720

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        schedule().args(["20240101", "m -1"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20240731

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        schedule().args(["20240718", "d 2"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20240722

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        schedule().args(["-n", "20240101", "20231231", "y"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    20241231

    ----- stderr -----
    ",
    );
}

/// A rule is validated even when it isn't needed to pick the date.
#[test]
fn rejections() {
    assert_cmd_snapshot!(
        schedule().arg("2024-07-20"),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    invalid date `2024-07-20`, expected a calendar date written as `YYYYMMDD`
    ",
    );

    assert_cmd_snapshot!(
        schedule().args(["20250101", "w 8"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    weekday `8` is out of range, expected an integer in `1..=7` (1 is Monday, 7 is Sunday)
    ",
    );

    assert_cmd_snapshot!(
        schedule().args(["", "x"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    unsupported recurrence rule, expected a rule starting with `d`, `y`, `w` or `m`
    ",
    );

    assert_cmd_snapshot!(
        schedule(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    missing <date> argument
    ",
    );

    assert_cmd_snapshot!(
        schedule().args(["20240101", "d 1", "more"]),
        @r#"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    unexpected argument "more"
    "#,
    );
}
