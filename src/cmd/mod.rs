mod check;
mod done;
mod next;
mod schedule;
mod seq;

const USAGE: &'static str = "\
Compute the next date of a recurring task.

USAGE:
    nextdate <command> ...

With no command, today's date is printed as `YYYYMMDD`.

COMMANDS:
    check     Validate recurrence rules
    done      Reschedule a task that was just completed
    next      Print the next date of a recurring task
    schedule  Pick the date for a newly added task
    seq       Print a sequence of dates of a recurring task
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    // For convenience, running `nextdate` with no arguments prints today's
    // date in the same format that every other command uses.
    if p.try_raw_args().map_or(false, |args| args.as_slice().is_empty()) {
        use std::io::Write;

        writeln!(std::io::stdout(), "{}", crate::date::Date::today())?;
        return Ok(());
    }

    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "check" => check::run(p),
        "done" => done::run(p),
        "next" => next::run(p),
        "schedule" => schedule::run(p),
        "seq" => seq::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}
