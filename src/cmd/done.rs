use std::io::Write;

use crate::{
    args::{self, flags, positional},
    task::{self, Completion},
};

const USAGE: &'static str = r#"
Reschedule a task that was just completed.

When the task recurs, its next date after today is printed. When it doesn't,
nothing is printed, since a completed one-off task is removed. The date of a
one-off task isn't checked.

USAGE:
    nextdate done <date> [<rule>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Complete a weekly task:

        $ nextdate done -n 20240720 20240715 'w 1'
        20240722

    %snip-start%

    Completing a one-off task prints nothing:

        $ nextdate done -n 20240720 20240720

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut now = flags::Now::default();
    let mut input = positional::DateAndRule::default();
    args::configure(p, USAGE, &mut [&mut now, &mut input])?;

    match task::complete(now.get(), input.date()?, input.rule())? {
        Completion::Remove => {
            log::debug!("task does not recur and would be removed");
        }
        Completion::Reschedule(date) => {
            writeln!(std::io::stdout(), "{date}")?;
        }
    }
    Ok(())
}
