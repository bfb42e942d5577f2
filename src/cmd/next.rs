use std::io::Write;

use crate::{
    args::{self, flags, positional},
    recur::next_occurrence,
};

const USAGE: &'static str = r#"
Print the next date of a recurring task.

A task is an anchor date, usually the last date the task was due, and a
recurrence rule. The date printed is the first occurrence of the rule after
the anchor that is also strictly after today (or the date given to -n/--now).

When no positional arguments are given, tasks are read from stdin, one per
line, as the anchor followed by a single space and then the rule. One date is
printed for each task. Processing stops at the first task that is rejected.

USAGE:
    nextdate next <anchor> <rule>
    nextdate next < line delimited <anchor> <rule>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print the next Monday or Friday after today:

        $ nextdate next 20240101 'w 1,5'
        20240722

    %snip-start%

    Print the next last-day-of-the-month, measured from a fixed date:

        $ nextdate next -n 20240126 20240101 'm -1'
        20240131

    Every third day, but only counting from the anchor:

        $ nextdate next -n 20240126 20240101 'd 3'
        20240128

    A birthday on a leap day lands on March 1 in other years:

        $ nextdate next -n 20240301 20240229 y
        20250301

    Process many tasks at once:

        $ printf '20240101 d 30\n20240101 m 1,15 1,7\n' | nextdate next
        20240729
        20250101

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut now = flags::Now::default();
    let mut tasks = positional::Tasks::default();
    args::configure(p, USAGE, &mut [&mut now, &mut tasks])?;

    let now = now.get();
    let mut wtr = std::io::stdout().lock();
    tasks.try_map(|task| {
        let next = next_occurrence(now, task.anchor, task.rule)?;
        writeln!(wtr, "{next}")?;
        Ok(true)
    })
}
