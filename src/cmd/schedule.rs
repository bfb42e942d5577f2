use std::io::Write;

use crate::{
    args::{self, flags, positional},
    task,
};

const USAGE: &'static str = r#"
Pick the date for a newly added task.

The date printed is where a task lands when it's first added:

* An empty date means today.

* A date today or in the future is kept as is.

* A date in the past moves forward. A recurring task moves to its next
occurrence after today, and a one-off task moves to today.

When a rule is given, it must be valid even if it wasn't needed to pick the
date.

USAGE:
    nextdate schedule <date> [<rule>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    A task added without a date is due today:

        $ nextdate schedule ''
        20240720

    %snip-start%

    A recurring task added with a date in the past catches up to today:

        $ nextdate schedule -n 20240720 20240101 'm -1'
        20240731

    A one-off task that's overdue is due today:

        $ nextdate schedule -n 20240720 20240101
        20240720

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

    let date = task::schedule(now.get(), input.date()?, input.rule())?;
    writeln!(std::io::stdout(), "{date}")?;
    Ok(())
}
