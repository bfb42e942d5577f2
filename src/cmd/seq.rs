use std::io::Write;

use crate::{
    args::{self, flags, positional},
    recur::parse_task,
};

const USAGE: &'static str = r#"
Print a sequence of dates of a recurring task.

Dates are printed in chronological order. Every date printed is an occurrence
of the rule after the anchor and strictly after today (or the date given to
-n/--now). So the first date printed is the same as what `nextdate next` would
print for the same task.

Unless the `-c/--count` or `-u/--until` flags are used, this command will
print dates until the largest supported date, `99991231`, is reached. In lieu
of `-c/--count`, users may also choose to use programs like `head` to limit
the output.

USAGE:
    nextdate seq <anchor> <rule>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print the next three paydays, on the 15th and last day of each month:

        $ nextdate seq -c 3 20240101 'm 15,-1'
        20240731
        20240815
        20240831

    %snip-start%

    Print every Tuesday and Thursday left in August:

        $ nextdate seq -n 20240731 -u 20240831 20240101 'w 2,4'
        20240801
        20240806
        20240808
        20240813
        20240815
        20240820
        20240822
        20240827
        20240829

    See how a leap day anchor plays out over the years:

        $ nextdate seq -n 20240229 -c 5 20240229 y
        20250301
        20260301
        20270301
        20280229
        20290301

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut now = flags::Now::default();
    let mut terminates = flags::Termination::default();
    let mut task = positional::AnchorAndRule::default();
    args::configure(p, USAGE, &mut [&mut now, &mut terminates, &mut task])?;

    let task = task.get()?;
    let (anchor, rule) = parse_task(task.anchor, task.rule)?;
    if terminates.is_empty() {
        return Ok(());
    }
    let now = now.get();
    let mut wtr = std::io::stdout().lock();
    let dates = rule.occurrences(anchor).skip_while(|&date| date <= now);
    for (i, date) in dates.enumerate() {
        if terminates.is_done(i + 1, date) {
            break;
        }
        writeln!(wtr, "{date}")?;
    }
    Ok(())
}
