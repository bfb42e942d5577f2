use std::io::Write;

use anyhow::Context;

use crate::{
    args::{self, positional},
    rule::Rule,
};

const USAGE: &'static str = r#"
Validate recurrence rules.

Each rule is parsed and, when valid, printed in its canonical form: weekdays
and months in ascending order without duplicates, and integers without a
leading `+`. Checking stops at the first invalid rule.

USAGE:
    nextdate check <rule>...
    nextdate check < line delimited <rule>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Normalize a weekly rule:

        $ nextdate check 'w 5,1,1'
        w 1,5

    %snip-start%

    See why a rule is rejected:

        $ nextdate check 'm 31 2,4'
        rule `m 31 2,4`: rule never matches, none of its days exist in any of its months

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut rules = positional::Rules::default();
    args::configure(p, USAGE, &mut [&mut rules])?;

    let mut wtr = std::io::stdout().lock();
    rules.try_map(|rule| {
        let parsed = rule
            .parse::<Rule>()
            .with_context(|| format!("rule `{rule}`"))?;
        writeln!(wtr, "{parsed}")?;
        Ok(true)
    })
}
