use crate::{
    args::{self, Configurable, Usage},
    date::Date,
};

/// The `-n/--now` flag, for setting the date that "next" is measured
/// against.
///
/// When absent, this falls back to today's date.
#[derive(Clone, Debug, Default)]
pub struct Now {
    date: Option<Date>,
}

impl Now {
    /// Returns the date given on the command line, or today's date if none
    /// was given.
    pub fn get(&self) -> Date {
        self.date.unwrap_or_else(Date::today)
    }
}

impl Configurable for Now {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            lexopt::Arg::Short('n') | lexopt::Arg::Long("now") => {
                self.date = Some(args::parse(p, "-n/--now")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[Date::NOW_FLAG]
    }
}

/// When a sequence of occurrences should stop.
///
/// This is a pair of mutually exclusive flags, `-c/--count` and
/// `-u/--until`. When neither is given, a sequence runs until the largest
/// supported date.
#[derive(Clone, Copy, Debug, Default)]
pub enum Termination {
    #[default]
    Never,
    Count(usize),
    Until(Date),
}

impl Termination {
    /// Returns true when `date`, the `emitted`-th date (1-indexed) of a
    /// sequence, is not part of the sequence.
    pub fn is_done(&self, emitted: usize, date: Date) -> bool {
        match *self {
            Termination::Never => false,
            Termination::Count(count) => emitted > count,
            Termination::Until(until) => date > until,
        }
    }

    /// Returns true when no date could ever be part of the sequence.
    pub fn is_empty(&self) -> bool {
        matches!(*self, Termination::Count(0))
    }
}

impl Configurable for Termination {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            lexopt::Arg::Short('u') | lexopt::Arg::Long("until") => {
                anyhow::ensure!(
                    !matches!(*self, Termination::Count(_)),
                    "the -u/--until flag cannot be used with -c/--count",
                );
                *self = Termination::Until(args::parse(p, "-u/--until")?);
            }
            lexopt::Arg::Short('c') | lexopt::Arg::Long("count") => {
                anyhow::ensure!(
                    !matches!(*self, Termination::Until(_)),
                    "the -c/--count flag cannot be used with -u/--until",
                );
                *self = Termination::Count(args::parse(p, "-c/--count")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const COUNT: Usage = Usage::flag(
            "-c/--count <number>",
            "Stop after this many dates have been printed.",
            r#"
Stop after this many dates have been printed.

Zero is a legal value, but always results in an empty sequence. Fewer dates
than requested are printed when the sequence reaches the largest supported
date, `99991231`.

This flag cannot be used with -u/--until.
"#,
        );
        const UNTIL: Usage = Usage::flag(
            "-u/--until <date>",
            "Stop after the last date on or before this one.",
            r#"
Stop after the last date on or before this one, written as `YYYYMMDD`.

The date given is inclusive. That is, if it's an occurrence of the rule, then
it's printed.

This flag cannot be used with -c/--count.
"#,
        );
        &[COUNT, UNTIL]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn termination() {
        let never = Termination::Never;
        assert!(!never.is_done(usize::MAX, d("99991231")));
        assert!(!never.is_empty());

        let count = Termination::Count(2);
        assert!(!count.is_done(1, d("20240101")));
        assert!(!count.is_done(2, d("20240101")));
        assert!(count.is_done(3, d("20240101")));
        assert!(Termination::Count(0).is_empty());

        let until = Termination::Until(d("20240131"));
        assert!(!until.is_done(100, d("20240130")));
        assert!(!until.is_done(100, d("20240131")));
        assert!(until.is_done(1, d("20240201")));
    }
}
