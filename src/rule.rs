use jiff::civil::Weekday;

use crate::{
    args::Usage,
    rejection::{Parameter, Rejection, RuleKind},
};

/// The longest each month can be, leap years included.
const LONGEST_MONTH: [i8; 12] =
    [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A parsed recurrence rule.
///
/// A rule is written as a short string whose first token picks the kind:
///
/// * `d <n>` repeats every `n` days, `1 <= n <= 400`.
/// * `y` repeats every year on the same month and day.
/// * `w <weekdays>` repeats on the given comma separated weekdays, where `1`
/// is Monday and `7` is Sunday.
/// * `m <days> [<months>]` repeats on the given comma separated days of the
/// month. Negative days count back from the end of the month, so `-1` is the
/// last day. The optional comma separated months (`1..=12`) restrict which
/// months are eligible.
///
/// Parsing validates everything up front. Once a `Rule` exists, stepping
/// through its occurrences can't fail except by running off the end of the
/// calendar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Rule {
    EveryNDays(Interval),
    Yearly,
    Weekly(Weekdays),
    MonthlyOnDays(MonthDays),
}

impl Rule {
    pub const ARG: Usage = Usage::arg(
        "<rule>",
        "A recurrence rule, e.g., `w 1,5` or `m -1`.",
        r#"
A recurrence rule, e.g., `w 1,5` or `m -1`.

The first token of a rule picks its kind, and tokens are separated by a single
space. There are four kinds:

`d <n>` repeats every `n` days, where `n` is an integer in `1..=400`.

`y` repeats every year on the anchor's month and day. An anchor on February 29
lands on March 1 in years without one.

`w <weekday>[,<weekday>...]` repeats on each of the given weekdays, where `1`
is Monday and `7` is Sunday.

`m <day>[,<day>...] [<month>[,<month>...]]` repeats on each of the given days
of the month. A negative day counts back from the end of the month, so `-1` is
the last day. The optional months (`1..=12`) restrict which months are
eligible. Days that don't exist in a month, like `31` in April, are skipped.
"#,
    );
}

impl std::str::FromStr for Rule {
    type Err = Rejection;

    fn from_str(rule: &str) -> Result<Rule, Rejection> {
        if rule.is_empty() {
            return Err(Rejection::EmptyRule);
        }
        let tokens: Vec<&str> = rule.split(' ').collect();
        match tokens[..] {
            ["d", days] => {
                let days = integer(days, Parameter::DayInterval)?;
                // Range checked above, so this can't truncate.
                Ok(Rule::EveryNDays(Interval(days as i16)))
            }
            ["y"] => Ok(Rule::Yearly),
            ["w", weekdays] => Weekdays::parse(weekdays).map(Rule::Weekly),
            ["m", days] => {
                MonthDays::parse(days, None).map(Rule::MonthlyOnDays)
            }
            ["m", days, months] => {
                MonthDays::parse(days, Some(months)).map(Rule::MonthlyOnDays)
            }
            ["d", ..] => Err(Rejection::MalformedRule(RuleKind::EveryNDays)),
            ["y", ..] => Err(Rejection::MalformedRule(RuleKind::Yearly)),
            ["w", ..] => Err(Rejection::MalformedRule(RuleKind::Weekly)),
            ["m", ..] => {
                Err(Rejection::MalformedRule(RuleKind::MonthlyOnDays))
            }
            _ => Err(Rejection::UnsupportedRuleFormat),
        }
    }
}

/// Writes the canonical form of this rule.
///
/// Weekdays and months are written in ascending order without duplicates.
/// Days of the month are written in the order given.
impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Rule::EveryNDays(interval) => write!(f, "d {}", interval.get()),
            Rule::Yearly => write!(f, "y"),
            Rule::Weekly(ref weekdays) => {
                write!(f, "w ")?;
                let numbers =
                    weekdays.iter().map(|wd| wd.to_monday_one_offset());
                write_list(f, numbers)
            }
            Rule::MonthlyOnDays(ref md) => {
                write!(f, "m ")?;
                write_list(f, md.days().iter().copied())?;
                if !md.months().is_empty() {
                    write!(f, " ")?;
                    write_list(f, md.months().iter().copied())?;
                }
                Ok(())
            }
        }
    }
}

/// The number of days between occurrences of a `d` rule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Interval(i16);

impl Interval {
    /// Returns the interval in days, always in `1..=400`.
    pub fn get(self) -> i16 {
        self.0
    }
}

/// The non-empty set of weekdays of a `w` rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Weekdays(Box<[Weekday]>);

impl Weekdays {
    fn parse(list: &str) -> Result<Weekdays, Rejection> {
        let mut weekdays = vec![];
        for item in list.split(',') {
            let offset = integer(item, Parameter::Weekday)?;
            let Ok(weekday) = Weekday::from_monday_one_offset(offset as i8)
            else {
                return Err(Rejection::OutOfRangeParameter(
                    Parameter::Weekday,
                    offset,
                ));
            };
            weekdays.push(weekday);
        }
        weekdays.sort_by_key(|wd| wd.to_monday_one_offset());
        weekdays.dedup();
        Ok(Weekdays(weekdays.into_boxed_slice()))
    }

    /// Returns true if the given weekday is in this set.
    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0.contains(&weekday)
    }

    /// Iterates over the weekdays in this set, starting from Monday.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }
}

/// The days and (optional) month filter of an `m` rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthDays {
    // can be negative, never zero
    days: Box<[i8]>,
    // empty means every month
    months: Box<[i8]>,
}

impl MonthDays {
    fn parse(
        days: &str,
        months: Option<&str>,
    ) -> Result<MonthDays, Rejection> {
        let days = days
            .split(',')
            .map(|item| integer(item, Parameter::MonthDay).map(|d| d as i8))
            .collect::<Result<Vec<i8>, Rejection>>()?;
        let mut months = match months {
            None => vec![],
            Some(months) => months
                .split(',')
                .map(|item| integer(item, Parameter::Month).map(|m| m as i8))
                .collect::<Result<Vec<i8>, Rejection>>()?,
        };
        months.sort();
        months.dedup();

        // A day is reachable in some month of the filter exactly when it
        // fits into the longest month of the filter.
        let longest = months
            .iter()
            .map(|&m| LONGEST_MONTH[usize::from(m.unsigned_abs()) - 1])
            .max()
            .unwrap_or(31);
        if !days.iter().any(|d| d.unsigned_abs() <= longest.unsigned_abs()) {
            return Err(Rejection::NeverMatches);
        }
        Ok(MonthDays {
            days: days.into_boxed_slice(),
            months: months.into_boxed_slice(),
        })
    }

    /// The requested days of the month, in the order given.
    pub fn days(&self) -> &[i8] {
        &self.days
    }

    /// The eligible months, ascending. Empty means every month.
    pub fn months(&self) -> &[i8] {
        &self.months
    }
}

/// Parses a single integer token and checks it against `param`'s range.
fn integer(token: &str, param: Parameter) -> Result<i64, Rejection> {
    let Ok(value) = token.parse::<i64>() else {
        return Err(Rejection::MalformedRule(param.kind()));
    };
    if !param.contains(value) {
        return Err(Rejection::OutOfRangeParameter(param, value));
    }
    Ok(value)
}

fn write_list<T: std::fmt::Display>(
    f: &mut std::fmt::Formatter,
    items: impl Iterator<Item = T>,
) -> std::fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
