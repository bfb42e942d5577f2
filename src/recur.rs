/*!
The recurrence engine.

Given a rule and an anchor date, the occurrences of the rule are produced by
stepping forward from the anchor: `n` days at a time for `d`, one year at a
time for `y` and one day at a time (checking each day) for `w` and `m`. The
anchor is never an occurrence itself.

Stepping a day at a time is deliberate for `w` and `m`. Month lengths vary and
weekday sets are arbitrary, and walking the calendar gets both right without
any calendar logic beyond "what day is it."
*/

use crate::{date::Date, rejection::Rejection, rule::Rule};

/// Returns the first occurrence of `rule` after `anchor` that is strictly
/// after `now`.
///
/// The anchor and rule are validated before any stepping begins. The result
/// is always strictly greater than `now`, even when `anchor` is already
/// after `now`. (In that case, the result is the first occurrence after the
/// anchor.)
pub fn next_occurrence(
    now: Date,
    anchor: &str,
    rule: &str,
) -> Result<Date, Rejection> {
    let (anchor, rule) = parse_task(anchor, rule)?;
    let next = rule.next_after(anchor, now)?;
    log::debug!(
        "next occurrence of `{rule}` from {anchor} after {now}: {next}",
    );
    Ok(next)
}

/// Parses a task's anchor date and rule, in that order.
///
/// An anchor that isn't a `YYYYMMDD` date is rejected before the rule is
/// even looked at.
pub fn parse_task(
    anchor: &str,
    rule: &str,
) -> Result<(Date, Rule), Rejection> {
    let Ok(anchor) = anchor.parse::<Date>() else {
        return Err(Rejection::InvalidAnchorDate(anchor.to_string()));
    };
    let rule = rule.parse::<Rule>()?;
    Ok((anchor, rule))
}

impl Rule {
    /// Returns an iterator over every occurrence of this rule after
    /// `anchor`, in ascending order.
    ///
    /// The iterator ends once the next occurrence would be past the largest
    /// supported date.
    pub fn occurrences(&self, anchor: Date) -> Occurrences<'_> {
        Occurrences { rule: self, anchor, cur: Some(anchor), steps: 0 }
    }

    /// Returns the first occurrence after `anchor` that is strictly after
    /// `now`.
    pub fn next_after(
        &self,
        anchor: Date,
        now: Date,
    ) -> Result<Date, Rejection> {
        self.occurrences(anchor)
            .find(|&date| date > now)
            .ok_or(Rejection::CalendarOverflow)
    }

    /// Returns true when the given date is an occurrence of a day-matching
    /// rule (`w` or `m`).
    ///
    /// Rules that step by a fixed amount (`d` and `y`) depend on the anchor,
    /// so they never match a date in isolation.
    fn matches(&self, date: Date) -> bool {
        let date = date.get();
        match *self {
            Rule::EveryNDays(_) | Rule::Yearly => false,
            Rule::Weekly(ref weekdays) => weekdays.contains(date.weekday()),
            Rule::MonthlyOnDays(ref md) => {
                if !md.months().is_empty()
                    && !md.months().contains(&date.month())
                {
                    return false;
                }
                let last = date.days_in_month();
                md.days().iter().any(|&d| {
                    if d > 0 {
                        date.day() == d
                    } else {
                        date.day() == last + d + 1
                    }
                })
            }
        }
    }
}

/// An iterator over the occurrences of a rule after an anchor date.
///
/// This is created by `Rule::occurrences`.
#[derive(Clone, Debug)]
pub struct Occurrences<'r> {
    rule: &'r Rule,
    anchor: Date,
    /// The most recent occurrence (or the anchor, before the first step).
    /// `None` once the end of the calendar has been reached.
    cur: Option<Date>,
    /// The number of occurrences produced so far.
    steps: i64,
}

impl<'r> Iterator for Occurrences<'r> {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        let cur = self.cur?;
        let next = match *self.rule {
            Rule::EveryNDays(interval) => {
                cur.add_days(i64::from(interval.get()))
            }
            // Always relative to the anchor so that a February 29 anchor
            // comes back to February 29 in leap years.
            Rule::Yearly => self.anchor.add_years(self.steps + 1),
            Rule::Weekly(_) | Rule::MonthlyOnDays(_) => {
                let mut day = cur.tomorrow();
                while let Some(d) = day {
                    if self.rule.matches(d) {
                        break;
                    }
                    day = d.tomorrow();
                }
                day
            }
        };
        self.cur = next;
        self.steps += 1;
        next
    }
}

impl<'r> std::iter::FusedIterator for Occurrences<'r> {}
