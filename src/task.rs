// The two places a task scheduler consults the recurrence engine on behalf
// of a task: deciding where a new task lands, and deciding what happens to a
// task once it's marked done.

use crate::{
    date::Date, recur::next_occurrence, rejection::Rejection, rule::Rule,
};

/// What happens to a task when it's marked as done.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Completion {
    /// The task doesn't recur, so it's finished for good.
    Remove,
    /// The task recurs and moves to this date.
    Reschedule(Date),
}

/// Returns the date on which a newly added task should be placed.
///
/// An empty `date` means today. A date in the past moves forward: to its
/// next occurrence after today if the task recurs, or to today if it
/// doesn't. A date today or in the future is kept.
///
/// When `rule` is non-empty, it must be valid even if it wasn't needed to
/// compute the date.
pub fn schedule(
    today: Date,
    date: &str,
    rule: &str,
) -> Result<Date, Rejection> {
    let scheduled = if date.is_empty() {
        today
    } else {
        let Ok(parsed) = date.parse::<Date>() else {
            return Err(Rejection::InvalidAnchorDate(date.to_string()));
        };
        if parsed < today && !rule.is_empty() {
            next_occurrence(today, date, rule)?
        } else if parsed > today {
            parsed
        } else {
            today
        }
    };
    if !rule.is_empty() {
        rule.parse::<Rule>()?;
    }
    Ok(scheduled)
}

/// Returns what happens to a task on `date` with the given `rule` when it's
/// marked done `today`.
///
/// A task without a rule is removed, and its date isn't even looked at.
/// Otherwise the task moves to its next occurrence after today.
pub fn complete(
    today: Date,
    date: &str,
    rule: &str,
) -> Result<Completion, Rejection> {
    if rule.is_empty() {
        return Ok(Completion::Remove);
    }
    next_occurrence(today, date, rule).map(Completion::Reschedule)
}

#[cfg(test)]
mod tests {
    use crate::rejection::{Parameter, RuleKind};

    use super::*;

    fn d(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn schedule_placement() {
        let today = d("20240720");
        // Empty means today.
        assert_eq!(schedule(today, "", ""), Ok(today));
        assert_eq!(schedule(today, "", "d 3"), Ok(today));
        // Today and future dates are kept.
        assert_eq!(schedule(today, "20240720", "d 3"), Ok(today));
        assert_eq!(schedule(today, "20240801", ""), Ok(d("20240801")));
        assert_eq!(schedule(today, "20240801", "w 1"), Ok(d("20240801")));
        // Past one-off tasks move to today.
        assert_eq!(schedule(today, "20240101", ""), Ok(today));
        // Past recurring tasks move to their next occurrence.
        assert_eq!(schedule(today, "20240101", "m -1"), Ok(d("20240731")));
        assert_eq!(schedule(today, "20240718", "d 2"), Ok(d("20240722")));
    }

    #[test]
    fn schedule_rejects() {
        let today = d("20240720");
        assert_eq!(
            schedule(today, "2024-07-20", ""),
            Err(Rejection::InvalidAnchorDate("2024-07-20".to_string())),
        );
        // The rule is validated even when no computation happens.
        assert_eq!(
            schedule(today, "", "d 0"),
            Err(Rejection::OutOfRangeParameter(Parameter::DayInterval, 0)),
        );
        assert_eq!(
            schedule(today, "20250101", "w 1,"),
            Err(Rejection::MalformedRule(RuleKind::Weekly)),
        );
        assert_eq!(
            schedule(today, "20240101", "q"),
            Err(Rejection::UnsupportedRuleFormat),
        );
    }

    #[test]
    fn complete_recurring_and_one_off() {
        let today = d("20240720");
        assert_eq!(complete(today, "20240720", ""), Ok(Completion::Remove));
        // The date of a one-off task is irrelevant.
        assert_eq!(complete(today, "garbage", ""), Ok(Completion::Remove));
        assert_eq!(
            complete(today, "20240720", "d 7"),
            Ok(Completion::Reschedule(d("20240727"))),
        );
        assert_eq!(
            complete(today, "20230720", "y"),
            Ok(Completion::Reschedule(d("20250720"))),
        );
        assert_eq!(
            complete(today, "20240720", "d 500"),
            Err(Rejection::OutOfRangeParameter(Parameter::DayInterval, 500)),
        );
    }
}
