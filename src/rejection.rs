/// The reasons the recurrence engine can refuse to compute a date.
///
/// Every rejection is something the caller can fix by correcting its input.
/// The engine returns these and never logs them; turning one into a message
/// for a human is up to the caller (its `Display` impl is a reasonable
/// default).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Rejection {
    /// The anchor date is not a valid `YYYYMMDD` calendar date.
    InvalidAnchorDate(String),
    /// The rule string is empty.
    EmptyRule,
    /// The rule has the wrong shape for its kind. For example, the wrong
    /// number of tokens, an empty list item or a non-integer.
    MalformedRule(RuleKind),
    /// A numeric parameter parsed fine but isn't in its allowed range.
    OutOfRangeParameter(Parameter, i64),
    /// The first token of the rule doesn't name any known rule kind.
    UnsupportedRuleFormat,
    /// A monthly rule whose days and months never coincide on any date,
    /// e.g., `m 31 2`.
    NeverMatches,
    /// The next occurrence would be after `99991231`.
    CalendarOverflow,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Rejection::InvalidAnchorDate(ref anchor) => write!(
                f,
                "invalid date `{anchor}`, expected a calendar date \
                 written as `YYYYMMDD`",
            ),
            Rejection::EmptyRule => write!(f, "recurrence rule is empty"),
            Rejection::MalformedRule(kind) => write!(
                f,
                "malformed `{prefix}` rule, expected `{syntax}`",
                prefix = kind.prefix(),
                syntax = kind.syntax(),
            ),
            Rejection::OutOfRangeParameter(param, value) => write!(
                f,
                "{param} `{value}` is out of range, expected {range}",
                range = param.range(),
            ),
            Rejection::UnsupportedRuleFormat => write!(
                f,
                "unsupported recurrence rule, expected a rule \
                 starting with `d`, `y`, `w` or `m`",
            ),
            Rejection::NeverMatches => write!(
                f,
                "rule never matches, none of its days \
                 exist in any of its months",
            ),
            Rejection::CalendarOverflow => write!(
                f,
                "next occurrence is after the maximum supported date 99991231",
            ),
        }
    }
}

impl std::error::Error for Rejection {}

/// The four kinds of recurrence rule.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RuleKind {
    EveryNDays,
    Yearly,
    Weekly,
    MonthlyOnDays,
}

impl RuleKind {
    /// The token that starts a rule of this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            RuleKind::EveryNDays => "d",
            RuleKind::Yearly => "y",
            RuleKind::Weekly => "w",
            RuleKind::MonthlyOnDays => "m",
        }
    }

    /// A short description of the accepted syntax.
    pub fn syntax(self) -> &'static str {
        match self {
            RuleKind::EveryNDays => "d <days>",
            RuleKind::Yearly => "y",
            RuleKind::Weekly => "w <weekday>[,<weekday>...]",
            RuleKind::MonthlyOnDays => {
                "m <day>[,<day>...] [<month>[,<month>...]]"
            }
        }
    }
}

/// A numeric parameter of a rule that has a bounded range.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Parameter {
    /// The `n` in `d <n>`.
    DayInterval,
    /// An item in `w <weekdays>`.
    Weekday,
    /// An item in the day list of `m <days> [<months>]`.
    MonthDay,
    /// An item in the month list of `m <days> [<months>]`.
    Month,
}

impl Parameter {
    /// The rule kind this parameter belongs to.
    pub fn kind(self) -> RuleKind {
        match self {
            Parameter::DayInterval => RuleKind::EveryNDays,
            Parameter::Weekday => RuleKind::Weekly,
            Parameter::MonthDay | Parameter::Month => RuleKind::MonthlyOnDays,
        }
    }

    /// Returns true when `value` is allowed for this parameter.
    pub fn contains(self, value: i64) -> bool {
        match self {
            Parameter::DayInterval => (1..=400).contains(&value),
            Parameter::Weekday => (1..=7).contains(&value),
            Parameter::MonthDay => {
                value != 0 && (-31..=31).contains(&value)
            }
            Parameter::Month => (1..=12).contains(&value),
        }
    }

    fn range(self) -> &'static str {
        match self {
            Parameter::DayInterval => "an integer in `1..=400`",
            Parameter::Weekday => {
                "an integer in `1..=7` (1 is Monday, 7 is Sunday)"
            }
            Parameter::MonthDay => {
                "an integer in `1..=31` or `-31..=-1` (-1 is the last day)"
            }
            Parameter::Month => "an integer in `1..=12`",
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match *self {
            Parameter::DayInterval => "day interval",
            Parameter::Weekday => "weekday",
            Parameter::MonthDay => "day of month",
            Parameter::Month => "month",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_ranges() {
        assert!(!Parameter::DayInterval.contains(0));
        assert!(Parameter::DayInterval.contains(1));
        assert!(Parameter::DayInterval.contains(400));
        assert!(!Parameter::DayInterval.contains(401));

        assert!(!Parameter::Weekday.contains(0));
        assert!(Parameter::Weekday.contains(7));
        assert!(!Parameter::Weekday.contains(8));

        assert!(!Parameter::MonthDay.contains(0));
        assert!(Parameter::MonthDay.contains(-31));
        assert!(Parameter::MonthDay.contains(31));
        assert!(!Parameter::MonthDay.contains(-32));
        assert!(!Parameter::MonthDay.contains(32));

        assert!(!Parameter::Month.contains(0));
        assert!(Parameter::Month.contains(12));
        assert!(!Parameter::Month.contains(13));
    }

    #[test]
    fn parameter_kinds() {
        assert_eq!(Parameter::DayInterval.kind(), RuleKind::EveryNDays);
        assert_eq!(Parameter::Weekday.kind(), RuleKind::Weekly);
        assert_eq!(Parameter::MonthDay.kind(), RuleKind::MonthlyOnDays);
        assert_eq!(Parameter::Month.kind(), RuleKind::MonthlyOnDays);
    }

    #[test]
    fn messages() {
        insta::assert_snapshot!(
            Rejection::MalformedRule(RuleKind::MonthlyOnDays),
            @"malformed `m` rule, expected `m <day>[,<day>...] [<month>[,<month>...]]`",
        );
        insta::assert_snapshot!(
            Rejection::OutOfRangeParameter(Parameter::DayInterval, 401),
            @"day interval `401` is out of range, expected an integer in `1..=400`",
        );
        insta::assert_snapshot!(
            Rejection::InvalidAnchorDate("2024-01-01".to_string()),
            @"invalid date `2024-01-01`, expected a calendar date written as `YYYYMMDD`",
        );
    }
}
