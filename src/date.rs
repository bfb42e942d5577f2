use {
    anyhow::Context,
    bstr::ByteSlice,
    jiff::{ToSpan, civil},
};

use crate::{
    TODAY,
    args::Usage,
    parse::{BytesExt, FromBytes},
};

/// A calendar date as the scheduler writes it: `YYYYMMDD`.
///
/// There is no time of day and no time zone. Only the fixed 8 digit format
/// is accepted when parsing, and it's the only format ever printed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Date {
    date: civil::Date,
}

impl Date {
    pub const ANCHOR_ARG: Usage = Usage::arg(
        "<anchor>",
        "The task's last date, e.g., `20240101`.",
        r#"
The task's last recorded date, written as `YYYYMMDD`, e.g., `20240101`.

Occurrences are found by stepping forward from this date. The anchor itself is
never an occurrence.
"#,
    );

    pub const NOW_FLAG: Usage = Usage::flag(
        "-n/--now <date>",
        "The date that \"next\" is measured against.",
        r#"
The date that "next" is measured against, written as `YYYYMMDD`.

Every date printed is strictly after this date. When this flag isn't given,
today's date is used. Today's date is computed once when nextdate starts from
the system clock and time zone (which may be overridden by the `TZ`
environment variable), or if the `NEXTDATE_NOW` environment variable is set,
that date is used instead.
"#,
    );

    /// Returns today's date.
    ///
    /// This is computed once at startup. See `NOW_FLAG` for details.
    pub fn today() -> Date {
        *TODAY
    }

    /// Returns the underlying Jiff civil date.
    pub fn get(&self) -> civil::Date {
        self.date
    }

    /// Returns the day after this one, or `None` at `99991231`, which is
    /// the largest date Jiff supports.
    pub fn tomorrow(self) -> Option<Date> {
        self.date.tomorrow().ok().map(Date::from)
    }

    /// Adds the given number of days, or returns `None` on passing
    /// `99991231`.
    pub fn add_days(self, days: i64) -> Option<Date> {
        self.date.checked_add(days.days()).ok().map(Date::from)
    }

    /// Adds the given number of years, or returns `None` on passing
    /// `99991231`.
    ///
    /// February 29 lands on March 1 in a year without one. Every other
    /// month and day is kept as is.
    pub fn add_years(self, years: i64) -> Option<Date> {
        let date = self.date.checked_add(years.years()).ok()?;
        // Jiff constrains Feb 29 to Feb 28 in non-leap years. We roll over
        // instead.
        if date.day() != self.date.day() {
            return date.tomorrow().ok().map(Date::from);
        }
        Some(Date::from(date))
    }
}

impl From<civil::Date> for Date {
    fn from(date: civil::Date) -> Date {
        Date { date }
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}",
            self.date.year(),
            self.date.month(),
            self.date.day()
        )
    }
}

impl std::str::FromStr for Date {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Date> {
        s.as_bytes().parse()
    }
}

impl FromBytes for Date {
    type Err = anyhow::Error;

    fn from_bytes(s: &[u8]) -> anyhow::Result<Date> {
        anyhow::ensure!(
            s.len() == 8 && s.iter().all(|b| b.is_ascii_digit()),
            "`{s}` is not a date written as `YYYYMMDD`",
            s = s.as_bstr(),
        );
        let year = digits(&s[0..4]);
        let month = digits(&s[4..6]);
        let day = digits(&s[6..8]);
        // Two digits always fit in an `i8`.
        let date = civil::Date::new(year, month as i8, day as i8)
            .with_context(|| {
                format!("`{s}` is not a valid date", s = s.as_bstr())
            })?;
        Ok(Date::from(date))
    }
}

/// Decodes a short run of ASCII digits. The caller guarantees every byte is
/// a digit and that there are at most 4 of them.
fn digits(bytes: &[u8]) -> i16 {
    bytes.iter().fold(0, |acc, &b| acc * 10 + i16::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn parse_valid() {
        let d: Date = "20240229".parse().unwrap();
        assert_eq!(d.get(), date(2024, 2, 29));
        let d: Date = "00010101".parse().unwrap();
        assert_eq!(d.get(), date(1, 1, 1));
        let d: Date = "99991231".parse().unwrap();
        assert_eq!(d.get(), date(9999, 12, 31));
    }

    #[test]
    fn parse_invalid() {
        insta::assert_snapshot!(
            "20230229".parse::<Date>().unwrap_err(),
            @"`20230229` is not a valid date",
        );
        insta::assert_snapshot!(
            "2024-01-01".parse::<Date>().unwrap_err(),
            @"`2024-01-01` is not a date written as `YYYYMMDD`",
        );
        assert!("2024011".parse::<Date>().is_err());
        assert!("202401011".parse::<Date>().is_err());
        assert!("+2024011".parse::<Date>().is_err());
        assert!(" 2024011".parse::<Date>().is_err());
        assert!("20241301".parse::<Date>().is_err());
        assert!("20240100".parse::<Date>().is_err());
        assert!("".parse::<Date>().is_err());
        assert!("20240431".parse::<Date>().is_err());
    }

    #[test]
    fn display_pads() {
        assert_eq!(Date::from(date(2024, 1, 5)).to_string(), "20240105");
        assert_eq!(Date::from(date(812, 11, 30)).to_string(), "08121130");
    }

    #[test]
    fn add_years_leap_day() {
        let leap = Date::from(date(2024, 2, 29));
        assert_eq!(leap.add_years(1).unwrap().get(), date(2025, 3, 1));
        assert_eq!(leap.add_years(3).unwrap().get(), date(2027, 3, 1));
        assert_eq!(leap.add_years(4).unwrap().get(), date(2028, 2, 29));

        let plain = Date::from(date(2024, 2, 28));
        assert_eq!(plain.add_years(1).unwrap().get(), date(2025, 2, 28));
    }

    #[test]
    fn calendar_bounds() {
        let last = Date::from(date(9999, 12, 31));
        assert_eq!(last.tomorrow(), None);
        assert_eq!(last.add_days(1), None);
        assert_eq!(Date::from(date(9999, 1, 1)).add_years(1), None);
        assert_eq!(
            Date::from(date(9999, 12, 30)).tomorrow().map(|d| d.get()),
            Some(date(9999, 12, 31)),
        );
    }
}
