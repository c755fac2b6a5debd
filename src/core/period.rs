//! Month-scoped period keys.
//!
//! Every expense and limit belongs to a calendar month. Externally a month is the
//! string `"YYYY-MM"`; internally it is the first day of that month, which is also
//! what the database stores.

use crate::errors::{Error, Result};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Separator between the year and month parts of a period string.
pub const PERIOD_SEPARATOR: char = '-';

/// Years a period may use. Stored dates sort as text, which only matches calendar
/// order while the year has exactly four digits.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 0..=9999;

/// A calendar month, normalized to its first day.
///
/// Ordering and equality follow `(year, month)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeriodKey(NaiveDate);

impl PeriodKey {
    /// Builds a period from a year and a 1-based month.
    ///
    /// Years outside [`SUPPORTED_YEARS`] are rejected with [`Error::InvalidYear`].
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::MonthOutOfRange {
                month: i64::from(month),
            });
        }
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(Error::InvalidYear {
                input: year.to_string(),
            });
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| Error::InvalidYear {
                input: year.to_string(),
            })
    }

    /// Parses a `"YYYY-MM"` string.
    ///
    /// The month may omit its leading zero (`"2024-6"`); the year must fall within
    /// [`SUPPORTED_YEARS`].
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split(PERIOD_SEPARATOR).collect();
        let [year_part, month_part] = parts.as_slice() else {
            return Err(Error::InvalidPeriodFormat {
                input: input.to_string(),
            });
        };

        let year: i32 = year_part.parse().map_err(|_| Error::InvalidYear {
            input: (*year_part).to_string(),
        })?;
        let month: i64 = month_part.parse().map_err(|_| Error::InvalidMonth {
            input: (*month_part).to_string(),
        })?;

        let month = u32::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or(Error::MonthOutOfRange { month })?;

        Self::new(year, month)
    }

    /// The month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    /// The month containing `instant`, evaluated in UTC.
    #[must_use]
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self::from_date(instant.date_naive())
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// First day of the month; the stored representation.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Last day of the month (inclusive upper bound of month-range queries).
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Midnight UTC on the first day of the month.
    #[must_use]
    pub fn start_instant(self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    /// True if `date` falls within this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    /// The following month, or `None` past the last supported year.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0
            .checked_add_months(Months::new(1))
            .filter(|date| SUPPORTED_YEARS.contains(&date.year()))
            .map(Self)
    }

    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.0
            .checked_sub_months(Months::new(1))
            .filter(|date| SUPPORTED_YEARS.contains(&date.year()))
            .map(Self)
    }
}

/// Renders a stored date as its `"YYYY-MM"` period string.
#[must_use]
pub fn format_period(date: NaiveDate) -> String {
    PeriodKey::from_date(date).to_string()
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{PERIOD_SEPARATOR}{:02}",
            self.year(),
            self.month()
        )
    }
}

impl FromStr for PeriodKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_normalizes_to_first_day() {
        let period = PeriodKey::parse("2024-06").unwrap();
        assert_eq!(period.year(), 2024);
        assert_eq!(period.month(), 6);
        assert_eq!(
            period.first_day(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert_eq!(period.start_instant().to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_accepts_unpadded_month() {
        let period: PeriodKey = "2024-6".parse().unwrap();
        assert_eq!(period.to_string(), "2024-06");
    }

    #[test]
    fn test_round_trip_all_supported_months() {
        for year in 1..=9999 {
            for month in 1..=12 {
                let period = PeriodKey::new(year, month).unwrap();
                let rendered = format_period(period.first_day());
                assert_eq!(PeriodKey::parse(&rendered).unwrap(), period, "{rendered}");
            }
        }
    }

    #[test]
    fn test_format_pads_small_years() {
        let period = PeriodKey::new(7, 3).unwrap();
        assert_eq!(period.to_string(), "0007-03");
    }

    #[test]
    fn test_wrong_number_of_parts() {
        for input in ["", "2024", "202406", "2024-06-01", "2024/06", "-2024-06", "2024--06"] {
            let err = PeriodKey::parse(input).unwrap_err();
            assert!(
                matches!(err, Error::InvalidPeriodFormat { .. }),
                "{input}: {err:?}"
            );
        }
    }

    #[test]
    fn test_non_numeric_parts() {
        assert!(matches!(
            PeriodKey::parse("abcd-06").unwrap_err(),
            Error::InvalidYear { input } if input == "abcd"
        ));
        assert!(matches!(
            PeriodKey::parse("-06").unwrap_err(),
            Error::InvalidYear { .. }
        ));
        assert!(matches!(
            PeriodKey::parse("2024-jun").unwrap_err(),
            Error::InvalidMonth { input } if input == "jun"
        ));
        assert!(matches!(
            PeriodKey::parse("2024- 6").unwrap_err(),
            Error::InvalidMonth { .. }
        ));
    }

    #[test]
    fn test_month_out_of_range() {
        for (input, expected) in [("2024-0", 0), ("2024-13", 13), ("2024-99", 99)] {
            let err = PeriodKey::parse(input).unwrap_err();
            assert!(
                matches!(err, Error::MonthOutOfRange { month } if month == expected),
                "{input}: {err:?}"
            );
        }
        assert!(matches!(
            PeriodKey::new(2024, 0).unwrap_err(),
            Error::MonthOutOfRange { month: 0 }
        ));
    }

    #[test]
    fn test_unrepresentable_year() {
        assert!(matches!(
            PeriodKey::parse("999999999-01").unwrap_err(),
            Error::InvalidYear { .. }
        ));
    }

    #[test]
    fn test_years_limited_to_four_digits() {
        assert!(matches!(
            PeriodKey::parse("10000-01").unwrap_err(),
            Error::InvalidYear { input } if input == "10000"
        ));
        assert!(matches!(
            PeriodKey::new(-1, 6).unwrap_err(),
            Error::InvalidYear { .. }
        ));
        assert_eq!(PeriodKey::parse("0000-01").unwrap().to_string(), "0000-01");

        let last = PeriodKey::parse("9999-12").unwrap();
        assert_eq!(last.next(), None);
        assert_eq!(PeriodKey::parse("0000-01").unwrap().previous(), None);
    }

    #[test]
    fn test_ordering_is_year_then_month() {
        let dec_2023 = PeriodKey::parse("2023-12").unwrap();
        let jan_2024 = PeriodKey::parse("2024-01").unwrap();
        let feb_2024 = PeriodKey::parse("2024-02").unwrap();
        assert!(dec_2023 < jan_2024);
        assert!(jan_2024 < feb_2024);
        assert_eq!(jan_2024, PeriodKey::parse("2024-1").unwrap());
    }

    #[test]
    fn test_month_bounds() {
        let feb_leap = PeriodKey::parse("2024-02").unwrap();
        assert_eq!(
            feb_leap.last_day(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        let december = PeriodKey::parse("2023-12").unwrap();
        assert_eq!(
            december.last_day(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
        assert!(december.contains(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
        assert!(!december.contains(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
    }

    #[test]
    fn test_from_date_and_neighbours() {
        let mid_month = NaiveDate::from_ymd_opt(2024, 12, 17).unwrap();
        let period = PeriodKey::from_date(mid_month);
        assert_eq!(period.to_string(), "2024-12");
        assert_eq!(period.next().unwrap().to_string(), "2025-01");
        assert_eq!(period.previous().unwrap().to_string(), "2024-11");
        assert_eq!(format_period(mid_month), "2024-12");
    }

    #[test]
    fn test_serde_uses_period_string() {
        let period = PeriodKey::parse("2024-06").unwrap();
        assert_eq!(serde_json::to_string(&period).unwrap(), "\"2024-06\"");
        let back: PeriodKey = serde_json::from_str("\"2024-6\"").unwrap();
        assert_eq!(back, period);
        assert!(serde_json::from_str::<PeriodKey>("\"2024-13\"").is_err());
    }
}
