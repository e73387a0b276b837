//! Week bucketing.
//!
//! Weeks are 7-day windows counted from January 1 of the record's calendar
//! year, so week 1 is always Jan 1-7 regardless of weekday. Days 365 and 366
//! fall into week 53. These are not ISO weeks.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::BoardError;

const DAYS_PER_WEEK: u32 = 7;
const MAX_WEEK: u32 = 53;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct WeekKey {
    year: i32,
    week: u32,
}

impl WeekKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            week: date.ordinal().div_ceil(DAYS_PER_WEEK),
        }
    }

    /// Parses a canonical `YYYY-W##` key.
    pub fn parse(value: &str) -> Result<Self, BoardError> {
        let invalid = || BoardError::InvalidWeekKey {
            value: value.to_string(),
        };

        let (year, week) = value.split_once("-W").ok_or_else(invalid)?;
        if year.len() != 4 || week.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(week.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let week: u32 = week.parse().map_err(|_| invalid())?;
        if !(1..=MAX_WEEK).contains(&week) {
            return Err(invalid());
        }

        Ok(Self { year, week })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    /// Human label used by the week selector, e.g. `Week 01 - 2024`.
    pub fn label(&self) -> String {
        format!("Week {:02} - {}", self.week(), self.year())
    }

    /// First calendar day of the bucket.
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(self.year, (self.week - 1) * DAYS_PER_WEEK + 1)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

impl From<WeekKey> for String {
    fn from(key: WeekKey) -> Self {
        key.to_string()
    }
}

/// Parses a strict `YYYY-MM-DD` completion date.
pub fn parse_completed_date(value: &str) -> Result<NaiveDate, BoardError> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !well_formed {
        return Err(BoardError::InvalidDate {
            value: value.to_string(),
        });
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| BoardError::InvalidDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_for(date: &str) -> String {
        WeekKey::from_date(parse_completed_date(date).unwrap()).to_string()
    }

    #[test]
    fn first_seven_days_share_week_one() {
        assert_eq!(key_for("2024-01-01"), "2024-W01");
        assert_eq!(key_for("2024-01-07"), "2024-W01");
        assert_eq!(key_for("2024-01-08"), "2024-W02");
        assert_eq!(key_for("2024-01-14"), "2024-W02");
        assert_eq!(key_for("2024-01-15"), "2024-W03");
    }

    #[test]
    fn year_end_lands_in_week_fifty_three() {
        assert_eq!(key_for("2023-12-30"), "2023-W52");
        assert_eq!(key_for("2023-12-31"), "2023-W53");
        // Leap year: Dec 30 is day 365, Dec 31 is day 366.
        assert_eq!(key_for("2024-12-30"), "2024-W53");
        assert_eq!(key_for("2024-12-31"), "2024-W53");
    }

    #[test]
    fn buckets_ignore_weekday() {
        // 2023-01-01 is a Sunday; ISO would put it in 2022-W52.
        assert_eq!(key_for("2023-01-01"), "2023-W01");
    }

    #[test]
    fn rejects_malformed_dates() {
        for value in ["", "2024-1-01", "2024/01/01", "2024-02-30", "01-01-2024", "2024-01-01T00:00"] {
            assert!(
                matches!(parse_completed_date(value), Err(BoardError::InvalidDate { .. })),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn parses_canonical_keys() {
        let key = WeekKey::parse("2024-W02").unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.week(), 2);
        assert_eq!(key.to_string(), "2024-W02");
        assert_eq!(key.label(), "Week 02 - 2024");

        for value in ["2024-W00", "2024-W54", "2024-W1", "24-W01", "2024W01", "2024-Wxx"] {
            assert!(WeekKey::parse(value).is_err(), "{value} should be rejected");
        }
    }

    #[test]
    fn start_date_is_first_day_of_bucket() {
        let key = WeekKey::parse("2024-W02").unwrap();
        assert_eq!(key.start_date(), NaiveDate::from_ymd_opt(2024, 1, 8));
        let last = WeekKey::parse("2023-W53").unwrap();
        assert_eq!(last.start_date(), NaiveDate::from_ymd_opt(2023, 12, 31));
    }

    #[test]
    fn keys_order_by_year_then_week() {
        let mut keys = vec![
            WeekKey::parse("2024-W10").unwrap(),
            WeekKey::parse("2023-W53").unwrap(),
            WeekKey::parse("2024-W02").unwrap(),
        ];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["2023-W53", "2024-W02", "2024-W10"]);
    }
}
