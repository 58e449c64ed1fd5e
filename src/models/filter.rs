//! Date filter windows for the charts view
//!
//! A filter is evaluated against "today" supplied by the caller, never against
//! the system clock directly, so results are reproducible.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Named date-range predicate applied before aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFilter {
    /// Only expenses dated today
    Today,
    /// Expenses dated on or after today minus seven days
    LastSevenDays,
    /// Expenses in the current calendar month of the current year
    CurrentMonth,
    /// No filtering
    #[default]
    All,
}

impl DateFilter {
    /// All filters in the order the charts view offers them
    pub fn all() -> &'static [Self] {
        &[Self::Today, Self::LastSevenDays, Self::CurrentMonth, Self::All]
    }

    /// Short label for buttons and flags
    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::LastSevenDays => "week",
            Self::CurrentMonth => "month",
            Self::All => "all",
        }
    }

    /// Earliest date admitted by this filter, if bounded below
    pub fn start_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Today => Some(today),
            Self::LastSevenDays => Some(today - Duration::days(7)),
            Self::CurrentMonth => today.with_day(1),
            Self::All => None,
        }
    }

    /// Check whether `date` falls inside the window anchored at `today`
    ///
    /// `LastSevenDays` compares calendar dates and has no upper bound.
    /// `CurrentMonth` requires both month and year to match.
    pub fn matches(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::Today => date == today,
            Self::LastSevenDays => date >= today - Duration::days(7),
            Self::CurrentMonth => date.year() == today.year() && date.month() == today.month(),
            Self::All => true,
        }
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Today => "Today",
            Self::LastSevenDays => "Last 7 days",
            Self::CurrentMonth => "This month",
            Self::All => "All time",
        };
        write!(f, "{}", text)
    }
}

impl FromStr for DateFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" | "hoy" => Ok(Self::Today),
            "week" | "7d" | "last-seven-days" | "semana" => Ok(Self::LastSevenDays),
            "month" | "current-month" | "mes" => Ok(Self::CurrentMonth),
            "all" | "todo" => Ok(Self::All),
            other => Err(ValidationError::UnknownFilter(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_exact_match() {
        let today = date(2024, 6, 10);
        assert!(DateFilter::Today.matches(today, today));
        assert!(!DateFilter::Today.matches(date(2024, 6, 9), today));
    }

    #[test]
    fn test_last_seven_days_inclusive_boundary() {
        let today = date(2024, 6, 10);
        assert!(DateFilter::LastSevenDays.matches(date(2024, 6, 3), today));
        assert!(!DateFilter::LastSevenDays.matches(date(2024, 6, 2), today));
        assert!(DateFilter::LastSevenDays.matches(date(2024, 6, 12), today));
    }

    #[test]
    fn test_current_month_checks_year() {
        let today = date(2024, 6, 10);
        assert!(DateFilter::CurrentMonth.matches(date(2024, 6, 1), today));
        assert!(DateFilter::CurrentMonth.matches(date(2024, 6, 30), today));
        assert!(!DateFilter::CurrentMonth.matches(date(2023, 6, 15), today));
        assert!(!DateFilter::CurrentMonth.matches(date(2024, 5, 31), today));
    }

    #[test]
    fn test_all_matches_everything() {
        let today = date(2024, 6, 10);
        assert!(DateFilter::All.matches(date(1999, 1, 1), today));
    }

    #[test]
    fn test_start_date() {
        let today = date(2024, 6, 10);
        assert_eq!(DateFilter::LastSevenDays.start_date(today), Some(date(2024, 6, 3)));
        assert_eq!(DateFilter::CurrentMonth.start_date(today), Some(date(2024, 6, 1)));
        assert_eq!(DateFilter::All.start_date(today), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("week".parse::<DateFilter>().unwrap(), DateFilter::LastSevenDays);
        assert_eq!("Mes".parse::<DateFilter>().unwrap(), DateFilter::CurrentMonth);
        assert_eq!("ALL".parse::<DateFilter>().unwrap(), DateFilter::All);
        assert!(matches!(
            "fortnight".parse::<DateFilter>(),
            Err(ValidationError::UnknownFilter(_))
        ));
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&DateFilter::LastSevenDays).unwrap();
        assert_eq!(json, "\"last-seven-days\"");
        let back: DateFilter = serde_json::from_str("\"current-month\"").unwrap();
        assert_eq!(back, DateFilter::CurrentMonth);
    }
}
