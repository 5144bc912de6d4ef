//! Reporting period representation
//!
//! Periods label the buckets produced by the cash-flow aggregator and key the
//! per-month budget files. Supports monthly, ISO-weekly, bi-weekly and custom
//! date ranges.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bucket size used by the cash-flow aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// ISO weeks, Monday through Sunday
    Weekly,
    /// Fourteen-day windows anchored at the start of the requested range
    BiWeekly,
    /// Calendar months
    #[default]
    Monthly,
}

impl Frequency {
    /// Parse a frequency name
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "biweekly" | "bi-weekly" | "fortnightly" => Ok(Self::BiWeekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            _ => Err(PeriodParseError::InvalidFrequency(s.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::BiWeekly => write!(f, "biweekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// Represents a reporting period
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum BudgetPeriod {
    /// Monthly period (e.g., "2025-01")
    Monthly { year: i32, month: u32 },

    /// ISO week period (e.g., "2025-W03")
    Weekly { year: i32, week: u32 },

    /// Bi-weekly period (identified by start date)
    BiWeekly { start_date: NaiveDate },

    /// Custom date range
    Custom { start: NaiveDate, end: NaiveDate },
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

impl BudgetPeriod {
    /// Create a monthly period
    pub fn monthly(year: i32, month: u32) -> Self {
        Self::Monthly { year, month }
    }

    /// Create a weekly period (ISO week)
    pub fn weekly(year: i32, week: u32) -> Self {
        Self::Weekly { year, week }
    }

    /// Create a bi-weekly period starting on the given date
    pub fn bi_weekly(start_date: NaiveDate) -> Self {
        Self::BiWeekly { start_date }
    }

    /// Create a custom period
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self::Custom { start, end }
    }

    /// The calendar month containing a date
    pub fn month_of(date: NaiveDate) -> Self {
        Self::Monthly {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Get the current monthly period
    pub fn current_month() -> Self {
        Self::month_of(chrono::Local::now().date_naive())
    }

    /// The period of the given frequency containing `date`.
    ///
    /// Bi-weekly windows are laid out every fourteen days from `anchor`.
    pub fn containing(date: NaiveDate, frequency: Frequency, anchor: NaiveDate) -> Self {
        match frequency {
            Frequency::Monthly => Self::month_of(date),
            Frequency::Weekly => {
                let iso = date.iso_week();
                Self::Weekly {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            Frequency::BiWeekly => {
                let offset = (date - anchor).num_days().div_euclid(14);
                Self::BiWeekly {
                    start_date: anchor + Duration::days(offset * 14),
                }
            }
        }
    }

    /// Get the start date of this period
    pub fn start_date(&self) -> NaiveDate {
        match self {
            Self::Monthly { year, month } => first_of_month(*year, *month),
            Self::Weekly { year, week } => NaiveDate::from_isoywd_opt(*year, *week, Weekday::Mon)
                .unwrap_or_else(|| first_of_month(*year, 1)),
            Self::BiWeekly { start_date } => *start_date,
            Self::Custom { start, .. } => *start,
        }
    }

    /// Get the end date of this period (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        match self {
            Self::Monthly { .. } => self.next().start_date() - Duration::days(1),
            Self::Weekly { .. } => self.start_date() + Duration::days(6),
            Self::BiWeekly { start_date } => *start_date + Duration::days(13),
            Self::Custom { end, .. } => *end,
        }
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Get the next period
    pub fn next(&self) -> Self {
        match self {
            Self::Monthly { year, month } => {
                if *month == 12 {
                    Self::Monthly {
                        year: *year + 1,
                        month: 1,
                    }
                } else {
                    Self::Monthly {
                        year: *year,
                        month: *month + 1,
                    }
                }
            }
            Self::Weekly { .. } => {
                let iso = (self.start_date() + Duration::days(7)).iso_week();
                Self::Weekly {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            Self::BiWeekly { start_date } => Self::BiWeekly {
                start_date: *start_date + Duration::days(14),
            },
            Self::Custom { start, end } => {
                let duration = *end - *start;
                Self::Custom {
                    start: *end + Duration::days(1),
                    end: *end + duration + Duration::days(1),
                }
            }
        }
    }

    /// Get the previous period
    pub fn prev(&self) -> Self {
        match self {
            Self::Monthly { year, month } => {
                if *month == 1 {
                    Self::Monthly {
                        year: *year - 1,
                        month: 12,
                    }
                } else {
                    Self::Monthly {
                        year: *year,
                        month: *month - 1,
                    }
                }
            }
            Self::Weekly { .. } => {
                let iso = (self.start_date() - Duration::days(7)).iso_week();
                Self::Weekly {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            Self::BiWeekly { start_date } => Self::BiWeekly {
                start_date: *start_date - Duration::days(14),
            },
            Self::Custom { start, end } => {
                let duration = *end - *start;
                Self::Custom {
                    start: *start - duration - Duration::days(1),
                    end: *start - Duration::days(1),
                }
            }
        }
    }

    /// Move forward `n` periods
    pub fn advance(&self, n: u32) -> Self {
        (0..n).fold(self.clone(), |period, _| period.next())
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Monthly: "2025-01"
    /// - Weekly: "2025-W03"
    /// - Custom: "2025-01-01..2025-01-15"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        if let Some((year, week)) = s.split_once("-W") {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let week: u32 = week.parse().map_err(|_| invalid())?;
            if !(1..=53).contains(&week) {
                return Err(invalid());
            }
            return Ok(Self::Weekly { year, week });
        }

        if let Some((start, end)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").map_err(|_| invalid())?;
            let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").map_err(|_| invalid())?;
            if end < start {
                return Err(invalid());
            }
            return Ok(Self::Custom { start, end });
        }

        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() == 2 {
            let year: i32 = parts[0].parse().map_err(|_| invalid())?;
            let month: u32 = parts[1].parse().map_err(|_| invalid())?;

            if !(1..=12).contains(&month) {
                return Err(PeriodParseError::InvalidMonth(month));
            }

            return Ok(Self::Monthly { year, month });
        }

        Err(invalid())
    }

    /// Human-friendly label ("January 2025" for months)
    pub fn friendly(&self) -> String {
        match self {
            Self::Monthly { .. } => self.start_date().format("%B %Y").to_string(),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Monthly { year, month } => format!("{:04}-{:02}", year, month),
            Self::Weekly { year, week } => format!("{:04}-W{:02}", year, week),
            Self::BiWeekly { start_date } => format!(
                "{}..{}",
                start_date.format("%Y-%m-%d"),
                self.end_date().format("%Y-%m-%d")
            ),
            Self::Custom { start, end } => {
                format!("{}..{}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
            }
        };
        f.pad(&label)
    }
}

impl Ord for BudgetPeriod {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start_date().cmp(&other.start_date())
    }
}

impl PartialOrd for BudgetPeriod {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidFrequency(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::InvalidFrequency(s) => write!(f, "Invalid frequency: {}", s),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_period() {
        let period = BudgetPeriod::monthly(2024, 2);
        assert_eq!(period.start_date(), date(2024, 2, 1));
        assert_eq!(period.end_date(), date(2024, 2, 29));
        assert_eq!(BudgetPeriod::monthly(2024, 12).end_date(), date(2024, 12, 31));
    }

    #[test]
    fn test_monthly_navigation() {
        let dec = BudgetPeriod::monthly(2024, 12);
        assert_eq!(dec.next(), BudgetPeriod::monthly(2025, 1));
        assert_eq!(BudgetPeriod::monthly(2025, 1).prev(), dec);
        assert_eq!(dec.advance(6), BudgetPeriod::monthly(2025, 6));
    }

    #[test]
    fn test_weekly_navigation_crosses_year() {
        // 2020 has 53 ISO weeks
        let last = BudgetPeriod::weekly(2020, 53);
        assert_eq!(last.next(), BudgetPeriod::weekly(2021, 1));
        assert_eq!(BudgetPeriod::weekly(2021, 1).prev(), last);
    }

    #[test]
    fn test_containing() {
        let anchor = date(2025, 1, 1);
        assert_eq!(
            BudgetPeriod::containing(date(2025, 3, 15), Frequency::Monthly, anchor),
            BudgetPeriod::monthly(2025, 3)
        );
        assert_eq!(
            BudgetPeriod::containing(date(2025, 1, 20), Frequency::BiWeekly, anchor),
            BudgetPeriod::bi_weekly(date(2025, 1, 15))
        );
        let week = BudgetPeriod::containing(date(2025, 1, 8), Frequency::Weekly, anchor);
        assert!(week.contains(date(2025, 1, 8)));
        assert_eq!(week.start_date().weekday(), Weekday::Mon);
    }

    #[test]
    fn test_contains() {
        let jan = BudgetPeriod::monthly(2025, 1);
        assert!(jan.contains(date(2025, 1, 31)));
        assert!(!jan.contains(date(2025, 2, 1)));
    }

    #[test]
    fn test_parse() {
        assert_eq!(BudgetPeriod::parse("2025-01").unwrap(), BudgetPeriod::monthly(2025, 1));
        assert_eq!(BudgetPeriod::parse("2025-W03").unwrap(), BudgetPeriod::weekly(2025, 3));
        assert_eq!(
            BudgetPeriod::parse("2025-01-01..2025-01-15").unwrap(),
            BudgetPeriod::custom(date(2025, 1, 1), date(2025, 1, 15))
        );
        assert_eq!(
            BudgetPeriod::parse("2025-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(BudgetPeriod::parse("January").is_err());
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!(Frequency::parse("Monthly").unwrap(), Frequency::Monthly);
        assert_eq!(Frequency::parse("bi-weekly").unwrap(), Frequency::BiWeekly);
        assert!(Frequency::parse("hourly").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(BudgetPeriod::monthly(2025, 1).to_string(), "2025-01");
        assert_eq!(BudgetPeriod::weekly(2025, 3).to_string(), "2025-W03");
        assert_eq!(BudgetPeriod::monthly(2025, 1).friendly(), "January 2025");
    }
}
