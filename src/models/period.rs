//! Reporting periods and inclusive date ranges
//!
//! Reports work on a `DateRange`. Ranges are usually resolved from a
//! `PeriodPreset` against today's date, or parsed from the command line.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

/// Last day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    add_months(month_start(date), 1) - Duration::days(1)
}

/// Add calendar months, clamping the day to the end of the target month
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

fn sub_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

pub(crate) fn year_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.ordinal0() as i64)
}

pub(crate) fn quarter_start(date: NaiveDate) -> NaiveDate {
    sub_months(month_start(date), date.month0() % 3)
}

/// An inclusive range of dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting one that ends before it starts
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodParseError> {
        if end < start {
            return Err(PeriodParseError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            start: month_start(date),
            end: month_end(date),
        }
    }

    /// The calendar year containing `date`
    pub fn year_of(date: NaiveDate) -> Self {
        let start = year_start(date);
        Self {
            start,
            end: add_months(start, 12) - Duration::days(1),
        }
    }

    /// The calendar quarter containing `date`
    pub fn quarter_of(date: NaiveDate) -> Self {
        let start = quarter_start(date);
        Self {
            start,
            end: add_months(start, 3) - Duration::days(1),
        }
    }

    /// A single day
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Whether the two ranges share at least one day
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of days in the range (both ends included)
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn is_full_month(&self) -> bool {
        *self == Self::month_of(self.start)
    }

    pub fn is_full_year(&self) -> bool {
        *self == Self::year_of(self.start)
    }

    pub fn is_full_quarter(&self) -> bool {
        *self == Self::quarter_of(self.start)
    }

    /// The range immediately before this one
    ///
    /// Whole calendar months, quarters and years map to the previous month,
    /// quarter or year. Any other range maps to the same number of days
    /// ending the day before `start`.
    pub fn previous(&self) -> Self {
        let before = self.start - Duration::days(1);
        if self.is_full_month() {
            Self::month_of(before)
        } else if self.is_full_quarter() {
            Self::quarter_of(before)
        } else if self.is_full_year() {
            Self::year_of(before)
        } else {
            Self {
                start: self.start - Duration::days(self.days()),
                end: before,
            }
        }
    }

    /// Parse a range expression
    ///
    /// Accepts `YYYY-MM-DD..YYYY-MM-DD`, `YYYY-MM`, `YYYY-MM-DD` and `YYYY`.
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::Invalid(s.to_string());

        if let Some((start, end)) = s.split_once("..") {
            let start = parse_date(start.trim()).ok_or_else(invalid)?;
            let end = parse_date(end.trim()).ok_or_else(invalid)?;
            return Self::new(start, end);
        }

        if let Some(date) = parse_date(s) {
            return Ok(Self::day(date));
        }

        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d") {
            return Ok(Self::month_of(date));
        }

        if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
            let year: i32 = s.parse().map_err(|_| invalid())?;
            let date = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
            return Ok(Self::year_of(date));
        }

        Err(invalid())
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_full_month() {
            write!(f, "{}", self.start.format("%B %Y"))
        } else if self.is_full_year() {
            write!(f, "{}", self.start.year())
        } else {
            write!(
                f,
                "{} to {}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }
}

/// Named reporting periods relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodPreset {
    #[default]
    ThisMonth,
    LastMonth,
    #[serde(rename = "last-30-days")]
    Last30Days,
    #[serde(rename = "last-90-days")]
    Last90Days,
    ThisQuarter,
    ThisYear,
}

impl PeriodPreset {
    pub const ALL: [PeriodPreset; 6] = [
        Self::ThisMonth,
        Self::LastMonth,
        Self::Last30Days,
        Self::Last90Days,
        Self::ThisQuarter,
        Self::ThisYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThisMonth => "this-month",
            Self::LastMonth => "last-month",
            Self::Last30Days => "last-30-days",
            Self::Last90Days => "last-90-days",
            Self::ThisQuarter => "this-quarter",
            Self::ThisYear => "this-year",
        }
    }

    /// Resolve to a concrete date range
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match self {
            Self::ThisMonth => DateRange::month_of(today),
            Self::LastMonth => DateRange::month_of(month_start(today) - Duration::days(1)),
            Self::Last30Days => DateRange {
                start: today - Duration::days(29),
                end: today,
            },
            Self::Last90Days => DateRange {
                start: today - Duration::days(89),
                end: today,
            },
            Self::ThisQuarter => DateRange::quarter_of(today),
            Self::ThisYear => DateRange::year_of(today),
        }
    }
}

impl fmt::Display for PeriodPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PeriodPreset {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or(PeriodParseError::Invalid(s))
    }
}

/// Resolve a period argument: a preset name or any `DateRange::parse` form
pub fn resolve_period(s: &str, today: NaiveDate) -> Result<DateRange, PeriodParseError> {
    match s.parse::<PeriodPreset>() {
        Ok(preset) => Ok(preset.resolve(today)),
        Err(_) => DateRange::parse(s),
    }
}

/// Errors from parsing periods and date ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    Invalid(String),
    Reversed { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(s) => write!(
                f,
                "Invalid period '{}'. Use a preset (this-month, last-month, last-30-days, \
                 last-90-days, this-quarter, this-year), YYYY-MM, YYYY or \
                 YYYY-MM-DD..YYYY-MM-DD",
                s
            ),
            Self::Reversed { start, end } => {
                write!(f, "Period end {} is before start {}", end, start)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}
