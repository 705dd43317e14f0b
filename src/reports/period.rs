//! Date, month and range parameters of the report endpoints

use crate::core::error::{OrderDeskError, OrderDeskResult, ValidationError};
use chrono::{Datelike, Duration, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the server's local time zone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> OrderDeskResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            value: raw.to_string(),
            expected: "YYYY-MM-DD".to_string(),
        }
        .into()
    })
}

/// Parse an optional date, defaulting to today
pub fn date_or_today(raw: Option<&str>) -> OrderDeskResult<NaiveDate> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => parse_date(raw),
        _ => Ok(today()),
    }
}

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    /// Parse a `YYYY-MM` month
    pub fn parse(raw: &str) -> OrderDeskResult<Self> {
        let invalid = || -> OrderDeskError {
            ValidationError::InvalidDate {
                value: raw.to_string(),
                expected: "YYYY-MM".to_string(),
            }
            .into()
        };

        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Inclusive date range; either bound may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn parse(from: Option<&str>, to: Option<&str>) -> OrderDeskResult<Self> {
        let from = from.filter(|s| !s.trim().is_empty()).map(parse_date).transpose()?;
        let to = to.filter(|s| !s.trim().is_empty()).map(parse_date).transpose()?;
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Cutoff date for the overdue report: `today - days`
///
/// Saturates at `NaiveDate::MIN`, which no order can be dated on or before
/// in practice, so absurd ages yield an empty report.
pub fn overdue_cutoff(today: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|age| today.checked_sub_signed(age))
        .unwrap_or(NaiveDate::MIN)
}

/// Parse the `days` parameter of the overdue report
pub fn parse_days(raw: Option<&str>, default: i64) -> OrderDeskResult<i64> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|days| *days >= 0)
        .ok_or_else(|| {
            ValidationError::FieldError {
                field: "days".to_string(),
                message: format!("must be a non-negative integer (got: {})", raw),
            }
            .into()
        })
}
