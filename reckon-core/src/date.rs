//! Civil calendar dates for the date-arithmetic mode
//!
//! Design principles:
//! - No external datetime crates (keeps reckon-core minimal)
//! - Gregorian proleptic calendar
//! - Never panics - all operations return Results or handle edge cases
//!
//! Only whole calendar dates are modeled; the calculator has no
//! time-of-day operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Days in each month (non-leap year)
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days from year 0 to 1970-01-01
const UNIX_EPOCH_DAYS: i64 = 719_468;

/// Years this engine accepts; wide enough for any calculator use
const YEAR_MIN: i32 = -9999;
const YEAR_MAX: i32 = 9999;

/// Day counts for YEAR_MIN-01-01 and YEAR_MAX-12-31; checked against
/// days_from_civil in the tests
const DAYS_MIN: i64 = -4_371_587;
const DAYS_MAX: i64 = 2_932_896;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("month {0} out of range 1-12")]
    InvalidMonth(u32),
    #[error("day {0} invalid for {2}-{1:02}")]
    InvalidDay(u32, u32, i32),
    #[error("date parse error: {0}")]
    ParseError(String),
    #[error("date out of supported range")]
    Overflow,
}

/// Granularity for date differences and shifts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl DateUnit {
    /// Parse a unit name as the UI supplies it ("days", "week", ...)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" => Some(DateUnit::Days),
            "week" | "weeks" => Some(DateUnit::Weeks),
            "month" | "months" => Some(DateUnit::Months),
            "year" | "years" => Some(DateUnit::Years),
            _ => None,
        }
    }
}

/// A calendar date (proleptic Gregorian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CivilDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CivilDate {
    // ========== Construction ==========

    /// Create a date from components, validating them
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(DateError::Overflow);
        }
        if !(1..=12).contains(&month) {
            return Err(DateError::InvalidMonth(month));
        }
        let max_day = days_in_month(year, month);
        if day < 1 || day > max_day {
            return Err(DateError::InvalidDay(day, month, year));
        }
        Ok(Self { year, month, day })
    }

    /// Parse an ISO 8601 date (YYYY-MM-DD)
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('-').collect();
        // A leading '-' on the year splits into an empty first part
        let (year_str, rest): (String, &[&str]) = if parts.len() == 4 && parts[0].is_empty() {
            (format!("-{}", parts[1]), &parts[2..])
        } else if parts.len() == 3 {
            (parts[0].to_string(), &parts[1..])
        } else {
            return Err(DateError::ParseError(format!("expected YYYY-MM-DD, got '{}'", s)));
        };

        let year: i32 = year_str.parse()
            .map_err(|_| DateError::ParseError(format!("invalid year '{}'", year_str)))?;
        let month: u32 = rest[0].parse()
            .map_err(|_| DateError::ParseError(format!("invalid month '{}'", rest[0])))?;
        let day: u32 = rest[1].parse()
            .map_err(|_| DateError::ParseError(format!("invalid day '{}'", rest[1])))?;

        Self::new(year, month, day)
    }

    /// Convert days since Unix epoch to a date
    pub fn from_days(days: i64) -> Result<Self, DateError> {
        if !(DAYS_MIN..=DAYS_MAX).contains(&days) {
            return Err(DateError::Overflow);
        }
        let (year, month, day) = civil_from_days(days);
        Self::new(year, month, day)
    }

    // ========== Accessors ==========

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month component (1-12)
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day component (1-31)
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Days since Unix epoch (negative before 1970-01-01)
    pub fn to_days(&self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    // ========== Arithmetic ==========

    /// Shift by a signed amount of the given unit.
    ///
    /// Month and year shifts clamp to the end of the target month, so
    /// Jan 31 + 1 month is Feb 28 (or 29 in a leap year).
    pub fn shift(&self, amount: i64, unit: DateUnit) -> Result<Self, DateError> {
        match unit {
            DateUnit::Days => {
                Self::from_days(self.to_days().checked_add(amount).ok_or(DateError::Overflow)?)
            }
            DateUnit::Weeks => {
                let days = amount.checked_mul(7).ok_or(DateError::Overflow)?;
                Self::from_days(self.to_days().checked_add(days).ok_or(DateError::Overflow)?)
            }
            DateUnit::Months => self.shift_months(amount),
            DateUnit::Years => self.shift_months(amount.checked_mul(12).ok_or(DateError::Overflow)?),
        }
    }

    fn shift_months(&self, months: i64) -> Result<Self, DateError> {
        let total = (self.year as i64) * 12 + (self.month as i64 - 1) + months;
        let year = total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u32;
        if year < YEAR_MIN as i64 || year > YEAR_MAX as i64 {
            return Err(DateError::Overflow);
        }
        let year = year as i32;
        // Clamp day to valid range for the new month
        let day = self.day.min(days_in_month(year, month));
        Self::new(year, month, day)
    }

    /// Absolute difference in whole units of the given granularity.
    ///
    /// Days and weeks truncate toward zero; months and years count how
    /// many whole calendar steps fit between the earlier and later date
    /// (a partial trailing month does not count).
    pub fn diff(&self, other: &CivilDate, unit: DateUnit) -> i64 {
        let (earlier, later) = if self <= other { (self, other) } else { (other, self) };
        match unit {
            DateUnit::Days => later.to_days() - earlier.to_days(),
            DateUnit::Weeks => (later.to_days() - earlier.to_days()) / 7,
            DateUnit::Months => earlier.whole_months_until(later),
            DateUnit::Years => earlier.whole_months_until(later) / 12,
        }
    }

    /// Whole calendar months from self to later (self <= later), counted
    /// with the same clamping rule as shift: Jan 31 -> Feb 28 is one month.
    fn whole_months_until(&self, later: &CivilDate) -> i64 {
        let mut months =
            (later.year as i64 - self.year as i64) * 12 + (later.month as i64 - self.month as i64);
        // shift_months only errors at the year bounds, which the span
        // between two valid dates cannot reach
        if let Ok(shifted) = self.shift_months(months) {
            if shifted > *later {
                months -= 1;
            }
        }
        months
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}-{:02}-{:02}", -self.year, self.month, self.day)
        } else {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

// ============================================================================
// Calendar Utilities (Gregorian proleptic)
// ============================================================================

/// Check if year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Get days in a month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        m if (1..=12).contains(&m) => DAYS_IN_MONTH[(m - 1) as usize],
        _ => 0,
    }
}

/// Convert civil date to days since Unix epoch
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year } as i64;
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u32; // [0, 399]
    let m = month as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as i64 - 1; // [0, 365]
    let doe = yoe as i64 * 365 + yoe as i64 / 4 - yoe as i64 / 100 + doy; // [0, 146096]
    era * 146097 + doe - UNIX_EPOCH_DAYS
}

/// Convert days since Unix epoch to civil date
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + UNIX_EPOCH_DAYS;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // [0, 399]
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    let year = if m <= 2 { y + 1 } else { y };
    (year as i32, m as u32, d as u32)
}

// ============================================================================
// Tests
// ============================================================================
