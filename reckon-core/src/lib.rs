//! Reckon Core - Fundamental types
//!
//! This crate provides the core types used throughout Reckon:
//! - `Value`: Runtime values (numbers, text, dates, errors)
//! - `CalcError`: Structured errors carried as values
//! - `format`: Display formatting with the scientific-notation cutoffs
//! - `radix`: Programmer-mode bases and word-size arithmetic
//! - `CivilDate`: Calendar dates for the date mode

mod date;
mod error;
pub mod format;
pub mod radix;
mod value;

pub use date::{days_in_month, is_leap_year, CivilDate, DateError, DateUnit};
pub use error::{codes, CalcError, ErrorContext, Severity};
pub use format::{FormatError, ERROR_MARKER};
pub use radix::{Radix, RadixError, WordSize};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{CalcError, CivilDate, Severity, Value};
}
