//! Display formatting for calculator results
//!
//! Keeps displayed numbers stable and readable across the full double
//! range. The rules:
//! - non-finite values are a formatting error (the caller shows a marker)
//! - very large (>= 1e15) and very small (< 1e-10, nonzero) magnitudes
//!   use scientific notation with 6 fractional digits
//! - everything else uses the shortest string that round-trips

use thiserror::Error;

/// Magnitude at or above which scientific notation kicks in
pub const SCI_UPPER_BOUND: f64 = 1e15;

/// Nonzero magnitude below which scientific notation kicks in
pub const SCI_LOWER_BOUND: f64 = 1e-10;

/// Marker string shown in place of an unrepresentable result
pub const ERROR_MARKER: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("value is not finite")]
    NonFinite,
}

/// Format a finite double for display.
///
/// Returns `FormatError::NonFinite` for NaN and infinities; callers that
/// want a display string unconditionally use [`display`].
pub fn format_number(x: f64) -> Result<String, FormatError> {
    if !x.is_finite() {
        return Err(FormatError::NonFinite);
    }

    // Negative zero displays as plain zero
    let x = if x == 0.0 { 0.0 } else { x };

    let magnitude = x.abs();
    if magnitude >= SCI_UPPER_BOUND || (magnitude > 0.0 && magnitude < SCI_LOWER_BOUND) {
        return Ok(scientific(x));
    }

    let s = format!("{}", x);
    // Shortest round-trip form; if it carries an exponent anyway, stay scientific
    if s.contains('e') || s.contains('E') {
        return Ok(scientific(x));
    }
    Ok(s)
}

/// Format for display, substituting the error marker for non-finite input.
pub fn display(x: f64) -> String {
    format_number(x).unwrap_or_else(|_| ERROR_MARKER.to_string())
}

fn scientific(x: f64) -> String {
    format!("{:.6e}", x)
}
