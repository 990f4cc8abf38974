//! Temperature conversion
//!
//! Temperature is affine rather than multiplicative, so it does not fit
//! the factor tables. Conversions pivot through Celsius with explicit
//! forward and backward formulas.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TempScale {
    pub fn parse(s: &str) -> Option<TempScale> {
        match s.trim().to_lowercase().as_str() {
            "celsius" | "c" => Some(TempScale::Celsius),
            "fahrenheit" | "f" => Some(TempScale::Fahrenheit),
            "kelvin" | "k" => Some(TempScale::Kelvin),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TempScale::Celsius => "celsius",
            TempScale::Fahrenheit => "fahrenheit",
            TempScale::Kelvin => "kelvin",
        }
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            TempScale::Celsius => value,
            TempScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TempScale::Kelvin => value - 273.15,
        }
    }

    fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TempScale::Celsius => celsius,
            TempScale::Fahrenheit => (celsius * 9.0 / 5.0) + 32.0,
            TempScale::Kelvin => celsius + 273.15,
        }
    }
}

impl std::fmt::Display for TempScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Convert between two temperature scales
pub fn convert_temperature(value: f64, from: TempScale, to: TempScale) -> f64 {
    to.from_celsius(from.to_celsius(value))
}

/// String-keyed conversion with the fail-soft contract: an unrecognized
/// source scale passes the value through untouched, an unrecognized
/// target returns the Celsius pivot.
pub fn convert_temperature_str(value: f64, from: &str, to: &str) -> f64 {
    let celsius = match TempScale::parse(from) {
        Some(scale) => scale.to_celsius(value),
        None => return value,
    };
    match TempScale::parse(to) {
        Some(scale) => scale.from_celsius(celsius),
        None => celsius,
    }
}
