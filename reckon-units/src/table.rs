//! Conversion tables with per-unit factors
//!
//! Each table covers one quantity (length, volume, ...) and maps unit
//! names to the factor that takes one of that unit into the table's
//! base unit. Converting is `value * factor[from] / factor[to]`, so a
//! table never needs pairwise entries.

use std::collections::HashMap;
use thiserror::Error;

use reckon_core::CalcError;

/// Errors from typed conversion lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    #[error("cannot convert {from} ({from_quantity}) to {to} ({to_quantity})")]
    Incompatible {
        from: String,
        to: String,
        from_quantity: String,
        to_quantity: String,
    },
}

impl From<ConversionError> for CalcError {
    fn from(e: ConversionError) -> Self {
        match e {
            ConversionError::UnknownUnit(unit) => CalcError::unknown_unit(&unit),
            ConversionError::Incompatible { ref from, ref to, .. } => {
                CalcError::incompatible_units(from, to).with_note(e.to_string())
            }
        }
    }
}

/// A family of units sharing a base unit
pub struct ConversionTable {
    quantity: &'static str,
    base_unit: &'static str,
    factors: HashMap<&'static str, f64>,
    aliases: HashMap<&'static str, &'static str>,
}

impl ConversionTable {
    pub fn new(quantity: &'static str, base_unit: &'static str) -> Self {
        ConversionTable {
            quantity,
            base_unit,
            factors: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register a unit with its factor to the base unit
    pub fn unit(mut self, name: &'static str, factor: f64) -> Self {
        self.factors.insert(name, factor);
        self
    }

    /// Register an alternate spelling for a unit
    pub fn alias(mut self, alias: &'static str, canonical: &'static str) -> Self {
        self.aliases.insert(alias, canonical);
        self
    }

    pub fn quantity(&self) -> &'static str {
        self.quantity
    }

    pub fn base_unit(&self) -> &'static str {
        self.base_unit
    }

    /// Canonical names in this table, sorted for stable listings
    pub fn units(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.factors.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Resolve a unit name or alias to its canonical name
    pub fn resolve(&self, unit: &str) -> Option<&'static str> {
        self.lookup(unit).map(|(name, _)| name)
    }

    /// Factor from a unit to the base unit
    pub fn factor(&self, unit: &str) -> Option<f64> {
        self.lookup(unit).map(|(_, factor)| factor)
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.lookup(unit).is_some()
    }

    fn lookup(&self, unit: &str) -> Option<(&'static str, f64)> {
        let key = unit.trim().to_lowercase();
        let canonical = match self.factors.get_key_value(key.as_str()) {
            Some((name, _)) => *name,
            None => self.aliases.get(key.as_str()).copied()?,
        };
        let factor = self.factors.get(canonical).copied()?;
        Some((canonical, factor))
    }

    /// Convert between two units of this table.
    ///
    /// Fail-soft: an unknown unit on either side returns `value`
    /// unchanged. Callers that want a diagnosable failure use
    /// [`try_convert`](Self::try_convert).
    pub fn convert(&self, value: f64, from: &str, to: &str) -> f64 {
        self.try_convert(value, from, to).unwrap_or(value)
    }

    /// Convert between two units, reporting unknown units
    pub fn try_convert(&self, value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        let (from_name, from_factor) = self
            .lookup(from)
            .ok_or_else(|| ConversionError::UnknownUnit(from.to_string()))?;
        let (to_name, to_factor) = self
            .lookup(to)
            .ok_or_else(|| ConversionError::UnknownUnit(to.to_string()))?;

        // Identity returns the exact input, no round trip through the base.
        if from_name == to_name {
            return Ok(value);
        }

        let base = value * from_factor;
        Ok(base / to_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths() -> ConversionTable {
        ConversionTable::new("length", "meter")
            .unit("meter", 1.0)
            .unit("kilometer", 1000.0)
            .unit("centimeter", 0.01)
            .alias("m", "meter")
            .alias("km", "kilometer")
            .alias("cm", "centimeter")
    }

    #[test]
    fn test_convert_through_base() {
        let t = lengths();
        assert_eq!(t.convert(5.0, "kilometer", "meter"), 5000.0);
        assert_eq!(t.convert(1.0, "meter", "kilometer"), 0.001);
        assert_eq!(t.convert(250.0, "centimeter", "meter"), 2.5);
    }

    #[test]
    fn test_identity_is_exact() {
        let t = lengths();
        let v = 0.1 + 0.2;
        assert_eq!(t.convert(v, "meter", "meter"), v);
        // Alias and canonical spellings are the same unit.
        assert_eq!(t.convert(v, "km", "kilometer"), v);
    }

    #[test]
    fn test_unknown_unit_fails_soft() {
        let t = lengths();
        assert_eq!(t.convert(7.0, "cubit", "meter"), 7.0);
        assert_eq!(t.convert(7.0, "meter", "cubit"), 7.0);
    }

    #[test]
    fn test_try_convert_reports_unknown_unit() {
        let t = lengths();
        let err = t.try_convert(7.0, "cubit", "meter").unwrap_err();
        assert_eq!(err, ConversionError::UnknownUnit("cubit".to_string()));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let t = lengths();
        assert_eq!(t.resolve("Meter"), Some("meter"));
        assert_eq!(t.resolve("KM"), Some("kilometer"));
        assert_eq!(t.factor(" km "), Some(1000.0));
    }

    #[test]
    fn test_units_listing_sorted() {
        let t = lengths();
        assert_eq!(t.units(), vec!["centimeter", "kilometer", "meter"]);
    }

    #[test]
    fn test_error_maps_to_calc_error() {
        let err: CalcError = ConversionError::UnknownUnit("cubit".to_string()).into();
        assert_eq!(err.code, reckon_core::codes::UNKNOWN_UNIT);
    }
}
