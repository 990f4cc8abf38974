//! Reckon Units - Unit conversion
//!
//! Linear factor tables for eight quantities plus the affine
//! temperature scales, and a `convert()` plugin so conversions can be
//! written inside expressions.
//!
//! Two conversion surfaces with different error contracts:
//! - the string-keyed [`ConversionTable::convert`] and
//!   [`convert_temperature_str`] fail soft, returning the input
//!   unchanged when a unit is unknown;
//! - [`ConversionTable::try_convert`] and the `convert()` plugin report
//!   unknown or incompatible units as typed errors.

pub mod catalog;
mod convert;
mod table;
mod temperature;

pub use convert::Convert;
pub use table::{ConversionTable, ConversionError};
pub use temperature::{convert_temperature, convert_temperature_str, TempScale};

use reckon_plugin::PluginRegistry;

/// Register the unit-conversion functions into a registry
pub fn load_unit_library(registry: PluginRegistry) -> PluginRegistry {
    registry.with_function(Convert)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, rel: f64) {
        let scale = a.abs().max(b.abs()).max(1e-300);
        assert!(
            (a - b).abs() / scale <= rel,
            "{} and {} differ by more than {:e} relative",
            a,
            b,
            rel
        );
    }

    #[test]
    fn test_round_trip_law_all_tables() {
        // Converting there and back lands within 1e-9 relative for every
        // unit pair in every table.
        for table in catalog::tables() {
            let units = table.units();
            for from in &units {
                for to in &units {
                    let out = table.convert(3.25, from, to);
                    let back = table.convert(out, to, from);
                    assert_close(back, 3.25, 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_identity_law_all_tables() {
        let awkward = 0.1 + 0.2;
        for table in catalog::tables() {
            for unit in table.units() {
                assert_eq!(table.convert(awkward, unit, unit), awkward);
            }
        }
    }

    #[test]
    fn test_length_anchors() {
        assert_eq!(catalog::LENGTH.convert(1.0, "meter", "kilometer"), 0.001);
        assert_close(catalog::LENGTH.convert(1.0, "mile", "meter"), 1609.344, 1e-12);
    }

    #[test]
    fn test_base_unit_factor_is_one() {
        for table in catalog::tables() {
            assert_eq!(table.factor(table.base_unit()), Some(1.0));
        }
    }

    #[test]
    fn test_all_factors_positive_finite() {
        for table in catalog::tables() {
            for unit in table.units() {
                let f = table.factor(unit).unwrap();
                assert!(f.is_finite() && f > 0.0, "{} {}: {}", table.quantity(), unit, f);
            }
        }
    }

    #[test]
    fn test_unknown_unit_identity() {
        assert_eq!(catalog::LENGTH.convert(5.0, "meter", "parsec"), 5.0);
    }

    #[test]
    fn test_temperature_anchors() {
        use TempScale::{Celsius, Fahrenheit, Kelvin};
        assert_eq!(convert_temperature(0.0, Celsius, Fahrenheit), 32.0);
        assert_eq!(convert_temperature(100.0, Celsius, Fahrenheit), 212.0);
        assert_eq!(convert_temperature(0.0, Celsius, Kelvin), 273.15);
    }

    #[test]
    fn test_catalog_unit_lookup() {
        let (table, canonical) = catalog::find_unit("kg").unwrap();
        assert_eq!(table.quantity(), "weight");
        assert_eq!(canonical, "kilogram");
        assert!(catalog::find_unit("parsec").is_none());
    }
}
