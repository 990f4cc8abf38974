//! Built-in conversion tables
//!
//! Eight quantities, each with the factors taking a unit into the
//! table's base unit. Month and year use the average Gregorian lengths
//! (30.436875 days and 365.2425 days of seconds) so time conversions
//! stay calendar-free.

use std::sync::LazyLock;

use crate::ConversionTable;

pub static LENGTH: LazyLock<ConversionTable> = LazyLock::new(length);
pub static VOLUME: LazyLock<ConversionTable> = LazyLock::new(volume);
pub static WEIGHT: LazyLock<ConversionTable> = LazyLock::new(weight);
pub static ENERGY: LazyLock<ConversionTable> = LazyLock::new(energy);
pub static AREA: LazyLock<ConversionTable> = LazyLock::new(area);
pub static SPEED: LazyLock<ConversionTable> = LazyLock::new(speed);
pub static TIME: LazyLock<ConversionTable> = LazyLock::new(time);
pub static POWER: LazyLock<ConversionTable> = LazyLock::new(power);

/// All built-in tables in display order
pub fn tables() -> [&'static ConversionTable; 8] {
    [
        &LENGTH, &VOLUME, &WEIGHT, &ENERGY, &AREA, &SPEED, &TIME, &POWER,
    ]
}

/// Find a table by quantity name
pub fn find_table(quantity: &str) -> Option<&'static ConversionTable> {
    let key = quantity.trim().to_lowercase();
    // "mass" is accepted for the weight table
    let key = if key == "mass" { "weight".to_string() } else { key };
    tables().into_iter().find(|t| t.quantity() == key)
}

/// Find the table containing a unit, along with its canonical name
pub fn find_unit(unit: &str) -> Option<(&'static ConversionTable, &'static str)> {
    for table in tables() {
        if let Some(canonical) = table.resolve(unit) {
            return Some((table, canonical));
        }
    }
    None
}

fn length() -> ConversionTable {
    ConversionTable::new("length", "meter")
        .unit("millimeter", 0.001)
        .unit("centimeter", 0.01)
        .unit("meter", 1.0)
        .unit("kilometer", 1000.0)
        .unit("inch", 0.0254)
        .unit("foot", 0.3048)
        .unit("yard", 0.9144)
        .unit("mile", 1609.344)
        .alias("mm", "millimeter")
        .alias("millimeters", "millimeter")
        .alias("millimetre", "millimeter")
        .alias("cm", "centimeter")
        .alias("centimeters", "centimeter")
        .alias("centimetre", "centimeter")
        .alias("m", "meter")
        .alias("meters", "meter")
        .alias("metre", "meter")
        .alias("metres", "meter")
        .alias("km", "kilometer")
        .alias("kilometers", "kilometer")
        .alias("kilometre", "kilometer")
        .alias("kilometres", "kilometer")
        .alias("in", "inch")
        .alias("inches", "inch")
        .alias("ft", "foot")
        .alias("feet", "foot")
        .alias("yd", "yard")
        .alias("yards", "yard")
        .alias("mi", "mile")
        .alias("miles", "mile")
}

fn volume() -> ConversionTable {
    ConversionTable::new("volume", "liter")
        .unit("milliliter", 0.001)
        .unit("liter", 1.0)
        .unit("cubic_meter", 1000.0)
        .unit("gallon", 3.78541)
        .unit("quart", 0.946353)
        .unit("pint", 0.473176)
        .unit("cup", 0.236588)
        .unit("fluid_ounce", 0.0295735)
        .alias("ml", "milliliter")
        .alias("milliliters", "milliliter")
        .alias("millilitre", "milliliter")
        .alias("l", "liter")
        .alias("liters", "liter")
        .alias("litre", "liter")
        .alias("litres", "liter")
        .alias("m3", "cubic_meter")
        .alias("cubicmeter", "cubic_meter")
        .alias("cubic_meters", "cubic_meter")
        .alias("gal", "gallon")
        .alias("gallons", "gallon")
        .alias("qt", "quart")
        .alias("quarts", "quart")
        .alias("pt", "pint")
        .alias("pints", "pint")
        .alias("cups", "cup")
        .alias("floz", "fluid_ounce")
        .alias("fl_oz", "fluid_ounce")
        .alias("fluidounce", "fluid_ounce")
        .alias("fluid_ounces", "fluid_ounce")
}

fn weight() -> ConversionTable {
    ConversionTable::new("weight", "kilogram")
        .unit("gram", 0.001)
        .unit("kilogram", 1.0)
        .unit("pound", 0.453592)
        .unit("ounce", 0.0283495)
        .unit("ton", 1000.0)
        .unit("stone", 6.35029)
        .alias("g", "gram")
        .alias("grams", "gram")
        .alias("kg", "kilogram")
        .alias("kilograms", "kilogram")
        .alias("lb", "pound")
        .alias("lbs", "pound")
        .alias("pounds", "pound")
        .alias("oz", "ounce")
        .alias("ounces", "ounce")
        .alias("tons", "ton")
        .alias("tonne", "ton")
        .alias("tonnes", "ton")
        .alias("st", "stone")
        .alias("stones", "stone")
}

fn energy() -> ConversionTable {
    ConversionTable::new("energy", "joule")
        .unit("joule", 1.0)
        .unit("kilojoule", 1000.0)
        .unit("calorie", 4.184)
        .unit("kilocalorie", 4184.0)
        .unit("watt_hour", 3600.0)
        .unit("kilowatt_hour", 3_600_000.0)
        .unit("btu", 1055.06)
        .alias("j", "joule")
        .alias("joules", "joule")
        .alias("kj", "kilojoule")
        .alias("kilojoules", "kilojoule")
        .alias("cal", "calorie")
        .alias("calories", "calorie")
        .alias("kcal", "kilocalorie")
        .alias("kilocalories", "kilocalorie")
        .alias("wh", "watt_hour")
        .alias("watthour", "watt_hour")
        .alias("watt_hours", "watt_hour")
        .alias("kwh", "kilowatt_hour")
        .alias("kilowatthour", "kilowatt_hour")
        .alias("kilowatt_hours", "kilowatt_hour")
        .alias("btus", "btu")
}

fn area() -> ConversionTable {
    ConversionTable::new("area", "square_meter")
        .unit("square_meter", 1.0)
        .unit("square_kilometer", 1_000_000.0)
        .unit("square_centimeter", 0.0001)
        .unit("square_inch", 0.00064516)
        .unit("square_foot", 0.092903)
        .unit("square_yard", 0.836127)
        .unit("acre", 4046.86)
        .unit("hectare", 10000.0)
        .alias("m2", "square_meter")
        .alias("sqm", "square_meter")
        .alias("squaremeter", "square_meter")
        .alias("square_meters", "square_meter")
        .alias("km2", "square_kilometer")
        .alias("sqkm", "square_kilometer")
        .alias("squarekilometer", "square_kilometer")
        .alias("square_kilometers", "square_kilometer")
        .alias("cm2", "square_centimeter")
        .alias("squarecentimeter", "square_centimeter")
        .alias("square_centimeters", "square_centimeter")
        .alias("in2", "square_inch")
        .alias("sqin", "square_inch")
        .alias("squareinch", "square_inch")
        .alias("square_inches", "square_inch")
        .alias("ft2", "square_foot")
        .alias("sqft", "square_foot")
        .alias("squarefoot", "square_foot")
        .alias("square_feet", "square_foot")
        .alias("yd2", "square_yard")
        .alias("squareyard", "square_yard")
        .alias("square_yards", "square_yard")
        .alias("ac", "acre")
        .alias("acres", "acre")
        .alias("ha", "hectare")
        .alias("hectares", "hectare")
}

fn speed() -> ConversionTable {
    ConversionTable::new("speed", "meter_per_second")
        .unit("meter_per_second", 1.0)
        .unit("kilometer_per_hour", 0.277778)
        .unit("mile_per_hour", 0.44704)
        .unit("foot_per_second", 0.3048)
        .unit("knot", 0.514444)
        .alias("m/s", "meter_per_second")
        .alias("mps", "meter_per_second")
        .alias("meterpersecond", "meter_per_second")
        .alias("meters_per_second", "meter_per_second")
        .alias("km/h", "kilometer_per_hour")
        .alias("kph", "kilometer_per_hour")
        .alias("kmh", "kilometer_per_hour")
        .alias("kilometerperhour", "kilometer_per_hour")
        .alias("kilometers_per_hour", "kilometer_per_hour")
        .alias("mph", "mile_per_hour")
        .alias("mileperhour", "mile_per_hour")
        .alias("miles_per_hour", "mile_per_hour")
        .alias("ft/s", "foot_per_second")
        .alias("fps", "foot_per_second")
        .alias("footpersecond", "foot_per_second")
        .alias("feet_per_second", "foot_per_second")
        .alias("kn", "knot")
        .alias("knots", "knot")
}

fn time() -> ConversionTable {
    ConversionTable::new("time", "second")
        .unit("second", 1.0)
        .unit("minute", 60.0)
        .unit("hour", 3600.0)
        .unit("day", 86400.0)
        .unit("week", 604800.0)
        .unit("month", 2_629_746.0)
        .unit("year", 31_556_952.0)
        .alias("s", "second")
        .alias("sec", "second")
        .alias("secs", "second")
        .alias("seconds", "second")
        .alias("min", "minute")
        .alias("mins", "minute")
        .alias("minutes", "minute")
        .alias("h", "hour")
        .alias("hr", "hour")
        .alias("hrs", "hour")
        .alias("hours", "hour")
        .alias("d", "day")
        .alias("days", "day")
        .alias("wk", "week")
        .alias("weeks", "week")
        .alias("mo", "month")
        .alias("months", "month")
        .alias("yr", "year")
        .alias("y", "year")
        .alias("years", "year")
}

fn power() -> ConversionTable {
    ConversionTable::new("power", "watt")
        .unit("watt", 1.0)
        .unit("kilowatt", 1000.0)
        .unit("horsepower", 745.7)
        .unit("btu_per_hour", 0.293071)
        .alias("w", "watt")
        .alias("watts", "watt")
        .alias("kw", "kilowatt")
        .alias("kilowatts", "kilowatt")
        .alias("hp", "horsepower")
        .alias("btu/h", "btu_per_hour")
        .alias("btuh", "btu_per_hour")
        .alias("btuperhour", "btu_per_hour")
        .alias("btus_per_hour", "btu_per_hour")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_has_its_base_unit() {
        for table in tables() {
            assert_eq!(
                table.factor(table.base_unit()),
                Some(1.0),
                "{} base unit should have factor 1",
                table.quantity()
            );
        }
    }

    #[test]
    fn test_canonical_names_unique_across_tables() {
        let mut seen = std::collections::HashSet::new();
        for table in tables() {
            for unit in table.units() {
                assert!(seen.insert(unit), "duplicate unit name: {unit}");
            }
        }
    }

    #[test]
    fn test_exact_factors() {
        assert_eq!(LENGTH.factor("mile"), Some(1609.344));
        assert_eq!(TIME.factor("month"), Some(2_629_746.0));
        assert_eq!(TIME.factor("year"), Some(31_556_952.0));
        assert_eq!(AREA.factor("square_inch"), Some(0.00064516));
        assert_eq!(POWER.factor("horsepower"), Some(745.7));
    }

    #[test]
    fn test_find_table() {
        assert!(find_table("length").is_some());
        assert!(find_table("Weight").is_some());
        assert!(find_table("mass").is_some());
        assert!(find_table("luminosity").is_none());
    }

    #[test]
    fn test_find_unit_picks_owning_table() {
        let (table, canonical) = find_unit("gallons").unwrap();
        assert_eq!(table.quantity(), "volume");
        assert_eq!(canonical, "gallon");

        let (table, canonical) = find_unit("mph").unwrap();
        assert_eq!(table.quantity(), "speed");
        assert_eq!(canonical, "mile_per_hour");

        assert!(find_unit("cubit").is_none());
    }

    #[test]
    fn test_mile_to_kilometer() {
        let result = LENGTH.convert(1.0, "mile", "kilometer");
        assert!((result - 1.609344).abs() < 1e-12);
    }

    #[test]
    fn test_speed_kmh_to_mph() {
        let result = SPEED.convert(100.0, "km/h", "mph");
        assert!((result - 62.137_119_223_733_4).abs() < 1e-3);
    }

    #[test]
    fn test_original_spelling_accepted() {
        // Lowercased run-together spellings resolve to the same units.
        assert_eq!(VOLUME.resolve("cubicmeter"), Some("cubic_meter"));
        assert_eq!(SPEED.resolve("meterpersecond"), Some("meter_per_second"));
        assert_eq!(ENERGY.resolve("kilowatthour"), Some("kilowatt_hour"));
    }
}
