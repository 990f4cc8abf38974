//! The `convert()` function plugin
//!
//! Lets conversions appear inside expressions: `convert(100, "km", "mi")`.
//! The quantity is inferred from the unit names across the whole
//! catalog; temperature scale names route to the affine converter. This
//! entry point is typed: unknown or incompatible units are errors, not
//! pass-throughs.

use reckon_plugin::prelude::*;

use crate::catalog;
use crate::temperature::{convert_temperature, TempScale};

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 3] = [
    ArgMeta {
        name: "value",
        typ: "Number",
        description: "Value to convert",
        optional: false,
        default: None,
    },
    ArgMeta {
        name: "from_unit",
        typ: "Text",
        description: "Source unit (e.g., \"km\")",
        optional: false,
        default: None,
    },
    ArgMeta {
        name: "to_unit",
        typ: "Text",
        description: "Target unit (e.g., \"mi\")",
        optional: false,
        default: None,
    },
];

static CONVERT_EXAMPLES: [&str; 3] = [
    "convert(100, \"km\", \"mi\")",
    "convert(32, \"F\", \"C\")",
    "convert(1, \"kg\", \"lb\")",
];

static CONVERT_RELATED: [&str; 1] = ["abs"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a value from one unit to another",
            usage: "convert(value, from_unit, to_unit)",
            args: &CONVERT_ARGS,
            returns: "Number",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            source: None,
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 3 {
            return Value::Error(CalcError::arg_count("convert", 3, args.len()));
        }
        if let Value::Error(e) = &args[0] {
            return Value::Error(e.clone());
        }

        let value = match args[0].as_number() {
            Some(n) => n,
            None => {
                return Value::Error(CalcError::arg_type(
                    "convert", "value", "Number", args[0].type_name(),
                ))
            }
        };
        let from = match args[1].as_text() {
            Some(s) => s,
            None => {
                return Value::Error(CalcError::arg_type(
                    "convert", "from_unit", "Text", args[1].type_name(),
                ))
            }
        };
        let to = match args[2].as_text() {
            Some(s) => s,
            None => {
                return Value::Error(CalcError::arg_type(
                    "convert", "to_unit", "Text", args[2].type_name(),
                ))
            }
        };

        // Temperature scales never appear in the factor tables, so try
        // them first when both sides name a scale.
        if let (Some(fs), Some(ts)) = (TempScale::parse(from), TempScale::parse(to)) {
            return Value::Number(convert_temperature(value, fs, ts));
        }

        let (from_table, from_name) = match catalog::find_unit(from) {
            Some(hit) => hit,
            None => return Value::Error(CalcError::unknown_unit(from)),
        };
        let (to_table, to_name) = match catalog::find_unit(to) {
            Some(hit) => hit,
            None => return Value::Error(CalcError::unknown_unit(to)),
        };
        if from_table.quantity() != to_table.quantity() {
            return Value::Error(
                CalcError::incompatible_units(from_name, to_name).with_note(format!(
                    "{} is {}, {} is {}",
                    from_name,
                    from_table.quantity(),
                    to_name,
                    to_table.quantity()
                )),
            );
        }

        match from_table.try_convert(value, from_name, to_name) {
            Ok(result) => Value::Number(result),
            Err(e) => Value::Error(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_plugin::PluginRegistry;
    use std::sync::Arc;

    fn call(args: &[Value]) -> Value {
        let registry = Arc::new(PluginRegistry::new().with_function(Convert));
        let ctx = EvalContext::new(registry.clone());
        registry.call_function("convert", args, &ctx)
    }

    #[test]
    fn test_convert_across_catalog() {
        let r = call(&[
            Value::Number(1.0),
            Value::Text("km".to_string()),
            Value::Text("m".to_string()),
        ]);
        assert_eq!(r, Value::Number(1000.0));
    }

    #[test]
    fn test_convert_temperature_scales() {
        let r = call(&[
            Value::Number(32.0),
            Value::Text("F".to_string()),
            Value::Text("C".to_string()),
        ]);
        assert_eq!(r, Value::Number(0.0));
    }

    #[test]
    fn test_unknown_unit_is_typed_error() {
        let r = call(&[
            Value::Number(5.0),
            Value::Text("meter".to_string()),
            Value::Text("parsec".to_string()),
        ]);
        match r {
            Value::Error(e) => assert_eq!(e.code, reckon_core::codes::UNKNOWN_UNIT),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_incompatible_quantities() {
        let r = call(&[
            Value::Number(1.0),
            Value::Text("meter".to_string()),
            Value::Text("kilogram".to_string()),
        ]);
        match r {
            Value::Error(e) => assert_eq!(e.code, reckon_core::codes::INCOMPATIBLE_UNITS),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_arg_types() {
        let r = call(&[
            Value::Text("one".to_string()),
            Value::Text("m".to_string()),
            Value::Text("km".to_string()),
        ]);
        match r {
            Value::Error(e) => assert_eq!(e.code, reckon_core::codes::ARG_TYPE),
            other => panic!("expected error, got {other:?}"),
        }
    }
}
