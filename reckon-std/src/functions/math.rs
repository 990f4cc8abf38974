//! Core math functions
//!
//! All functions follow IEEE-754 semantics: domain violations such as
//! `sqrt(-1)` or `log(0)` produce NaN or an infinity rather than an
//! error value. The display formatter renders non-finite results as the
//! error marker, so callers never need to guard these calls.

use reckon_plugin::prelude::*;

pub struct Log;
pub struct Ln;
pub struct Sqrt;
pub struct Cbrt;
pub struct Exp;
pub struct Pow;
pub struct Abs;
pub struct Floor;
pub struct Ceil;
pub struct Round;

static LOG_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Value (must be positive)", optional: false, default: None }];
static LOG_EXAMPLES: [&str; 2] = ["log(100)", "log(2)"];
static LOG_RELATED: [&str; 2] = ["ln", "exp"];

static LN_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Value (must be positive)", optional: false, default: None }];
static LN_EXAMPLES: [&str; 2] = ["ln(e)", "ln(2)"];
static LN_RELATED: [&str; 2] = ["log", "exp"];

static SQRT_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Value (must be non-negative)", optional: false, default: None }];
static SQRT_EXAMPLES: [&str; 2] = ["sqrt(2)", "sqrt(16)"];
static SQRT_RELATED: [&str; 2] = ["cbrt", "pow"];

static CBRT_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Value", optional: false, default: None }];
static CBRT_EXAMPLES: [&str; 2] = ["cbrt(27)", "cbrt(-8)"];
static CBRT_RELATED: [&str; 2] = ["sqrt", "pow"];

static EXP_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Exponent", optional: false, default: None }];
static EXP_EXAMPLES: [&str; 2] = ["exp(1)", "exp(0)"];
static EXP_RELATED: [&str; 2] = ["ln", "pow"];

static POW_ARGS: [ArgMeta; 2] = [
    ArgMeta { name: "base", typ: "Number", description: "Base value", optional: false, default: None },
    ArgMeta { name: "exponent", typ: "Number", description: "Exponent", optional: false, default: None },
];
static POW_EXAMPLES: [&str; 2] = ["pow(2, 10)", "pow(2, 0.5)"];
static POW_RELATED: [&str; 2] = ["sqrt", "exp"];

static ABS_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Value", optional: false, default: None }];
static ABS_EXAMPLES: [&str; 2] = ["abs(-5)", "abs(3.14)"];
static ABS_RELATED: [&str; 0] = [];

static FLOOR_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Value to floor", optional: false, default: None }];
static FLOOR_EXAMPLES: [&str; 2] = ["floor(3.7)", "floor(-2.3)"];
static FLOOR_RELATED: [&str; 2] = ["ceil", "round"];

static CEIL_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Value to ceil", optional: false, default: None }];
static CEIL_EXAMPLES: [&str; 2] = ["ceil(3.2)", "ceil(-2.7)"];
static CEIL_RELATED: [&str; 2] = ["floor", "round"];

static ROUND_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Value to round", optional: false, default: None }];
static ROUND_EXAMPLES: [&str; 2] = ["round(3.5)", "round(3.4)"];
static ROUND_RELATED: [&str; 2] = ["floor", "ceil"];

impl FunctionPlugin for Log {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "log",
            description: "Base-10 logarithm",
            usage: "log(x)",
            args: &LOG_ARGS,
            returns: "Number",
            examples: &LOG_EXAMPLES,
            category: "math",
            source: None,
            related: &LOG_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("log", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(n.log10()),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("log", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Ln {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "ln",
            description: "Natural logarithm",
            usage: "ln(x)",
            args: &LN_ARGS,
            returns: "Number",
            examples: &LN_EXAMPLES,
            category: "math",
            source: None,
            related: &LN_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("ln", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(n.ln()),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("ln", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Sqrt {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sqrt",
            description: "Square root",
            usage: "sqrt(x)",
            args: &SQRT_ARGS,
            returns: "Number",
            examples: &SQRT_EXAMPLES,
            category: "math",
            source: None,
            related: &SQRT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("sqrt", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(n.sqrt()),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("sqrt", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Cbrt {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "cbrt",
            description: "Cube root",
            usage: "cbrt(x)",
            args: &CBRT_ARGS,
            returns: "Number",
            examples: &CBRT_EXAMPLES,
            category: "math",
            source: None,
            related: &CBRT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("cbrt", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(n.cbrt()),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("cbrt", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Exp {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "exp",
            description: "Exponential function (e^x)",
            usage: "exp(x)",
            args: &EXP_ARGS,
            returns: "Number",
            examples: &EXP_EXAMPLES,
            category: "math",
            source: None,
            related: &EXP_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("exp", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(n.exp()),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("exp", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Pow {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "pow",
            description: "Raise to power",
            usage: "pow(base, exponent)",
            args: &POW_ARGS,
            returns: "Number",
            examples: &POW_EXAMPLES,
            category: "math",
            source: None,
            related: &POW_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 2 {
            return Value::Error(CalcError::arg_count("pow", 2, args.len()));
        }
        let base = match &args[0] {
            Value::Number(n) => *n,
            Value::Error(e) => return Value::Error(e.clone()),
            other => return Value::Error(CalcError::arg_type("pow", "base", "Number", other.type_name())),
        };
        let exp = match &args[1] {
            Value::Number(n) => *n,
            Value::Error(e) => return Value::Error(e.clone()),
            other => return Value::Error(CalcError::arg_type("pow", "exponent", "Number", other.type_name())),
        };

        Value::Number(base.powf(exp))
    }
}

impl FunctionPlugin for Abs {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "abs",
            description: "Absolute value",
            usage: "abs(x)",
            args: &ABS_ARGS,
            returns: "Number",
            examples: &ABS_EXAMPLES,
            category: "math",
            source: None,
            related: &ABS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("abs", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(n.abs()),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("abs", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Floor {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "floor",
            description: "Largest integer less than or equal to x",
            usage: "floor(x)",
            args: &FLOOR_ARGS,
            returns: "Number",
            examples: &FLOOR_EXAMPLES,
            category: "math",
            source: None,
            related: &FLOOR_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("floor", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(n.floor()),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("floor", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Ceil {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "ceil",
            description: "Smallest integer greater than or equal to x",
            usage: "ceil(x)",
            args: &CEIL_ARGS,
            returns: "Number",
            examples: &CEIL_EXAMPLES,
            category: "math",
            source: None,
            related: &CEIL_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("ceil", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(n.ceil()),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("ceil", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Round {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "round",
            description: "Round to nearest integer",
            usage: "round(x)",
            args: &ROUND_ARGS,
            returns: "Number",
            examples: &ROUND_EXAMPLES,
            category: "math",
            source: None,
            related: &ROUND_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("round", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(n.round()),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("round", "x", "Number", other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_plugin::PluginRegistry;
    use std::sync::Arc;

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    fn num(v: Value) -> f64 {
        match v {
            Value::Number(n) => n,
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn test_log_is_base_10() {
        assert_eq!(num(Log.call(&[Value::Number(100.0)], &ctx())), 2.0);
        assert_eq!(num(Log.call(&[Value::Number(1000.0)], &ctx())), 3.0);
    }

    #[test]
    fn test_ln_of_e() {
        let r = num(Ln.call(&[Value::Number(std::f64::consts::E)], &ctx()));
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sqrt_negative_is_nan() {
        assert!(num(Sqrt.call(&[Value::Number(-1.0)], &ctx())).is_nan());
    }

    #[test]
    fn test_cbrt_handles_negatives() {
        assert_eq!(num(Cbrt.call(&[Value::Number(-8.0)], &ctx())), -2.0);
        assert_eq!(num(Cbrt.call(&[Value::Number(27.0)], &ctx())), 3.0);
    }

    #[test]
    fn test_pow_fractional_exponent() {
        let r = num(Pow.call(&[Value::Number(2.0), Value::Number(0.5)], &ctx()));
        assert!((r - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_floor_ceil_round() {
        assert_eq!(num(Floor.call(&[Value::Number(-2.3)], &ctx())), -3.0);
        assert_eq!(num(Ceil.call(&[Value::Number(-2.7)], &ctx())), -2.0);
        assert_eq!(num(Round.call(&[Value::Number(3.5)], &ctx())), 4.0);
        assert_eq!(num(Round.call(&[Value::Number(3.4)], &ctx())), 3.0);
    }

    #[test]
    fn test_arg_count_mismatch() {
        let r = Sqrt.call(&[], &ctx());
        match r {
            Value::Error(e) => assert_eq!(e.code, codes::ARG_COUNT),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_values_propagate() {
        let err = Value::Error(CalcError::domain_error("upstream failure"));
        match Abs.call(&[err], &ctx()) {
            Value::Error(e) => assert_eq!(e.code, codes::DOMAIN_ERROR),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_number_argument_rejected() {
        let r = Exp.call(&[Value::Text("two".into())], &ctx());
        match r {
            Value::Error(e) => assert_eq!(e.code, codes::ARG_TYPE),
            other => panic!("expected error, got {other:?}"),
        }
    }
}
