//! Trigonometric functions
//!
//! Direct functions interpret their argument in the context's angle
//! mode; inverse functions return their result in it. Radians is the
//! default, so graph evaluation is unaffected by the scientific mode's
//! degree toggle.

use reckon_plugin::prelude::*;

pub struct Sin;
pub struct Cos;
pub struct Tan;
pub struct Asin;
pub struct Acos;
pub struct Atan;

static SIN_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Angle in the current angle mode", optional: false, default: None }];
static SIN_EXAMPLES: [&str; 2] = ["sin(0)", "sin(pi / 2)"];
static SIN_RELATED: [&str; 3] = ["cos", "tan", "asin"];

static COS_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Angle in the current angle mode", optional: false, default: None }];
static COS_EXAMPLES: [&str; 2] = ["cos(0)", "cos(pi)"];
static COS_RELATED: [&str; 3] = ["sin", "tan", "acos"];

static TAN_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Angle in the current angle mode", optional: false, default: None }];
static TAN_EXAMPLES: [&str; 2] = ["tan(0)", "tan(pi / 4)"];
static TAN_RELATED: [&str; 3] = ["sin", "cos", "atan"];

static ASIN_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Value in [-1, 1]", optional: false, default: None }];
static ASIN_EXAMPLES: [&str; 2] = ["asin(1)", "asin(0.5)"];
static ASIN_RELATED: [&str; 2] = ["sin", "acos"];

static ACOS_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Value in [-1, 1]", optional: false, default: None }];
static ACOS_EXAMPLES: [&str; 2] = ["acos(1)", "acos(0)"];
static ACOS_RELATED: [&str; 2] = ["cos", "asin"];

static ATAN_ARGS: [ArgMeta; 1] = [ArgMeta { name: "x", typ: "Number", description: "Value", optional: false, default: None }];
static ATAN_EXAMPLES: [&str; 2] = ["atan(1)", "atan(0)"];
static ATAN_RELATED: [&str; 2] = ["tan", "asin"];

// Direct trig: degree mode converts the input angle to radians.
fn to_angle(n: f64, mode: AngleMode) -> f64 {
    match mode {
        AngleMode::Radians => n,
        AngleMode::Degrees => n.to_radians(),
    }
}

// Inverse trig: degree mode converts the radian result back to degrees.
fn from_angle(n: f64, mode: AngleMode) -> f64 {
    match mode {
        AngleMode::Radians => n,
        AngleMode::Degrees => n.to_degrees(),
    }
}

impl FunctionPlugin for Sin {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sin",
            description: "Sine of an angle",
            usage: "sin(x)",
            args: &SIN_ARGS,
            returns: "Number",
            examples: &SIN_EXAMPLES,
            category: "trig",
            source: None,
            related: &SIN_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("sin", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(to_angle(*n, ctx.angle_mode).sin()),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("sin", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Cos {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "cos",
            description: "Cosine of an angle",
            usage: "cos(x)",
            args: &COS_ARGS,
            returns: "Number",
            examples: &COS_EXAMPLES,
            category: "trig",
            source: None,
            related: &COS_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("cos", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(to_angle(*n, ctx.angle_mode).cos()),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("cos", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Tan {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "tan",
            description: "Tangent of an angle",
            usage: "tan(x)",
            args: &TAN_ARGS,
            returns: "Number",
            examples: &TAN_EXAMPLES,
            category: "trig",
            source: None,
            related: &TAN_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("tan", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(to_angle(*n, ctx.angle_mode).tan()),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("tan", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Asin {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "asin",
            description: "Inverse sine",
            usage: "asin(x)",
            args: &ASIN_ARGS,
            returns: "Number",
            examples: &ASIN_EXAMPLES,
            category: "trig",
            source: None,
            related: &ASIN_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("asin", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(from_angle(n.asin(), ctx.angle_mode)),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("asin", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Acos {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "acos",
            description: "Inverse cosine",
            usage: "acos(x)",
            args: &ACOS_ARGS,
            returns: "Number",
            examples: &ACOS_EXAMPLES,
            category: "trig",
            source: None,
            related: &ACOS_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("acos", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(from_angle(n.acos(), ctx.angle_mode)),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("acos", "x", "Number", other.type_name())),
        }
    }
}

impl FunctionPlugin for Atan {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "atan",
            description: "Inverse tangent",
            usage: "atan(x)",
            args: &ATAN_ARGS,
            returns: "Number",
            examples: &ATAN_EXAMPLES,
            category: "trig",
            source: None,
            related: &ATAN_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("atan", 1, args.len()));
        }
        match &args[0] {
            Value::Number(n) => Value::Number(from_angle(n.atan(), ctx.angle_mode)),
            Value::Error(e) => Value::Error(e.clone()),
            other => Value::Error(CalcError::arg_type("atan", "x", "Number", other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_plugin::PluginRegistry;
    use std::f64::consts::PI;
    use std::sync::Arc;

    fn ctx_in(mode: AngleMode) -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new())).with_angle_mode(mode)
    }

    fn num(v: Value) -> f64 {
        match v {
            Value::Number(n) => n,
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn test_sin_radians_default() {
        let r = num(Sin.call(&[Value::Number(PI / 2.0)], &ctx_in(AngleMode::Radians)));
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sin_degrees_converts_input() {
        let r = num(Sin.call(&[Value::Number(90.0)], &ctx_in(AngleMode::Degrees)));
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cos_degrees() {
        let r = num(Cos.call(&[Value::Number(180.0)], &ctx_in(AngleMode::Degrees)));
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tan_45_degrees() {
        let r = num(Tan.call(&[Value::Number(45.0)], &ctx_in(AngleMode::Degrees)));
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_asin_degrees_converts_output() {
        let r = num(Asin.call(&[Value::Number(1.0)], &ctx_in(AngleMode::Degrees)));
        assert!((r - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_acos_radians_output() {
        let r = num(Acos.call(&[Value::Number(0.0)], &ctx_in(AngleMode::Radians)));
        assert!((r - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_atan_degrees() {
        let r = num(Atan.call(&[Value::Number(1.0)], &ctx_in(AngleMode::Degrees)));
        assert!((r - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_asin_out_of_domain_is_nan() {
        let r = num(Asin.call(&[Value::Number(2.0)], &ctx_in(AngleMode::Radians)));
        assert!(r.is_nan());
    }
}
