//! Reckon Plugin System
//!
//! Provides the trait and registry for extending the calculator with
//! named functions (pure computation) and constants, plus the context
//! an evaluation runs in.

mod context;
mod registry;
mod traits;

pub use context::{AngleMode, EvalContext};
pub use registry::{ConstantDef, PluginRegistry};
pub use traits::{ArgMeta, FunctionMeta, FunctionPlugin};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        AngleMode, ArgMeta, ConstantDef, EvalContext,
        FunctionMeta, FunctionPlugin, PluginRegistry,
    };
    pub use reckon_core::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_core::Value;
    use std::sync::Arc;

    struct Double;

    static DOUBLE_ARGS: [ArgMeta; 1] = [ArgMeta::required("n", "Number", "Value to double")];

    impl FunctionPlugin for Double {
        fn meta(&self) -> FunctionMeta {
            FunctionMeta {
                name: "double",
                description: "Double a number",
                usage: "double(n)",
                args: &DOUBLE_ARGS,
                returns: "Number",
                examples: &[],
                category: "test",
                source: None,
                related: &[],
            }
        }

        fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
            match args.first().and_then(|v| v.as_number()) {
                Some(n) => Value::Number(n * 2.0),
                None => Value::Error(reckon_core::CalcError::arg_count("double", 1, args.len())),
            }
        }
    }

    fn registry() -> Arc<PluginRegistry> {
        Arc::new(
            PluginRegistry::new()
                .with_function(Double)
                .with_constant(ConstantDef {
                    name: "tau".to_string(),
                    value: std::f64::consts::TAU,
                    source: "2*pi".to_string(),
                    category: "test".to_string(),
                }),
        )
    }

    #[test]
    fn test_call_function() {
        let reg = registry();
        let ctx = EvalContext::new(reg.clone());
        let result = reg.call_function("double", &[Value::Number(21.0)], &ctx);
        assert_eq!(result.as_number(), Some(42.0));
    }

    #[test]
    fn test_call_is_case_insensitive() {
        let reg = registry();
        let ctx = EvalContext::new(reg.clone());
        let result = reg.call_function("DOUBLE", &[Value::Number(1.0)], &ctx);
        assert_eq!(result.as_number(), Some(2.0));
    }

    #[test]
    fn test_unknown_function_suggests() {
        let reg = registry();
        let ctx = EvalContext::new(reg.clone());
        let result = reg.call_function("doubel", &[], &ctx);
        match result {
            Value::Error(e) => {
                assert_eq!(e.code, reckon_core::codes::UNDEFINED_FUNC);
                assert!(e.suggestion.unwrap_or_default().contains("double"));
            }
            other => panic!("Expected Error, got {:?}", other),
        }
    }

    #[test]
    fn test_constant_resolution() {
        let reg = registry();
        let ctx = EvalContext::new(reg);
        assert_eq!(ctx.get_var("tau").as_number(), Some(std::f64::consts::TAU));
        assert!(ctx.get_var("nothing").is_error());
    }

    #[test]
    fn test_variables_shadow_constants() {
        let reg = registry();
        let mut ctx = EvalContext::new(reg);
        ctx.set_var("tau".to_string(), Value::Number(1.0));
        assert_eq!(ctx.get_var("tau").as_number(), Some(1.0));
    }

    #[test]
    fn test_angle_mode_parse() {
        assert_eq!(AngleMode::parse("deg"), Some(AngleMode::Degrees));
        assert_eq!(AngleMode::parse("Radians"), Some(AngleMode::Radians));
        assert_eq!(AngleMode::parse("grad"), None);
        assert_eq!(AngleMode::default(), AngleMode::Radians);
    }

    #[test]
    fn test_help_payload() {
        let reg = registry();
        let help = reg.help(Some("double"));
        assert_eq!(help.get("name").as_text(), Some("double"));
        assert_eq!(help.get("type").as_text(), Some("function"));
    }
}
