//! Reckon Standard Library
//!
//! The function vocabulary shared by the scientific keypad and the
//! graphing sampler, plus the named constants they can reference.

pub mod constants;
pub mod functions;

use reckon_plugin::PluginRegistry;

/// Load standard library into registry
pub fn load_standard_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(functions::Sin)
        .with_function(functions::Cos)
        .with_function(functions::Tan)
        .with_function(functions::Asin)
        .with_function(functions::Acos)
        .with_function(functions::Atan)
        .with_function(functions::Log)
        .with_function(functions::Ln)
        .with_function(functions::Sqrt)
        .with_function(functions::Cbrt)
        .with_function(functions::Pow)
        .with_function(functions::Exp)
        .with_function(functions::Abs)
        .with_function(functions::Floor)
        .with_function(functions::Ceil)
        .with_function(functions::Round)
        .with_constant(constants::pi())
        .with_constant(constants::e())
        .with_constant(constants::phi())
}

/// Create registry with standard library
pub fn standard_registry() -> PluginRegistry {
    load_standard_library(PluginRegistry::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_plugin::EvalContext;
    use reckon_core::Value;
    use std::sync::Arc;

    #[test]
    fn test_all_functions_registered() {
        let registry = standard_registry();
        for name in [
            "sin", "cos", "tan", "asin", "acos", "atan",
            "log", "ln", "sqrt", "cbrt", "pow", "exp",
            "abs", "floor", "ceil", "round",
        ] {
            assert!(
                registry.get_function(name).is_some(),
                "missing function: {name}"
            );
        }
    }

    #[test]
    fn test_constants_resolve_as_variables() {
        let registry = Arc::new(standard_registry());
        let ctx = EvalContext::new(registry);
        match ctx.get_var("pi") {
            Value::Number(n) => assert!((n - std::f64::consts::PI).abs() < 1e-15),
            other => panic!("expected number, got {other:?}"),
        }
        match ctx.get_var("phi") {
            Value::Number(n) => assert!((n - 1.618_033_988_749_895).abs() < 1e-12),
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn test_call_through_registry() {
        let registry = Arc::new(standard_registry());
        let ctx = EvalContext::new(registry.clone());
        let r = registry.call_function("sqrt", &[Value::Number(16.0)], &ctx);
        assert_eq!(r, Value::Number(4.0));
    }

    #[test]
    fn test_unknown_function_suggests_similar() {
        let registry = Arc::new(standard_registry());
        let ctx = EvalContext::new(registry.clone());
        let r = registry.call_function("sqrtt", &[Value::Number(4.0)], &ctx);
        match r {
            Value::Error(e) => {
                let s = e.suggestion.unwrap_or_default();
                assert!(s.contains("sqrt"), "suggestion was: {s}");
            }
            other => panic!("expected error, got {other:?}"),
        }
    }
}
