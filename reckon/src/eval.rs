//! Expression evaluator
//!
//! Tree-walking interpreter over the parsed AST. Arithmetic is plain
//! f64, so division by zero flows through as an infinity (or NaN for
//! 0/0) rather than an error; the display layer turns non-finite
//! results into the error marker.

use crate::ast::{BinOp, Expr, UnaryOp};
use reckon_core::{CalcError, Value};
use reckon_plugin::EvalContext;

pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate an expression against a context
    pub fn eval_expr(&self, expr: &Expr, ctx: &EvalContext) -> Value {
        match expr {
            Expr::Number(n) => Value::Number(*n),

            Expr::StringLiteral(s) => Value::Text(s.clone()),

            Expr::Variable(name) => ctx.get_var(name),

            Expr::BinaryOp(left, op, right) => {
                let l = self.eval_expr(left, ctx);
                let r = self.eval_expr(right, ctx);
                self.eval_binary_op(l, *op, r)
            }

            Expr::UnaryOp(op, inner) => {
                let v = self.eval_expr(inner, ctx);
                self.eval_unary_op(*op, v)
            }

            Expr::FunctionCall(name, args) => {
                let evaluated: Vec<Value> = args.iter().map(|a| self.eval_expr(a, ctx)).collect();
                ctx.registry.call_function(name, &evaluated, ctx)
            }
        }
    }

    fn eval_binary_op(&self, left: Value, op: BinOp, right: Value) -> Value {
        // Propagate errors
        if let Value::Error(e) = &left {
            return Value::Error(e.clone().with_note("from left operand"));
        }
        if let Value::Error(e) = &right {
            return Value::Error(e.clone().with_note("from right operand"));
        }

        let l = match left.as_number() {
            Some(n) => n,
            None => return Value::Error(CalcError::type_error("Number", left.type_name())),
        };
        let r = match right.as_number() {
            Some(n) => n,
            None => return Value::Error(CalcError::type_error("Number", right.type_name())),
        };

        match op {
            BinOp::Add => Value::Number(l + r),
            BinOp::Sub => Value::Number(l - r),
            BinOp::Mul => Value::Number(l * r),
            BinOp::Div => Value::Number(l / r),
            BinOp::Pow => Value::Number(l.powf(r)),
        }
    }

    fn eval_unary_op(&self, op: UnaryOp, value: Value) -> Value {
        if let Value::Error(e) = &value {
            return Value::Error(e.clone());
        }

        match op {
            UnaryOp::Neg => match value.as_number() {
                Some(n) => Value::Number(-n),
                None => Value::Error(CalcError::type_error("Number", value.type_name())),
            },
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;
    use reckon_plugin::PluginRegistry;
    use std::sync::Arc;

    fn eval(input: &str) -> Value {
        let registry = Arc::new(reckon_std::standard_registry());
        let ctx = EvalContext::new(registry);
        let expr = parse_expression(input).unwrap();
        Evaluator::new().eval_expr(&expr, &ctx)
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        assert_eq!(eval("10 / 0"), Value::Number(f64::INFINITY));
        assert_eq!(eval("-10 / 0"), Value::Number(f64::NEG_INFINITY));
        match eval("0 / 0") {
            Value::Number(n) => assert!(n.is_nan()),
            other => panic!("expected NaN number, got {other:?}"),
        }
    }

    #[test]
    fn test_power_operator() {
        assert_eq!(eval("2 ^ 10"), Value::Number(1024.0));
        assert_eq!(eval("2 ^ -1"), Value::Number(0.5));
        assert_eq!(eval("9 ^ 0.5"), Value::Number(3.0));
    }

    #[test]
    fn test_error_propagates_with_note() {
        match eval("nothing + 1") {
            Value::Error(e) => {
                assert_eq!(e.code, reckon_core::codes::UNDEFINED_VAR);
                assert!(e.context.unwrap().notes.contains(&"from left operand".to_string()));
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_function_dispatch() {
        assert_eq!(eval("sqrt(16)"), Value::Number(4.0));
        assert_eq!(eval("abs(-3)"), Value::Number(3.0));
    }

    #[test]
    fn test_unknown_function_is_error() {
        let registry = Arc::new(PluginRegistry::new());
        let ctx = EvalContext::new(registry);
        let expr = parse_expression("mystery(1)").unwrap();
        let r = Evaluator::new().eval_expr(&expr, &ctx);
        match r {
            Value::Error(e) => assert_eq!(e.code, reckon_core::codes::UNDEFINED_FUNC),
            other => panic!("expected error, got {other:?}"),
        }
    }
}
