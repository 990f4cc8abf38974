//! Reckon - Calculator Engine
//!
//! Parses infix expressions into an AST, evaluates them over the
//! plugin registry, and keeps the session history/memory the calculator
//! front-ends share. The graphing sampler and the tool server both sit
//! on top of this crate.

mod ast;
mod eval;
mod lexer;
mod parser;
mod session;

pub use ast::{BinOp, Expr, UnaryOp};
pub use eval::Evaluator;
pub use parser::parse_expression;
pub use session::{History, HistoryEntry, Memory, Session, DEFAULT_HISTORY_LIMIT};

use reckon_core::{format, Value};
use reckon_plugin::{AngleMode, EvalContext, PluginRegistry};
use std::sync::Arc;

/// Main calculator engine
pub struct Reckon {
    registry: Arc<PluginRegistry>,
    angle_mode: AngleMode,
    session: Session,
}

impl Reckon {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            angle_mode: AngleMode::Radians,
            session: Session::default(),
        }
    }

    /// Engine with the standard math functions, constants, and `convert()`
    pub fn with_standard_library() -> Self {
        Self::new(reckon_units::load_unit_library(reckon_std::standard_registry()))
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.session = Session::new(limit);
        self
    }

    pub fn registry(&self) -> Arc<PluginRegistry> {
        self.registry.clone()
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle_mode = mode;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Evaluate an expression and record it in the history.
    ///
    /// Failures come back as `Value::Error`, never as a panic.
    pub fn calculate(&mut self, expression: &str) -> Value {
        let result = self.evaluate(expression);
        self.session.record(expression, &result);
        result
    }

    /// Evaluate an expression without touching the history
    pub fn evaluate(&self, expression: &str) -> Value {
        let expr = match parse_expression(expression) {
            Ok(e) => e,
            Err(e) => return Value::Error(e),
        };
        let ctx = EvalContext::new(self.registry.clone()).with_angle_mode(self.angle_mode);
        Evaluator::new().eval_expr(&expr, &ctx)
    }

    /// Evaluate a single-variable function at a sample point.
    ///
    /// Always radian semantics, independent of the engine's angle mode.
    pub fn evaluate_at(&self, function_text: &str, x: f64) -> Value {
        let expr = match parse_expression(function_text) {
            Ok(e) => e,
            Err(e) => return Value::Error(e),
        };
        let mut ctx = EvalContext::new(self.registry.clone());
        ctx.set_var("x".to_string(), Value::Number(x));
        Evaluator::new().eval_expr(&expr, &ctx)
    }

    /// Display string for a result, error marker for non-finite values
    pub fn format(&self, x: f64) -> String {
        format::display(x)
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        self.registry.help(name)
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        self.registry.list_functions(category)
    }

    pub fn list_constants(&self) -> Value {
        self.registry.list_constants()
    }
}

impl Default for Reckon {
    fn default() -> Self {
        Self::with_standard_library()
    }
}
