//! Evaluation Context

use crate::PluginRegistry;
use reckon_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// How trig functions interpret their angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Plain math semantics; the graphing mode always uses this
    #[default]
    Radians,
    /// Scientific-mode selector: inputs and inverse outputs in degrees
    Degrees,
}

impl AngleMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rad" | "radians" => Some(AngleMode::Radians),
            "deg" | "degrees" => Some(AngleMode::Degrees),
            _ => None,
        }
    }
}

/// Evaluation context passed to plugins
pub struct EvalContext {
    pub angle_mode: AngleMode,
    pub variables: HashMap<String, Value>,
    pub registry: Arc<PluginRegistry>,
}

impl EvalContext {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            angle_mode: AngleMode::Radians,
            variables: HashMap::new(),
            registry,
        }
    }

    pub fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.angle_mode = angle_mode;
        self
    }

    pub fn with_variables(mut self, vars: HashMap<String, Value>) -> Self {
        self.variables = vars;
        self
    }

    /// Resolve a variable, falling back to registered constants (pi, e, phi)
    pub fn get_var(&self, name: &str) -> Value {
        if let Some(v) = self.variables.get(name) {
            return v.clone();
        }
        if let Some(constant) = self.registry.get_constant(name) {
            return Value::Number(constant.value);
        }
        Value::Error(reckon_core::CalcError::undefined_var(name))
    }

    pub fn set_var(&mut self, name: String, value: Value) {
        self.variables.insert(name, value);
    }
}
