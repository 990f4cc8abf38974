//! Structured errors for the calculator engine
//!
//! Errors never crash the engine. They are values that propagate through
//! evaluation and carry enough information for a caller to display or
//! correct the problem.

use crate::{DateError, FormatError, RadixError};
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNDEFINED_VAR: &str = "UNDEFINED_VAR";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const UNDEFINED_FIELD: &str = "UNDEFINED_FIELD";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const NON_FINITE: &str = "NON_FINITE";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const INVALID_DIGIT: &str = "INVALID_DIGIT";
    pub const INTERNAL: &str = "INTERNAL";
    // Date-specific error codes
    pub const INVALID_DATE: &str = "INVALID_DATE";
    pub const DATE_OVERFLOW: &str = "DATE_OVERFLOW";
    pub const DATE_PARSE_ERROR: &str = "DATE_PARSE_ERROR";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Computation continued with a degraded result
    Warning,
    /// This evaluation failed
    Error,
    /// Engine invariant broken, no further evaluation possible
    Fatal,
}

/// Context about where an error occurred
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Expression text that caused the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    /// Character offset in the expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,

    /// Propagation notes
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured calculator error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    /// Severity level
    pub severity: Severity,
}

impl CalcError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set expression context
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.expression = Some(expression.into());
        self
    }

    /// Builder: set character position
    pub fn at_position(mut self, position: usize) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.position = Some(position);
        self
    }

    /// Builder: add propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Check expression syntax")
    }

    pub fn undefined_var(name: &str) -> Self {
        Self::new(codes::UNDEFINED_VAR, format!("Undefined variable: {}", name))
            .with_suggestion(format!("Define '{}' or check spelling", name))
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use help() to list available functions")
    }

    pub fn undefined_field(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FIELD, format!("Undefined field: {}", name))
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(codes::TYPE_ERROR, format!("Expected {}, got {}", expected, got))
            .with_suggestion(format!("Convert value to {} or check expression", expected))
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got))
            .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got))
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn non_finite() -> Self {
        Self::new(codes::NON_FINITE, "Result is not a finite number")
            .with_suggestion("Check for division by zero or out-of-domain input")
    }

    pub fn unknown_unit(unit: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit: {}", unit))
            .with_suggestion("Use list_units() for the unit catalog")
    }

    pub fn incompatible_units(from: &str, to: &str) -> Self {
        Self::new(codes::INCOMPATIBLE_UNITS,
            format!("Cannot convert between {} and {}", from, to))
            .with_suggestion("Both units must measure the same quantity")
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }

    // ========== Date Error Constructors ==========

    pub fn invalid_date(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_DATE, format!("Invalid date: {}", details.into()))
            .with_suggestion("Check date components (month 1-12, day 1-31)")
    }

    pub fn date_overflow() -> Self {
        Self::new(codes::DATE_OVERFLOW, "Date out of supported range")
    }

    pub fn date_parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::DATE_PARSE_ERROR, format!("Date parse error: {}", details.into()))
            .with_suggestion("Use ISO 8601 format (YYYY-MM-DD)")
    }
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for CalcError {}

impl From<FormatError> for CalcError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::NonFinite => Self::non_finite(),
        }
    }
}

impl From<RadixError> for CalcError {
    fn from(err: RadixError) -> Self {
        match err {
            RadixError::Empty => Self::new(codes::INVALID_DIGIT, "Empty digit string"),
            RadixError::InvalidDigit(c, radix) => Self::new(codes::INVALID_DIGIT,
                format!("Invalid digit '{}' for base {}", c, radix)),
            RadixError::Overflow(radix) => Self::new(codes::INVALID_DIGIT,
                format!("Base-{} value does not fit in 64 bits", radix)),
        }
    }
}

impl From<DateError> for CalcError {
    fn from(err: DateError) -> Self {
        match err {
            DateError::InvalidMonth(m) => Self::invalid_date(format!("month {} out of range 1-12", m)),
            DateError::InvalidDay(d, m, y) => Self::invalid_date(format!("day {} invalid for {}-{:02}", d, y, m)),
            DateError::ParseError(s) => Self::date_parse_error(s),
            DateError::Overflow => Self::date_overflow(),
        }
    }
}
