//! Reckon Graph - Plot sampling
//!
//! Samples a single-variable function over a window and keeps only the
//! points a chart can draw. The function text is parsed once; each
//! sample binds `x` and interprets the tree. Samples whose y is
//! non-finite or outside the vertical window are dropped silently, so a
//! partially defined curve (ln(x), sqrt(x), tan(x)) still renders
//! where it exists.

use reckon::{parse_expression, Evaluator};
use reckon_core::Value;
use reckon_plugin::{EvalContext, PluginRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Samples taken across the horizontal window, endpoints included
pub const SAMPLE_COUNT: usize = 101;

/// One drawable point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// The visible plot window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotRange {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }
}

/// Sample a function over the window.
///
/// Unparseable function text yields an empty plot; individual failed
/// samples are skipped. Sample positions are computed by index
/// (`x_min + step * i`) so the right endpoint is hit exactly.
pub fn sample_plot(
    function_text: &str,
    range: PlotRange,
    registry: Arc<PluginRegistry>,
) -> Vec<PlotPoint> {
    let expr = match parse_expression(function_text) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let step = (range.x_max - range.x_min) / (SAMPLE_COUNT - 1) as f64;
    let evaluator = Evaluator::new();
    let mut ctx = EvalContext::new(registry);
    let mut points = Vec::with_capacity(SAMPLE_COUNT);

    for i in 0..SAMPLE_COUNT {
        let x = range.x_min + step * i as f64;
        ctx.set_var("x".to_string(), Value::Number(x));
        if let Value::Number(y) = evaluator.eval_expr(&expr, &ctx) {
            if y.is_finite() && y >= range.y_min && y <= range.y_max {
                points.push(PlotPoint { x, y });
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot(text: &str, range: PlotRange) -> Vec<PlotPoint> {
        let registry = Arc::new(reckon_std::standard_registry());
        sample_plot(text, range, registry)
    }

    #[test]
    fn test_parabola_window() {
        let points = plot("x^2", PlotRange::new(-2.0, 2.0, 0.0, 10.0));
        // x = 0 is sample 50; the vertex is included with y = 0.
        let vertex = points
            .iter()
            .min_by(|a, b| a.x.abs().partial_cmp(&b.x.abs()).unwrap())
            .unwrap();
        assert!(vertex.x.abs() < 1e-12);
        assert!(vertex.y.abs() < 1e-12);
        assert!(points.iter().all(|p| p.y <= 10.0));
    }

    #[test]
    fn test_sample_positions_hit_endpoints() {
        let points = plot("x", PlotRange::new(-1.0, 1.0, -2.0, 2.0));
        assert_eq!(points.len(), SAMPLE_COUNT);
        assert_eq!(points.first().unwrap().x, -1.0);
        assert_eq!(points.last().unwrap().x, 1.0);
    }

    #[test]
    fn test_out_of_window_samples_dropped() {
        // x^2 over [-2, 2] exceeds y = 2 for |x| > sqrt(2).
        let points = plot("x^2", PlotRange::new(-2.0, 2.0, 0.0, 2.0));
        assert!(points.len() < SAMPLE_COUNT);
        assert!(points.iter().all(|p| p.y <= 2.0));
    }

    #[test]
    fn test_partial_domain_skips_silently() {
        // ln(x) is NaN for x <= 0; only the right half survives.
        let points = plot("ln(x)", PlotRange::new(-5.0, 5.0, -10.0, 10.0));
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| p.x > 0.0));
    }

    #[test]
    fn test_unparseable_function_is_empty_plot() {
        let points = plot("x +* 2", PlotRange::new(-1.0, 1.0, -1.0, 1.0));
        assert!(points.is_empty());
    }

    #[test]
    fn test_undefined_name_is_empty_plot() {
        let points = plot("spline(x)", PlotRange::new(-1.0, 1.0, -1.0, 1.0));
        assert!(points.is_empty());
    }

    #[test]
    fn test_documented_vocabulary_evaluates() {
        let range = PlotRange::new(0.1, 2.0, -100.0, 100.0);
        for text in [
            "sin(x)", "cos(x)", "tan(x)", "log(x)", "ln(x)",
            "sqrt(x)", "abs(x)", "exp(x)", "x^2",
        ] {
            assert!(!plot(text, range).is_empty(), "no points for {text}");
        }
    }
}
