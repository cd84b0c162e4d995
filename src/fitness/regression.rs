//! Symbolic regression objective
//!
//! Mean squared error of a program against sampled target points.

use crate::fitness::objective::Objective;
use crate::tree::compile::CompiledExpr;

/// Single-variable least-squares regression over fixed sample points
#[derive(Clone, Debug)]
pub struct LeastSquaresRegression {
    points: Vec<(f64, f64)>,
}

impl LeastSquaresRegression {
    /// Create a regression objective from `(x, y)` sample points
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        assert!(!points.is_empty(), "regression needs at least one sample point");
        Self { points }
    }

    /// Sample a target function at the given inputs
    pub fn from_target<F>(target: F, inputs: impl IntoIterator<Item = f64>) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self::new(inputs.into_iter().map(|x| (x, target(x))).collect())
    }

    /// The classic cubic benchmark `5x^3 - 6x^2 + 8x - 1`
    ///
    /// Sampled at the 20 points x = -1.0, -0.9, ..., 0.9.
    pub fn cubic() -> Self {
        Self::from_target(
            |x| 5.0 * x * x * x - 6.0 * x * x + 8.0 * x - 1.0,
            (-10..10).map(|i| f64::from(i) / 10.0),
        )
    }

    /// The sample points being fit
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

impl Objective for LeastSquaresRegression {
    fn evaluate(&self, program: &CompiledExpr<'_>) -> Vec<f64> {
        let sum: f64 = self
            .points
            .iter()
            .map(|&(x, y)| {
                let diff = program.call(&[x]) - y;
                diff * diff
            })
            .sum();
        vec![sum / self.points.len() as f64]
    }
}
