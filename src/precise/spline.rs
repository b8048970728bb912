//! Quadratic interpolating B-spline.
//!
//! Interior knots sit halfway between samples, the second and
//! second-to-last midpoints being omitted, with triple knots at both ends.
//! Queries outside the sampled domain extend the first or last polynomial piece.
use nalgebra::{DMatrix, DVector};

const DEGREE: usize = 2;

/// Quadratic spline interpolating `(t, y)` samples
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticSpline {
    knots: Vec<f64>,
    coefficients: Vec<f64>,
}

/// Knot vector for these strictly increasing abscissas (n >= 3).
fn knot_vector(t: &[f64]) -> Vec<f64> {
    let n = t.len();
    let mut knots = Vec::with_capacity(n + DEGREE + 1);
    knots.extend([t[0]; DEGREE + 1]);
    for i in 1..n - 2 {
        knots.push((t[i] + t[i + 1]) / 2.0);
    }
    knots.extend([t[n - 1]; DEGREE + 1]);
    knots
}

/// Index k of the knot span [knots[k], knots[k+1]) used to evaluate `x`.
/// Spans are clamped to the first and last valid ones.
fn knot_span(knots: &[f64], x: f64) -> usize {
    let n = knots.len() - DEGREE - 1;
    let inner = &knots[DEGREE..n];
    let count = inner.partition_point(|knot| *knot <= x);
    DEGREE + count.saturating_sub(1)
}

/// Non vanishing basis functions N(k-2), N(k-1), N(k) at `x`.
fn basis_functions(knots: &[f64], k: usize, x: f64) -> [f64; DEGREE + 1] {
    let mut n = [0.0; DEGREE + 1];
    let mut left = [0.0; DEGREE + 1];
    let mut right = [0.0; DEGREE + 1];
    n[0] = 1.0;

    for j in 1..=DEGREE {
        left[j] = x - knots[k + 1 - j];
        right[j] = knots[k + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

impl QuadraticSpline {
    /// Builds the interpolating spline. Abscissas must be strictly increasing.
    /// Returns None with less than 3 samples, or when samples cannot be interpolated.
    pub fn new(t: &[f64], y: &[f64]) -> Option<Self> {
        Self::new_multiple(t, &[y]).and_then(|mut splines| splines.pop())
    }

    /// Builds one spline per ordinate set, sharing abscissas `t`.
    /// The collocation system is factorized once.
    pub fn new_multiple(t: &[f64], ys: &[&[f64]]) -> Option<Vec<Self>> {
        let n = t.len();
        if n < DEGREE + 1 || ys.iter().any(|y| y.len() != n) {
            return None;
        }
        if t.windows(2).any(|w| w[1] <= w[0]) {
            return None;
        }

        let knots = knot_vector(t);

        let mut collocation = DMatrix::<f64>::zeros(n, n);
        for (i, x) in t.iter().enumerate() {
            let k = knot_span(&knots, *x);
            let basis = basis_functions(&knots, k, *x);
            for (j, value) in basis.iter().enumerate() {
                collocation[(i, k - DEGREE + j)] = *value;
            }
        }

        let lu = collocation.lu();

        ys.iter()
            .map(|y| {
                let rhs = DVector::from_column_slice(y);
                let coefficients = lu.solve(&rhs)?;
                Some(Self {
                    knots: knots.clone(),
                    coefficients: coefficients.iter().copied().collect(),
                })
            })
            .collect()
    }

    /// Evaluates the spline at `x`. Extrapolates outside of the sampled domain.
    pub fn eval(&self, x: f64) -> f64 {
        let k = knot_span(&self.knots, x);
        let basis = basis_functions(&self.knots, k, x);
        basis
            .iter()
            .enumerate()
            .map(|(j, b)| b * self.coefficients[k - DEGREE + j])
            .sum()
    }
}
