//! Closed-form test objectives: quadratic / Rosenbrock.

use crate::autodiff::{Tape, Var};

use super::objective::{AnalyticObjective, Objective};

/// 1D quadratic f(x) = 0.5 * a * x^2 - b * x, minimized at x* = b / a.
#[derive(Clone, Copy, Debug)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
}

impl Objective for Quadratic {
    fn dim(&self) -> Option<usize> {
        Some(1)
    }

    fn evaluate<'t>(&self, _tape: &'t Tape, x: &[Var<'t>]) -> Var<'t> {
        x[0].square() * (0.5 * self.a) - x[0] * self.b
    }
}

impl AnalyticObjective for Quadratic {
    fn expected_dim(&self) -> Option<usize> {
        Some(1)
    }

    fn cost(&self, x: &[f64]) -> f64 {
        0.5 * self.a * x[0] * x[0] - self.b * x[0]
    }

    fn gradient(&self, x: &[f64], grad: &mut [f64]) {
        // df/dx = a * x - b
        grad[0] = self.a * x[0] - self.b;
    }
}

/// 2D Rosenbrock function.
/// f(x, y) = (a - x)^2 + b (y - x^2)^2, minimized at (a, a^2).
#[derive(Clone, Copy, Debug)]
pub struct Rosenbrock {
    pub a: f64,
    pub b: f64,
}

impl Default for Rosenbrock {
    fn default() -> Self {
        Self { a: 1.0, b: 100.0 }
    }
}

impl Rosenbrock {
    pub fn minimizer(&self) -> [f64; 2] {
        [self.a, self.a * self.a]
    }
}

impl Objective for Rosenbrock {
    fn dim(&self) -> Option<usize> {
        Some(2)
    }

    fn evaluate<'t>(&self, _tape: &'t Tape, z: &[Var<'t>]) -> Var<'t> {
        let (x, y) = (z[0], z[1]);
        (self.a - x).square() + (y - x.square()).square() * self.b
    }
}

impl AnalyticObjective for Rosenbrock {
    fn expected_dim(&self) -> Option<usize> {
        Some(2)
    }

    fn cost(&self, z: &[f64]) -> f64 {
        let (x, y) = (z[0], z[1]);
        (self.a - x).powi(2) + self.b * (y - x * x).powi(2)
    }

    fn gradient(&self, z: &[f64], grad: &mut [f64]) {
        let (x, y) = (z[0], z[1]);
        // df/dx = -2(a - x) - 4b x (y - x^2)
        grad[0] = -2.0 * (self.a - x) - 4.0 * self.b * x * (y - x * x);
        // df/dy = 2b (y - x^2)
        grad[1] = 2.0 * self.b * (y - x * x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rosenbrock_tape_matches_closed_form() {
        let f = Rosenbrock::default();
        for z in [[-10.0, 10.0], [0.5, -0.25], [1.0, 1.0], [-1.2, 1.0]] {
            let tape = Tape::new();
            let vars = tape.vars(&z);
            let loss = f.evaluate(&tape, &vars);
            assert_relative_eq!(loss.value(), f.cost(&z));

            let mut expected = [0.0; 2];
            f.gradient(&z, &mut expected);
            let g = tape.gradient(loss).wrt_all(&vars);
            assert_relative_eq!(g[0], expected[0], max_relative = 1e-12);
            assert_relative_eq!(g[1], expected[1], max_relative = 1e-12);
        }
    }

    #[test]
    fn rosenbrock_minimum() {
        let f = Rosenbrock::default();
        assert_eq!(f.minimizer(), [1.0, 1.0]);
        assert_eq!(Objective::value(&f, &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn quadratic_tape_matches_closed_form() {
        let f = Quadratic { a: 2.0, b: 4.0 };
        let tape = Tape::new();
        let x = tape.var(0.5);
        let loss = f.evaluate(&tape, &[x]);
        assert_relative_eq!(loss.value(), f.cost(&[0.5]));
        assert_relative_eq!(tape.gradient(loss).wrt(x), 2.0 * 0.5 - 4.0);
    }

    #[test]
    #[should_panic(expected = "objective expects 2 parameters, got 1")]
    fn value_checks_dimension() {
        Objective::value(&Rosenbrock::default(), &[1.0]);
    }
}
