use crate::error::{HarnessError, Result};
use crate::problems::AnalyticObjective;
use crate::solvers::{Adam, UpdateRule};
use crate::state::ParameterState;

use super::{check_dim, check_gradient, check_loss, check_state, Backend};

/// Backend for objectives that supply their own gradient.
#[derive(Debug)]
pub struct AnalyticBackend<U = Adam> {
    pending: bool,
    grad: Vec<f64>,
    scratch: Vec<f64>,
    rule: U,
}

impl Default for AnalyticBackend<Adam> {
    fn default() -> Self {
        Self::new(Adam::default())
    }
}

impl<U: UpdateRule> AnalyticBackend<U> {
    pub fn new(rule: U) -> Self {
        Self {
            pending: false,
            grad: Vec::new(),
            scratch: Vec::new(),
            rule,
        }
    }

    pub fn rule(&self) -> &U {
        &self.rule
    }

    pub fn into_rule(self) -> U {
        self.rule
    }

    /// Gradient accumulated since the last `zero_grad`.
    pub fn gradient(&self) -> &[f64] {
        &self.grad
    }
}

impl<O, U> Backend<O> for AnalyticBackend<U>
where
    O: AnalyticObjective + ?Sized,
    U: UpdateRule,
{
    fn zero_grad(&mut self) {
        self.grad.fill(0.0);
    }

    fn forward(&mut self, objective: &O, state: &ParameterState) -> Result<f64> {
        check_dim(objective.expected_dim(), state)?;
        if self.grad.len() != state.len() {
            self.grad.clear();
            self.grad.resize(state.len(), 0.0);
        }
        self.pending = false;
        let loss = check_loss(objective.cost(state.as_slice()))?;
        self.pending = true;
        Ok(loss)
    }

    fn backward(&mut self, objective: &O, state: &ParameterState) -> Result<()> {
        if !std::mem::take(&mut self.pending) {
            return Err(HarnessError::MissingForward);
        }
        self.scratch.clear();
        self.scratch.resize(state.len(), 0.0);
        objective.gradient(state.as_slice(), &mut self.scratch);
        check_gradient(&self.scratch)?;

        for (g, d) in self.grad.iter_mut().zip(&self.scratch) {
            *g += d;
        }
        Ok(())
    }

    fn gradient(&self) -> &[f64] {
        &self.grad
    }

    fn step(&mut self, state: &mut ParameterState) -> Result<()> {
        if self.grad.len() != state.len() {
            return Err(HarnessError::MissingForward);
        }
        self.rule.update(state.as_mut_slice(), &self.grad);
        check_state(state)
    }

    fn learning_rate(&self) -> f64 {
        self.rule.learning_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::Rosenbrock;
    use crate::solvers::GradientDescent;
    use approx::assert_relative_eq;

    struct Cone;

    impl AnalyticObjective for Cone {
        fn expected_dim(&self) -> Option<usize> {
            Some(1)
        }

        fn cost(&self, x: &[f64]) -> f64 {
            x[0].abs()
        }

        fn gradient(&self, x: &[f64], grad: &mut [f64]) {
            grad[0] = if x[0] == 0.0 { f64::NAN } else { x[0].signum() };
        }
    }

    #[test]
    fn matches_rosenbrock_gradient() {
        let f = Rosenbrock::default();
        let state = ParameterState::new(vec![-10.0, 10.0]);
        let mut backend = AnalyticBackend::new(Adam::default());
        let loss = backend.forward(&f, &state).unwrap();
        backend.backward(&f, &state).unwrap();

        assert_eq!(loss, 121.0 + 100.0 * 90.0 * 90.0);
        let g = backend.gradient();
        assert_relative_eq!(g[0], -22.0 - 400.0 * 10.0 * 90.0);
        assert_relative_eq!(g[1], -200.0 * 90.0);
    }

    #[test]
    fn nan_gradient_is_non_differentiable() {
        let state = ParameterState::zeros(1);
        let mut backend = AnalyticBackend::new(Adam::default());
        backend.forward(&Cone, &state).unwrap();
        let err = backend.backward(&Cone, &state).unwrap_err();
        assert!(matches!(err, HarnessError::NonDifferentiable { .. }));
    }

    #[test]
    fn declared_dimension_is_enforced() {
        let state = ParameterState::zeros(3);
        let mut backend = AnalyticBackend::new(Adam::default());
        let err = backend.forward(&Cone, &state).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::ShapeMismatch {
                expected: 1,
                actual: 3
            }
        ));
    }

    #[test]
    fn overflowing_step_is_divergence() {
        struct Slope;

        impl AnalyticObjective for Slope {
            fn cost(&self, x: &[f64]) -> f64 {
                1e300 * x[0]
            }

            fn gradient(&self, _x: &[f64], grad: &mut [f64]) {
                grad[0] = 1e300;
            }
        }

        let mut state = ParameterState::zeros(1);
        let mut backend = AnalyticBackend::new(GradientDescent::new(1e10));
        backend.forward(&Slope, &state).unwrap();
        backend.backward(&Slope, &state).unwrap();
        let err = Backend::<Slope>::step(&mut backend, &mut state).unwrap_err();
        assert!(matches!(err, HarnessError::Diverged { index: 0 }));
    }
}
