use crate::autodiff::Tape;
use crate::error::{HarnessError, Result};
use crate::problems::Objective;
use crate::solvers::{Adam, UpdateRule};
use crate::state::ParameterState;

use super::{check_dim, check_gradient, check_loss, check_state, Backend};

/// Reverse-mode backend: `forward` records the objective on a tape,
/// `backward` sweeps it.
///
/// The tape is cleared at every `forward` and its allocations reused, so a
/// long run does not grow memory.
#[derive(Debug)]
pub struct AutodiffBackend<U = Adam> {
    tape: Tape,
    pending: Option<usize>,
    grad: Vec<f64>,
    rule: U,
}

impl Default for AutodiffBackend<Adam> {
    fn default() -> Self {
        Self::new(Adam::default())
    }
}

impl<U: UpdateRule> AutodiffBackend<U> {
    pub fn new(rule: U) -> Self {
        Self {
            tape: Tape::new(),
            pending: None,
            grad: Vec::new(),
            rule,
        }
    }

    pub fn rule(&self) -> &U {
        &self.rule
    }

    pub fn into_rule(self) -> U {
        self.rule
    }

    /// Nodes recorded by the last `forward`.
    pub fn tape_len(&self) -> usize {
        self.tape.len()
    }

    /// Gradient accumulated since the last `zero_grad`.
    pub fn gradient(&self) -> &[f64] {
        &self.grad
    }
}

impl<O, U> Backend<O> for AutodiffBackend<U>
where
    O: Objective + ?Sized,
    U: UpdateRule,
{
    fn zero_grad(&mut self) {
        self.grad.fill(0.0);
    }

    fn forward(&mut self, objective: &O, state: &ParameterState) -> Result<f64> {
        check_dim(objective.dim(), state)?;
        if self.grad.len() != state.len() {
            self.grad.clear();
            self.grad.resize(state.len(), 0.0);
        }

        self.pending = None;
        self.tape.clear();
        // Leaves first, so their adjoints are the leading entries.
        let (index, loss) = {
            let x = self.tape.vars(state.as_slice());
            let out = objective.evaluate(&self.tape, &x);
            (out.index(), out.value())
        };
        let loss = check_loss(loss)?;
        self.pending = Some(index);
        Ok(loss)
    }

    fn backward(&mut self, _objective: &O, state: &ParameterState) -> Result<()> {
        let output = self.pending.take().ok_or(HarnessError::MissingForward)?;
        let adjoints = self.tape.gradient_of(output);

        let n = state.len();
        let mut fresh = Vec::with_capacity(n);
        fresh.extend(adjoints.leading(n));
        check_gradient(&fresh)?;

        for (g, d) in self.grad.iter_mut().zip(fresh) {
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
    use crate::problems::{Quadratic, Rosenbrock};
    use crate::solvers::GradientDescent;
    use approx::assert_relative_eq;

    #[test]
    fn backward_without_forward_fails() {
        let mut backend = AutodiffBackend::new(Adam::default());
        let state = ParameterState::zeros(2);
        let err = Backend::<Rosenbrock>::backward(&mut backend, &Rosenbrock::default(), &state)
            .unwrap_err();
        assert!(matches!(err, HarnessError::MissingForward));
    }

    #[test]
    fn gradient_accumulates_until_zeroed() {
        let f = Rosenbrock::default();
        let state = ParameterState::new(vec![0.0, 0.0]);
        let mut backend = AutodiffBackend::new(Adam::default());

        backend.forward(&f, &state).unwrap();
        backend.backward(&f, &state).unwrap();
        assert_relative_eq!(backend.gradient()[0], -2.0);

        backend.forward(&f, &state).unwrap();
        backend.backward(&f, &state).unwrap();
        assert_relative_eq!(backend.gradient()[0], -4.0);

        Backend::<Rosenbrock>::zero_grad(&mut backend);
        assert_eq!(backend.gradient(), &[0.0, 0.0]);
    }

    #[test]
    fn gradient_descent_step_on_quadratic() {
        let f = Quadratic { a: 2.0, b: 4.0 };
        let mut state = ParameterState::new(vec![3.0]);
        let mut backend = AutodiffBackend::new(GradientDescent::new(0.25));

        let loss = backend.forward(&f, &state).unwrap();
        backend.backward(&f, &state).unwrap();
        let g = backend.gradient()[0];
        Backend::<Quadratic>::step(&mut backend, &mut state).unwrap();

        assert_relative_eq!(loss, f.value(&[3.0]));
        assert_relative_eq!(state[0], 3.0 - 0.25 * g);
    }

    #[test]
    fn tape_is_reused_between_forwards() {
        let f = Rosenbrock::default();
        let state = ParameterState::new(vec![0.5, 0.5]);
        let mut backend = AutodiffBackend::new(Adam::default());
        backend.forward(&f, &state).unwrap();
        let first = backend.tape_len();
        backend.forward(&f, &state).unwrap();
        assert_eq!(backend.tape_len(), first);
    }
}
