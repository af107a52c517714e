//! Backends own the gradient buffer and the optimizer memory for a run.
//!
//! The harness only talks to this trait: clear the gradient, evaluate the
//! loss, accumulate its gradient, then apply one update.

mod analytic;
mod autodiff;

pub use analytic::AnalyticBackend;
pub use autodiff::AutodiffBackend;

use crate::error::{HarnessError, Result};
use crate::state::ParameterState;

/// Differentiation and update machinery for objectives of type `O`.
pub trait Backend<O: ?Sized> {
    /// Reset the accumulated gradient to zero.
    fn zero_grad(&mut self);

    /// Evaluate the loss at `state` and remember what `backward` needs.
    fn forward(&mut self, objective: &O, state: &ParameterState) -> Result<f64>;

    /// Add d(loss)/d(state) of the last `forward` into the gradient buffer.
    ///
    /// Each `forward` enables exactly one `backward`.
    fn backward(&mut self, objective: &O, state: &ParameterState) -> Result<()>;

    /// Accumulated gradient.
    fn gradient(&self) -> &[f64];

    /// Apply one update to `state` in place.
    fn step(&mut self, state: &mut ParameterState) -> Result<()>;

    /// Step size the next `step` will use.
    fn learning_rate(&self) -> f64;
}

impl<O: ?Sized, B: Backend<O> + ?Sized> Backend<O> for &mut B {
    fn zero_grad(&mut self) {
        (**self).zero_grad()
    }

    fn forward(&mut self, objective: &O, state: &ParameterState) -> Result<f64> {
        (**self).forward(objective, state)
    }

    fn backward(&mut self, objective: &O, state: &ParameterState) -> Result<()> {
        (**self).backward(objective, state)
    }

    fn gradient(&self) -> &[f64] {
        (**self).gradient()
    }

    fn step(&mut self, state: &mut ParameterState) -> Result<()> {
        (**self).step(state)
    }

    fn learning_rate(&self) -> f64 {
        (**self).learning_rate()
    }
}

pub(crate) fn check_dim(expected: Option<usize>, state: &ParameterState) -> Result<()> {
    match expected {
        Some(expected) if expected != state.len() => Err(HarnessError::ShapeMismatch {
            expected,
            actual: state.len(),
        }),
        _ => Ok(()),
    }
}

pub(crate) fn check_loss(loss: f64) -> Result<f64> {
    if loss.is_finite() {
        Ok(loss)
    } else {
        Err(HarnessError::NonDifferentiable {
            reason: format!("loss evaluated to {loss}"),
        })
    }
}

pub(crate) fn check_gradient(grad: &[f64]) -> Result<()> {
    match grad.iter().position(|g| !g.is_finite()) {
        Some(i) => Err(HarnessError::NonDifferentiable {
            reason: format!("gradient entry {i} is {}", grad[i]),
        }),
        None => Ok(()),
    }
}

pub(crate) fn check_state(state: &ParameterState) -> Result<()> {
    match state.first_non_finite() {
        Some(index) => Err(HarnessError::Diverged { index }),
        None => Ok(()),
    }
}
