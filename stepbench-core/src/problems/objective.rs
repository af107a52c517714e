use crate::autodiff::{Tape, Var};

/// Objective function to be minimized, differentiated through a [`Tape`].
///
/// - `evaluate` builds the scalar loss from the recorded parameters
/// - `dim` declares the parameter count, if the objective has a fixed one
pub trait Objective {
    /// Number of parameters the objective accepts, or `None` for any.
    fn dim(&self) -> Option<usize> {
        None
    }

    /// Record f(x) on `tape`.
    ///
    /// `x` has already been checked against `dim`.
    fn evaluate<'t>(&self, tape: &'t Tape, x: &[Var<'t>]) -> Var<'t>;

    /// Plain function value f(x), evaluated on a throwaway tape.
    ///
    /// # Panics
    ///
    /// If `dim` is `Some(n)` and `x.len() != n`. The harness checks the
    /// dimension itself and reports a shape mismatch instead.
    fn value(&self, x: &[f64]) -> f64 {
        if let Some(n) = self.dim() {
            assert_eq!(x.len(), n, "objective expects {n} parameters, got {}", x.len());
        }
        let tape = Tape::with_capacity(x.len() + 1, 0);
        let vars = tape.vars(x);
        self.evaluate(&tape, &vars).value()
    }
}

/// Objective with a hand-written gradient.
///
/// In `gradient` the implementor writes ∇f(x) into the buffer, which is
/// pre-sized to `x.len()`.
pub trait AnalyticObjective {
    /// Number of parameters the objective accepts, or `None` for any.
    fn expected_dim(&self) -> Option<usize> {
        None
    }

    /// Function value f(x) at x.
    fn cost(&self, x: &[f64]) -> f64;

    /// Write the gradient ∇f(x) at x into grad.
    fn gradient(&self, x: &[f64], grad: &mut [f64]);
}

impl<T: Objective + ?Sized> Objective for &T {
    fn dim(&self) -> Option<usize> {
        (**self).dim()
    }

    fn evaluate<'t>(&self, tape: &'t Tape, x: &[Var<'t>]) -> Var<'t> {
        (**self).evaluate(tape, x)
    }
}
