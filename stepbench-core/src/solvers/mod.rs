//! Optimizer update rules and step-size schedules.

pub mod adam;
pub mod gd;
pub mod schedule;

pub use adam::Adam;
pub use gd::GradientDescent;
pub use schedule::LearningRateSchedule;

/// In-place parameter update driven by a gradient.
///
/// Implementors own their optimizer memory (moment estimates, step counter)
/// and advance it once per `update`.
pub trait UpdateRule {
    /// Apply one update to `params` using `grad`. Both have the same length.
    fn update(&mut self, params: &mut [f64], grad: &[f64]);

    /// Step size that the next `update` will use.
    fn learning_rate(&self) -> f64;

    /// Number of updates applied since construction or the last `reset`.
    fn steps_taken(&self) -> usize;

    /// Forget all optimizer memory.
    fn reset(&mut self);
}

impl<U: UpdateRule + ?Sized> UpdateRule for Box<U> {
    fn update(&mut self, params: &mut [f64], grad: &[f64]) {
        (**self).update(params, grad)
    }

    fn learning_rate(&self) -> f64 {
        (**self).learning_rate()
    }

    fn steps_taken(&self) -> usize {
        (**self).steps_taken()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
