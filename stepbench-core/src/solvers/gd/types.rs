use crate::solvers::schedule::LearningRateSchedule;

/// Plain gradient descent: x <- x - lr * grad.
#[derive(Clone, Debug, Default)]
pub struct GradientDescent {
    /// Learning rate / step size.
    pub schedule: LearningRateSchedule,
    pub(super) t: usize,
}

impl GradientDescent {
    pub fn new(step_size: f64) -> Self {
        Self::with_schedule(LearningRateSchedule::constant(step_size))
    }

    pub fn with_schedule(schedule: LearningRateSchedule) -> Self {
        Self { schedule, t: 0 }
    }
}
