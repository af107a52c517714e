use crate::solvers::schedule::LearningRateSchedule;

/// Adam: Kingma, D. P. and Ba, J. "Adam: A method for stochastic
/// optimization", arXiv:1412.6980 (2014).
///
/// Holds the first/second moment estimates between updates. The moments are
/// sized lazily from the first parameter vector they see.
#[derive(Clone, Debug)]
pub struct Adam {
    /// Step size per update.
    pub schedule: LearningRateSchedule,
    /// Decay rate of the first moment estimate.
    pub beta1: f64,
    /// Decay rate of the second moment estimate.
    pub beta2: f64,
    /// Added to the denominator for numerical stability.
    pub eps: f64,
    pub(super) t: usize,
    pub(super) m: Vec<f64>,
    pub(super) v: Vec<f64>,
}

impl Adam {
    /// Adam with a constant step size and the usual betas.
    pub fn new(lr: f64) -> Self {
        Self::with_schedule(LearningRateSchedule::constant(lr))
    }

    pub fn with_schedule(schedule: LearningRateSchedule) -> Self {
        Self {
            schedule,
            beta1: 0.9,
            beta2: 0.999,
            eps: 1e-8,
            t: 0,
            m: Vec::new(),
            v: Vec::new(),
        }
    }

    pub fn betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    pub fn eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// First moment estimate (empty before the first update).
    pub fn first_moment(&self) -> &[f64] {
        &self.m
    }

    /// Second moment estimate (empty before the first update).
    pub fn second_moment(&self) -> &[f64] {
        &self.v
    }
}

impl Default for Adam {
    fn default() -> Self {
        Self::new(1e-3)
    }
}
