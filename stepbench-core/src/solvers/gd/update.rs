use crate::solvers::UpdateRule;

use super::types::GradientDescent;

impl UpdateRule for GradientDescent {
    fn update(&mut self, params: &mut [f64], grad: &[f64]) {
        debug_assert_eq!(params.len(), grad.len());
        let step_size = self.schedule.rate(self.t);
        self.t += 1;
        // x <- x + step_size * (-grad)
        for (x, g) in params.iter_mut().zip(grad) {
            *x -= step_size * g;
        }
    }

    fn learning_rate(&self) -> f64 {
        self.schedule.rate(self.t)
    }

    fn steps_taken(&self) -> usize {
        self.t
    }

    fn reset(&mut self) {
        self.t = 0;
    }
}
