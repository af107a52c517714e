use crate::solvers::UpdateRule;

use super::types::Adam;

impl Adam {
    fn ensure_len(&mut self, len: usize) {
        if self.m.len() != len {
            self.m.clear();
            self.v.clear();
            self.m.resize(len, 0.0);
            self.v.resize(len, 0.0);
        }
    }
}

impl UpdateRule for Adam {
    fn update(&mut self, params: &mut [f64], grad: &[f64]) {
        debug_assert_eq!(params.len(), grad.len());
        self.ensure_len(params.len());

        let lr = self.schedule.rate(self.t);
        self.t += 1;
        let t = self.t as f64;
        let (b1, b2) = (self.beta1, self.beta2);

        let bias1 = 1.0 - b1.powf(t);
        let bias2 = 1.0 - b2.powf(t);

        for i in 0..params.len() {
            let g = grad[i];
            self.m[i] = b1 * self.m[i] + (1.0 - b1) * g;
            self.v[i] = b2 * self.v[i] + (1.0 - b2) * g * g;

            let m_hat = self.m[i] / bias1;
            let v_hat = self.v[i] / bias2;

            params[i] -= lr * m_hat / (v_hat.sqrt() + self.eps);
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
        self.m.clear();
        self.v.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_update_moves_by_learning_rate() {
        // With bias correction, m_hat = g and v_hat = g^2 on the first step.
        let mut adam = Adam::new(0.01);
        let mut x = vec![1.0, -2.0, 3.0];
        adam.update(&mut x, &[4.0, -0.5, 1e3]);

        assert_relative_eq!(x[0], 1.0 - 0.01, epsilon = 1e-9);
        assert_relative_eq!(x[1], -2.0 + 0.01, epsilon = 1e-9);
        assert_relative_eq!(x[2], 3.0 - 0.01, epsilon = 1e-9);
        assert_eq!(adam.steps_taken(), 1);
    }

    #[test]
    fn moments_track_gradient() {
        let mut adam = Adam::default();
        let mut x = vec![0.0];
        adam.update(&mut x, &[2.0]);
        assert_relative_eq!(adam.first_moment()[0], 0.2, max_relative = 1e-12);
        assert_relative_eq!(adam.second_moment()[0], 0.004, max_relative = 1e-12);

        adam.update(&mut x, &[2.0]);
        assert_relative_eq!(adam.first_moment()[0], 0.9 * 0.2 + 0.2, max_relative = 1e-12);
    }

    #[test]
    fn zero_gradient_leaves_parameters() {
        let mut adam = Adam::default();
        let mut x = vec![5.0, 6.0];
        adam.update(&mut x, &[0.0, 0.0]);
        assert_eq!(x, vec![5.0, 6.0]);
    }

    #[test]
    fn reset_forgets_moments() {
        let mut adam = Adam::default();
        let mut x = vec![0.0, 0.0];
        adam.update(&mut x, &[1.0, 1.0]);
        adam.reset();
        assert_eq!(adam.steps_taken(), 0);
        assert!(adam.first_moment().is_empty());
    }
}
