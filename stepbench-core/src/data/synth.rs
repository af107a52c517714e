use std::f64::consts::TAU;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::table::{read_vector, write_vector, Table};
use crate::error::FileFormatError;

/// Upper bound on the number of features that carry signal.
const MAX_INFORMATIVE: usize = 10;

/// Binary classification data: design matrix `x` and 0/1 labels `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct LogisticDataset {
    pub x: Table,
    pub y: Vec<f64>,
}

impl LogisticDataset {
    pub fn new(x: Table, y: Vec<f64>) -> Result<Self, FileFormatError> {
        if x.rows() != y.len() {
            return Err(FileFormatError::RowCountMismatch {
                rows: x.rows(),
                labels: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Random regression problem binarized at the median of its target.
    ///
    /// With `seed = None` the generator is seeded from the operating system
    /// and two calls produce different tables.
    pub fn generate(n_samples: usize, n_features: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (x, target) = make_regression(n_samples, n_features, &mut rng);
        let y = binarize_at_median(&target);
        info!(n_samples, n_features, ?seed, "generated logistic dataset");
        Self { x, y }
    }

    pub fn n_samples(&self) -> usize {
        self.x.rows()
    }

    pub fn n_features(&self) -> usize {
        self.x.cols()
    }

    pub fn write(
        &self,
        x_path: impl AsRef<Path>,
        y_path: impl AsRef<Path>,
    ) -> Result<(), FileFormatError> {
        self.x.write(x_path)?;
        write_vector(&self.y, y_path)
    }

    pub fn read(
        x_path: impl AsRef<Path>,
        y_path: impl AsRef<Path>,
    ) -> Result<Self, FileFormatError> {
        let x = Table::read(x_path)?;
        let y = read_vector(y_path)?;
        Self::new(x, y)
    }
}

/// Linear regression data with Gaussian features.
///
/// A random subset of at most ten features gets a coefficient drawn
/// uniformly from `[0, 100)`; the remaining coefficients are zero. The
/// target is `x · coef` without noise or bias.
pub fn make_regression<R: Rng>(
    n_samples: usize,
    n_features: usize,
    rng: &mut R,
) -> (Table, Vec<f64>) {
    let data: Vec<f64> = (0..n_samples * n_features)
        .map(|_| standard_normal(rng))
        .collect();
    let x = Table::from_row_major(n_samples, n_features, data);

    let mut coef = vec![0.0; n_features];
    let n_informative = n_features.min(MAX_INFORMATIVE);
    for j in index::sample(rng, n_features, n_informative) {
        coef[j] = 100.0 * rng.random::<f64>();
    }

    let target = x
        .iter_rows()
        .map(|row| row.iter().zip(&coef).map(|(a, b)| a * b).sum::<f64>())
        .collect();
    (x, target)
}

/// 1.0 where the value lies strictly above the median, 0.0 otherwise.
pub fn binarize_at_median(values: &[f64]) -> Vec<f64> {
    let m = median(values);
    values
        .iter()
        .map(|&v| if v > m { 1.0 } else { 0.0 })
        .collect()
}

/// Median; the mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        0.5 * (sorted[mid - 1] + sorted[mid])
    } else {
        sorted[mid]
    }
}

// Box-Muller transform.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_and_even_lengths() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn labels_split_at_median() {
        let y = binarize_at_median(&[0.3, -1.0, 5.0, 2.0]);
        assert_eq!(y, vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn regression_has_requested_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let (x, target) = make_regression(20, 4, &mut rng);
        assert_eq!(x.shape(), (20, 4));
        assert_eq!(target.len(), 20);
        assert!(x.as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn balanced_labels() {
        let data = LogisticDataset::generate(100, 100, Some(1));
        let positives = data.y.iter().filter(|&&v| v == 1.0).count();
        assert_eq!(positives, 50);
    }
}
