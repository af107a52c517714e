use serde::{Deserialize, Serialize};

use crate::autodiff::{sigmoid, softplus, Tape, Var};
use crate::data::{LogisticDataset, Table};
use crate::error::FileFormatError;

use super::objective::{AnalyticObjective, Objective};

/// How per-sample losses are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    /// Mean binary cross-entropy.
    #[default]
    Mean,
    /// Negative log-likelihood summed over samples.
    Sum,
}

/// One-layer logistic model without bias: p = sigmoid(X · w).
///
/// The loss is binary cross-entropy between p and the labels.
#[derive(Clone, Debug)]
pub struct LogisticRegression {
    x: Table,
    y: Vec<f64>,
    reduction: Reduction,
}

impl LogisticRegression {
    pub fn new(x: Table, y: Vec<f64>) -> Result<Self, FileFormatError> {
        let data = LogisticDataset::new(x, y)?;
        Ok(Self::from_dataset(data))
    }

    pub fn from_dataset(data: LogisticDataset) -> Self {
        Self {
            x: data.x,
            y: data.y,
            reduction: Reduction::Mean,
        }
    }

    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
    }

    pub fn n_samples(&self) -> usize {
        self.x.rows()
    }

    pub fn n_features(&self) -> usize {
        self.x.cols()
    }

    fn scale(&self) -> f64 {
        match self.reduction {
            Reduction::Mean if self.n_samples() > 0 => 1.0 / self.n_samples() as f64,
            _ => 1.0,
        }
    }

    fn logits(&self, w: &[f64]) -> impl Iterator<Item = f64> + '_ {
        let w = w.to_vec();
        self.x
            .iter_rows()
            .map(move |row| row.iter().zip(&w).map(|(a, b)| a * b).sum::<f64>())
    }

    /// Predicted probabilities sigmoid(X · w).
    pub fn predict_proba(&self, w: &[f64]) -> Vec<f64> {
        self.logits(w).map(sigmoid).collect()
    }

    /// Fraction of samples whose thresholded prediction matches the label.
    pub fn accuracy(&self, w: &[f64]) -> f64 {
        if self.y.is_empty() {
            return 0.0;
        }
        let hits = self
            .predict_proba(w)
            .iter()
            .zip(&self.y)
            .filter(|(p, y)| (**p > 0.5) == (**y > 0.5))
            .count();
        hits as f64 / self.y.len() as f64
    }
}

impl Objective for LogisticRegression {
    fn dim(&self) -> Option<usize> {
        Some(self.n_features())
    }

    fn evaluate<'t>(&self, tape: &'t Tape, w: &[Var<'t>]) -> Var<'t> {
        // y ln(p) + (1 - y) ln(1 - p), with ln(1 - sigmoid(z)) = ln(sigmoid(-z))
        let terms: Vec<Var<'t>> = self
            .x
            .iter_rows()
            .zip(&self.y)
            .map(|(row, &y)| {
                let z = tape.linear_combination(w, row);
                if y == 1.0 {
                    z.ln_sigmoid()
                } else if y == 0.0 {
                    (-z).ln_sigmoid()
                } else {
                    z.ln_sigmoid() * y + (-z).ln_sigmoid() * (1.0 - y)
                }
            })
            .collect();
        tape.sum(&terms) * -self.scale()
    }
}

impl AnalyticObjective for LogisticRegression {
    fn expected_dim(&self) -> Option<usize> {
        Some(self.n_features())
    }

    fn cost(&self, w: &[f64]) -> f64 {
        let total: f64 = self
            .logits(w)
            .zip(&self.y)
            .map(|(z, &y)| y * softplus(-z) + (1.0 - y) * softplus(z))
            .sum();
        total * self.scale()
    }

    fn gradient(&self, w: &[f64], grad: &mut [f64]) {
        // dL/dw_j = scale * sum_i (sigmoid(z_i) - y_i) x_ij
        grad.fill(0.0);
        let scale = self.scale();
        for ((row, z), &y) in self.x.iter_rows().zip(self.logits(w)).zip(&self.y) {
            let r = scale * (sigmoid(z) - y);
            for (g, &xij) in grad.iter_mut().zip(row) {
                *g += r * xij;
            }
        }
    }
}
