use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// The vector being optimized. Its length is fixed for the lifetime of a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterState {
    values: Vec<f64>,
}

impl ParameterState {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn zeros(len: usize) -> Self {
        Self::new(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Index of the first NaN or infinite entry.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.values.iter().position(|v| !v.is_finite())
    }
}

impl From<Vec<f64>> for ParameterState {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<&[f64]> for ParameterState {
    fn from(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }
}

impl Index<usize> for ParameterState {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.values[i]
    }
}

impl fmt::Display for ParameterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_values() {
        let x = ParameterState::new(vec![-10.0, 10.5]);
        assert_eq!(x.to_string(), "[-10, 10.5]");
        assert_eq!(ParameterState::zeros(0).to_string(), "[]");
    }

    #[test]
    fn finds_non_finite_entry() {
        let mut x = ParameterState::zeros(3);
        assert_eq!(x.first_non_finite(), None);
        x.as_mut_slice()[1] = f64::NAN;
        assert_eq!(x.first_non_finite(), Some(1));
    }
}
