use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FileFormatError, HarnessError, Result};
use crate::harness::IterationContract;
use crate::solvers::LearningRateSchedule;

/// Options for one benchmark run.
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides. Unknown keys are rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Rows of the synthesized design matrix.
    pub n_samples: usize,
    /// Columns of the synthesized design matrix.
    pub n_features: usize,
    pub step_count: usize,
    pub learning_rate_schedule: LearningRateSchedule,
    pub iteration_contract: IterationContract,
    /// Seed for dataset synthesis. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            n_samples: 100,
            n_features: 100,
            step_count: 1000,
            learning_rate_schedule: LearningRateSchedule::default(),
            iteration_contract: IterationContract::default(),
            seed: None,
        }
    }
}

impl HarnessConfig {
    /// Defaults for the Rosenbrock benchmark.
    pub fn rosenbrock() -> Self {
        Self {
            step_count: 10_000,
            ..Self::default()
        }
    }

    /// Defaults for the logistic-regression benchmark.
    pub fn logistic() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.step_count == 0 {
            return Err(HarnessError::InvalidConfig(
                "step_count must be at least 1".into(),
            ));
        }
        if self.n_samples == 0 || self.n_features == 0 {
            return Err(HarnessError::InvalidConfig(format!(
                "dataset shape must be non-empty, got {}x{}",
                self.n_samples, self.n_features
            )));
        }
        self.learning_rate_schedule.validate()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| FileFormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
