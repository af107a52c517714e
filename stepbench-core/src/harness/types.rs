use std::ops::Range;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::HarnessConfig;
use crate::state::ParameterState;

use super::trace::StepRecord;

/// How a step count maps onto loop indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationContract {
    /// Indices `0..T`: exactly `T` updates.
    #[default]
    Exact,
    /// Indices `1..T`: `T - 1` updates, as a `for i in range(1, T)` loop does.
    SkipFirstIndex,
}

impl IterationContract {
    pub fn indices(self, step_count: usize) -> Range<usize> {
        match self {
            Self::Exact => 0..step_count,
            Self::SkipFirstIndex => 1.min(step_count)..step_count,
        }
    }

    pub fn updates_for(self, step_count: usize) -> usize {
        self.indices(step_count).len()
    }
}

/// Runs a backend against an objective for a fixed number of updates.
#[derive(Clone, Debug)]
pub struct IterativeOptimizationHarness {
    pub step_count: usize,
    pub contract: IterationContract,
    /// Keep a [`StepRecord`] per update in the report.
    pub collect_trace: bool,
    /// Log every update at DEBUG level.
    pub verbose: bool,
}

impl IterativeOptimizationHarness {
    pub fn new(step_count: usize) -> Self {
        Self {
            step_count,
            contract: IterationContract::default(),
            collect_trace: false,
            verbose: false,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.step_count).contract(config.iteration_contract)
    }

    pub fn contract(mut self, contract: IterationContract) -> Self {
        self.contract = contract;
        self
    }

    pub fn collect_trace(mut self, enable: bool) -> Self {
        self.collect_trace = enable;
        self
    }

    pub fn verbose(mut self, enable: bool) -> Self {
        self.verbose = enable;
        self
    }
}

/// Outcome of one harness run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub state: ParameterState,
    /// Wall-clock time spent inside the loop.
    pub elapsed: Duration,
    pub updates: usize,
    /// Loss evaluated before the final update.
    pub last_loss: Option<f64>,
    pub trace: Option<Vec<StepRecord>>,
}

impl RunReport {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_update_counts() {
        assert_eq!(IterationContract::Exact.updates_for(10), 10);
        assert_eq!(IterationContract::SkipFirstIndex.updates_for(10), 9);
        assert_eq!(IterationContract::SkipFirstIndex.updates_for(1), 0);
        assert_eq!(IterationContract::SkipFirstIndex.indices(3), 1..3);
        assert_eq!(IterationContract::SkipFirstIndex.updates_for(0), 0);
    }

    #[test]
    fn contract_serializes_snake_case() {
        let c: IterationContract = serde_json::from_str("\"skip_first_index\"").unwrap();
        assert_eq!(c, IterationContract::SkipFirstIndex);
        assert_eq!(serde_json::to_string(&IterationContract::Exact).unwrap(), "\"exact\"");
    }
}
