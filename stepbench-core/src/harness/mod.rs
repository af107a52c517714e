//! The timing loop: clear gradient, forward, backward, update, repeated a
//! fixed number of times with the wall clock bracketing the loop.

mod run;
mod trace;
mod types;

pub use run::run;
pub use trace::StepRecord;
pub use types::{IterationContract, IterativeOptimizationHarness, RunReport};
