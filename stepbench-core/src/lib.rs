//! stepbench: a tiny harness for timing gradient-based optimizers
//!
//! - `run` / `IterativeOptimizationHarness`: zero grad, forward, backward,
//!   update, repeated a fixed number of times under a wall clock
//! - `Backend`: owns the gradient buffer and optimizer memory
//!   (`AutodiffBackend` over a reverse-mode `Tape`, `AnalyticBackend` for
//!   hand-written gradients)
//! - `Adam`, `GradientDescent`: update rules driven by a `LearningRateSchedule`
//! - `Rosenbrock`, `LogisticRegression`: the two benchmark objectives
//! - `Table`, `LogisticDataset`: whitespace-delimited tables and the
//!   synthetic classification data written to them
//!
//! ```
//! use stepbench::{run, AutodiffBackend, Adam, ParameterState, Rosenbrock};
//!
//! let mut backend = AutodiffBackend::new(Adam::default());
//! let (state, elapsed) = run(
//!     &Rosenbrock::default(),
//!     ParameterState::new(vec![-10.0, 10.0]),
//!     &mut backend,
//!     100,
//! )
//! .unwrap();
//! assert_eq!(state.len(), 2);
//! assert!(elapsed.as_secs_f64() >= 0.0);
//! ```

pub mod autodiff;
pub mod backend;
pub mod config;
pub mod data;
pub mod error;
pub mod harness;
pub mod problems;
pub mod solvers;
pub mod state;

pub use autodiff::{Gradient, Tape, Var};
pub use backend::{AnalyticBackend, AutodiffBackend, Backend};
pub use config::HarnessConfig;
pub use data::{LogisticDataset, Table};
pub use error::{FileFormatError, HarnessError, Result};
pub use harness::{run, IterationContract, IterativeOptimizationHarness, RunReport, StepRecord};
pub use problems::{
    AnalyticObjective, LogisticRegression, Objective, Quadratic, Reduction, Rosenbrock,
};
pub use solvers::{Adam, GradientDescent, LearningRateSchedule, UpdateRule};
pub use state::ParameterState;
