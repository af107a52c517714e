use std::cell::RefCell;
use std::fmt::Write;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One row of the per-update trace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub iter: usize,
    pub loss: Option<f64>,
    pub grad_norm: Option<f64>,
    pub step_size: Option<f64>,
}

impl StepRecord {
    pub fn format_line(&self) -> String {
        let mut line = format!("iter {:>6}", self.iter);
        if let Some(v) = self.loss {
            let _ = write!(line, " | loss {:>13.6e}", v);
        }
        if let Some(v) = self.grad_norm {
            let _ = write!(line, " | grad {:>13.6e}", v);
        }
        if let Some(v) = self.step_size {
            let _ = write!(line, " | step {:>+9.3e}", v);
        }
        line
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TraceRow {
    iter: usize,
    loss: Option<f64>,
    grad_norm: Option<f64>,
    step_size: Option<f64>,
}

impl TraceRow {
    pub(crate) fn iter(iter: usize) -> Self {
        Self {
            iter,
            loss: None,
            grad_norm: None,
            step_size: None,
        }
    }

    pub(crate) fn loss(mut self, loss: f64) -> Self {
        self.loss = Some(loss);
        self
    }

    pub(crate) fn grad_norm(mut self, grad_norm: f64) -> Self {
        self.grad_norm = Some(grad_norm);
        self
    }

    pub(crate) fn step_size(mut self, step_size: f64) -> Self {
        self.step_size = Some(step_size);
        self
    }
}

/// Collects and/or logs trace rows. Inactive tracers cost one branch per
/// update.
#[derive(Debug)]
pub(crate) struct StepTracer {
    verbose: bool,
    history: Option<RefCell<Vec<StepRecord>>>,
}

impl StepTracer {
    pub(crate) fn new(verbose: bool, collect: bool) -> Self {
        Self {
            verbose,
            history: collect.then(|| RefCell::new(Vec::new())),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.verbose || self.history.is_some()
    }

    pub(crate) fn emit(&self, row: TraceRow) {
        let record = StepRecord {
            iter: row.iter,
            loss: row.loss,
            grad_norm: row.grad_norm,
            step_size: row.step_size,
        };

        if self.verbose {
            debug!("{}", record.format_line());
        }

        if let Some(history) = &self.history {
            history.borrow_mut().push(record);
        }
    }

    pub(crate) fn into_history(self) -> Option<Vec<StepRecord>> {
        self.history.map(RefCell::into_inner)
    }
}
