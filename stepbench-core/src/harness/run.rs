use std::time::{Duration, Instant};

use tracing::info;

use crate::backend::Backend;
use crate::error::{HarnessError, Result};
use crate::state::ParameterState;

use super::trace::{StepTracer, TraceRow};
use super::types::{IterativeOptimizationHarness, RunReport};

impl IterativeOptimizationHarness {
    /// Apply the configured number of updates to `initial_state`.
    ///
    /// The first error from the backend aborts the run; no partial state is
    /// returned.
    pub fn run<O, B>(
        &self,
        objective: &O,
        initial_state: ParameterState,
        backend: &mut B,
    ) -> Result<RunReport>
    where
        O: ?Sized,
        B: Backend<O> + ?Sized,
    {
        if self.step_count == 0 {
            return Err(HarnessError::InvalidConfig(
                "step_count must be at least 1".into(),
            ));
        }

        let tracer = StepTracer::new(self.verbose, self.collect_trace);
        let indices = self.contract.indices(self.step_count);
        let updates = indices.len();
        let mut state = initial_state;
        let mut last_loss = None;

        let start = Instant::now();
        for iter in indices {
            backend.zero_grad();
            let loss = backend.forward(objective, &state)?;
            backend.backward(objective, &state)?;

            if tracer.is_active() {
                let grad_norm = backend.gradient().iter().map(|g| g * g).sum::<f64>().sqrt();
                tracer.emit(
                    TraceRow::iter(iter)
                        .loss(loss)
                        .grad_norm(grad_norm)
                        .step_size(backend.learning_rate()),
                );
            }

            backend.step(&mut state)?;
            last_loss = Some(loss);
        }
        let elapsed = start.elapsed();

        info!(
            updates,
            elapsed_secs = elapsed.as_secs_f64(),
            last_loss = last_loss.unwrap_or(f64::NAN),
            "optimization finished"
        );

        Ok(RunReport {
            state,
            elapsed,
            updates,
            last_loss,
            trace: tracer.into_history(),
        })
    }
}

/// Run `step_count` updates with the default [`IterationContract`] and
/// return the final state and the time spent in the loop.
///
/// [`IterationContract`]: super::IterationContract
pub fn run<O, B>(
    objective: &O,
    initial_state: ParameterState,
    backend: &mut B,
    step_count: usize,
) -> Result<(ParameterState, Duration)>
where
    O: ?Sized,
    B: Backend<O> + ?Sized,
{
    let report = IterativeOptimizationHarness::new(step_count).run(objective, initial_state, backend)?;
    Ok((report.state, report.elapsed))
}
