use pyo3::prelude::*;
use stepbench::{
    Adam, AnalyticBackend, AnalyticObjective, IterativeOptimizationHarness, LearningRateSchedule,
    ParameterState,
};

use crate::bindings::callbacks::PyObjective;
use crate::bindings::errors::{parse_contract, to_py_err};
use crate::bindings::trace::trace_records_to_pylist;

/// Adam driven by Python callbacks, timed by the harness.
///
/// f:    callable(x: list[float]) -> float
/// grad: callable(x: list[float]) -> list[float] | ndarray
///
/// Returns (x, f(x), elapsed_seconds, trace). `trace` is None unless
/// `collect_trace=True`.
#[pyfunction(
    signature = (
        f,
        grad,
        x0,
        lr = None,
        step_count = None,
        beta1 = None,
        beta2 = None,
        eps = None,
        contract = None,
        collect_trace = None,
        verbose = None
    )
)]
fn adam(
    py: Python<'_>,
    f: Py<PyAny>,
    grad: Py<PyAny>,
    x0: Vec<f64>,
    lr: Option<f64>,
    step_count: Option<usize>,
    beta1: Option<f64>,
    beta2: Option<f64>,
    eps: Option<f64>,
    contract: Option<String>,
    collect_trace: Option<bool>,
    verbose: Option<bool>,
) -> PyResult<(Vec<f64>, f64, f64, Option<Py<PyAny>>)> {
    let schedule = LearningRateSchedule::constant(lr.unwrap_or(1e-3));
    schedule.validate().map_err(to_py_err)?;

    let rule = Adam::with_schedule(schedule)
        .betas(beta1.unwrap_or(0.9), beta2.unwrap_or(0.999))
        .eps(eps.unwrap_or(1e-8));
    let mut backend = AnalyticBackend::new(rule);

    let harness = IterativeOptimizationHarness::new(step_count.unwrap_or(1000))
        .contract(parse_contract(contract.as_deref())?)
        .collect_trace(collect_trace.unwrap_or(false))
        .verbose(verbose.unwrap_or(false));

    let objective = PyObjective::new(py, f, grad, x0.len());
    let result = harness.run(&objective, ParameterState::new(x0), &mut backend);

    if let Some(e) = objective.take_error() {
        return Err(e);
    }
    let report = result.map_err(to_py_err)?;

    let x = report.state.into_vec();
    let fx = objective.cost(&x);
    if let Some(e) = objective.take_error() {
        return Err(e);
    }

    let trace = report
        .trace
        .map(|records| trace_records_to_pylist(py, records))
        .transpose()?;

    Ok((x, fx, report.elapsed.as_secs_f64(), trace))
}

pub(crate) fn register(module: &Bound<PyModule>) -> PyResult<()> {
    module.add_function(wrap_pyfunction!(adam, module)?)?;
    Ok(())
}
