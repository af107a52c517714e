use numpy::{IntoPyArray, PyArray1};
use pyo3::prelude::*;
use stepbench::{
    Adam, AutodiffBackend, HarnessConfig, IterativeOptimizationHarness, LearningRateSchedule,
    LogisticDataset, LogisticRegression, ParameterState, Rosenbrock,
};

use crate::bindings::errors::{parse_contract, to_py_err};

fn load_config(path: Option<String>, fallback: HarnessConfig) -> PyResult<HarnessConfig> {
    match path {
        Some(path) => HarnessConfig::from_path(path).map_err(to_py_err),
        None => Ok(fallback),
    }
}

/// Time Adam on Rosenbrock (a = 1, b = 100).
///
/// Returns (x, elapsed_seconds).
#[pyfunction(signature = (x0 = None, step_count = None, lr = None, contract = None, config = None))]
fn rosenbrock_benchmark(
    x0: Option<Vec<f64>>,
    step_count: Option<usize>,
    lr: Option<f64>,
    contract: Option<String>,
    config: Option<String>,
) -> PyResult<(Vec<f64>, f64)> {
    let mut config = load_config(config, HarnessConfig::rosenbrock())?;
    if let Some(step_count) = step_count {
        config.step_count = step_count;
    }
    if let Some(lr) = lr {
        config.learning_rate_schedule = LearningRateSchedule::constant(lr);
    }
    if contract.is_some() {
        config.iteration_contract = parse_contract(contract.as_deref())?;
    }
    config.validate().map_err(to_py_err)?;

    let mut backend = AutodiffBackend::new(Adam::with_schedule(config.learning_rate_schedule));
    let report = IterativeOptimizationHarness::from_config(&config)
        .run(
            &Rosenbrock::default(),
            ParameterState::new(x0.unwrap_or_else(|| vec![-10.0, 10.0])),
            &mut backend,
        )
        .map_err(to_py_err)?;

    let elapsed = report.elapsed_secs();
    Ok((report.state.into_vec(), elapsed))
}

/// Time Adam fitting a logistic model.
///
/// Reads `x_path` / `y_path` when both are given, otherwise synthesizes a
/// dataset of shape (n_samples, n_features) from `seed`.
///
/// Returns (weights, elapsed_seconds).
#[pyfunction(
    signature = (
        x_path = None,
        y_path = None,
        n_samples = None,
        n_features = None,
        step_count = None,
        lr = None,
        seed = None,
        contract = None,
        config = None
    )
)]
fn logistic_benchmark<'py>(
    py: Python<'py>,
    x_path: Option<String>,
    y_path: Option<String>,
    n_samples: Option<usize>,
    n_features: Option<usize>,
    step_count: Option<usize>,
    lr: Option<f64>,
    seed: Option<u64>,
    contract: Option<String>,
    config: Option<String>,
) -> PyResult<(Bound<'py, PyArray1<f64>>, f64)> {
    let mut config = load_config(config, HarnessConfig::logistic())?;
    config.n_samples = n_samples.unwrap_or(config.n_samples);
    config.n_features = n_features.unwrap_or(config.n_features);
    config.step_count = step_count.unwrap_or(config.step_count);
    config.seed = seed.or(config.seed);
    if let Some(lr) = lr {
        config.learning_rate_schedule = LearningRateSchedule::constant(lr);
    }
    if contract.is_some() {
        config.iteration_contract = parse_contract(contract.as_deref())?;
    }
    config.validate().map_err(to_py_err)?;

    let data = match (x_path, y_path) {
        (Some(x), Some(y)) => LogisticDataset::read(x, y).map_err(|e| to_py_err(e.into()))?,
        (None, None) => LogisticDataset::generate(config.n_samples, config.n_features, config.seed),
        _ => {
            return Err(pyo3::exceptions::PyValueError::new_err(
                "x_path and y_path must be given together",
            ))
        }
    };
    let objective = LogisticRegression::from_dataset(data);

    let mut backend = AutodiffBackend::new(Adam::with_schedule(config.learning_rate_schedule));
    let report = IterativeOptimizationHarness::from_config(&config)
        .run(
            &objective,
            ParameterState::zeros(objective.n_features()),
            &mut backend,
        )
        .map_err(to_py_err)?;

    let elapsed = report.elapsed_secs();
    Ok((report.state.into_vec().into_pyarray(py), elapsed))
}

pub(crate) fn register(module: &Bound<PyModule>) -> PyResult<()> {
    module.add_function(wrap_pyfunction!(rosenbrock_benchmark, module)?)?;
    module.add_function(wrap_pyfunction!(logistic_benchmark, module)?)?;
    Ok(())
}
