use numpy::{PyArray1, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::cell::RefCell;
use stepbench::AnalyticObjective;

/// Gradient returned by Python: a 1-D float ndarray of any layout, or any
/// sequence of floats.
fn gradient_values(out: &Bound<'_, PyAny>) -> PyResult<Vec<f64>> {
    match out.cast::<PyArray1<f64>>() {
        Ok(arr) => Ok(arr.try_readonly()?.as_array().iter().copied().collect()),
        Err(_) => out.extract(),
    }
}

/// Objective backed by Python callables `f(x) -> float` and
/// `grad(x) -> list[float] | ndarray`.
///
/// The harness cannot carry a Python exception, so the first one raised is
/// kept in `failure` and the callback reports NaN instead, which stops the
/// run at the next finite check. Later callbacks are skipped.
pub(crate) struct PyObjective<'py> {
    py: Python<'py>,
    value_fn: Py<PyAny>,
    grad_fn: Py<PyAny>,
    dim: usize,
    failure: RefCell<Option<PyErr>>,
}

impl<'py> PyObjective<'py> {
    pub(crate) fn new(py: Python<'py>, value_fn: Py<PyAny>, grad_fn: Py<PyAny>, dim: usize) -> Self {
        Self {
            py,
            value_fn,
            grad_fn,
            dim,
            failure: RefCell::new(None),
        }
    }

    pub(crate) fn take_error(&self) -> Option<PyErr> {
        self.failure.borrow_mut().take()
    }

    fn failed(&self) -> bool {
        self.failure.borrow().is_some()
    }

    fn record(&self, err: PyErr) {
        let mut slot = self.failure.borrow_mut();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    fn call_value(&self, x: &[f64]) -> PyResult<f64> {
        self.value_fn
            .bind(self.py)
            .call1((x.to_vec(),))?
            .extract::<f64>()
    }

    fn call_gradient(&self, x: &[f64]) -> PyResult<Vec<f64>> {
        let out = self.grad_fn.bind(self.py).call1((x.to_vec(),))?;
        let g = gradient_values(&out)?;
        if g.len() != x.len() {
            return Err(PyValueError::new_err(format!(
                "gradient length mismatch: expected {}, got {}",
                x.len(),
                g.len()
            )));
        }
        Ok(g)
    }
}

impl AnalyticObjective for PyObjective<'_> {
    fn expected_dim(&self) -> Option<usize> {
        Some(self.dim)
    }

    fn cost(&self, x: &[f64]) -> f64 {
        if self.failed() {
            return f64::NAN;
        }
        self.call_value(x).unwrap_or_else(|e| {
            self.record(e);
            f64::NAN
        })
    }

    fn gradient(&self, x: &[f64], grad: &mut [f64]) {
        if self.failed() {
            grad.fill(f64::NAN);
            return;
        }
        match self.call_gradient(x) {
            Ok(g) => grad.copy_from_slice(&g),
            Err(e) => {
                self.record(e);
                grad.fill(f64::NAN);
            }
        }
    }
}
