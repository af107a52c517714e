use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use stepbench::StepRecord;

pub(crate) fn trace_records_to_pylist(
    py: Python<'_>,
    records: Vec<StepRecord>,
) -> PyResult<Py<PyAny>> {
    let list = PyList::empty(py);
    for row in records {
        let d = PyDict::new(py);
        d.set_item("iter", row.iter)?;
        d.set_item("loss", row.loss)?;
        d.set_item("grad_norm", row.grad_norm)?;
        d.set_item("step_size", row.step_size)?;
        list.append(d)?;
    }
    Ok(list.into_any().unbind())
}
