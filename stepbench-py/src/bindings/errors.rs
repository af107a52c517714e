use pyo3::exceptions::{PyArithmeticError, PyIOError, PyRuntimeError, PyValueError};
use pyo3::PyErr;
use stepbench::{HarnessError, IterationContract};

pub(crate) fn to_py_err(err: HarnessError) -> PyErr {
    let msg = err.to_string();
    match err {
        HarnessError::ShapeMismatch { .. }
        | HarnessError::InvalidConfig(_)
        | HarnessError::ConfigParse(_) => PyValueError::new_err(msg),
        HarnessError::NonDifferentiable { .. } | HarnessError::Diverged { .. } => {
            PyArithmeticError::new_err(msg)
        }
        HarnessError::FileFormat(_) => PyIOError::new_err(msg),
        HarnessError::MissingForward => PyRuntimeError::new_err(msg),
    }
}

pub(crate) fn parse_contract(name: Option<&str>) -> Result<IterationContract, PyErr> {
    match name {
        None | Some("exact") => Ok(IterationContract::Exact),
        Some("skip_first_index") => Ok(IterationContract::SkipFirstIndex),
        Some(other) => Err(PyValueError::new_err(format!(
            "unknown iteration contract {other:?}, expected \"exact\" or \"skip_first_index\""
        ))),
    }
}
