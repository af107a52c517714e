//! Python bindings for stepbench.

use pyo3::prelude::*;

mod bindings {
    pub(crate) mod adam;
    pub(crate) mod benchmarks;
    pub(crate) mod callbacks;
    pub(crate) mod errors;
    pub(crate) mod trace;
}

#[pymodule]
fn stepbench_py(m: &Bound<PyModule>) -> PyResult<()> {
    bindings::adam::register(m)?;
    bindings::benchmarks::register(m)?;
    Ok(())
}
