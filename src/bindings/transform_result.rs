// PyTransformResult - PyO3 wrapper for a definePage transform
//
// The route record is handed to Python as JSON; the route-tree builder on the
// Python side only needs plain data.

use crate::extractors::{ExtractMode, TransformResult};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Python-accessible TransformResult wrapper
#[pyclass(name = "TransformResult")]
pub struct PyTransformResult {
    inner: TransformResult,
}

impl PyTransformResult {
    pub fn from_transform_result(result: TransformResult) -> Self {
        PyTransformResult { inner: result }
    }
}

#[pymethods]
impl PyTransformResult {
    #[getter]
    fn code(&self) -> String {
        self.inner.code.clone()
    }

    /// "extract" or "strip"
    #[getter]
    fn mode(&self) -> &'static str {
        match self.inner.mode {
            ExtractMode::Extract => "extract",
            ExtractMode::Strip => "strip",
        }
    }

    /// Decoded route record as JSON (extraction mode only)
    #[getter]
    fn meta_json(&self) -> PyResult<Option<String>> {
        self.inner
            .meta
            .as_ref()
            .map(|meta| {
                serde_json::to_string(meta)
                    .map_err(|e| PyValueError::new_err(format!("Failed to serialize route record: {}", e)))
            })
            .transpose()
    }

    fn __repr__(&self) -> String {
        format!(
            "TransformResult(mode={}, code_len={}, has_meta={})",
            self.mode(),
            self.inner.code.len(),
            self.inner.meta.is_some()
        )
    }
}
