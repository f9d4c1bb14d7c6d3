// PyPageReport - per-file result of batch page scanning
//
// A failed page carries its error message and location instead of raising, so
// one broken component never aborts the whole batch.

use crate::extractors::PageReport;
use pyo3::prelude::*;

/// Result of scanning a single page in `scan_pages_batch`.
///
/// - path: page path (same as input)
/// - meta_json: route record as JSON, None when the page declares none
/// - error: error message if extraction failed
/// - line / column: 1-based error location, when known
#[pyclass(name = "PageReport")]
pub struct PyPageReport {
    #[pyo3(get)]
    pub path: String,

    #[pyo3(get)]
    pub meta_json: Option<String>,

    #[pyo3(get)]
    pub error: Option<String>,

    #[pyo3(get)]
    pub line: Option<usize>,

    #[pyo3(get)]
    pub column: Option<usize>,
}

impl PyPageReport {
    pub fn from_report(report: PageReport) -> Self {
        let (meta_json, error, location) = match &report.result {
            Ok(meta) => match meta.as_ref().map(serde_json::to_string).transpose() {
                Ok(json) => (json, None, None),
                Err(e) => (None, Some(format!("Failed to serialize route record: {}", e)), None),
            },
            Err(e) => (None, Some(e.to_string()), e.location()),
        };

        PyPageReport {
            path: report.path,
            meta_json,
            error,
            line: location.map(|l| l.line),
            column: location.map(|l| l.column),
        }
    }
}

#[pymethods]
impl PyPageReport {
    #[getter]
    fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    fn __repr__(&self) -> String {
        match &self.error {
            Some(error) => format!("PageReport(path={:?}, error={:?})", self.path, error),
            None => format!(
                "PageReport(path={:?}, has_meta={})",
                self.path,
                self.meta_json.is_some()
            ),
        }
    }
}
