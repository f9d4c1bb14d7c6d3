// API Functions - PyO3-exposed functions for Python
//
// Thin wrappers over the crate's public API. Extraction errors become
// ValueError with the `id:line:col: message` text; config errors come through
// pyo3's anyhow conversion.

use super::{PyPageReport, PyTransformResult};
use crate::config::{LoaderOptions, RoutesConfig};
use crate::extractors::{
    loaders, DefinePageExtractor, ExtractMode, LoaderFilter, PageScanner, SourceFile,
};
use crate::ordering::PathOrdering;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::path::Path;

/// Sort route paths into route-table order
///
/// Args:
///     paths (list[str]): Paths to sort
///     index_name (str): Stem of index files (default "index")
///
/// Returns:
///     list[str]: New sorted list, independent of the input order
#[pyfunction]
#[pyo3(signature = (paths, index_name = "index"))]
pub fn sort_paths(paths: Vec<String>, index_name: &str) -> Vec<String> {
    PathOrdering::new(index_name).sorted(paths)
}

/// Compare two route paths
///
/// Returns:
///     int: -1, 0 or 1, usable with functools.cmp_to_key
#[pyfunction]
#[pyo3(signature = (a, b, index_name = "index"))]
pub fn compare_paths(a: &str, b: &str, index_name: &str) -> i32 {
    PathOrdering::new(index_name).compare(a, b) as i32
}

/// Extract or strip the definePage() call of a page component
///
/// Args:
///     code (str): Full SFC source
///     id (str): Module id; a `?definePage` query selects extraction mode
///     force_extract (bool): Extract regardless of the id
///
/// Returns:
///     TransformResult | None: None when the page has no definePage() call
///
/// Raises:
///     ValueError: Duplicate macro, scope violation, parse failure...
#[pyfunction]
#[pyo3(signature = (code, id, force_extract = false))]
pub fn transform_define_page(
    code: &str,
    id: &str,
    force_extract: bool,
) -> PyResult<Option<PyTransformResult>> {
    let extractor = DefinePageExtractor::default();
    let mode = if force_extract {
        ExtractMode::Extract
    } else {
        ExtractMode::from_id(id, extractor.macro_name())
    };

    let result = extractor
        .transform_with_mode(code, id, mode)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(result.map(PyTransformResult::from_transform_result))
}

/// Route record of a page component as JSON
///
/// Returns:
///     str | None: JSON object, or None when the page declares no record
#[pyfunction]
pub fn extract_route_meta(code: &str, id: &str) -> PyResult<Option<String>> {
    let meta = crate::extractors::extract_route_meta(code, id)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    meta.map(|meta| {
        serde_json::to_string(&meta)
            .map_err(|e| PyValueError::new_err(format!("Failed to serialize route record: {}", e)))
    })
    .transpose()
}

/// Loader bindings imported by a transformed page module
///
/// Args:
///     code (str): Module source after bundler transforms
///     root (str): Project root that import specifiers resolve against
///     include (list[str] | None): Loader globs (default ["**/loaders/**"])
///     exclude (list[str] | None): Globs removed from the include set
///
/// Returns:
///     list[str]: Local binding names in import order
#[pyfunction]
#[pyo3(signature = (code, root, include = None, exclude = None))]
pub fn extract_loaders(
    code: &str,
    root: &str,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
) -> PyResult<Vec<String>> {
    let defaults = LoaderOptions::default();
    let filter = LoaderFilter::new(
        &include.unwrap_or(defaults.include),
        &exclude.unwrap_or(defaults.exclude),
    )?;

    loaders::extract_loaders(code, |path| filter.is_loader_path(path), Path::new(root))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Extract route records from many pages in parallel
///
/// Releases the GIL and runs on Rayon's pool. A failing page is reported in
/// its PageReport instead of raising.
///
/// Args:
///     files (list[tuple[str, str]]): (path, content) pairs
///     config_json (str | None): RoutesConfig as JSON
///
/// Returns:
///     list[PageReport]: Reports in the same order as the input
#[pyfunction]
#[pyo3(signature = (files, config_json = None))]
pub fn scan_pages_batch(
    py: Python<'_>,
    files: Vec<(String, String)>,
    config_json: Option<String>,
) -> PyResult<Vec<PyPageReport>> {
    let config = match config_json {
        Some(json) => RoutesConfig::from_json_str(&json)?,
        None => RoutesConfig::default(),
    };
    let scanner = PageScanner::new(&config);
    let files: Vec<SourceFile> = files
        .into_iter()
        .map(|(path, content)| SourceFile::new(path, content))
        .collect();

    // Release GIL for parallel processing
    let reports = py.detach(move || scanner.scan_pages(&files));

    Ok(reports.into_iter().map(PyPageReport::from_report).collect())
}
