// Page Routes Core - static analysis for file-system routers
//
// Builds the static inputs of a route table from page-component sources
// without executing them:
// - a deterministic total order over route paths (`ordering`)
// - `definePage()` route-record extraction (`extractors::define_page`)
// - `__loaders` export synthesis (`extractors::loaders`)
//
// With the `python` feature the crate also builds as a PyO3 extension module.

pub mod config;
pub mod error;
pub mod extractors;
pub mod language;
pub mod ordering;
pub mod utils;

#[cfg(feature = "python")]
pub mod bindings;

pub use config::RoutesConfig;
pub use error::{ExtractError, Location};
pub use extractors::{
    append_loaders_export, define_page_transform, extract_loaders, extract_route_meta,
    loaders_export_statement, DefinePageExtractor, ExtractMode, LoaderFilter, PageScanner,
    RouteMeta, SourceFile, TransformResult,
};
pub use ordering::{compare_paths, sort_paths, sorted_paths, PathOrdering};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Page Routes Core Python module
///
/// Provides path ordering, definePage extraction and loader scanning.
#[cfg(feature = "python")]
#[pymodule]
fn page_routes_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    // Add Python functions
    m.add_function(wrap_pyfunction!(bindings::sort_paths, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::compare_paths, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::transform_define_page, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_route_meta, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_loaders, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::scan_pages_batch, m)?)?;

    // Add Python classes
    m.add_class::<bindings::PyTransformResult>()?;
    m.add_class::<bindings::PyPageReport>()?;

    Ok(())
}
