// PyO3 Bindings Module
//
// Python bindings for the path ordering, definePage extraction and loader
// scanning APIs. Only compiled with the `python` feature.

mod api;
mod page_report;
mod transform_result;

// Re-export for lib.rs
pub use api::{
    compare_paths, extract_loaders, extract_route_meta, scan_pages_batch, sort_paths,
    transform_define_page,
};
pub use page_report::PyPageReport;
pub use transform_result::PyTransformResult;
