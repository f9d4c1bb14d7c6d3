//! PageScanner - batch analysis of page components
//!
//! Runs route-record extraction over many `(path, source)` pairs on rayon's
//! pool. Every file is processed on its own: a failing page yields an error
//! report and never affects the others. Reports keep input order.

use crate::config::RoutesConfig;
use crate::error::ExtractError;
use crate::extractors::define_page::{DefinePageExtractor, RouteMeta};
use crate::ordering::PathOrdering;
use rayon::prelude::*;
use tracing::{debug, warn};

/// A page component handed over by file discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug)]
pub struct PageReport {
    pub path: String,
    /// `Ok(None)` for pages without a route record
    pub result: Result<Option<RouteMeta>, ExtractError>,
}

impl PageReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn meta(&self) -> Option<&RouteMeta> {
        self.result.as_ref().ok().and_then(Option::as_ref)
    }

    pub fn error(&self) -> Option<&ExtractError> {
        self.result.as_ref().err()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageScanner {
    extractor: DefinePageExtractor,
    ordering: PathOrdering,
}

impl PageScanner {
    pub fn new(config: &RoutesConfig) -> Self {
        Self {
            extractor: DefinePageExtractor::new(config.define_page.clone()),
            ordering: PathOrdering::new(config.ordering.index_name.clone()),
        }
    }

    pub fn scan_page(&self, file: &SourceFile) -> PageReport {
        let result = self.extractor.route_meta(&file.content, &file.path);
        if let Err(e) = &result {
            warn!("Failed to extract route record from {}: {}", file.path, e);
        }
        PageReport {
            path: file.path.clone(),
            result,
        }
    }

    /// Scan all files in parallel, reports in input order
    pub fn scan_pages(&self, files: &[SourceFile]) -> Vec<PageReport> {
        let reports: Vec<PageReport> = files.par_iter().map(|file| self.scan_page(file)).collect();

        let failed = reports.iter().filter(|r| !r.is_ok()).count();
        debug!(
            "Scanned {} pages ({} with route records, {} failed)",
            reports.len(),
            reports.iter().filter(|r| r.meta().is_some()).count(),
            failed
        );
        reports
    }

    /// Page paths in route-table order
    pub fn ordered_paths(&self, files: &[SourceFile]) -> Vec<String> {
        self.ordering.sorted(files.iter().map(|file| file.path.as_str()))
    }
}
