//! Page component extractors
//!
//! Static analysis over page sources; nothing here executes component code.
//!
//! # Architecture
//!
//! - `base` - edit list and tree-sitter helpers shared by the extractors
//! - `vue` - SFC block splitting with byte offsets into the original file
//! - `scope` - bound names and free identifiers of script fragments
//! - `define_page` - `definePage()` extraction/stripping and route records
//! - `loaders` - `__loaders` export synthesis from static imports
//! - `manager` - PageScanner, parallel batch scanning

pub mod base;
pub mod define_page;
pub mod loaders;
pub mod manager;
pub mod scope;
pub mod vue;

// Re-export the public API
pub use define_page::{
    define_page_transform, extract_route_meta, DefinePageExtractor, ExtractMode, RouteMeta,
    RouteName, TransformResult,
};
pub use loaders::{
    append_loaders_export, extract_loaders, loaders_export_statement, scan_imports,
    ImportBinding, LoaderFilter, LoaderScanner,
};
pub use manager::{PageReport, PageScanner, SourceFile};
pub use scope::{bound_names, free_identifiers, FreeIdentifier, ImportKind};
