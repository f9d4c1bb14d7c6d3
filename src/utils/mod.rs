// Utilities Module
//
// Helpers shared across the extractors that do not depend on tree-sitter.

/// Lexical path resolution (import specifiers, `/`-style strings)
pub mod paths;
