// Shared building blocks for the page extractors
//
// - edits.rs: offset-based edit list applied once against the original text
// - tree_methods.rs: tree-sitter navigation and literal decoding helpers

pub mod edits;
pub mod tree_methods;

pub use edits::SourceEdits;
pub use tree_methods::{
    find_child_by_type, find_error_node, node_text, significant_children, string_literal_value,
};
