//! Scope analysis for script fragments
//!
//! Two questions are answered here:
//! - which names does a fragment declare (`bound_names`), looking through
//!   expressions but never into statement blocks
//! - which identifiers does an expression reference without binding them
//!   itself (`free_identifiers`)
//!
//! Both walk the tree-sitter tree directly. The free-identifier walk goes
//! through `walk_with_scopes`, which keeps an explicit stack of bound-name sets
//! and drives a `ScopeVisitor` with enter/leave callbacks.

use super::base::{find_child_by_type, node_text};
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::Range;
use tracing::trace;
use tree_sitter::Node;

const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "function",
    "generator_function",
    "arrow_function",
    "method_definition",
];

/// Type-level subtrees never reference runtime values we care about
const TYPE_KINDS: &[&str] = &[
    "type_annotation",
    "type_arguments",
    "type_parameters",
    "type_alias_declaration",
    "interface_declaration",
    "type_query",
];

/// Names introduced by declarations in `node`.
///
/// Covers variable declarators (with destructuring), function/class/enum
/// declarations, import bindings, parameters of functions met outside
/// blocks, catch parameters and `for … in/of` heads. Statement blocks and
/// class bodies below `node` are opaque.
pub fn bound_names(node: &Node, source: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    collect_declarations(node, source, &mut names, true, true);
    names
}

/// Like `bound_names` but without function parameters: the names a block
/// (or a whole module) itself introduces into its scope.
pub fn declared_names(node: &Node, source: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    collect_declarations(node, source, &mut names, true, false);
    names
}

fn collect_declarations(
    node: &Node,
    source: &str,
    names: &mut BTreeSet<String>,
    is_root: bool,
    include_params: bool,
) {
    match node.kind() {
        "statement_block" | "class_body" if !is_root => return,
        kind if !include_params && !is_root && FUNCTION_KINDS.contains(&kind) => {
            // a nested function contributes only its declared name
            if matches!(kind, "function_declaration" | "generator_function_declaration") {
                insert_field_name(node, "name", source, names);
            }
            return;
        }
        "variable_declarator" => {
            if let Some(pattern) = node.child_by_field_name("name") {
                collect_pattern_names(&pattern, source, names);
            }
        }
        "function_declaration" | "generator_function_declaration" => {
            insert_field_name(node, "name", source, names);
            collect_params(node, source, names);
        }
        "class_declaration" | "abstract_class_declaration" | "enum_declaration" => {
            insert_field_name(node, "name", source, names);
        }
        "function_expression" | "function" | "generator_function" | "arrow_function"
        | "method_definition" => {
            collect_params(node, source, names);
        }
        "import_statement" => {
            for binding in import_clause_bindings(node, source) {
                names.insert(binding.local);
            }
            return;
        }
        "catch_clause" => {
            if let Some(param) = node.child_by_field_name("parameter") {
                collect_pattern_names(&param, source, names);
            }
        }
        "for_in_statement" => {
            if node.child_by_field_name("kind").is_some() {
                if let Some(left) = node.child_by_field_name("left") {
                    collect_pattern_names(&left, source, names);
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_declarations(&child, source, names, false, include_params);
    }
}

fn insert_field_name(node: &Node, field: &str, source: &str, names: &mut BTreeSet<String>) {
    if let Some(name) = node.child_by_field_name(field) {
        names.insert(node_text(&name, source).to_string());
    }
}

/// Parameter names of a function-like node
fn collect_params(node: &Node, source: &str, names: &mut BTreeSet<String>) {
    // `x => …` has a single `parameter`
    if let Some(param) = node.child_by_field_name("parameter") {
        collect_pattern_names(&param, source, names);
    }
    if let Some(params) = node.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            collect_pattern_names(&param, source, names);
        }
    }
}

/// Identifiers bound by a (possibly destructuring) pattern
fn collect_pattern_names(node: &Node, source: &str, names: &mut BTreeSet<String>) {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            names.insert(node_text(node, source).to_string());
        }
        "object_pattern" | "array_pattern" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_pattern_names(&child, source, names);
            }
        }
        "pair_pattern" => {
            if let Some(value) = node.child_by_field_name("value") {
                collect_pattern_names(&value, source, names);
            }
        }
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = node.child_by_field_name("left") {
                collect_pattern_names(&left, source, names);
            }
        }
        "rest_pattern" => {
            if let Some(inner) = node.named_child(0) {
                collect_pattern_names(&inner, source, names);
            }
        }
        // TypeScript parameter wrappers
        "required_parameter" | "optional_parameter" => {
            if let Some(pattern) = node.child_by_field_name("pattern") {
                collect_pattern_names(&pattern, source, names);
            }
        }
        _ => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Default,
    Named,
    Namespace,
}

/// One local binding created by an import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedName {
    pub local: String,
    pub kind: ImportKind,
    /// `import type …` or `{ type X }`
    pub type_only: bool,
}

/// Local bindings of an `import_statement`, in source order
pub fn import_clause_bindings(import_statement: &Node, source: &str) -> Vec<ImportedName> {
    let mut bindings = Vec::new();
    let Some(clause) = find_child_by_type(import_statement, "import_clause") else {
        return bindings;
    };
    let statement_type_only = find_child_by_type(import_statement, "type").is_some();

    let mut clause_cursor = clause.walk();
    for child in clause.named_children(&mut clause_cursor) {
        match child.kind() {
            "identifier" => bindings.push(ImportedName {
                local: node_text(&child, source).to_string(),
                kind: ImportKind::Default,
                type_only: statement_type_only,
            }),
            "namespace_import" => {
                let mut ns_cursor = child.walk();
                let local = child
                    .named_children(&mut ns_cursor)
                    .find(|n| n.kind() == "identifier");
                if let Some(local) = local {
                    bindings.push(ImportedName {
                        local: node_text(&local, source).to_string(),
                        kind: ImportKind::Namespace,
                        type_only: statement_type_only,
                    });
                }
            }
            "named_imports" => {
                let mut named_cursor = child.walk();
                for specifier in child.named_children(&mut named_cursor) {
                    if specifier.kind() != "import_specifier" {
                        continue;
                    }
                    let local = specifier
                        .child_by_field_name("alias")
                        .or_else(|| specifier.child_by_field_name("name"));
                    if let Some(local) = local {
                        bindings.push(ImportedName {
                            local: node_text(&local, source).to_string(),
                            kind: ImportKind::Named,
                            type_only: statement_type_only
                                || find_child_by_type(&specifier, "type").is_some(),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    bindings
}

/// Stack of bound-name sets, innermost last
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<BTreeSet<String>>,
}

impl ScopeStack {
    pub fn push(&mut self, frame: BTreeSet<String>) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<BTreeSet<String>> {
        self.frames.pop()
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.frames.iter().rev().any(|frame| frame.contains(name))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Descend,
    Skip,
}

pub trait ScopeVisitor {
    fn enter(&mut self, node: &Node, source: &str, scopes: &ScopeStack) -> Walk;

    fn leave(&mut self, _node: &Node, _source: &str, _scopes: &ScopeStack) {}
}

/// Depth-first walk that pushes a scope for every function (its parameters
/// and, for named function expressions, its own name), every block (its
/// declarations), every `catch` clause and every `for` head.
pub fn walk_with_scopes<V: ScopeVisitor>(
    node: &Node,
    source: &str,
    scopes: &mut ScopeStack,
    visitor: &mut V,
) {
    if visitor.enter(node, source, scopes) == Walk::Skip {
        return;
    }

    let frame = match node.kind() {
        kind if FUNCTION_KINDS.contains(&kind) => {
            let mut frame = BTreeSet::new();
            collect_params(node, source, &mut frame);
            if matches!(kind, "function_expression" | "function" | "generator_function") {
                insert_field_name(node, "name", source, &mut frame);
            }
            Some(frame)
        }
        "statement_block" => Some(declared_names(node, source)),
        "catch_clause" | "for_in_statement" | "for_statement" => {
            Some(declared_names(node, source))
        }
        _ => None,
    };

    let pushed = frame.is_some();
    if let Some(frame) = frame {
        scopes.push(frame);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_with_scopes(&child, source, scopes, visitor);
    }

    if pushed {
        scopes.pop();
    }
    visitor.leave(node, source, scopes);
}

/// An identifier referenced but not bound inside the walked expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeIdentifier {
    pub name: String,
    /// Byte range relative to the walked source
    pub range: Range<usize>,
}

struct FreeIdentifierCollector {
    found: Vec<FreeIdentifier>,
}

impl ScopeVisitor for FreeIdentifierCollector {
    fn enter(&mut self, node: &Node, source: &str, scopes: &ScopeStack) -> Walk {
        let kind = node.kind();
        if TYPE_KINDS.contains(&kind) {
            return Walk::Skip;
        }
        if kind == "identifier" || kind == "shorthand_property_identifier" {
            let name = node_text(node, source);
            if is_binding_position(node) {
                trace!("'{}' is a binding, not a reference", name);
            } else if scopes.is_bound(name) {
                trace!("'{}' bound by an enclosing scope (depth {})", name, scopes.depth());
            } else {
                self.found.push(FreeIdentifier {
                    name: name.to_string(),
                    range: node.start_byte()..node.end_byte(),
                });
            }
        }
        Walk::Descend
    }
}

/// Free identifiers of `node` in source order
pub fn free_identifiers(node: &Node, source: &str) -> Vec<FreeIdentifier> {
    let mut collector = FreeIdentifierCollector { found: Vec::new() };
    let mut scopes = ScopeStack::default();
    walk_with_scopes(node, source, &mut scopes, &mut collector);
    collector.found
}

fn is_binding_position(node: &Node) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    let is_field = |field: &str| {
        parent
            .child_by_field_name(field)
            .is_some_and(|child| child.id() == node.id())
    };

    match parent.kind() {
        "variable_declarator" => is_field("name"),
        "formal_parameters" | "array_pattern" | "object_pattern" | "rest_pattern" => true,
        "required_parameter" | "optional_parameter" => is_field("pattern"),
        "assignment_pattern" | "object_assignment_pattern" => is_field("left"),
        "pair_pattern" => is_field("value"),
        "arrow_function" => is_field("parameter"),
        "catch_clause" => is_field("parameter"),
        "for_in_statement" => is_field("left") && parent.child_by_field_name("kind").is_some(),
        "function_declaration"
        | "generator_function_declaration"
        | "function_expression"
        | "function"
        | "generator_function"
        | "class"
        | "class_declaration" => is_field("name"),
        "import_specifier" | "import_clause" | "namespace_import" | "export_specifier" => true,
        _ => false,
    }
}
