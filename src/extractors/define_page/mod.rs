// Page macro extraction
//
// `definePage({...})` is a compile-time macro inside `<script setup>`. The
// same file is transformed twice by the host bundler:
// - with a `?definePage` query the module becomes `export default <literal>`
//   so the router can import the record without loading the component
// - without it the call is stripped and the component compiles normally

pub mod route_meta;

pub use route_meta::{RouteMeta, RouteName};

use crate::config::{DefinePageOptions, NonLiteralArgument};
use crate::error::{ExtractError, Location, Result};
use crate::extractors::base::{find_error_node, node_text, significant_children, SourceEdits};
use crate::extractors::scope::{bound_names, free_identifiers};
use crate::extractors::vue::parse_sfc;
use crate::language::{parse_script, ScriptLang};
use serde::Serialize;
use std::ops::Range;
use tracing::{debug, warn};
use tree_sitter::Node;

pub const DEFINE_PAGE: &str = "definePage";

const EXPORT_PREFIX: &str = "export default ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    /// Keep only the macro argument as the module's default export
    Extract,
    /// Remove the macro call, keep everything else
    Strip,
}

impl ExtractMode {
    /// Extraction is requested through a `?definePage` (or `&definePage`) query on the id
    pub fn from_id(id: &str, macro_name: &str) -> Self {
        if has_query_flag(id, macro_name) {
            ExtractMode::Extract
        } else {
            ExtractMode::Strip
        }
    }
}

fn has_query_flag(id: &str, flag: &str) -> bool {
    if flag.is_empty() {
        return false;
    }
    id.match_indices(flag).any(|(at, _)| {
        let before = id[..at].chars().next_back();
        let after = id[at + flag.len()..].chars().next();
        matches!(before, Some('?') | Some('&'))
            && !after.is_some_and(|c| c.is_alphanumeric() || c == '_')
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformResult {
    pub code: String,
    pub mode: ExtractMode,
    /// Decoded record, only in extraction mode with an object literal argument
    pub meta: Option<RouteMeta>,
}

/// The located macro call, in offsets of the whole file
#[derive(Debug)]
struct MacroSite {
    call: Range<usize>,
    argument: Option<Range<usize>>,
    meta: Option<RouteMeta>,
}

#[derive(Debug, Clone, Default)]
pub struct DefinePageExtractor {
    options: DefinePageOptions,
}

impl DefinePageExtractor {
    pub fn new(options: DefinePageOptions) -> Self {
        Self { options }
    }

    pub fn macro_name(&self) -> &str {
        &self.options.macro_name
    }

    /// Transform a page component, choosing the mode from `id`.
    ///
    /// `Ok(None)` means the file has no macro call and must be left untouched.
    pub fn transform(&self, code: &str, id: &str) -> Result<Option<TransformResult>> {
        let mode = ExtractMode::from_id(id, &self.options.macro_name);
        self.transform_with_mode(code, id, mode)
    }

    pub fn transform_with_mode(
        &self,
        code: &str,
        id: &str,
        mode: ExtractMode,
    ) -> Result<Option<TransformResult>> {
        let Some(site) = self.locate(code, id, mode)? else {
            return Ok(None);
        };

        let mut edits = SourceEdits::new(code);
        match mode {
            ExtractMode::Extract => match &site.argument {
                Some(argument) => {
                    edits
                        .remove(argument.end, code.len())
                        .remove(0, argument.start)
                        .prepend(EXPORT_PREFIX);
                }
                None => {
                    edits.remove(0, code.len()).prepend(format!("{}{{}}", EXPORT_PREFIX));
                }
            },
            ExtractMode::Strip => {
                edits.remove(site.call.start, site.call.end);
            }
        }

        debug!(
            "{}: {:?} {}() at {}..{}",
            id, mode, self.options.macro_name, site.call.start, site.call.end
        );

        Ok(Some(TransformResult {
            code: edits.apply()?,
            mode,
            meta: site.meta,
        }))
    }

    /// Decoded route record of a page, with the same validation as extraction
    pub fn route_meta(&self, code: &str, id: &str) -> Result<Option<RouteMeta>> {
        let site = self.locate(code, id, ExtractMode::Extract)?;
        Ok(site.and_then(|site| site.meta))
    }

    fn locate(&self, code: &str, id: &str, mode: ExtractMode) -> Result<Option<MacroSite>> {
        let macro_name = self.options.macro_name.as_str();
        if !code.contains(macro_name) {
            debug!("{}: no {} in source, skipping", id, macro_name);
            return Ok(None);
        }

        let sfc = parse_sfc(code, id)?;
        if let Some(script) = sfc.script() {
            if script.content(code).contains(macro_name) {
                warn!(
                    "{}: {}() is only supported in <script setup>, ignoring the one in <script>",
                    id, macro_name
                );
            }
        }
        let Some(setup) = sfc.script_setup() else {
            debug!("{}: no <script setup> block", id);
            return Ok(None);
        };

        let lang = ScriptLang::from_lang_attr(setup.lang()).ok_or_else(|| {
            ExtractError::UnsupportedLanguage {
                id: id.to_string(),
                lang: setup.lang().unwrap_or_default().to_string(),
            }
        })?;
        let offset = setup.content.start;
        let script = setup.content(code);
        let at = |relative: usize| Location::from_offset(code, offset + relative);

        let tree = parse_script(script, lang).map_err(|e| ExtractError::Parse {
            id: id.to_string(),
            message: e.to_string(),
            location: at(0),
        })?;
        let root = tree.root_node();
        if let Some(error) = find_error_node(&root) {
            let message = if error.is_missing() {
                format!("missing `{}` in <script setup>", error.kind())
            } else {
                format!("unexpected token in <script setup> ({})", lang.name())
            };
            return Err(ExtractError::Parse {
                id: id.to_string(),
                message,
                location: at(error.start_byte()),
            });
        }

        let calls = find_macro_calls(&root, script, macro_name);
        let call = match calls.as_slice() {
            [] => {
                debug!("{}: {} mentioned but never called", id, macro_name);
                return Ok(None);
            }
            [call] => *call,
            [_, second, ..] => {
                return Err(ExtractError::DuplicateMacro {
                    id: id.to_string(),
                    macro_name: macro_name.to_string(),
                    location: at(second.start_byte()),
                })
            }
        };

        let mut site = MacroSite {
            call: offset + call.start_byte()..offset + call.end_byte(),
            argument: None,
            meta: None,
        };
        // stripping never looks at the argument
        if mode == ExtractMode::Strip {
            return Ok(Some(site));
        }

        let argument = call
            .child_by_field_name("arguments")
            .and_then(|args| significant_children(&args).into_iter().next());
        let reject = self.options.non_literal_argument == NonLiteralArgument::Reject;

        let Some(argument) = argument else {
            if reject {
                return Err(ExtractError::InvalidRouteRecord {
                    id: id.to_string(),
                    macro_name: macro_name.to_string(),
                    found: "no argument".to_string(),
                    location: at(call.start_byte()),
                });
            }
            return Ok(Some(site));
        };

        let is_object = argument.kind() == "object";
        if !is_object && reject {
            return Err(ExtractError::InvalidRouteRecord {
                id: id.to_string(),
                macro_name: macro_name.to_string(),
                found: describe_node(&argument),
                location: at(argument.start_byte()),
            });
        }

        let bound = bound_names(&root, script);
        if let Some(free) = free_identifiers(&argument, script)
            .into_iter()
            .find(|free| bound.contains(&free.name))
        {
            return Err(ExtractError::InvalidScopeReference {
                id: id.to_string(),
                macro_name: macro_name.to_string(),
                identifier: free.name,
                location: at(free.range.start),
            });
        }

        site.argument = Some(offset + argument.start_byte()..offset + argument.end_byte());
        if is_object {
            site.meta = Some(RouteMeta::from_object(&argument, script));
        }
        Ok(Some(site))
    }
}

/// Top-level `name(...)` expression statements, in source order
fn find_macro_calls<'t>(root: &Node<'t>, source: &str, name: &str) -> Vec<Node<'t>> {
    significant_children(root)
        .into_iter()
        .filter(|statement| statement.kind() == "expression_statement")
        .filter_map(|statement| statement.named_child(0))
        .filter(|expr| expr.kind() == "call_expression")
        .filter(|call| {
            call.child_by_field_name("function")
                .is_some_and(|callee| callee.kind() == "identifier" && node_text(&callee, source) == name)
        })
        .collect()
}

fn describe_node(node: &Node) -> String {
    match node.kind() {
        "spread_element" => "a spread argument".to_string(),
        "identifier" => "a variable".to_string(),
        "call_expression" => "a function call".to_string(),
        "ternary_expression" => "a conditional expression".to_string(),
        kind => format!("`{}`", kind),
    }
}

/// Transform with default options
pub fn define_page_transform(code: &str, id: &str) -> Result<Option<TransformResult>> {
    DefinePageExtractor::default().transform(code, id)
}

/// Route record of a page with default options
pub fn extract_route_meta(code: &str, id: &str) -> Result<Option<RouteMeta>> {
    DefinePageExtractor::default().route_meta(code, id)
}
