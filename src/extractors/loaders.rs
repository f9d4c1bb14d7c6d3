// Loader export scanning
//
// Runs on a page module after the bundler transformed it. Every binding
// imported from a data-loader module is collected and re-exported as one
// array so the data-loading runtime can discover which loaders a page uses.

use crate::config::LoaderOptions;
use crate::error::{ExtractError, Location, Result};
use crate::extractors::base::{
    find_child_by_type, find_error_node, node_text, significant_children, string_literal_value,
};
use crate::extractors::scope::{declared_names, import_clause_bindings, ImportKind};
use crate::language::{parse_script, ScriptLang};
use crate::utils::paths::{resolve_specifier, to_unix_style};
use anyhow::Context;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;
use tree_sitter::{Node, Tree};

pub const LOADERS_EXPORT: &str = "__loaders";

/// Id used in errors when the caller does not name the module
const ANONYMOUS_MODULE: &str = "<module>";

/// One value binding created by a static import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub local: String,
    pub kind: ImportKind,
    /// Specifier as written in the source
    pub specifier: String,
    pub resolved: PathBuf,
}

/// Default and named value imports of `code`, in source order.
///
/// Namespace imports and `import type` are skipped. Specifiers are resolved
/// against `root` (see `resolve_specifier`).
pub fn scan_imports(code: &str, id: &str, root: &Path) -> Result<Vec<ImportBinding>> {
    let tree = parse_module(code, id)?;
    Ok(imports_in(&tree.root_node(), code, root))
}

fn parse_module(code: &str, id: &str) -> Result<Tree> {
    // TypeScript accepts every ES module plus leftover `import type`
    let tree = parse_script(code, ScriptLang::TypeScript).map_err(|e| ExtractError::Parse {
        id: id.to_string(),
        message: e.to_string(),
        location: Location::default(),
    })?;
    if let Some(error) = find_error_node(&tree.root_node()) {
        return Err(ExtractError::Parse {
            id: id.to_string(),
            message: "invalid module syntax".to_string(),
            location: Location::from_offset(code, error.start_byte()),
        });
    }
    Ok(tree)
}

fn imports_in(root_node: &Node, code: &str, root: &Path) -> Vec<ImportBinding> {
    let mut bindings = Vec::new();
    for statement in significant_children(root_node) {
        if statement.kind() != "import_statement" {
            continue;
        }
        let Some(specifier) = statement
            .child_by_field_name("source")
            .and_then(|source| string_literal_value(&source, code))
        else {
            continue;
        };
        let resolved = resolve_specifier(root, &specifier);

        for imported in import_clause_bindings(&statement, code) {
            if imported.type_only || imported.kind == ImportKind::Namespace {
                continue;
            }
            bindings.push(ImportBinding {
                local: imported.local,
                kind: imported.kind,
                specifier: specifier.clone(),
                resolved: resolved.clone(),
            });
        }
    }
    bindings
}

/// Top-level statement that already binds or exports `name`
fn reserved_name_site<'t>(root_node: &Node<'t>, code: &str, name: &str) -> Option<Node<'t>> {
    significant_children(root_node).into_iter().find(|statement| {
        let mut node = *statement;
        if statement.kind() == "export_statement" {
            if exports_name(statement, code, name) {
                return true;
            }
            match statement.child_by_field_name("declaration") {
                Some(declaration) => node = declaration,
                None => return false,
            }
        }
        match node.kind() {
            // parameters are not module bindings
            "function_declaration"
            | "generator_function_declaration"
            | "class_declaration"
            | "abstract_class_declaration"
            | "enum_declaration" => node
                .child_by_field_name("name")
                .is_some_and(|ident| node_text(&ident, code) == name),
            _ => declared_names(&node, code).contains(name),
        }
    })
}

/// `export { a as name }`
fn exports_name(statement: &Node, code: &str, name: &str) -> bool {
    let Some(clause) = find_child_by_type(statement, "export_clause") else {
        return false;
    };
    significant_children(&clause)
        .iter()
        .filter(|specifier| specifier.kind() == "export_specifier")
        .filter_map(|specifier| {
            specifier
                .child_by_field_name("alias")
                .or_else(|| specifier.child_by_field_name("name"))
        })
        .any(|exported| {
            string_literal_value(&exported, code)
                .unwrap_or_else(|| node_text(&exported, code).to_string())
                == name
        })
}

/// Local names of the bindings imported from loader modules, in import order.
///
/// Names starting with `_` are private and never exported.
pub fn extract_loaders(
    code: &str,
    is_loader_path: impl Fn(&Path) -> bool,
    root: &Path,
) -> Result<Vec<String>> {
    let bindings = scan_imports(code, ANONYMOUS_MODULE, root)?;
    Ok(loader_names(bindings, is_loader_path))
}

fn loader_names(
    bindings: Vec<ImportBinding>,
    is_loader_path: impl Fn(&Path) -> bool,
) -> Vec<String> {
    bindings
        .into_iter()
        .filter(|binding| is_loader_path(binding.resolved.as_path()))
        .filter(|binding| !binding.local.starts_with('_'))
        .map(|binding| binding.local)
        .collect()
}

/// `export const <name> = [\n<a>,\n<b>\n];\n`
pub fn export_statement(export_name: &str, names: &[String]) -> String {
    format!("export const {} = [\n{}\n];\n", export_name, names.join(",\n"))
}

pub fn loaders_export_statement(names: &[String]) -> String {
    export_statement(LOADERS_EXPORT, names)
}

/// `code` followed by the loaders export, or `code` unchanged when there are none
pub fn append_loaders_export(code: &str, names: &[String]) -> String {
    append_export(code, LOADERS_EXPORT, names)
}

fn append_export(code: &str, export_name: &str, names: &[String]) -> String {
    if names.is_empty() {
        return code.to_string();
    }
    format!("{}\n{}", code, export_statement(export_name, names))
}

/// Include/exclude glob filter over resolved import paths
#[derive(Debug, Clone)]
pub struct LoaderFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl LoaderFilter {
    pub fn new(include: &[String], exclude: &[String]) -> anyhow::Result<Self> {
        Ok(Self {
            include: compile_patterns(include)?,
            exclude: compile_patterns(exclude)?,
        })
    }

    pub fn from_options(options: &LoaderOptions) -> anyhow::Result<Self> {
        Self::new(&options.include, &options.exclude)
    }

    pub fn is_loader_path(&self, path: &Path) -> bool {
        let path = to_unix_style(path);
        self.include.iter().any(|p| p.matches(&path))
            && !self.exclude.iter().any(|p| p.matches(&path))
    }
}

fn compile_patterns(patterns: &[String]) -> anyhow::Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).with_context(|| format!("Invalid loader glob '{}'", pattern))
        })
        .collect()
}

/// Loader scanning bound to one project root and configuration
#[derive(Debug, Clone)]
pub struct LoaderScanner {
    root: PathBuf,
    filter: LoaderFilter,
    export_name: String,
}

impl LoaderScanner {
    pub fn new(root: impl Into<PathBuf>, options: &LoaderOptions) -> anyhow::Result<Self> {
        Ok(Self {
            root: root.into(),
            filter: LoaderFilter::from_options(options)?,
            export_name: options.export_name.clone(),
        })
    }

    pub fn extract(&self, code: &str, id: &str) -> Result<Vec<String>> {
        let tree = parse_module(code, id)?;
        Ok(self.names_in(&tree.root_node(), code, id))
    }

    /// Append the loaders export to a transformed module, if it imports any loaders.
    ///
    /// Fails when the module already declares or exports the export name.
    pub fn transform(&self, code: &str, id: &str) -> Result<Option<String>> {
        let tree = parse_module(code, id)?;
        let root_node = tree.root_node();
        let names = self.names_in(&root_node, code, id);
        if names.is_empty() {
            return Ok(None);
        }
        if let Some(site) = reserved_name_site(&root_node, code, &self.export_name) {
            return Err(ExtractError::ReservedExport {
                id: id.to_string(),
                name: self.export_name.clone(),
                location: Location::from_offset(code, site.start_byte()),
            });
        }
        Ok(Some(append_export(code, &self.export_name, &names)))
    }

    fn names_in(&self, root_node: &Node, code: &str, id: &str) -> Vec<String> {
        let bindings = imports_in(root_node, code, &self.root);
        let names = loader_names(bindings, |path| self.filter.is_loader_path(path));
        debug!("{}: {} loader binding(s)", id, names.len());
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "/home/dev/app";

    const MODULE: &str = r#"import { defineComponent } from 'vue'
import { useUser, useSettings as useUserSettings, _internal } from '/src/loaders/user.ts'
import helpers from '/src/utils/helpers.ts'
import useList, { useDetail } from './src/loaders/list.js'
import * as allLoaders from '/src/loaders/all.ts'
import '/src/loaders/side-effect.ts'
const page = defineComponent({})
export default page
"#;

    fn in_loaders_dir(path: &Path) -> bool {
        to_unix_style(path).contains("/src/loaders/")
    }

    #[test]
    fn test_scan_imports_resolves_specifiers() {
        let bindings = scan_imports(MODULE, "page.vue", Path::new(ROOT)).unwrap();
        let summary: Vec<(&str, ImportKind, &str)> = bindings
            .iter()
            .map(|b| (b.local.as_str(), b.kind, b.specifier.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("defineComponent", ImportKind::Named, "vue"),
                ("useUser", ImportKind::Named, "/src/loaders/user.ts"),
                ("useUserSettings", ImportKind::Named, "/src/loaders/user.ts"),
                ("_internal", ImportKind::Named, "/src/loaders/user.ts"),
                ("helpers", ImportKind::Default, "/src/utils/helpers.ts"),
                ("useList", ImportKind::Default, "./src/loaders/list.js"),
                ("useDetail", ImportKind::Named, "./src/loaders/list.js"),
            ]
        );
        assert_eq!(
            bindings[1].resolved,
            PathBuf::from("/home/dev/app/src/loaders/user.ts")
        );
        assert_eq!(
            bindings[5].resolved,
            PathBuf::from("/home/dev/app/src/loaders/list.js")
        );
    }

    #[test]
    fn test_extract_loaders_filters_and_keeps_order() {
        let names = extract_loaders(MODULE, in_loaders_dir, Path::new(ROOT)).unwrap();
        assert_eq!(names, vec!["useUser", "useUserSettings", "useList", "useDetail"]);
    }

    #[test]
    fn test_type_imports_skipped() {
        let code = "import type { Loader } from '/src/loaders/types.ts'\nimport { type Other, useA } from '/src/loaders/a.ts'\n";
        let names = extract_loaders(code, in_loaders_dir, Path::new(ROOT)).unwrap();
        assert_eq!(names, vec!["useA"]);
    }

    #[test]
    fn test_export_statement_format() {
        let names = vec!["useUser".to_string(), "useList".to_string()];
        assert_eq!(
            loaders_export_statement(&names),
            "export const __loaders = [\nuseUser,\nuseList\n];\n"
        );
        assert_eq!(
            append_loaders_export("const a = 1", &names),
            "const a = 1\nexport const __loaders = [\nuseUser,\nuseList\n];\n"
        );
        assert_eq!(append_loaders_export("const a = 1", &[]), "const a = 1");
    }

    #[test]
    fn test_loader_filter_globs() {
        let filter = LoaderFilter::new(
            &["**/loaders/**".to_string()],
            &["**/*.spec.ts".to_string()],
        )
        .unwrap();
        assert!(filter.is_loader_path(Path::new("/home/dev/app/src/loaders/user.ts")));
        assert!(!filter.is_loader_path(Path::new("/home/dev/app/src/loaders/user.spec.ts")));
        assert!(!filter.is_loader_path(Path::new("/home/dev/app/src/utils/helpers.ts")));
    }

    #[test]
    fn test_invalid_glob_is_reported() {
        let err = LoaderFilter::new(&["[".to_string()], &[]).unwrap_err();
        assert!(err.to_string().contains("Invalid loader glob '['"));
    }

    #[test]
    fn test_scanner_transform() {
        let scanner = LoaderScanner::new(ROOT, &LoaderOptions::default()).unwrap();
        let out = scanner.transform(MODULE, "page.vue").unwrap().unwrap();
        assert!(out.starts_with(MODULE));
        assert!(out.ends_with(
            "\nexport const __loaders = [\nuseUser,\nuseUserSettings,\nuseList,\nuseDetail\n];\n"
        ));

        let plain = "import { ref } from 'vue'\n";
        assert_eq!(scanner.transform(plain, "other.vue").unwrap(), None);
    }

    #[test]
    fn test_custom_export_name() {
        let options = LoaderOptions {
            export_name: "__pageLoaders".to_string(),
            ..Default::default()
        };
        let scanner = LoaderScanner::new(ROOT, &options).unwrap();
        let out = scanner
            .transform("import { useA } from '/src/loaders/a.ts'", "p.vue")
            .unwrap()
            .unwrap();
        assert!(out.ends_with("export const __pageLoaders = [\nuseA\n];\n"));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = extract_loaders("import { from 'x'", in_loaders_dir, Path::new(ROOT)).unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn test_existing_export_name_is_rejected() {
        let scanner = LoaderScanner::new(ROOT, &LoaderOptions::default()).unwrap();
        let import = "import { useA } from '/src/loaders/a.ts'\n";

        for clash in [
            "export const __loaders = []\n",
            "let __loaders\n",
            "function __loaders() {}\n",
            "const list = []\nexport { list as __loaders }\n",
        ] {
            let code = format!("{}{}", import, clash);
            match scanner.transform(&code, "page.vue").unwrap_err() {
                ExtractError::ReservedExport { name, location, .. } => {
                    assert_eq!(name, "__loaders");
                    assert_eq!(location.column, 1);
                    assert!(location.line >= 2);
                }
                other => panic!("unexpected error {other:?}"),
            }
        }

        // locals inside functions do not clash
        let nested = format!("{}function f(__loaders) {{ const __loaders2 = __loaders }}\n", import);
        assert!(scanner.transform(&nested, "page.vue").unwrap().is_some());
    }
}
