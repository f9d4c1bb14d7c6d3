//! Script language support - tree-sitter grammar selection
//!
//! Page components carry their script language in the block's `lang`
//! attribute. All grammar configuration lives here.

use anyhow::{Context, Result};
use tree_sitter::{Language, Parser, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLang {
    JavaScript,
    TypeScript,
    Tsx,
}

impl ScriptLang {
    /// Map a `lang` attribute value; a missing attribute means JavaScript.
    ///
    /// Returns `None` for languages without a grammar (e.g. `coffee`).
    pub fn from_lang_attr(lang: Option<&str>) -> Option<Self> {
        match lang.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("js") | Some("javascript") | Some("jsx") | Some("mjs") => {
                Some(ScriptLang::JavaScript)
            }
            Some("ts") | Some("typescript") | Some("mts") => Some(ScriptLang::TypeScript),
            Some("tsx") => Some(ScriptLang::Tsx),
            Some(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScriptLang::JavaScript => "javascript",
            ScriptLang::TypeScript => "typescript",
            ScriptLang::Tsx => "tsx",
        }
    }
}

/// Get tree-sitter language parser for a script language
pub fn get_tree_sitter_language(lang: ScriptLang) -> Language {
    match lang {
        // JSX is part of the JavaScript grammar
        ScriptLang::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        ScriptLang::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        ScriptLang::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}

/// Parse a script with a fresh parser.
///
/// The returned tree may contain ERROR nodes; callers decide whether that is fatal.
pub fn parse_script(source: &str, lang: ScriptLang) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&get_tree_sitter_language(lang))
        .map_err(|e| anyhow::anyhow!("Failed to set parser language for {}: {}", lang.name(), e))?;

    parser
        .parse(source, None)
        .with_context(|| format!("Failed to parse {} source", lang.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_attr_mapping() {
        assert_eq!(ScriptLang::from_lang_attr(None), Some(ScriptLang::JavaScript));
        assert_eq!(ScriptLang::from_lang_attr(Some("ts")), Some(ScriptLang::TypeScript));
        assert_eq!(ScriptLang::from_lang_attr(Some("TS")), Some(ScriptLang::TypeScript));
        assert_eq!(ScriptLang::from_lang_attr(Some("tsx")), Some(ScriptLang::Tsx));
        assert_eq!(ScriptLang::from_lang_attr(Some("jsx")), Some(ScriptLang::JavaScript));
        assert_eq!(ScriptLang::from_lang_attr(Some("coffee")), None);
    }

    #[test]
    fn test_all_grammars_parse() {
        for (lang, source) in [
            (ScriptLang::JavaScript, "const a = <div>{b}</div>"),
            (ScriptLang::TypeScript, "const a: number = 1 as number"),
            (ScriptLang::Tsx, "const a = <div>{b as string}</div>"),
        ] {
            let tree = parse_script(source, lang).unwrap();
            assert!(
                !tree.root_node().has_error(),
                "{} failed to parse {source:?}",
                lang.name()
            );
        }
    }
}
