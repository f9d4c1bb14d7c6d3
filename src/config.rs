// Configuration for page analysis
//
// All sections default sensibly so an empty JSON object is a valid config.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// What to do when the macro argument is not a plain object literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonLiteralArgument {
    /// Fail extraction with `ExtractError::InvalidRouteRecord`
    #[default]
    Reject,
    /// Extract the argument text as-is (still scope-checked)
    Passthrough,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefinePageOptions {
    pub macro_name: String,
    pub non_literal_argument: NonLiteralArgument,
}

impl Default for DefinePageOptions {
    fn default() -> Self {
        Self {
            macro_name: "definePage".to_string(),
            non_literal_argument: NonLiteralArgument::Reject,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrderingOptions {
    /// Stem of the file that represents a directory's own route
    pub index_name: String,
}

impl Default for OrderingOptions {
    fn default() -> Self {
        Self {
            index_name: "index".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Glob patterns (matched against resolved absolute paths) of loader modules
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Identifier of the synthesized export
    pub export_name: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            include: vec!["**/loaders/**".to_string()],
            exclude: Vec::new(),
            export_name: "__loaders".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    pub define_page: DefinePageOptions,
    pub ordering: OrderingOptions,
    pub loaders: LoaderOptions,
}

impl RoutesConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid routes config JSON")
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read routes config '{}'", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to load routes config '{}'", path.display()))
    }
}
