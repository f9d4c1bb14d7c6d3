// Static decoding of the route record passed to the page macro
//
// Only fields with a literal value are decoded. Anything computed stays as raw
// source text so the route-tree builder can still emit it verbatim.

use crate::extractors::base::{node_text, significant_children, string_literal_value};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tree_sitter::Node;

/// Route name override: a string, or `false` to opt the page out of naming
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteName {
    Named(String),
    Disabled,
}

impl Serialize for RouteName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RouteName::Named(name) => serializer.serialize_str(name),
            RouteName::Disabled => serializer.serialize_bool(false),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<RouteName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alias: Vec<String>,
    /// Raw source of the `meta` value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    /// Remaining properties (and undecodable known ones) as raw source text
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
    /// Full text of the object literal
    pub source: String,
}

impl RouteMeta {
    /// Decode an `object` node. Later duplicate keys override earlier ones.
    pub fn from_object(object: &Node, source: &str) -> Self {
        let mut meta = RouteMeta {
            source: node_text(object, source).to_string(),
            ..Default::default()
        };

        for property in significant_children(object) {
            match property.kind() {
                "pair" => {
                    let (Some(key), Some(value)) = (
                        property.child_by_field_name("key"),
                        property.child_by_field_name("value"),
                    ) else {
                        continue;
                    };
                    if let Some(key) = property_key(&key, source) {
                        meta.set(&key, &value, source);
                    }
                }
                "shorthand_property_identifier" => {
                    let key = node_text(&property, source);
                    meta.set_raw(key, key);
                }
                "method_definition" => {
                    if let Some(key) = property
                        .child_by_field_name("name")
                        .and_then(|name| property_key(&name, source))
                    {
                        meta.set_raw(&key, node_text(&property, source));
                    }
                }
                // spreads and anything else cannot be decoded statically
                _ => {}
            }
        }

        meta
    }

    fn set(&mut self, key: &str, value: &Node, source: &str) {
        match key {
            "name" => match value.kind() {
                "false" => {
                    self.forget(key);
                    self.name = Some(RouteName::Disabled);
                }
                _ => match string_literal_value(value, source) {
                    Some(name) => {
                        self.forget(key);
                        self.name = Some(RouteName::Named(name));
                    }
                    None => self.set_raw(key, node_text(value, source)),
                },
            },
            "path" => match string_literal_value(value, source) {
                Some(path) => {
                    self.forget(key);
                    self.path = Some(path);
                }
                None => self.set_raw(key, node_text(value, source)),
            },
            "alias" => match alias_values(value, source) {
                Some(alias) => {
                    self.forget(key);
                    self.alias = alias;
                }
                None => self.set_raw(key, node_text(value, source)),
            },
            "meta" => self.meta = Some(node_text(value, source).to_string()),
            _ => self.set_raw(key, node_text(value, source)),
        }
    }

    /// Store a raw value, dropping any decoded value of the same key
    fn set_raw(&mut self, key: &str, raw: &str) {
        self.forget(key);
        self.extra.insert(key.to_string(), raw.to_string());
    }

    fn forget(&mut self, key: &str) {
        match key {
            "name" => self.name = None,
            "path" => self.path = None,
            "alias" => self.alias.clear(),
            "meta" => self.meta = None,
            _ => {}
        }
        self.extra.remove(key);
    }
}

/// Static key of an object property; computed keys have none
fn property_key(key: &Node, source: &str) -> Option<String> {
    match key.kind() {
        "property_identifier" | "number" => Some(node_text(key, source).to_string()),
        "string" => string_literal_value(key, source),
        _ => None,
    }
}

/// `'a'` or `['a', 'b']`
fn alias_values(value: &Node, source: &str) -> Option<Vec<String>> {
    if value.kind() == "array" {
        significant_children(value)
            .iter()
            .map(|item| string_literal_value(item, source))
            .collect()
    } else {
        string_literal_value(value, source).map(|alias| vec![alias])
    }
}
