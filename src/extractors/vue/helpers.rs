// Vue SFC regex patterns
//
// Shared patterns used by the block splitter

use regex::Regex;
use std::sync::LazyLock;

// Static regex patterns compiled once for performance
// Attribute text may hold `>` inside quoted values (`generic="T extends Map<K, V>"`)
pub(super) static BLOCK_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<([A-Za-z][A-Za-z0-9-]*)(\s(?:"[^"]*"|'[^']*'|[^>"'])*)?>"#).unwrap()
});

pub(super) static TEMPLATE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(/?)template(?:\s(?:"[^"]*"|'[^']*'|[^>"'])*)?>"#).unwrap()
});

pub(super) static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/>"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

/// Parse the attribute text of an opening tag into `(name, value)` pairs
pub(super) fn parse_attrs(text: &str) -> Vec<(String, Option<String>)> {
    ATTR_RE
        .captures_iter(text)
        .map(|caps| {
            let name = caps[1].to_string();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string());
            (name, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attrs() {
        let attrs = parse_attrs(r#" setup lang="ts" generic='T extends X' src=./a.js"#);
        assert_eq!(
            attrs,
            vec![
                ("setup".to_string(), None),
                ("lang".to_string(), Some("ts".to_string())),
                ("generic".to_string(), Some("T extends X".to_string())),
                ("src".to_string(), Some("./a.js".to_string())),
            ]
        );
    }

    #[test]
    fn test_block_open() {
        let caps = BLOCK_OPEN_RE.captures("<script setup lang=\"ts\">\nconst a").unwrap();
        assert_eq!(&caps[1], "script");
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some(" setup lang=\"ts\""));
        assert!(BLOCK_OPEN_RE.captures("< script>").is_none());
    }

    #[test]
    fn test_block_open_quoted_gt() {
        let tag = r#"<script setup lang="ts" generic="T extends Record<string, number>">"#;
        let caps = BLOCK_OPEN_RE.captures(tag).unwrap();
        assert_eq!(&caps[0], tag);
        assert_eq!(
            parse_attrs(&caps[2])[2],
            (
                "generic".to_string(),
                Some("T extends Record<string, number>".to_string())
            )
        );

        let m = TEMPLATE_TAG_RE.find(r#"<template v-if="a > b">x"#).unwrap();
        assert_eq!(m.as_str(), r#"<template v-if="a > b">"#);
    }
}
