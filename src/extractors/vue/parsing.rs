// Vue SFC (Single File Component) block splitting
//
// Splits a .vue file into its root-level blocks while keeping byte offsets
// into the original text, so extractors can edit the file in place.

use super::helpers::{parse_attrs, BLOCK_OPEN_RE, TEMPLATE_TAG_RE};
use crate::error::{ExtractError, Location, Result};
use std::fmt;
use std::ops::Range;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Template,
    Script,
    ScriptSetup,
    Style,
    Custom(String),
}

impl BlockKind {
    pub fn tag(&self) -> &str {
        match self {
            BlockKind::Template => "template",
            BlockKind::Script | BlockKind::ScriptSetup => "script",
            BlockKind::Style => "style",
            BlockKind::Custom(tag) => tag.as_str(),
        }
    }
}

/// One root-level block of an SFC
#[derive(Debug, Clone)]
pub struct SfcBlock {
    pub kind: BlockKind,
    pub attrs: Vec<(String, Option<String>)>,
    /// Offset of the opening `<`
    pub tag_start: usize,
    /// Byte range of the inner content in the original source
    pub content: Range<usize>,
}

impl SfcBlock {
    pub fn attr(&self, name: &str) -> Option<Option<&str>> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_deref())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn lang(&self) -> Option<&str> {
        self.attr("lang").flatten()
    }

    pub fn content<'s>(&self, source: &'s str) -> &'s str {
        &source[self.content.clone()]
    }
}

impl fmt::Display for SfcBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let setup = if self.kind == BlockKind::ScriptSetup {
            " setup"
        } else {
            ""
        };
        write!(
            f,
            "<{}{}>@{}..{}{}",
            self.kind.tag(),
            setup,
            self.content.start,
            self.content.end,
            self.lang()
                .map(|l| format!("({})", l))
                .unwrap_or_default()
        )
    }
}

/// All root-level blocks of one SFC, in source order
#[derive(Debug, Clone, Default)]
pub struct SfcDescriptor {
    pub blocks: Vec<SfcBlock>,
}

impl SfcDescriptor {
    pub fn template(&self) -> Option<&SfcBlock> {
        self.find(&BlockKind::Template)
    }

    pub fn script(&self) -> Option<&SfcBlock> {
        self.find(&BlockKind::Script)
    }

    pub fn script_setup(&self) -> Option<&SfcBlock> {
        self.find(&BlockKind::ScriptSetup)
    }

    fn find(&self, kind: &BlockKind) -> Option<&SfcBlock> {
        self.blocks.iter().find(|b| &b.kind == kind)
    }
}

/// Split an SFC into blocks.
///
/// Fails on unterminated blocks and on duplicate `<template>`, `<script>` or
/// `<script setup>` blocks.
pub fn parse_sfc(source: &str, id: &str) -> Result<SfcDescriptor> {
    let mut blocks: Vec<SfcBlock> = Vec::new();
    let mut pos = 0;

    while let Some(found) = source[pos..].find('<') {
        let start = pos + found;
        let rest = &source[start..];

        if rest.starts_with("<!--") {
            pos = match rest.find("-->") {
                Some(end) => start + end + 3,
                None => return Err(parse_error(source, id, start, "unterminated comment")),
            };
            continue;
        }

        let Some(caps) = BLOCK_OPEN_RE.captures(rest) else {
            pos = start + 1;
            continue;
        };

        let tag = caps[1].to_ascii_lowercase();
        let attr_text = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let open_end = start + caps[0].len();

        // `<foo />` has no content
        if attr_text.trim_end().ends_with('/') {
            pos = open_end;
            continue;
        }

        let end = if tag == "template" {
            find_template_end(source, open_end)
        } else {
            find_raw_end(source, open_end, &tag)
        };
        let (content_end, close_end) = end.ok_or_else(|| {
            parse_error(
                source,
                id,
                start,
                &format!("<{}> element is missing end tag", tag),
            )
        })?;

        let attrs = parse_attrs(attr_text);
        let kind = match tag.as_str() {
            "template" => BlockKind::Template,
            "script" if attrs.iter().any(|(k, _)| k == "setup") => BlockKind::ScriptSetup,
            "script" => BlockKind::Script,
            "style" => BlockKind::Style,
            _ => BlockKind::Custom(tag.clone()),
        };

        let unique = matches!(
            kind,
            BlockKind::Template | BlockKind::Script | BlockKind::ScriptSetup
        );
        if unique && blocks.iter().any(|b| b.kind == kind) {
            let setup = if kind == BlockKind::ScriptSetup { " setup" } else { "" };
            return Err(parse_error(
                source,
                id,
                start,
                &format!("single file component can contain only one <{}{}> element", tag, setup),
            ));
        }

        let block = SfcBlock {
            kind,
            attrs,
            tag_start: start,
            content: open_end..content_end,
        };
        debug!("SFC block {} in {}", block, id);
        blocks.push(block);
        pos = close_end;
    }

    Ok(SfcDescriptor { blocks })
}

/// Content end and closing-tag end of a `<template>`, honouring nested templates.
///
/// Tags inside `<!-- -->` comments do not count.
fn find_template_end(source: &str, open_end: usize) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    let mut pos = open_end;
    while let Some(m) = TEMPLATE_TAG_RE.find_at(source, pos) {
        if let Some(found) = source[pos..m.start()].find("<!--") {
            let body = pos + found + 4;
            pos = body + source[body..].find("-->")? + 3;
            continue;
        }
        let text = m.as_str();
        if text.starts_with("</") {
            depth -= 1;
            if depth == 0 {
                return Some((m.start(), m.end()));
            }
        } else if !text.ends_with("/>") {
            depth += 1;
        }
        pos = m.end();
    }
    None
}

/// Raw-text blocks end at the first `</tag>`
fn find_raw_end(source: &str, open_end: usize, tag: &str) -> Option<(usize, usize)> {
    let needle = format!("</{}", tag);
    let mut search = open_end;
    loop {
        let found = search + source[search..].find(&needle)?;
        let after = found + needle.len();
        let rest = &source[after..];
        let trimmed = rest.trim_start();
        if trimmed.starts_with('>') {
            let close_end = after + (rest.len() - trimmed.len()) + 1;
            return Some((found, close_end));
        }
        // `</scripts` or similar: keep looking
        search = after;
    }
}

fn parse_error(source: &str, id: &str, offset: usize, message: &str) -> ExtractError {
    ExtractError::Parse {
        id: id.to_string(),
        message: message.to_string(),
        location: Location::from_offset(source, offset),
    }
}
