// Tree navigation helpers shared by the script extractors
//
// All helpers take the source the tree was parsed from; byte ranges are
// relative to that source.

use std::iter::Peekable;
use std::str::Chars;
use tree_sitter::Node;

/// Text of a node, empty when the range is not valid UTF-8 boundaries of `source`
pub fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Named children without comments
pub fn significant_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

/// First child of the given kind
pub fn find_child_by_type<'t>(node: &Node<'t>, child_type: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == child_type);
    found
}

/// Depth-first search for the first ERROR or MISSING node
pub fn find_error_node<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(*node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_error_node(&child) {
            return Some(found);
        }
    }
    // has_error() without a concrete error child: report the node itself
    Some(*node)
}

/// Decode a `string` (or substitution-free `template_string`) literal.
///
/// Returns `None` for anything that is not a static string, and for escapes
/// that do not decode to text (legacy octal, lone surrogates, bad hex).
pub fn string_literal_value(node: &Node, source: &str) -> Option<String> {
    match node.kind() {
        "string" => {}
        "template_string" => {
            let mut cursor = node.walk();
            if node
                .named_children(&mut cursor)
                .any(|c| c.kind() == "template_substitution")
            {
                return None;
            }
        }
        _ => return None,
    }

    let text = node_text(node, source);
    // strip the surrounding quotes
    let inner = text.get(1..text.len().saturating_sub(1)).unwrap_or("");
    unescape(inner)
}

fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.peek().is_some_and(|c| c.is_ascii_digit()) => out.push('\0'),
            // legacy octal
            '0'..='9' => return None,
            'x' => {
                let code = hex_value(&mut chars, 2)?;
                out.push(char::from_u32(code)?);
            }
            'u' => {
                let code = unicode_escape(&mut chars)?;
                if (0xD800..0xDC00).contains(&code) {
                    // high surrogate must pair with an escaped low surrogate
                    if chars.next()? != '\\' || chars.next()? != 'u' {
                        return None;
                    }
                    let low = unicode_escape(&mut chars)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return None;
                    }
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(combined)?);
                } else {
                    out.push(char::from_u32(code)?);
                }
            }
            // line continuations
            '\r' => {
                chars.next_if_eq(&'\n');
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }
    Some(out)
}

/// `XXXX` or `{X...}` after `\u`
fn unicode_escape(chars: &mut Peekable<Chars>) -> Option<u32> {
    if chars.next_if_eq(&'{').is_none() {
        return hex_value(chars, 4);
    }
    let mut code = 0u32;
    let mut digits = 0;
    loop {
        let c = chars.next()?;
        if c == '}' {
            break;
        }
        code = code.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
        digits += 1;
    }
    (digits > 0 && code <= 0x10FFFF).then_some(code)
}

fn hex_value(chars: &mut Peekable<Chars>, len: usize) -> Option<u32> {
    let mut code = 0;
    for _ in 0..len {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    Some(code)
}
