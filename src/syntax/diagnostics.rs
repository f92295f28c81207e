//! Diagnostics derived from tree shape
//!
//! The parser records no error list; ERROR and MISSING nodes are the record.
//! Walking them means a subtree reused by an incremental parse brings its
//! diagnostics along for free.

use rowan::{TextRange, TextSize};

use super::node::Node;
use crate::grammar::SyntaxKind;
use crate::parser::{ErrorCode, SyntaxError};

/// Longest excerpt of skipped input quoted in a message.
const EXCERPT_LEN: usize = 24;

pub(crate) fn collect(root: Node<'_>) -> Vec<SyntaxError> {
    let mut errors = Vec::new();
    let mut cursor = root.walk();
    // Pre-order walk over every visible node.
    'walk: loop {
        let node = cursor.node();
        if node.is_missing() {
            errors.push(missing(&node));
        } else if node.is_error() {
            errors.push(unexpected(&node));
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }
    errors
}

fn range_of(node: &Node<'_>) -> TextRange {
    let range = node.byte_range();
    TextRange::new(
        TextSize::from(range.start as u32),
        TextSize::from(range.end as u32),
    )
}

fn missing(node: &Node<'_>) -> SyntaxError {
    let kind = node.kind();
    let code = ErrorCode::for_missing(kind);
    let message = if node.tree().grammar().is_named(kind) || kind == SyntaxKind::IDENT {
        format!("expected {}", node.kind_name())
    } else {
        format!("expected '{}'", node.kind_name())
    };
    SyntaxError::new(message, range_of(node), code)
}

fn unexpected(node: &Node<'_>) -> SyntaxError {
    let tokens: Vec<_> = match node.syntax().as_node() {
        Some(syntax) => syntax
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| {
                !token.kind().is_trivia() || token.kind() == SyntaxKind::UNTERMINATED_COMMENT
            })
            .collect(),
        None => Vec::new(),
    };
    if let [token] = tokens.as_slice() {
        let code = ErrorCode::for_error_token(token.kind());
        if code != ErrorCode::E0901 {
            return SyntaxError::from_code(range_of(node), code);
        }
    }

    let text = node
        .syntax()
        .as_node()
        .map(|syntax| syntax.text().to_string())
        .unwrap_or_default();
    let text = text.trim();
    let message = match text.char_indices().nth(EXCERPT_LEN) {
        Some((cut, _)) => format!("unexpected '{}...'", &text[..cut]),
        None if text.is_empty() => "unexpected input".to_string(),
        None => format!("unexpected '{text}'"),
    };
    SyntaxError::new(message, range_of(node), ErrorCode::E0901)
}
