//! Canonical parenthesized form
//!
//! `(kind child ...)` over named nodes only, single spaces, no trailing
//! whitespace. ERROR nodes print as `(ERROR ...)`. A MISSING placeholder
//! prints as `(MISSING ";")` for an anonymous token and as
//! `(MISSING identifier)` otherwise.

use std::fmt::Write;

use super::node::Node;
use crate::grammar::Visibility;

pub(crate) fn to_sexp(node: &Node<'_>) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node<'_>, out: &mut String) {
    if node.is_missing() {
        let kind = node.kind();
        let name = node.kind_name();
        if node.tree().grammar().kind_info(kind).visibility == Visibility::Anonymous {
            let _ = write!(out, "(MISSING \"{}\")", name.escape_default());
        } else {
            let _ = write!(out, "(MISSING {name})");
        }
        return;
    }

    out.push('(');
    out.push_str(node.kind_name());
    for child in node.children() {
        if child.is_named() || child.is_missing() {
            out.push(' ');
            write_node(&child, out);
        }
    }
    out.push(')');
}
