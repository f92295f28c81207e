//! Type expressions
//!
//! ```text
//! type          = type_atom ('[' ']' | '[' type ']')*
//! type_atom     = primitive_type | class_type | function_type | list_type
//! extended_type = type ('&' type)*
//! ```

use super::{NAME_FIRST, parse_simple_name};
use crate::grammar::SyntaxKind::*;
use crate::parser::rule_parser::RuleParser;

/// Type = TypeAtom ('[' ']' | '[' Type ']')*
pub(crate) fn parse_type(p: &mut RuleParser<'_>) {
    if !p.enter_recursion() {
        p.bail_out();
        return;
    }
    let checkpoint = p.checkpoint();
    parse_type_atom(p);
    while p.at(L_BRACKET) {
        p.bump();
        if p.eat(R_BRACKET) {
            p.start_node_at(checkpoint, ARRAY_TYPE);
        } else {
            parse_type(p);
            p.expect(R_BRACKET);
            p.start_node_at(checkpoint, MAP_TYPE);
        }
        p.finish_node();
    }
    p.exit_recursion();
}

/// ExtendedType = Type ('&' Type)*
///
/// Only declaration signatures accept intersections; in expressions `&` is
/// the bitwise operator.
pub(crate) fn parse_extended_type(p: &mut RuleParser<'_>) {
    let checkpoint = p.checkpoint();
    parse_type(p);
    if p.at(AMP) {
        while p.eat(AMP) {
            parse_type(p);
        }
        p.start_node_at(checkpoint, INTERSECTION_TYPE);
        p.finish_node();
    }
}

fn parse_type_atom(p: &mut RuleParser<'_>) {
    let kind = p.current();
    if kind.is_primitive_type() {
        p.start_node(PRIMITIVE_TYPE);
        p.bump();
        p.finish_node();
    } else if NAME_FIRST.contains(kind) {
        // class_type = name ('.' name)*
        p.start_node(CLASS_TYPE);
        p.bump();
        while p.at(DOT) && p.nth(1) == IDENT {
            p.bump();
            p.bump();
        }
        p.finish_node();
    } else if kind == FUNCTION_KW {
        parse_function_type(p);
    } else if kind == L_BRACKET {
        // list_type = '[' type ']'
        p.start_node(LIST_TYPE);
        p.bump();
        parse_type(p);
        p.expect(R_BRACKET);
        p.finish_node();
    } else {
        parse_simple_name(p);
    }
}

/// FunctionType = 'function' '(' (Type (',' Type)*)? ')' Type
fn parse_function_type(p: &mut RuleParser<'_>) {
    p.start_node(FUNCTION_TYPE);
    p.bump();
    p.expect(L_PAREN);
    if !p.at(R_PAREN) {
        parse_type(p);
        while p.eat(COMMA) {
            parse_type(p);
        }
    }
    p.expect(R_PAREN);
    parse_type(p);
    p.finish_node();
}
