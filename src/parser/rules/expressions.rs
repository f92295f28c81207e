//! Expressions
//!
//! A Pratt parser. Binding powers, associativity and the node each operator
//! builds all come from the grammar's operator table; this module only knows
//! how to read operands and the few operators with extra syntax (`?:`,
//! `as`, calls, indexing and member access).

use super::items::parse_function_body;
use super::types::parse_type;
use super::{
    EXPR_FIRST, LITERALS, NAME_FIRST, OPERAND_STOP, parse_parameter_list, parse_simple_name,
};
use crate::grammar::SyntaxKind::{self, *};
use crate::grammar::{Precedence, TokenSet, operand_power};
use crate::parser::rule_parser::RuleParser;

/// Expressions that may stand on the left of an assignment operator.
fn is_assignable(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        MEMBER_ACCESS_EXPRESSION | MEMBER_INDEX_EXPRESSION | SIMPLE_NAME | PARENS_EXPRESSION
    )
}

const MEMBER_NAMES: TokenSet = TokenSet::new(&[IDENT, TO_KW, STRING_KW, STRING_LITERAL]);

pub(crate) fn parse_expression(p: &mut RuleParser<'_>) {
    parse_expr_bp(p, 0);
}

/// Parses an expression whose operators all bind at least `min_bp`.
/// Returns the kind of the outermost node (or bare token) produced.
fn parse_expr_bp(p: &mut RuleParser<'_>, min_bp: u8) -> SyntaxKind {
    if !p.enter_recursion() {
        p.bail_out();
        return ERROR;
    }
    let checkpoint = p.checkpoint();
    let mut lhs = parse_prefix(p);

    loop {
        let kind = p.current();

        if let Some((node, precedence)) = p.grammar.postfix_operator(kind) {
            if operand_power(precedence) < min_bp {
                break;
            }
            parse_postfix(p, kind);
            p.start_node_at(checkpoint, node);
            p.finish_node();
            lhs = node;
            continue;
        }

        let Some(op) = p.grammar.infix_operator(kind) else {
            break;
        };
        let (left_bp, right_bp) = op.binding_power();
        if left_bp < min_bp {
            break;
        }

        if op.precedence == Precedence::Assign && !is_assignable(lhs) {
            p.start_node_at(checkpoint, ERROR);
            p.finish_node();
        }

        p.bump();
        if op.node == CONDITIONAL_EXPRESSION {
            parse_expr_bp(p, 0);
            p.expect(COLON);
        }
        parse_expr_bp(p, right_bp);
        p.start_node_at(checkpoint, op.node);
        p.finish_node();
        lhs = op.node;
    }

    p.exit_recursion();
    lhs
}

/// The token after the operand, for everything in the postfix table.
fn parse_postfix(p: &mut RuleParser<'_>, kind: SyntaxKind) {
    match kind {
        AS_KW | INSTANCEOF_KW => {
            p.bump();
            parse_type(p);
        }
        DOT => {
            p.bump();
            if p.at_set(MEMBER_NAMES) {
                p.start_node(MEMBER_NAME);
                p.bump();
                p.finish_node();
            } else {
                p.missing(IDENT);
            }
        }
        L_PAREN => {
            p.bump();
            parse_delimited(p, R_PAREN, false, parse_expression);
            p.expect(R_PAREN);
        }
        L_BRACKET => {
            p.bump();
            parse_expression(p);
            p.expect(R_BRACKET);
        }
        _ => p.bump(),
    }
}

/// Operands and prefix operators.
fn parse_prefix(p: &mut RuleParser<'_>) -> SyntaxKind {
    let kind = p.current();

    if let Some(node) = p.grammar.prefix_operator(kind) {
        p.start_node(node);
        p.bump();
        parse_expr_bp(p, operand_power(Precedence::Unary));
        p.finish_node();
        return node;
    }

    if NAME_FIRST.contains(kind) {
        parse_simple_name(p);
        return SIMPLE_NAME;
    }
    if LITERALS.contains(kind) {
        p.bump();
        return kind;
    }

    match kind {
        UNTERMINATED_STRING => {
            p.bump_as_error();
            ERROR
        }
        L_PAREN => {
            p.start_node(PARENS_EXPRESSION);
            p.bump();
            parse_expression(p);
            p.expect(R_PAREN);
            p.finish_node();
            PARENS_EXPRESSION
        }
        L_BRACKET => {
            p.start_node(ARRAY_LITERAL);
            p.bump();
            parse_delimited(p, R_BRACKET, true, parse_expression);
            p.expect(R_BRACKET);
            p.finish_node();
            ARRAY_LITERAL
        }
        L_BRACE => {
            p.start_node(MAP_LITERAL);
            p.bump();
            parse_delimited(p, R_BRACE, true, parse_map_entry);
            p.expect(R_BRACE);
            p.finish_node();
            MAP_LITERAL
        }
        LT => {
            parse_bracket_handler(p);
            BRACKET_HANDLER_EXPRESSION
        }
        FUNCTION_KW => {
            parse_function_expression(p);
            FUNCTION_EXPRESSION
        }
        _ => parse_missing_operand(p),
    }
}

/// `element (',' element)* ','?` up to (not including) `close`.
fn parse_delimited(
    p: &mut RuleParser<'_>,
    close: SyntaxKind,
    trailing_comma: bool,
    element: fn(&mut RuleParser<'_>),
) {
    if p.at(close) {
        return;
    }
    loop {
        element(p);
        if !p.eat(COMMA) {
            break;
        }
        if trailing_comma && p.at(close) {
            break;
        }
    }
}

/// map_entry = expression ':' expression
fn parse_map_entry(p: &mut RuleParser<'_>) {
    p.start_node(MAP_ENTRY);
    parse_expression(p);
    p.expect(COLON);
    parse_expression(p);
    p.finish_node();
}

/// bracket_handler = '<' raw-text '>'
fn parse_bracket_handler(p: &mut RuleParser<'_>) {
    p.start_node(BRACKET_HANDLER_EXPRESSION);
    p.bump();
    if p.bump_handler_content() {
        p.bump();
    } else {
        p.missing(GT);
    }
    p.finish_node();
}

/// function_expression = 'function' parameter_list ('as' type)? function_body
fn parse_function_expression(p: &mut RuleParser<'_>) {
    p.start_node(FUNCTION_EXPRESSION);
    p.bump();
    parse_parameter_list(p);
    if p.eat(AS_KW) {
        parse_type(p);
    }
    if p.at(L_BRACE) {
        parse_function_body(p);
    } else {
        p.missing(L_BRACE);
    }
    p.finish_node();
}

/// No operand where one is required.
///
/// Before a closer, separator, operator or statement keyword the operand is
/// simply missing. Anything else is skipped as one ERROR node up to a token
/// that can start an operand or end the expression.
fn parse_missing_operand(p: &mut RuleParser<'_>) -> SyntaxKind {
    if p.at_eof() || p.at_set(OPERAND_STOP) {
        p.missing(IDENT);
        return MISSING;
    }
    p.start_node(ERROR);
    while !p.at_eof() && !p.at_set(EXPR_FIRST) && !p.at_set(OPERAND_STOP) {
        p.bump();
    }
    p.finish_node();
    if p.at_set(EXPR_FIRST) {
        parse_prefix(p)
    } else {
        p.missing(IDENT);
        MISSING
    }
}
