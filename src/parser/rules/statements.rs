//! Statements and blocks

use super::expressions::parse_expression;
use super::types::parse_type;
use super::{EXPR_FIRST, STMT_FIRST, STMT_RECOVERY, parse_simple_name};
use crate::grammar::SyntaxKind::{self, *};
use crate::parser::rule_parser::RuleParser;

/// statement =
///     block_statement | return_statement | break_statement
///   | continue_statement | if_statement | foreach_statement
///   | while_statement | variable_declaration | expression_statement | ';'
///
/// A statement that cannot start here is recorded as a missing `;`.
pub(crate) fn parse_statement(p: &mut RuleParser<'_>) {
    if !p.at_set(STMT_FIRST) {
        p.missing(SEMICOLON);
        return;
    }
    if !p.enter_recursion() {
        p.bail_out();
        return;
    }
    match p.current() {
        L_BRACE => parse_block_statement(p),
        RETURN_KW => parse_return(p),
        BREAK_KW => parse_jump(p, BREAK_STATEMENT),
        CONTINUE_KW => parse_jump(p, CONTINUE_STATEMENT),
        IF_KW => parse_if(p),
        FOR_KW => parse_foreach(p),
        WHILE_KW => parse_while(p),
        VAR_KW | VAL_KW | STATIC_KW | GLOBAL_KW => parse_variable_declaration(p),
        SEMICOLON => p.bump(),
        _ => parse_expression_statement(p),
    }
    p.exit_recursion();
}

/// Statements up to (not including) a closing `}` or the end of input.
pub(crate) fn parse_statements(p: &mut RuleParser<'_>) {
    while !p.at(R_BRACE) && !p.at_eof() {
        if p.at_set(STMT_FIRST) {
            parse_statement(p);
        } else {
            p.error_recover(STMT_RECOVERY);
        }
    }
}

/// block_statement = '{' statement* '}'
pub(crate) fn parse_block_statement(p: &mut RuleParser<'_>) {
    parse_braced_statements(p, BLOCK_STATEMENT);
}

/// `'{' statement* '}'` wrapped in a node of `kind`.
pub(crate) fn parse_braced_statements(p: &mut RuleParser<'_>, kind: SyntaxKind) {
    p.start_node(kind);
    p.expect(L_BRACE);
    parse_statements(p);
    p.expect(R_BRACE);
    p.finish_node();
}

/// return_statement = 'return' expression? ';'
fn parse_return(p: &mut RuleParser<'_>) {
    p.start_node(RETURN_STATEMENT);
    p.bump();
    if p.at_set(EXPR_FIRST) {
        parse_expression(p);
    }
    p.expect(SEMICOLON);
    p.finish_node();
}

/// break_statement = 'break' ';'
/// continue_statement = 'continue' ';'
fn parse_jump(p: &mut RuleParser<'_>, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    p.expect(SEMICOLON);
    p.finish_node();
}

/// if_statement = 'if' expression statement ('else' statement)?
///
/// A dangling `else` belongs to the innermost `if`.
fn parse_if(p: &mut RuleParser<'_>) {
    p.start_node(IF_STATEMENT);
    p.bump();
    parse_expression(p);
    parse_statement(p);
    if p.eat(ELSE_KW) {
        parse_statement(p);
    }
    p.finish_node();
}

/// foreach_statement = 'for' simple_name (',' simple_name)* 'in' expression statement
fn parse_foreach(p: &mut RuleParser<'_>) {
    p.start_node(FOREACH_STATEMENT);
    p.bump();
    parse_simple_name(p);
    while p.eat(COMMA) {
        parse_simple_name(p);
    }
    p.expect(IN_KW);
    parse_expression(p);
    parse_statement(p);
    p.finish_node();
}

/// while_statement = 'while' expression statement
fn parse_while(p: &mut RuleParser<'_>) {
    p.start_node(WHILE_STATEMENT);
    p.bump();
    parse_expression(p);
    parse_statement(p);
    p.finish_node();
}

/// variable_declaration =
///     ('var' | 'val' | 'static' | 'global') simple_name ('as' type)? ('=' expression)? ';'
fn parse_variable_declaration(p: &mut RuleParser<'_>) {
    p.start_node(VARIABLE_DECLARATION);
    p.bump();
    parse_simple_name(p);
    if p.eat(AS_KW) {
        parse_type(p);
    }
    if p.eat(EQ) {
        parse_expression(p);
    }
    p.expect(SEMICOLON);
    p.finish_node();
}

/// expression_statement = expression ';'
fn parse_expression_statement(p: &mut RuleParser<'_>) {
    p.start_node(EXPRESSION_STATEMENT);
    parse_expression(p);
    p.expect(SEMICOLON);
    p.finish_node();
}

/// True if the current tokens start a variable declaration rather than a
/// `static function` / `global function` item.
pub(crate) fn at_variable_declaration(p: &mut RuleParser<'_>) -> bool {
    match p.current() {
        VAR_KW | VAL_KW => true,
        STATIC_KW | GLOBAL_KW => p.nth(1) != FUNCTION_KW,
        _ => false,
    }
}
