//! Top-level items, declarations and class members
//!
//! ```text
//! source_file  = item*
//! item         = import_statement | function_declaration
//!              | expand_function_declaration | class_declaration | statement
//! class_member = function_declaration | field_declaration
//!              | constructor_declaration | operator_function_declaration
//! ```

use rowan::TextSize;

use super::expressions::parse_expression;
use super::statements::{at_variable_declaration, parse_braced_statements, parse_statement};
use super::types::{parse_extended_type, parse_type};
use super::{
    ITEM_FIRST, MEMBER_RECOVERY, NAME_FIRST, STMT_FIRST, parse_parameter_list,
    parse_qualified_name, parse_simple_name,
};
use crate::grammar::SyntaxKind::*;
use crate::grammar::TokenSet;
use crate::parser::rule_parser::RuleParser;

/// Keywords a malformed import never swallows.
const ITEM_KEYWORDS: TokenSet = TokenSet::new(&[
    IMPORT_KW,
    EXPAND_KW,
    ZEN_CLASS_KW,
    FUNCTION_KW,
    STATIC_KW,
    GLOBAL_KW,
    VAR_KW,
    VAL_KW,
]);

/// Single-token operators an `operator` member may overload.
const OVERLOADABLE: TokenSet = TokenSet::new(&[
    PLUS, MINUS, STAR, SLASH, PERCENT, TILDE, PIPE, AMP, CARET, BANG, DOT_DOT, HAS_KW, AS_KW,
    EQ_EQ, BANG_EQ, LT, LT_EQ, GT, GT_EQ,
]);

/// Parses items until the end of input, or until `splice_at` accepts the
/// start of the next item. Returns where parsing stopped in the latter case.
///
/// `splice_at` is only consulted on item boundaries, with the offset of the
/// item's first significant token.
pub(crate) fn parse_items(
    p: &mut RuleParser<'_>,
    mut splice_at: impl FnMut(TextSize) -> bool,
) -> Option<TextSize> {
    loop {
        if p.at_eof() {
            return None;
        }
        let offset = p.current_span().start();
        if splice_at(offset) {
            return Some(offset);
        }
        parse_item(p);
    }
}

fn parse_item(p: &mut RuleParser<'_>) {
    match p.current() {
        IMPORT_KW => parse_import(p),
        EXPAND_KW => parse_expand_function(p),
        ZEN_CLASS_KW => parse_class(p),
        FUNCTION_KW => parse_function_declaration(p),
        STATIC_KW | GLOBAL_KW if !at_variable_declaration(p) => parse_function_declaration(p),
        kind if STMT_FIRST.contains(kind) => parse_statement(p),
        _ => p.error_recover(ITEM_FIRST),
    }
}

/// import_statement = 'import' qualified_name ('as' simple_name)? ';'
///
/// An import without a name is one ERROR node through its `;`.
fn parse_import(p: &mut RuleParser<'_>) {
    if !NAME_FIRST.contains(p.nth(1)) {
        p.start_node(ERROR);
        p.bump();
        while !p.at_eof() && !p.at(SEMICOLON) && !p.at_set(ITEM_KEYWORDS) {
            p.bump();
        }
        p.eat(SEMICOLON);
        p.finish_node();
        return;
    }
    p.start_node(IMPORT_STATEMENT);
    p.bump();
    parse_qualified_name(p);
    if p.eat(AS_KW) {
        parse_simple_name(p);
    }
    p.expect(SEMICOLON);
    p.finish_node();
}

/// function_declaration =
///     ('static' | 'global')? 'function' simple_name? parameter_list
///     ('as' extended_type)? (function_body | ';')
fn parse_function_declaration(p: &mut RuleParser<'_>) {
    p.start_node(FUNCTION_DECLARATION);
    if !p.eat(STATIC_KW) {
        p.eat(GLOBAL_KW);
    }
    p.expect(FUNCTION_KW);
    if p.at_set(NAME_FIRST) {
        parse_simple_name(p);
    }
    parse_parameter_list(p);
    if p.eat(AS_KW) {
        parse_extended_type(p);
    }
    parse_body_or_semicolon(p);
    p.finish_node();
}

/// expand_function_declaration =
///     '$expand' type '$' simple_name parameter_list ('as' type)? function_body
fn parse_expand_function(p: &mut RuleParser<'_>) {
    p.start_node(EXPAND_FUNCTION_DECLARATION);
    p.bump();
    split_expand_name(p);
    parse_type(p);
    p.expect(DOLLAR);
    parse_simple_name(p);
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

/// `Type$name` and `$name` each lex as one identifier. Splits the `$` off
/// so the declaration reads type, `$`, name.
///
/// Only the words and brackets of a plain type and the one token after
/// them are looked at; a glued word later on is not part of the name.
fn split_expand_name(p: &mut RuleParser<'_>) {
    let mut after_word = false;
    for n in 0.. {
        let kind = p.nth(n);
        if kind == IDENT {
            let text = p.nth_text(n);
            if text.contains('$') {
                if !after_word || text.starts_with('$') {
                    p.split_nth_at_dollars(n);
                }
                return;
            }
        }
        let word = kind == IDENT || kind.is_primitive_type();
        match kind {
            _ if word && !after_word => after_word = true,
            DOT | L_BRACKET => after_word = false,
            R_BRACKET => after_word = true,
            _ => return,
        }
    }
}

/// class_declaration =
///     'zenClass' class_name ('extends' qualified_name (',' qualified_name)*)? class_body
fn parse_class(p: &mut RuleParser<'_>) {
    p.start_node(CLASS_DECLARATION);
    p.bump();
    let kind = p.current();
    if NAME_FIRST.contains(kind) || kind.is_primitive_type() {
        p.start_node(CLASS_NAME);
        p.bump();
        p.finish_node();
    } else {
        p.missing(IDENT);
    }
    if p.eat(EXTENDS_KW) {
        parse_qualified_name(p);
        while p.eat(COMMA) {
            parse_qualified_name(p);
        }
    }
    if p.at(L_BRACE) {
        parse_class_body(p);
    } else {
        p.missing(L_BRACE);
    }
    p.finish_node();
}

/// function_body = '{' statement* '}'
pub(crate) fn parse_function_body(p: &mut RuleParser<'_>) {
    parse_braced_statements(p, FUNCTION_BODY);
}

/// class_body = '{' class_member* '}'
pub(crate) fn parse_class_body(p: &mut RuleParser<'_>) {
    p.start_node(CLASS_BODY);
    p.expect(L_BRACE);
    while !p.at(R_BRACE) && !p.at_eof() {
        match p.current() {
            FUNCTION_KW => parse_function_declaration(p),
            STATIC_KW if p.nth(1) == FUNCTION_KW => parse_function_declaration(p),
            VAR_KW | VAL_KW | STATIC_KW => parse_field(p),
            ZEN_CONSTRUCTOR_KW => parse_constructor(p),
            OPERATOR_KW => parse_operator_function(p),
            _ => p.error_recover(MEMBER_RECOVERY),
        }
    }
    p.expect(R_BRACE);
    p.finish_node();
}

/// field_declaration =
///     ('var' | 'val' | 'static') simple_name ('as' extended_type)? ('=' expression)? ';'
fn parse_field(p: &mut RuleParser<'_>) {
    p.start_node(FIELD_DECLARATION);
    p.bump();
    parse_simple_name(p);
    if p.eat(AS_KW) {
        parse_extended_type(p);
    }
    if p.eat(EQ) {
        parse_expression(p);
    }
    p.expect(SEMICOLON);
    p.finish_node();
}

/// constructor_declaration = 'zenConstructor' parameter_list (function_body | ';')
fn parse_constructor(p: &mut RuleParser<'_>) {
    p.start_node(CONSTRUCTOR_DECLARATION);
    p.bump();
    parse_parameter_list(p);
    parse_body_or_semicolon(p);
    p.finish_node();
}

/// operator_function_declaration =
///     'operator' operator parameter_list ('as' extended_type)? (function_body | ';')
fn parse_operator_function(p: &mut RuleParser<'_>) {
    p.start_node(OPERATOR_FUNCTION_DECLARATION);
    p.bump();
    match p.current() {
        // `[]`, `[]=`
        L_BRACKET => {
            p.bump();
            p.expect(R_BRACKET);
            p.eat(EQ);
        }
        // `.`, `.=`
        DOT => {
            p.bump();
            p.eat(EQ);
        }
        IDENT if p.current_text() == "for_in" => p.bump(),
        kind if OVERLOADABLE.contains(kind) => p.bump(),
        _ => p.missing(IDENT),
    }
    parse_parameter_list(p);
    if p.eat(AS_KW) {
        parse_extended_type(p);
    }
    parse_body_or_semicolon(p);
    p.finish_node();
}

fn parse_body_or_semicolon(p: &mut RuleParser<'_>) {
    if p.at(L_BRACE) {
        parse_function_body(p);
    } else {
        p.expect(SEMICOLON);
    }
}
