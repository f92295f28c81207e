//! Diagnostics derived from ERROR and MISSING nodes.

#![allow(clippy::unwrap_used)]

use rstest::rstest;
use zensyn::{ErrorCode, Severity, TextRange, TextSize};

use crate::helpers::source_fixtures::*;
use crate::helpers::tree_helpers::parse;

fn codes(source: &str) -> Vec<ErrorCode> {
    parse(source).errors().into_iter().map(|e| e.code).collect()
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

#[rstest]
#[case::missing_semicolon("val x = 1", &[ErrorCode::E0201])]
#[case::stray_character("x = 1 @ 2;", &[ErrorCode::E0201, ErrorCode::E0101])]
#[case::unterminated_string("x = \"abc", &[ErrorCode::E0102, ErrorCode::E0201])]
#[case::unterminated_comment("/* open", &[ErrorCode::E0103])]
#[case::unclosed_call("f(;", &[ErrorCode::E0301, ErrorCode::E0203])]
#[case::nameless_class("zenClass { }", &[ErrorCode::E0301])]
#[case::unclosed_handler("x = <item:stone;", &[ErrorCode::E0205])]
#[case::nameless_import("import ;", &[ErrorCode::E0901])]
fn test_error_codes(#[case] source: &str, #[case] expected: &[ErrorCode]) {
    assert_eq!(codes(source), expected);
}

#[test]
fn test_clean_fixtures_have_no_errors() {
    for source in VALID {
        assert!(parse(source).errors().is_empty(), "{source}");
    }
}

#[test]
fn test_missing_token_is_zero_width_after_previous_token() {
    let errors = parse("val x = 1\n").errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].range, range(9, 9));
    assert_eq!(errors[0].message, "expected ';'");
    assert_eq!(errors[0].severity, Severity::Error);
}

#[test]
fn test_missing_identifier_message() {
    let errors = parse("a + ;").errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "expected identifier");
    assert_eq!(errors[0].code, ErrorCode::E0301);
}

#[test]
fn test_skipped_input_is_quoted() {
    let errors = parse("import ;").errors();
    assert_eq!(errors[0].message, "unexpected 'import ;'");
    assert_eq!(errors[0].range, range(0, 8));
}

#[test]
fn test_long_skipped_input_is_truncated() {
    let junk = format!("import {};", "=".repeat(40));
    let errors = parse(&junk).errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.ends_with("...'"), "{}", errors[0].message);
}

#[test]
fn test_lexical_error_range() {
    let errors = parse("x = 1 @ 2;").errors();
    assert_eq!(errors[1].range, range(6, 7));
    assert_eq!(errors[1].message, "invalid character");
}

#[test]
fn test_display() {
    let errors = parse("val x = 1").errors();
    assert_eq!(errors[0].to_string(), "error[E0201]: expected ';' at 9..9");
}

#[test]
fn test_broken_fixture_reports_in_source_order() {
    let errors = parse(BROKEN).errors();
    assert!(errors.len() >= 3);
    let starts: Vec<_> = errors.iter().map(|e| e.range.start()).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
}
