//! Recording edits on a tree.

#![allow(clippy::unwrap_used)]

use zensyn::{Error, InputEdit, Point};

use crate::helpers::tree_helpers::parse;

#[test]
fn test_insertion_on_earlier_line_shifts_later_nodes() {
    let source = "a;\nbb;\n";
    let mut tree = parse(source);
    tree.edit(&InputEdit::replace(source, 0..0, "xyz").unwrap())
        .unwrap();
    let new_source = "xyza;\nbb;\n";

    assert_eq!(tree.len(), new_source.len());
    let second = tree.root_node().child(1).unwrap();
    assert_eq!(second.byte_range(), 6..9);
    assert_eq!(second.start_position(), Point::new(1, 0));
    assert_eq!(second.utf8_text(new_source), "bb;");
    assert!(!second.has_changes());
    assert!(tree.root_node().child(0).unwrap().has_changes());
}

#[test]
fn test_replacement_on_same_line_shifts_columns() {
    let source = "ab; cd;";
    let mut tree = parse(source);
    tree.edit(&InputEdit::replace(source, 0..2, "x").unwrap())
        .unwrap();
    let second = tree.root_node().child(1).unwrap();
    assert_eq!(second.byte_range(), 3..6);
    assert_eq!(second.start_position(), Point::new(0, 3));
}

#[test]
fn test_edits_accumulate() {
    let source = "a;\nb;\nc;";
    let mut tree = parse(source);
    let mut text = source.to_string();
    for (range, replacement) in [(6..7, "cc"), (0..0, "\n")] {
        tree.edit(&InputEdit::replace(&text, range.clone(), replacement).unwrap())
            .unwrap();
        text.replace_range(range, replacement);
    }
    assert_eq!(tree.edits().len(), 2);
    assert_eq!(tree.len(), text.len());
    let last = tree.root_node().child(2).unwrap();
    assert_eq!(last.start_position(), Point::new(3, 0));
    assert_eq!(last.utf8_text(&text), "cc;");
    // The parsed text itself is unchanged until a reparse.
    assert_eq!(tree.text(), source);
}

#[test]
fn test_edit_past_end_is_rejected() {
    let mut tree = parse("a;");
    let edit = InputEdit {
        start_byte: 1,
        old_end_byte: 50,
        new_end_byte: 1,
        start_position: Point::new(0, 1),
        old_end_position: Point::new(0, 50),
        new_end_position: Point::new(0, 1),
    };
    assert!(matches!(tree.edit(&edit), Err(Error::InvalidEdit { .. })));
    assert!(tree.edits().is_empty());
}

#[test]
fn test_edit_with_positions_out_of_step_is_rejected() {
    let mut tree = parse("a; b;");
    let edit = InputEdit {
        start_byte: 0,
        old_end_byte: 1,
        new_end_byte: 1,
        start_position: Point::new(0, 0),
        old_end_position: Point::new(5, 9),
        new_end_position: Point::new(0, 1),
    };
    assert!(matches!(tree.edit(&edit), Err(Error::InvalidEdit { .. })));
    assert!(tree.edits().is_empty());
    assert_eq!(tree.root_node().child(1).unwrap().start_position(), Point::new(0, 3));
}

#[test]
fn test_append_at_end_grows_the_root() {
    let mut tree = parse("a;");
    tree.edit(&InputEdit::replace("a;", 2..2, " b;").unwrap())
        .unwrap();
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.root_node().byte_range(), 0..5);
    assert_eq!(tree.root_node().end_position(), Point::new(0, 5));

    tree.edit(&InputEdit::replace("a; b;", 4..5, "").unwrap())
        .unwrap();
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.root_node().end_byte(), 4);
}

#[test]
fn test_insert_at_start_keeps_root_at_zero() {
    let source = "a;";
    let mut tree = parse(source);
    tree.edit(&InputEdit::replace(source, 0..0, "b; ").unwrap())
        .unwrap();
    let root = tree.root_node();
    assert_eq!(root.byte_range(), 0..5);
    assert_eq!(root.start_position(), Point::new(0, 0));
    assert_eq!(root.child(0).unwrap().byte_range(), 3..5);
}

#[test]
fn test_replace_rejects_bad_ranges() {
    assert!(matches!(
        InputEdit::replace("abc", 1..9, ""),
        Err(Error::InvalidEdit { .. })
    ));
    #[allow(clippy::reversed_empty_ranges)]
    let reversed = InputEdit::replace("abc", 2..1, "");
    assert!(reversed.is_err());
}

#[test]
fn test_clone_does_not_share_edits() {
    let source = "a;";
    let tree = parse(source);
    let mut copy = tree.clone();
    copy.edit(&InputEdit::replace(source, 0..1, "bb").unwrap())
        .unwrap();
    assert!(tree.edits().is_empty());
    assert_eq!(tree.len(), 2);
    assert_eq!(copy.len(), 3);
    assert_eq!(tree.green(), copy.green());
}
