//! Inline attribute tests - apply, clear, query, toggle over character ranges

mod common;

use common::{assert_coalesced, doc, links, ranges};
use richedit::error::EditError;
use richedit::format::AttributeKind;

const SPLITTABLE: [AttributeKind; 4] = [
    AttributeKind::Bold,
    AttributeKind::Italic,
    AttributeKind::Underline,
    AttributeKind::Strikethrough,
];

// ========================================================================
// Split / merge
// ========================================================================

#[test]
fn test_adjacent_applies_merge_into_one_span() {
    let mut doc = doc("abcdefghij");
    doc.set_in(AttributeKind::Bold, 0, 5).unwrap();
    doc.set_in(AttributeKind::Bold, 5, 10).unwrap();

    assert_eq!(ranges(&doc, AttributeKind::Bold), vec![(0, 10)]);
}

#[test]
fn test_clearing_the_middle_splits_in_two() {
    let mut doc = doc("abcdefghij");
    doc.set_in(AttributeKind::Bold, 0, 5).unwrap();
    doc.set_in(AttributeKind::Bold, 5, 10).unwrap();
    doc.remove_in(AttributeKind::Bold, 3, 7).unwrap();

    assert_eq!(ranges(&doc, AttributeKind::Bold), vec![(0, 3), (7, 10)]);
    assert_coalesced(&doc);
}

#[test]
fn test_overlapping_applies_merge() {
    for kind in SPLITTABLE {
        let mut doc = doc("abcdefghij");
        doc.set_in(kind, 0, 4).unwrap();
        doc.set_in(kind, 2, 7).unwrap();
        doc.set_in(kind, 8, 9).unwrap();

        assert_eq!(ranges(&doc, kind), vec![(0, 7), (8, 9)], "{}", kind);
        assert_coalesced(&doc);
    }
}

#[test]
fn test_kinds_are_independent() {
    let mut doc = doc("abcdefghij");
    doc.set_in(AttributeKind::Bold, 0, 6).unwrap();
    doc.set_in(AttributeKind::Italic, 4, 10).unwrap();
    doc.remove_in(AttributeKind::Italic, 0, 10).unwrap();

    assert_eq!(ranges(&doc, AttributeKind::Bold), vec![(0, 6)]);
    assert!(ranges(&doc, AttributeKind::Italic).is_empty());
}

// ========================================================================
// Links
// ========================================================================

#[test]
fn test_adjacent_links_stay_distinct() {
    let mut doc = doc("abcdefghij");
    doc.set_link_in("a", 0, 5).unwrap();
    doc.set_link_in("b", 5, 10).unwrap();

    assert_eq!(
        links(&doc),
        vec![(0, 5, "a".to_string()), (5, 10, "b".to_string())]
    );
}

#[test]
fn test_linking_over_links_replaces_them_outright() {
    let mut doc = doc("abcdefghij");
    doc.set_link_in("a", 0, 5).unwrap();
    doc.set_link_in("b", 5, 10).unwrap();
    doc.set_link_in("c", 3, 7).unwrap();

    assert_eq!(links(&doc), vec![(3, 7, "c".to_string())]);
}

#[test]
fn test_clearing_part_of_a_link_removes_all_of_it() {
    let mut doc = doc("abcdefghij");
    doc.set_link_in("https://example.com", 2, 8).unwrap();
    doc.remove_in(AttributeKind::Link, 4, 5).unwrap();

    assert!(links(&doc).is_empty());
}

#[test]
fn test_link_at_reports_url_and_bounds() {
    let mut doc = doc("visit the site");
    doc.set_link_in("https://example.com", 10, 14).unwrap();

    let link = doc.link_at(12).unwrap();
    assert_eq!(link.url, "https://example.com");
    assert_eq!((link.start, link.end), (10, 14));
    assert!(doc.link_at(3).is_none());
}

#[test]
fn test_caret_link_at_other_link_end_takes_over() {
    let mut doc = doc("hello world");
    doc.set_link_in("a", 0, 5).unwrap();
    doc.set_selection(5, 5).unwrap();
    doc.set_link("b").unwrap();
    assert_coalesced(&doc);

    doc.type_text("XY");

    assert_eq!(
        links(&doc),
        vec![(0, 5, "a".to_string()), (5, 7, "b".to_string())]
    );
    assert_eq!(doc.link_at(6).unwrap().url, "b");
    assert_eq!(doc.link_at(3).unwrap().url, "a");
    assert_coalesced(&doc);
}

#[test]
fn test_link_arguments_are_validated() {
    let mut doc = doc("abc");
    assert!(matches!(
        doc.set_in(AttributeKind::Link, 0, 3),
        Err(EditError::InvalidAttributeArgument(_))
    ));
    assert!(matches!(
        doc.set_link_in("", 0, 3),
        Err(EditError::InvalidAttributeArgument(_))
    ));
    assert!(doc.spans().is_empty());
}

// ========================================================================
// Query
// ========================================================================

#[test]
fn test_query_requires_full_coverage() {
    let mut doc = doc("abcdefghij");
    doc.set_in(AttributeKind::Bold, 0, 3).unwrap();
    doc.set_in(AttributeKind::Bold, 5, 8).unwrap();

    assert!(doc.has_in(AttributeKind::Bold, 0, 3).unwrap());
    assert!(doc.has_in(AttributeKind::Bold, 6, 8).unwrap());
    assert!(!doc.has_in(AttributeKind::Bold, 0, 8).unwrap());
    assert!(!doc.has_in(AttributeKind::Bold, 2, 4).unwrap());
}

#[test]
fn test_query_through_selection() {
    let mut doc = doc("Hello world");
    doc.set_in(AttributeKind::Underline, 0, 5).unwrap();

    doc.set_selection(1, 4).unwrap();
    assert!(doc.has(AttributeKind::Underline));
    doc.set_selection(4, 7).unwrap();
    assert!(!doc.has(AttributeKind::Underline));
}

// ========================================================================
// Caret (zero-width) behaviour
// ========================================================================

#[test]
fn test_caret_apply_then_clear() {
    let mut doc = doc("abcdefghij");
    doc.set_in(AttributeKind::Bold, 7, 10).unwrap();

    doc.set_in(AttributeKind::Bold, 3, 3).unwrap();
    assert!(doc.has_in(AttributeKind::Bold, 3, 3).unwrap());

    doc.remove_in(AttributeKind::Bold, 3, 3).unwrap();
    assert!(!doc.has_in(AttributeKind::Bold, 3, 3).unwrap());
    assert_eq!(ranges(&doc, AttributeKind::Bold), vec![(7, 10)]);
}

#[test]
fn test_caret_at_span_end_follows_sticky_flag() {
    let mut doc = doc("abcdefghij");
    doc.set_in(AttributeKind::Italic, 0, 5).unwrap();
    assert!(doc.has_in(AttributeKind::Italic, 5, 5).unwrap());

    doc.remove_in(AttributeKind::Italic, 5, 5).unwrap();
    assert!(!doc.has_in(AttributeKind::Italic, 5, 5).unwrap());
    assert_eq!(ranges(&doc, AttributeKind::Italic), vec![(0, 5)]);

    doc.set_in(AttributeKind::Italic, 5, 5).unwrap();
    assert!(doc.has_in(AttributeKind::Italic, 5, 5).unwrap());
    assert_eq!(ranges(&doc, AttributeKind::Italic), vec![(0, 5)]);
}

#[test]
fn test_caret_at_span_start_is_not_formatted() {
    let mut doc = doc("abcdefghij");
    doc.set_in(AttributeKind::Bold, 3, 6).unwrap();

    assert!(!doc.has_in(AttributeKind::Bold, 3, 3).unwrap());
    assert!(doc.has_in(AttributeKind::Bold, 4, 4).unwrap());
}

#[test]
fn test_caret_inside_span_keeps_it_whole() {
    let mut doc = doc("abcdefghij");
    doc.set_in(AttributeKind::Bold, 0, 5).unwrap();

    doc.set_in(AttributeKind::Bold, 2, 2).unwrap();
    doc.remove_in(AttributeKind::Bold, 2, 2).unwrap();

    assert_eq!(ranges(&doc, AttributeKind::Bold), vec![(0, 5)]);
    assert!(doc.has_in(AttributeKind::Bold, 2, 2).unwrap());
}

// ========================================================================
// Toggle
// ========================================================================

#[test]
fn test_toggle_twice_restores_uncovered_range() {
    for kind in SPLITTABLE {
        let mut doc = doc("Hello world");
        doc.set_in(kind, 0, 5).unwrap();
        let before = doc.spans().clone();

        doc.toggle_in(kind, 6, 11).unwrap();
        assert!(doc.has_in(kind, 6, 11).unwrap());
        doc.toggle_in(kind, 6, 11).unwrap();

        assert_eq!(doc.spans(), &before, "{}", kind);
    }
}

#[test]
fn test_toggle_twice_restores_covered_range() {
    for kind in SPLITTABLE {
        let mut doc = doc("Hello world");
        doc.set_in(kind, 0, 5).unwrap();
        let before = doc.spans().clone();

        doc.toggle_in(kind, 1, 4).unwrap();
        assert_eq!(ranges(&doc, kind), vec![(0, 1), (4, 5)]);
        doc.toggle_in(kind, 1, 4).unwrap();

        assert_eq!(doc.spans(), &before, "{}", kind);
    }
}

#[test]
fn test_toggle_link_twice_restores() {
    let mut doc = doc("Hello world");
    doc.set_link_in("https://a.example", 0, 5).unwrap();
    let before = doc.spans().clone();

    doc.toggle_link_in("https://b.example", 6, 11).unwrap();
    assert_eq!(links(&doc).len(), 2);
    doc.toggle_link_in("https://b.example", 6, 11).unwrap();

    assert_eq!(doc.spans(), &before);
}

#[test]
fn test_toggle_link_on_requires_url() {
    let mut doc = doc("Hello");
    assert!(matches!(
        doc.toggle_in(AttributeKind::Link, 0, 5),
        Err(EditError::InvalidAttributeArgument(_))
    ));
}

// ========================================================================
// Validation and clear-format
// ========================================================================

#[test]
fn test_invalid_ranges_are_rejected_without_change() {
    let mut doc = doc("abcdef");
    doc.set_in(AttributeKind::Bold, 1, 3).unwrap();
    let before = doc.spans().clone();

    assert_eq!(
        doc.set_in(AttributeKind::Italic, 4, 2),
        Err(EditError::InvalidRange {
            start: 4,
            end: 2,
            len: 6
        })
    );
    assert!(doc.remove_in(AttributeKind::Bold, 0, 7).is_err());
    assert!(doc.toggle_in(AttributeKind::Bold, 7, 7).is_err());
    assert!(doc.has_in(AttributeKind::Bold, 0, 10).is_err());

    assert_eq!(doc.spans(), &before);
}

#[test]
fn test_clear_format_removes_every_kind() {
    let mut doc = doc("Hello world");
    doc.set_in(AttributeKind::Bold, 0, 11).unwrap();
    doc.set_in(AttributeKind::Strikethrough, 2, 9).unwrap();
    doc.set_link_in("https://example.com", 0, 5).unwrap();

    doc.set_selection(0, 11).unwrap();
    doc.clear_format();

    assert!(doc.spans().is_empty());
    assert!(doc.active_attributes().is_empty());
}

#[test]
fn test_active_attributes_at_selection() {
    let mut doc = doc("Hello\nworld");
    doc.set_in(AttributeKind::Bold, 0, 5).unwrap();
    doc.set_in(AttributeKind::Italic, 2, 4).unwrap();
    doc.set_in(AttributeKind::Quote, 0, 0).unwrap();

    doc.set_selection(1, 3).unwrap();
    assert_eq!(
        doc.active_attributes(),
        vec![AttributeKind::Bold, AttributeKind::Quote]
    );
}
