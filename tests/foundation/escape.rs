//! Integration tests for the escaped literal format
//!
//! Tests how sets, points, matrices, and strings are written and read back.

use molscript_foundation::escape::{
    Unescaped, escape_point, escape_set, escape_string, format_decimal, unescape_literal,
    unescape_set, unescape_unicode,
};
use molscript_foundation::{Point3, SelectionSet};

// =============================================================================
// Selection Sets
// =============================================================================

#[test]
fn set_runs_collapse() {
    let set: SelectionSet = [0, 2, 3, 4, 7].into_iter().collect();
    assert_eq!(escape_set(&set, false), "({0 2:4 7})");
}

#[test]
fn run_of_two_is_two_members() {
    let set: SelectionSet = [5, 6].into_iter().collect();
    assert_eq!(escape_set(&set, false), "({5 6})");
    assert_eq!(escape_set(&set, true), "[{5 6}]");
}

#[test]
fn empty_set() {
    assert_eq!(escape_set(&SelectionSet::new(), false), "({})");
}

#[test]
fn set_text_reads_back() {
    let set = unescape_set("({1 3:5})").expect("set");
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 4, 5]);
}

#[test]
fn descending_set_is_rejected() {
    assert!(unescape_set("({5 2})").is_none());
    assert!(unescape_set("({null})").is_none());
}

#[test]
fn bond_set_literal() {
    match unescape_literal("[{1 2}]") {
        Some(Unescaped::BondSet(set)) => assert_eq!(set.cardinality(), 2),
        _ => panic!("expected bond set"),
    }
}

// =============================================================================
// Points and Matrices
// =============================================================================

#[test]
fn point_text() {
    assert_eq!(escape_point(&Point3::new(1.0, 2.5, -3.0)), "{1.0 2.5 -3.0}");
}

#[test]
fn point_literal() {
    match unescape_literal("{1 2 3}") {
        Some(Unescaped::Point3(p)) => assert_eq!(p, Point3::new(1.0, 2.0, 3.0)),
        _ => panic!("expected point"),
    }
    assert!(matches!(
        unescape_literal("{1 2 3 4}"),
        Some(Unescaped::Point4(_))
    ));
}

#[test]
fn matrix_literal() {
    assert!(matches!(
        unescape_literal("[[1,0,0],[0,1,0],[0,0,1]]"),
        Some(Unescaped::Matrix3(_))
    ));
    assert!(unescape_literal("[[1,0],[0,1]]").is_none());
}

// =============================================================================
// Strings and Numbers
// =============================================================================

#[test]
fn string_escapes() {
    assert_eq!(escape_string("tab\there\r"), "\"tab\\there\\r\"");
    assert_eq!(escape_string("\u{3b1}"), "\"\\u03b1\"");
}

#[test]
fn unicode_escapes_decode() {
    assert_eq!(unescape_unicode("caf\\u00E9"), "caf\u{e9}");
    assert_eq!(unescape_unicode("a\\tb"), "a\\tb");
}

#[test]
fn decimals() {
    assert_eq!(format_decimal(1.0), "1.0");
    assert_eq!(format_decimal(0.25), "0.25");
    assert_eq!(format_decimal(f64::NAN), "NaN");
}
