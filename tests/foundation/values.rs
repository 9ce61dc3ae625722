//! Integration tests for ScriptValue
//!
//! Tests conversions, selection, and list operations through the heap.

use std::collections::BTreeMap;

use molscript_foundation::{HostValue, Point3, ScriptValue, SelectionSet, ValueHeap, ValueKind};

// =============================================================================
// Conversions
// =============================================================================

#[test]
fn scalar_conversions() {
    let heap = ValueHeap::new();
    assert_eq!(ScriptValue::integer(7).as_string(&heap), "7");
    assert_eq!(ScriptValue::decimal(2.5).as_int(&heap), 2);
    assert_eq!(ScriptValue::string("3.5").as_float(&heap), 3.5);
    assert!(ScriptValue::boolean(true).as_bool(&heap));
    assert!(!ScriptValue::string("0").as_bool(&heap));
}

#[test]
fn size_codes() {
    let heap = ValueHeap::new();
    assert_eq!(ScriptValue::boolean(false).size(&heap), -1);
    assert_eq!(ScriptValue::integer(1).size(&heap), -2);
    assert_eq!(ScriptValue::decimal(1.0).size(&heap), -4);
    assert_eq!(ScriptValue::point3(Point3::default()).size(&heap), -8);
    assert_eq!(ScriptValue::string("abc").size(&heap), 3);
}

#[test]
fn set_value_text() {
    let heap = ValueHeap::new();
    let set: SelectionSet = [1, 2, 3].into_iter().collect();
    let value = ScriptValue::atoms(set);
    assert_eq!(value.kind(), ValueKind::Bitset);
    assert_eq!(value.as_string(&heap), "({1:3})");
    assert_eq!(value.as_int(&heap), 3);
}

#[test]
fn approximate_equality_ignores_case() {
    let heap = ValueHeap::new();
    let a = ScriptValue::string("Carbon");
    let b = ScriptValue::string("carbon");
    assert!(a.approximately_equal(&b, &heap));
    assert!(ScriptValue::integer(1).approximately_equal(&ScriptValue::decimal(1.0), &heap));
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn string_selection() {
    let mut heap = ValueHeap::new();
    let text = ScriptValue::string("testing");
    let pick = |heap: &mut ValueHeap, lo, hi| text.select(heap, Some(lo), hi).as_string(heap);
    assert_eq!(pick(&mut heap, 0, None), "g");
    assert_eq!(pick(&mut heap, -1, None), "n");
    assert_eq!(pick(&mut heap, 3, Some(0)), "sting");
    assert_eq!(pick(&mut heap, -1, Some(0)), "ng");
}

#[test]
fn list_item_selection() {
    let mut heap = ValueHeap::new();
    let list = heap.new_list(vec![
        ScriptValue::integer(10),
        ScriptValue::integer(20),
        ScriptValue::integer(30),
    ]);
    let second = list.select(&mut heap, Some(2), None);
    assert_eq!(second.as_int(&heap), 20);
    let tail = list.select(&mut heap, Some(2), Some(0));
    assert_eq!(tail.size(&heap), 2);
}

// =============================================================================
// Lists and Maps
// =============================================================================

#[test]
fn push_pop_and_reverse() {
    let mut heap = ValueHeap::new();
    let list = heap.new_list(vec![ScriptValue::integer(1)]);
    list.push_pop(&mut heap, Some(&ScriptValue::integer(2)));
    list.push_pop(&mut heap, Some(&ScriptValue::integer(3)));
    assert_eq!(list.size(&heap), 3);

    list.sort_or_reverse(&mut heap, None);
    assert_eq!(list.escape(&heap), "[3,2,1]");

    let popped = list.push_pop(&mut heap, None);
    assert_eq!(popped.as_int(&heap), 1);
    assert_eq!(list.size(&heap), 2);
}

#[test]
fn pop_on_empty_list_is_empty_string() {
    let mut heap = ValueHeap::new();
    let list = heap.new_list(Vec::new());
    assert_eq!(list.push_pop(&mut heap, None).as_string(&heap), "");
}

#[test]
fn map_escape_sorts_keys() {
    let mut heap = ValueHeap::new();
    let mut entries = BTreeMap::new();
    entries.insert("b".to_string(), ScriptValue::integer(2));
    entries.insert("a".to_string(), ScriptValue::string("x"));
    let map = heap.new_map(entries);
    assert_eq!(map.escape(&heap), "{ \"a\":\"x\", \"b\":2 }");
    assert_eq!(map.size(&heap), 2);
}

// =============================================================================
// Host Values
// =============================================================================

#[test]
fn host_lists_become_heap_lists() {
    let mut heap = ValueHeap::new();
    let value = ScriptValue::from_host(&mut heap, HostValue::Ints(vec![4, 5, 6]));
    assert_eq!(value.kind(), ValueKind::List);
    assert_eq!(value.size(&heap), 3);
    assert_eq!(value.escape(&heap), "[4,5,6]");
}

#[test]
fn host_null_is_empty_string() {
    let mut heap = ValueHeap::new();
    let value = ScriptValue::from_host(&mut heap, HostValue::Null);
    assert_eq!(value.as_string(&heap), "");
}
