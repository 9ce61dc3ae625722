//! Indexing, in-place mutation, sorting, and stack operations on values.
//!
//! Selection happens in two stages. The first index applied to a value is
//! only recorded as its pending selector; the second stage resolves that
//! selector against an optional upper bound:
//!
//! ```text
//! "testing"[0]      -> "g"        "testing"[3][0]   -> "sting"
//! "testing"[-1]     -> "n"        "testing"[-1][0]  -> "ng"
//! "testing"[0][-2]  -> "g"
//! ```
//!
//! Matrices use the pending selector as a row (positive), a column
//! (negative), or a two-digit `row*10+col` element.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::bitset::SelectionSet;
use crate::heap::ValueHeap;
use crate::value::{ScriptValue, SetFlavor, ValueData, ValueKind};

enum Selected {
    Value(ScriptValue),
    /// A fresh list of copies, still to be allocated.
    Range(Vec<ScriptValue>),
}

impl ScriptValue {
    /// Applies one selection stage. `hi` is the upper bound of a range
    /// (`Some(0)` meaning "to the end") or `None` for a single item.
    ///
    /// An unselected value just records `hi` as its pending selector and
    /// shares the payload. Kinds other than strings, lists, sets, and
    /// matrices are returned unchanged.
    pub fn select_item(&self, heap: &mut ValueHeap, hi: Option<i32>) -> ScriptValue {
        let selected = match self.data {
            ValueData::List(id) => self.select_core(heap.list(id), hi),
            _ => self.select_core(&[], hi),
        };
        match selected {
            Selected::Value(v) => v,
            Selected::Range(items) => heap.new_list(items),
        }
    }

    /// Two-stage selection `value[lo][hi]`; `lo == None` selects the whole
    /// value.
    pub fn select(&self, heap: &mut ValueHeap, lo: Option<i32>, hi: Option<i32>) -> ScriptValue {
        if lo.is_none() {
            return self.select_whole(heap);
        }
        self.select_item(heap, lo).select_item(heap, hi)
    }

    /// Resolves any pending selector into a standalone value.
    ///
    /// Pinned values and unselected lists are returned as-is, so repeated
    /// whole selection never reallocates.
    pub fn select_whole(&self, heap: &mut ValueHeap) -> ScriptValue {
        if self.item_index.is_some()
            || matches!(self.data, ValueData::List(_)) && self.selector.is_none()
        {
            return self.clone();
        }
        self.select_item(heap, None)
    }

    pub(crate) fn select_item_scalar(&self, hi: Option<i32>) -> ScriptValue {
        match self.select_core(&[], hi) {
            Selected::Value(v) => v,
            Selected::Range(_) => ScriptValue::empty(),
        }
    }

    fn select_core(&self, items: &[ScriptValue], hi: Option<i32>) -> Selected {
        if !matches!(
            self.kind(),
            ValueKind::Matrix3 | ValueKind::Matrix4 | ValueKind::Bitset | ValueKind::List | ValueKind::String
        ) {
            return Selected::Value(self.clone());
        }
        let Some(lo) = self.selector else {
            return Selected::Value(self.copy_token().with_selector(hi));
        };

        let len: usize = match &self.data {
            ValueData::Matrix3(m) => return select_matrix(&m.rows, lo, hi),
            ValueData::Matrix4(m) => return select_matrix(&m.rows, lo, hi),
            ValueData::Bitset { set, flavor } => match flavor {
                SetFlavor::Atoms if self.item_index.is_some() => 1,
                _ => set.cardinality(),
            },
            ValueData::List(_) => items.len(),
            ValueData::String(s) => s.chars().count(),
            _ => 0,
        };
        let (i1, i2) = resolve_range(len, lo, hi);
        let len = len as i64;

        match &self.data {
            ValueData::Bitset { set, flavor } => {
                let mut out = SelectionSet::clone(set);
                if self.item_index.is_some() {
                    if i1 > 1 {
                        out.clear_all();
                    }
                } else {
                    for (n, member) in (1_i64..).zip(set.iter()) {
                        if n < i1 || n > i2 {
                            out.clear(member);
                        }
                    }
                }
                Selected::Value(ScriptValue::new(ValueData::Bitset {
                    set: Arc::new(out),
                    flavor: flavor.clone(),
                }))
            }
            ValueData::String(s) => {
                if i1 < 1 || i1 > len {
                    return Selected::Value(ScriptValue::empty());
                }
                let text: String = s
                    .chars()
                    .skip((i1 - 1) as usize)
                    .take((i2 - i1 + 1).max(0) as usize)
                    .collect();
                Selected::Value(ScriptValue::string(text))
            }
            ValueData::List(_) => {
                if i1 < 1 || i1 > len || i2 > len {
                    return Selected::Value(ScriptValue::empty());
                }
                if i1 == i2 {
                    return Selected::Value(items[(i1 - 1) as usize].clone());
                }
                let copies = items[(i1 - 1) as usize..i2 as usize]
                    .iter()
                    .map(ScriptValue::copy_token)
                    .collect();
                Selected::Range(copies)
            }
            _ => Selected::Value(self.clone()),
        }
    }

    /// Writes `value` at `selector` in place. Returns false if the selector
    /// is `None` or the value kind does not support item assignment.
    ///
    /// Strings pad with spaces and lists with empty strings when the index
    /// is past the end. Matrices accept a `row*10+col` element index, or a
    /// row (positive) or column (negative) index with a list of matching
    /// length.
    pub fn set_selected(&mut self, heap: &mut ValueHeap, selector: Option<i32>, value: &ScriptValue) -> bool {
        let Some(selector) = selector else {
            return false;
        };
        match &mut self.data {
            ValueData::Matrix3(m) => {
                let Some(assignment) = matrix_assignment(heap, 3, selector, value) else {
                    return false;
                };
                let m = Arc::make_mut(m);
                match assignment {
                    Assignment::Element(row, col, v) => m.set(row, col, v),
                    Assignment::Row(row, data) => m.set_row(row, &[data[0], data[1], data[2]]),
                    Assignment::Column(col, data) => m.set_column(col, &[data[0], data[1], data[2]]),
                }
                true
            }
            ValueData::Matrix4(m) => {
                let Some(assignment) = matrix_assignment(heap, 4, selector, value) else {
                    return false;
                };
                let m = Arc::make_mut(m);
                match assignment {
                    Assignment::Element(row, col, v) => m.set(row, col, v),
                    Assignment::Row(row, data) => {
                        m.set_row(row, &[data[0], data[1], data[2], data[3]]);
                    }
                    Assignment::Column(col, data) => {
                        m.set_column(col, &[data[0], data[1], data[2], data[3]]);
                    }
                }
                true
            }
            ValueData::String(s) => {
                let mut chars: Vec<char> = s.chars().collect();
                let pos = assignment_slot(chars.len(), selector);
                while chars.len() <= pos {
                    chars.push(' ');
                }
                let replacement = value.as_string(heap);
                let mut text: String = chars[..pos].iter().collect();
                text.push_str(&replacement);
                text.extend(&chars[pos + 1..]);
                *s = text;
                true
            }
            ValueData::List(id) => {
                let id = *id;
                let Some(items) = heap.list_mut(id) else {
                    return false;
                };
                let pos = assignment_slot(items.len(), selector);
                while items.len() <= pos {
                    items.push(ScriptValue::empty());
                }
                items[pos] = value.clone();
                true
            }
            _ => false,
        }
    }

    /// Reverses a list in place (`column == None`), or stably sorts it by
    /// the 1-based `column` of nested lists. Returns the list itself.
    pub fn sort_or_reverse(&self, heap: &mut ValueHeap, column: Option<i32>) -> ScriptValue {
        let ValueData::List(id) = self.data else {
            return self.clone();
        };
        if heap.list(id).len() < 2 {
            return self.clone();
        }
        match column {
            None => {
                if let Some(items) = heap.list_mut(id) {
                    items.reverse();
                }
            }
            Some(column) => {
                let items = heap.take_list(id);
                let pt = column.saturating_sub(1);
                let sorted = merge_sort(items, &mut |x, y| compare_values(heap, x, y, pt));
                heap.restore_list(id, sorted);
            }
        }
        self.clone()
    }

    /// Pops the last element (`value == None`) or pushes `value` onto a
    /// list. Popping an empty list, or any non-list, yields the empty string.
    pub fn push_pop(&self, heap: &mut ValueHeap, value: Option<&ScriptValue>) -> ScriptValue {
        let ValueData::List(id) = self.data else {
            return ScriptValue::empty();
        };
        match value {
            None => heap
                .list_mut(id)
                .and_then(Vec::pop)
                .unwrap_or_else(ScriptValue::empty),
            Some(value) => {
                let item = value.select_whole(heap);
                if let Some(items) = heap.list_mut(id) {
                    items.push(item);
                }
                self.clone()
            }
        }
    }
}

/// Clamps a selector pair against `len` items, yielding 1-based inclusive
/// bounds. `lo <= 0` counts back from the end; `hi == None` selects one
/// item; `hi == Some(0)` runs to the end; negative `hi` counts back.
pub(crate) fn resolve_range(len: usize, lo: i32, hi: Option<i32>) -> (i64, i64) {
    let len = len as i64;
    let mut i1 = i64::from(lo);
    if i1 <= 0 {
        i1 += len;
    }
    if i1 < 1 {
        i1 = 1;
    }
    let mut i2 = match hi {
        None => i1,
        Some(0) => len,
        Some(h) if h < 0 => len + i64::from(h),
        Some(h) => i64::from(h),
    };
    if i2 > len {
        i2 = len;
    } else if i2 < i1 {
        i2 = i1;
    }
    (i1, i2)
}

fn select_matrix<const N: usize>(rows: &[[f64; N]; N], lo: i32, hi: Option<i32>) -> Selected {
    let len = N as i32;
    if lo > len {
        let col = lo % 10;
        let row = (lo - col) / 10;
        if col > 0 && col <= len && row <= len {
            let value = rows[(row - 1) as usize][(col - 1) as usize];
            return Selected::Value(ScriptValue::decimal(value));
        }
        return Selected::Value(ScriptValue::empty());
    }
    if lo == 0 || lo.abs() > len {
        return Selected::Value(ScriptValue::empty());
    }
    let data: Vec<f64> = if lo < 0 {
        let col = (-1 - lo) as usize;
        rows.iter().map(|r| r[col]).collect()
    } else {
        rows[(lo - 1) as usize].to_vec()
    };
    match hi {
        None => Selected::Range(data.into_iter().map(ScriptValue::decimal).collect()),
        Some(h) if (1..=len).contains(&h) => Selected::Value(ScriptValue::decimal(data[(h - 1) as usize])),
        Some(_) => Selected::Value(ScriptValue::empty()),
    }
}

enum Assignment {
    Element(usize, usize, f64),
    Row(usize, Vec<f64>),
    Column(usize, Vec<f64>),
}

fn matrix_assignment(heap: &ValueHeap, len: i32, selector: i32, value: &ScriptValue) -> Option<Assignment> {
    if selector > 10 {
        let col = selector % 10;
        let row = (selector - col) / 10;
        if col > 0 && col <= len && row <= len {
            return Some(Assignment::Element(
                (row - 1) as usize,
                (col - 1) as usize,
                value.as_float(heap),
            ));
        }
    }
    if selector == 0 || selector.abs() > len {
        return None;
    }
    let ValueData::List(id) = value.data else {
        return None;
    };
    let items = heap.list(id);
    if items.len() != len as usize {
        return None;
    }
    let data: Vec<f64> = items.iter().map(|v| v.as_float(heap)).collect();
    Some(if selector > 0 {
        Assignment::Row((selector - 1) as usize, data)
    } else {
        Assignment::Column((-1 - selector) as usize, data)
    })
}

/// Zero-based write position for a 1-based selector, counting back from
/// `len` for non-positive selectors and clamping at zero.
fn assignment_slot(len: usize, selector: i32) -> usize {
    let len = len as i64;
    let mut sel = i64::from(selector);
    if sel <= 0 {
        sel += len;
    }
    (sel - 1).max(0) as usize
}

fn compare_floats(x: f64, y: f64) -> Ordering {
    if x < y {
        Ordering::Less
    } else if x > y {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Sort order for list elements. `pt` is the zero-based column compared
/// when both sides are lists of equal length; negative counts from the end.
fn compare_values(heap: &ValueHeap, x: &ScriptValue, y: &ScriptValue, pt: i32) -> Ordering {
    let (kx, ky) = (x.kind(), y.kind());
    if kx != ky {
        if kx.is_numeric() || ky.is_numeric() {
            return compare_floats(x.as_float(heap), y.as_float(heap));
        }
        if kx == ValueKind::String || ky == ValueKind::String {
            return x.as_string(heap).cmp(&y.as_string(heap));
        }
    }
    match (&x.data, &y.data) {
        (ValueData::String(_), _) => x.as_string(heap).cmp(&y.as_string(heap)),
        (ValueData::List(a), ValueData::List(b)) => {
            let (sx, sy) = (heap.list(*a), heap.list(*b));
            if sx.len() != sy.len() {
                return sx.len().cmp(&sy.len());
            }
            let mut i = i64::from(pt);
            if i < 0 {
                i += sx.len() as i64;
            }
            if i < 0 || i >= sx.len() as i64 {
                return Ordering::Equal;
            }
            let i = i as usize;
            compare_values(heap, &sx[i], &sy[i], pt)
        }
        _ => compare_floats(x.as_float(heap), y.as_float(heap)),
    }
}

/// Stable merge sort that tolerates comparators which are not total orders.
fn merge_sort<F>(mut items: Vec<ScriptValue>, cmp: &mut F) -> Vec<ScriptValue>
where
    F: FnMut(&ScriptValue, &ScriptValue) -> Ordering,
{
    if items.len() < 2 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, cmp);
    let right = merge_sort(right, cmp);
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(a), Some(b)) => cmp(b, a) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        out.extend(next);
    }
    out
}
