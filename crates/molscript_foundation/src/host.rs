//! Conversion of host-side data into script values.

use std::collections::BTreeMap;

use crate::bitset::SelectionSet;
use crate::escape::{Unescaped, unescape_literal};
use crate::geometry::{Matrix3, Matrix4, Point3, Point4};
use crate::heap::ValueHeap;
use crate::value::ScriptValue;

/// Data handed to the compiler or evaluator by the embedding application.
#[derive(Clone, Debug)]
pub enum HostValue {
    /// Absent value; becomes the empty string.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i32),
    /// Floating point.
    Float(f64),
    /// Text, probed for an escaped literal first.
    Str(String),
    /// 3-vector.
    Vec3(Point3),
    /// Plane or axis-angle.
    Vec4(Point4),
    /// Quaternion `w + xi + yj + zk`.
    Quaternion {
        /// Scalar part.
        w: f64,
        /// i component.
        x: f64,
        /// j component.
        y: f64,
        /// k component.
        z: f64,
    },
    /// 3×3 matrix.
    Matrix3(Matrix3),
    /// 4×4 matrix.
    Matrix4(Matrix4),
    /// Atom selection.
    Set(SelectionSet),
    /// Bond selection with optional endpoint atoms.
    BondSet(SelectionSet, Option<SelectionSet>),
    /// Ordered list.
    List(Vec<HostValue>),
    /// Keyed entries, in host iteration order.
    Map(Vec<(String, HostValue)>),
    /// Integer array.
    Ints(Vec<i32>),
    /// Float array.
    Floats(Vec<f64>),
    /// String array; elements are never probed for literals.
    Strings(Vec<String>),
    /// Point array.
    Points(Vec<Point3>),
    /// An existing script value, taken as-is.
    Value(ScriptValue),
}

impl HostValue {
    fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl ScriptValue {
    /// Builds a script value from host data.
    ///
    /// Strings that read as a point, plane, selection set, or matrix literal
    /// become that variant. A list whose first element is already a
    /// [`HostValue::Value`] is taken verbatim: no element of it is probed for
    /// literal syntax. Map values are always converted one by one.
    pub fn from_host(heap: &mut ValueHeap, value: HostValue) -> ScriptValue {
        convert(heap, value, true)
    }
}

fn convert(heap: &mut ValueHeap, value: HostValue, probe: bool) -> ScriptValue {
    match value {
        HostValue::Null => ScriptValue::empty(),
        HostValue::Bool(b) => ScriptValue::boolean(b),
        HostValue::Int(i) => ScriptValue::integer(i),
        HostValue::Float(f) => ScriptValue::decimal(f),
        HostValue::Str(s) => {
            if probe && !s.is_empty() {
                if let Some(literal) = unescape_literal(&s) {
                    return from_literal(literal);
                }
            }
            ScriptValue::string(s)
        }
        HostValue::Vec3(p) => ScriptValue::point3(p),
        HostValue::Vec4(p) => ScriptValue::point4(p),
        HostValue::Quaternion { w, x, y, z } => ScriptValue::point4(Point4::from_quaternion(w, x, y, z)),
        HostValue::Matrix3(m) => ScriptValue::matrix3(m),
        HostValue::Matrix4(m) => ScriptValue::matrix4(m),
        HostValue::Set(set) => ScriptValue::atoms(set),
        HostValue::BondSet(set, endpoints) => ScriptValue::bonds(set, endpoints),
        HostValue::List(items) => {
            let verbatim = !probe || items.first().is_some_and(HostValue::is_value);
            let items = items
                .into_iter()
                .map(|item| convert(heap, item, !verbatim))
                .collect();
            heap.new_list(items)
        }
        HostValue::Map(entries) => {
            let mut converted = BTreeMap::new();
            for (key, item) in entries {
                let item = convert(heap, item, true);
                converted.insert(key, item);
            }
            heap.new_map(converted)
        }
        HostValue::Ints(values) => {
            let items = values.into_iter().map(ScriptValue::integer).collect();
            heap.new_list(items)
        }
        HostValue::Floats(values) => {
            let items = values.into_iter().map(ScriptValue::decimal).collect();
            heap.new_list(items)
        }
        HostValue::Strings(values) => {
            let items = values.into_iter().map(ScriptValue::string).collect();
            heap.new_list(items)
        }
        HostValue::Points(values) => {
            let items = values.into_iter().map(ScriptValue::point3).collect();
            heap.new_list(items)
        }
        HostValue::Value(v) => v,
    }
}

/// Wraps a parsed literal payload.
#[must_use]
pub fn from_literal(literal: Unescaped) -> ScriptValue {
    match literal {
        Unescaped::Point3(p) => ScriptValue::point3(p),
        Unescaped::Point4(p) => ScriptValue::point4(p),
        Unescaped::Set(set) => ScriptValue::atoms(set),
        Unescaped::BondSet(set) => ScriptValue::bonds(set, None),
        Unescaped::Matrix3(m) => ScriptValue::matrix3(m),
        Unescaped::Matrix4(m) => ScriptValue::matrix4(m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ValueData, ValueKind};

    #[test]
    fn scalars() {
        let mut heap = ValueHeap::new();
        assert_eq!(ScriptValue::from_host(&mut heap, HostValue::Null).as_string(&heap), "");
        assert_eq!(ScriptValue::from_host(&mut heap, HostValue::Bool(true)).kind(), ValueKind::Boolean);
        assert_eq!(ScriptValue::from_host(&mut heap, HostValue::Float(1.5)).kind(), ValueKind::Decimal);
    }

    #[test]
    fn strings_are_probed_for_literals() {
        let mut heap = ValueHeap::new();
        let p = ScriptValue::from_host(&mut heap, HostValue::Str("{1 2 3}".into()));
        assert_eq!(p.kind(), ValueKind::Point3);
        let s = ScriptValue::from_host(&mut heap, HostValue::Str("({0:3})".into()));
        assert_eq!(s.as_int(&heap), 4);
        let b = ScriptValue::from_host(&mut heap, HostValue::Str("[{1}]".into()));
        assert_eq!(b.as_string(&heap), "[{1}]");
        let plain = ScriptValue::from_host(&mut heap, HostValue::Str("{carbon}".into()));
        assert_eq!(plain.kind(), ValueKind::String);
    }

    #[test]
    fn quaternion_is_stored_vector_first() {
        let mut heap = ValueHeap::new();
        let q = ScriptValue::from_host(
            &mut heap,
            HostValue::Quaternion {
                w: 0.5,
                x: 1.0,
                y: 2.0,
                z: 3.0,
            },
        );
        match q.data {
            ValueData::Point4(p) => assert_eq!(p, Point4::new(1.0, 2.0, 3.0, 0.5)),
            other => panic!("expected point4, got {other:?}"),
        }
    }

    #[test]
    fn list_conversion_depends_on_first_element() {
        let mut heap = ValueHeap::new();
        let converted = ScriptValue::from_host(
            &mut heap,
            HostValue::List(vec![HostValue::Int(1), HostValue::Str("{1 2 3}".into())]),
        );
        let items = heap.list(converted.container().unwrap());
        assert_eq!(items[1].kind(), ValueKind::Point3);

        let verbatim = ScriptValue::from_host(
            &mut heap,
            HostValue::List(vec![
                HostValue::Value(ScriptValue::integer(1)),
                HostValue::Str("{1 2 3}".into()),
            ]),
        );
        let items = heap.list(verbatim.container().unwrap());
        assert_eq!(items[1].kind(), ValueKind::String);
    }

    #[test]
    fn map_values_are_each_converted() {
        let mut heap = ValueHeap::new();
        let map = ScriptValue::from_host(
            &mut heap,
            HostValue::Map(vec![
                ("a".into(), HostValue::Str("({1})".into())),
                ("b".into(), HostValue::Int(2)),
            ]),
        );
        let entries = heap.map(map.container().unwrap()).unwrap();
        assert_eq!(entries["a"].kind(), ValueKind::Bitset);
        assert_eq!(entries["b"].kind(), ValueKind::Integer);

        let value_first = ScriptValue::from_host(
            &mut heap,
            HostValue::Map(vec![
                ("a".into(), HostValue::Value(ScriptValue::integer(1))),
                ("b".into(), HostValue::Str("{1 2 3}".into())),
            ]),
        );
        let entries = heap.map(value_first.container().unwrap()).unwrap();
        assert_eq!(entries["a"].kind(), ValueKind::Integer);
        assert_eq!(entries["b"].kind(), ValueKind::Point3);
    }

    #[test]
    fn arrays_become_lists() {
        let mut heap = ValueHeap::new();
        let v = ScriptValue::from_host(&mut heap, HostValue::Strings(vec!["({1})".into()]));
        let items = heap.list(v.container().unwrap());
        assert_eq!(items[0].kind(), ValueKind::String);
        let f = ScriptValue::from_host(&mut heap, HostValue::Floats(vec![1.0, 2.0]));
        assert_eq!(f.size(&heap), 2);
    }
}
