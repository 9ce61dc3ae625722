//! The script value: a tagged union used for literals and variables.
//!
//! Scalars, points, planes, matrices, and selection sets live inline (the
//! larger payloads behind an `Arc` so copies are cheap and the payload is
//! never edited through a shared reference). Lists and maps live in a
//! [`ValueHeap`] and are referenced by handle.
//!
//! Coercions ([`ScriptValue::as_bool`], [`ScriptValue::as_int`],
//! [`ScriptValue::as_float`], [`ScriptValue::as_string`]) are total: every
//! variant converts to every scalar form without error.

use std::sync::Arc;

use crate::bitset::SelectionSet;
use crate::escape::{escape_matrix3, escape_matrix4, escape_point, escape_point4, escape_set, format_decimal};
use crate::geometry::{Matrix3, Matrix4, Point3, Point4};
use crate::heap::{ContainerId, ValueHeap};

/// Tolerance used by [`ScriptValue::approximately_equal`].
pub const EQUALITY_TOLERANCE: f64 = 1e-6;

/// Magnitude below which a point, plane, or matrix is false.
pub const TRUTH_THRESHOLD: f64 = 1e-4;

/// How a selection set is interpreted.
#[derive(Clone, Debug, PartialEq)]
pub enum SetFlavor {
    /// Members index atoms.
    Atoms,
    /// Members index bonds; the optional set holds their endpoint atoms.
    Bonds {
        /// Atoms at either end of the selected bonds, if known.
        endpoints: Option<Arc<SelectionSet>>,
    },
}

/// Payload of a [`ScriptValue`].
#[derive(Clone, Debug)]
pub enum ValueData {
    /// `true`/`false` (the `on`/`off` tokens).
    Boolean(bool),
    /// 32-bit integer.
    Integer(i32),
    /// Decimal number.
    Decimal(f64),
    /// Text.
    String(String),
    /// 3-vector.
    Point3(Point3),
    /// Plane, axis-angle, or quaternion (`{x y z w}`).
    Point4(Point4),
    /// 3×3 matrix.
    Matrix3(Arc<Matrix3>),
    /// 4×4 matrix.
    Matrix4(Arc<Matrix4>),
    /// Selection set.
    Bitset {
        /// Members.
        set: Arc<SelectionSet>,
        /// Atom or bond interpretation.
        flavor: SetFlavor,
    },
    /// Handle to a list in the heap.
    List(ContainerId),
    /// Handle to a map in the heap.
    Map(ContainerId),
}

/// Variant tag of a [`ValueData`], for kind comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// See [`ValueData::Boolean`].
    Boolean,
    /// See [`ValueData::Integer`].
    Integer,
    /// See [`ValueData::Decimal`].
    Decimal,
    /// See [`ValueData::String`].
    String,
    /// See [`ValueData::Point3`].
    Point3,
    /// See [`ValueData::Point4`].
    Point4,
    /// See [`ValueData::Matrix3`].
    Matrix3,
    /// See [`ValueData::Matrix4`].
    Matrix4,
    /// See [`ValueData::Bitset`].
    Bitset,
    /// See [`ValueData::List`].
    List,
    /// See [`ValueData::Map`].
    Map,
}

impl ValueKind {
    /// True for integers and decimals.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Decimal)
    }
}

/// A script value plus its selection state and binding metadata.
#[derive(Clone, Debug)]
pub struct ScriptValue {
    /// The payload.
    pub data: ValueData,
    /// Pending index selection; `None` means the whole value.
    pub(crate) selector: Option<i32>,
    /// Set when an evaluator pinned this value to one item (`select`, `for`).
    pub(crate) item_index: Option<i32>,
    name: Option<String>,
    local: bool,
    can_increment: bool,
}

impl ScriptValue {
    /// Wraps a payload with no selection and no name.
    #[must_use]
    pub fn new(data: ValueData) -> Self {
        Self {
            data,
            selector: None,
            item_index: None,
            name: None,
            local: true,
            can_increment: false,
        }
    }

    /// `true` or `false`.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::new(ValueData::Boolean(value))
    }

    /// An integer.
    #[must_use]
    pub fn integer(value: i32) -> Self {
        Self::new(ValueData::Integer(value))
    }

    /// A decimal.
    #[must_use]
    pub fn decimal(value: f64) -> Self {
        Self::new(ValueData::Decimal(value))
    }

    /// A string.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ValueData::String(value.into()))
    }

    /// The empty string, used as the "nothing" result of failed selections.
    #[must_use]
    pub fn empty() -> Self {
        Self::string(String::new())
    }

    /// A point.
    #[must_use]
    pub fn point3(p: Point3) -> Self {
        Self::new(ValueData::Point3(p))
    }

    /// A plane, axis-angle, or quaternion.
    #[must_use]
    pub fn point4(p: Point4) -> Self {
        Self::new(ValueData::Point4(p))
    }

    /// A 3×3 matrix.
    #[must_use]
    pub fn matrix3(m: Matrix3) -> Self {
        Self::new(ValueData::Matrix3(Arc::new(m)))
    }

    /// A 4×4 matrix.
    #[must_use]
    pub fn matrix4(m: Matrix4) -> Self {
        Self::new(ValueData::Matrix4(Arc::new(m)))
    }

    /// An atom selection.
    #[must_use]
    pub fn atoms(set: SelectionSet) -> Self {
        Self::new(ValueData::Bitset {
            set: Arc::new(set),
            flavor: SetFlavor::Atoms,
        })
    }

    /// A bond selection.
    #[must_use]
    pub fn bonds(set: SelectionSet, endpoints: Option<SelectionSet>) -> Self {
        Self::new(ValueData::Bitset {
            set: Arc::new(set),
            flavor: SetFlavor::Bonds {
                endpoints: endpoints.map(Arc::new),
            },
        })
    }

    /// A value referring to an existing list.
    #[must_use]
    pub fn list(id: ContainerId) -> Self {
        Self::new(ValueData::List(id))
    }

    /// A value referring to an existing map.
    #[must_use]
    pub fn map(id: ContainerId) -> Self {
        Self::new(ValueData::Map(id))
    }

    /// Copies payload and selector only, dropping name, scope, and pin.
    #[must_use]
    pub fn copy_token(&self) -> Self {
        let mut out = Self::new(self.data.clone());
        out.selector = self.selector;
        out
    }

    /// Same payload with a pending selector.
    #[must_use]
    pub fn with_selector(mut self, selector: Option<i32>) -> Self {
        self.selector = selector;
        self
    }

    /// Pins the value to one item, as `select` and `for` do.
    #[must_use]
    pub fn with_item_index(mut self, index: i32) -> Self {
        self.item_index = Some(index);
        self
    }

    /// Pending selector, `None` for the whole value.
    #[must_use]
    pub fn selector(&self) -> Option<i32> {
        self.selector
    }

    /// The pinned item, if any.
    #[must_use]
    pub fn item_index(&self) -> Option<i32> {
        self.item_index
    }

    /// Variant tag.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match &self.data {
            ValueData::Boolean(_) => ValueKind::Boolean,
            ValueData::Integer(_) => ValueKind::Integer,
            ValueData::Decimal(_) => ValueKind::Decimal,
            ValueData::String(_) => ValueKind::String,
            ValueData::Point3(_) => ValueKind::Point3,
            ValueData::Point4(_) => ValueKind::Point4,
            ValueData::Matrix3(_) => ValueKind::Matrix3,
            ValueData::Matrix4(_) => ValueKind::Matrix4,
            ValueData::Bitset { .. } => ValueKind::Bitset,
            ValueData::List(_) => ValueKind::List,
            ValueData::Map(_) => ValueKind::Map,
        }
    }

    /// Heap handle for lists and maps.
    #[must_use]
    pub fn container(&self) -> Option<ContainerId> {
        match self.data {
            ValueData::List(id) | ValueData::Map(id) => Some(id),
            _ => None,
        }
    }

    /// The declared variable name, if bound.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Binds a name; named values may be incremented in place.
    #[must_use]
    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.can_increment = true;
        self
    }

    /// Marks the binding as global.
    #[must_use]
    pub fn set_global(mut self) -> Self {
        self.local = false;
        self
    }

    /// True unless [`ScriptValue::set_global`] was applied.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.local
    }

    /// True once the value has been bound to a name.
    #[must_use]
    pub fn can_increment(&self) -> bool {
        self.can_increment
    }

    /// Adds `n` in place. Non-numeric values first become the number their
    /// text parses to. Returns false for unnamed values.
    pub fn increment(&mut self, heap: &ValueHeap, n: i32) -> bool {
        if !self.can_increment {
            return false;
        }
        self.data = match &self.data {
            ValueData::Integer(i) => ValueData::Integer(i.wrapping_add(n)),
            ValueData::Decimal(f) => ValueData::Decimal(f + f64::from(n)),
            _ => match self.numeric_value(heap) {
                ValueData::Integer(i) => ValueData::Integer(i.wrapping_add(n)),
                ValueData::Decimal(f) => ValueData::Decimal(f + f64::from(n)),
                other => other,
            },
        };
        self.selector = None;
        true
    }

    /// The value as an integer or decimal payload.
    #[must_use]
    pub fn numeric_value(&self, heap: &ValueHeap) -> ValueData {
        match &self.data {
            ValueData::Decimal(f) => ValueData::Decimal(*f),
            ValueData::Integer(i) => ValueData::Integer(*i),
            ValueData::String(_) => {
                let text = self.as_string(heap);
                let f = to_float(&text);
                if text.contains('.') {
                    ValueData::Decimal(f)
                } else {
                    ValueData::Integer(f as i32)
                }
            }
            _ => ValueData::Integer(0),
        }
    }

    /// Truth value.
    #[must_use]
    pub fn as_bool(&self, heap: &ValueHeap) -> bool {
        match &self.data {
            ValueData::Boolean(b) => *b,
            ValueData::Map(_) => true,
            ValueData::Integer(i) => *i != 0,
            ValueData::Decimal(_) | ValueData::String(_) | ValueData::List(_) => {
                self.as_float(heap) != 0.0
            }
            ValueData::Bitset { .. } => self.as_int(heap) != 0,
            ValueData::Point3(_)
            | ValueData::Point4(_)
            | ValueData::Matrix3(_)
            | ValueData::Matrix4(_) => self.as_float(heap).abs() > TRUTH_THRESHOLD,
        }
    }

    /// Integer value; decimals truncate toward zero, sets give their size.
    #[must_use]
    pub fn as_int(&self, heap: &ValueHeap) -> i32 {
        match &self.data {
            ValueData::Boolean(b) => i32::from(*b),
            ValueData::Integer(i) => *i,
            ValueData::Bitset { .. } => {
                i32::try_from(self.selected_members().cardinality()).unwrap_or(i32::MAX)
            }
            ValueData::Map(_) => 0,
            _ => self.as_float(heap) as i32,
        }
    }

    /// Decimal value.
    #[must_use]
    pub fn as_float(&self, heap: &ValueHeap) -> f64 {
        match &self.data {
            ValueData::Boolean(b) => f64::from(u8::from(*b)),
            ValueData::Integer(i) => f64::from(*i),
            ValueData::Decimal(f) => *f,
            ValueData::List(id) if self.selector.is_none() => heap.list(*id).len() as f64,
            ValueData::List(_) | ValueData::String(_) => to_float(&self.as_string(heap)),
            ValueData::Bitset { .. } => f64::from(self.as_int(heap)),
            ValueData::Point3(p) => p.length(),
            ValueData::Point4(p) => p.distance_to_plane(&Point3::default()),
            ValueData::Matrix3(m) => m.transform(&Point3::default()).length(),
            ValueData::Matrix4(m) => m.transform(&Point3::default()).length(),
            ValueData::Map(_) => 0.0,
        }
    }

    /// Plain text form.
    ///
    /// A pending selector on a string or list picks one item: positive
    /// selectors are 1-based, zero is the last item, and anything past
    /// either end yields the empty string.
    #[must_use]
    pub fn as_string(&self, heap: &ValueHeap) -> String {
        match &self.data {
            ValueData::Boolean(b) => b.to_string(),
            ValueData::Integer(i) => i.to_string(),
            ValueData::Decimal(f) => format_decimal(*f),
            ValueData::Bitset { flavor, .. } => {
                escape_set(&self.selected_members(), matches!(flavor, SetFlavor::Bonds { .. }))
            }
            ValueData::List(id) => match self.selector {
                Some(i) => {
                    let items = heap.list(*id);
                    item_at(items.len(), i).map_or_else(String::new, |k| items[k].as_string(heap))
                }
                None => self.render(heap, false),
            },
            ValueData::Map(_) => self.render(heap, false),
            ValueData::String(s) => match self.selector {
                None => s.clone(),
                Some(i) => {
                    let len = s.chars().count();
                    item_at(len, i)
                        .and_then(|k| s.chars().nth(k))
                        .map(String::from)
                        .unwrap_or_default()
                }
            },
            ValueData::Point3(p) => escape_point(p),
            ValueData::Point4(p) => escape_point4(p),
            ValueData::Matrix3(m) => escape_matrix3(m),
            ValueData::Matrix4(m) => escape_matrix4(m),
        }
    }

    /// The point payload, parsing `{x y z}` text if needed.
    #[must_use]
    pub fn as_point(&self) -> Option<Point3> {
        match &self.data {
            ValueData::Point3(p) => Some(*p),
            ValueData::String(s) => match crate::escape::unescape_point(s) {
                Some(crate::escape::Unescaped::Point3(p)) => Some(p),
                _ => None,
            },
            _ => None,
        }
    }

    /// The 4-vector payload, parsing `{x y z w}` text if needed.
    #[must_use]
    pub fn as_point4(&self) -> Option<Point4> {
        match &self.data {
            ValueData::Point4(p) => Some(*p),
            ValueData::String(s) => match crate::escape::unescape_point(s) {
                Some(crate::escape::Unescaped::Point4(p)) => Some(p),
                _ => None,
            },
            _ => None,
        }
    }

    /// Length used by size queries.
    ///
    /// Scalars report a negative code identifying their kind: -1 boolean,
    /// -2 integer, -4 decimal, -8 point, -16 plane, -32 3×3 matrix,
    /// -64 4×4 matrix.
    #[must_use]
    pub fn size(&self, heap: &ValueHeap) -> i32 {
        let count = |n: usize| i32::try_from(n).unwrap_or(i32::MAX);
        match &self.data {
            ValueData::Bitset { .. } => count(self.selected_members().cardinality()),
            ValueData::Boolean(_) => -1,
            ValueData::Integer(_) => -2,
            ValueData::Decimal(_) => -4,
            ValueData::Point3(_) => -8,
            ValueData::Point4(_) => -16,
            ValueData::Matrix3(_) => -32,
            ValueData::Matrix4(_) => -64,
            ValueData::String(s) => count(s.chars().count()),
            ValueData::List(id) => match self.selector {
                None => count(heap.list(*id).len()),
                Some(sel) => {
                    let items = heap.list(*id);
                    let (i1, _) = crate::select::resolve_range(items.len(), sel, None);
                    usize::try_from(i1 - 1)
                        .ok()
                        .and_then(|i| items.get(i))
                        .map_or(0, |item| item.size(heap))
                }
            },
            ValueData::Map(id) => count(heap.container_len(*id)),
        }
    }

    /// Loose equality: strings ignore case, points compare by distance, and
    /// everything else compares numerically, all within 1e-6.
    #[must_use]
    pub fn approximately_equal(&self, other: &ScriptValue, heap: &ValueHeap) -> bool {
        match (&self.data, &other.data) {
            (ValueData::String(_), ValueData::String(_)) => {
                self.as_string(heap).to_lowercase() == other.as_string(heap).to_lowercase()
            }
            (ValueData::Point3(a), ValueData::Point3(b)) => a.distance(b) < EQUALITY_TOLERANCE,
            (ValueData::Point4(a), ValueData::Point4(b)) => a.distance(b) < EQUALITY_TOLERANCE,
            _ => (self.as_float(heap) - other.as_float(heap)).abs() < EQUALITY_TOLERANCE,
        }
    }

    /// Members of a selection set after applying any pending selector.
    /// Non-set values yield an empty set.
    #[must_use]
    pub fn selected_members(&self) -> Arc<SelectionSet> {
        let resolved = if self.selector.is_some() {
            self.select_item_scalar(None)
        } else {
            self.clone()
        };
        match resolved.data {
            ValueData::Bitset { set, .. } => set,
            _ => Arc::new(SelectionSet::new()),
        }
    }
}

/// Parses text as a number: `true` is 1, `false` or empty is 0, anything
/// else must be a complete decimal number or the result is NaN.
#[must_use]
pub fn to_float(text: &str) -> f64 {
    if text.eq_ignore_ascii_case("true") {
        return 1.0;
    }
    if text.is_empty() || text.eq_ignore_ascii_case("false") {
        return 0.0;
    }
    let trimmed = text.trim();
    let numeric = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
    if !numeric {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Resolves a 1-based item selector against `len` items, where zero and
/// negative selectors count back from `len`. Returns a zero-based index.
fn item_at(len: usize, selector: i32) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let mut i = i64::from(selector);
    if i <= 0 {
        i = len - i;
    }
    (1..=len).contains(&i).then(|| (i - 1) as usize)
}
