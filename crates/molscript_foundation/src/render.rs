//! Text rendering of values, including nested lists and maps.
//!
//! Plain rendering writes one list item per line and maps as tab-separated
//! `key\t:value` lines with nested scalars indented by depth. Escaped
//! rendering writes literals the scanner can read back: `[a,b]` and
//! `{ "k":v, "k2":v2 }` with map keys sorted.
//!
//! Containers already seen during a render are not entered again; a
//! placeholder is written instead, so self-referencing structures render
//! in finite time.

use std::collections::HashSet;

use crate::escape::escape_string;
use crate::heap::{ContainerId, ValueHeap};
use crate::value::{ScriptValue, ValueData};

impl ScriptValue {
    /// Renders the whole value; `escaped` selects the literal form.
    #[must_use]
    pub fn render(&self, heap: &ValueHeap, escaped: bool) -> String {
        let mut out = String::new();
        let mut visited = HashSet::new();
        render_into(&mut out, self, heap, &mut visited, 0, escaped);
        out
    }

    /// The escaped literal form: quoted strings, bracketed lists and maps,
    /// and the canonical form of everything else.
    #[must_use]
    pub fn escape(&self, heap: &ValueHeap) -> String {
        match &self.data {
            ValueData::String(s) => escape_string(s),
            ValueData::List(_) | ValueData::Map(_) => self.render(heap, true),
            _ => self.as_string(heap),
        }
    }
}

fn placeholder(value: &ScriptValue, escaped: bool, empty: &str) -> String {
    if escaped {
        return empty.to_string();
    }
    match value.name() {
        Some(name) => format!("<{name}>"),
        None => "<circular reference>".to_string(),
    }
}

fn render_into(
    out: &mut String,
    value: &ScriptValue,
    heap: &ValueHeap,
    visited: &mut HashSet<ContainerId>,
    level: usize,
    escaped: bool,
) {
    match value.data {
        ValueData::Map(id) => {
            if !visited.insert(id) {
                out.push_str(&placeholder(value, escaped, "{}"));
                return;
            }
            render_map(out, id, heap, visited, level, escaped);
            visited.remove(&id);
        }
        ValueData::List(id) => {
            if !visited.insert(id) {
                out.push_str(&placeholder(value, escaped, "[]"));
                return;
            }
            render_list(out, id, heap, visited, level, escaped);
            visited.remove(&id);
        }
        _ => {
            if escaped {
                out.push_str(&value.escape(heap));
            } else {
                for _ in 1..level {
                    out.push('\t');
                }
                out.push_str(&value.as_string(heap));
            }
        }
    }
}

fn render_map(
    out: &mut String,
    id: ContainerId,
    heap: &ValueHeap,
    visited: &mut HashSet<ContainerId>,
    level: usize,
    escaped: bool,
) {
    let Some(entries) = heap.map(id) else {
        out.push_str(if escaped { "{}" } else { "" });
        return;
    };
    if escaped {
        out.push_str("{ ");
        for (i, (key, item)) in entries.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&escape_string(key));
            out.push(':');
            render_into(out, item, heap, visited, level + 1, true);
        }
        out.push_str(" }");
        return;
    }
    for (key, item) in entries {
        out.push_str(key);
        out.push_str("\t:");
        let mut nested = String::new();
        render_into(&mut nested, item, heap, visited, level + 1, false);
        out.push(if nested.contains('\n') { '\n' } else { '\t' });
        out.push_str(&nested);
        out.push('\n');
    }
}

fn render_list(
    out: &mut String,
    id: ContainerId,
    heap: &ValueHeap,
    visited: &mut HashSet<ContainerId>,
    level: usize,
    escaped: bool,
) {
    if escaped {
        out.push('[');
    }
    for (i, item) in heap.list(id).iter().enumerate() {
        if escaped && i > 0 {
            out.push(',');
        }
        render_into(out, item, heap, visited, level + 1, escaped);
        if !escaped {
            out.push('\n');
        }
    }
    if escaped {
        out.push(']');
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::geometry::Point3;

    #[test]
    fn escaped_list_and_map() {
        let mut heap = ValueHeap::new();
        let list = heap.new_list(vec![
            ScriptValue::integer(1),
            ScriptValue::string("a\"b"),
            ScriptValue::point3(Point3::new(1.0, 2.0, 3.0)),
        ]);
        assert_eq!(list.escape(&heap), "[1,\"a\\\"b\",{1.0 2.0 3.0}]");

        let mut entries = BTreeMap::new();
        entries.insert("b".to_string(), ScriptValue::integer(2));
        entries.insert("a".to_string(), ScriptValue::string("x"));
        let map = heap.new_map(entries);
        assert_eq!(map.escape(&heap), "{ \"a\":\"x\", \"b\":2 }");
    }

    #[test]
    fn plain_map_lines() {
        let mut heap = ValueHeap::new();
        let inner = heap.new_list(vec![ScriptValue::integer(1), ScriptValue::integer(2)]);
        let mut entries = BTreeMap::new();
        entries.insert("k".to_string(), ScriptValue::integer(5));
        entries.insert("list".to_string(), inner);
        let map = heap.new_map(entries);
        assert_eq!(map.as_string(&heap), "k\t:\t5\nlist\t:\n\t1\n\t2\n\n");
    }

    #[test]
    fn plain_list_lines() {
        let mut heap = ValueHeap::new();
        let list = heap.new_list(vec![ScriptValue::string("x"), ScriptValue::decimal(0.5)]);
        assert_eq!(list.as_string(&heap), "x\n0.5\n");
    }

    #[test]
    fn self_reference_terminates() {
        let mut heap = ValueHeap::new();
        let list = heap.new_list(vec![ScriptValue::integer(1)]);
        let id = list.container().unwrap();
        let named = list.clone().set_name("me");
        heap.list_mut(id).unwrap().push(named);
        assert_eq!(list.escape(&heap), "[1,[]]");
        assert_eq!(list.as_string(&heap), "1\n<me>\n");

        let map = heap.new_map(BTreeMap::new());
        let mid = map.container().unwrap();
        heap.map_mut(mid).unwrap().insert("self".into(), map.clone());
        assert_eq!(map.escape(&heap), "{ \"self\":{} }");
        assert_eq!(map.as_string(&heap), "self\t:\t<circular reference>\n");
    }

    #[test]
    fn shared_container_renders_each_time() {
        let mut heap = ValueHeap::new();
        let inner = heap.new_list(vec![ScriptValue::integer(1), ScriptValue::integer(2)]);
        let outer = heap.new_list(vec![inner.clone(), inner.clone()]);
        assert_eq!(outer.escape(&heap), "[[1,2],[1,2]]");
        assert_eq!(outer.as_string(&heap), "\t1\n\t2\n\n\t1\n\t2\n\n");

        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), inner.clone());
        entries.insert("b".to_string(), inner);
        let map = heap.new_map(entries);
        assert_eq!(map.escape(&heap), "{ \"a\":[1,2], \"b\":[1,2] }");
    }
}
