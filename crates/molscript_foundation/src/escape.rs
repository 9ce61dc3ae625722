//! The canonical escape format for script literals.
//!
//! Values render to a text form that the scanner reads back:
//!
//! | payload        | escaped form                  |
//! |----------------|-------------------------------|
//! | string         | `"a\tb"` (`\uXXXX` for non-ASCII) |
//! | point          | `{1.0 2.0 3.0}`               |
//! | plane/quat     | `{1.0 2.0 3.0 4.0}`           |
//! | selection set  | `({0 2:5 7})`                 |
//! | bond set       | `[{0 2:5 7}]`                 |
//! | matrix         | `[[1.0,0.0,0.0],[...],[...]]` |

use crate::bitset::SelectionSet;
use crate::geometry::{Matrix3, Matrix4, Point3, Point4};

/// A literal payload recovered from its escaped text form.
#[derive(Clone, Debug, PartialEq)]
pub enum Unescaped {
    /// `{x y z}`
    Point3(Point3),
    /// `{x y z w}`
    Point4(Point4),
    /// `({...})`
    Set(SelectionSet),
    /// `[{...}]`
    BondSet(SelectionSet),
    /// `[[...]]` with nine elements
    Matrix3(Matrix3),
    /// `[[...]]` with sixteen elements
    Matrix4(Matrix4),
}

/// Formats a decimal the way script values print it (`1.0`, `0.25`, `1e-7`).
#[must_use]
pub fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else {
        format!("{value:?}")
    }
}

/// Quotes a string, escaping backslash, tab, CR, LF, and double quote, and
/// writing every non-ASCII UTF-16 unit as `\uXXXX`.
#[must_use]
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '"' => out.push_str("\\\""),
            c if u32::from(c) > 0x7F => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `{x y z}`
#[must_use]
pub fn escape_point(p: &Point3) -> String {
    format!(
        "{{{} {} {}}}",
        format_decimal(p.x),
        format_decimal(p.y),
        format_decimal(p.z)
    )
}

/// `{x y z w}`
#[must_use]
pub fn escape_point4(p: &Point4) -> String {
    format!(
        "{{{} {} {} {}}}",
        format_decimal(p.x),
        format_decimal(p.y),
        format_decimal(p.z),
        format_decimal(p.w)
    )
}

fn escape_rows<const N: usize>(rows: &[[f64; N]; N]) -> String {
    let body: Vec<String> = rows
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|&v| format_decimal(v)).collect();
            format!("[{}]", cells.join(","))
        })
        .collect();
    format!("[{}]", body.join(","))
}

/// `[[a,b,c],[d,e,f],[g,h,i]]`
#[must_use]
pub fn escape_matrix3(m: &Matrix3) -> String {
    escape_rows(&m.rows)
}

/// Four-row form of [`escape_matrix3`].
#[must_use]
pub fn escape_matrix4(m: &Matrix4) -> String {
    escape_rows(&m.rows)
}

/// Renders a selection set as `({0 2:5})`, or `[{0 2:5}]` for bonds.
///
/// Runs of three or more use `first:last`; a run of two is written as two
/// separate members.
#[must_use]
pub fn escape_set(set: &SelectionSet, bonds: bool) -> String {
    let (open, close) = if bonds { ('[', ']') } else { ('(', ')') };
    let mut out = String::new();
    out.push(open);
    out.push('{');
    let mut members = set.iter().peekable();
    let mut first = true;
    while let Some(start) = members.next() {
        let mut end = start;
        while members.peek() == Some(&(end + 1)) {
            end += 1;
            members.next();
        }
        if !first {
            out.push(' ');
        }
        first = false;
        out.push_str(&start.to_string());
        if end == start + 1 {
            out.push(' ');
            out.push_str(&end.to_string());
        } else if end > start {
            out.push(':');
            out.push_str(&end.to_string());
        }
    }
    out.push('}');
    out.push(close);
    out
}

/// Reads the next number from `text` starting at `*pos`, skipping leading
/// whitespace. On failure `*pos` is left at the first unusable character.
pub fn parse_float_next(text: &str, pos: &mut usize) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = *pos;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let start = i;
    if i < bytes.len() && (bytes[i] == b'-' || bytes[i] == b'+') {
        i += 1;
    }
    let mut digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        *pos = start;
        return None;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'-' || bytes[j] == b'+') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    *pos = i;
    text[start..i].parse().ok()
}

/// Parses `{x y z}` or `{x y z w}` (commas allowed as separators).
#[must_use]
pub fn unescape_point(text: &str) -> Option<Unescaped> {
    let trimmed = text.replace('\n', " ");
    let trimmed = trimmed.trim();
    let inner = trimmed.strip_prefix('{')?.strip_suffix('}')?;
    let mut values = Vec::with_capacity(5);
    let mut pos = 0;
    while values.len() < 5 {
        match parse_float_next(inner, &mut pos) {
            Some(v) => values.push(v),
            None => {
                if inner.as_bytes().get(pos) != Some(&b',') {
                    break;
                }
                pos += 1;
            }
        }
    }
    match values.as_slice() {
        [x, y, z] => Some(Unescaped::Point3(Point3::new(*x, *y, *z))),
        [x, y, z, w] => Some(Unescaped::Point4(Point4::new(*x, *y, *z, *w))),
        _ => None,
    }
}

/// Parses `({...})` or `[{...}]` selection-set text.
///
/// Members are decimal integers separated by spaces or tabs; `a:b` denotes
/// an inclusive run. Members must be ascending. `({null})` is not accepted
/// here; the scanner handles that spelling itself.
#[must_use]
pub fn unescape_set(text: &str) -> Option<SelectionSet> {
    let s = text.trim();
    let bytes = s.as_bytes();
    let len = bytes.len();
    if len < 4 || s.eq_ignore_ascii_case("({null})") {
        return None;
    }
    let open = bytes[0];
    let close = match open {
        b'(' => b')',
        b'[' => b']',
        _ => return None,
    };
    if bytes[len - 1] != close || bytes[1] != b'{' || s.find('}') != Some(len - 2) {
        return None;
    }
    let body = &bytes[2..len - 2];
    if !body
        .iter()
        .all(|b| b.is_ascii_digit() || matches!(b, b' ' | b'\t' | b':'))
    {
        return None;
    }
    let mut set = SelectionSet::new();
    let mut last: Option<usize> = None;
    let mut run_start: Option<usize> = None;
    let mut current: Option<usize> = None;
    for &b in body.iter().chain(std::iter::once(&b'}')) {
        match b {
            b' ' | b'\t' | b'}' => {
                let Some(value) = current.take() else {
                    continue;
                };
                if last.is_some_and(|l| value < l) {
                    return None;
                }
                last = Some(value);
                let from = run_start.take().unwrap_or(value);
                set.set_range(from, value + 1);
            }
            b':' => {
                run_start = current.take();
                last = run_start;
            }
            digit => {
                let v = current.unwrap_or(0);
                current = Some(v.checked_mul(10)?.checked_add(usize::from(digit - b'0'))?);
            }
        }
    }
    if run_start.is_some() {
        return None;
    }
    Some(set)
}

/// Parses `[[...]]` text holding exactly nine or sixteen numbers.
#[must_use]
pub fn unescape_matrix(text: &str) -> Option<Unescaped> {
    let s = text.replace('\n', " ");
    let s = s.trim();
    if s.rfind("[[") != Some(0) || s.find("]]") != Some(s.len().checked_sub(2)?) {
        return None;
    }
    let inner: String = s[2..s.len() - 2]
        .chars()
        .map(|c| if matches!(c, '[' | ']' | ',') { ' ' } else { c })
        .collect();
    let mut values = Vec::with_capacity(16);
    let mut pos = 0;
    while values.len() < 16 {
        match parse_float_next(&inner, &mut pos) {
            Some(v) => values.push(v),
            None => break,
        }
    }
    if parse_float_next(&inner, &mut pos).is_some() {
        return None;
    }
    match values.len() {
        9 => Matrix3::from_elements(&values).map(Unescaped::Matrix3),
        16 => Matrix4::from_elements(&values).map(Unescaped::Matrix4),
        _ => None,
    }
}

/// Tries every escaped literal form in turn: point/plane, selection set,
/// then matrix.
#[must_use]
pub fn unescape_literal(text: &str) -> Option<Unescaped> {
    if text.starts_with('{') {
        return unescape_point(text);
    }
    let looks_like_set = (is_set_literal(text)
        || text.starts_with("[{") && text.find("[{") == text.rfind("[{"))
        && !text.contains([',', '.', '-']);
    if looks_like_set {
        let set = unescape_set(text)?;
        return Some(if text.starts_with("[{") {
            Unescaped::BondSet(set)
        } else {
            Unescaped::Set(set)
        });
    }
    if text.starts_with("[[") {
        return unescape_matrix(text);
    }
    None
}

fn is_set_literal(text: &str) -> bool {
    text.starts_with("({")
        && text.rfind("({") == Some(0)
        && text.find("})") == text.len().checked_sub(2)
}

/// Decodes `\uXXXX` sequences only, leaving other backslashes alone.
#[must_use]
pub fn unescape_unicode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut units: Vec<u16> = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find("\\u") {
        let hex = rest.get(pos + 2..pos + 6);
        match hex.and_then(|h| u16::from_str_radix(h, 16).ok()) {
            Some(unit) => {
                if !rest[..pos].is_empty() {
                    out.push_str(&String::from_utf16_lossy(&units));
                    units.clear();
                    out.push_str(&rest[..pos]);
                }
                units.push(unit);
                rest = &rest[pos + 6..];
            }
            None => {
                out.push_str(&String::from_utf16_lossy(&units));
                units.clear();
                out.push_str(&rest[..pos + 2]);
                rest = &rest[pos + 2..];
            }
        }
    }
    out.push_str(&String::from_utf16_lossy(&units));
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_escapes() {
        assert_eq!(escape_string(""), "\"\"");
        assert_eq!(escape_string("a\"b\\c\n"), "\"a\\\"b\\\\c\\n\"");
        assert_eq!(escape_string("\u{e9}"), "\"\\u00e9\"");
    }

    #[test]
    fn set_runs() {
        let set: SelectionSet = [0, 2, 3, 4, 5, 7, 8].into_iter().collect();
        assert_eq!(escape_set(&set, false), "({0 2:5 7 8})");
        assert_eq!(escape_set(&SelectionSet::new(), true), "[{}]");
    }

    #[test]
    fn set_parse() {
        let set = unescape_set("({0 2:5 7})").unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 2, 3, 4, 5, 7]);
        assert!(unescape_set("({5 2})").is_none());
        assert!(unescape_set("({1:})").is_none());
        assert!(unescape_set("({a})").is_none());
        assert_eq!(unescape_set("[{}]"), Some(SelectionSet::new()));
    }

    #[test]
    fn point_parse() {
        assert_eq!(
            unescape_point("{1 2 3}"),
            Some(Unescaped::Point3(Point3::new(1.0, 2.0, 3.0)))
        );
        assert_eq!(
            unescape_point("{1, 2, 3, 4}"),
            Some(Unescaped::Point4(Point4::new(1.0, 2.0, 3.0, 4.0)))
        );
        assert_eq!(unescape_point("{1 2}"), None);
        assert_eq!(unescape_point("{carbon}"), None);
    }

    #[test]
    fn matrix_parse() {
        let text = escape_matrix3(&Matrix3::identity());
        assert_eq!(text, "[[1.0,0.0,0.0],[0.0,1.0,0.0],[0.0,0.0,1.0]]");
        assert_eq!(unescape_matrix(&text), Some(Unescaped::Matrix3(Matrix3::identity())));
        assert!(unescape_matrix("[[1 2 3]]").is_none());
    }

    #[test]
    fn literal_dispatch() {
        assert!(matches!(unescape_literal("({1})"), Some(Unescaped::Set(_))));
        assert!(matches!(unescape_literal("[{1}]"), Some(Unescaped::BondSet(_))));
        assert!(unescape_literal("hello").is_none());
    }

    #[test]
    fn unicode_only() {
        assert_eq!(unescape_unicode("c:\\temp\\u00e9"), "c:\\temp\u{e9}");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_text_reads_back(members in prop::collection::btree_set(0usize..200, 0..40)) {
                let set: SelectionSet = members.iter().copied().collect();
                let text = escape_set(&set, false);
                prop_assert_eq!(unescape_set(&text), Some(set));
            }

            #[test]
            fn literal_parsing_never_panics(text in "[\\[\\]{}() :,.0-9a-z-]{0,30}") {
                let _ = unescape_literal(&text);
                let mut pos = 0;
                while pos < text.len() {
                    if parse_float_next(&text, &mut pos).is_none() {
                        pos += 1;
                    }
                }
            }
        }
    }
}
