//! The embedding application's hooks into compilation.

/// Marker that introduces a script embedded in a larger document.
pub const EMBEDDED_SCRIPT_TAG: &str = "**** Jmol Embedded Script ****";

/// Services the compiler asks of its host.
///
/// Both methods have defaults, so a host only overrides what it needs.
pub trait ScriptHost {
    /// Extracts a script embedded in `text`.
    ///
    /// The default finds [`EMBEDDED_SCRIPT_TAG`], backs up to the comment
    /// opener before it, and returns the text after the tag up to the
    /// matching `*/` (or `**/` for a `/**` opener) plus a newline. Text
    /// without the tag is returned unchanged.
    fn extract_embedded_script(&self, text: &str) -> String {
        extract_embedded(text)
    }

    /// True if `name` is a builtin the host defines itself. Consulted only
    /// for `define` while predefining.
    fn is_known_builtin_name(&self, name: &str) -> bool {
        let _ = name;
        false
    }
}

/// A host that uses every default.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHost;

impl ScriptHost for DefaultHost {}

fn extract_embedded(text: &str) -> String {
    let Some(tag) = text.find(EMBEDDED_SCRIPT_TAG) else {
        return text.to_string();
    };
    let Some(open) = text[..tag].rfind("/*") else {
        return text.to_string();
    };
    let closer = if text[open + 2..].starts_with('*') {
        "**/"
    } else {
        "*/"
    };
    let body_start = tag + EMBEDDED_SCRIPT_TAG.len();
    match text[body_start..].find(closer) {
        Some(len) => format!("{}\n", &text[body_start..body_start + len]),
        None => text.to_string(),
    }
}
