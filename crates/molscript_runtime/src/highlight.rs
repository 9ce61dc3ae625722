//! Syntax highlighting for the console.
//!
//! Coloring follows the scanner, so the console shows strings, numbers,
//! literals, and comments exactly where the compiler will see them.

use std::borrow::Cow;

use molscript_language::token::attr;
use molscript_language::{Lexeme, Scanner, TokenRegistry};

const RESET: &str = "\x1b[0m";

/// Highlighter for molscript source lines.
pub struct ScriptHighlighter {
    registry: TokenRegistry,
}

impl ScriptHighlighter {
    /// Creates a highlighter over the built-in keyword table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: TokenRegistry::new(),
        }
    }

    /// Highlights a line of input.
    #[must_use]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.is_empty() {
            return Cow::Borrowed(line);
        }
        let chars: Vec<char> = line.chars().collect();
        let mut result = String::with_capacity(line.len() * 2);
        let mut cursor = 0;

        for scanned in Scanner::scan_all(line) {
            let start = scanned.span.start.max(cursor);
            let end = scanned.span.end.min(chars.len());
            if start >= end {
                continue;
            }
            let text: String = chars[start..end].iter().collect();
            match self.color_of(&scanned.lexeme) {
                Some(color) => {
                    result.push_str(color);
                    result.push_str(&text);
                    result.push_str(RESET);
                }
                None => result.push_str(&text),
            }
            cursor = end;
        }
        result.extend(chars.iter().skip(cursor));

        Cow::Owned(result)
    }

    fn color_of(&self, lexeme: &Lexeme) -> Option<&'static str> {
        match lexeme {
            Lexeme::Comment(_) | Lexeme::UnterminatedComment(_) => Some("\x1b[2;3m"), // dim italic
            Lexeme::Str(_) | Lexeme::UnterminatedString => Some("\x1b[33m"), // yellow
            Lexeme::Integer(_) | Lexeme::Decimal(_) | Lexeme::SeqCode(_) => Some("\x1b[35m"), // magenta
            Lexeme::Set(_) | Lexeme::BondSet(_) | Lexeme::Matrix(_) | Lexeme::ObjectId(_) => {
                Some("\x1b[34m") // blue
            }
            Lexeme::Word(word) => self.word_color(word),
            _ => None,
        }
    }

    fn word_color(&self, word: &str) -> Option<&'static str> {
        if matches!(word, "(" | ")" | "[" | "]" | "{" | "}") {
            return Some("\x1b[1m");
        }
        let token = self.registry.lookup(word, false)?;
        if token.has(attr::FLOW_COMMAND) {
            Some("\x1b[1;32m")
        } else if token.has(attr::SCRIPT_COMMAND) {
            Some("\x1b[32m")
        } else if token.has(attr::PREDEFINED_SET) {
            Some("\x1b[36m")
        } else {
            None
        }
    }
}

impl Default for ScriptHighlighter {
    fn default() -> Self {
        Self::new()
    }
}
