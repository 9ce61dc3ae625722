//! The token registry: surface names to token descriptors.
//!
//! Keys are stored lowercased. A case-sensitive lookup therefore only
//! matches names already spelled in lowercase, which is how single
//! characters and names after `:` keep their case as identifiers.

use std::collections::HashMap;

use crate::names::{NAMES, SPECIAL};
use crate::token::{Tok, Token, attr};

/// Name table shared by the scanner and the assembler.
///
/// Runtime registrations (`define` of a keyword, user functions) go into the
/// same table so later lookups see them.
#[derive(Clone, Debug)]
pub struct TokenRegistry {
    by_name: HashMap<String, Token>,
    canonical: HashMap<Tok, String>,
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRegistry {
    /// Builds the registry from the static name table.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            by_name: HashMap::with_capacity(NAMES.len() + SPECIAL.len()),
            canonical: HashMap::with_capacity(NAMES.len()),
        };

        let mut previous: Option<Token> = None;
        for &(name, tok) in NAMES {
            let token = match tok {
                Some(tok) => Token::named(tok, name),
                None => match &previous {
                    Some(token) => token.clone(),
                    None => continue,
                },
            };
            registry.insert_static(name, token.clone());
            previous = Some(token);
        }

        for &(name, tok, aux, canonical) in SPECIAL {
            registry.insert_static(name, Token::with_aux(tok, aux, canonical));
        }

        registry
    }

    fn insert_static(&mut self, name: &str, token: Token) {
        let key = name.to_lowercase();
        if self.by_name.contains_key(&key) {
            tracing::error!(name, "duplicate token name");
            return;
        }
        self.canonical
            .entry(token.tok)
            .or_insert_with(|| token.text().to_string());
        self.by_name.insert(key, token);
    }

    /// Exact lookup by an already-normalized key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Token> {
        self.by_name.get(key)
    }

    /// Looks up a surface name.
    ///
    /// With `case_sensitive`, the name must match a stored key as written;
    /// otherwise it is lowercased first.
    #[must_use]
    pub fn lookup(&self, name: &str, case_sensitive: bool) -> Option<&Token> {
        if case_sensitive {
            self.by_name.get(name)
        } else {
            self.by_name.get(&name.to_lowercase())
        }
    }

    /// True if `name` (case-folded) is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Registers or replaces a name.
    pub fn register(&mut self, name: &str, token: Token) {
        self.canonical
            .entry(token.tok)
            .or_insert_with(|| name.to_string());
        self.by_name.insert(name.to_lowercase(), token);
    }

    /// The canonical spelling of a code, or its hex form if unnamed.
    #[must_use]
    pub fn name_of(&self, tok: Tok) -> String {
        self.canonical
            .get(&tok)
            .cloned()
            .unwrap_or_else(|| tok.to_string())
    }

    /// Sorted canonical names of every code carrying all of `mask`.
    ///
    /// Asking for `set` parameters leaves out the deprecated ones that are
    /// also commands.
    #[must_use]
    pub fn names_with_attribute(&self, mask: i32) -> Vec<String> {
        let mut names: Vec<String> = self
            .canonical
            .iter()
            .filter(|(tok, _)| tok.has(mask))
            .filter(|(tok, _)| mask != attr::SETPARAM || !tok.has(attr::DEPRECATEDPARAM))
            .map(|(_, name)| name.clone())
            .collect();
        names.sort_unstable();
        names
    }

    /// Sorted canonical names of every command.
    #[must_use]
    pub fn command_names(&self) -> Vec<String> {
        self.names_with_attribute(attr::SCRIPT_COMMAND)
    }

    /// Sorted registered names (any spelling) starting with `prefix`,
    /// compared case-insensitively.
    #[must_use]
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        let mut names: Vec<String> = self
            .by_name
            .keys()
            .filter(|key| key.starts_with(&prefix) && key.chars().any(char::is_alphabetic))
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_share_descriptor() {
        let registry = TokenRegistry::new();
        let cpk = registry.lookup("cpk", false).unwrap();
        let spacefill = registry.lookup("spacefill", false).unwrap();
        assert_eq!(cpk, spacefill);
        assert_eq!(cpk.text(), "spacefill");
        assert_eq!(registry.lookup("==", false).unwrap().tok, Tok::OP_EQ);
        assert_eq!(registry.lookup("&&", false).unwrap().tok, Tok::OP_AND);
    }

    #[test]
    fn lookup_case_rules() {
        let registry = TokenRegistry::new();
        assert_eq!(registry.lookup("PRINT", false).unwrap().tok, Tok::PRINT);
        assert!(registry.lookup("PRINT", true).is_none());
        assert!(registry.lookup("X", true).is_none());
        assert_eq!(registry.lookup("x", true).unwrap().tok, Tok::X);
        assert_eq!(registry.lookup("centerAt", false).unwrap().tok, Tok::CENTER_AT);
    }

    #[test]
    fn on_and_off_carry_flag() {
        let registry = TokenRegistry::new();
        let on = registry.lookup("true", false).unwrap();
        assert_eq!((on.tok, on.aux, on.text()), (Tok::ON, 1, "on"));
        let off = registry.lookup("false", false).unwrap();
        assert_eq!((off.tok, off.aux), (Tok::OFF, 0));
    }

    #[test]
    fn name_of_reverses_lookup() {
        let registry = TokenRegistry::new();
        assert_eq!(registry.name_of(Tok::IF), "if");
        assert_eq!(registry.name_of(Tok::ENDIF), "endif");
        assert_eq!(registry.name_of(Tok::SPACEFILL), "spacefill");
        assert_eq!(registry.name_of(Tok(0x7)), "0x7");
    }

    #[test]
    fn runtime_registration_is_visible() {
        let mut registry = TokenRegistry::new();
        registry.register("Protein", Token::identifier("protein"));
        assert_eq!(registry.lookup("protein", false).unwrap().tok, Tok::IDENTIFIER);
    }

    #[test]
    fn attribute_listing() {
        let registry = TokenRegistry::new();
        let flow = registry.names_with_attribute(attr::FLOW_COMMAND);
        assert!(flow.contains(&"while".to_string()));
        assert!(!flow.contains(&"print".to_string()));
        let params = registry.names_with_attribute(attr::SETPARAM);
        assert!(params.contains(&"debug".to_string()));
        assert!(!params.contains(&"background".to_string()));
        assert!(registry.command_names().contains(&"zoom".to_string()));
    }

    #[test]
    fn completions_by_prefix() {
        let registry = TokenRegistry::new();
        let names = registry.completions("Sele");
        assert!(names.contains(&"select".to_string()));
        assert!(names.contains(&"selected".to_string()));
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
    }
}
