//! Integration tests for host hooks
//!
//! Tests embedded-script extraction through the compiler.

use molscript_language::{CompileFlags, Compiler, ScriptHost, Tok, compile};

/// A host that serves a fixed script whatever the input.
struct FixedHost(&'static str);

impl ScriptHost for FixedHost {
    fn extract_embedded_script(&self, _text: &str) -> String {
        self.0.to_string()
    }
}

#[test]
fn default_host_unwraps_embedded_script() {
    let document = "PDB header\n/* **** Jmol Embedded Script **** print 1 */\nATOM ...";
    let program = compile(document, CompileFlags::quiet());
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(program.len(), 1);
    assert_eq!(program.commands[0].tok(), Tok::PRINT);
}

#[test]
fn custom_host_supplies_the_script() {
    let mut compiler = Compiler::new().with_host(FixedHost("print 2\nprint 3"));
    let program = compiler.compile("ignored", CompileFlags::quiet());
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(program.len(), 2);
    assert_eq!(program.script, "print 2\nprint 3");
}
