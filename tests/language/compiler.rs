//! Integration tests for the command assembler
//!
//! Tests whole scripts through the public compile API.

use molscript_language::{
    CompileFlags, CompiledProgram, Compiler, FunctionKind, Tok, Token, compile,
};

fn quiet(script: &str) -> CompiledProgram {
    compile(script, CompileFlags::quiet())
}

fn heads(program: &CompiledProgram) -> Vec<Tok> {
    program.commands.iter().map(|c| c.tok()).collect()
}

// =============================================================================
// Programs
// =============================================================================

#[test]
fn nested_blocks_balance() {
    let script = "\
while (total < 10) {
  if (total > 5) {
    break
  }
  total++
}";
    let program = quiet(script);
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert!(program.is_complete);
    let ends = heads(&program).iter().filter(|&&t| t == Tok::END).count();
    assert_eq!(ends, 2);
    assert_eq!(program.commands[0].tok(), Tok::WHILE);
}

#[test]
fn every_command_has_a_span_inside_the_script() {
    let script = "select protein\ncolor red\nspacefill 1.5\nlabel off";
    let program = quiet(script);
    assert!(program.is_ok(), "{:?}", program.error_message);
    let len = program.script.chars().count();
    for (start, end) in program.spans() {
        assert!(start <= end && end <= len, "bad span {start}..{end}");
    }
    assert_eq!(program.line_numbers(), [1, 2, 3, 4]);
}

#[test]
fn top_level_var_is_declared() {
    let program = quiet("var total = 3\nprint total");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert!(program.declared_variables.contains_key("total"));
}

#[test]
fn parallel_function_kind() {
    let program = quiet("parallel worker(a) {\n  print a\n}");
    assert!(program.is_ok(), "{:?}", program.error_message);
    let worker = program.function("worker").expect("function recorded");
    assert_eq!(worker.kind, FunctionKind::Parallel);
    assert_eq!(worker.parameters, ["a"]);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn script_name_appears_in_error_location() {
    let mut compiler = Compiler::new().with_script_name("view.spt");
    let program = compiler.compile("print 1\nprint )", CompileFlags::quiet());
    let message = program.error_message.expect("error");
    assert!(
        message.contains(" file view.spt line 2 command 2"),
        "{message}"
    );
}

#[test]
fn stray_end_is_an_error() {
    let program = quiet("print 1\nend if");
    assert!(!program.is_ok());
    assert_eq!(program.error_command_index, Some(1));
}

#[test]
fn unterminated_comment_names_its_line() {
    let mut compiler = Compiler::new().with_script_name("view.spt");
    let program = compiler.compile("print 1\n/* never closed\nprint 2", CompileFlags::quiet());
    assert_eq!(
        program.error_message_untranslated().as_deref(),
        Some("unterminated comment")
    );
    let message = program.error_message.as_ref().expect("error");
    assert!(message.contains(" file view.spt line 2 command 2"), "{message}");
    assert_eq!(program.len(), 1);
}

#[test]
fn for_header_with_one_semicolon_is_rejected() {
    let program = quiet("for (i = 0; i < 3) {\n  print i\n}");
    assert!(!program.is_ok());
    assert!(program.is_empty());
    assert_eq!(program.error_command_index, Some(0));
}

#[test]
fn first_error_stops_compilation() {
    let program = quiet("print 1\ncontinue\nprint )");
    assert_eq!(
        program.error_message_untranslated().as_deref(),
        Some("invalid context for continue")
    );
    assert_eq!(program.len(), 1);
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn registry_is_case_insensitive() {
    let compiler = Compiler::new();
    let token = compiler.registry().lookup("PRINT", false).map(|t| t.tok);
    assert_eq!(token, Some(Tok::PRINT));
    assert!(compiler.registry().lookup("PRINT", true).is_none());
}

#[test]
fn registered_alias_compiles_as_its_command() {
    let mut compiler = Compiler::new();
    compiler
        .registry_mut()
        .register("shout", Token::named(Tok::PRINT, "shout"));
    let program = compiler.compile("shout 1", CompileFlags::quiet());
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(heads(&program), [Tok::PRINT]);
}

#[test]
fn define_persists_across_compiles() {
    let mut compiler = Compiler::new();
    let first = compiler.compile("define cartoon protein", CompileFlags::quiet());
    assert!(first.is_ok(), "{:?}", first.error_message);
    let second = compiler.compile("select cartoon", CompileFlags::quiet());
    assert!(second.is_ok(), "{:?}", second.error_message);
    let token = compiler.registry().lookup("cartoon", false).map(|t| t.tok);
    assert_eq!(token, Some(Tok::IDENTIFIER));
}
