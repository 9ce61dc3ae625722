use super::*;
use crate::program::FunctionKind;
use crate::token::Tok;
use molscript_foundation::ErrorKind;

fn quiet(script: &str) -> CompiledProgram {
    compile(script, CompileFlags::quiet())
}

fn toks(program: &CompiledProgram, index: usize) -> Vec<Tok> {
    program.commands[index].tokens.iter().map(|t| t.tok).collect()
}

fn heads(program: &CompiledProgram) -> Vec<Tok> {
    program.commands.iter().map(Command::tok).collect()
}

// =========================================================================
// Simple commands
// =========================================================================

#[test]
fn empty_script_is_complete() {
    let program = quiet("");
    assert!(program.is_ok());
    assert!(program.is_empty());
    assert!(program.is_complete);
}

#[test]
fn single_command_with_integer() {
    let program = quiet("print 1");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(program.len(), 1);
    assert_eq!(toks(&program, 0), [Tok::PRINT, Tok::INTEGER]);
    assert_eq!(program.commands[0].tokens[1].aux, 1);
    assert_eq!(program.spans(), [(0, 7)]);
    assert_eq!(program.line_numbers(), [1]);
    assert!(program.is_complete);
}

#[test]
fn commands_track_lines() {
    let program = quiet("print 1\n\nprint 2;print 3");
    assert_eq!(heads(&program), [Tok::PRINT, Tok::PRINT, Tok::PRINT]);
    assert_eq!(program.line_numbers(), [1, 3, 3]);
    assert_eq!(program.command_text(1).as_deref(), Some("print 2"));
}

#[test]
fn curly_quotes_become_plain_quotes() {
    let program = quiet("echo \u{201C}hi\u{201D}");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(program.script, "echo \"hi\"");
    assert_eq!(toks(&program, 0), [Tok::ECHO, Tok::STRING]);
    assert_eq!(program.commands[0].tokens[1].text(), "hi");
}

#[test]
fn label_keyword_is_not_a_string() {
    let program = quiet("label off");
    assert_eq!(toks(&program, 0), [Tok::LABEL, Tok::OFF]);
}

// =========================================================================
// Assignment
// =========================================================================

#[test]
fn implicit_assignment_becomes_set() {
    let program = quiet("total = 3");
    assert!(program.is_ok(), "{:?}", program.error_message);
    let tokens = &program.commands[0].tokens;
    assert_eq!(tokens[0].tok, Tok::SET);
    assert_eq!(tokens[0].aux, i32::from(b'='));
    assert_eq!(tokens[1].tok, Tok::IDENTIFIER);
    assert_eq!(tokens[1].text(), "total");
    assert_eq!(tokens[2].aux, 3);
    assert_eq!(tokens.len(), 3);
}

#[test]
fn compound_assignment_expands() {
    let program = quiet("total += 2");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(
        toks(&program, 0),
        [
            Tok::SET,
            Tok::IDENTIFIER,
            Tok::OP_EQ,
            Tok::IDENTIFIER,
            Tok::PLUS,
            Tok::LEFTPAREN,
            Tok::INTEGER,
            Tok::RIGHTPAREN,
        ]
    );
    assert_eq!(program.commands[0].tokens[3].text(), "total");
}

#[test]
fn postfix_increment_expands() {
    let program = quiet("total++");
    assert_eq!(
        toks(&program, 0),
        [Tok::SET, Tok::IDENTIFIER, Tok::OP_EQ, Tok::IDENTIFIER, Tok::PLUS, Tok::INTEGER]
    );
    assert_eq!(program.commands[0].tokens[5].aux, 1);
}

#[test]
fn prefix_increment_matches_postfix() {
    let prefix = quiet("++total");
    let postfix = quiet("total++");
    assert_eq!(toks(&prefix, 0), toks(&postfix, 0));
}

#[test]
fn push_call_is_assignment_not_script() {
    let program = quiet("mylist.push(3)");
    assert!(program.is_ok(), "{:?}", program.error_message);
    let tokens = &program.commands[0].tokens;
    assert_eq!(tokens[0].tok, Tok::SET);
    assert_eq!(tokens[0].aux, i32::from(b'='));
    assert_eq!(tokens[1].text(), "mylist");
    assert_eq!(tokens[2].text(), "mylist");
    assert_eq!(tokens[3].tok, Tok::PER);
    assert_eq!(tokens[4].tok, Tok::PUSH);
}

// =========================================================================
// Flow control
// =========================================================================

#[test]
fn if_block_is_patched() {
    let program = quiet("if (total > 1) {\n  print 1\n}");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(heads(&program), [Tok::IF, Tok::PRINT, Tok::END]);
    assert_eq!(program.commands[0].jump(), Some(2));
    assert_eq!(program.commands[2].jump(), Some(0));
    assert_eq!(program.commands[2].tok_at(1), Tok::IF);
    assert!(program.is_complete);
}

#[test]
fn if_else_chain() {
    let program = quiet("if (total > 1) {\n  print 1\n} else {\n  print 2\n}\n");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(
        heads(&program),
        [Tok::IF, Tok::PRINT, Tok::ELSE, Tok::PRINT, Tok::END]
    );
    assert_eq!(program.commands[0].jump(), Some(2));
    assert_eq!(program.commands[2].jump(), Some(4));
    assert_eq!(program.commands[4].jump(), Some(-2));
    assert_eq!(program.line_numbers()[..4], [1, 2, 3, 4]);
}

#[test]
fn single_line_if_closes_at_newline() {
    let program = quiet("if (total > 1) print 1\nprint 2");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(heads(&program), [Tok::IF, Tok::PRINT, Tok::END, Tok::PRINT]);
    assert_eq!(program.commands[0].jump(), Some(2));
    assert_eq!(program.commands[3].line(), 2);
}

#[test]
fn break_targets_loop_start() {
    let program = quiet("while (total < 3) {\n  break\n}\n");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(heads(&program), [Tok::WHILE, Tok::BREAK, Tok::END]);
    assert_eq!(program.commands[0].jump(), Some(2));
    assert_eq!(program.commands[1].jump(), Some(0));
    assert_eq!(program.commands[2].tok_at(1), Tok::WHILE);
}

#[test]
fn continue_outside_loop_is_bad_context() {
    let program = quiet("continue");
    assert!(!program.is_ok());
    assert!(matches!(program.error_kind(), Some(ErrorKind::FlowControl { .. })));
    assert_eq!(
        program.error_message_untranslated().as_deref(),
        Some("invalid context for continue")
    );
    assert_eq!(program.error_command_index, Some(0));
}

#[test]
fn switch_case_default() {
    let program = quiet("switch (total) {\ncase 1:\n  print 1\n  break\ndefault:\n  print 0\n}\n");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(
        heads(&program),
        [
            Tok::SWITCH,
            Tok::CASE,
            Tok::PRINT,
            Tok::BREAK,
            Tok::DEFAULT,
            Tok::PRINT,
            Tok::END,
        ]
    );
    assert_eq!(
        toks(&program, 1),
        [Tok::CASE, Tok::LEFTPAREN, Tok::INTEGER, Tok::RIGHTPAREN]
    );
    assert_eq!(program.commands[0].jump(), Some(1));
    assert_eq!(program.commands[1].jump(), Some(4));
    assert_eq!(program.commands[3].jump(), Some(1));
    assert_eq!(program.commands[4].jump(), Some(6));
    assert_eq!(program.commands[6].jump(), Some(4));
}

#[test]
fn function_definition_is_recorded() {
    let script = "function square(side) {\n  return side * side\n}\nprint square(3)";
    let program = quiet(script);
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(heads(&program), [Tok::FUNCTION, Tok::RETURN, Tok::END, Tok::PRINT]);
    assert_eq!(program.commands[0].jump(), Some(2));

    let square = program.function("square").expect("function recorded");
    assert_eq!(square.kind, FunctionKind::Function);
    assert_eq!(square.parameters, ["side"]);
    assert_eq!(square.body(), 1..2);
    assert_eq!(square.source(&program.script).trim(), "return side * side");
    assert_eq!(program.commands[3].tokens[1].tok, Tok::IDENTIFIER);
}

#[test]
fn function_headers_with_and_without_parameters() {
    let program = quiet("function noargs() {\n}\nfunction pair(a, b) {\n  print a\n}");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert!(program.function("noargs").expect("noargs").parameters.is_empty());
    assert_eq!(program.function("pair").expect("pair").parameters, ["a", "b"]);
}

#[test]
fn function_header_requires_open_paren() {
    let program = quiet("function square side {\n}");
    assert!(!program.is_ok());
    assert_eq!(
        program.error_message_untranslated().as_deref(),
        Some("( expected")
    );
}

#[test]
fn for_header_counts_semicolons() {
    let program = quiet("for (var i = 1; i < 3; i++) {\n  print i\n}");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(heads(&program), [Tok::FOR, Tok::PRINT, Tok::END]);

    let short = quiet("for (i = 0; i < 3) {\n}");
    assert!(!short.is_ok());
    assert!(matches!(short.error_kind(), Some(ErrorKind::FlowControl { .. })));
    assert_eq!(short.error.as_ref().and_then(Error::key), Some(MessageKey::BadArgumentCount));
    assert_eq!(short.error_command_index, Some(0));

}

#[test]
fn for_in_header_has_no_semicolons() {
    let program = quiet("for (var x in items) {\n  print x\n}");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(heads(&program), [Tok::FOR, Tok::PRINT, Tok::END]);
}

// =========================================================================
// Missing END
// =========================================================================

#[test]
fn missing_end_is_reported_and_closed() {
    let program = quiet("if (total > 1) {\n  print 1\n");
    assert!(!program.is_ok());
    assert_eq!(
        program.error_message_untranslated().as_deref(),
        Some("missing END for if")
    );
    assert_eq!(program.error_command_index, Some(1));
    assert!(!program.is_complete);
    assert_eq!(heads(&program), [Tok::IF, Tok::PRINT, Tok::END]);
}

#[test]
fn no_end_check_marker_allows_open_blocks() {
    let program = quiet("if (total > 1) {\n  print 1\n\u{1}##noendcheck");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert!(!program.is_complete);
    assert_eq!(program.trailing_extension.as_deref(), Some("##noendcheck"));
}

// =========================================================================
// Comments, data, implied scripts
// =========================================================================

#[test]
fn line_comment_becomes_command() {
    let program = quiet("# first\nprint 1 # trailing\n");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(program.len(), 2);
    assert_eq!(program.commands[0].comment(), Some("# first"));
    assert_eq!(toks(&program, 1), [Tok::PRINT, Tok::INTEGER]);
    assert_eq!(program.line_numbers(), [1, 2]);
}

#[test]
fn data_block_is_captured() {
    let program = quiet("data \"mydata\"\n1 2 3\nend \"mydata\"\nprint 1");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(program.len(), 2);
    let data = &program.commands[0].tokens;
    assert_eq!(data.len(), 5);
    assert_eq!(data[1].text(), "mydata");
    assert_eq!(data[2].tok, Tok::DATA);
    assert_eq!(data[2].text(), "1 2 3\n");
    assert_eq!(program.commands[1].line(), 4);
}

#[test]
fn bare_file_name_is_a_script_call() {
    let program = quiet("myfile.spt");
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(toks(&program, 0), [Tok::SCRIPT, Tok::STRING]);
    assert_eq!(program.commands[0].tokens[1].text(), "myfile.spt");
}

// =========================================================================
// define
// =========================================================================

#[test]
fn define_shadowing_keyword_warns_and_registers() {
    let mut compiler = Compiler::new();
    let program = compiler.compile("define cartoon protein", CompileFlags::quiet());
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(program.warnings.len(), 1);
    assert!(program.warnings[0].contains("cartoon"));
    assert_eq!(
        compiler.registry().lookup("cartoon", false).map(|t| t.tok),
        Some(Tok::IDENTIFIER)
    );
}

#[test]
fn check_only_define_leaves_registry_alone() {
    let mut compiler = Compiler::new();
    let flags = CompileFlags::quiet().with_check_only(true);
    let program = compiler.compile("define cartoon protein", flags);
    assert!(program.is_ok(), "{:?}", program.error_message);
    assert_eq!(
        compiler.registry().lookup("cartoon", false).map(|t| t.tok),
        Some(Tok::CARTOON)
    );
}

// =========================================================================
// Errors and preprocessing
// =========================================================================

#[test]
fn error_excerpt_marks_the_failure() {
    let program = quiet("3abc");
    assert!(!program.is_ok());
    assert_eq!(
        program.error_message_untranslated().as_deref(),
        Some("command expected")
    );
    let message = program.error_message.expect("message");
    assert!(message.starts_with(ERROR_PREFIX));
    assert!(message.contains(">>>> 3abc <<<<"), "{message}");
}

#[test]
fn unterminated_block_comment_is_lexical_error() {
    let program = quiet("print 1\n/* open");
    assert!(matches!(program.error_kind(), Some(ErrorKind::Lexical { .. })));
    assert_eq!(
        program.error_message_untranslated().as_deref(),
        Some("unterminated comment")
    );
    assert_eq!(program.len(), 1);

    let swallowed = quiet("/** a */ print 1");
    assert!(!swallowed.is_ok());
    assert!(swallowed.is_empty());
}

#[test]
fn unbalanced_paren_is_unexpected_token() {
    let program = quiet("print 1\nprint )");
    assert!(!program.is_ok());
    assert_eq!(
        program.error_message_untranslated().as_deref(),
        Some("unexpected token: )")
    );
    assert_eq!(program.error_command_index, Some(1));
    assert_eq!(program.len(), 1);
}

#[test]
fn state_version_is_detected() {
    let program = quiet("# Jmol state version 14.2.1;\nprint 1");
    assert_eq!(program.detected_state_version.as_deref(), Some("14.2.1"));
}

#[test]
fn extension_is_split_off() {
    let program = quiet("print 1\u{1}##extra");
    assert_eq!(program.trailing_extension.as_deref(), Some("##extra"));
    assert_eq!(program.script, "print 1");
    assert_eq!(program.len(), 1);
}
