//! Integration tests for Error types
//!
//! Tests message templates, error kinds, and location context.

use molscript_foundation::{Error, ErrorContext, ErrorKind, MessageKey};

// =============================================================================
// Message Templates
// =============================================================================

#[test]
fn flow_control_message() {
    let err = Error::flow_control(MessageKey::MissingEnd, "if");
    assert!(matches!(err.kind, ErrorKind::FlowControl { .. }));
    assert_eq!(err.untranslated(), "missing END for if");
    assert_eq!(err.key(), Some(MessageKey::MissingEnd));
}

#[test]
fn syntax_messages() {
    let err = Error::syntax(MessageKey::TokenUnexpected, ")");
    assert_eq!(err.untranslated(), "unexpected token: )");

    let err = Error::syntax(MessageKey::TokenExpected, "(");
    assert_eq!(err.untranslated(), "( expected");

    let err = Error::syntax(MessageKey::CommandExpected, "");
    assert_eq!(err.untranslated(), "command expected");
}

#[test]
fn lexical_message() {
    let err = Error::lexical(MessageKey::UnterminatedString, "");
    assert!(matches!(err.kind, ErrorKind::Lexical { .. }));
    assert_eq!(err.untranslated(), "unterminated string");
}

#[test]
fn internal_error_has_no_key() {
    let err = Error::internal("oops");
    assert_eq!(err.key(), None);
    assert!(format!("{err}").contains("oops"));
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn context_display() {
    let context = ErrorContext::new()
        .with_source("view.spt")
        .with_position(3, 1)
        .with_excerpt("print >>>> ) <<<<");
    assert_eq!(
        context.to_string(),
        " file view.spt line 3 command 2:\nprint >>>> ) <<<<"
    );
}

#[test]
fn context_does_not_change_message() {
    let err = Error::syntax(MessageKey::BadArgumentCount, "")
        .with_context(ErrorContext::new().with_span(0, 7));
    assert_eq!(err.untranslated(), "bad argument count");
    assert_eq!(err.context.and_then(|c| c.span), Some((0, 7)));
}
