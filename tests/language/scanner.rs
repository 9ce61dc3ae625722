//! Integration tests for the scanner
//!
//! Tests lexeme recognition and span bookkeeping over whole scripts.

use molscript_language::{Lexeme, Scanner};

fn words(source: &str) -> Vec<Lexeme> {
    Scanner::scan_all(source)
        .into_iter()
        .map(|s| s.lexeme)
        .filter(|l| !matches!(l, Lexeme::Whitespace | Lexeme::EndOfLine))
        .collect()
}

// =============================================================================
// Spans
// =============================================================================

#[test]
fn spans_cover_the_whole_script() {
    let source = "select protein;\ncolor red # paint it\nspacefill 1.5";
    let scanned = Scanner::scan_all(source);
    let mut expected_start = 0;
    for s in &scanned {
        assert_eq!(s.span.start, expected_start, "gap before {:?}", s.lexeme);
        expected_start = s.span.end;
    }
    assert_eq!(expected_start, source.chars().count());
}

#[test]
fn spans_track_lines() {
    let scanned = Scanner::scan_all("print 1\nprint 2\r\nprint 3");
    let last = scanned.last().expect("lexemes");
    assert_eq!(last.lexeme, Lexeme::Integer(3));
    assert_eq!(last.span.line, 3);
}

// =============================================================================
// Lexemes
// =============================================================================

#[test]
fn mixed_literals() {
    let lexemes = words("x = [1, 2.5, \"three\"]");
    assert_eq!(
        lexemes,
        vec![
            Lexeme::Word("x".into()),
            Lexeme::Word("=".into()),
            Lexeme::Word("[".into()),
            Lexeme::Integer(1),
            Lexeme::Word(",".into()),
            Lexeme::Decimal(2.5),
            Lexeme::Word(",".into()),
            Lexeme::Str("three".into()),
            Lexeme::Word("]".into()),
        ]
    );
}

#[test]
fn terminators_and_comments() {
    let lexemes = words("a;b # trailing");
    assert_eq!(
        lexemes,
        vec![
            Lexeme::Word("a".into()),
            Lexeme::Terminator,
            Lexeme::Word("b".into()),
            Lexeme::Comment("# trailing".into()),
        ]
    );
}

#[test]
fn unterminated_string_is_reported_as_lexeme() {
    let lexemes = words("echo \"never closed");
    assert_eq!(lexemes.last(), Some(&Lexeme::UnterminatedString));
}
