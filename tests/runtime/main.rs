//! Integration tests for Layer 2: Runtime
//!
//! Tests for sessions, file compilation, and listings.

use std::fs;
use std::path::PathBuf;

use molscript_language::{CompileFlags, compile};
use molscript_runtime::listing::{ListingConfig, render_listing_with_config};
use molscript_runtime::session::needs_more_input;
use molscript_runtime::{Session, render_listing};

/// Writes `contents` to a fresh file under the system temp directory.
fn script_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("molscript-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write script");
    path
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn compile_file_lists_functions() {
    let path = script_file(
        "square.spt",
        "function square(side) {\n  return side * side\n}\nprint square(3)\n",
    );
    let mut session = Session::with_flags(CompileFlags::quiet());
    let program = session.compile_file(&path).expect("readable");
    assert!(program.is_ok(), "{:?}", program.error_message);
    let listing = render_listing(program);
    assert!(
        listing.contains("function square(side) commands 1..2"),
        "{listing}"
    );
}

#[test]
fn file_errors_name_the_file() {
    let path = script_file("broken.spt", "print 1\nprint )\n");
    let mut session = Session::with_flags(CompileFlags::quiet());
    let program = session.compile_file(&path).expect("readable");
    let message = program.error_message.clone().expect("error");
    assert!(message.contains(&path.display().to_string()), "{message}");
    assert!(message.contains("line 2"), "{message}");
}

#[test]
fn console_input_has_no_file_name() {
    let path = script_file("named.spt", "print 1\n");
    let mut session = Session::with_flags(CompileFlags::quiet());
    session.compile_file(&path).expect("readable");
    let program = session.compile("print )");
    let message = program.error_message.clone().expect("error");
    assert!(!message.contains(" file "), "{message}");
    assert_eq!(session.compiled_count(), 2);
}

#[test]
fn open_switch_needs_more_input() {
    assert!(needs_more_input("switch (total) {\n  case 1:\n    print 1"));
    assert!(!needs_more_input("switch (total) {\n  case 1:\n    print 1\n}"));
}

// =============================================================================
// Listings
// =============================================================================

#[test]
fn listing_without_jumps() {
    let program = compile("while (total < 3) {\n  total++\n}", CompileFlags::quiet());
    let config = ListingConfig {
        show_jumps: false,
        ..ListingConfig::default()
    };
    let listing = render_listing_with_config(&program, &config);
    assert!(!listing.contains("->"), "{listing}");
    assert!(!listing.contains("<-"), "{listing}");
    assert!(listing.lines().next().is_some_and(|row| row.contains("while")));
}

#[test]
fn incomplete_program_is_marked() {
    let program = compile(
        "if (total > 1) {\n  print 1\n\u{1}##noendcheck",
        CompileFlags::quiet(),
    );
    let listing = render_listing(&program);
    assert!(listing.ends_with("(incomplete)\n"), "{listing}");
}
