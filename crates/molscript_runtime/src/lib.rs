//! Command listings, console, and CLI for molscript.
//!
//! This crate provides:
//! - [`listing`] - Human-readable listings of compiled programs
//! - [`Repl`] - Interactive console that compiles what you type
//! - [`Session`] - Compiler state shared across inputs and files
//! - The `molscript` binary for checking and listing script files

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod highlight;
pub mod listing;
pub mod repl;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use listing::{ListingConfig, render_listing};
pub use repl::Repl;
pub use session::Session;
