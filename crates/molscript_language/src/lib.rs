//! Token registry, scanner, and command assembler for molscript.
//!
//! This crate provides:
//! - [`TokenRegistry`] - The keyword, operator, and alias table
//! - [`Scanner`] - Context-free recognizers over script characters
//! - [`Compiler`] - Assembly of scanned tokens into a flat command list
//! - [`CompiledProgram`] - Commands, functions, and diagnostics from one run
//!
//! # Example
//!
//! ```
//! use molscript_language::{CompileFlags, compile};
//!
//! let program = compile("if (total > 1) {\n  print total\n}", CompileFlags::quiet());
//! assert!(program.is_ok());
//! assert_eq!(program.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compiler;
pub mod config;
pub mod flow;
mod fuzz_tests;
pub mod host;
pub mod lexer;
mod names;
pub mod program;
pub mod registry;
pub mod span;
pub mod token;

pub use compiler::{Compiler, compile};
pub use config::CompileFlags;
pub use host::{DefaultHost, ScriptHost};
pub use lexer::{Lexeme, Scanned, Scanner};
pub use program::{Command, CompiledProgram, FunctionDefinition, FunctionKind};
pub use registry::TokenRegistry;
pub use span::Span;
pub use token::{Tok, Token};
