//! Integration tests for Layer 1: Language
//!
//! Tests for the scanner, the command assembler, and host hooks.

mod compiler;
mod host;
mod scanner;
