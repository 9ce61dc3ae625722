//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: ScriptValue, SelectionSet, Error, and the escaped
//! literal format.

mod errors;
mod escape;
mod values;
