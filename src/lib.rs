//! molscript - Compiler for molecular-viewer command scripts
//!
//! This crate re-exports all layers of the molscript system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: molscript_runtime    - Listings, console, CLI
//! Layer 1: molscript_language   - Token registry, scanner, command assembler
//! Layer 0: molscript_foundation - Script values, selection sets, errors
//! ```

pub use molscript_foundation as foundation;
pub use molscript_language as language;
pub use molscript_runtime as runtime;
