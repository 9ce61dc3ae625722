//! Core value types and errors for the molscript compiler.
//!
//! This crate provides:
//! - [`ScriptValue`] - The tagged script value used for literals and variables
//! - [`ValueHeap`] - Arena storage for list and map values
//! - [`SelectionSet`] - Integer-indexed membership sets for atoms and bonds
//! - [`Point3`], [`Point4`], [`Matrix3`], [`Matrix4`] - Geometric payloads
//! - [`escape`] - The canonical literal text format
//! - [`Error`] - Compile errors with untranslated message keys and context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bitset;
pub mod error;
pub mod escape;
pub mod geometry;
pub mod heap;
pub mod host;
mod render;
mod select;
pub mod value;

pub use bitset::SelectionSet;
pub use error::{Error, ErrorContext, ErrorKind, MessageKey, Result};
pub use geometry::{Matrix3, Matrix4, Point3, Point4};
pub use heap::{Container, ContainerId, ValueHeap};
pub use host::HostValue;
pub use value::{ScriptValue, SetFlavor, ValueData, ValueKind};
