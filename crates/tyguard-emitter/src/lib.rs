//! JavaScript emitter for compiled validators.
//!
//! Turns a [`tyguard_compiler::Validator`] into JavaScript source that can be
//! shipped next to the code it guards. The runtime crate interprets the same
//! IR directly; this crate is for hosts that want the checks as source.

mod mangle;
pub mod printer;

pub use mangle::NameMangler;
pub use printer::{JsPrinter, emit_validator};
