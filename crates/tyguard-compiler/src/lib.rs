//! Type-to-validator compiler.
//!
//! Compiles a structural type descriptor (see `tyguard-types`) into a
//! [`Validator`]: a minimal set of named, deduplicated, possibly mutually
//! recursive predicate functions plus the name of the root predicate.
//!
//! ```text
//! TypeInterner + root TypeId + CompileOptions
//!         │
//!         ▼
//! TypeGuardCompiler ── TypeVisitor dispatch ──► per-kind strategies
//!         │                  │
//!         │                  ├─ FunctionRegistry (reserve, then fill)
//!         │                  └─ TypeParameterStack (generic substitution)
//!         ▼
//! inliner (trivial bodies, fixed point, prune) ──► Validator
//! ```

mod arrays;
pub mod assemble;
pub mod compiler;
pub mod diagnostics;
pub mod inline;
pub mod ir;
mod keys;
mod literals;
pub mod naming;
mod objects;
pub mod options;
pub mod registry;
pub mod type_params;
mod unions;

pub use assemble::{Validator, compile_validator};
pub use compiler::TypeGuardCompiler;
pub use diagnostics::CompileError;
pub use ir::{CompareOp, CompiledFunction, Expr, PARAM, Reason, Stmt};
pub use options::CompileOptions;
pub use registry::FunctionRegistry;
