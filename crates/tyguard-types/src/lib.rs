//! Structural type descriptors for the tyguard validator compiler.
//!
//! This crate is the descriptor model the compiler consumes. It is
//! independent of any particular type checker: a front end (or a JSON
//! [`document`]) builds descriptors into a [`TypeInterner`], and the compiler
//! walks them through the [`TypeVisitor`] dispatch.
//!
//! - **`TypeData`**: closed tagged variant, one case per static type shape
//! - **Interning**: structurally identical descriptors share one `TypeId`
//! - **Definitions**: named, possibly generic, possibly self-referential types
//!   addressed by `DefId`

pub mod def;
pub mod document;
mod intern;
pub mod types;
pub mod visitor;

pub use def::{DefId, Definition, DefinitionStore};
pub use document::{DocumentError, TypeDocument, TypeExpr, lower_json};
pub use intern::TypeInterner;
pub use types::{
    IntrinsicKind, LiteralValue, ObjectShape, OrderedFloat, PropertyInfo, TupleElement,
    TupleShape, TypeData, TypeId, TypeParamId, TypeParamInfo, ViewKind, format_number,
};
pub use visitor::{DispatchKind, TypeVisitor, dispatch_kind};
