//! Runtime for compiled tyguard validators.
//!
//! - `value`: the JavaScript-like value model
//! - `evaluate`: the predicate IR interpreter, generic over a tracer
//! - `tracer`: fast and diagnostic failure tracing
//! - `guard`: `is` / `assert`
//! - `params`: argument guards for function boundaries

pub mod error;
pub mod evaluate;
pub mod guard;
pub mod params;
pub mod tracer;
pub mod value;

pub use error::{PathSegment, ValidationError, format_path};
pub use evaluate::{Halt, evaluate};
pub use guard::{assert, is};
pub use params::{ParameterError, ParameterGuards};
pub use tracer::{DiagnosticTracer, FastTracer, ValidationTracer};
pub use value::{TypedView, Value};
