//! Centralized limits and thresholds for the validator compiler and runtime.
//!
//! # Categories
//!
//! - **Compile-time depths**: bounds on generic instantiation nesting while a
//!   validator is being built
//! - **Run-time depths**: bounds on predicate call nesting while a compiled
//!   validator is evaluated against a value

// =============================================================================
// Compile-time limits
// =============================================================================

/// Maximum depth of nested generic instantiations during compilation.
///
/// Every `TypeReference` whose target declares type parameters pushes one
/// substitution frame. Self-referential generics that keep growing their own
/// arguments never revisit a registry name, so they are cut off here and
/// reported as `CompileError::InstantiationTooDeep`.
///
/// # TypeScript example
///
/// ```typescript
/// // Each level asks for a brand new instantiation:
/// type Nest<T> = { value: T; next: Nest<T[]> };
/// type Boom = Nest<string>;
/// ```
pub const MAX_INSTANTIATION_DEPTH: u32 = 50;

/// Maximum number of hops followed when resolving one type parameter or
/// walking one `extends` chain.
///
/// A parameter can resolve to another parameter of an enclosing
/// instantiation, and bases can inherit bindings from their own bases.
/// Malformed descriptor graphs (`A extends B`, `B extends A`) would loop
/// forever, so resolution stops here and reports
/// `CompileError::InstantiationTooDeep`.
pub const MAX_RESOLUTION_STEPS: u32 = 64;

// =============================================================================
// Run-time limits
// =============================================================================

/// Maximum nesting of predicate calls while evaluating one value.
///
/// A self-referential type such as `type T = { child?: T }` produces a
/// predicate that calls itself once per level of input nesting. Input is
/// untrusted, so the evaluator stops at this depth and fails validation
/// instead of exhausting the thread stack. Each level costs a handful of
/// interpreter frames, so callers validating deep input on small thread
/// stacks should budget for that.
pub const MAX_VALIDATION_DEPTH: u32 = 512;
