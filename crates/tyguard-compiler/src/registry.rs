//! Function registry ("compile-once" memoization).
//!
//! Names are reserved *before* their body is built and filled in afterwards.
//! A body that (directly or through other functions) asks for its own name
//! again finds the reservation and gets the name back immediately, so cyclic
//! type graphs compile to mutually recursive functions instead of unbounded
//! descent.

use crate::ir::CompiledFunction;
use indexmap::IndexMap;
use tracing::trace;

/// Name → compiled body, in first-registration order.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    /// `None` while the body is still being built.
    functions: IndexMap<String, Option<CompiledFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `name`. Returns `false` when the name is already registered
    /// (complete or in progress), in which case the caller must not build it.
    pub fn begin(&mut self, name: &str) -> bool {
        if self.functions.contains_key(name) {
            trace!(name, "registry hit");
            return false;
        }
        trace!(name, "registry reserve");
        self.functions.insert(name.to_string(), None);
        true
    }

    /// Fill a reservation made by [`begin`](Self::begin).
    pub fn complete(&mut self, function: CompiledFunction) {
        debug_assert!(
            matches!(self.functions.get(&function.name), Some(None)),
            "completing `{}` without a reservation",
            function.name
        );
        self.functions.insert(function.name.clone(), Some(function));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// The finished function, if `name` is registered and complete.
    pub fn get(&self, name: &str) -> Option<&CompiledFunction> {
        self.functions.get(name).and_then(Option::as_ref)
    }

    /// Whether `name` is reserved but its body is still being built.
    pub fn is_pending(&self, name: &str) -> bool {
        matches!(self.functions.get(name), Some(None))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Take the finished functions in registration order.
    pub fn into_functions(self) -> IndexMap<String, CompiledFunction> {
        self.functions
            .into_iter()
            .filter_map(|(name, function)| function.map(|function| (name, function)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
