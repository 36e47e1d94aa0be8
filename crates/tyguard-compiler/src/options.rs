//! Compiler options.

use serde::{Deserialize, Serialize};

/// Switches that change what a compiled validator accepts or how it is built.
///
/// Deserializes from the `compilerOptions` object of a `tyguard.json` file
/// (camelCase keys); every key is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Reject objects carrying keys outside the statically known set.
    pub superfluous_property_check: bool,
    /// Skip method members instead of failing compilation on them.
    pub ignore_methods: bool,
    /// Accept `undefined` at the root (optional call parameters).
    pub value_may_be_absent: bool,
    /// Substitute calls to single-expression predicates in place.
    pub inline_trivial_predicates: bool,
    /// Compile every root to the always-true predicate.
    pub short_circuit: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            superfluous_property_check: false,
            ignore_methods: false,
            value_may_be_absent: false,
            inline_trivial_predicates: true,
            short_circuit: false,
        }
    }
}

impl CompileOptions {
    pub fn with_superfluous_property_check(mut self, enabled: bool) -> Self {
        self.superfluous_property_check = enabled;
        self
    }

    pub fn with_ignore_methods(mut self, enabled: bool) -> Self {
        self.ignore_methods = enabled;
        self
    }

    pub fn with_value_may_be_absent(mut self, enabled: bool) -> Self {
        self.value_may_be_absent = enabled;
        self
    }

    pub fn with_inline_trivial_predicates(mut self, enabled: bool) -> Self {
        self.inline_trivial_predicates = enabled;
        self
    }

    pub fn with_short_circuit(mut self, enabled: bool) -> Self {
        self.short_circuit = enabled;
        self
    }
}
