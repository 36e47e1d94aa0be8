//! Entry-point assembler.

use crate::compiler::TypeGuardCompiler;
use crate::diagnostics::CompileError;
use crate::inline;
use crate::ir::CompiledFunction;
use crate::options::CompileOptions;
use rustc_hash::FxHashMap;
use tracing::{debug, info_span};
use tyguard_types::{TypeId, TypeInterner};

/// A sealed, self-contained validator: a root predicate plus every function
/// it (transitively) calls.
#[derive(Debug, Clone)]
pub struct Validator {
    root: String,
    functions: Vec<CompiledFunction>,
    options: CompileOptions,
    index: FxHashMap<String, usize>,
}

impl Validator {
    pub fn new(root: String, functions: Vec<CompiledFunction>, options: CompileOptions) -> Self {
        let index = functions
            .iter()
            .enumerate()
            .map(|(position, function)| (function.name.clone(), position))
            .collect();
        Self {
            root,
            functions,
            options,
            index,
        }
    }

    /// Name of the entry-point predicate.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn root_function(&self) -> Option<&CompiledFunction> {
        self.function(&self.root)
    }

    /// Functions in first-registration order.
    pub fn functions(&self) -> &[CompiledFunction] {
        &self.functions
    }

    pub fn function(&self, name: &str) -> Option<&CompiledFunction> {
        self.index
            .get(name)
            .and_then(|&position| self.functions.get(position))
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Compile `root` into a [`Validator`].
///
/// With `value_may_be_absent` the root is wrapped in the optional wrapper;
/// with `short_circuit` it is the always-true predicate. Any compile error
/// aborts the whole compilation.
pub fn compile_validator(
    types: &TypeInterner,
    root: TypeId,
    options: CompileOptions,
) -> Result<Validator, CompileError> {
    let span = info_span!("compile_validator", root = root.0);
    let _guard = span.enter();

    let mut compiler = TypeGuardCompiler::new(types, options);
    let root_name = if options.short_circuit {
        compiler.compile(TypeId::ANY)?
    } else {
        let name = compiler.compile(root)?;
        if options.value_may_be_absent {
            compiler.optional(name)?
        } else {
            name
        }
    };

    let registry = compiler.into_registry();
    let compiled = registry.len();
    let functions = registry.into_functions();
    let functions = if options.inline_trivial_predicates {
        inline::inline_trivial(functions, &root_name)
    } else {
        functions
    };

    debug!(root = %root_name, compiled, emitted = functions.len(), "assembled validator");
    Ok(Validator::new(
        root_name,
        functions.into_values().collect(),
        options,
    ))
}

#[cfg(test)]
#[path = "../tests/assemble_tests.rs"]
mod tests;
