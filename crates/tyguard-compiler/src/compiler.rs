//! Type guard compiler.
//!
//! `TypeGuardCompiler` walks a descriptor graph through the [`TypeVisitor`]
//! dispatch and registers one predicate function per distinct
//! (type, options) name. Every visit returns the *name* of the predicate
//! that checks the visited type; callers embed that name in a `Call`.
//!
//! The per-kind strategies live in sibling modules as further `impl` blocks:
//!
//! - `literals`: intrinsics, literals, `object`, the optional wrapper
//! - `arrays`: arrays, tuples, buffers, numeric views
//! - `objects`: object shapes and the superfluous-key loop
//! - `unions`: unions and intersections
//! - `keys`: `keyof`, indexed access and key-set collection
//!
//! No state is ambient: the registry, the options and the parameter stack
//! are owned by one compiler value for one compilation.

use crate::diagnostics::CompileError;
use crate::ir::{CompiledFunction, Expr, Reason, Stmt};
use crate::naming;
use crate::options::CompileOptions;
use crate::registry::FunctionRegistry;
use crate::type_params::{self, TypeParameterStack};
use tracing::debug;
use tyguard_common::limits::MAX_INSTANTIATION_DEPTH;
use tyguard_types::{
    DefId, Definition, IntrinsicKind, LiteralValue, ObjectShape, TupleShape, TypeData, TypeId,
    TypeInterner, TypeParamId, TypeVisitor, ViewKind,
};

pub struct TypeGuardCompiler<'a> {
    pub(crate) types: &'a TypeInterner,
    pub(crate) options: CompileOptions,
    pub(crate) registry: FunctionRegistry,
    pub(crate) params: TypeParameterStack,
}

impl<'a> TypeGuardCompiler<'a> {
    pub fn new(types: &'a TypeInterner, options: CompileOptions) -> Self {
        Self {
            types,
            options,
            registry: FunctionRegistry::new(),
            params: TypeParameterStack::new(),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> FunctionRegistry {
        self.registry
    }

    /// Compile `type_id` and return the name of its predicate.
    pub fn compile(&mut self, type_id: TypeId) -> Result<String, CompileError> {
        let types = self.types;
        self.visit_type(types, type_id)
    }

    // =========================================================================
    // Shared helpers for the strategies
    // =========================================================================

    pub(crate) fn exact(&self) -> bool {
        self.options.superfluous_property_check
    }

    pub(crate) fn name_of(&self, type_id: TypeId) -> Result<String, CompileError> {
        naming::type_name(self.types, &self.params, type_id, self.exact())
    }

    /// Register `name` and build its body, unless it is already registered.
    ///
    /// The name is reserved before `build` runs, so a body that reaches its
    /// own type again gets the name back instead of recursing.
    pub(crate) fn ensure(
        &mut self,
        name: String,
        reason: Option<Reason>,
        build: impl FnOnce(&mut Self) -> Result<Vec<Stmt>, CompileError>,
    ) -> Result<String, CompileError> {
        if !self.registry.begin(&name) {
            return Ok(name);
        }
        let body = build(self)?;
        self.registry
            .complete(CompiledFunction::new(name.clone(), body, reason));
        Ok(name)
    }

    /// Register a function whose body is a single `return`.
    pub(crate) fn ensure_expr(
        &mut self,
        name: String,
        reason: Option<Reason>,
        build: impl FnOnce(&mut Self) -> Result<Expr, CompileError>,
    ) -> Result<String, CompileError> {
        self.ensure(name, reason, |this| Ok(vec![Stmt::Return(build(this)?)]))
    }

    /// Whether `name` is a finished predicate that accepts every value.
    pub(crate) fn is_always_true(&self, name: &str) -> bool {
        self.registry
            .get(name)
            .is_some_and(CompiledFunction::is_always_true)
    }

    /// Run `f` with the superfluous-property option set to `exact`.
    pub(crate) fn with_exact<T>(&mut self, exact: bool, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.options.superfluous_property_check;
        self.options.superfluous_property_check = exact;
        let result = f(self);
        self.options.superfluous_property_check = saved;
        result
    }

    /// Run `f` with only the bottom `limit` substitution frames visible.
    pub(crate) fn with_frames<T>(&mut self, limit: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        let hidden = self.params.split_off(limit);
        let result = f(self);
        self.params.restore(hidden);
        result
    }

    /// Run `f` inside the instantiation `definition<args>`.
    ///
    /// Nothing is pushed when the instantiation binds nothing, so chains of
    /// distinct non-generic definitions do not count towards the depth limit.
    pub(crate) fn with_instantiation<T>(
        &mut self,
        definition: &Definition,
        args: &[TypeId],
        f: impl FnOnce(&mut Self) -> Result<T, CompileError>,
    ) -> Result<T, CompileError> {
        let frame = type_params::instantiate(self.types, definition, args)?;
        if frame.is_empty() {
            return f(self);
        }
        let depth = self.params.depth();
        if depth >= MAX_INSTANTIATION_DEPTH as usize {
            return Err(CompileError::InstantiationTooDeep {
                name: definition.name.clone(),
                depth: MAX_INSTANTIATION_DEPTH,
            });
        }
        debug!(definition = %definition.name, depth = depth + 1, bindings = frame.len(), "push instantiation");
        self.params.push(frame);
        let result = f(self);
        self.params.pop();
        debug!(definition = %definition.name, depth, "pop instantiation");
        result
    }

    pub(crate) fn definition(
        &self,
        type_id: TypeId,
        target: DefId,
    ) -> Result<&'a Definition, CompileError> {
        self.types
            .definition(target)
            .ok_or_else(|| CompileError::unsupported(type_id, "reference to an unknown definition"))
    }

    // =========================================================================
    // Generics
    // =========================================================================

    /// `Target<args>`: one function per instantiation name. When the target
    /// extends other definitions its inherited members are merged into one
    /// object check; otherwise the function delegates to the body.
    fn compile_reference(
        &mut self,
        type_id: TypeId,
        target: DefId,
        args: &[TypeId],
    ) -> Result<String, CompileError> {
        let definition = self.definition(type_id, target)?;
        let name = self.name_of(type_id)?;
        self.ensure(name, None, |this| {
            this.with_instantiation(definition, args, |this| {
                let body = definition
                    .body
                    .ok_or_else(|| CompileError::MissingDefinitionBody {
                        name: definition.name.clone(),
                    })?;
                if definition.bases.is_empty() {
                    let body_name = this.compile(body)?;
                    return Ok(vec![Stmt::Return(Expr::call(body_name, Expr::param()))]);
                }
                let shape = this.merged_shape(definition, 0)?;
                this.object_body(&shape)
            })
        })
    }

    fn compile_type_parameter(&mut self, param: TypeParamId) -> Result<String, CompileError> {
        let resolved = self.params.resolve(self.types, param)?;
        self.with_frames(resolved.frame_limit, |this| this.compile(resolved.type_id))
    }
}

// =============================================================================
// Dispatch
// =============================================================================

impl TypeVisitor for TypeGuardCompiler<'_> {
    type Output = Result<String, CompileError>;

    fn visit_special(&mut self, type_id: TypeId, kind: IntrinsicKind) -> Self::Output {
        self.compile_special(type_id, kind)
    }

    fn visit_primitive(&mut self, type_id: TypeId, kind: IntrinsicKind) -> Self::Output {
        self.compile_primitive(type_id, kind)
    }

    fn visit_boolean_literal(&mut self, _: TypeId, value: bool) -> Self::Output {
        self.compile_boolean_literal(value)
    }

    fn visit_literal(&mut self, _: TypeId, value: &LiteralValue) -> Self::Output {
        self.compile_literal(value)
    }

    fn visit_reference(&mut self, type_id: TypeId, target: DefId, args: &[TypeId]) -> Self::Output {
        self.compile_reference(type_id, target, args)
    }

    fn visit_type_parameter(&mut self, _: TypeId, param: TypeParamId) -> Self::Output {
        self.compile_type_parameter(param)
    }

    fn visit_tuple(&mut self, type_id: TypeId, shape: &TupleShape) -> Self::Output {
        self.compile_tuple(type_id, shape)
    }

    fn visit_array(&mut self, type_id: TypeId, element: TypeId) -> Self::Output {
        self.compile_array(type_id, element)
    }

    fn visit_buffer(&mut self, _: TypeId) -> Self::Output {
        self.compile_buffer()
    }

    fn visit_numeric_view(&mut self, _: TypeId, kind: ViewKind) -> Self::Output {
        self.compile_numeric_view(kind)
    }

    fn visit_object(&mut self, type_id: TypeId, shape: &ObjectShape) -> Self::Output {
        self.compile_object(type_id, shape)
    }

    fn visit_union(&mut self, type_id: TypeId, members: &[TypeId]) -> Self::Output {
        self.compile_union(type_id, members)
    }

    fn visit_intersection(&mut self, type_id: TypeId, members: &[TypeId]) -> Self::Output {
        self.compile_intersection(type_id, members)
    }

    fn visit_non_primitive(&mut self, _: TypeId) -> Self::Output {
        self.compile_non_primitive()
    }

    fn visit_keyof(&mut self, type_id: TypeId, operand: TypeId) -> Self::Output {
        self.compile_keyof(type_id, operand)
    }

    fn visit_index_access(&mut self, type_id: TypeId, object: TypeId, index: TypeId) -> Self::Output {
        self.compile_index_access(type_id, object, index)
    }

    fn visit_unsupported(&mut self, type_id: TypeId, data: Option<&TypeData>) -> Self::Output {
        let description = match data {
            Some(data) => data.kind_name().to_string(),
            None => "unknown type id".to_string(),
        };
        Err(CompileError::unsupported(type_id, description))
    }
}

#[cfg(test)]
#[path = "../tests/compiler_tests.rs"]
mod tests;
