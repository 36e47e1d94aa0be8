//! Type parameter substitution stack.
//!
//! Entering a generic instantiation pushes one frame mapping the target's
//! parameters to the supplied arguments, plus whatever bindings the target's
//! `extends` clauses imply for its bases. Resolving a bare parameter scans
//! the frames from the top.
//!
//! A binding remembers where its type was written:
//!
//! - [`BindingScope::Outer`]: an argument at the instantiation site, written
//!   in the enclosing context, so it resolves against the frames *below* the
//!   one holding it. `Box<Box<T>>` or `Pair<U, T>` inside a generic body
//!   would otherwise find their own frame again and never terminate.
//! - [`BindingScope::Same`]: a base argument or a default, written in the
//!   target's own parameters, so it resolves against frames up to and
//!   including its own.

use crate::diagnostics::CompileError;
use rustc_hash::FxHashMap;
use tracing::trace;
use tyguard_common::limits::MAX_RESOLUTION_STEPS;
use tyguard_types::{Definition, TypeData, TypeId, TypeInterner, TypeParamId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingScope {
    Outer,
    Same,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub type_id: TypeId,
    pub scope: BindingScope,
}

/// Substitutions introduced by one instantiation.
pub type Frame = FxHashMap<TypeParamId, Binding>;

/// A resolved parameter: the type it stands for, and how many frames (from
/// the bottom) are visible when compiling that type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub type_id: TypeId,
    pub frame_limit: usize,
}

#[derive(Debug, Default)]
pub struct TypeParameterStack {
    frames: Vec<Frame>,
}

impl TypeParameterStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Remove every frame above `limit`, returning them for [`restore`](Self::restore).
    pub fn split_off(&mut self, limit: usize) -> Vec<Frame> {
        self.frames.split_off(limit.min(self.frames.len()))
    }

    pub fn restore(&mut self, frames: Vec<Frame>) {
        self.frames.extend(frames);
    }

    /// Resolve `param` against the whole stack.
    pub fn resolve(
        &self,
        types: &TypeInterner,
        param: TypeParamId,
    ) -> Result<Resolved, CompileError> {
        self.resolve_within(types, param, self.frames.len())
    }

    /// Resolve `param` against the bottom `limit` frames.
    ///
    /// Bindings that are themselves bare parameters are followed. When no
    /// frame binds a parameter, its declared default is used; without a
    /// default the parameter is unbound.
    pub fn resolve_within(
        &self,
        types: &TypeInterner,
        param: TypeParamId,
        limit: usize,
    ) -> Result<Resolved, CompileError> {
        let mut param = param;
        let mut limit = limit.min(self.frames.len());

        for _ in 0..MAX_RESOLUTION_STEPS {
            let found = self.frames[..limit]
                .iter()
                .enumerate()
                .rev()
                .find_map(|(depth, frame)| frame.get(&param).map(|binding| (depth, *binding)));

            let type_id = match found {
                Some((depth, binding)) => {
                    limit = match binding.scope {
                        BindingScope::Outer => depth,
                        BindingScope::Same => depth + 1,
                    };
                    binding.type_id
                }
                None => match types.type_param_info(param).and_then(|info| info.default) {
                    Some(default) => default,
                    None => {
                        return Err(CompileError::UnboundTypeParameter {
                            name: param_name(types, param),
                        });
                    }
                },
            };

            match types.lookup(type_id) {
                Some(TypeData::TypeParameter(next)) if *next != param => param = *next,
                Some(TypeData::TypeParameter(_)) => {
                    return Err(CompileError::UnboundTypeParameter {
                        name: param_name(types, param),
                    });
                }
                _ => {
                    trace!(param = %param_name(types, param), resolved = type_id.0, limit, "resolved type parameter");
                    return Ok(Resolved {
                        type_id,
                        frame_limit: limit,
                    });
                }
            }
        }

        Err(CompileError::InstantiationTooDeep {
            name: param_name(types, param),
            depth: MAX_RESOLUTION_STEPS,
        })
    }
}

fn param_name(types: &TypeInterner, param: TypeParamId) -> String {
    types
        .type_param_info(param)
        .map_or_else(|| format!("T{}", param.0), |info| info.name.clone())
}

/// Build the frame for instantiating `definition` with `args`.
///
/// Pairs where the argument is the parameter itself are skipped (still
/// abstract at this level). Missing arguments take the declared default.
/// The `extends` chain is walked recursively; a binding already present
/// (from the derived definition) is never overwritten by a base.
pub fn instantiate(
    types: &TypeInterner,
    definition: &Definition,
    args: &[TypeId],
) -> Result<Frame, CompileError> {
    let mut frame = Frame::default();
    bind_params(types, definition, args, BindingScope::Outer, &mut frame);
    add_base_bindings(types, definition, &mut frame, 0)?;
    Ok(frame)
}

fn bind_params(
    types: &TypeInterner,
    definition: &Definition,
    args: &[TypeId],
    scope: BindingScope,
    frame: &mut Frame,
) {
    for (position, &param) in definition.type_params.iter().enumerate() {
        let (type_id, scope) = match args.get(position) {
            Some(&arg) => (arg, scope),
            None => match types.type_param_info(param).and_then(|info| info.default) {
                Some(default) => (default, BindingScope::Same),
                None => continue,
            },
        };
        if types.lookup(type_id) == Some(&TypeData::TypeParameter(param)) {
            continue;
        }
        frame.entry(param).or_insert(Binding { type_id, scope });
    }
}

fn add_base_bindings(
    types: &TypeInterner,
    definition: &Definition,
    frame: &mut Frame,
    steps: u32,
) -> Result<(), CompileError> {
    if steps >= MAX_RESOLUTION_STEPS {
        return Err(CompileError::InstantiationTooDeep {
            name: definition.name.clone(),
            depth: MAX_RESOLUTION_STEPS,
        });
    }
    for &base in &definition.bases {
        let Some(TypeData::Reference { target, args }) = types.lookup(base) else {
            continue;
        };
        let Some(base_definition) = types.definition(*target) else {
            continue;
        };
        bind_params(types, base_definition, args, BindingScope::Same, frame);
        add_base_bindings(types, base_definition, frame, steps + 1)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/type_params_tests.rs"]
mod tests;
