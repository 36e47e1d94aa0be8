//! Object shapes.
//!
//! An object predicate rejects non-objects, `null` and arrays, then checks
//! every member:
//!
//! - required: `"key" in object && check(object.key)`
//! - optional: `object.key === undefined || check(object.key)`
//!
//! A string index signature adds a loop over every own enumerable key. When
//! superfluous properties are rejected and there is no index signature, a
//! second loop rejects keys outside the declared set.

use crate::compiler::TypeGuardCompiler;
use crate::diagnostics::CompileError;
use crate::ir::{Expr, KEY_VAR, Stmt};
use std::collections::BTreeSet;
use tyguard_common::limits::MAX_RESOLUTION_STEPS;
use tyguard_types::{Definition, ObjectShape, TypeData, TypeId};

impl TypeGuardCompiler<'_> {
    pub(crate) fn compile_object(
        &mut self,
        type_id: TypeId,
        shape: &ObjectShape,
    ) -> Result<String, CompileError> {
        let name = self.name_of(type_id)?;
        self.ensure(name, None, |this| this.object_body(shape))
    }

    /// Body of an object predicate over `shape`.
    pub(crate) fn object_body(&mut self, shape: &ObjectShape) -> Result<Vec<Stmt>, CompileError> {
        let mut conditions = match Expr::is_plain_object(Expr::param()) {
            Expr::And(parts) => parts,
            other => vec![other],
        };
        let mut allowed = BTreeSet::new();

        for property in &shape.properties {
            if property.is_symbol_like {
                continue;
            }
            allowed.insert(property.name.clone());
            if property.is_method {
                if self.options.ignore_methods {
                    continue;
                }
                return Err(CompileError::MethodDisallowed {
                    property: property.name.clone(),
                });
            }
            let Some(property_type) = property.type_id else {
                return Err(CompileError::UnsupportedPropertyDeclaration {
                    property: property.name.clone(),
                });
            };

            let predicate = self.compile(property_type)?;
            let value = Expr::member(Expr::param(), property.name.clone());
            let check = Expr::call(predicate, value.clone());
            conditions.push(if property.optional {
                Expr::Or(vec![Expr::strict_eq(value, Expr::Undefined), check])
            } else {
                Expr::And(vec![Expr::has_key(property.name.clone(), Expr::param()), check])
            });
        }

        let mut loops = Vec::new();
        if let Some(index_type) = shape.string_index {
            let predicate = self.compile(index_type)?;
            if !self.is_always_true(&predicate) {
                loops.push(Stmt::ForKeys {
                    key: KEY_VAR.to_string(),
                    object: Expr::param(),
                    body: vec![Stmt::reject_unless(Expr::call(
                        predicate,
                        Expr::index(Expr::param(), Expr::var(KEY_VAR)),
                    ))],
                });
            }
        } else if self.exact() {
            loops.push(exact_keys_loop(allowed));
        }

        if loops.is_empty() {
            return Ok(vec![Stmt::Return(Expr::And(conditions))]);
        }
        let mut body = Vec::with_capacity(loops.len() + 2);
        body.push(Stmt::reject_unless(Expr::And(conditions)));
        body.extend(loops);
        body.push(Stmt::Return(Expr::Bool(true)));
        Ok(body)
    }

    /// Full member set of `definition`: its own body plus everything
    /// inherited through `extends`, nearest declaration first.
    ///
    /// Base member types are written in the bases' own parameters; the
    /// current instantiation frame binds those, so the merged shape is
    /// compiled as is.
    pub(crate) fn merged_shape(
        &self,
        definition: &Definition,
        steps: u32,
    ) -> Result<ObjectShape, CompileError> {
        if steps >= MAX_RESOLUTION_STEPS {
            return Err(CompileError::InstantiationTooDeep {
                name: definition.name.clone(),
                depth: MAX_RESOLUTION_STEPS,
            });
        }
        let body = definition
            .body
            .ok_or_else(|| CompileError::MissingDefinitionBody {
                name: definition.name.clone(),
            })?;
        let Some(TypeData::Object(own)) = self.types.lookup(body) else {
            return Err(CompileError::unsupported(
                body,
                format!("`{}` extends other types but its body is not an object", definition.name),
            ));
        };

        let mut shape = own.clone();
        for &base in &definition.bases {
            let Some(TypeData::Reference { target, .. }) = self.types.lookup(base) else {
                return Err(CompileError::unsupported(base, "base that is not a type reference"));
            };
            let base_definition = self.definition(base, *target)?;
            let inherited = self.merged_shape(base_definition, steps + 1)?;
            for property in inherited.properties {
                if shape.property(&property.name).is_none() {
                    shape.properties.push(property);
                }
            }
            if shape.string_index.is_none() {
                shape.string_index = inherited.string_index;
            }
        }
        Ok(shape)
    }
}

/// Reject the first own key outside `allowed`.
pub(crate) fn exact_keys_loop(allowed: BTreeSet<String>) -> Stmt {
    Stmt::ForKeys {
        key: KEY_VAR.to_string(),
        object: Expr::param(),
        body: vec![Stmt::reject_unless(Expr::OneOf {
            value: Box::new(Expr::var(KEY_VAR)),
            options: allowed.into_iter().collect(),
        })],
    }
}
