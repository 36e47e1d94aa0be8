//! `keyof`, indexed access, and static key sets.
//!
//! Key sets are computed structurally: an object contributes its declared
//! string keys, unions and intersections contribute the union of their
//! members' keys, references contribute their body plus their bases. A
//! string index signature, `any`/`unknown`, arrays and tuples make the set
//! *open* (`None`): any key may be legitimate.

use crate::compiler::TypeGuardCompiler;
use crate::diagnostics::CompileError;
use crate::ir::Expr;
use std::collections::BTreeSet;
use std::fmt;
use tyguard_common::limits::MAX_RESOLUTION_STEPS;
use tyguard_types::{IntrinsicKind, LiteralValue, TypeData, TypeId, format_number};

/// One key an indexed access selects.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum IndexKey {
    Name(String),
    Number(f64),
    AnyString,
    AnyNumber,
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name:?}"),
            Self::Number(number) => f.write_str(&format_number(*number)),
            Self::AnyString => f.write_str("string"),
            Self::AnyNumber => f.write_str("number"),
        }
    }
}

impl TypeGuardCompiler<'_> {
    // =========================================================================
    // keyof
    // =========================================================================

    /// `keyof T`: one of the literal keys, or any string or number when the
    /// key set is open.
    pub(crate) fn compile_keyof(
        &mut self,
        type_id: TypeId,
        operand: TypeId,
    ) -> Result<String, CompileError> {
        let name = self.name_of(type_id)?;
        self.ensure_expr(name, None, |this| {
            Ok(match this.collect_keys(operand)? {
                Some(keys) => Expr::Or(
                    keys.into_iter()
                        .map(|key| Expr::strict_eq(Expr::param(), Expr::string(key)))
                        .collect(),
                ),
                None => Expr::Or(vec![
                    Expr::type_of_is(Expr::param(), "string"),
                    Expr::type_of_is(Expr::param(), "number"),
                ]),
            })
        })
    }

    /// Statically known string keys of `type_id`, or `None` when open.
    pub(crate) fn collect_keys(
        &mut self,
        type_id: TypeId,
    ) -> Result<Option<BTreeSet<String>>, CompileError> {
        self.collect_keys_at(type_id, 0)
    }

    fn collect_keys_at(
        &mut self,
        type_id: TypeId,
        steps: u32,
    ) -> Result<Option<BTreeSet<String>>, CompileError> {
        if steps >= MAX_RESOLUTION_STEPS {
            return Err(CompileError::InstantiationTooDeep {
                name: self.name_of(type_id).unwrap_or_else(|_| format!("#{}", type_id.0)),
                depth: MAX_RESOLUTION_STEPS,
            });
        }
        let types = self.types;
        let Some(data) = types.lookup(type_id) else {
            return Err(CompileError::unsupported(type_id, "unknown type id"));
        };

        match data {
            TypeData::Object(shape) => Ok(shape.string_index.is_none().then(|| {
                shape
                    .properties
                    .iter()
                    .filter(|property| !property.is_symbol_like)
                    .map(|property| property.name.clone())
                    .collect()
            })),
            TypeData::Union(members) | TypeData::Intersection(members) => {
                let mut keys = BTreeSet::new();
                for &member in members {
                    match self.collect_keys_at(member, steps + 1)? {
                        Some(member_keys) => keys.extend(member_keys),
                        None => return Ok(None),
                    }
                }
                Ok(Some(keys))
            }
            TypeData::Reference { target, args } => {
                let definition = self.definition(type_id, *target)?;
                self.with_instantiation(definition, args, |this| {
                    let body = definition
                        .body
                        .ok_or_else(|| CompileError::MissingDefinitionBody {
                            name: definition.name.clone(),
                        })?;
                    let Some(mut keys) = this.collect_keys_at(body, steps + 1)? else {
                        return Ok(None);
                    };
                    for &base in &definition.bases {
                        match this.collect_keys_at(base, steps + 1)? {
                            Some(base_keys) => keys.extend(base_keys),
                            None => return Ok(None),
                        }
                    }
                    Ok(Some(keys))
                })
            }
            TypeData::TypeParameter(param) => {
                let resolved = self.params.resolve(types, *param)?;
                self.with_frames(resolved.frame_limit, |this| {
                    this.collect_keys_at(resolved.type_id, steps + 1)
                })
            }
            TypeData::Intrinsic(IntrinsicKind::Any | IntrinsicKind::Unknown)
            | TypeData::Array(_)
            | TypeData::Tuple(_)
            | TypeData::IndexAccess { .. } => Ok(None),
            TypeData::Intrinsic(_)
            | TypeData::Literal(_)
            | TypeData::BooleanLiteral(_)
            | TypeData::KeyOf(_)
            | TypeData::Buffer
            | TypeData::NumericView(_) => Ok(Some(BTreeSet::new())),
        }
    }

    // =========================================================================
    // Indexed access
    // =========================================================================

    /// `T[K]`: the predicate of the selected member type. Several selected
    /// members (a union index) compile to a disjunction.
    pub(crate) fn compile_index_access(
        &mut self,
        type_id: TypeId,
        object: TypeId,
        index: TypeId,
    ) -> Result<String, CompileError> {
        let keys = self.index_keys(index, 0)?;
        let mut predicates: Vec<String> = Vec::new();
        for key in &keys {
            let found = self.indexed_member(object, key, 0)?;
            if found.is_empty() {
                let description = format!(
                    "indexed access `{}`: no member {key}",
                    self.name_of(type_id)?
                );
                return Err(CompileError::unsupported(type_id, description));
            }
            for predicate in found {
                if !predicates.contains(&predicate) {
                    predicates.push(predicate);
                }
            }
        }

        match predicates.len() {
            0 => Err(CompileError::unsupported(type_id, "indexed access with an empty index")),
            1 => Ok(predicates.remove(0)),
            _ => {
                let name = self.name_of(type_id)?;
                self.ensure_expr(name, None, |_| {
                    Ok(Expr::Or(
                        predicates
                            .into_iter()
                            .map(|predicate| Expr::call(predicate, Expr::param()))
                            .collect(),
                    ))
                })
            }
        }
    }

    /// The keys an index type selects.
    fn index_keys(&mut self, index: TypeId, steps: u32) -> Result<Vec<IndexKey>, CompileError> {
        if steps >= MAX_RESOLUTION_STEPS {
            return Err(CompileError::InstantiationTooDeep {
                name: format!("#{}", index.0),
                depth: MAX_RESOLUTION_STEPS,
            });
        }
        let types = self.types;
        match types.lookup(index) {
            Some(TypeData::Literal(LiteralValue::String(name))) => {
                Ok(vec![IndexKey::Name(name.clone())])
            }
            Some(TypeData::Literal(LiteralValue::Number(number))) => {
                Ok(vec![IndexKey::Number(number.0)])
            }
            Some(TypeData::Intrinsic(IntrinsicKind::String)) => Ok(vec![IndexKey::AnyString]),
            Some(TypeData::Intrinsic(IntrinsicKind::Number)) => Ok(vec![IndexKey::AnyNumber]),
            Some(TypeData::Union(members)) => {
                let mut keys = Vec::new();
                for &member in members {
                    for key in self.index_keys(member, steps + 1)? {
                        if !keys.contains(&key) {
                            keys.push(key);
                        }
                    }
                }
                Ok(keys)
            }
            Some(TypeData::TypeParameter(param)) => {
                let resolved = self.params.resolve(types, *param)?;
                self.with_frames(resolved.frame_limit, |this| {
                    this.index_keys(resolved.type_id, steps + 1)
                })
            }
            Some(TypeData::Reference { target, args }) => {
                let definition = self.definition(index, *target)?;
                let body = definition
                    .body
                    .ok_or_else(|| CompileError::MissingDefinitionBody {
                        name: definition.name.clone(),
                    })?;
                self.with_instantiation(definition, args, |this| this.index_keys(body, steps + 1))
            }
            Some(TypeData::KeyOf(operand)) => Ok(match self.collect_keys(*operand)? {
                Some(keys) => keys.into_iter().map(IndexKey::Name).collect(),
                None => vec![IndexKey::AnyString, IndexKey::AnyNumber],
            }),
            Some(data) => Err(CompileError::unsupported(
                index,
                format!("{} used as an index type", data.kind_name()),
            )),
            None => Err(CompileError::unsupported(index, "unknown type id")),
        }
    }

    /// Predicates of the member(s) of `object` selected by `key`, compiled
    /// in the instantiation context the member type was written in. Empty
    /// when `object` has no such member.
    fn indexed_member(
        &mut self,
        object: TypeId,
        key: &IndexKey,
        steps: u32,
    ) -> Result<Vec<String>, CompileError> {
        if steps >= MAX_RESOLUTION_STEPS {
            return Err(CompileError::InstantiationTooDeep {
                name: format!("#{}", object.0),
                depth: MAX_RESOLUTION_STEPS,
            });
        }
        let types = self.types;
        let Some(data) = types.lookup(object) else {
            return Err(CompileError::unsupported(object, "unknown type id"));
        };

        match data {
            TypeData::Object(shape) => {
                let property = match key {
                    IndexKey::Name(name) => shape.property(name),
                    IndexKey::Number(number) => shape.property(&format_number(*number)),
                    IndexKey::AnyString | IndexKey::AnyNumber => None,
                };
                if let Some(property) = property {
                    if property.is_method {
                        return Ok(Vec::new());
                    }
                    let Some(property_type) = property.type_id else {
                        return Err(CompileError::UnsupportedPropertyDeclaration {
                            property: property.name.clone(),
                        });
                    };
                    let mut predicate = self.compile(property_type)?;
                    if property.optional {
                        predicate = self.optional(predicate)?;
                    }
                    return Ok(vec![predicate]);
                }
                match shape.string_index {
                    Some(index_type) => Ok(vec![self.compile(index_type)?]),
                    None => Ok(Vec::new()),
                }
            }
            TypeData::Array(element) => match key {
                IndexKey::Number(_) | IndexKey::AnyNumber => Ok(vec![self.compile(*element)?]),
                IndexKey::Name(name) if name == "length" => Ok(vec![self.compile(TypeId::NUMBER)?]),
                _ => Ok(Vec::new()),
            },
            TypeData::Tuple(shape) => match key {
                IndexKey::Number(number) => {
                    let position = *number as usize;
                    if number.fract() != 0.0 || *number < 0.0 || position >= shape.elements.len() {
                        return Ok(Vec::new());
                    }
                    let element = shape.elements[position];
                    let mut predicate = self.compile(element.type_id)?;
                    if element.optional {
                        predicate = self.optional(predicate)?;
                    }
                    Ok(vec![predicate])
                }
                IndexKey::AnyNumber => {
                    let mut predicates = Vec::with_capacity(shape.elements.len());
                    for element in &shape.elements {
                        let predicate = self.compile(element.type_id)?;
                        if !predicates.contains(&predicate) {
                            predicates.push(predicate);
                        }
                    }
                    Ok(predicates)
                }
                IndexKey::Name(name) if name == "length" => Ok(vec![self.compile(TypeId::NUMBER)?]),
                _ => Ok(Vec::new()),
            },
            TypeData::Reference { target, args } => {
                let definition = self.definition(object, *target)?;
                self.with_instantiation(definition, args, |this| {
                    let body = definition
                        .body
                        .ok_or_else(|| CompileError::MissingDefinitionBody {
                            name: definition.name.clone(),
                        })?;
                    let found = this.indexed_member(body, key, steps + 1)?;
                    if !found.is_empty() {
                        return Ok(found);
                    }
                    for &base in &definition.bases {
                        let found = this.indexed_member(base, key, steps + 1)?;
                        if !found.is_empty() {
                            return Ok(found);
                        }
                    }
                    Ok(Vec::new())
                })
            }
            TypeData::TypeParameter(param) => {
                let resolved = self.params.resolve(types, *param)?;
                self.with_frames(resolved.frame_limit, |this| {
                    this.indexed_member(resolved.type_id, key, steps + 1)
                })
            }
            TypeData::Union(members) => {
                let mut predicates = Vec::new();
                for &member in members {
                    for predicate in self.indexed_member(member, key, steps + 1)? {
                        if !predicates.contains(&predicate) {
                            predicates.push(predicate);
                        }
                    }
                }
                Ok(predicates)
            }
            // The first member declaring the key decides.
            TypeData::Intersection(members) => {
                for &member in members {
                    let found = self.indexed_member(member, key, steps + 1)?;
                    if !found.is_empty() {
                        return Ok(found);
                    }
                }
                Ok(Vec::new())
            }
            _ => Ok(Vec::new()),
        }
    }
}
