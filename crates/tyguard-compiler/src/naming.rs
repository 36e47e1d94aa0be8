//! Canonical predicate names.
//!
//! The name of a type is its registry key: two requests with the same name
//! are the same predicate and are compiled once. Names are therefore
//! option-sensitive and resolve type parameters through the current
//! substitution frames, so `Box<number>` and `Box<string>` never share a body.
//! Under the superfluous-property check, objects, references, intersections,
//! `keyof` and indexed access get an `exact ` prefix; arrays, tuples and
//! unions differ through their members' names.
//!
//! Names read like TypeScript where that is unambiguous:
//!
//! | Descriptor | Name |
//! |---|---|
//! | `number` | `number` |
//! | `"a"` | `"a"` |
//! | `T[]` | `Array<T>` |
//! | `[A, B?]` | `[A, B?]` |
//! | `{ b?: B; a: A }` | `{a: A; b?: B}` |
//! | `B \| A` | `A \| B` |
//! | `Node<T>` | `Node<T>` (`Node@3<T>` when the name is shared) |
//! | `T["k"]` | `T["k"]` |

use crate::diagnostics::CompileError;
use crate::type_params::TypeParameterStack;
use std::collections::BTreeSet;
use tyguard_types::{
    DefId, LiteralValue, ObjectShape, TupleShape, TypeData, TypeId, TypeInterner, ViewKind,
    format_number,
};

/// Prefix marking predicates that reject superfluous properties.
pub const EXACT_PREFIX: &str = "exact ";

/// Names that built-in predicates use or start with; definitions carrying
/// one are disambiguated with their id.
const RESERVED: &[&str] = &[
    "Array",
    "optional",
    "NaN",
    "Infinity",
    "any",
    "unknown",
    "never",
    "null",
    "undefined",
    "number",
    "bigint",
    "boolean",
    "string",
    "object",
    "symbol",
    "true",
    "false",
    "Buffer",
];

/// Canonical name of `type_id` under the given stack and exactness.
pub fn type_name(
    types: &TypeInterner,
    params: &TypeParameterStack,
    type_id: TypeId,
    exact: bool,
) -> Result<String, CompileError> {
    TypeNamer { types, params }.name(type_id, exact, params.depth())
}

/// Name of the optional wrapper around `inner`.
pub fn optional_name(inner: &str) -> String {
    format!("optional<{inner}>")
}

/// Name of the superfluous-key check over a closed key set.
pub fn exact_keys_name(keys: &BTreeSet<String>) -> String {
    let quoted: Vec<String> = keys.iter().map(|key| quote(key)).collect();
    format!("keys {{{}}}", quoted.join(", "))
}

/// JSON-style quoted string.
pub fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Name of a definition: its declared name, or `name@id` when that name is
/// shared by several definitions, collides with a built-in, or is not an
/// identifier (and could spell a structural name such as `Array<number>`).
pub fn definition_name(types: &TypeInterner, def: DefId) -> String {
    match types.definition(def) {
        Some(definition)
            if is_identifier(&definition.name)
                && !types.definitions().is_name_shared(&definition.name)
                && !RESERVED.contains(&definition.name.as_str())
                && ViewKind::from_constructor_name(&definition.name).is_none() =>
        {
            definition.name.clone()
        }
        Some(definition) => format!("{}@{}", definition.name, def.0),
        None => format!("@{}", def.0),
    }
}

struct TypeNamer<'a> {
    types: &'a TypeInterner,
    params: &'a TypeParameterStack,
}

impl TypeNamer<'_> {
    fn name(&self, type_id: TypeId, exact: bool, limit: usize) -> Result<String, CompileError> {
        let Some(data) = self.types.lookup(type_id) else {
            return Err(CompileError::unsupported(type_id, "unknown type id"));
        };
        let prefix = if exact { EXACT_PREFIX } else { "" };

        Ok(match data {
            TypeData::Intrinsic(kind) => kind.as_str().to_string(),
            TypeData::Literal(LiteralValue::String(value)) => quote(value),
            TypeData::Literal(LiteralValue::Number(value)) => format_number(value.0),
            TypeData::BooleanLiteral(value) => value.to_string(),
            TypeData::Buffer => "Buffer".to_string(),
            TypeData::NumericView(kind) => kind.constructor_name().to_string(),
            TypeData::Array(element) => format!("Array<{}>", self.name(*element, exact, limit)?),
            TypeData::Tuple(shape) => self.tuple(shape, exact, limit)?,
            TypeData::Object(shape) => format!("{prefix}{}", self.object(shape, exact, limit)?),
            TypeData::Union(members) => self.members(members, " | ", exact, limit)?,
            TypeData::Intersection(members) => {
                format!("{prefix}{}", self.members(members, " & ", false, limit)?)
            }
            TypeData::Reference { target, args } => {
                format!("{prefix}{}", self.reference(*target, args, exact, limit)?)
            }
            TypeData::TypeParameter(param) => {
                let resolved = self.params.resolve_within(self.types, *param, limit)?;
                self.name(resolved.type_id, exact, resolved.frame_limit)?
            }
            TypeData::IndexAccess { object, index } => format!(
                "{prefix}{}[{}]",
                self.name(*object, false, limit)?,
                self.name(*index, false, limit)?
            ),
            TypeData::KeyOf(operand) => {
                format!("{prefix}keyof {}", self.name(*operand, false, limit)?)
            }
        })
    }

    fn tuple(&self, shape: &TupleShape, exact: bool, limit: usize) -> Result<String, CompileError> {
        let mut parts = Vec::with_capacity(shape.elements.len());
        for element in &shape.elements {
            let name = self.name(element.type_id, exact, limit)?;
            parts.push(if element.optional {
                format!("{name}?")
            } else {
                name
            });
        }
        Ok(format!("[{}]", parts.join(", ")))
    }

    fn object(&self, shape: &ObjectShape, exact: bool, limit: usize) -> Result<String, CompileError> {
        let mut members = Vec::with_capacity(shape.properties.len() + 1);
        for property in &shape.properties {
            if property.is_symbol_like {
                continue;
            }
            let key = property_key(&property.name);
            let marker = if property.optional { "?" } else { "" };
            members.push(match property.type_id {
                _ if property.is_method => format!("{key}{marker}()"),
                Some(type_id) => format!("{key}{marker}: {}", self.name(type_id, exact, limit)?),
                None => format!("{key}{marker}"),
            });
        }
        members.sort();
        if let Some(index) = shape.string_index {
            members.push(format!("[key: string]: {}", self.name(index, exact, limit)?));
        }
        Ok(format!("{{{}}}", members.join("; ")))
    }

    fn members(
        &self,
        members: &[TypeId],
        separator: &str,
        exact: bool,
        limit: usize,
    ) -> Result<String, CompileError> {
        let mut names = BTreeSet::new();
        for &member in members {
            names.insert(self.name(member, exact, limit)?);
        }
        Ok(names.into_iter().collect::<Vec<_>>().join(separator))
    }

    fn reference(
        &self,
        target: DefId,
        args: &[TypeId],
        exact: bool,
        limit: usize,
    ) -> Result<String, CompileError> {
        let base = definition_name(self.types, target);
        let Some(definition) = self.types.definition(target) else {
            return Ok(base);
        };
        if definition.type_params.is_empty() {
            return Ok(base);
        }

        let mut arg_names = Vec::with_capacity(definition.type_params.len());
        for (position, &param) in definition.type_params.iter().enumerate() {
            let arg = match args.get(position) {
                Some(&arg) => arg,
                None => self
                    .types
                    .type_param_info(param)
                    .and_then(|info| info.default)
                    .ok_or_else(|| CompileError::UnboundTypeParameter {
                        name: self
                            .types
                            .type_param_info(param)
                            .map_or_else(String::new, |info| info.name.clone()),
                    })?,
            };
            arg_names.push(self.name(arg, exact, limit)?);
        }
        Ok(format!("{base}<{}>", arg_names.join(", ")))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

#[cfg(test)]
#[path = "../tests/naming_tests.rs"]
mod tests;
