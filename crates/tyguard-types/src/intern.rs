//! Type interning for structural deduplication.
//!
//! This module implements the interning arena that converts `TypeData`
//! structures into lightweight `TypeId` handles.
//!
//! Benefits:
//! - O(1) type equality (just compare `TypeId` values)
//! - Memory efficient (each unique structure stored once)
//! - Self-referential graphs are expressed through `DefId` references, so the
//!   arena itself is always acyclic

use crate::def::{DefId, Definition, DefinitionStore};
use crate::types::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

/// Arena of interned type descriptors, type parameters and definitions.
#[derive(Clone, Debug)]
pub struct TypeInterner {
    types: Vec<TypeData>,
    index: FxHashMap<TypeData, TypeId>,
    type_params: Vec<TypeParamInfo>,
    definitions: DefinitionStore,
}

impl TypeInterner {
    /// Create an interner with every built-in descriptor pre-registered at
    /// its fixed `TypeId`.
    pub fn new() -> Self {
        let mut interner = Self {
            types: Vec::new(),
            index: FxHashMap::default(),
            type_params: Vec::new(),
            definitions: DefinitionStore::new(),
        };

        let builtins = [
            (TypeId::ANY, TypeData::Intrinsic(IntrinsicKind::Any)),
            (TypeId::UNKNOWN, TypeData::Intrinsic(IntrinsicKind::Unknown)),
            (TypeId::NEVER, TypeData::Intrinsic(IntrinsicKind::Never)),
            (TypeId::NULL, TypeData::Intrinsic(IntrinsicKind::Null)),
            (TypeId::UNDEFINED, TypeData::Intrinsic(IntrinsicKind::Undefined)),
            (TypeId::NUMBER, TypeData::Intrinsic(IntrinsicKind::Number)),
            (TypeId::BIGINT, TypeData::Intrinsic(IntrinsicKind::BigInt)),
            (TypeId::BOOLEAN, TypeData::Intrinsic(IntrinsicKind::Boolean)),
            (TypeId::STRING, TypeData::Intrinsic(IntrinsicKind::String)),
            (TypeId::OBJECT, TypeData::Intrinsic(IntrinsicKind::Object)),
            (TypeId::SYMBOL, TypeData::Intrinsic(IntrinsicKind::Symbol)),
            (TypeId::BUFFER, TypeData::Buffer),
            (TypeId::TRUE, TypeData::BooleanLiteral(true)),
            (TypeId::FALSE, TypeData::BooleanLiteral(false)),
        ];
        for (expected, data) in builtins {
            let id = interner.intern(data);
            debug_assert_eq!(id, expected);
        }
        debug_assert_eq!(interner.types.len() as u32, TypeId::FIRST_USER);

        interner
    }

    // =========================================================================
    // Core lookup / intern
    // =========================================================================

    /// Intern a descriptor, returning the existing id for an identical one.
    ///
    /// Prefer the typed constructors below: they normalize unions,
    /// intersections and tuples before interning.
    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.index.get(&data) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(data.clone());
        self.index.insert(data, id);
        id
    }

    /// Look up the descriptor behind an id.
    pub fn lookup(&self, id: TypeId) -> Option<&TypeData> {
        self.types.get(id.0 as usize)
    }

    /// Number of interned descriptors (built-ins included).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // =========================================================================
    // Literals
    // =========================================================================

    pub fn literal_string(&mut self, value: impl Into<String>) -> TypeId {
        self.intern(TypeData::Literal(LiteralValue::String(value.into())))
    }

    pub fn literal_number(&mut self, value: f64) -> TypeId {
        self.intern(TypeData::Literal(LiteralValue::Number(OrderedFloat(value))))
    }

    pub const fn literal_boolean(&self, value: bool) -> TypeId {
        if value { TypeId::TRUE } else { TypeId::FALSE }
    }

    // =========================================================================
    // Containers
    // =========================================================================

    pub fn array(&mut self, element: TypeId) -> TypeId {
        self.intern(TypeData::Array(element))
    }

    pub fn tuple(&mut self, elements: Vec<TupleElement>) -> TypeId {
        self.intern(TypeData::Tuple(TupleShape::new(elements)))
    }

    pub fn object(&mut self, properties: Vec<PropertyInfo>) -> TypeId {
        self.intern(TypeData::Object(ObjectShape {
            properties,
            string_index: None,
        }))
    }

    pub fn object_with_index(&mut self, shape: ObjectShape) -> TypeId {
        self.intern(TypeData::Object(shape))
    }

    pub fn numeric_view(&mut self, kind: ViewKind) -> TypeId {
        self.intern(TypeData::NumericView(kind))
    }

    // =========================================================================
    // Unions / intersections
    // =========================================================================

    /// `A | B | ...`: nested unions are flattened and duplicates removed.
    /// A single remaining member is returned as-is; no members means `never`.
    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        let flat = self.flatten(members, |data| match data {
            TypeData::Union(inner) => Some(inner.clone()),
            _ => None,
        });
        match flat.len() {
            0 => TypeId::NEVER,
            1 => flat[0],
            _ => self.intern(TypeData::Union(flat)),
        }
    }

    /// `A & B & ...`: nested intersections are flattened and duplicates
    /// removed. A single remaining member is returned as-is; no members means
    /// `unknown`.
    pub fn intersection(&mut self, members: Vec<TypeId>) -> TypeId {
        let flat = self.flatten(members, |data| match data {
            TypeData::Intersection(inner) => Some(inner.clone()),
            _ => None,
        });
        match flat.len() {
            0 => TypeId::UNKNOWN,
            1 => flat[0],
            _ => self.intern(TypeData::Intersection(flat)),
        }
    }

    fn flatten(
        &self,
        members: Vec<TypeId>,
        nested: impl Fn(&TypeData) -> Option<Vec<TypeId>>,
    ) -> Vec<TypeId> {
        let mut seen = FxHashSet::default();
        let mut flat = Vec::with_capacity(members.len());
        let mut pending: Vec<TypeId> = members.into_iter().rev().collect();
        while let Some(member) = pending.pop() {
            if let Some(inner) = self.lookup(member).and_then(&nested) {
                pending.extend(inner.into_iter().rev());
                continue;
            }
            if seen.insert(member) {
                flat.push(member);
            }
        }
        flat
    }

    // =========================================================================
    // Type operators
    // =========================================================================

    pub fn keyof(&mut self, operand: TypeId) -> TypeId {
        self.intern(TypeData::KeyOf(operand))
    }

    pub fn index_access(&mut self, object: TypeId, index: TypeId) -> TypeId {
        self.intern(TypeData::IndexAccess { object, index })
    }

    // =========================================================================
    // Type parameters
    // =========================================================================

    /// Declare a fresh type parameter and return its identity together with
    /// the `TypeParameter` descriptor that refers to it.
    pub fn type_param(&mut self, name: impl Into<String>) -> (TypeParamId, TypeId) {
        let id = TypeParamId(self.type_params.len() as u32);
        self.type_params.push(TypeParamInfo {
            name: name.into(),
            default: None,
        });
        (id, self.intern(TypeData::TypeParameter(id)))
    }

    /// Attach `= default` to a declared parameter.
    pub fn set_type_param_default(&mut self, param: TypeParamId, default: TypeId) {
        if let Some(info) = self.type_params.get_mut(param.0 as usize) {
            info.default = Some(default);
        }
    }

    pub fn type_param_info(&self, param: TypeParamId) -> Option<&TypeParamInfo> {
        self.type_params.get(param.0 as usize)
    }

    // =========================================================================
    // Definitions
    // =========================================================================

    /// Declare a named definition without a body.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        type_params: impl IntoIterator<Item = TypeParamId>,
    ) -> DefId {
        let definition = Definition::new(name, type_params);
        trace!(name = %definition.name, "declare definition");
        self.definitions.insert(definition)
    }

    /// Attach the structural body of a declared definition.
    pub fn define(&mut self, def: DefId, body: TypeId) {
        if let Some(definition) = self.definitions.get_mut(def) {
            definition.body = Some(body);
        }
    }

    /// Record an `extends` clause. `base` must be a reference descriptor.
    pub fn add_base(&mut self, def: DefId, base: TypeId) {
        if let Some(definition) = self.definitions.get_mut(def) {
            definition.bases.push(base);
        }
    }

    pub fn definition(&self, def: DefId) -> Option<&Definition> {
        self.definitions.get(def)
    }

    pub fn definitions(&self) -> &DefinitionStore {
        &self.definitions
    }

    /// `Target<args...>`.
    pub fn reference(&mut self, target: DefId, args: Vec<TypeId>) -> TypeId {
        self.intern(TypeData::Reference { target, args })
    }

    /// Convenience: declare and define a non-generic alias in one step.
    pub fn alias(&mut self, name: impl Into<String>, body: TypeId) -> TypeId {
        let def = self.declare(name, []);
        self.define(def, body);
        self.reference(def, Vec::new())
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
