//! Type Visitor Pattern
//!
//! `TypeVisitor` routes a descriptor to one `visit_*` method per descriptor
//! shape. The dispatch order is significant where classifications overlap,
//! and is fixed here so every consumer sees the same priority:
//!
//! 1. `any` / `unknown` / `never` / `null` / `undefined`
//! 2. `number` / `bigint` / `boolean` / `string`
//! 3. boolean literals (before anything that could treat them as `boolean`)
//! 4. type references (unwrapped before generic object handling)
//! 5. type parameters
//! 6. structural object-like kinds: tuple, then array, then binary
//!    buffers / numeric views, then plain object shapes
//! 7. string / number literals
//! 8. unions, then intersections
//! 9. `object`
//! 10. `keyof`
//! 11. indexed access
//!
//! Anything else (and ids unknown to the interner) goes to
//! [`visit_unsupported`](TypeVisitor::visit_unsupported).

use crate::def::DefId;
use crate::intern::TypeInterner;
use crate::types::*;

/// Visitor over interned type descriptors.
pub trait TypeVisitor: Sized {
    /// The output type produced by visiting.
    type Output;

    // =========================================================================
    // Leaves
    // =========================================================================

    /// `any`, `unknown`, `never`, `null`, `undefined`.
    fn visit_special(&mut self, type_id: TypeId, kind: IntrinsicKind) -> Self::Output;

    /// `number`, `bigint`, `boolean`, `string`.
    fn visit_primitive(&mut self, type_id: TypeId, kind: IntrinsicKind) -> Self::Output;

    /// `true` / `false`.
    fn visit_boolean_literal(&mut self, type_id: TypeId, value: bool) -> Self::Output;

    /// String or number literal.
    fn visit_literal(&mut self, type_id: TypeId, value: &LiteralValue) -> Self::Output;

    // =========================================================================
    // Generics
    // =========================================================================

    /// `Target<args...>`.
    fn visit_reference(&mut self, type_id: TypeId, target: DefId, args: &[TypeId])
    -> Self::Output;

    /// A bare type parameter.
    fn visit_type_parameter(&mut self, type_id: TypeId, param: TypeParamId) -> Self::Output;

    // =========================================================================
    // Structural kinds
    // =========================================================================

    fn visit_tuple(&mut self, type_id: TypeId, shape: &TupleShape) -> Self::Output;

    fn visit_array(&mut self, type_id: TypeId, element: TypeId) -> Self::Output;

    fn visit_buffer(&mut self, type_id: TypeId) -> Self::Output;

    fn visit_numeric_view(&mut self, type_id: TypeId, kind: ViewKind) -> Self::Output;

    fn visit_object(&mut self, type_id: TypeId, shape: &ObjectShape) -> Self::Output;

    fn visit_union(&mut self, type_id: TypeId, members: &[TypeId]) -> Self::Output;

    fn visit_intersection(&mut self, type_id: TypeId, members: &[TypeId]) -> Self::Output;

    /// The `object` keyword.
    fn visit_non_primitive(&mut self, type_id: TypeId) -> Self::Output;

    // =========================================================================
    // Type operators
    // =========================================================================

    fn visit_keyof(&mut self, type_id: TypeId, operand: TypeId) -> Self::Output;

    fn visit_index_access(&mut self, type_id: TypeId, object: TypeId, index: TypeId)
    -> Self::Output;

    /// Descriptor the visitor has no strategy for.
    fn visit_unsupported(&mut self, type_id: TypeId, data: Option<&TypeData>) -> Self::Output;

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Visit a type by dispatching to the appropriate method.
    fn visit_type(&mut self, types: &TypeInterner, type_id: TypeId) -> Self::Output {
        let Some(data) = types.lookup(type_id) else {
            return self.visit_unsupported(type_id, None);
        };

        match data {
            TypeData::Intrinsic(kind) if kind.is_special() => self.visit_special(type_id, *kind),
            TypeData::Intrinsic(kind) if kind.is_primitive() => {
                self.visit_primitive(type_id, *kind)
            }
            TypeData::BooleanLiteral(value) => self.visit_boolean_literal(type_id, *value),
            TypeData::Reference { target, args } => self.visit_reference(type_id, *target, args),
            TypeData::TypeParameter(param) => self.visit_type_parameter(type_id, *param),
            TypeData::Tuple(shape) => self.visit_tuple(type_id, shape),
            TypeData::Array(element) => self.visit_array(type_id, *element),
            TypeData::Buffer => self.visit_buffer(type_id),
            TypeData::NumericView(kind) => self.visit_numeric_view(type_id, *kind),
            TypeData::Object(shape) => self.visit_object(type_id, shape),
            TypeData::Literal(value) => self.visit_literal(type_id, value),
            TypeData::Union(members) => self.visit_union(type_id, members),
            TypeData::Intersection(members) => self.visit_intersection(type_id, members),
            TypeData::Intrinsic(IntrinsicKind::Object) => self.visit_non_primitive(type_id),
            TypeData::KeyOf(operand) => self.visit_keyof(type_id, *operand),
            TypeData::IndexAccess { object, index } => {
                self.visit_index_access(type_id, *object, *index)
            }
            TypeData::Intrinsic(_) => self.visit_unsupported(type_id, Some(data)),
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Which `visit_*` method a descriptor dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchKind {
    Special,
    Primitive,
    BooleanLiteral,
    Reference,
    TypeParameter,
    Tuple,
    Array,
    Buffer,
    NumericView,
    Object,
    Literal,
    Union,
    Intersection,
    NonPrimitive,
    KeyOf,
    IndexAccess,
    Unsupported,
}

/// Visitor that reports the dispatch classification of a type.
pub struct DispatchKindVisitor;

impl TypeVisitor for DispatchKindVisitor {
    type Output = DispatchKind;

    fn visit_special(&mut self, _: TypeId, _: IntrinsicKind) -> DispatchKind {
        DispatchKind::Special
    }
    fn visit_primitive(&mut self, _: TypeId, _: IntrinsicKind) -> DispatchKind {
        DispatchKind::Primitive
    }
    fn visit_boolean_literal(&mut self, _: TypeId, _: bool) -> DispatchKind {
        DispatchKind::BooleanLiteral
    }
    fn visit_literal(&mut self, _: TypeId, _: &LiteralValue) -> DispatchKind {
        DispatchKind::Literal
    }
    fn visit_reference(&mut self, _: TypeId, _: DefId, _: &[TypeId]) -> DispatchKind {
        DispatchKind::Reference
    }
    fn visit_type_parameter(&mut self, _: TypeId, _: TypeParamId) -> DispatchKind {
        DispatchKind::TypeParameter
    }
    fn visit_tuple(&mut self, _: TypeId, _: &TupleShape) -> DispatchKind {
        DispatchKind::Tuple
    }
    fn visit_array(&mut self, _: TypeId, _: TypeId) -> DispatchKind {
        DispatchKind::Array
    }
    fn visit_buffer(&mut self, _: TypeId) -> DispatchKind {
        DispatchKind::Buffer
    }
    fn visit_numeric_view(&mut self, _: TypeId, _: ViewKind) -> DispatchKind {
        DispatchKind::NumericView
    }
    fn visit_object(&mut self, _: TypeId, _: &ObjectShape) -> DispatchKind {
        DispatchKind::Object
    }
    fn visit_union(&mut self, _: TypeId, _: &[TypeId]) -> DispatchKind {
        DispatchKind::Union
    }
    fn visit_intersection(&mut self, _: TypeId, _: &[TypeId]) -> DispatchKind {
        DispatchKind::Intersection
    }
    fn visit_non_primitive(&mut self, _: TypeId) -> DispatchKind {
        DispatchKind::NonPrimitive
    }
    fn visit_keyof(&mut self, _: TypeId, _: TypeId) -> DispatchKind {
        DispatchKind::KeyOf
    }
    fn visit_index_access(&mut self, _: TypeId, _: TypeId, _: TypeId) -> DispatchKind {
        DispatchKind::IndexAccess
    }
    fn visit_unsupported(&mut self, _: TypeId, _: Option<&TypeData>) -> DispatchKind {
        DispatchKind::Unsupported
    }
}

/// Classify a type by the visitor method it dispatches to.
pub fn dispatch_kind(types: &TypeInterner, type_id: TypeId) -> DispatchKind {
    DispatchKindVisitor.visit_type(types, type_id)
}

#[cfg(test)]
#[path = "../tests/visitor_tests.rs"]
mod tests;
