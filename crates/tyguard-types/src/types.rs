//! Type descriptor representation.
//!
//! A `TypeData` is one node of a structural type graph. Nodes are interned in
//! a [`TypeInterner`](crate::TypeInterner) and referred to by `TypeId`, so
//! child positions are plain `u32` handles and structurally identical
//! descriptors share one id.
//!
//! Named (and possibly generic, possibly self-referential) types are not
//! inlined into the graph: a `TypeData::Reference` points at a
//! [`Definition`](crate::def::Definition) by `DefId`, and the definition's
//! body is looked up only when a consumer decides to unfold it.

use crate::def::DefId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

// =============================================================================
// TypeId
// =============================================================================

/// Handle to an interned type descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    // Pre-registered descriptors. `TypeInterner::new()` interns these in
    // exactly this order.
    pub const ANY: TypeId = TypeId(0);
    pub const UNKNOWN: TypeId = TypeId(1);
    pub const NEVER: TypeId = TypeId(2);
    pub const NULL: TypeId = TypeId(3);
    pub const UNDEFINED: TypeId = TypeId(4);
    pub const NUMBER: TypeId = TypeId(5);
    pub const BIGINT: TypeId = TypeId(6);
    pub const BOOLEAN: TypeId = TypeId(7);
    pub const STRING: TypeId = TypeId(8);
    /// The `object` keyword: any non-primitive value.
    pub const OBJECT: TypeId = TypeId(9);
    pub const SYMBOL: TypeId = TypeId(10);
    pub const BUFFER: TypeId = TypeId(11);
    pub const TRUE: TypeId = TypeId(12);
    pub const FALSE: TypeId = TypeId(13);

    /// Number of pre-registered descriptors.
    pub const FIRST_USER: u32 = 14;

    /// Whether this id is one of the pre-registered descriptors.
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

// =============================================================================
// Intrinsics and literals
// =============================================================================

/// Keyword types that carry no structure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Any,
    Unknown,
    Never,
    Null,
    Undefined,
    Number,
    BigInt,
    Boolean,
    String,
    /// `object`: everything that is not a primitive.
    Object,
    /// `symbol` has no structural runtime check and is rejected by the compiler.
    Symbol,
}

impl IntrinsicKind {
    /// Keyword spelling, as it appears in TypeScript source.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Never => "never",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Object => "object",
            Self::Symbol => "symbol",
        }
    }

    /// `any`, `unknown`, `never`, `null`, `undefined`.
    pub const fn is_special(self) -> bool {
        matches!(
            self,
            Self::Any | Self::Unknown | Self::Never | Self::Null | Self::Undefined
        )
    }

    /// `number`, `bigint`, `boolean`, `string`.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Number | Self::BigInt | Self::Boolean | Self::String
        )
    }
}

/// `f64` with bitwise equality and hashing, so number literals can be interned.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for OrderedFloat {}

impl Hash for OrderedFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for OrderedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_number(self.0))
    }
}

/// Render a number the way JavaScript's `String(n)` does for the common cases.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i128)
    } else {
        format!("{value}")
    }
}

/// Value of a string or number literal type.
///
/// Boolean literal types are deliberately not a `LiteralValue`: they have
/// their own `TypeData::BooleanLiteral` variant so that `true`/`false` are
/// never compiled through the generic literal branch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(String),
    Number(OrderedFloat),
}

// =============================================================================
// Numeric views
// =============================================================================

/// Element kind of a typed numeric view over binary memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    #[serde(rename = "Int8Array")]
    Int8,
    #[serde(rename = "Uint8Array")]
    Uint8,
    #[serde(rename = "Uint8ClampedArray")]
    Uint8Clamped,
    #[serde(rename = "Int16Array")]
    Int16,
    #[serde(rename = "Uint16Array")]
    Uint16,
    #[serde(rename = "Int32Array")]
    Int32,
    #[serde(rename = "Uint32Array")]
    Uint32,
    #[serde(rename = "Float32Array")]
    Float32,
    #[serde(rename = "Float64Array")]
    Float64,
    #[serde(rename = "BigInt64Array")]
    BigInt64,
    #[serde(rename = "BigUint64Array")]
    BigUint64,
}

impl ViewKind {
    pub const ALL: [ViewKind; 11] = [
        Self::Int8,
        Self::Uint8,
        Self::Uint8Clamped,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Float32,
        Self::Float64,
        Self::BigInt64,
        Self::BigUint64,
    ];

    /// Runtime constructor name, e.g. `"Int8Array"`.
    pub const fn constructor_name(self) -> &'static str {
        match self {
            Self::Int8 => "Int8Array",
            Self::Uint8 => "Uint8Array",
            Self::Uint8Clamped => "Uint8ClampedArray",
            Self::Int16 => "Int16Array",
            Self::Uint16 => "Uint16Array",
            Self::Int32 => "Int32Array",
            Self::Uint32 => "Uint32Array",
            Self::Float32 => "Float32Array",
            Self::Float64 => "Float64Array",
            Self::BigInt64 => "BigInt64Array",
            Self::BigUint64 => "BigUint64Array",
        }
    }

    /// Size of one element in bytes.
    pub const fn element_size(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 | Self::Uint8Clamped => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Float64 | Self::BigInt64 | Self::BigUint64 => 8,
        }
    }

    /// Inverse of [`constructor_name`](Self::constructor_name).
    pub fn from_constructor_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.constructor_name() == name)
    }
}

// =============================================================================
// Structural shapes
// =============================================================================

/// One member of an object shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub name: String,
    /// Absent only for methods whose signature is not checked.
    pub type_id: Option<TypeId>,
    pub optional: bool,
    pub is_method: bool,
    /// Symbol-keyed members (`[Symbol.iterator]`) have no string key to check.
    pub is_symbol_like: bool,
}

impl PropertyInfo {
    /// A required data property.
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id: Some(type_id),
            optional: false,
            is_method: false,
            is_symbol_like: false,
        }
    }

    /// An optional data property (`name?: T`).
    pub fn opt(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            optional: true,
            ..Self::new(name, type_id)
        }
    }

    /// A method member (`name(): void`), with no checked signature.
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: None,
            optional: false,
            is_method: true,
            is_symbol_like: false,
        }
    }
}

/// Properties plus an optional string index signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ObjectShape {
    pub properties: Vec<PropertyInfo>,
    /// Value type of `[key: string]: T`.
    pub string_index: Option<TypeId>,
}

impl ObjectShape {
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|prop| prop.name == name)
    }
}

/// One position of a tuple type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TupleElement {
    pub type_id: TypeId,
    pub optional: bool,
}

impl TupleElement {
    pub const fn required(type_id: TypeId) -> Self {
        Self {
            type_id,
            optional: false,
        }
    }

    pub const fn optional(type_id: TypeId) -> Self {
        Self {
            type_id,
            optional: true,
        }
    }
}

/// Fixed-arity tuple with a contiguous optional tail.
///
/// Invariant: `min_length <= elements.len()`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TupleShape {
    pub elements: Vec<TupleElement>,
    pub min_length: usize,
}

impl TupleShape {
    /// Build a shape whose minimum length is the first optional position
    /// scanning left to right (or the full length when nothing is optional).
    pub fn new(elements: Vec<TupleElement>) -> Self {
        let min_length = elements
            .iter()
            .position(|element| element.optional)
            .unwrap_or(elements.len());
        Self {
            elements,
            min_length,
        }
    }

    pub fn max_length(&self) -> usize {
        self.elements.len()
    }
}

// =============================================================================
// Type parameters
// =============================================================================

/// Identity of a declared type parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeParamId(pub u32);

/// Declared type parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamInfo {
    pub name: String,
    /// `T = Default`; used when no instantiation binds the parameter.
    pub default: Option<TypeId>,
}

// =============================================================================
// TypeData
// =============================================================================

/// Structural type descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// Keyword type (`any`, `number`, `object`, ...).
    Intrinsic(IntrinsicKind),

    /// String or number literal type.
    Literal(LiteralValue),

    /// `true` or `false`.
    BooleanLiteral(bool),

    /// Homogeneous `T[]`.
    Array(TypeId),

    /// `[A, B, C?]`.
    Tuple(TupleShape),

    /// `{ a: A; b?: B; [key: string]: C }`.
    Object(ObjectShape),

    /// `A | B`, flattened and deduplicated, at least two members.
    Union(Vec<TypeId>),

    /// `A & B`, flattened and deduplicated, at least two members.
    Intersection(Vec<TypeId>),

    /// Named type applied to arguments: `Box<number>`, or `Node` with none.
    Reference { target: DefId, args: Vec<TypeId> },

    /// Generic type variable.
    TypeParameter(TypeParamId),

    /// `T[K]`.
    IndexAccess { object: TypeId, index: TypeId },

    /// `keyof T`.
    KeyOf(TypeId),

    /// Node `Buffer`.
    Buffer,

    /// `Int8Array`, `Float64Array`, ...
    NumericView(ViewKind),
}

impl TypeData {
    /// Short kind label used in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Intrinsic(kind) => kind.as_str(),
            Self::Literal(LiteralValue::String(_)) => "string literal",
            Self::Literal(LiteralValue::Number(_)) => "number literal",
            Self::BooleanLiteral(_) => "boolean literal",
            Self::Array(_) => "array",
            Self::Tuple(_) => "tuple",
            Self::Object(_) => "object literal",
            Self::Union(_) => "union",
            Self::Intersection(_) => "intersection",
            Self::Reference { .. } => "type reference",
            Self::TypeParameter(_) => "type parameter",
            Self::IndexAccess { .. } => "indexed access",
            Self::KeyOf(_) => "keyof",
            Self::Buffer => "Buffer",
            Self::NumericView(_) => "numeric view",
        }
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
