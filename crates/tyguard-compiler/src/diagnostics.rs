//! Compile-time failures.
//!
//! Every variant is fatal: the compilation that raised it produces no
//! validator at all.

use std::fmt;
use tyguard_types::TypeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A descriptor the compiler has no strategy for (`symbol`, an indexed
    /// access that names no member, ...).
    UnsupportedType { type_id: TypeId, description: String },

    /// A type parameter with no substitution on the stack and no default.
    UnboundTypeParameter { name: String },

    /// An object member the object strategy cannot interpret.
    UnsupportedPropertyDeclaration { property: String },

    /// A method member while `ignoreMethods` is off.
    MethodDisallowed { property: String },

    /// Generic instantiations (or parameter resolution hops) nested deeper
    /// than the configured limit.
    InstantiationTooDeep { name: String, depth: u32 },

    /// A reference to a definition that was declared but never given a body.
    MissingDefinitionBody { name: String },
}

impl CompileError {
    pub(crate) fn unsupported(type_id: TypeId, description: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_id,
            description: description.into(),
        }
    }

    /// Stable short code for the failure kind.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "unsupported-type",
            Self::UnboundTypeParameter { .. } => "unbound-type-parameter",
            Self::UnsupportedPropertyDeclaration { .. } => "unsupported-property-declaration",
            Self::MethodDisallowed { .. } => "method-disallowed",
            Self::InstantiationTooDeep { .. } => "instantiation-too-deep",
            Self::MissingDefinitionBody { .. } => "missing-definition-body",
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType {
                type_id,
                description,
            } => write!(f, "Unsupported type `{description}` (type #{})", type_id.0),
            Self::UnboundTypeParameter { name } => {
                write!(f, "Unbound type parameter `{name}`: no argument and no default")
            }
            Self::UnsupportedPropertyDeclaration { property } => {
                write!(f, "Unsupported declaration of property `{property}`")
            }
            Self::MethodDisallowed { property } => write!(
                f,
                "Encountered method `{property}` while methods are disallowed (set `ignoreMethods` to skip them)"
            ),
            Self::InstantiationTooDeep { name, depth } => write!(
                f,
                "Instantiation of `{name}` is excessively deep (limit {depth})"
            ),
            Self::MissingDefinitionBody { name } => {
                write!(f, "Definition `{name}` has no body")
            }
        }
    }
}

impl std::error::Error for CompileError {}
