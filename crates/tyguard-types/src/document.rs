//! JSON type documents.
//!
//! A type document is the declarative input format for descriptors produced
//! outside this workspace (a TypeScript front end, a build step, a test
//! fixture). Lowering turns it into interned descriptors:
//!
//! ```json
//! {
//!   "definitions": [
//!     {
//!       "name": "Box",
//!       "typeParameters": [{ "name": "T" }],
//!       "body": {
//!         "kind": "object",
//!         "properties": [{ "name": "value", "type": { "kind": "typeParameter", "name": "T" } }]
//!       }
//!     }
//!   ],
//!   "root": { "kind": "reference", "target": "Box", "arguments": [{ "kind": "number" }] }
//! }
//! ```
//!
//! Every definition is declared before any body is lowered, so bodies may
//! refer to themselves, to each other, and to definitions listed later.

use crate::def::DefId;
use crate::intern::TypeInterner;
use crate::types::*;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

// =============================================================================
// Document schema
// =============================================================================

/// Top-level document: named definitions plus the root type to validate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDocument {
    #[serde(default)]
    pub definitions: Vec<DefinitionDecl>,
    pub root: TypeExpr,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionDecl {
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<TypeParamDecl>,
    /// `extends` clauses; each must be a `reference`.
    #[serde(default)]
    pub bases: Vec<TypeExpr>,
    pub body: TypeExpr,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParamDecl {
    pub name: String,
    #[serde(default)]
    pub default: Option<TypeExpr>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDecl {
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_expr: Option<TypeExpr>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub method: bool,
    #[serde(default)]
    pub symbol: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleElementDecl {
    #[serde(rename = "type")]
    pub type_expr: TypeExpr,
    #[serde(default)]
    pub optional: bool,
}

/// One type expression, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeExpr {
    Any,
    Unknown,
    Never,
    Null,
    Undefined,
    Number,
    #[serde(rename = "bigint")]
    BigInt,
    Boolean,
    String,
    Symbol,
    /// The `object` keyword.
    NonPrimitive,
    Buffer,
    StringLiteral {
        value: String,
    },
    NumberLiteral {
        value: f64,
    },
    BooleanLiteral {
        value: bool,
    },
    Array {
        element: Box<TypeExpr>,
    },
    Tuple {
        elements: Vec<TupleElementDecl>,
    },
    Object {
        #[serde(default)]
        properties: Vec<PropertyDecl>,
        #[serde(default, rename = "stringIndex")]
        string_index: Option<Box<TypeExpr>>,
    },
    Union {
        members: Vec<TypeExpr>,
    },
    Intersection {
        members: Vec<TypeExpr>,
    },
    Reference {
        target: String,
        #[serde(default)]
        arguments: Vec<TypeExpr>,
    },
    TypeParameter {
        name: String,
    },
    IndexedAccess {
        object: Box<TypeExpr>,
        index: Box<TypeExpr>,
    },
    Keyof {
        operand: Box<TypeExpr>,
    },
    NumericView {
        view: ViewKind,
    },
}

// =============================================================================
// Errors
// =============================================================================

/// Failure to parse or lower a type document.
#[derive(Debug)]
pub enum DocumentError {
    /// The JSON text does not match the document schema.
    Parse(serde_json::Error),
    /// Two definitions share a name.
    DuplicateDefinition(String),
    /// A `reference` names a definition that does not exist.
    UnknownDefinition(String),
    /// A `typeParameter` is not declared by the enclosing definition.
    UnknownTypeParameter(String),
    /// A reference passes more arguments than the target declares.
    TooManyTypeArguments {
        target: String,
        expected: usize,
        found: usize,
    },
    /// A base clause that is not a `reference`.
    InvalidBase { definition: String },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid type document: {err}"),
            Self::DuplicateDefinition(name) => write!(f, "duplicate definition '{name}'"),
            Self::UnknownDefinition(name) => write!(f, "reference to unknown definition '{name}'"),
            Self::UnknownTypeParameter(name) => {
                write!(f, "type parameter '{name}' is not declared in this scope")
            }
            Self::TooManyTypeArguments {
                target,
                expected,
                found,
            } => write!(
                f,
                "'{target}' declares {expected} type parameter(s) but {found} argument(s) were given"
            ),
            Self::InvalidBase { definition } => {
                write!(f, "base of '{definition}' must be a reference")
            }
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

// =============================================================================
// Lowering
// =============================================================================

impl TypeDocument {
    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Lower every definition and the root into `types`, returning the root id.
    pub fn lower(&self, types: &mut TypeInterner) -> Result<TypeId, DocumentError> {
        DocumentLowering::new(types).lower_document(self)
    }
}

/// Parse and lower a JSON document in one step.
pub fn lower_json(types: &mut TypeInterner, text: &str) -> Result<TypeId, DocumentError> {
    TypeDocument::from_json(text)?.lower(types)
}

struct DocumentLowering<'a> {
    types: &'a mut TypeInterner,
    definitions: FxHashMap<String, DefId>,
    arity: FxHashMap<DefId, usize>,
}

type Scope = FxHashMap<String, TypeId>;

impl<'a> DocumentLowering<'a> {
    fn new(types: &'a mut TypeInterner) -> Self {
        Self {
            types,
            definitions: FxHashMap::default(),
            arity: FxHashMap::default(),
        }
    }

    fn lower_document(mut self, document: &TypeDocument) -> Result<TypeId, DocumentError> {
        // Pass 1: declare every definition with its parameters.
        let mut scopes = Vec::with_capacity(document.definitions.len());
        for decl in &document.definitions {
            if self.definitions.contains_key(&decl.name) {
                return Err(DocumentError::DuplicateDefinition(decl.name.clone()));
            }
            let mut scope = Scope::default();
            let mut params = Vec::with_capacity(decl.type_parameters.len());
            for param in &decl.type_parameters {
                let (id, type_id) = self.types.type_param(param.name.clone());
                scope.insert(param.name.clone(), type_id);
                params.push(id);
            }
            let def = self.types.declare(decl.name.clone(), params.iter().copied());
            self.definitions.insert(decl.name.clone(), def);
            self.arity.insert(def, params.len());
            scopes.push((def, params, scope));
        }

        // Pass 2: defaults, bases and bodies.
        for (decl, (def, params, scope)) in document.definitions.iter().zip(&scopes) {
            for (param_decl, &param) in decl.type_parameters.iter().zip(params) {
                if let Some(default) = &param_decl.default {
                    let default = self.lower_type(default, scope)?;
                    self.types.set_type_param_default(param, default);
                }
            }
            for base in &decl.bases {
                if !matches!(base, TypeExpr::Reference { .. }) {
                    return Err(DocumentError::InvalidBase {
                        definition: decl.name.clone(),
                    });
                }
                let base = self.lower_type(base, scope)?;
                self.types.add_base(*def, base);
            }
            let body = self.lower_type(&decl.body, scope)?;
            self.types.define(*def, body);
        }

        let root = self.lower_type(&document.root, &Scope::default())?;
        debug!(
            definitions = document.definitions.len(),
            root = root.0,
            "lowered type document"
        );
        Ok(root)
    }

    fn lower_all(&mut self, exprs: &[TypeExpr], scope: &Scope) -> Result<Vec<TypeId>, DocumentError> {
        exprs.iter().map(|expr| self.lower_type(expr, scope)).collect()
    }

    fn lower_type(&mut self, expr: &TypeExpr, scope: &Scope) -> Result<TypeId, DocumentError> {
        let id = match expr {
            TypeExpr::Any => TypeId::ANY,
            TypeExpr::Unknown => TypeId::UNKNOWN,
            TypeExpr::Never => TypeId::NEVER,
            TypeExpr::Null => TypeId::NULL,
            TypeExpr::Undefined => TypeId::UNDEFINED,
            TypeExpr::Number => TypeId::NUMBER,
            TypeExpr::BigInt => TypeId::BIGINT,
            TypeExpr::Boolean => TypeId::BOOLEAN,
            TypeExpr::String => TypeId::STRING,
            TypeExpr::Symbol => TypeId::SYMBOL,
            TypeExpr::NonPrimitive => TypeId::OBJECT,
            TypeExpr::Buffer => TypeId::BUFFER,
            TypeExpr::StringLiteral { value } => self.types.literal_string(value.clone()),
            TypeExpr::NumberLiteral { value } => self.types.literal_number(*value),
            TypeExpr::BooleanLiteral { value } => self.types.literal_boolean(*value),
            TypeExpr::Array { element } => {
                let element = self.lower_type(element, scope)?;
                self.types.array(element)
            }
            TypeExpr::Tuple { elements } => {
                let mut lowered = Vec::with_capacity(elements.len());
                for element in elements {
                    lowered.push(TupleElement {
                        type_id: self.lower_type(&element.type_expr, scope)?,
                        optional: element.optional,
                    });
                }
                self.types.tuple(lowered)
            }
            TypeExpr::Object {
                properties,
                string_index,
            } => {
                let mut lowered = Vec::with_capacity(properties.len());
                for prop in properties {
                    let type_id = match &prop.type_expr {
                        Some(expr) => Some(self.lower_type(expr, scope)?),
                        None => None,
                    };
                    lowered.push(PropertyInfo {
                        name: prop.name.clone(),
                        type_id,
                        optional: prop.optional,
                        is_method: prop.method,
                        is_symbol_like: prop.symbol,
                    });
                }
                let string_index = match string_index {
                    Some(expr) => Some(self.lower_type(expr, scope)?),
                    None => None,
                };
                self.types.object_with_index(ObjectShape {
                    properties: lowered,
                    string_index,
                })
            }
            TypeExpr::Union { members } => {
                let members = self.lower_all(members, scope)?;
                self.types.union(members)
            }
            TypeExpr::Intersection { members } => {
                let members = self.lower_all(members, scope)?;
                self.types.intersection(members)
            }
            TypeExpr::Reference { target, arguments } => {
                let def = *self
                    .definitions
                    .get(target)
                    .ok_or_else(|| DocumentError::UnknownDefinition(target.clone()))?;
                let expected = self.arity.get(&def).copied().unwrap_or(0);
                if arguments.len() > expected {
                    return Err(DocumentError::TooManyTypeArguments {
                        target: target.clone(),
                        expected,
                        found: arguments.len(),
                    });
                }
                let args = self.lower_all(arguments, scope)?;
                self.types.reference(def, args)
            }
            TypeExpr::TypeParameter { name } => *scope
                .get(name)
                .ok_or_else(|| DocumentError::UnknownTypeParameter(name.clone()))?,
            TypeExpr::IndexedAccess { object, index } => {
                let object = self.lower_type(object, scope)?;
                let index = self.lower_type(index, scope)?;
                self.types.index_access(object, index)
            }
            TypeExpr::Keyof { operand } => {
                let operand = self.lower_type(operand, scope)?;
                self.types.keyof(operand)
            }
            TypeExpr::NumericView { view } => self.types.numeric_view(*view),
        };
        Ok(id)
    }
}

#[cfg(test)]
#[path = "../tests/document_tests.rs"]
mod tests;
