//! Named type definitions.
//!
//! A `Definition` is the target of a `TypeData::Reference`: an interface,
//! class instance shape or type alias, optionally generic, optionally
//! extending other definitions. Definitions are declared before their body
//! is attached, which is what lets a body mention its own definition:
//!
//! ```text
//! let node = interner.declare("Node", vec![]);
//! let self_ref = interner.reference(node, vec![]);
//! let body = interner.object(vec![PropertyInfo::opt("child", self_ref)]);
//! interner.define(node, body);
//! ```

use crate::types::{TypeId, TypeParamId};
use smallvec::SmallVec;

/// Identifier of a named definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(pub u32);

/// Complete information about a named definition.
#[derive(Clone, Debug)]
pub struct Definition {
    /// Name of the definition (for function names and diagnostics)
    pub name: String,

    /// Declared type parameters, in order
    pub type_params: SmallVec<[TypeParamId; 2]>,

    /// The structural body; `None` until `TypeInterner::define` runs
    pub body: Option<TypeId>,

    /// `extends` clauses: references to parent definitions whose arguments
    /// are written in terms of this definition's own type parameters
    pub bases: Vec<TypeId>,
}

impl Definition {
    pub fn new(name: impl Into<String>, type_params: impl IntoIterator<Item = TypeParamId>) -> Self {
        Self {
            name: name.into(),
            type_params: type_params.into_iter().collect(),
            body: None,
            bases: Vec::new(),
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

/// Storage for definitions, indexed by `DefId`.
#[derive(Clone, Debug, Default)]
pub struct DefinitionStore {
    definitions: Vec<Definition>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: Definition) -> DefId {
        let id = DefId(self.definitions.len() as u32);
        self.definitions.push(definition);
        id
    }

    pub fn get(&self, id: DefId) -> Option<&Definition> {
        self.definitions.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: DefId) -> Option<&mut Definition> {
        self.definitions.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Whether more than one definition carries `name`.
    ///
    /// Canonical function names qualify such definitions with their id so two
    /// unrelated `Options` interfaces never share a predicate.
    pub fn is_name_shared(&self, name: &str) -> bool {
        self.definitions
            .iter()
            .filter(|definition| definition.name == name)
            .nth(1)
            .is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DefId, &Definition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| (DefId(index as u32), definition))
    }
}
