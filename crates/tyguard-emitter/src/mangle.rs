//! Canonical predicate names to JavaScript identifiers.
//!
//! Canonical names are type expressions (`Array<string>`, `{a?: number}`),
//! so every function gets an `is_`-prefixed identifier built from the
//! name's alphanumeric runs, with a numeric suffix on collision.

use rustc_hash::{FxHashMap, FxHashSet};

const PREFIX: &str = "is_";
const MAX_STEM_LEN: usize = 48;

#[derive(Debug, Default)]
pub struct NameMangler {
    assigned: FxHashMap<String, String>,
    used: FxHashSet<String>,
}

impl NameMangler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier for `name`; the same name always maps to the same
    /// identifier.
    pub fn mangle(&mut self, name: &str) -> String {
        if let Some(identifier) = self.assigned.get(name) {
            return identifier.clone();
        }

        let base = format!("{PREFIX}{}", stem(name));
        let mut identifier = base.clone();
        let mut suffix = 2u32;
        while !self.used.insert(identifier.clone()) {
            identifier = format!("{base}_{suffix}");
            suffix += 1;
        }
        self.assigned.insert(name.to_string(), identifier.clone());
        identifier
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.assigned.get(name).map(String::as_str)
    }
}

fn stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len().min(MAX_STEM_LEN));
    let mut pending_separator = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !stem.is_empty() {
                stem.push('_');
            }
            pending_separator = false;
            stem.push(c);
            if stem.len() >= MAX_STEM_LEN {
                break;
            }
        } else {
            pending_separator = true;
        }
    }
    if stem.is_empty() {
        stem.push_str("anonymous");
    }
    stem
}

#[cfg(test)]
#[path = "../tests/mangle_tests.rs"]
mod tests;
