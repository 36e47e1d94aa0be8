//! Argument validation for function boundaries.
//!
//! A [`ParameterGuards`] holds one validator per guarded argument position
//! and checks a call's arguments before the call proceeds. Positions past
//! the end of the argument list are checked as `undefined`, so a guard
//! compiled with `valueMayBeAbsent` accepts an omitted argument.

use crate::error::ValidationError;
use crate::guard;
use crate::value::Value;
use std::fmt;
use tyguard_compiler::Validator;

/// The first guarded argument that failed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterError {
    pub position: usize,
    pub error: ValidationError,
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "argument {}: {}", self.position, self.error)
    }
}

impl std::error::Error for ParameterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParameterGuards {
    /// Sorted by position; at most one validator per position.
    guards: Vec<(usize, Validator)>,
}

impl ParameterGuards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard argument `position` with `validator`, replacing any earlier
    /// guard for the same position.
    pub fn with(mut self, position: usize, validator: Validator) -> Self {
        match self.guards.binary_search_by_key(&position, |(guarded, _)| *guarded) {
            Ok(existing) => self.guards[existing].1 = validator,
            Err(insert_at) => self.guards.insert(insert_at, (position, validator)),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Check `args` in position order; the lowest failing position wins.
    pub fn check(&self, args: &[Value]) -> Result<(), ParameterError> {
        let absent = Value::Undefined;
        for (position, validator) in &self.guards {
            let argument = args.get(*position).unwrap_or(&absent);
            guard::assert(validator, argument).map_err(|error| ParameterError {
                position: *position,
                error,
            })?;
        }
        Ok(())
    }

    /// Wrap `f` so it only runs on arguments that pass [`check`](Self::check).
    pub fn wrap<F, R>(self, f: F) -> impl Fn(&[Value]) -> Result<R, ParameterError>
    where
        F: Fn(&[Value]) -> R,
    {
        move |args| {
            self.check(args)?;
            Ok(f(args))
        }
    }
}

#[cfg(test)]
#[path = "../tests/params_tests.rs"]
mod tests;
