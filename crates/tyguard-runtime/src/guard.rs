//! `is` / `assert` entry points.

use crate::error::ValidationError;
use crate::evaluate::{Halt, evaluate};
use crate::tracer::{DiagnosticTracer, FastTracer};
use crate::value::Value;
use tracing::{debug, warn};
use tyguard_compiler::Validator;

/// Whether `value` conforms. Input nested beyond the depth limit does not.
pub fn is(validator: &Validator, value: &Value) -> bool {
    match evaluate(validator, value, &mut FastTracer) {
        Ok(passed) => passed,
        Err(halt) => {
            if let Halt::UnknownFunction(name) = &halt {
                warn!(root = validator.root(), function = %name, "validator is not self-contained");
            }
            false
        }
    }
}

/// `Ok(())` when `value` conforms, otherwise the failure that decided it.
pub fn assert(validator: &Validator, value: &Value) -> Result<(), ValidationError> {
    let mut tracer = DiagnosticTracer::new();
    let failure = match evaluate(validator, value, &mut tracer) {
        Ok(true) => return Ok(()),
        Ok(false) => tracer
            .take_failure()
            .unwrap_or_else(|| ValidationError::mismatch(Vec::new(), validator.root())),
        Err(Halt::DepthExceeded) => tracer
            .take_failure()
            .unwrap_or_else(|| ValidationError::depth_exceeded(Vec::new())),
        Err(halt @ Halt::UnknownFunction(_)) => ValidationError {
            message: halt.to_string(),
            path: Vec::new(),
            reason: None,
        },
    };
    debug!(root = validator.root(), message = %failure.message, "validation failed");
    Err(failure)
}

#[cfg(test)]
#[path = "../tests/guard_tests.rs"]
mod tests;
