//! Failure tracing for validator evaluation.
//!
//! The evaluator is generic over a [`ValidationTracer`], so one evaluation
//! routine serves both the boolean `is` check and the diagnostic `assert`:
//!
//! - [`FastTracer`]: every hook is a no-op and the closures are never called
//! - [`DiagnosticTracer`]: keeps a path stack and records the failure that
//!   decided the result
//!
//! Path segments, reasons and keys are passed as closures so the fast path
//! never builds them.

use crate::error::{PathSegment, ValidationError};
use tyguard_compiler::Reason;

pub trait ValidationTracer {
    /// A predicate is applied to a sub-value. `segment` is the step from the
    /// current value, or `None` when the predicate checks the same value.
    fn enter(&mut self, segment: impl FnOnce() -> Option<PathSegment>);

    /// The predicate opened by the matching `enter` finished. `expected`
    /// names it.
    fn exit(&mut self, passed: bool, expected: impl FnOnce() -> String);

    /// A leaf predicate with a known reason rejected the current value.
    fn on_reason(&mut self, reason: impl FnOnce() -> Reason);

    /// A key loop met a key outside the declared set.
    fn on_superfluous_key(&mut self, key: impl FnOnce() -> String);

    /// Evaluation is about to stop at the depth limit.
    fn on_depth_exceeded(&mut self);
}

/// Tracer for boolean checks: records nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct FastTracer;

impl ValidationTracer for FastTracer {
    #[inline(always)]
    fn enter(&mut self, _segment: impl FnOnce() -> Option<PathSegment>) {}

    #[inline(always)]
    fn exit(&mut self, _passed: bool, _expected: impl FnOnce() -> String) {}

    #[inline(always)]
    fn on_reason(&mut self, _reason: impl FnOnce() -> Reason) {}

    #[inline(always)]
    fn on_superfluous_key(&mut self, _key: impl FnOnce() -> String) {}

    #[inline(always)]
    fn on_depth_exceeded(&mut self) {}
}

/// Tracer for `assert`: records where and why validation failed.
///
/// The first failure is kept. Once a predicate passes, failures recorded
/// at or below its path belong to an alternative that did not matter (the
/// rejected side of a union) and are dropped again.
#[derive(Debug, Default)]
pub struct DiagnosticTracer {
    path: Vec<PathSegment>,
    /// Whether each open predicate pushed a path segment.
    pushed: Vec<bool>,
    failure: Option<ValidationError>,
}

impl DiagnosticTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded failure, leaving `None` in its place.
    pub fn take_failure(&mut self) -> Option<ValidationError> {
        self.failure.take()
    }

    pub fn failure(&self) -> Option<&ValidationError> {
        self.failure.as_ref()
    }

    pub fn has_failure(&self) -> bool {
        self.failure.is_some()
    }

    fn record(&mut self, failure: impl FnOnce(Vec<PathSegment>) -> ValidationError) {
        if self.failure.is_none() {
            self.failure = Some(failure(self.path.clone()));
        }
    }
}

impl ValidationTracer for DiagnosticTracer {
    fn enter(&mut self, segment: impl FnOnce() -> Option<PathSegment>) {
        match segment() {
            Some(segment) => {
                self.path.push(segment);
                self.pushed.push(true);
            }
            None => self.pushed.push(false),
        }
    }

    fn exit(&mut self, passed: bool, expected: impl FnOnce() -> String) {
        if passed {
            if self
                .failure
                .as_ref()
                .is_some_and(|failure| failure.path.starts_with(&self.path))
            {
                self.failure = None;
            }
        } else {
            self.record(|path| ValidationError::mismatch(path, &expected()));
        }
        if self.pushed.pop() == Some(true) {
            self.path.pop();
        }
    }

    fn on_reason(&mut self, reason: impl FnOnce() -> Reason) {
        self.record(|path| ValidationError::from_reason(path, reason()));
    }

    fn on_superfluous_key(&mut self, key: impl FnOnce() -> String) {
        self.record(|path| ValidationError::superfluous_key(path, key()));
    }

    fn on_depth_exceeded(&mut self) {
        self.failure = Some(ValidationError::depth_exceeded(self.path.clone()));
    }
}

#[cfg(test)]
#[path = "../tests/tracer_tests.rs"]
mod tests;
