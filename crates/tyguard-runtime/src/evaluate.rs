//! Predicate IR interpreter.
//!
//! Evaluates a [`Validator`] against a [`Value`] with JavaScript semantics
//! for the operators the compiler emits. Sub-values are borrowed from the
//! input wherever possible; only computed values (`typeof` tags, lengths,
//! loop variables) are owned.
//!
//! Each call of a named predicate counts one level towards
//! [`MAX_VALIDATION_DEPTH`]; cyclic types over deeply nested input stop
//! there with [`Halt::DepthExceeded`] instead of exhausting the stack.

use crate::error::PathSegment;
use crate::tracer::ValidationTracer;
use crate::value::Value;
use smallvec::{SmallVec, smallvec};
use std::borrow::Cow;
use std::fmt;
use tyguard_common::limits::MAX_VALIDATION_DEPTH;
use tyguard_compiler::{CompareOp, Expr, Stmt, Validator};

/// Evaluation stopped before producing a result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Halt {
    /// Predicate calls nested deeper than [`MAX_VALIDATION_DEPTH`].
    DepthExceeded,
    /// A call named a function the validator does not contain.
    UnknownFunction(String),
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthExceeded => write!(
                f,
                "maximum validation depth exceeded (limit {MAX_VALIDATION_DEPTH})"
            ),
            Self::UnknownFunction(name) => write!(f, "validator has no function `{name}`"),
        }
    }
}

impl std::error::Error for Halt {}

/// Run `validator` on `value`, reporting to `tracer`.
pub fn evaluate<T: ValidationTracer>(
    validator: &Validator,
    value: &Value,
    tracer: &mut T,
) -> Result<bool, Halt> {
    let mut evaluator = Evaluator {
        validator,
        tracer,
        depth: 0,
    };
    let root = validator.root();
    evaluator.tracer.enter(|| None);
    let passed = evaluator.invoke(root, Cow::Borrowed(value))?;
    evaluator.tracer.exit(passed, || root.to_string());
    Ok(passed)
}

/// Variables of one predicate invocation.
struct Frame<'f, 'v> {
    parameter: &'f str,
    /// The value the innermost (inlined) predicate is checking; `None` is
    /// the parameter itself.
    subject: Option<&'f Expr>,
    bindings: SmallVec<[(&'f str, Cow<'v, Value>); 4]>,
}

impl<'v> Frame<'_, 'v> {
    fn lookup(&self, name: &str) -> Option<&Cow<'v, Value>> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| value)
    }

    fn is_subject(&self, expr: &Expr) -> bool {
        match self.subject {
            Some(subject) => subject == expr,
            None => matches!(expr, Expr::Var(name) if name == self.parameter),
        }
    }

    /// Path step from the current subject to `argument`.
    fn segment(&self, argument: &Expr) -> Option<PathSegment> {
        match argument {
            Expr::Member { object, key } if self.is_subject(object) => {
                Some(PathSegment::Key(key.clone()))
            }
            Expr::Index { object, index } if self.is_subject(object) => match &**index {
                Expr::Number(number) => Some(index_segment(number.0)),
                Expr::Str(key) => Some(PathSegment::Key(key.clone())),
                Expr::Var(name) => match self.lookup(name).map(|value| &**value) {
                    Some(Value::Number(number)) => Some(index_segment(*number)),
                    Some(Value::String(key)) => Some(PathSegment::Key(key.clone())),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        }
    }
}

fn index_segment(number: f64) -> PathSegment {
    if number >= 0.0 && number.fract() == 0.0 {
        PathSegment::Index(number as usize)
    } else {
        PathSegment::Key(tyguard_types::format_number(number))
    }
}

struct Evaluator<'f, 't, T> {
    validator: &'f Validator,
    tracer: &'t mut T,
    depth: u32,
}

impl<'f, T: ValidationTracer> Evaluator<'f, '_, T> {
    fn invoke<'v>(&mut self, name: &str, argument: Cow<'v, Value>) -> Result<bool, Halt> {
        if self.depth >= MAX_VALIDATION_DEPTH {
            self.tracer.on_depth_exceeded();
            return Err(Halt::DepthExceeded);
        }
        let validator = self.validator;
        let function = validator
            .function(name)
            .ok_or_else(|| Halt::UnknownFunction(name.to_string()))?;

        let mut frame = Frame {
            parameter: &function.parameter_name,
            subject: None,
            bindings: smallvec![(function.parameter_name.as_str(), argument)],
        };
        self.depth += 1;
        let result = self.block(&function.body, &mut frame);
        self.depth -= 1;

        // Falling off the end returns `undefined`.
        let passed = result?.unwrap_or(false);
        if !passed {
            if let Some(reason) = &function.reason {
                self.tracer.on_reason(|| reason.clone());
            }
        }
        Ok(passed)
    }

    fn block<'v>(
        &mut self,
        stmts: &'f [Stmt],
        frame: &mut Frame<'f, 'v>,
    ) -> Result<Option<bool>, Halt> {
        for stmt in stmts {
            if let Some(returned) = self.stmt(stmt, frame)? {
                return Ok(Some(returned));
            }
        }
        Ok(None)
    }

    fn stmt<'v>(&mut self, stmt: &'f Stmt, frame: &mut Frame<'f, 'v>) -> Result<Option<bool>, Halt> {
        match stmt {
            Stmt::Return(expr) => Ok(Some(self.truthy(expr, frame)?)),
            Stmt::If { condition, then } => {
                if self.truthy(condition, frame)? {
                    self.block(then, frame)
                } else {
                    Ok(None)
                }
            }
            Stmt::ForIndex { index, array, body } => {
                let length = self.eval(array, frame)?.length().unwrap_or(0);
                for position in 0..length {
                    frame
                        .bindings
                        .push((index.as_str(), Cow::Owned(Value::Number(position as f64))));
                    let result = self.block(body, frame);
                    frame.bindings.pop();
                    if let Some(returned) = result? {
                        return Ok(Some(returned));
                    }
                }
                Ok(None)
            }
            Stmt::ForKeys { key, object, body } => {
                let object = self.eval(object, frame)?;
                for name in object.own_keys() {
                    frame
                        .bindings
                        .push((key.as_str(), Cow::Owned(Value::String(name.into_owned()))));
                    let result = self.block(body, frame);
                    frame.bindings.pop();
                    if let Some(returned) = result? {
                        return Ok(Some(returned));
                    }
                }
                Ok(None)
            }
        }
    }

    fn truthy<'v>(&mut self, expr: &'f Expr, frame: &mut Frame<'f, 'v>) -> Result<bool, Halt> {
        Ok(self.eval(expr, frame)?.is_truthy())
    }

    fn eval<'v>(
        &mut self,
        expr: &'f Expr,
        frame: &mut Frame<'f, 'v>,
    ) -> Result<Cow<'v, Value>, Halt> {
        let value = match expr {
            Expr::Var(name) => {
                return Ok(frame
                    .lookup(name)
                    .cloned()
                    .unwrap_or(Cow::Owned(Value::Undefined)));
            }
            Expr::Undefined => Value::Undefined,
            Expr::Null => Value::Null,
            Expr::Bool(value) => Value::Bool(*value),
            Expr::Number(number) => Value::Number(number.0),
            Expr::Str(text) => Value::String(text.clone()),
            Expr::TypeOf(operand) => Value::string(self.eval(operand, frame)?.type_of()),
            Expr::StrictEq(left, right) => {
                let left = self.eval(left, frame)?;
                Value::Bool(left.strict_equals(&*self.eval(right, frame)?))
            }
            Expr::StrictNe(left, right) => {
                let left = self.eval(left, frame)?;
                Value::Bool(!left.strict_equals(&*self.eval(right, frame)?))
            }
            Expr::Not(operand) => Value::Bool(!self.truthy(operand, frame)?),
            Expr::And(operands) => {
                for operand in operands {
                    if !self.truthy(operand, frame)? {
                        return Ok(Cow::Owned(Value::Bool(false)));
                    }
                }
                Value::Bool(true)
            }
            Expr::Or(operands) => {
                for operand in operands {
                    if self.truthy(operand, frame)? {
                        return Ok(Cow::Owned(Value::Bool(true)));
                    }
                }
                Value::Bool(false)
            }
            Expr::Compare { op, left, right } => {
                let left = self.eval(left, frame)?;
                let right = self.eval(right, frame)?;
                Value::Bool(match (&*left, &*right) {
                    (Value::Number(left), Value::Number(right)) => compare(*op, *left, *right),
                    _ => false,
                })
            }
            Expr::Member { object, key } => {
                return Ok(member(self.eval(object, frame)?, key));
            }
            Expr::Index { object, index } => {
                let object = self.eval(object, frame)?;
                let index = self.eval(index, frame)?;
                return Ok(match &*index {
                    Value::Number(number) => element(object, *number),
                    Value::String(key) => member(object, key),
                    _ => Cow::Owned(Value::Undefined),
                });
            }
            Expr::In { key, object } => {
                let key = self.eval(key, frame)?;
                let object = self.eval(object, frame)?;
                Value::Bool(match &*key {
                    Value::String(key) => object.has_key(key),
                    Value::Number(number) => {
                        object.has_key(&tyguard_types::format_number(*number))
                    }
                    _ => false,
                })
            }
            Expr::Length(operand) => self
                .eval(operand, frame)?
                .length()
                .map_or(Value::Undefined, |length| Value::Number(length as f64)),
            Expr::ConstructorName(operand) => self
                .eval(operand, frame)?
                .constructor_name()
                .map_or(Value::Undefined, Value::string),
            Expr::IsArray(operand) => {
                Value::Bool(matches!(&*self.eval(operand, frame)?, Value::Array(_)))
            }
            Expr::IsBuffer(operand) => {
                Value::Bool(matches!(&*self.eval(operand, frame)?, Value::Buffer(_)))
            }
            Expr::IsArrayBufferView(operand) => {
                Value::Bool(self.eval(operand, frame)?.is_array_buffer_view())
            }
            Expr::OneOf { value, options } => {
                // Only key loops test set membership.
                let value = self.eval(value, frame)?;
                let found = matches!(&*value, Value::String(key) if options.contains(key));
                if !found {
                    self.tracer.on_superfluous_key(|| match &*value {
                        Value::String(key) => key.clone(),
                        other => other.to_string(),
                    });
                }
                Value::Bool(found)
            }
            Expr::Call { function, argument } => {
                let value = self.eval(argument, frame)?;
                self.tracer.enter(|| frame.segment(argument));
                let passed = self.invoke(function, value)?;
                self.tracer.exit(passed, || function.clone());
                Value::Bool(passed)
            }
            Expr::Inlined {
                function,
                reason,
                argument,
                body,
            } => {
                self.tracer.enter(|| frame.segment(argument));
                let saved = frame.subject.replace(&**argument);
                let passed = self.truthy(body, frame);
                frame.subject = saved;
                let passed = passed?;
                if !passed {
                    if let Some(reason) = reason {
                        self.tracer.on_reason(|| reason.clone());
                    }
                }
                self.tracer.exit(passed, || function.clone());
                Value::Bool(passed)
            }
        };
        Ok(Cow::Owned(value))
    }
}

fn compare(op: CompareOp, left: f64, right: f64) -> bool {
    match op {
        CompareOp::Lt => left < right,
        CompareOp::Le => left <= right,
        CompareOp::Gt => left > right,
        CompareOp::Ge => left >= right,
    }
}

fn member<'v>(object: Cow<'v, Value>, key: &str) -> Cow<'v, Value> {
    match object {
        Cow::Borrowed(object) => object.get(key),
        Cow::Owned(object) => Cow::Owned(object.get(key).into_owned()),
    }
}

fn element<'v>(object: Cow<'v, Value>, index: f64) -> Cow<'v, Value> {
    match object {
        Cow::Borrowed(object) => object.get_index(index),
        Cow::Owned(object) => Cow::Owned(object.get_index(index).into_owned()),
    }
}

#[cfg(test)]
#[path = "../tests/evaluate_tests.rs"]
mod tests;
