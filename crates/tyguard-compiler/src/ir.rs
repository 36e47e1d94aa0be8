//! Predicate IR
//!
//! Compiled validators are not strings. Every strategy produces a small tree
//! of statements and expressions over one parameter, and the consumers
//! (the runtime evaluator, the JavaScript printer) walk these trees.
//!
//! # IR Structure
//!
//! A [`CompiledFunction`] has one parameter (always [`PARAM`]) and a body of
//! [`Stmt`]s. Expressions model the handful of JavaScript operations a type
//! guard needs: `typeof`, strict equality, `in`, property and element access,
//! `Array.isArray`, `Buffer.isBuffer`, `ArrayBuffer.isView`, constructor
//! names, lengths, and calls to other compiled functions by name.

use serde::Serialize;
use std::fmt;
use tyguard_types::{OrderedFloat, format_number};

/// Name of the single parameter of every compiled function.
pub const PARAM: &str = "object";

/// Loop variable of [`Stmt::ForIndex`].
pub const INDEX_VAR: &str = "i";

/// Loop variable of [`Stmt::ForKeys`].
pub const KEY_VAR: &str = "key";

// =============================================================================
// Reason
// =============================================================================

/// Why a leaf predicate accepts a value, attached when the leaf function is
/// created so that failures can be explained later.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Reason {
    String,
    Number,
    Boolean,
    BigInt,
    Null,
    Undefined,
    StringLiteral(String),
    NumberLiteral(f64),
    BooleanLiteral(bool),
    NonPrimitive,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("expected a string"),
            Self::Number => f.write_str("expected a number"),
            Self::Boolean => f.write_str("expected a boolean"),
            Self::BigInt => f.write_str("expected a bigint"),
            Self::Null => f.write_str("expected null"),
            Self::Undefined => f.write_str("expected undefined"),
            Self::StringLiteral(value) => write!(f, "expected string {value:?}"),
            Self::NumberLiteral(value) => write!(f, "expected number {}", format_number(*value)),
            Self::BooleanLiteral(value) => write!(f, "expected {value}"),
            Self::NonPrimitive => f.write_str("expected a non-primitive"),
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

/// Numeric comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

/// Predicate expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // =========================================================================
    // Leaves
    // =========================================================================
    /// Variable reference: the parameter or a loop variable.
    Var(String),

    Undefined,
    Null,
    Bool(bool),
    Number(OrderedFloat),
    Str(String),

    // =========================================================================
    // Operators
    // =========================================================================
    /// `typeof value`
    TypeOf(Box<Expr>),

    /// `left === right`
    StrictEq(Box<Expr>, Box<Expr>),

    /// `left !== right`
    StrictNe(Box<Expr>, Box<Expr>),

    /// `!operand`
    Not(Box<Expr>),

    /// `a && b && ...`; empty is `true`.
    And(Vec<Expr>),

    /// `a || b || ...`; empty is `false`.
    Or(Vec<Expr>),

    /// `left op right` on numbers.
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    // =========================================================================
    // Access
    // =========================================================================
    /// `object.key` (or `object["key"]` for non-identifier keys)
    Member { object: Box<Expr>, key: String },

    /// `object[index]`
    Index { object: Box<Expr>, index: Box<Expr> },

    /// `key in object`
    In { key: Box<Expr>, object: Box<Expr> },

    /// `value.length`
    Length(Box<Expr>),

    /// `value.constructor.name`
    ConstructorName(Box<Expr>),

    // =========================================================================
    // Host checks
    // =========================================================================
    /// `Array.isArray(value)`
    IsArray(Box<Expr>),

    /// `Buffer.isBuffer(value)`
    IsBuffer(Box<Expr>),

    /// `ArrayBuffer.isView(value)`
    IsArrayBufferView(Box<Expr>),

    /// Whether a string value is one of a fixed set of keys.
    OneOf { value: Box<Expr>, options: Vec<String> },

    // =========================================================================
    // Calls
    // =========================================================================
    /// Call of a compiled function by registry name.
    Call { function: String, argument: Box<Expr> },

    /// A call whose callee body was substituted in place.
    ///
    /// `body` is the callee's expression with its parameter replaced by
    /// `argument`; evaluating `body` alone is enough. `function`, `reason`
    /// and `argument` are kept for diagnostics.
    Inlined {
        function: String,
        reason: Option<Reason>,
        argument: Box<Expr>,
        body: Box<Expr>,
    },
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// The function parameter.
    pub fn param() -> Self {
        Self::Var(PARAM.to_string())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    pub fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    pub fn type_of(value: Self) -> Self {
        Self::TypeOf(Box::new(value))
    }

    /// `typeof value === tag`
    pub fn type_of_is(value: Self, tag: &str) -> Self {
        Self::strict_eq(Self::type_of(value), Self::string(tag))
    }

    pub fn strict_eq(left: Self, right: Self) -> Self {
        Self::StrictEq(Box::new(left), Box::new(right))
    }

    pub fn strict_ne(left: Self, right: Self) -> Self {
        Self::StrictNe(Box::new(left), Box::new(right))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Self) -> Self {
        Self::Not(Box::new(operand))
    }

    /// Conjunction, collapsing the single-operand case.
    pub fn and(mut operands: Vec<Self>) -> Self {
        if operands.len() == 1 {
            operands.remove(0)
        } else {
            Self::And(operands)
        }
    }

    /// Disjunction, collapsing the single-operand case.
    pub fn or(mut operands: Vec<Self>) -> Self {
        if operands.len() == 1 {
            operands.remove(0)
        } else {
            Self::Or(operands)
        }
    }

    pub fn compare(op: CompareOp, left: Self, right: Self) -> Self {
        Self::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn member(object: Self, key: impl Into<String>) -> Self {
        Self::Member {
            object: Box::new(object),
            key: key.into(),
        }
    }

    pub fn index(object: Self, index: Self) -> Self {
        Self::Index {
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    pub fn has_key(key: impl Into<String>, object: Self) -> Self {
        Self::In {
            key: Box::new(Self::Str(key.into())),
            object: Box::new(object),
        }
    }

    pub fn length(value: Self) -> Self {
        Self::Length(Box::new(value))
    }

    pub fn call(function: impl Into<String>, argument: Self) -> Self {
        Self::Call {
            function: function.into(),
            argument: Box::new(argument),
        }
    }

    /// `typeof value === "object" && value !== null && !Array.isArray(value)`
    pub fn is_plain_object(value: Self) -> Self {
        Self::And(vec![
            Self::type_of_is(value.clone(), "object"),
            Self::strict_ne(value.clone(), Self::Null),
            Self::not(Self::IsArray(Box::new(value))),
        ])
    }

    pub const fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// Whether evaluating this expression can reach a `Call`.
    pub fn has_call(&self) -> bool {
        let mut found = false;
        self.walk(&mut |expr| found |= matches!(expr, Self::Call { .. }));
        found
    }

    /// Whether every variable in this expression is `param`.
    pub fn only_references(&self, param: &str) -> bool {
        let mut only = true;
        self.walk(&mut |expr| {
            if let Self::Var(name) = expr {
                only &= name == param;
            }
        });
        only
    }

    /// Replace every `Var(param)` with `argument`.
    pub fn substitute(&self, param: &str, argument: &Self) -> Self {
        let mut result = self.clone();
        result.walk_mut(&mut |expr| {
            if matches!(expr, Self::Var(name) if name == param) {
                *expr = argument.clone();
                return false;
            }
            true
        });
        result
    }

    /// Pre-order walk over this expression and all sub-expressions.
    pub fn walk(&self, f: &mut impl FnMut(&Self)) {
        f(self);
        match self {
            Self::Var(_)
            | Self::Undefined
            | Self::Null
            | Self::Bool(_)
            | Self::Number(_)
            | Self::Str(_) => {}
            Self::TypeOf(inner)
            | Self::Not(inner)
            | Self::Length(inner)
            | Self::ConstructorName(inner)
            | Self::IsArray(inner)
            | Self::IsBuffer(inner)
            | Self::IsArrayBufferView(inner) => inner.walk(f),
            Self::StrictEq(left, right) | Self::StrictNe(left, right) => {
                left.walk(f);
                right.walk(f);
            }
            Self::Compare { left, right, .. } => {
                left.walk(f);
                right.walk(f);
            }
            Self::And(operands) | Self::Or(operands) => {
                for operand in operands {
                    operand.walk(f);
                }
            }
            Self::Member { object, .. } => object.walk(f),
            Self::Index { object, index } => {
                object.walk(f);
                index.walk(f);
            }
            Self::In { key, object } => {
                key.walk(f);
                object.walk(f);
            }
            Self::OneOf { value, .. } => value.walk(f),
            Self::Call { argument, .. } => argument.walk(f),
            Self::Inlined { argument, body, .. } => {
                argument.walk(f);
                body.walk(f);
            }
        }
    }

    /// Pre-order mutable walk. Returning `false` from `f` skips the children
    /// of the node just visited.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Self) -> bool) {
        if !f(self) {
            return;
        }
        match self {
            Self::Var(_)
            | Self::Undefined
            | Self::Null
            | Self::Bool(_)
            | Self::Number(_)
            | Self::Str(_) => {}
            Self::TypeOf(inner)
            | Self::Not(inner)
            | Self::Length(inner)
            | Self::ConstructorName(inner)
            | Self::IsArray(inner)
            | Self::IsBuffer(inner)
            | Self::IsArrayBufferView(inner) => inner.walk_mut(f),
            Self::StrictEq(left, right) | Self::StrictNe(left, right) => {
                left.walk_mut(f);
                right.walk_mut(f);
            }
            Self::Compare { left, right, .. } => {
                left.walk_mut(f);
                right.walk_mut(f);
            }
            Self::And(operands) | Self::Or(operands) => {
                for operand in operands {
                    operand.walk_mut(f);
                }
            }
            Self::Member { object, .. } => object.walk_mut(f),
            Self::Index { object, index } => {
                object.walk_mut(f);
                index.walk_mut(f);
            }
            Self::In { key, object } => {
                key.walk_mut(f);
                object.walk_mut(f);
            }
            Self::OneOf { value, .. } => value.walk_mut(f),
            Self::Call { argument, .. } => argument.walk_mut(f),
            Self::Inlined { argument, body, .. } => {
                argument.walk_mut(f);
                body.walk_mut(f);
            }
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

/// Predicate statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `return expr;`
    Return(Expr),

    /// `if (condition) { then }`
    If { condition: Expr, then: Vec<Stmt> },

    /// `for (let index = 0; index < array.length; index++) { body }`
    ForIndex {
        index: String,
        array: Expr,
        body: Vec<Stmt>,
    },

    /// `for (const key of Object.keys(object)) { body }`
    ForKeys {
        key: String,
        object: Expr,
        body: Vec<Stmt>,
    },
}

impl Stmt {
    /// `if (!condition) return false;`
    pub fn reject_unless(condition: Expr) -> Self {
        Self::If {
            condition: Expr::not(condition),
            then: vec![Self::Return(Expr::Bool(false))],
        }
    }

    /// Visit every expression in this statement (not descending into them).
    pub fn for_each_expr(&self, f: &mut impl FnMut(&Expr)) {
        match self {
            Self::Return(expr) => f(expr),
            Self::If { condition, then } => {
                f(condition);
                for stmt in then {
                    stmt.for_each_expr(f);
                }
            }
            Self::ForIndex { array, body, .. } => {
                f(array);
                for stmt in body {
                    stmt.for_each_expr(f);
                }
            }
            Self::ForKeys { object, body, .. } => {
                f(object);
                for stmt in body {
                    stmt.for_each_expr(f);
                }
            }
        }
    }

    /// Mutable counterpart of [`for_each_expr`](Self::for_each_expr).
    pub fn for_each_expr_mut(&mut self, f: &mut impl FnMut(&mut Expr)) {
        match self {
            Self::Return(expr) => f(expr),
            Self::If { condition, then } => {
                f(condition);
                for stmt in then {
                    stmt.for_each_expr_mut(f);
                }
            }
            Self::ForIndex { array, body, .. } => {
                f(array);
                for stmt in body {
                    stmt.for_each_expr_mut(f);
                }
            }
            Self::ForKeys { object, body, .. } => {
                f(object);
                for stmt in body {
                    stmt.for_each_expr_mut(f);
                }
            }
        }
    }
}

// =============================================================================
// Functions
// =============================================================================

/// One named predicate of a validator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunction {
    /// Canonical registry name.
    pub name: String,
    pub parameter_name: String,
    pub body: Vec<Stmt>,
    /// Set on leaf predicates.
    pub reason: Option<Reason>,
}

impl CompiledFunction {
    pub fn new(name: impl Into<String>, body: Vec<Stmt>, reason: Option<Reason>) -> Self {
        Self {
            name: name.into(),
            parameter_name: PARAM.to_string(),
            body,
            reason,
        }
    }

    /// The returned expression when the body is a single `return`.
    pub fn single_return(&self) -> Option<&Expr> {
        match self.body.as_slice() {
            [Stmt::Return(expr)] => Some(expr),
            _ => None,
        }
    }

    /// A single side-effect-free `return` over the parameter only.
    pub fn is_trivial(&self) -> bool {
        self.single_return()
            .is_some_and(|expr| !expr.has_call() && expr.only_references(&self.parameter_name))
    }

    /// `return true;`
    pub fn is_always_true(&self) -> bool {
        self.single_return().is_some_and(Expr::is_true)
    }

    /// Names of every function this body calls, in first-occurrence order.
    pub fn callees(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for stmt in &self.body {
            collect_callees(stmt, &mut names);
        }
        let mut callees: Vec<&str> = Vec::with_capacity(names.len());
        for name in names {
            if !callees.contains(&name) {
                callees.push(name);
            }
        }
        callees
    }
}

fn collect_callees<'a>(stmt: &'a Stmt, out: &mut Vec<&'a str>) {
    match stmt {
        Stmt::Return(expr) => collect_expr_callees(expr, out),
        Stmt::If { condition, then } => {
            collect_expr_callees(condition, out);
            for stmt in then {
                collect_callees(stmt, out);
            }
        }
        Stmt::ForIndex { array, body, .. } => {
            collect_expr_callees(array, out);
            for stmt in body {
                collect_callees(stmt, out);
            }
        }
        Stmt::ForKeys { object, body, .. } => {
            collect_expr_callees(object, out);
            for stmt in body {
                collect_callees(stmt, out);
            }
        }
    }
}

fn collect_expr_callees<'a>(expr: &'a Expr, out: &mut Vec<&'a str>) {
    match expr {
        Expr::Call { function, argument } => {
            out.push(function);
            collect_expr_callees(argument, out);
        }
        Expr::Var(_)
        | Expr::Undefined
        | Expr::Null
        | Expr::Bool(_)
        | Expr::Number(_)
        | Expr::Str(_) => {}
        Expr::TypeOf(inner)
        | Expr::Not(inner)
        | Expr::Length(inner)
        | Expr::ConstructorName(inner)
        | Expr::IsArray(inner)
        | Expr::IsBuffer(inner)
        | Expr::IsArrayBufferView(inner) => collect_expr_callees(inner, out),
        Expr::StrictEq(left, right) | Expr::StrictNe(left, right) => {
            collect_expr_callees(left, out);
            collect_expr_callees(right, out);
        }
        Expr::Compare { left, right, .. } => {
            collect_expr_callees(left, out);
            collect_expr_callees(right, out);
        }
        Expr::And(operands) | Expr::Or(operands) => {
            for operand in operands {
                collect_expr_callees(operand, out);
            }
        }
        Expr::Member { object, .. } => collect_expr_callees(object, out),
        Expr::Index { object, index } => {
            collect_expr_callees(object, out);
            collect_expr_callees(index, out);
        }
        Expr::In { key, object } => {
            collect_expr_callees(key, out);
            collect_expr_callees(object, out);
        }
        Expr::OneOf { value, .. } => collect_expr_callees(value, out),
        Expr::Inlined { argument, body, .. } => {
            collect_expr_callees(argument, out);
            collect_expr_callees(body, out);
        }
    }
}

#[cfg(test)]
#[path = "../tests/ir_tests.rs"]
mod tests;
