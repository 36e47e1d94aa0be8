//! JavaScript printer for compiled validators.
//!
//! Renders a [`Validator`] as one self-contained function expression:
//!
//! ```text
//! (function () {
//!     function is_string(object) {
//!         return typeof object === "string";
//!     }
//!     ...
//!     return function (object) {
//!         return is_root(object);
//!     };
//! })()
//! ```
//!
//! Every compiled function is a hoisted declaration inside the closure, so
//! forward references between mutually recursive predicates are valid.

use crate::mangle::NameMangler;
use tracing::debug;
use tyguard_compiler::{CompiledFunction, Expr, Stmt, Validator};
use tyguard_types::format_number;

/// Binding power of a printed expression, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Or,
    And,
    Equality,
    Relational,
    Unary,
    Member,
    Primary,
}

/// Host guard emitted once when any predicate checks for a Node buffer, so
/// the validator also loads where `Buffer` is not defined.
const BUFFER_PRELUDE: &str =
    "var isBuffer = typeof Buffer === \"undefined\" ? function () { return false; } : Buffer.isBuffer;";

pub struct JsPrinter {
    output: String,
    indent_level: u32,
    indent_str: &'static str,
    names: NameMangler,
}

impl Default for JsPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsPrinter {
    pub fn new() -> Self {
        Self::with_indent("    ")
    }

    pub fn with_indent(indent_str: &'static str) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str,
            names: NameMangler::new(),
        }
    }

    /// Print `validator` and return the JavaScript source.
    pub fn print(mut self, validator: &Validator) -> String {
        for function in validator.functions() {
            self.names.mangle(&function.name);
        }
        let root = self.names.mangle(validator.root());

        self.write("(function () {");
        self.write_line();
        self.increase_indent();

        if uses_buffer(validator) {
            self.write_indent();
            self.write(BUFFER_PRELUDE);
            self.write_line();
        }
        for function in validator.functions() {
            self.emit_function(function);
        }

        self.write_indent();
        self.write("return function (object) {");
        self.write_line();
        self.increase_indent();
        self.write_indent();
        self.write("return ");
        self.write(&root);
        self.write("(object);");
        self.write_line();
        self.decrease_indent();
        self.write_indent();
        self.write("};");
        self.write_line();

        self.decrease_indent();
        self.write("})()");

        debug!(
            functions = validator.len(),
            bytes = self.output.len(),
            "printed validator"
        );
        self.output
    }

    /// Canonical name and JavaScript identifier of every function, in
    /// declaration order.
    pub fn identifiers(validator: &Validator) -> Vec<(String, String)> {
        let mut names = NameMangler::new();
        validator
            .functions()
            .iter()
            .map(|function| (function.name.clone(), names.mangle(&function.name)))
            .collect()
    }

    // =========================================================================
    // Output helpers
    // =========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write a double-quoted JavaScript string literal.
    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{2028}' => self.output.push_str("\\u2028"),
                '\u{2029}' => self.output.push_str("\\u2029"),
                c if c.is_control() => {
                    self.output.push_str(&format!("\\u{:04X}", c as u32));
                }
                _ => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    fn write_line(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    // =========================================================================
    // Functions and statements
    // =========================================================================

    fn emit_function(&mut self, function: &CompiledFunction) {
        let name = self.names.mangle(&function.name);
        self.write_indent();
        self.write("// ");
        self.write(&function.name.replace(['\n', '\r', '\u{2028}', '\u{2029}'], " "));
        self.write_line();
        self.write_indent();
        self.write("function ");
        self.write(&name);
        self.write("(");
        self.write(&function.parameter_name);
        self.write(") {");
        self.write_line();
        self.emit_block(&function.body);
        self.write_indent();
        self.write("}");
        self.write_line();
    }

    fn emit_block(&mut self, body: &[Stmt]) {
        self.increase_indent();
        for stmt in body {
            self.emit_stmt(stmt);
        }
        self.decrease_indent();
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        self.write_indent();
        match stmt {
            Stmt::Return(expr) => {
                self.write("return ");
                self.emit_expr(expr, Precedence::Or);
                self.write(";");
                self.write_line();
            }
            Stmt::If { condition, then } => {
                self.write("if (");
                self.emit_expr(condition, Precedence::Or);
                self.write(")");
                // `if (...) return false;` stays on one line.
                if let [Stmt::Return(expr)] = then.as_slice() {
                    self.write(" return ");
                    self.emit_expr(expr, Precedence::Or);
                    self.write(";");
                    self.write_line();
                } else {
                    self.write(" {");
                    self.write_line();
                    self.emit_block(then);
                    self.write_indent();
                    self.write("}");
                    self.write_line();
                }
            }
            Stmt::ForIndex { index, array, body } => {
                self.write("for (let ");
                self.write(index);
                self.write(" = 0; ");
                self.write(index);
                self.write(" < ");
                self.emit_expr(array, Precedence::Member);
                self.write(".length; ");
                self.write(index);
                self.write("++) {");
                self.write_line();
                self.emit_block(body);
                self.write_indent();
                self.write("}");
                self.write_line();
            }
            Stmt::ForKeys { key, object, body } => {
                self.write("for (const ");
                self.write(key);
                self.write(" of Object.keys(");
                self.emit_expr(object, Precedence::Or);
                self.write(")) {");
                self.write_line();
                self.emit_block(body);
                self.write_indent();
                self.write("}");
                self.write_line();
            }
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Print `expr`, parenthesized if it binds looser than `min`.
    fn emit_expr(&mut self, expr: &Expr, min: Precedence) {
        let precedence = precedence_of(expr);
        let parenthesize = precedence < min;
        if parenthesize {
            self.write("(");
        }
        self.emit_expr_inner(expr);
        if parenthesize {
            self.write(")");
        }
    }

    fn emit_expr_inner(&mut self, expr: &Expr) {
        match expr {
            Expr::Var(name) => self.write(name),
            Expr::Undefined => self.write("undefined"),
            Expr::Null => self.write("null"),
            Expr::Bool(value) => self.write(if *value { "true" } else { "false" }),
            Expr::Number(value) => self.write(&format_number(value.0)),
            Expr::Str(value) => self.write_string(value),
            Expr::TypeOf(operand) => {
                self.write("typeof ");
                self.emit_expr(operand, Precedence::Unary);
            }
            Expr::StrictEq(left, right) => self.emit_binary(left, " === ", right, Precedence::Equality),
            Expr::StrictNe(left, right) => self.emit_binary(left, " !== ", right, Precedence::Equality),
            Expr::Not(operand) => {
                self.write("!");
                self.emit_expr(operand, Precedence::Unary);
            }
            Expr::And(operands) => self.emit_chain(operands, " && ", "true", Precedence::And),
            Expr::Or(operands) => self.emit_chain(operands, " || ", "false", Precedence::Or),
            Expr::Compare { op, left, right } => {
                self.emit_binary(left, &format!(" {} ", op.as_str()), right, Precedence::Relational);
            }
            Expr::Member { object, key } => {
                self.emit_expr(object, Precedence::Member);
                if is_identifier(key) {
                    self.write(".");
                    self.write(key);
                } else {
                    self.write("[");
                    self.write_string(key);
                    self.write("]");
                }
            }
            Expr::Index { object, index } => {
                self.emit_expr(object, Precedence::Member);
                self.write("[");
                self.emit_expr(index, Precedence::Or);
                self.write("]");
            }
            Expr::In { key, object } => self.emit_binary(key, " in ", object, Precedence::Relational),
            Expr::Length(value) => {
                self.emit_expr(value, Precedence::Member);
                self.write(".length");
            }
            Expr::ConstructorName(value) => {
                self.emit_expr(value, Precedence::Member);
                self.write(".constructor.name");
            }
            Expr::IsArray(value) => self.emit_host_call("Array.isArray", value),
            Expr::IsBuffer(value) => self.emit_host_call("isBuffer", value),
            Expr::IsArrayBufferView(value) => self.emit_host_call("ArrayBuffer.isView", value),
            Expr::OneOf { value, options } => {
                if options.is_empty() {
                    self.write("false");
                    return;
                }
                for (position, option) in options.iter().enumerate() {
                    if position > 0 {
                        self.write(" || ");
                    }
                    self.emit_expr(value, Precedence::Relational);
                    self.write(" === ");
                    self.write_string(option);
                }
            }
            Expr::Call { function, argument } => {
                let name = self.names.mangle(function);
                self.emit_host_call(&name, argument);
            }
            Expr::Inlined { body, .. } => self.emit_expr_inner(body),
        }
    }

    fn emit_binary(&mut self, left: &Expr, operator: &str, right: &Expr, precedence: Precedence) {
        self.emit_expr(left, precedence);
        self.write(operator);
        // Left-associative: an equal-precedence right operand needs parens.
        self.emit_expr(right, next(precedence));
    }

    fn emit_chain(&mut self, operands: &[Expr], operator: &str, empty: &str, precedence: Precedence) {
        if operands.is_empty() {
            self.write(empty);
            return;
        }
        for (position, operand) in operands.iter().enumerate() {
            if position > 0 {
                self.write(operator);
            }
            self.emit_expr(operand, precedence);
        }
    }

    fn emit_host_call(&mut self, callee: &str, argument: &Expr) {
        self.write(callee);
        self.write("(");
        self.emit_expr(argument, Precedence::Or);
        self.write(")");
    }
}

/// Print `validator` with the default four-space indentation.
pub fn emit_validator(validator: &Validator) -> String {
    JsPrinter::new().print(validator)
}

fn precedence_of(expr: &Expr) -> Precedence {
    match expr {
        Expr::Var(_) | Expr::Undefined | Expr::Null | Expr::Bool(_) | Expr::Str(_) => {
            Precedence::Primary
        }
        Expr::Number(value) if value.0.is_sign_negative() && value.0 != 0.0 => Precedence::Unary,
        Expr::Number(_) => Precedence::Primary,
        Expr::TypeOf(_) | Expr::Not(_) => Precedence::Unary,
        Expr::StrictEq(..) | Expr::StrictNe(..) => Precedence::Equality,
        Expr::Compare { .. } | Expr::In { .. } => Precedence::Relational,
        Expr::And(operands) if operands.is_empty() => Precedence::Primary,
        Expr::And(_) => Precedence::And,
        Expr::Or(operands) if operands.is_empty() => Precedence::Primary,
        Expr::Or(_) => Precedence::Or,
        Expr::OneOf { options, .. } if options.len() <= 1 => Precedence::Equality,
        Expr::OneOf { .. } => Precedence::Or,
        Expr::Member { .. }
        | Expr::Index { .. }
        | Expr::Length(_)
        | Expr::ConstructorName(_)
        | Expr::IsArray(_)
        | Expr::IsBuffer(_)
        | Expr::IsArrayBufferView(_)
        | Expr::Call { .. } => Precedence::Member,
        Expr::Inlined { body, .. } => precedence_of(body),
    }
}

const fn next(precedence: Precedence) -> Precedence {
    match precedence {
        Precedence::Or => Precedence::And,
        Precedence::And => Precedence::Equality,
        Precedence::Equality => Precedence::Relational,
        Precedence::Relational => Precedence::Unary,
        Precedence::Unary => Precedence::Member,
        Precedence::Member | Precedence::Primary => Precedence::Primary,
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn uses_buffer(validator: &Validator) -> bool {
    let mut found = false;
    for function in validator.functions() {
        for stmt in &function.body {
            stmt.for_each_expr(&mut |expr| {
                expr.walk(&mut |node| found |= matches!(node, Expr::IsBuffer(_)));
            });
        }
    }
    found
}

#[cfg(test)]
#[path = "../tests/printer_tests.rs"]
mod tests;
