//! Leaf predicates: intrinsics, literals, `object`, and the optional wrapper.

use crate::compiler::TypeGuardCompiler;
use crate::diagnostics::CompileError;
use crate::ir::{Expr, Reason};
use crate::naming::{optional_name, quote};
use tyguard_types::{IntrinsicKind, LiteralValue, TypeId, format_number};

impl TypeGuardCompiler<'_> {
    /// `any` / `unknown` accept everything, `never` nothing; `null` and
    /// `undefined` are strict equality.
    pub(crate) fn compile_special(
        &mut self,
        type_id: TypeId,
        kind: IntrinsicKind,
    ) -> Result<String, CompileError> {
        let (check, reason) = match kind {
            IntrinsicKind::Any | IntrinsicKind::Unknown => (Expr::Bool(true), None),
            IntrinsicKind::Never => (Expr::Bool(false), None),
            IntrinsicKind::Null => (Expr::strict_eq(Expr::param(), Expr::Null), Some(Reason::Null)),
            IntrinsicKind::Undefined => (
                Expr::strict_eq(Expr::param(), Expr::Undefined),
                Some(Reason::Undefined),
            ),
            _ => return Err(CompileError::unsupported(type_id, kind.as_str())),
        };
        self.ensure_expr(kind.as_str().to_string(), reason, |_| Ok(check))
    }

    /// `typeof` check. `NaN` and the infinities are numbers.
    pub(crate) fn compile_primitive(
        &mut self,
        type_id: TypeId,
        kind: IntrinsicKind,
    ) -> Result<String, CompileError> {
        let reason = match kind {
            IntrinsicKind::Number => Reason::Number,
            IntrinsicKind::BigInt => Reason::BigInt,
            IntrinsicKind::Boolean => Reason::Boolean,
            IntrinsicKind::String => Reason::String,
            _ => return Err(CompileError::unsupported(type_id, kind.as_str())),
        };
        let tag = kind.as_str();
        self.ensure_expr(tag.to_string(), Some(reason), |_| {
            Ok(Expr::type_of_is(Expr::param(), tag))
        })
    }

    /// `true` / `false` compare against the boolean itself.
    pub(crate) fn compile_boolean_literal(&mut self, value: bool) -> Result<String, CompileError> {
        self.ensure_expr(value.to_string(), Some(Reason::BooleanLiteral(value)), |_| {
            Ok(Expr::strict_eq(Expr::param(), Expr::Bool(value)))
        })
    }

    pub(crate) fn compile_literal(&mut self, value: &LiteralValue) -> Result<String, CompileError> {
        match value {
            LiteralValue::String(text) => {
                let reason = Reason::StringLiteral(text.clone());
                self.ensure_expr(quote(text), Some(reason), |_| {
                    Ok(Expr::strict_eq(Expr::param(), Expr::string(text.clone())))
                })
            }
            LiteralValue::Number(number) => {
                let reason = Reason::NumberLiteral(number.0);
                self.ensure_expr(format_number(number.0), Some(reason), |_| {
                    Ok(Expr::strict_eq(Expr::param(), Expr::Number(*number)))
                })
            }
        }
    }

    /// The `object` keyword: non-null objects and functions.
    pub(crate) fn compile_non_primitive(&mut self) -> Result<String, CompileError> {
        self.ensure_expr("object".to_string(), Some(Reason::NonPrimitive), |_| {
            Ok(Expr::Or(vec![
                Expr::And(vec![
                    Expr::type_of_is(Expr::param(), "object"),
                    Expr::strict_ne(Expr::param(), Expr::Null),
                ]),
                Expr::type_of_is(Expr::param(), "function"),
            ]))
        })
    }

    /// `undefined` or whatever `inner` accepts.
    pub fn optional(&mut self, inner: String) -> Result<String, CompileError> {
        self.ensure_expr(optional_name(&inner), None, |_| {
            Ok(Expr::Or(vec![
                Expr::strict_eq(Expr::param(), Expr::Undefined),
                Expr::call(inner, Expr::param()),
            ]))
        })
    }
}
