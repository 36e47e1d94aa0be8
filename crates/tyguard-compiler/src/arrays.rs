//! Arrays, tuples and binary data.
//!
//! `Buffer` and the typed numeric views are array-like at runtime but are
//! never checked element by element: a buffer has its own host predicate,
//! and a view is recognized by `ArrayBuffer.isView` plus its exact
//! constructor name, because views of equal byte length would otherwise
//! satisfy each other's checks.

use crate::compiler::TypeGuardCompiler;
use crate::diagnostics::CompileError;
use crate::ir::{CompareOp, Expr, INDEX_VAR, Stmt};
use tyguard_types::{TupleShape, TypeId, ViewKind};

impl TypeGuardCompiler<'_> {
    pub(crate) fn compile_array(
        &mut self,
        type_id: TypeId,
        element: TypeId,
    ) -> Result<String, CompileError> {
        let name = self.name_of(type_id)?;
        self.ensure(name, None, |this| {
            let element_name = this.compile(element)?;
            let is_array = Expr::IsArray(Box::new(Expr::param()));
            if this.is_always_true(&element_name) {
                return Ok(vec![Stmt::Return(is_array)]);
            }
            Ok(vec![
                Stmt::reject_unless(is_array),
                Stmt::ForIndex {
                    index: INDEX_VAR.to_string(),
                    array: Expr::param(),
                    body: vec![Stmt::reject_unless(Expr::call(
                        element_name,
                        Expr::index(Expr::param(), Expr::var(INDEX_VAR)),
                    ))],
                },
                Stmt::Return(Expr::Bool(true)),
            ])
        })
    }

    /// Length within `[min_length, max_length]`, then every position.
    pub(crate) fn compile_tuple(
        &mut self,
        type_id: TypeId,
        shape: &TupleShape,
    ) -> Result<String, CompileError> {
        let name = self.name_of(type_id)?;
        self.ensure_expr(name, None, |this| {
            let length = || Expr::length(Expr::param());
            let mut conditions = vec![Expr::IsArray(Box::new(Expr::param()))];
            if shape.min_length == shape.max_length() {
                conditions.push(Expr::strict_eq(
                    length(),
                    Expr::number(shape.max_length() as f64),
                ));
            } else {
                conditions.push(Expr::compare(
                    CompareOp::Ge,
                    length(),
                    Expr::number(shape.min_length as f64),
                ));
                conditions.push(Expr::compare(
                    CompareOp::Le,
                    length(),
                    Expr::number(shape.max_length() as f64),
                ));
            }

            for (position, element) in shape.elements.iter().enumerate() {
                let mut predicate = this.compile(element.type_id)?;
                if element.optional {
                    predicate = this.optional(predicate)?;
                }
                conditions.push(Expr::call(
                    predicate,
                    Expr::index(Expr::param(), Expr::number(position as f64)),
                ));
            }
            Ok(Expr::And(conditions))
        })
    }

    pub(crate) fn compile_buffer(&mut self) -> Result<String, CompileError> {
        self.ensure_expr("Buffer".to_string(), None, |_| {
            Ok(Expr::IsBuffer(Box::new(Expr::param())))
        })
    }

    pub(crate) fn compile_numeric_view(&mut self, kind: ViewKind) -> Result<String, CompileError> {
        let constructor = kind.constructor_name();
        self.ensure_expr(constructor.to_string(), None, |_| {
            Ok(Expr::And(vec![
                Expr::IsArrayBufferView(Box::new(Expr::param())),
                Expr::strict_eq(
                    Expr::ConstructorName(Box::new(Expr::param())),
                    Expr::string(constructor),
                ),
            ]))
        })
    }
}
