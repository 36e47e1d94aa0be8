//! Unions and intersections.

use crate::compiler::TypeGuardCompiler;
use crate::diagnostics::CompileError;
use crate::ir::{Expr, Stmt};
use crate::naming::exact_keys_name;
use crate::objects::exact_keys_loop;
use std::collections::BTreeSet;
use tracing::trace;
use tyguard_types::TypeId;

impl TypeGuardCompiler<'_> {
    /// Disjunction over the member predicates.
    pub(crate) fn compile_union(
        &mut self,
        type_id: TypeId,
        members: &[TypeId],
    ) -> Result<String, CompileError> {
        let name = self.name_of(type_id)?;
        self.ensure_expr(name, None, |this| {
            if members.is_empty() {
                return Ok(Expr::Bool(true));
            }
            let calls = this.member_calls(members)?;
            Ok(Expr::or(calls))
        })
    }

    /// Conjunction over the member predicates, each compiled without the
    /// superfluous-property check. A member-level check would reject keys
    /// contributed by the other members, so the check runs once over the
    /// union of all member keys instead.
    pub(crate) fn compile_intersection(
        &mut self,
        type_id: TypeId,
        members: &[TypeId],
    ) -> Result<String, CompileError> {
        let name = self.name_of(type_id)?;
        self.ensure_expr(name, None, |this| {
            let exact = this.exact();
            let mut calls = this.with_exact(false, |this| this.member_calls(members))?;
            if exact {
                match this.collect_keys(type_id)? {
                    Some(keys) => {
                        let check = this.exact_keys_function(keys)?;
                        calls.push(Expr::call(check, Expr::param()));
                    }
                    None => trace!(type_id = type_id.0, "intersection is open-keyed"),
                }
            }
            Ok(Expr::And(calls))
        })
    }

    /// Calls to each member predicate, deduplicated by name.
    fn member_calls(&mut self, members: &[TypeId]) -> Result<Vec<Expr>, CompileError> {
        let mut seen = BTreeSet::new();
        let mut calls = Vec::with_capacity(members.len());
        for &member in members {
            let predicate = self.compile(member)?;
            if seen.insert(predicate.clone()) {
                calls.push(Expr::call(predicate, Expr::param()));
            }
        }
        Ok(calls)
    }

    /// Standalone superfluous-key check. Non-objects pass: the member
    /// predicates already decide those.
    pub(crate) fn exact_keys_function(
        &mut self,
        keys: BTreeSet<String>,
    ) -> Result<String, CompileError> {
        self.ensure(exact_keys_name(&keys), None, |_| {
            Ok(vec![
                Stmt::If {
                    condition: Expr::Or(vec![
                        Expr::not(Expr::type_of_is(Expr::param(), "object")),
                        Expr::strict_eq(Expr::param(), Expr::Null),
                    ]),
                    then: vec![Stmt::Return(Expr::Bool(true))],
                },
                exact_keys_loop(keys),
                Stmt::Return(Expr::Bool(true)),
            ])
        })
    }
}
