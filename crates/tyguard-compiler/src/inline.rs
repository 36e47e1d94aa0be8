//! Trivial-body inliner.
//!
//! Runs over the finished registry. A function is trivial when its body is
//! one `return` of a call-free expression over its own parameter; every call
//! to such a function is replaced by an [`Expr::Inlined`] node holding the
//! callee's expression with the parameter replaced by the call argument.
//!
//! Inlining can make a caller trivial in turn, so the pass repeats until a
//! round rewrites nothing. Every rewritten call removes one `Call` node from
//! the registry, which bounds the number of rounds. Functions no longer
//! reachable from the root are dropped at the end.

use crate::ir::{CompiledFunction, Expr, Reason};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

struct TrivialBody {
    expr: Expr,
    parameter_name: String,
    reason: Option<Reason>,
}

/// Inline trivial callees to a fixed point, then prune unreachable functions.
pub fn inline_trivial(
    mut functions: IndexMap<String, CompiledFunction>,
    root: &str,
) -> IndexMap<String, CompiledFunction> {
    let mut round = 0u32;
    loop {
        let trivial: FxHashMap<String, TrivialBody> = functions
            .values()
            .filter(|function| function.is_trivial())
            .filter_map(|function| {
                function.single_return().map(|expr| {
                    (
                        function.name.clone(),
                        TrivialBody {
                            expr: expr.clone(),
                            parameter_name: function.parameter_name.clone(),
                            reason: function.reason.clone(),
                        },
                    )
                })
            })
            .collect();
        if trivial.is_empty() {
            break;
        }

        let mut rewritten = 0usize;
        for function in functions.values_mut() {
            for stmt in &mut function.body {
                stmt.for_each_expr_mut(&mut |expr| rewritten += inline_calls(expr, &trivial));
            }
        }
        round += 1;
        trace!(round, trivial = trivial.len(), rewritten, "inline round");
        if rewritten == 0 {
            break;
        }
    }

    let before = functions.len();
    let functions = prune_unreachable(functions, root);
    debug!(
        rounds = round,
        kept = functions.len(),
        dropped = before - functions.len(),
        "inlined trivial predicates"
    );
    functions
}

fn inline_calls(expr: &mut Expr, trivial: &FxHashMap<String, TrivialBody>) -> usize {
    let mut count = 0;
    expr.walk_mut(&mut |node| {
        let replacement = match node {
            Expr::Call { function, argument } => {
                trivial.get(function.as_str()).map(|callee| Expr::Inlined {
                    function: function.clone(),
                    reason: callee.reason.clone(),
                    body: Box::new(callee.expr.substitute(&callee.parameter_name, argument)),
                    argument: argument.clone(),
                })
            }
            _ => None,
        };
        match replacement {
            Some(inlined) => {
                *node = inlined;
                count += 1;
                false
            }
            None => true,
        }
    });
    count
}

/// Keep only functions reachable from `root` through calls, in their
/// original order.
pub fn prune_unreachable(
    functions: IndexMap<String, CompiledFunction>,
    root: &str,
) -> IndexMap<String, CompiledFunction> {
    let mut reachable: FxHashSet<&str> = FxHashSet::default();
    let mut pending = vec![root];
    while let Some(name) = pending.pop() {
        if !reachable.insert(name) {
            continue;
        }
        if let Some(function) = functions.get(name) {
            pending.extend(function.callees());
        }
    }
    let keep: FxHashSet<String> = reachable.into_iter().map(str::to_string).collect();
    functions
        .into_iter()
        .filter(|(name, _)| keep.contains(name))
        .collect()
}

#[cfg(test)]
#[path = "../tests/inline_tests.rs"]
mod tests;
