use super::*;
use crate::ir::{INDEX_VAR, Stmt};

fn function(name: &str, body: Vec<Stmt>, reason: Option<Reason>) -> (String, CompiledFunction) {
    (name.to_string(), CompiledFunction::new(name, body, reason))
}

fn string_leaf() -> (String, CompiledFunction) {
    function(
        "string",
        vec![Stmt::Return(Expr::type_of_is(Expr::param(), "string"))],
        Some(Reason::String),
    )
}

#[test]
fn test_leaf_call_inside_loop_is_inlined() {
    let element = Expr::index(Expr::param(), Expr::var(INDEX_VAR));
    let functions: IndexMap<_, _> = [
        function(
            "Array<string>",
            vec![
                Stmt::reject_unless(Expr::IsArray(Box::new(Expr::param()))),
                Stmt::ForIndex {
                    index: INDEX_VAR.to_string(),
                    array: Expr::param(),
                    body: vec![Stmt::reject_unless(Expr::call("string", element.clone()))],
                },
                Stmt::Return(Expr::Bool(true)),
            ],
            None,
        ),
        string_leaf(),
    ]
    .into_iter()
    .collect();

    let inlined = inline_trivial(functions, "Array<string>");
    assert_eq!(inlined.len(), 1);

    let Stmt::ForIndex { body, .. } = &inlined["Array<string>"].body[1] else {
        panic!("loop should survive inlining");
    };
    let Stmt::If { condition: Expr::Not(check), .. } = &body[0] else {
        panic!("loop body should reject");
    };
    assert_eq!(
        **check,
        Expr::Inlined {
            function: "string".to_string(),
            reason: Some(Reason::String),
            argument: Box::new(element.clone()),
            body: Box::new(Expr::type_of_is(element, "string")),
        }
    );
}

#[test]
fn test_inlining_reaches_fixed_point() {
    let functions: IndexMap<_, _> = [
        function(
            "root",
            vec![Stmt::Return(Expr::call("middle", Expr::member(Expr::param(), "a")))],
            None,
        ),
        function(
            "middle",
            vec![Stmt::Return(Expr::call("string", Expr::member(Expr::param(), "b")))],
            None,
        ),
        string_leaf(),
    ]
    .into_iter()
    .collect();

    let inlined = inline_trivial(functions, "root");
    assert_eq!(inlined.len(), 1);
    let root = &inlined["root"];
    assert!(root.is_trivial());

    let Some(Expr::Inlined { function, body, .. }) = root.single_return() else {
        panic!("root should inline middle");
    };
    assert_eq!(function, "middle");
    assert!(matches!(&**body, Expr::Inlined { function, .. } if function == "string"));
}

#[test]
fn test_recursive_functions_stay_calls() {
    let functions: IndexMap<_, _> = [
        function(
            "T",
            vec![Stmt::Return(Expr::call("{child: T}", Expr::param()))],
            None,
        ),
        function(
            "{child: T}",
            vec![Stmt::Return(Expr::And(vec![
                Expr::is_plain_object(Expr::param()),
                Expr::call("T", Expr::member(Expr::param(), "child")),
            ]))],
            None,
        ),
    ]
    .into_iter()
    .collect();

    let inlined = inline_trivial(functions.clone(), "T");
    assert_eq!(inlined, functions);
}

#[test]
fn test_prune_keeps_registration_order() {
    let functions: IndexMap<_, _> = [
        function("unused", vec![Stmt::Return(Expr::Bool(true))], None),
        function(
            "root",
            vec![Stmt::Return(Expr::And(vec![
                Expr::call("b", Expr::param()),
                Expr::call("a", Expr::param()),
            ]))],
            None,
        ),
        function("a", vec![Stmt::Return(Expr::Bool(true))], None),
        function("b", vec![Stmt::Return(Expr::Bool(false))], None),
    ]
    .into_iter()
    .collect();

    let kept = prune_unreachable(functions, "root");
    let names: Vec<_> = kept.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["root", "a", "b"]);
}

#[test]
fn test_nothing_trivial_changes_nothing() {
    let functions: IndexMap<_, _> = [function(
        "loop",
        vec![
            Stmt::ForKeys {
                key: crate::ir::KEY_VAR.to_string(),
                object: Expr::param(),
                body: vec![Stmt::Return(Expr::Bool(false))],
            },
            Stmt::Return(Expr::Bool(true)),
        ],
        None,
    )]
    .into_iter()
    .collect();

    assert_eq!(inline_trivial(functions.clone(), "loop"), functions);
}
