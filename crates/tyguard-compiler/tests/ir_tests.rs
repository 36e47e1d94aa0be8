use super::*;

fn typeof_string() -> Expr {
    Expr::type_of_is(Expr::param(), "string")
}

#[test]
fn test_trivial_function() {
    let function = CompiledFunction::new("string", vec![Stmt::Return(typeof_string())], None);
    assert!(function.is_trivial());
    assert!(!function.is_always_true());
}

#[test]
fn test_call_is_not_trivial() {
    let function = CompiledFunction::new(
        "Array<string>",
        vec![Stmt::Return(Expr::call("string", Expr::param()))],
        None,
    );
    assert!(!function.is_trivial());
}

#[test]
fn test_loop_is_not_trivial() {
    let function = CompiledFunction::new(
        "loop",
        vec![
            Stmt::ForKeys {
                key: KEY_VAR.to_string(),
                object: Expr::param(),
                body: vec![Stmt::Return(Expr::Bool(false))],
            },
            Stmt::Return(Expr::Bool(true)),
        ],
        None,
    );
    assert!(!function.is_trivial());
}

#[test]
fn test_foreign_variable_is_not_trivial() {
    let function = CompiledFunction::new(
        "odd",
        vec![Stmt::Return(Expr::strict_eq(Expr::var(KEY_VAR), Expr::Null))],
        None,
    );
    assert!(!function.is_trivial());
}

#[test]
fn test_always_true() {
    let function = CompiledFunction::new("any", vec![Stmt::Return(Expr::Bool(true))], None);
    assert!(function.is_always_true());
    assert!(function.is_trivial());
}

#[test]
fn test_substitute_replaces_parameter_only() {
    let expr = Expr::And(vec![
        typeof_string(),
        Expr::strict_ne(Expr::param(), Expr::string("object")),
    ]);
    let argument = Expr::member(Expr::param(), "name");
    let substituted = expr.substitute(PARAM, &argument);

    assert_eq!(
        substituted,
        Expr::And(vec![
            Expr::type_of_is(argument.clone(), "string"),
            Expr::strict_ne(argument, Expr::string("object")),
        ])
    );
}

#[test]
fn test_callees_in_order_without_duplicates() {
    let function = CompiledFunction::new(
        "f",
        vec![
            Stmt::reject_unless(Expr::And(vec![
                Expr::call("b", Expr::member(Expr::param(), "x")),
                Expr::call("a", Expr::member(Expr::param(), "y")),
            ])),
            Stmt::ForIndex {
                index: INDEX_VAR.to_string(),
                array: Expr::param(),
                body: vec![Stmt::reject_unless(Expr::call(
                    "b",
                    Expr::index(Expr::param(), Expr::var(INDEX_VAR)),
                ))],
            },
            Stmt::Return(Expr::Bool(true)),
        ],
        None,
    );
    assert_eq!(function.callees(), vec!["b", "a"]);
}

#[test]
fn test_and_or_collapse_single_operand() {
    assert_eq!(Expr::and(vec![Expr::Bool(false)]), Expr::Bool(false));
    assert_eq!(Expr::or(vec![Expr::Null]), Expr::Null);
    assert_eq!(Expr::and(vec![]), Expr::And(vec![]));
}

#[test]
fn test_reason_display() {
    assert_eq!(Reason::String.to_string(), "expected a string");
    assert_eq!(
        Reason::StringLiteral("on".to_string()).to_string(),
        "expected string \"on\""
    );
    assert_eq!(Reason::NumberLiteral(42.0).to_string(), "expected number 42");
    assert_eq!(Reason::BooleanLiteral(false).to_string(), "expected false");
}
