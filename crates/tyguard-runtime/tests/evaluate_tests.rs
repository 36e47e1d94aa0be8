use super::*;
use crate::tracer::{DiagnosticTracer, FastTracer};
use serde_json::json;
use tyguard_compiler::{CompileOptions, CompiledFunction, Reason};
use tyguard_compiler::ir::{INDEX_VAR, KEY_VAR};

fn validator(functions: Vec<CompiledFunction>) -> Validator {
    let root = functions[0].name.clone();
    Validator::new(root, functions, CompileOptions::default())
}

fn string_leaf() -> CompiledFunction {
    CompiledFunction::new(
        "string",
        vec![Stmt::Return(Expr::type_of_is(Expr::param(), "string"))],
        Some(Reason::String),
    )
}

fn string_array() -> Validator {
    validator(vec![
        CompiledFunction::new(
            "Array<string>",
            vec![
                Stmt::reject_unless(Expr::IsArray(Box::new(Expr::param()))),
                Stmt::ForIndex {
                    index: INDEX_VAR.to_string(),
                    array: Expr::param(),
                    body: vec![Stmt::reject_unless(Expr::call(
                        "string",
                        Expr::index(Expr::param(), Expr::var(INDEX_VAR)),
                    ))],
                },
                Stmt::Return(Expr::Bool(true)),
            ],
            None,
        ),
        string_leaf(),
    ])
}

fn run(validator: &Validator, value: serde_json::Value) -> bool {
    evaluate(validator, &Value::from(value), &mut FastTracer).unwrap()
}

#[test]
fn test_array_loop() {
    let validator = string_array();
    assert!(run(&validator, json!([])));
    assert!(run(&validator, json!(["a", "b"])));
    assert!(!run(&validator, json!(["a", 1])));
    assert!(!run(&validator, json!({ "0": "a" })));
}

#[test]
fn test_failing_element_path() {
    let validator = string_array();
    let mut tracer = DiagnosticTracer::new();
    let value = Value::from(json!(["a", "b", 3]));
    assert!(!evaluate(&validator, &value, &mut tracer).unwrap());

    let failure = tracer.take_failure().unwrap();
    assert_eq!(failure.path, vec![PathSegment::Index(2)]);
    assert_eq!(failure.reason, Some(Reason::String));
}

#[test]
fn test_key_loop_binds_key_variable() {
    // Every own value must be a string.
    let validator = validator(vec![
        CompiledFunction::new(
            "{[key: string]: string}",
            vec![
                Stmt::reject_unless(Expr::is_plain_object(Expr::param())),
                Stmt::ForKeys {
                    key: KEY_VAR.to_string(),
                    object: Expr::param(),
                    body: vec![Stmt::reject_unless(Expr::call(
                        "string",
                        Expr::index(Expr::param(), Expr::var(KEY_VAR)),
                    ))],
                },
                Stmt::Return(Expr::Bool(true)),
            ],
            None,
        ),
        string_leaf(),
    ]);

    assert!(run(&validator, json!({ "a": "x", "b": "y" })));
    assert!(!run(&validator, json!([])));

    let mut tracer = DiagnosticTracer::new();
    let value = Value::from(json!({ "a": "x", "b": 2 }));
    assert!(!evaluate(&validator, &value, &mut tracer).unwrap());
    assert_eq!(
        tracer.take_failure().unwrap().path,
        vec![PathSegment::Key("b".into())]
    );
}

#[test]
fn test_inlined_body_reports_argument_path() {
    let argument = Expr::member(Expr::param(), "name");
    let validator = validator(vec![CompiledFunction::new(
        "{name: string}",
        vec![Stmt::Return(Expr::And(vec![
            Expr::is_plain_object(Expr::param()),
            Expr::Inlined {
                function: "string".to_string(),
                reason: Some(Reason::String),
                argument: Box::new(argument.clone()),
                body: Box::new(Expr::type_of_is(argument, "string")),
            },
        ]))],
        None,
    )]);

    let mut tracer = DiagnosticTracer::new();
    let value = Value::from(json!({ "name": 7 }));
    assert!(!evaluate(&validator, &value, &mut tracer).unwrap());
    let failure = tracer.take_failure().unwrap();
    assert_eq!(failure.path, vec![PathSegment::Key("name".into())]);
    assert_eq!(failure.message, "validation failed at $input.name: expected a string");
}

#[test]
fn test_tuple_length_comparisons() {
    let length = || Expr::length(Expr::param());
    let validator = validator(vec![CompiledFunction::new(
        "[unknown, unknown?]",
        vec![Stmt::Return(Expr::And(vec![
            Expr::IsArray(Box::new(Expr::param())),
            Expr::compare(CompareOp::Ge, length(), Expr::number(1.0)),
            Expr::compare(CompareOp::Le, length(), Expr::number(2.0)),
        ]))],
        None,
    )]);

    assert!(!run(&validator, json!([])));
    assert!(run(&validator, json!([1])));
    assert!(run(&validator, json!([1, 2])));
    assert!(!run(&validator, json!([1, 2, 3])));
}

#[test]
fn test_unknown_function_halts() {
    let validator = validator(vec![CompiledFunction::new(
        "root",
        vec![Stmt::Return(Expr::call("missing", Expr::param()))],
        None,
    )]);
    let err = evaluate(&validator, &Value::Null, &mut FastTracer).unwrap_err();
    assert_eq!(err, Halt::UnknownFunction("missing".to_string()));
}

#[test]
fn test_self_call_stops_at_depth_limit() {
    let validator = validator(vec![CompiledFunction::new(
        "loop",
        vec![Stmt::Return(Expr::call("loop", Expr::param()))],
        None,
    )]);

    // Debug-build interpreter frames are large; give the walk room.
    let message = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(move || {
            let mut tracer = DiagnosticTracer::new();
            let err = evaluate(&validator, &Value::Null, &mut tracer).unwrap_err();
            assert_eq!(err, Halt::DepthExceeded);
            tracer.take_failure().unwrap().message
        })
        .unwrap()
        .join()
        .unwrap();
    assert!(message.contains("maximum validation depth exceeded"));
}
