use super::*;
use tyguard_compiler::{CompileOptions, compile_validator};
use tyguard_types::{TypeId, TypeInterner};

fn guards() -> ParameterGuards {
    let types = TypeInterner::new();
    let string = compile_validator(&types, TypeId::STRING, CompileOptions::default()).unwrap();
    let maybe_number = compile_validator(
        &types,
        TypeId::NUMBER,
        CompileOptions::default().with_value_may_be_absent(true),
    )
    .unwrap();
    ParameterGuards::new().with(1, maybe_number).with(0, string)
}

#[test]
fn test_check_passes_valid_arguments() {
    let guards = guards();
    assert_eq!(guards.len(), 2);
    assert!(guards.check(&[Value::string("a"), Value::Number(1.0)]).is_ok());
}

#[test]
fn test_missing_optional_argument_is_undefined() {
    let guards = guards();
    assert!(guards.check(&[Value::string("a")]).is_ok());
}

#[test]
fn test_lowest_failing_position_wins() {
    let guards = guards();
    let err = guards
        .check(&[Value::Number(1.0), Value::string("x")])
        .unwrap_err();
    assert_eq!(err.position, 0);
    assert!(err.to_string().starts_with("argument 0: "));
}

#[test]
fn test_with_replaces_existing_position() {
    let types = TypeInterner::new();
    let any = compile_validator(&types, TypeId::ANY, CompileOptions::default()).unwrap();
    let guards = guards().with(0, any);
    assert_eq!(guards.len(), 2);
    assert!(guards.check(&[Value::Null]).is_ok());
}

#[test]
fn test_wrap_only_runs_on_valid_arguments() {
    let greet = guards().wrap(|args: &[Value]| match &args[0] {
        Value::String(name) => format!("hello {name}"),
        _ => unreachable!(),
    });

    assert_eq!(greet(&[Value::string("ada")]).unwrap(), "hello ada");
    let err = greet(&[Value::Null]).unwrap_err();
    assert_eq!(err.position, 0);
}
