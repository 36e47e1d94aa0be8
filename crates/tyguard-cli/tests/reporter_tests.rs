use super::*;
use tyguard_runtime::PathSegment;

#[test]
fn test_plain_output_has_no_escape_codes() {
    let reporter = Reporter::new(false);
    assert_eq!(reporter.passed(), "ok");

    let error = ValidationError::mismatch(vec![PathSegment::Key("id".into())], "a number");
    assert_eq!(
        reporter.validation_failure(&error),
        format!("error: {}", error.message)
    );
}

#[test]
fn test_compile_failure_includes_code() {
    let reporter = Reporter::new(false);
    let error = CompileError::MethodDisallowed {
        property: "save".into(),
    };
    let line = reporter.compile_failure(&error);
    assert!(line.starts_with("error [method-disallowed]: "));
    assert!(line.ends_with(&error.to_string()));
}

#[test]
fn test_names_are_aligned() {
    let reporter = Reporter::new(false);
    let rows = vec![
        ("Array<string>".to_string(), "is_Array_string".to_string()),
        ("string".to_string(), "is_string".to_string()),
    ];
    assert_eq!(
        reporter.names(&rows),
        "Array<string>  is_Array_string\nstring         is_string\n"
    );
    assert_eq!(reporter.names(&[]), "");
}
