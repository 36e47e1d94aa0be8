use super::*;

#[test]
fn test_first_reason_is_kept() {
    let mut tracer = DiagnosticTracer::new();
    tracer.enter(|| Some(PathSegment::Key("a".into())));
    tracer.on_reason(|| Reason::String);
    tracer.on_reason(|| Reason::Null);
    tracer.exit(false, || "string".into());

    let failure = tracer.take_failure().unwrap();
    assert_eq!(failure.path, vec![PathSegment::Key("a".into())]);
    assert_eq!(failure.reason, Some(Reason::String));
}

#[test]
fn test_passing_alternative_clears_failure() {
    let mut tracer = DiagnosticTracer::new();
    tracer.enter(|| None);
    tracer.enter(|| None);
    tracer.on_reason(|| Reason::String);
    tracer.exit(false, || "string".into());
    tracer.enter(|| None);
    tracer.exit(true, || "null".into());
    tracer.exit(true, || "null | string".into());

    assert!(!tracer.has_failure());
}

#[test]
fn test_generic_mismatch_when_no_leaf_reported() {
    let mut tracer = DiagnosticTracer::new();
    tracer.enter(|| None);
    tracer.enter(|| Some(PathSegment::Index(2)));
    tracer.exit(false, || "{a: string}".into());
    tracer.exit(false, || "Array<{a: string}>".into());

    let failure = tracer.take_failure().unwrap();
    assert_eq!(failure.path, vec![PathSegment::Index(2)]);
    assert_eq!(failure.reason, None);
    assert_eq!(
        failure.message,
        "validation failed at $input[2]: expected {a: string}"
    );
}

#[test]
fn test_superfluous_key_extends_path() {
    let mut tracer = DiagnosticTracer::new();
    tracer.enter(|| Some(PathSegment::Key("user".into())));
    tracer.on_superfluous_key(|| "extra".into());
    tracer.exit(false, || "exact {id: number}".into());

    let failure = tracer.failure().unwrap();
    assert_eq!(
        failure.path,
        vec![PathSegment::Key("user".into()), PathSegment::Key("extra".into())]
    );
    assert!(failure.message.contains("superfluous property \"extra\""));
}

#[test]
fn test_fast_tracer_never_builds_arguments() {
    let mut tracer = FastTracer;
    tracer.enter(|| unreachable!());
    tracer.on_reason(|| unreachable!());
    tracer.on_superfluous_key(|| unreachable!());
    tracer.exit(false, || unreachable!());
}
