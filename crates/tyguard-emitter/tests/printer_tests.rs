use super::*;
use tyguard_compiler::{CompileOptions, Reason, compile_validator};
use tyguard_types::{TypeId, TypeInterner};

fn single(name: &str, expr: Expr) -> Validator {
    Validator::new(
        name.to_string(),
        vec![CompiledFunction::new(name, vec![Stmt::Return(expr)], None)],
        CompileOptions::default(),
    )
}

fn returned(expr: Expr) -> String {
    let source = emit_validator(&single("root", expr));
    let line = source
        .lines()
        .find(|line| line.trim_start().starts_with("return ") && !line.contains("is_root("))
        .unwrap();
    line.trim()
        .trim_start_matches("return ")
        .trim_end_matches(';')
        .to_string()
}

#[test]
fn test_primitive_validator_layout() {
    let types = TypeInterner::new();
    let validator = compile_validator(&types, TypeId::STRING, CompileOptions::default()).unwrap();

    assert_eq!(
        emit_validator(&validator),
        "(function () {\n\
         \x20   // string\n\
         \x20   function is_string(object) {\n\
         \x20       return typeof object === \"string\";\n\
         \x20   }\n\
         \x20   return function (object) {\n\
         \x20       return is_string(object);\n\
         \x20   };\n\
         })()"
    );
}

#[test]
fn test_array_loop_and_calls() {
    let mut types = TypeInterner::new();
    let array = types.array(TypeId::STRING);
    let validator = compile_validator(
        &types,
        array,
        CompileOptions::default().with_inline_trivial_predicates(false),
    )
    .unwrap();

    let source = JsPrinter::with_indent("  ").print(&validator);
    assert!(source.contains("  function is_Array_string(object) {\n"));
    assert!(source.contains("    if (!Array.isArray(object)) return false;\n"));
    assert!(source.contains("    for (let i = 0; i < object.length; i++) {\n"));
    assert!(source.contains("      if (!is_string(object[i])) return false;\n"));
    assert!(source.contains("  function is_string(object) {\n"));
    assert!(source.contains("    return is_Array_string(object);\n"));
}

#[test]
fn test_inlined_body_is_printed_in_place() {
    let mut types = TypeInterner::new();
    let array = types.array(TypeId::STRING);
    let validator = compile_validator(&types, array, CompileOptions::default()).unwrap();

    let source = emit_validator(&validator);
    assert!(source.contains("if (!(typeof object[i] === \"string\")) return false;"));
    assert!(!source.contains("function is_string"));
}

#[test]
fn test_precedence_parenthesizes_only_when_needed() {
    let param = Expr::param;
    assert_eq!(
        returned(Expr::And(vec![
            Expr::Or(vec![Expr::Null, Expr::Undefined]),
            Expr::Bool(true),
        ])),
        "(null || undefined) && true"
    );
    assert_eq!(
        returned(Expr::Or(vec![
            Expr::And(vec![Expr::Null, Expr::Undefined]),
            Expr::Bool(true),
        ])),
        "null && undefined || true"
    );
    assert_eq!(
        returned(Expr::Not(Box::new(Expr::strict_eq(param(), Expr::Null)))),
        "!(object === null)"
    );
    assert_eq!(
        returned(Expr::Not(Box::new(Expr::IsArray(Box::new(param()))))),
        "!Array.isArray(object)"
    );
    assert_eq!(
        returned(Expr::strict_eq(Expr::length(param()), Expr::number(-1.0))),
        "object.length === -1"
    );
    assert_eq!(returned(Expr::And(Vec::new())), "true");
    assert_eq!(returned(Expr::Or(Vec::new())), "false");
}

#[test]
fn test_member_keys_and_strings_are_escaped() {
    assert_eq!(
        returned(Expr::member(Expr::param(), "id")),
        "object.id"
    );
    assert_eq!(
        returned(Expr::member(Expr::param(), "content-type")),
        "object[\"content-type\"]"
    );
    assert_eq!(
        returned(Expr::has_key("say \"hi\"\n", Expr::param())),
        "\"say \\\"hi\\\"\\n\" in object"
    );
}

#[test]
fn test_one_of_prints_a_disjunction() {
    let key = || Box::new(Expr::var("key"));
    assert_eq!(
        returned(Expr::OneOf {
            value: key(),
            options: vec!["a".into(), "b".into()],
        }),
        "key === \"a\" || key === \"b\""
    );
    assert_eq!(
        returned(Expr::not(Expr::OneOf {
            value: key(),
            options: vec!["a".into()],
        })),
        "!(key === \"a\")"
    );
    assert_eq!(
        returned(Expr::OneOf {
            value: key(),
            options: Vec::new(),
        }),
        "false"
    );
}

#[test]
fn test_buffer_prelude_only_when_used() {
    let types = TypeInterner::new();
    let buffer = compile_validator(&types, TypeId::BUFFER, CompileOptions::default()).unwrap();
    let source = emit_validator(&buffer);
    assert!(source.contains(BUFFER_PRELUDE));
    assert!(source.contains("isBuffer(object)"));

    let plain = emit_validator(&single("root", Expr::Bool(true)));
    assert!(!plain.contains("isBuffer"));
}

#[test]
fn test_typed_view_check() {
    let source = returned(Expr::And(vec![
        Expr::IsArrayBufferView(Box::new(Expr::param())),
        Expr::strict_eq(
            Expr::ConstructorName(Box::new(Expr::param())),
            Expr::string("Int8Array"),
        ),
    ]));
    assert_eq!(
        source,
        "ArrayBuffer.isView(object) && object.constructor.name === \"Int8Array\""
    );
}

#[test]
fn test_identifiers_follow_declaration_order() {
    let validator = Validator::new(
        "{a: string}".to_string(),
        vec![
            CompiledFunction::new("{a: string}", vec![Stmt::Return(Expr::Bool(true))], None),
            CompiledFunction::new(
                "a string",
                vec![Stmt::Return(Expr::Bool(true))],
                Some(Reason::String),
            ),
        ],
        CompileOptions::default(),
    );

    assert_eq!(
        JsPrinter::identifiers(&validator),
        vec![
            ("{a: string}".to_string(), "is_a_string".to_string()),
            ("a string".to_string(), "is_a_string_2".to_string()),
        ]
    );
}
