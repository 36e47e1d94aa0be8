//! Emit JavaScript for whole type documents.

use tyguard_compiler::{CompileOptions, Validator, compile_validator};
use tyguard_emitter::{JsPrinter, emit_validator};
use tyguard_types::{TypeInterner, lower_json};

fn compile(document: &str, options: CompileOptions) -> Validator {
    let mut types = TypeInterner::new();
    let root = lower_json(&mut types, document).expect("document should lower");
    compile_validator(&types, root, options).expect("document should compile")
}

fn balanced(source: &str) -> bool {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;
    for c in source.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '(' => depth += 1,
            '}' | ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

const LINKED: &str = r#"{
    "definitions": [
        {
            "name": "Node",
            "body": {
                "kind": "object",
                "properties": [
                    { "name": "value", "type": { "kind": "number" } },
                    { "name": "next", "type": { "kind": "union", "members": [
                        { "kind": "reference", "target": "Node" },
                        { "kind": "null" }
                    ] } }
                ]
            }
        }
    ],
    "root": { "kind": "reference", "target": "Node" }
}"#;

#[test]
fn test_recursive_type_calls_itself_by_identifier() {
    let validator = compile(LINKED, CompileOptions::default());
    let source = emit_validator(&validator);

    assert!(source.starts_with("(function () {\n"));
    assert!(source.ends_with("})()"));
    assert!(source.contains("    // Node\n    function is_Node(object) {\n"));
    assert!(source.contains("return is_Node(object);"));
    assert!(balanced(&source));

    // Every called identifier is declared.
    for (name, identifier) in JsPrinter::identifiers(&validator) {
        assert!(
            source.contains(&format!("function {identifier}(object)")),
            "{name} is not declared as {identifier}"
        );
    }
}

#[test]
fn test_exact_object_emits_key_loop() {
    let validator = compile(
        r#"{
            "root": {
                "kind": "object",
                "properties": [
                    { "name": "a", "type": { "kind": "string" } },
                    { "name": "b-c", "optional": true, "type": { "kind": "number" } }
                ]
            }
        }"#,
        CompileOptions::default().with_superfluous_property_check(true),
    );
    let source = emit_validator(&validator);

    assert!(source.contains("for (const key of Object.keys(object)) {"));
    assert!(source.contains("if (!(key === \"a\" || key === \"b-c\")) return false;"));
    assert!(source.contains("object[\"b-c\"]"));
    assert!(balanced(&source));
}

#[test]
fn test_short_circuit_validator_accepts_everything() {
    let validator = compile(
        r#"{ "root": { "kind": "string" } }"#,
        CompileOptions::default().with_short_circuit(true),
    );
    let source = emit_validator(&validator);
    assert!(source.contains("function is_any(object) {\n        return true;\n    }"));
}
