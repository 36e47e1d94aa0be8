//! Drive the `tyguard` commands over documents on disk.

use clap::Parser;
use std::path::Path;
use tyguard_cli::args::CliArgs;
use tyguard_cli::driver::{self, EXIT_SUCCESS, EXIT_VALIDATION_FAILED, Output};

const USERS: &str = r#"{
    "definitions": [{
        "name": "User",
        "body": {
            "kind": "object",
            "properties": [
                { "name": "id", "type": { "kind": "number" } },
                { "name": "friends", "optional": true, "type": {
                    "kind": "array", "element": { "kind": "reference", "target": "User" }
                } }
            ]
        }
    }],
    "root": { "kind": "reference", "target": "User" }
}"#;

fn run(dir: &Path, args: &[&str]) -> Output {
    let mut argv = vec!["tyguard".to_string()];
    argv.extend(args.iter().map(|arg| {
        if arg.ends_with(".json") {
            dir.join(arg).display().to_string()
        } else {
            (*arg).to_string()
        }
    }));
    driver::run(&CliArgs::parse_from(argv), false).expect("command should run")
}

#[test]
fn test_recursive_document_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("users.json"), USERS).unwrap();
    std::fs::write(
        dir.path().join("ok.json"),
        r#"{ "id": 1, "friends": [{ "id": 2, "friends": [] }] }"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("bad.json"),
        r#"{ "id": 1, "friends": [{ "id": 2 }, { "id": "3" }] }"#,
    )
    .unwrap();

    let output = run(dir.path(), &["check", "users.json", "ok.json"]);
    assert_eq!(output.status, EXIT_SUCCESS);

    let output = run(dir.path(), &["check", "users.json", "bad.json"]);
    assert_eq!(output.status, EXIT_VALIDATION_FAILED);
    let error: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(error["path"], serde_json::json!(["friends", 1, "id"]));

    let output = run(dir.path(), &["compile", "users.json"]);
    assert!(output.stdout.contains("function is_User(object)"));
    assert!(output.stdout.contains("return is_User(object);"));

    let output = run(dir.path(), &["names", "users.json"]);
    assert!(output.stdout.lines().next().unwrap().starts_with("User "));
}

#[test]
fn test_config_next_to_document_enables_exact_objects() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("users.json"), USERS).unwrap();
    std::fs::write(dir.path().join("extra.json"), r#"{ "id": 1, "admin": true }"#).unwrap();

    let output = run(dir.path(), &["check", "users.json", "extra.json"]);
    assert_eq!(output.status, EXIT_SUCCESS);

    std::fs::write(
        dir.path().join("tyguard.json"),
        r#"{ "compilerOptions": { "superfluousPropertyCheck": true } }"#,
    )
    .unwrap();
    let output = run(dir.path(), &["check", "users.json", "extra.json"]);
    assert_eq!(output.status, EXIT_VALIDATION_FAILED);
    assert!(output.stderr.contains("superfluous property \"admin\""));

    // Flags override the file.
    let output = run(
        dir.path(),
        &["check", "users.json", "extra.json", "--superfluousPropertyCheck=false"],
    );
    assert_eq!(output.status, EXIT_SUCCESS);
}
