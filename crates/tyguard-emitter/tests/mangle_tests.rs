use super::*;

#[test]
fn test_alphanumeric_runs_become_the_identifier() {
    let mut names = NameMangler::new();
    assert_eq!(names.mangle("string"), "is_string");
    assert_eq!(names.mangle("Array<Tree>"), "is_Array_Tree");
    assert_eq!(names.mangle("{a?: number; b: null | string}"), "is_a_number_b_null_string");
    assert_eq!(names.mangle("\"on\""), "is_on");
}

#[test]
fn test_same_name_same_identifier() {
    let mut names = NameMangler::new();
    let first = names.mangle("Box<number>");
    assert_eq!(names.mangle("Box<number>"), first);
    assert_eq!(names.get("Box<number>"), Some(first.as_str()));
    assert_eq!(names.get("Box<string>"), None);
}

#[test]
fn test_collisions_get_numeric_suffixes() {
    let mut names = NameMangler::new();
    assert_eq!(names.mangle("a b"), "is_a_b");
    assert_eq!(names.mangle("a<b>"), "is_a_b_2");
    assert_eq!(names.mangle("{a: b}"), "is_a_b_3");
}

#[test]
fn test_symbol_only_names() {
    let mut names = NameMangler::new();
    assert_eq!(names.mangle("{}"), "is_anonymous");
    assert_eq!(names.mangle("[]"), "is_anonymous_2");
}

#[test]
fn test_long_names_are_truncated() {
    let mut names = NameMangler::new();
    let long = "x".repeat(200);
    assert_eq!(names.mangle(&long).len(), "is_".len() + MAX_STEM_LEN);
}
