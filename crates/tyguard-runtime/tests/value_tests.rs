use super::*;
use serde_json::json;

#[test]
fn test_type_of() {
    assert_eq!(Value::Undefined.type_of(), "undefined");
    assert_eq!(Value::Null.type_of(), "object");
    assert_eq!(Value::Number(f64::NAN).type_of(), "number");
    assert_eq!(Value::BigInt(7).type_of(), "bigint");
    assert_eq!(Value::Function("f".into()).type_of(), "function");
    assert_eq!(Value::Buffer(vec![1, 2]).type_of(), "object");
    assert_eq!(Value::view(ViewKind::Int8, 2).type_of(), "object");
}

#[test]
fn test_strict_equality() {
    assert!(Value::Number(1.0).strict_equals(&Value::Number(1.0)));
    assert!(!Value::Number(f64::NAN).strict_equals(&Value::Number(f64::NAN)));
    assert!(!Value::Null.strict_equals(&Value::Undefined));
    assert!(!Value::string("1").strict_equals(&Value::Number(1.0)));

    let object = Value::object([("a", Value::Null)]);
    let copy = object.clone();
    assert!(object.strict_equals(&object));
    assert!(!object.strict_equals(&copy));
}

#[test]
fn test_truthiness() {
    assert!(!Value::Number(0.0).is_truthy());
    assert!(!Value::Number(f64::NAN).is_truthy());
    assert!(!Value::string("").is_truthy());
    assert!(Value::Array(Vec::new()).is_truthy());
    assert!(Value::Object(Default::default()).is_truthy());
}

#[test]
fn test_property_lookup() {
    let value = Value::from(json!({ "a": 1, "list": [true, false] }));
    assert_eq!(*value.get("a"), Value::Number(1.0));
    assert_eq!(*value.get("missing"), Value::Undefined);

    let list = value.get("list");
    assert_eq!(*list.get("length"), Value::Number(2.0));
    assert_eq!(*list.get("1"), Value::Bool(false));
    assert_eq!(*list.get_index(0.0), Value::Bool(true));
    assert_eq!(*list.get_index(5.0), Value::Undefined);
    assert_eq!(*list.get_index(0.5), Value::Undefined);
}

#[test]
fn test_string_length_counts_utf16_units() {
    assert_eq!(Value::string("abc").length(), Some(3));
    assert_eq!(Value::string("😀").length(), Some(2));
}

#[test]
fn test_has_key_and_own_keys_keep_insertion_order() {
    let value = Value::from(json!({ "z": 1, "a": 2 }));
    assert!(value.has_key("z"));
    assert!(!value.has_key("b"));
    let keys: Vec<_> = value.own_keys().into_iter().map(|key| key.into_owned()).collect();
    assert_eq!(keys, vec!["z", "a"]);

    assert!(!Value::string("abc").has_key("length"));
}

#[test]
fn test_views_and_buffers() {
    let int16 = Value::view(ViewKind::Int16, 4);
    assert_eq!(int16.length(), Some(4));
    assert_eq!(int16.constructor_name(), Some("Int16Array"));
    assert!(int16.is_array_buffer_view());

    let buffer = Value::Buffer(vec![9, 8]);
    assert!(buffer.is_array_buffer_view());
    assert_eq!(buffer.constructor_name(), Some("Buffer"));
    assert_eq!(*buffer.get_index(1.0), Value::Number(8.0));
}

#[test]
fn test_display() {
    let value = Value::from(json!({ "a": [1, "x", null] }));
    assert_eq!(value.to_string(), "{ \"a\": [1, \"x\", null] }");
    assert_eq!(Value::BigInt(5).to_string(), "5n");
    assert_eq!(Value::view(ViewKind::Float64, 3).to_string(), "Float64Array(3)");
}
