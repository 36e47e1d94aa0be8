//! JavaScript-like runtime values.
//!
//! Validators are evaluated against [`Value`]s. The model covers what the
//! compiled predicates can observe: `typeof`, strict equality, own keys in
//! insertion order, array and string lengths, and the host checks for
//! `Buffer` and typed numeric views.

use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use tyguard_types::{ViewKind, format_number};

/// A typed numeric view over raw bytes (`Int8Array`, `Float64Array`, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct TypedView {
    pub kind: ViewKind,
    pub bytes: Vec<u8>,
}

impl TypedView {
    /// A zero-filled view with `length` elements.
    pub fn zeroed(kind: ViewKind, length: usize) -> Self {
        Self {
            kind,
            bytes: vec![0; length * kind.element_size()],
        }
    }

    /// Element count.
    pub fn len(&self) -> usize {
        self.bytes.len() / self.kind.element_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    Symbol(String),
    /// A callable; only its name is kept.
    Function(String),
    Array(Vec<Value>),
    /// A plain object with own enumerable string keys in insertion order.
    Object(IndexMap<String, Value>),
    Buffer(Vec<u8>),
    View(TypedView),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    pub fn view(kind: ViewKind, length: usize) -> Self {
        Self::View(TypedView::zeroed(kind, length))
    }

    /// Result of the `typeof` operator.
    pub const fn type_of(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Function(_) => "function",
            Self::Null | Self::Array(_) | Self::Object(_) | Self::Buffer(_) | Self::View(_) => {
                "object"
            }
        }
    }

    /// JavaScript truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::BigInt(value) => *value != 0,
            Self::String(value) => !value.is_empty(),
            Self::Symbol(_)
            | Self::Function(_)
            | Self::Array(_)
            | Self::Object(_)
            | Self::Buffer(_)
            | Self::View(_) => true,
        }
    }

    /// `===`. Reference types are equal only to themselves.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::BigInt(left), Self::BigInt(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::Symbol(_), _)
            | (Self::Function(_), _)
            | (Self::Array(_), _)
            | (Self::Object(_), _)
            | (Self::Buffer(_), _)
            | (Self::View(_), _) => std::ptr::eq(self, other),
            _ => false,
        }
    }

    /// The `length` property, if the value has one.
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::String(text) => Some(text.encode_utf16().count()),
            Self::Array(items) => Some(items.len()),
            Self::Buffer(bytes) => Some(bytes.len()),
            Self::View(view) => Some(view.len()),
            _ => None,
        }
    }

    /// `value.constructor.name` for the host objects the predicates inspect.
    pub fn constructor_name(&self) -> Option<&'static str> {
        match self {
            Self::Array(_) => Some("Array"),
            Self::Object(_) => Some("Object"),
            Self::Buffer(_) => Some("Buffer"),
            Self::View(view) => Some(view.kind.constructor_name()),
            Self::Function(_) => Some("Function"),
            _ => None,
        }
    }

    /// `ArrayBuffer.isView`: a `Buffer` is a byte view too.
    pub const fn is_array_buffer_view(&self) -> bool {
        matches!(self, Self::Buffer(_) | Self::View(_))
    }

    /// Property lookup by string key; missing properties are `undefined`.
    pub fn get(&self, key: &str) -> Cow<'_, Value> {
        match self {
            Self::Object(entries) => entries
                .get(key)
                .map_or(Cow::Owned(Value::Undefined), Cow::Borrowed),
            Self::Array(items) => match key.parse::<usize>() {
                Ok(position) => items
                    .get(position)
                    .map_or(Cow::Owned(Value::Undefined), Cow::Borrowed),
                Err(_) => self.length_property(key),
            },
            _ => self.length_property(key),
        }
    }

    /// Element lookup by numeric index.
    pub fn get_index(&self, index: f64) -> Cow<'_, Value> {
        match self {
            Self::Array(items) if index >= 0.0 && index.fract() == 0.0 => items
                .get(index as usize)
                .map_or(Cow::Owned(Value::Undefined), Cow::Borrowed),
            Self::Buffer(bytes) if index >= 0.0 && index.fract() == 0.0 => bytes
                .get(index as usize)
                .map_or(Cow::Owned(Value::Undefined), |byte| {
                    Cow::Owned(Value::Number(f64::from(*byte)))
                }),
            _ => self.get(&format_number(index)),
        }
    }

    fn length_property(&self, key: &str) -> Cow<'_, Value> {
        match (key, self.length()) {
            ("length", Some(length)) => Cow::Owned(Value::Number(length as f64)),
            _ => Cow::Owned(Value::Undefined),
        }
    }

    /// The `in` operator. Only objects and arrays have keys.
    pub fn has_key(&self, key: &str) -> bool {
        match self {
            Self::Object(entries) => entries.contains_key(key),
            Self::Array(items) => {
                key == "length" || key.parse::<usize>().is_ok_and(|position| position < items.len())
            }
            _ => false,
        }
    }

    /// `Object.keys`.
    pub fn own_keys(&self) -> Vec<Cow<'_, str>> {
        match self {
            Self::Object(entries) => entries.keys().map(|key| Cow::Borrowed(key.as_str())).collect(),
            Self::Array(items) => (0..items.len())
                .map(|position| Cow::Owned(position.to_string()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => Self::Number(number.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(text) => Self::String(text),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::BigInt(value) => write!(f, "{value}n"),
            Self::String(value) => write!(f, "{value:?}"),
            Self::Symbol(description) => write!(f, "Symbol({description})"),
            Self::Function(name) => write!(f, "[Function {name}]"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (position, item) in items.iter().enumerate() {
                    if position > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(entries) => {
                f.write_str("{")?;
                for (position, (key, value)) in entries.iter().enumerate() {
                    if position > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {key:?}: {value}")?;
                }
                f.write_str(if entries.is_empty() { "}" } else { " }" })
            }
            Self::Buffer(bytes) => write!(f, "<Buffer {} bytes>", bytes.len()),
            Self::View(view) => write!(f, "{}({})", view.kind.constructor_name(), view.len()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/value_tests.rs"]
mod tests;
