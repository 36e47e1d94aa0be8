//! Structured validation failures.

use serde::Serialize;
use std::fmt;
use tyguard_compiler::Reason;

/// One step from the validated value to the failing part.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) if is_identifier(key) => write!(f, ".{key}"),
            Self::Key(key) => write!(f, "[{key:?}]"),
        }
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Render `path` as an access expression rooted at `$input`.
pub fn format_path(path: &[PathSegment]) -> String {
    let mut rendered = String::from("$input");
    for segment in path {
        rendered.push_str(&segment.to_string());
    }
    rendered
}

/// Why a value was rejected.
///
/// Serializes to `{ "message": ..., "path": [...], "reason": ... }`; `reason`
/// is present only when a leaf predicate (a primitive or literal check)
/// decided the failure.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationError {
    pub message: String,
    pub path: Vec<PathSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
}

impl ValidationError {
    /// A leaf predicate rejected the value at `path`.
    pub fn from_reason(path: Vec<PathSegment>, reason: Reason) -> Self {
        Self {
            message: format!("validation failed at {}: {reason}", format_path(&path)),
            path,
            reason: Some(reason),
        }
    }

    /// A composite predicate rejected the value at `path`.
    pub fn mismatch(path: Vec<PathSegment>, expected: &str) -> Self {
        Self {
            message: format!(
                "validation failed at {}: expected {expected}",
                format_path(&path)
            ),
            path,
            reason: None,
        }
    }

    /// The object at `path` carries `key`, which its type does not declare.
    pub fn superfluous_key(mut path: Vec<PathSegment>, key: String) -> Self {
        let message = format!(
            "validation failed at {}: superfluous property {key:?}",
            format_path(&path)
        );
        path.push(PathSegment::Key(key));
        Self {
            message,
            path,
            reason: None,
        }
    }

    /// Predicate calls nested deeper than the runtime limit.
    pub fn depth_exceeded(path: Vec<PathSegment>) -> Self {
        Self {
            message: format!(
                "validation failed at {}: maximum validation depth exceeded",
                format_path(&path)
            ),
            path,
            reason: None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}
