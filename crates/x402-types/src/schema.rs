//! Structural validation of payment payloads with per-field diagnostics.
//!
//! `serde` stops at the first problem it finds and reports it as a flat message. A payload
//! that failed to parse is usually wrong in more than one place, and callers mapping the
//! failure to an HTTP response want every offending field with its location. Types that
//! implement [`PayloadSchema`] walk a [`serde_json::Value`] themselves, collecting one
//! [`SchemaIssue`] per bad field, keyed by a dotted path such as
//! `payload.authorization.value`.
//!
//! Leaf fields still go through their `serde` implementations, so the wire rules for
//! addresses, decimal integers and timestamps live in exactly one place.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Dotted path from the document root. Empty for the root itself.
    pub path: String,
    pub reason: String,
}

impl SchemaIssue {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

/// Every issue found while validating a document. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", render_issues(.issues))]
pub struct SchemaError {
    pub issues: Vec<SchemaIssue>,
}

fn render_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SchemaError {
    /// Issue at `path`, if one was reported there.
    pub fn issue_at(&self, path: &str) -> Option<&SchemaIssue> {
        self.issues.iter().find(|issue| issue.path == path)
    }
}

/// A type that can be validated out of untyped JSON.
pub trait PayloadSchema: Sized {
    /// Validates `value` found at `path`, appending any problems to `issues`.
    ///
    /// Returns `None` if at least one issue was reported for this subtree.
    fn validate_at(value: &Value, path: &str, issues: &mut Vec<SchemaIssue>) -> Option<Self>;

    fn validate(value: &Value) -> Result<Self, SchemaError> {
        let mut issues = Vec::new();
        match Self::validate_at(value, "", &mut issues) {
            Some(validated) if issues.is_empty() => Ok(validated),
            _ => {
                if issues.is_empty() {
                    issues.push(SchemaIssue::new("", "invalid value"));
                }
                Err(SchemaError { issues })
            }
        }
    }
}

pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Field-by-field reader over a JSON object.
///
/// Each accessor records its own issue and returns `None` on failure, so a schema reads all
/// of its fields before combining them with `?`:
///
/// ```
/// use serde_json::{Value, json};
/// use x402_types::schema::{ObjectFields, PayloadSchema, SchemaIssue};
///
/// struct Transfer {
///     to: String,
///     memo: String,
/// }
///
/// impl PayloadSchema for Transfer {
///     fn validate_at(value: &Value, path: &str, issues: &mut Vec<SchemaIssue>) -> Option<Self> {
///         let mut fields = ObjectFields::open(value, path, issues)?;
///         let to = fields.required("to");
///         let memo = fields.required("memo");
///         Some(Transfer { to: to?, memo: memo? })
///     }
/// }
///
/// let err = Transfer::validate(&json!({ "to": 1 })).err().unwrap();
/// assert_eq!(err.issues.len(), 2);
/// assert!(err.issue_at("memo").is_some());
/// ```
pub struct ObjectFields<'a> {
    object: &'a Map<String, Value>,
    path: &'a str,
    issues: &'a mut Vec<SchemaIssue>,
}

impl<'a> ObjectFields<'a> {
    pub fn open(value: &'a Value, path: &'a str, issues: &'a mut Vec<SchemaIssue>) -> Option<Self> {
        match value.as_object() {
            Some(object) => Some(Self {
                object,
                path,
                issues,
            }),
            None => {
                issues.push(SchemaIssue::new(
                    path,
                    format!("expected an object, got {}", kind_of(value)),
                ));
                None
            }
        }
    }

    fn lookup(&mut self, key: &str) -> Option<&'a Value> {
        let object = self.object;
        let found = object.get(key);
        if found.is_none() {
            self.issues
                .push(SchemaIssue::new(join_path(self.path, key), "required"));
        }
        found
    }

    /// Reads a leaf field through its `serde` implementation.
    pub fn required<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let value = self.lookup(key)?;
        match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                self.issues
                    .push(SchemaIssue::new(join_path(self.path, key), e.to_string()));
                None
            }
        }
    }

    /// Reads a field that has its own schema, extending the path.
    pub fn nested<T: PayloadSchema>(&mut self, key: &str) -> Option<T> {
        let value = self.lookup(key)?;
        T::validate_at(value, &join_path(self.path, key), self.issues)
    }

    /// Reports a custom problem with an already-read field.
    pub fn reject(&mut self, key: &str, reason: impl Into<String>) {
        self.issues
            .push(SchemaIssue::new(join_path(self.path, key), reason));
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Inner {
        amount: u64,
    }

    impl PayloadSchema for Inner {
        fn validate_at(value: &Value, path: &str, issues: &mut Vec<SchemaIssue>) -> Option<Self> {
            let mut fields = ObjectFields::open(value, path, issues)?;
            let amount = fields.required("amount");
            Some(Inner { amount: amount? })
        }
    }

    #[derive(Debug)]
    struct Outer {
        name: String,
        inner: Inner,
    }

    impl PayloadSchema for Outer {
        fn validate_at(value: &Value, path: &str, issues: &mut Vec<SchemaIssue>) -> Option<Self> {
            let mut fields = ObjectFields::open(value, path, issues)?;
            let name = fields.required("name");
            let inner = fields.nested("inner");
            Some(Outer {
                name: name?,
                inner: inner?,
            })
        }
    }

    #[test]
    fn test_valid_document() {
        let outer = Outer::validate(&json!({"name": "a", "inner": {"amount": 5}, "extra": true}))
            .unwrap();
        assert_eq!(outer.name, "a");
        assert_eq!(outer.inner.amount, 5);
    }

    #[test]
    fn test_collects_every_issue_with_paths() {
        let err = Outer::validate(&json!({"inner": {"amount": "five"}})).unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert_eq!(err.issue_at("name").unwrap().reason, "required");
        assert!(err.issue_at("inner.amount").is_some());
    }

    #[test]
    fn test_non_object_root() {
        let err = Outer::validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err.issues, vec![SchemaIssue::new("", "expected an object, got an array")]);
        assert_eq!(err.to_string(), "(root): expected an object, got an array");
    }

    #[test]
    fn test_nested_non_object() {
        let err = Outer::validate(&json!({"name": "a", "inner": null})).unwrap_err();
        assert_eq!(err.issue_at("inner").unwrap().reason, "expected an object, got null");
    }
}
