//! Decoded action responses and the audit result value.

use std::collections::BTreeMap;

const STATUS_SUCCESS: &str = "success";
const STATUS_FAIL: &str = "fail";

/// Scalar value decoded from a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
    Null,
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(number) => Some(*number),
            _ => None,
        }
    }

    /// Floats and integers both widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(number) => Some(*number),
            FieldValue::Integer(number) => Some(*number as f64),
            _ => None,
        }
    }
}

/// Decoded mapping returned by a remote action.
///
/// Carries at minimum a `status` field and, on failure, a `message`; any
/// other keys are action-specific payload preserved for the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionResponse {
    fields: BTreeMap<String, FieldValue>,
}

impl ActionResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_str)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(FieldValue::as_bool)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_f64)
    }

    pub fn status(&self) -> Option<&str> {
        self.text("status")
    }

    pub fn message(&self) -> Option<&str> {
        self.text("message")
    }

    pub fn is_success(&self) -> bool {
        self.status() == Some(STATUS_SUCCESS)
    }

    pub fn is_failure(&self) -> bool {
        self.status() == Some(STATUS_FAIL)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, FieldValue)> for ActionResponse {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Immutable outcome of an audit-comment call.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditResult {
    signature: String,
    spam: bool,
    spaminess: f64,
}

impl AuditResult {
    pub fn new(signature: impl Into<String>, spam: bool, spaminess: f64) -> Self {
        Self {
            signature: signature.into(),
            spam,
            spaminess,
        }
    }

    /// Identifier the service issued for this audit, used in later
    /// false-positive/false-negative reports.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn is_spam(&self) -> bool {
        self.spam
    }

    /// Spam likelihood in `[0.0, 1.0]`.
    pub fn spaminess(&self) -> f64 {
        self.spaminess
    }
}
