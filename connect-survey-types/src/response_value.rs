use serde::{Deserialize, Serialize};

/// A single answer recorded for a survey component.
///
/// Serialized untagged, so a persisted `Responses` map is a plain JSON object
/// such as `{"consent": true, "dob": "1990-04-01"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// A boolean value (from checkbox components).
    Bool(bool),

    /// A numeric value. Never produced by the engine itself, but accepted in
    /// stored responses and in condition answers.
    Number(f64),

    /// A string value (text fields, radio selections, ISO dates).
    String(String),
}

impl ResponseValue {
    /// Whether the value carries content.
    ///
    /// Blank strings and `false` are empty. A required checkbox is only
    /// answered once ticked.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::String(s) => s.trim().is_empty(),
            Self::Bool(b) => !b,
            Self::Number(n) => n.is_nan(),
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Number(_) => "Number",
            Self::String(_) => "String",
        }
    }
}

impl From<String> for ResponseValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for ResponseValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<bool> for ResponseValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for ResponseValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for ResponseValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for ResponseValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}
