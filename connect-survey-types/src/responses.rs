use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{ComponentId, ResponseValue};

/// Error type for response access operations.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("Missing response for component: {0}")]
    MissingAnswer(ComponentId),

    #[error("Type mismatch for component '{id}': expected {expected}, got {actual}")]
    TypeMismatch {
        id: ComponentId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// The answers of one survey instance, keyed by component id.
///
/// Serializes as a flat JSON object so it can be handed to the response
/// store unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Responses {
    values: HashMap<ComponentId, ResponseValue>,
}

impl Responses {
    /// Create a new empty responses collection.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert (or replace) the answer for a component.
    pub fn insert(&mut self, id: impl Into<ComponentId>, value: impl Into<ResponseValue>) {
        self.values.insert(id.into(), value.into());
    }

    /// Get the answer for a component.
    pub fn get(&self, id: &str) -> Option<&ResponseValue> {
        self.values.get(id)
    }

    /// Check if an answer exists for a component, empty or not.
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if a component has a non-empty answer.
    ///
    /// Missing answers, blank strings and `false` all count as unanswered.
    pub fn has_value(&self, id: &str) -> bool {
        self.get(id).is_some_and(|value| !value.is_empty())
    }

    // === Convenience accessors ===

    /// Get a string answer.
    pub fn get_string(&self, id: &str) -> Result<&str, ResponseError> {
        match self.get(id) {
            Some(ResponseValue::String(s)) => Ok(s),
            Some(other) => Err(ResponseError::TypeMismatch {
                id: id.into(),
                expected: "String",
                actual: other.type_name(),
            }),
            None => Err(ResponseError::MissingAnswer(id.into())),
        }
    }

    /// Get a boolean answer.
    pub fn get_bool(&self, id: &str) -> Result<bool, ResponseError> {
        match self.get(id) {
            Some(ResponseValue::Bool(b)) => Ok(*b),
            Some(other) => Err(ResponseError::TypeMismatch {
                id: id.into(),
                expected: "Bool",
                actual: other.type_name(),
            }),
            None => Err(ResponseError::MissingAnswer(id.into())),
        }
    }
}
