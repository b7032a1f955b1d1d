use crate::ComponentId;

/// Error type for reading survey definitions.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// The survey JSON could not be parsed.
    #[error("Invalid survey JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A `datePicker` bound is neither `"today"` nor a `YYYY-MM-DD` date.
    #[error("Invalid date bound '{0}': expected \"today\" or YYYY-MM-DD")]
    InvalidDateBound(String),
}

/// Error type for survey session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The definition cannot be rendered at all (e.g. it has no pages).
    #[error("Invalid survey definition: {0}")]
    InvalidDefinition(String),

    /// The response was already submitted; answers can no longer change.
    #[error("Survey response is complete and read-only")]
    ReadOnly,

    /// No answerable component has this id.
    #[error("Unknown component: {0}")]
    UnknownComponent(ComponentId),

    /// The value does not fit the component it was recorded for.
    #[error("Invalid answer for '{id}': {reason}")]
    InvalidAnswer { id: ComponentId, reason: String },
}

impl SessionError {
    /// Create an invalid-answer error.
    pub fn invalid_answer(id: &ComponentId, reason: impl Into<String>) -> Self {
        Self::InvalidAnswer {
            id: id.clone(),
            reason: reason.into(),
        }
    }

    /// Check if this error was caused by writing to a completed session.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly)
    }
}
