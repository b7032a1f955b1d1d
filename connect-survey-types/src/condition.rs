use serde::{Deserialize, Serialize};

use crate::{ComponentId, ResponseValue};

/// One `enableWhen` entry gating a page or component on another question.
///
/// A list of conditions is satisfied only when every entry is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// The component whose answer is inspected.
    pub question: ComponentId,

    /// The expected answer, compared with strict equality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<ResponseValue>,

    /// When set, only the presence of an answer matters and `answer` is ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_answer: Option<bool>,
}

impl Condition {
    /// A condition satisfied when `question` is answered with exactly `answer`.
    pub fn equals(question: impl Into<ComponentId>, answer: impl Into<ResponseValue>) -> Self {
        Self {
            question: question.into(),
            answer: Some(answer.into()),
            has_answer: None,
        }
    }

    /// A condition satisfied when `question` has any non-empty answer.
    pub fn answered(question: impl Into<ComponentId>) -> Self {
        Self {
            question: question.into(),
            answer: None,
            has_answer: Some(true),
        }
    }

    /// A condition satisfied while `question` has no non-empty answer.
    pub fn unanswered(question: impl Into<ComponentId>) -> Self {
        Self {
            question: question.into(),
            answer: None,
            has_answer: Some(false),
        }
    }

    /// Evaluate against the current answer of the referenced question.
    ///
    /// `current` is `None` when the question has no answer, or when the
    /// caller has decided the answer must not count (hidden question).
    pub fn is_satisfied_by(&self, current: Option<&ResponseValue>) -> bool {
        let answered = current.is_some_and(|value| !value.is_empty());
        match self.has_answer {
            Some(true) => answered,
            Some(false) => !answered,
            None => match (&self.answer, current) {
                (Some(expected), Some(actual)) => expected == actual,
                _ => false,
            },
        }
    }
}
