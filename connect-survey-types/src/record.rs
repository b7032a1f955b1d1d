use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Responses;

/// Identifier assigned by the response store to a persisted record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// What the host sends to the response store on save or submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub form_id: String,
    pub participant_id: String,
    pub responses: Responses,
    pub is_complete: bool,
    /// High-water mark used to resume an incomplete survey.
    pub furthest_page: usize,
}

/// A previously saved response, as returned by the response store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResponse {
    pub responses: Responses,
    pub furthest_page: usize,
    pub record_id: RecordId,
    #[serde(default)]
    pub is_complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_camel_case_keys() {
        let mut responses = Responses::new();
        responses.insert("q1", "yes");
        let record = ResponseRecord {
            form_id: "baseline".into(),
            participant_id: "p-7".into(),
            responses,
            is_complete: false,
            furthest_page: 2,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["formId"], "baseline");
        assert_eq!(json["participantId"], "p-7");
        assert_eq!(json["responses"]["q1"], "yes");
        assert_eq!(json["isComplete"], false);
        assert_eq!(json["furthestPage"], 2);
    }

    #[test]
    fn stored_response_defaults_to_incomplete() {
        let stored: StoredResponse = serde_json::from_str(
            r#"{"responses": {"q1": "no"}, "furthestPage": 1, "recordId": "r-1"}"#,
        )
        .unwrap();
        assert!(!stored.is_complete);
        assert_eq!(stored.record_id.as_str(), "r-1");
    }
}
