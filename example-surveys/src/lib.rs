//! Example survey definitions, as served by the portal backend.
//!
//! - `consent` - two-page research consent with a signature dated today
//! - `health_history` - conditional smoking page and follow-up questions
//! - `contact_preferences` - contains schema mistakes on purpose: a forward
//!   reference and a misspelled question id

use anyhow::Context;
use connect_survey_types::SurveyDefinition;

pub const CONSENT_JSON: &str = include_str!("../surveys/consent.json");
pub const HEALTH_HISTORY_JSON: &str = include_str!("../surveys/health_history.json");
pub const CONTACT_PREFERENCES_JSON: &str = include_str!("../surveys/contact_preferences.json");

pub fn consent() -> anyhow::Result<SurveyDefinition> {
    parse("consent", CONSENT_JSON)
}

pub fn health_history() -> anyhow::Result<SurveyDefinition> {
    parse("health_history", HEALTH_HISTORY_JSON)
}

pub fn contact_preferences() -> anyhow::Result<SurveyDefinition> {
    parse("contact_preferences", CONTACT_PREFERENCES_JSON)
}

/// Every example, keyed by form id.
pub fn all() -> anyhow::Result<Vec<(&'static str, SurveyDefinition)>> {
    Ok(vec![
        ("consent", consent()?),
        ("health_history", health_history()?),
        ("contact_preferences", contact_preferences()?),
    ])
}

fn parse(name: &str, json: &str) -> anyhow::Result<SurveyDefinition> {
    SurveyDefinition::from_json(json).with_context(|| format!("parsing example survey '{name}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_examples_parse() {
        let surveys = all().unwrap();
        assert_eq!(surveys.len(), 3);
        for (name, survey) in surveys {
            assert!(!survey.is_empty(), "{name} has no pages");
        }
    }

    #[test]
    fn consent_shape() {
        let consent = consent().unwrap();
        assert_eq!(consent.len(), 2);
        assert!(consent.shows_withdraw_if_complete());
        let (page, date) = consent.find_question("signature_date").unwrap();
        assert_eq!(page, 1);
        assert!(date.defaults_to_today());
    }
}
