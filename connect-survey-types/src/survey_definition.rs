use serde::{Deserialize, Serialize};

use crate::{ComponentId, Condition, DefinitionError, SurveyComponent};

/// The top-level structure of a survey: metadata plus ordered pages.
///
/// A definition is immutable once handed to a session. Runtime state such as
/// page visibility lives in the session, never here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDefinition {
    /// Title shown in the survey dialog.
    #[serde(default)]
    pub title: String,

    /// Optional subtitle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_title: Option<String>,

    /// Offer a withdraw action when the participant reopens a completed response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_withdraw_if_complete: Option<bool>,

    /// All pages, in order. Visibility never changes page indices.
    #[serde(default)]
    pub pages: Vec<SurveyPage>,
}

impl SurveyDefinition {
    /// Create a new survey definition with the given pages.
    pub fn new(title: impl Into<String>, pages: Vec<SurveyPage>) -> Self {
        Self {
            title: title.into(),
            secondary_title: None,
            show_withdraw_if_complete: None,
            pages,
        }
    }

    /// Parse a definition from survey JSON.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the secondary title.
    pub fn with_secondary_title(mut self, secondary_title: impl Into<String>) -> Self {
        self.secondary_title = Some(secondary_title.into());
        self
    }

    /// Get the pages.
    pub fn pages(&self) -> &[SurveyPage] {
        &self.pages
    }

    /// Check if the survey has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get the number of pages, visible or not.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether reopening a completed response should offer withdrawal.
    pub fn shows_withdraw_if_complete(&self) -> bool {
        self.show_withdraw_if_complete.unwrap_or(false)
    }

    /// Iterate over all components with their page number.
    pub fn components(&self) -> impl Iterator<Item = (usize, &SurveyComponent)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(number, page)| page.components.iter().map(move |c| (number, c)))
    }

    /// Find the first answerable component with the given id and its page number.
    pub fn find_question(&self, id: &str) -> Option<(usize, &SurveyComponent)> {
        let (page, index) = self.find_question_location(id)?;
        Some((page, &self.pages[page].components[index]))
    }

    /// Page number and position on the page of the first answerable
    /// component with the given id.
    pub fn find_question_location(&self, id: &str) -> Option<(usize, usize)> {
        self.pages.iter().enumerate().find_map(|(number, page)| {
            page.components
                .iter()
                .position(|c| c.answer_id().is_some_and(|own| own.as_str() == id))
                .map(|index| (number, index))
        })
    }
}

/// One page of a survey.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyPage {
    /// Optional heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Overrides the label of the forward action on this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_action: Option<NextAction>,

    /// Visibility conditions, combined with logical AND.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enable_when: Vec<Condition>,

    /// Components in display order.
    #[serde(default)]
    pub components: Vec<SurveyComponent>,
}

impl SurveyPage {
    /// Create a page with the given components.
    pub fn new(components: Vec<SurveyComponent>) -> Self {
        Self {
            components,
            ..Self::default()
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Override the forward action.
    pub fn with_next_action(mut self, next_action: NextAction) -> Self {
        self.next_action = Some(next_action);
        self
    }

    /// Add a visibility condition.
    pub fn enable_when(mut self, condition: Condition) -> Self {
        self.enable_when.push(condition);
        self
    }

    /// Find a component on this page by id.
    pub fn component(&self, id: &str) -> Option<&SurveyComponent> {
        self.components
            .iter()
            .find(|c| c.id.as_ref().map(ComponentId::as_str) == Some(id))
    }
}

/// The forward action offered at the bottom of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NextAction {
    /// Move on to the next visible page.
    Next,
    /// Submit the survey.
    Submit,
}
