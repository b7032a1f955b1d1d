use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ComponentId, Condition, DefinitionError};

/// Date format used for `datePicker` answers and bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Sentinel accepted in place of a date bound, resolved to the current date.
pub const TODAY_SENTINEL: &str = "today";

/// A single renderable unit on a survey page: a question or display content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyComponent {
    /// Unique id within the survey. Required for question components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ComponentId>,

    /// Label or content. May embed markup, which is passed through untouched.
    #[serde(default)]
    pub text: String,

    /// Whether an answer is required before leaving the page.
    #[serde(default)]
    pub is_required: bool,

    /// Visibility conditions, combined with logical AND.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enable_when: Vec<Condition>,

    /// Presentation config for the renderer.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,

    /// What kind of component this is.
    #[serde(flatten)]
    pub kind: ComponentKind,
}

impl SurveyComponent {
    /// Create a component of the given kind with no id.
    pub fn new(kind: ComponentKind, text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            is_required: false,
            enable_when: Vec::new(),
            props: Map::new(),
            kind,
        }
    }

    /// Create a question component with an id.
    pub fn question(id: impl Into<ComponentId>, kind: ComponentKind, text: impl Into<String>) -> Self {
        Self::new(kind, text).with_id(id)
    }

    /// Set the id.
    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Mark the component as required.
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Add a visibility condition.
    pub fn enable_when(mut self, condition: Condition) -> Self {
        self.enable_when.push(condition);
        self
    }

    /// Whether this kind captures an answer.
    pub fn is_question(&self) -> bool {
        self.kind.is_question()
    }

    /// The id under which this component's answer is stored.
    ///
    /// `None` for display components and for questions without a usable id,
    /// which are rendered but can never be answered.
    pub fn answer_id(&self) -> Option<&ComponentId> {
        if !self.is_question() {
            return None;
        }
        self.id.as_ref().filter(|id| !id.is_empty())
    }

    /// A `datePicker` pinned to the current date by `min` and `max`.
    pub fn defaults_to_today(&self) -> bool {
        match &self.kind {
            ComponentKind::DatePicker(picker) => picker.is_pinned_to_today(),
            _ => false,
        }
    }
}

/// The kind of a survey component, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ComponentKind {
    /// A single boolean tick box.
    Checkbox,

    /// A date input with optional bounds.
    DatePicker(DatePicker),

    /// A horizontal rule.
    Hr,

    /// Collapsible explanatory text.
    ExpandableText,

    /// Choose one of a set of values.
    Radiogroup(Radiogroup),

    /// Free text input.
    TextField(TextField),

    /// Static text.
    Text,
}

impl ComponentKind {
    /// Whether this kind captures an answer.
    pub fn is_question(&self) -> bool {
        match self {
            Self::Checkbox | Self::DatePicker(_) | Self::Radiogroup(_) | Self::TextField(_) => {
                true
            }
            Self::Hr | Self::ExpandableText | Self::Text => false,
        }
    }

    /// The `type` tag of this kind as written in survey JSON.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Checkbox => "checkbox",
            Self::DatePicker(_) => "datePicker",
            Self::Hr => "hr",
            Self::ExpandableText => "expandableText",
            Self::Radiogroup(_) => "radiogroup",
            Self::TextField(_) => "textField",
            Self::Text => "text",
        }
    }
}

/// Options for a `datePicker` component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePicker {
    /// Earliest allowed date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<DateBound>,

    /// Latest allowed date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<DateBound>,
}

impl DatePicker {
    /// Create a date picker with the given bounds.
    pub fn with_bounds(min: Option<DateBound>, max: Option<DateBound>) -> Self {
        Self { min, max }
    }

    /// Both bounds are the `"today"` sentinel, so only one date is valid.
    pub fn is_pinned_to_today(&self) -> bool {
        matches!(
            (self.min, self.max),
            (Some(DateBound::Today), Some(DateBound::Today))
        )
    }

    /// Check a date against the bounds, resolving `"today"` to `today`.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        let above_min = self.min.is_none_or(|min| date >= min.resolve(today));
        let below_max = self.max.is_none_or(|max| date <= max.resolve(today));
        above_min && below_max
    }
}

/// A `datePicker` bound: a fixed date or the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DateBound {
    /// The `"today"` sentinel.
    Today,
    /// A fixed calendar date.
    Date(NaiveDate),
}

impl DateBound {
    /// Resolve the bound against the given current date.
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Today => today,
            Self::Date(date) => date,
        }
    }
}

impl TryFrom<String> for DateBound {
    type Error = DefinitionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case(TODAY_SENTINEL) {
            return Ok(Self::Today);
        }
        NaiveDate::parse_from_str(&value, DATE_FORMAT)
            .map(Self::Date)
            .map_err(|_| DefinitionError::InvalidDateBound(value))
    }
}

impl From<DateBound> for String {
    fn from(bound: DateBound) -> Self {
        bound.to_string()
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str(TODAY_SENTINEL),
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

/// Options for a `radiogroup` component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Radiogroup {
    /// The selectable values.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Radiogroup {
    /// Create a radiogroup with the given choices.
    pub fn new(choices: Vec<Choice>) -> Self {
        Self { choices }
    }

    /// Check whether `value` is one of the declared choice values.
    ///
    /// A radiogroup without choices accepts any value.
    pub fn accepts(&self, value: &str) -> bool {
        self.choices.is_empty() || self.choices.iter().any(|choice| choice.value == value)
    }
}

/// A value/label pair in a radiogroup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Value stored as the answer.
    pub value: String,
    /// Label shown to the participant.
    #[serde(default)]
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options for a `textField` component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    /// HTML-style input type, e.g. `"text"`, `"number"`, `"email"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_type(input_type: impl Into<String>) -> Self {
        Self {
            input_type: Some(input_type.into()),
        }
    }

    /// Whether the field only accepts numbers.
    pub fn is_numeric(&self) -> bool {
        self.input_type.as_deref() == Some("number")
    }
}
