//! Interpretation of raw control values per component kind.

use chrono::NaiveDate;
use connect_survey_types::{
    ComponentId, ComponentKind, DATE_FORMAT, ResponseValue, SessionError, SurveyComponent,
};

/// Turn the raw value emitted by a control into the stored answer.
pub(crate) fn interpret(
    component: &SurveyComponent,
    id: &ComponentId,
    raw: ResponseValue,
    today: NaiveDate,
) -> Result<ResponseValue, SessionError> {
    match &component.kind {
        ComponentKind::Checkbox => match raw {
            ResponseValue::Bool(checked) => Ok(ResponseValue::Bool(checked)),
            ResponseValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(ResponseValue::Bool(true)),
                "false" => Ok(ResponseValue::Bool(false)),
                _ => Err(SessionError::invalid_answer(id, "expected true or false")),
            },
            other => Err(type_mismatch(id, "Bool", &other)),
        },
        ComponentKind::Radiogroup(group) => match raw {
            ResponseValue::String(value) if group.accepts(&value) => {
                Ok(ResponseValue::String(value))
            }
            ResponseValue::String(value) => Err(SessionError::invalid_answer(
                id,
                format!("'{value}' is not one of the choices"),
            )),
            other => Err(type_mismatch(id, "String", &other)),
        },
        ComponentKind::TextField(field) => match raw {
            ResponseValue::String(text) => {
                let trimmed = text.trim();
                if field.is_numeric() && !trimmed.is_empty() && trimmed.parse::<f64>().is_err() {
                    return Err(SessionError::invalid_answer(id, "expected a number"));
                }
                Ok(ResponseValue::String(text))
            }
            ResponseValue::Number(n) if field.is_numeric() => {
                Ok(ResponseValue::String(n.to_string()))
            }
            other => Err(type_mismatch(id, "String", &other)),
        },
        ComponentKind::DatePicker(picker) => match raw {
            ResponseValue::String(text) if text.trim().is_empty() => {
                Ok(ResponseValue::String(String::new()))
            }
            ResponseValue::String(text) => {
                let date = NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| {
                    SessionError::invalid_answer(id, format!("'{text}' is not a YYYY-MM-DD date"))
                })?;
                if !picker.contains(date, today) {
                    return Err(SessionError::invalid_answer(
                        id,
                        format!("{date} is outside the allowed range"),
                    ));
                }
                Ok(ResponseValue::String(date.format(DATE_FORMAT).to_string()))
            }
            other => Err(type_mismatch(id, "String", &other)),
        },
        ComponentKind::Hr | ComponentKind::ExpandableText | ComponentKind::Text => Err(
            SessionError::invalid_answer(id, "display components do not take answers"),
        ),
    }
}

fn type_mismatch(id: &ComponentId, expected: &str, actual: &ResponseValue) -> SessionError {
    SessionError::invalid_answer(
        id,
        format!("expected {expected}, got {}", actual.type_name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_survey_types::{Choice, DateBound, DatePicker, Radiogroup, TextField};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn run(kind: ComponentKind, raw: impl Into<ResponseValue>) -> Result<ResponseValue, SessionError> {
        let component = SurveyComponent::question("q", kind, "q");
        interpret(&component, &ComponentId::new("q"), raw.into(), today())
    }

    #[test]
    fn checkbox_accepts_bool_and_bool_strings() {
        assert_eq!(run(ComponentKind::Checkbox, true).unwrap(), ResponseValue::from(true));
        assert_eq!(run(ComponentKind::Checkbox, "FALSE").unwrap(), ResponseValue::from(false));
        assert!(run(ComponentKind::Checkbox, "maybe").is_err());
        assert!(run(ComponentKind::Checkbox, 1).is_err());
    }

    #[test]
    fn radiogroup_requires_declared_choice() {
        let kind = ComponentKind::Radiogroup(Radiogroup::new(vec![
            Choice::new("yes", "Yes"),
            Choice::new("no", "No"),
        ]));
        assert_eq!(run(kind.clone(), "yes").unwrap(), ResponseValue::from("yes"));
        assert!(matches!(
            run(kind.clone(), "perhaps"),
            Err(SessionError::InvalidAnswer { .. })
        ));
        assert!(run(kind, true).is_err());
    }

    #[test]
    fn numeric_text_field() {
        let kind = ComponentKind::TextField(TextField::with_input_type("number"));
        assert_eq!(run(kind.clone(), "12.5").unwrap(), ResponseValue::from("12.5"));
        assert_eq!(run(kind.clone(), "").unwrap(), ResponseValue::from(""));
        assert_eq!(run(kind.clone(), 3).unwrap(), ResponseValue::from("3"));
        assert!(run(kind, "twelve").is_err());

        let plain = ComponentKind::TextField(TextField::new());
        assert_eq!(run(plain.clone(), "twelve").unwrap(), ResponseValue::from("twelve"));
        assert!(run(plain, 3).is_err());
    }

    #[test]
    fn date_picker_checks_format_and_bounds() {
        let kind = ComponentKind::DatePicker(DatePicker::with_bounds(None, Some(DateBound::Today)));
        assert_eq!(run(kind.clone(), " 2024-06-01 ").unwrap(), ResponseValue::from("2024-06-01"));
        assert_eq!(run(kind.clone(), "").unwrap(), ResponseValue::from(""));
        assert!(run(kind.clone(), "06/01/2024").is_err());
        assert!(run(kind, "2024-06-16").is_err());
    }

    #[test]
    fn display_components_reject_answers() {
        assert!(run(ComponentKind::Text, "x").is_err());
    }
}
