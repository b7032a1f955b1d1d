//! Structural checks on survey definitions.
//!
//! None of these findings stop a session. Bad references hide content instead
//! of crashing, so the checks exist to make schema mistakes visible in logs.

use std::collections::HashMap;

use connect_survey_types::{ComponentId, ComponentKind, Condition, SurveyDefinition};

use crate::visibility::precedes;

/// A problem found in a survey definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LintWarning {
    /// A question component has no id, so it can never be answered.
    #[error("page {page}: {kind} component #{index} has no id and is treated as display-only")]
    MissingId {
        page: usize,
        index: usize,
        kind: &'static str,
    },

    /// Two questions share an id. The first one owns the answer.
    #[error("page {page}: duplicate component id '{id}' (first defined on page {first_page})")]
    DuplicateId {
        id: ComponentId,
        page: usize,
        first_page: usize,
    },

    /// An `enableWhen` entry points at no question.
    #[error("page {page}: enableWhen references unknown question '{question}'")]
    DanglingReference { question: ComponentId, page: usize },

    /// An `enableWhen` entry points at a question that does not come before
    /// the conditioned content: a later page, a later sibling, the content
    /// itself, or a question on the gated page.
    #[error(
        "page {page}: enableWhen references question '{question}' on page {target_page}, \
         which is not answered before it"
    )]
    ForwardReference {
        question: ComponentId,
        page: usize,
        target_page: usize,
    },

    /// A radiogroup declares no choices, so any value is accepted.
    #[error("page {page}: radiogroup '{id}' has no choices")]
    MissingChoices { id: ComponentId, page: usize },
}

/// Check a definition for references and ids that will not behave as intended.
pub fn lint(definition: &SurveyDefinition) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (page_number, page) in definition.pages.iter().enumerate() {
        for (index, component) in page.components.iter().enumerate() {
            if !component.is_question() {
                continue;
            }
            let Some(id) = component.answer_id() else {
                warnings.push(LintWarning::MissingId {
                    page: page_number,
                    index,
                    kind: component.kind.type_name(),
                });
                continue;
            };
            match first_seen.get(id.as_str()) {
                Some(&first_page) => warnings.push(LintWarning::DuplicateId {
                    id: id.clone(),
                    page: page_number,
                    first_page,
                }),
                None => {
                    first_seen.insert(id.as_str(), page_number);
                }
            }
            if let ComponentKind::Radiogroup(group) = &component.kind
                && group.choices.is_empty()
            {
                warnings.push(LintWarning::MissingChoices {
                    id: id.clone(),
                    page: page_number,
                });
            }
        }
    }

    for (page_number, page) in definition.pages.iter().enumerate() {
        let page_conditions = page.enable_when.iter().map(|c| (c, 0));
        let component_conditions = page
            .components
            .iter()
            .enumerate()
            .flat_map(|(index, component)| component.enable_when.iter().map(move |c| (c, index)));
        for (condition, index) in page_conditions.chain(component_conditions) {
            if let Some(warning) = check_reference(definition, condition, (page_number, index)) {
                warnings.push(warning);
            }
        }
    }

    warnings
}

fn check_reference(
    definition: &SurveyDefinition,
    condition: &Condition,
    own: (usize, usize),
) -> Option<LintWarning> {
    let page = own.0;
    match definition.find_question_location(condition.question.as_str()) {
        None => Some(LintWarning::DanglingReference {
            question: condition.question.clone(),
            page,
        }),
        Some(target) if !precedes(target, own) => Some(LintWarning::ForwardReference {
            question: condition.question.clone(),
            page,
            target_page: target.0,
        }),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_survey_types::{Radiogroup, SurveyComponent, SurveyPage};

    #[test]
    fn clean_definition_has_no_warnings() {
        let definition = SurveyDefinition::new(
            "t",
            vec![
                SurveyPage::new(vec![SurveyComponent::question(
                    "agree",
                    ComponentKind::Checkbox,
                    "Agree?",
                )]),
                SurveyPage::new(vec![SurveyComponent::new(ComponentKind::Text, "Thanks")])
                    .enable_when(Condition::equals("agree", true)),
            ],
        );
        assert!(lint(&definition).is_empty());
    }

    #[test]
    fn reports_each_problem() {
        let definition = SurveyDefinition::new(
            "t",
            vec![
                SurveyPage::new(vec![
                    SurveyComponent::new(ComponentKind::Checkbox, "no id"),
                    SurveyComponent::question("dup", ComponentKind::Checkbox, "a"),
                    SurveyComponent::question(
                        "pick",
                        ComponentKind::Radiogroup(Radiogroup::default()),
                        "pick",
                    )
                    .enable_when(Condition::answered("later")),
                ]),
                SurveyPage::new(vec![
                    SurveyComponent::question("dup", ComponentKind::Checkbox, "b"),
                    SurveyComponent::question("later", ComponentKind::Checkbox, "c"),
                ])
                .enable_when(Condition::answered("ghost")),
            ],
        );

        let warnings = lint(&definition);
        assert_eq!(
            warnings,
            vec![
                LintWarning::MissingId {
                    page: 0,
                    index: 0,
                    kind: "checkbox"
                },
                LintWarning::MissingChoices {
                    id: "pick".into(),
                    page: 0
                },
                LintWarning::DuplicateId {
                    id: "dup".into(),
                    page: 1,
                    first_page: 0
                },
                LintWarning::ForwardReference {
                    question: "later".into(),
                    page: 0,
                    target_page: 1
                },
                LintWarning::DanglingReference {
                    question: "ghost".into(),
                    page: 1
                },
            ]
        );
    }

    #[test]
    fn reports_same_page_forward_references() {
        let definition = SurveyDefinition::new(
            "t",
            vec![
                SurveyPage::new(vec![
                    SurveyComponent::question("gate", ComponentKind::Checkbox, "gate"),
                    SurveyComponent::question("a", ComponentKind::Checkbox, "a")
                        .enable_when(Condition::equals("b", true)),
                    SurveyComponent::question("b", ComponentKind::Checkbox, "b")
                        .enable_when(Condition::equals("gate", true)),
                ]),
                SurveyPage::new(vec![SurveyComponent::question(
                    "own",
                    ComponentKind::Checkbox,
                    "own",
                )])
                .enable_when(Condition::equals("own", true)),
            ],
        );

        assert_eq!(
            lint(&definition),
            vec![
                LintWarning::ForwardReference {
                    question: "b".into(),
                    page: 0,
                    target_page: 0
                },
                LintWarning::ForwardReference {
                    question: "own".into(),
                    page: 1,
                    target_page: 1
                },
            ]
        );
    }

    #[test]
    fn warnings_render_readably() {
        let warning = LintWarning::DanglingReference {
            question: "ghost".into(),
            page: 3,
        };
        assert_eq!(
            warning.to_string(),
            "page 3: enableWhen references unknown question 'ghost'"
        );
    }
}
