//! Page and component visibility as a pure function of the definition and
//! the current answers.
//!
//! Visibility is recomputed wholesale after every change. Surveys hold tens
//! of components, so tracking dependencies incrementally is not worth it.

use std::collections::HashMap;

use connect_survey_types::{Condition, Responses, SurveyDefinition};

/// Computed visibility of every page and component, indexed like the definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    pages: Vec<bool>,
    components: Vec<Vec<bool>>,
}

impl Visibility {
    /// Whether page `number` is visible. Out-of-range pages are not.
    pub fn page(&self, number: usize) -> bool {
        self.pages.get(number).copied().unwrap_or(false)
    }

    /// Whether component `index` on page `page` is visible.
    ///
    /// Components on a hidden page are always hidden.
    pub fn component(&self, page: usize, index: usize) -> bool {
        self.components
            .get(page)
            .and_then(|row| row.get(index))
            .copied()
            .unwrap_or(false)
    }

    /// Visibility flags of all components on a page.
    pub fn page_components(&self, page: usize) -> &[bool] {
        self.components.get(page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Indices of visible pages, in order.
    pub fn visible_pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.pages
            .iter()
            .enumerate()
            .filter_map(|(number, visible)| visible.then_some(number))
    }

    /// Number of visible pages.
    pub fn visible_page_count(&self) -> usize {
        self.pages.iter().filter(|visible| **visible).count()
    }
}

/// Compute the visibility of every page and component.
///
/// Rules:
/// - an empty `enableWhen` list is always satisfied, a non-empty one needs every entry;
/// - a condition on an unknown question is never satisfied;
/// - a condition on a question that does not come before the conditioned
///   content is never satisfied, so page conditions only see earlier pages;
/// - the answer of a question already found hidden counts as absent, so hiding
///   a question also hides everything that depends on it.
///
/// Pages and components are evaluated in document order.
pub fn compute_visibility(definition: &SurveyDefinition, responses: &Responses) -> Visibility {
    let index = QuestionIndex::new(definition);
    let mut evaluated: HashMap<&str, bool> = HashMap::new();
    let mut visibility = Visibility {
        pages: Vec::with_capacity(definition.pages.len()),
        components: Vec::with_capacity(definition.pages.len()),
    };

    for (page_number, page) in definition.pages.iter().enumerate() {
        let page_visible = conditions_hold(
            &page.enable_when,
            (page_number, 0),
            &index,
            &evaluated,
            responses,
        );

        let mut row = Vec::with_capacity(page.components.len());
        for (position, component) in page.components.iter().enumerate() {
            let visible = page_visible
                && conditions_hold(
                    &component.enable_when,
                    (page_number, position),
                    &index,
                    &evaluated,
                    responses,
                );
            row.push(visible);

            if let Some(id) = component.answer_id()
                && index.location(id.as_str()) == Some((page_number, position))
            {
                evaluated.insert(id.as_str(), visible);
            }
        }

        visibility.pages.push(page_visible);
        visibility.components.push(row);
    }

    visibility
}

/// Whether a question at `target` is evaluated before content at `own`.
///
/// Positions are `(page, index)`. Page conditions use index 0, so they only
/// see questions on earlier pages.
pub(crate) fn precedes(target: (usize, usize), own: (usize, usize)) -> bool {
    target < own
}

fn conditions_hold(
    conditions: &[Condition],
    own: (usize, usize),
    index: &QuestionIndex<'_>,
    evaluated: &HashMap<&str, bool>,
    responses: &Responses,
) -> bool {
    conditions.iter().all(|condition| {
        let target = condition.question.as_str();
        match index.location(target) {
            None => false,
            Some(location) if !precedes(location, own) => false,
            Some(_) => {
                let current = match evaluated.get(target) {
                    Some(false) => None,
                    _ => responses.get(target),
                };
                condition.is_satisfied_by(current)
            }
        }
    })
}

/// Location of the first answerable component for each id.
struct QuestionIndex<'a> {
    locations: HashMap<&'a str, (usize, usize)>,
}

impl<'a> QuestionIndex<'a> {
    fn new(definition: &'a SurveyDefinition) -> Self {
        let mut locations = HashMap::new();
        for (page_number, page) in definition.pages.iter().enumerate() {
            for (position, component) in page.components.iter().enumerate() {
                if let Some(id) = component.answer_id() {
                    locations
                        .entry(id.as_str())
                        .or_insert((page_number, position));
                }
            }
        }
        Self { locations }
    }

    fn location(&self, id: &str) -> Option<(usize, usize)> {
        self.locations.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_survey_types::{
        Choice, ComponentKind, Radiogroup, SurveyComponent, SurveyPage, TextField,
    };

    fn yes_no(id: &str) -> SurveyComponent {
        SurveyComponent::question(
            id,
            ComponentKind::Radiogroup(Radiogroup::new(vec![
                Choice::new("yes", "Yes"),
                Choice::new("no", "No"),
            ])),
            id,
        )
    }

    fn text_field(id: &str) -> SurveyComponent {
        SurveyComponent::question(id, ComponentKind::TextField(TextField::new()), id)
    }

    #[test]
    fn unconditional_content_is_visible() {
        let definition = SurveyDefinition::new(
            "t",
            vec![SurveyPage::new(vec![
                yes_no("q1"),
                SurveyComponent::new(ComponentKind::Hr, ""),
            ])],
        );
        let visibility = compute_visibility(&definition, &Responses::new());

        assert!(visibility.page(0));
        assert!(visibility.component(0, 0));
        assert!(visibility.component(0, 1));
        assert!(!visibility.page(1));
    }

    #[test]
    fn component_follows_answer() {
        let definition = SurveyDefinition::new(
            "t",
            vec![
                SurveyPage::new(vec![yes_no("q1")]),
                SurveyPage::new(vec![
                    text_field("q2").enable_when(Condition::equals("q1", "yes")),
                ]),
            ],
        );
        let mut responses = Responses::new();

        responses.insert("q1", "no");
        assert!(!compute_visibility(&definition, &responses).component(1, 0));

        responses.insert("q1", "yes");
        assert!(compute_visibility(&definition, &responses).component(1, 0));
    }

    #[test]
    fn conditions_are_combined_with_and() {
        let definition = SurveyDefinition::new(
            "t",
            vec![SurveyPage::new(vec![
                yes_no("a"),
                yes_no("b"),
                text_field("c")
                    .enable_when(Condition::equals("a", "yes"))
                    .enable_when(Condition::answered("b")),
            ])],
        );
        let mut responses = Responses::new();
        responses.insert("a", "yes");
        assert!(!compute_visibility(&definition, &responses).component(0, 2));

        responses.insert("b", "no");
        assert!(compute_visibility(&definition, &responses).component(0, 2));
    }

    #[test]
    fn dangling_reference_hides_content() {
        let definition = SurveyDefinition::new(
            "t",
            vec![SurveyPage::new(vec![
                text_field("q1").enable_when(Condition::answered("does_not_exist")),
            ])],
        );
        let mut responses = Responses::new();
        responses.insert("does_not_exist", "value");

        assert!(!compute_visibility(&definition, &responses).component(0, 0));
    }

    #[test]
    fn forward_reference_is_never_satisfied() {
        let definition = SurveyDefinition::new(
            "t",
            vec![
                SurveyPage::new(vec![
                    text_field("early").enable_when(Condition::equals("late", "yes")),
                ]),
                SurveyPage::new(vec![yes_no("late")]),
            ],
        );
        let mut responses = Responses::new();
        responses.insert("late", "yes");

        assert!(!compute_visibility(&definition, &responses).component(0, 0));
    }

    #[test]
    fn later_sibling_is_a_forward_reference() {
        let definition = SurveyDefinition::new(
            "t",
            vec![SurveyPage::new(vec![
                yes_no("gate"),
                text_field("a").enable_when(Condition::equals("b", "yes")),
                yes_no("b").enable_when(Condition::equals("gate", "yes")),
            ])],
        );
        let mut responses = Responses::new();
        responses.insert("gate", "no");
        responses.insert("b", "yes");

        let visibility = compute_visibility(&definition, &responses);
        assert!(!visibility.component(0, 2));
        assert!(!visibility.component(0, 1));

        // Still unsatisfied once b is shown: a is evaluated before b.
        responses.insert("gate", "yes");
        let visibility = compute_visibility(&definition, &responses);
        assert!(visibility.component(0, 2));
        assert!(!visibility.component(0, 1));
    }

    #[test]
    fn page_cannot_depend_on_its_own_questions() {
        let definition = SurveyDefinition::new(
            "t",
            vec![
                SurveyPage::new(vec![yes_no("q1")]),
                SurveyPage::new(vec![yes_no("own")])
                    .enable_when(Condition::equals("own", "yes")),
            ],
        );
        let mut responses = Responses::new();
        responses.insert("own", "yes");

        assert!(!compute_visibility(&definition, &responses).page(1));
    }

    #[test]
    fn self_reference_is_never_satisfied() {
        let definition = SurveyDefinition::new(
            "t",
            vec![SurveyPage::new(vec![
                text_field("loop").enable_when(Condition::answered("loop")),
            ])],
        );
        let mut responses = Responses::new();
        responses.insert("loop", "x");

        assert!(!compute_visibility(&definition, &responses).component(0, 0));
    }

    #[test]
    fn hidden_answers_cascade() {
        let definition = SurveyDefinition::new(
            "t",
            vec![
                SurveyPage::new(vec![yes_no("q1")]),
                SurveyPage::new(vec![yes_no("q2")]).enable_when(Condition::equals("q1", "yes")),
                SurveyPage::new(vec![
                    text_field("q3").enable_when(Condition::equals("q2", "yes")),
                ]),
            ],
        );
        let mut responses = Responses::new();
        responses.insert("q1", "yes");
        responses.insert("q2", "yes");
        let visibility = compute_visibility(&definition, &responses);
        assert!(visibility.page(1));
        assert!(visibility.component(2, 0));

        responses.insert("q1", "no");
        let visibility = compute_visibility(&definition, &responses);
        assert!(!visibility.page(1));
        assert!(!visibility.component(1, 0));
        assert!(!visibility.component(2, 0));
        assert!(visibility.page(2));
    }

    #[test]
    fn hidden_page_hides_its_components() {
        let definition = SurveyDefinition::new(
            "t",
            vec![
                SurveyPage::new(vec![yes_no("q1")]),
                SurveyPage::new(vec![text_field("q2")])
                    .enable_when(Condition::equals("q1", "yes")),
            ],
        );
        let visibility = compute_visibility(&definition, &Responses::new());

        assert!(!visibility.page(1));
        assert!(!visibility.component(1, 0));
        assert_eq!(visibility.visible_page_count(), 1);
        assert_eq!(visibility.visible_pages().collect::<Vec<_>>(), vec![0]);
    }
}
