use connect_survey_types::{NextAction, SurveyComponent, SurveyPage};

/// A page as seen by a renderer: the definition plus its runtime state.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    /// Index of the page among all pages, hidden or not.
    pub number: usize,
    /// Whether the page is currently shown.
    pub is_visible: bool,
    /// The page definition.
    pub page: &'a SurveyPage,
    pub(crate) component_visibility: &'a [bool],
}

impl<'a> PageView<'a> {
    pub fn title(&self) -> Option<&'a str> {
        self.page.title.as_deref()
    }

    pub fn next_action(&self) -> Option<NextAction> {
        self.page.next_action
    }

    /// All components on the page, hidden ones included.
    pub fn components(self) -> impl Iterator<Item = ComponentView<'a>> + 'a {
        let visibility = self.component_visibility;
        let page = self.page;
        page.components
            .iter()
            .enumerate()
            .map(move |(index, component)| ComponentView {
                component,
                is_visible: visibility.get(index).copied().unwrap_or(false),
            })
    }

    /// Only the components a renderer should draw.
    pub fn visible_components(self) -> impl Iterator<Item = ComponentView<'a>> + 'a {
        self.components().filter(|view| view.is_visible)
    }
}

/// A component as seen by a renderer.
#[derive(Debug, Clone, Copy)]
pub struct ComponentView<'a> {
    pub component: &'a SurveyComponent,
    pub is_visible: bool,
}

impl ComponentView<'_> {
    pub fn is_question(&self) -> bool {
        self.component.is_question()
    }
}
