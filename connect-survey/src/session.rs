//! The survey session: one open survey instance and its mutable state.

use std::collections::HashSet;

use connect_survey_types::{
    ComponentId, DATE_FORMAT, NextAction, RecordId, ResponseRecord, ResponseValue, Responses,
    SessionError, StoredResponse, SurveyDefinition,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::answer::interpret;
use crate::lint::lint;
use crate::options::SessionOptions;
use crate::view::PageView;
use crate::visibility::{Visibility, compute_visibility};

/// Direction of a page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

/// Create a session for a survey dialog.
///
/// Shorthand for [`SurveySession::builder`] with the usual resume inputs.
/// Fails with `SessionError::InvalidDefinition` if the survey has no pages.
pub fn create_session(
    definition: SurveyDefinition,
    prior_responses: Option<Responses>,
    prior_furthest_page: Option<usize>,
    responses_id: Option<RecordId>,
) -> Result<SurveySession, SessionError> {
    let mut builder = SurveySession::builder(definition);
    builder.prior_responses = prior_responses;
    builder.prior_furthest_page = prior_furthest_page;
    builder.responses_id = responses_id;
    builder.build()
}

/// Builder for [`SurveySession`].
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    definition: SurveyDefinition,
    prior_responses: Option<Responses>,
    prior_furthest_page: Option<usize>,
    responses_id: Option<RecordId>,
    complete: bool,
    options: SessionOptions,
}

impl SessionBuilder {
    /// Seed answers from a previous save.
    pub fn prior_responses(mut self, responses: Responses) -> Self {
        self.prior_responses = Some(responses);
        self
    }

    /// Resume an incomplete response on this page.
    pub fn prior_furthest_page(mut self, page: usize) -> Self {
        self.prior_furthest_page = Some(page);
        self
    }

    /// Id of the stored record being continued.
    pub fn responses_id(mut self, id: impl Into<RecordId>) -> Self {
        self.responses_id = Some(id.into());
        self
    }

    /// Open an already submitted response read-only.
    pub fn complete(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }

    /// Seed everything from a stored response.
    pub fn resume(self, stored: StoredResponse) -> Self {
        self.prior_responses(stored.responses)
            .prior_furthest_page(stored.furthest_page)
            .responses_id(stored.record_id)
            .complete(stored.is_complete)
    }

    /// Behaviour switches such as strict read-only mode.
    pub fn options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the definition and create the session.
    pub fn build(self) -> Result<SurveySession, SessionError> {
        let Self {
            definition,
            prior_responses,
            prior_furthest_page,
            responses_id,
            complete,
            options,
        } = self;

        if definition.is_empty() {
            return Err(SessionError::InvalidDefinition(format!(
                "survey '{}' has no pages",
                definition.title
            )));
        }
        for warning in lint(&definition) {
            warn!(survey = %definition.title, "{warning}");
        }

        let last_page = definition.len() - 1;
        let furthest = prior_furthest_page.map_or(0, |page| page.min(last_page));
        let start = if complete { 0 } else { furthest };

        let mut session = SurveySession {
            definition,
            options,
            current_page_num: 0,
            furthest_page_completed: furthest,
            responses_data: prior_responses.unwrap_or_default(),
            response_complete: complete,
            responses_id,
            visibility: Visibility::default(),
            mounted: HashSet::new(),
        };
        session.refresh();
        session.current_page_num = session.settle(start);

        debug!(
            survey = %session.definition.title,
            page = session.current_page_num,
            complete,
            "survey session created"
        );
        Ok(session)
    }
}

/// State of one open survey: answers, position and completion.
///
/// Visibility is derived from the definition and the answers and is kept up
/// to date by every mutating call.
#[derive(Debug, Clone)]
pub struct SurveySession {
    definition: SurveyDefinition,
    options: SessionOptions,
    current_page_num: usize,
    furthest_page_completed: usize,
    responses_data: Responses,
    response_complete: bool,
    responses_id: Option<RecordId>,
    visibility: Visibility,
    /// Questions that have been visible at least once.
    mounted: HashSet<ComponentId>,
}

impl SurveySession {
    /// Start building a session for the given definition.
    pub fn builder(definition: SurveyDefinition) -> SessionBuilder {
        SessionBuilder {
            definition,
            prior_responses: None,
            prior_furthest_page: None,
            responses_id: None,
            complete: false,
            options: SessionOptions::default(),
        }
    }

    // === Mutations ===

    /// Record the value a control emitted for a question.
    ///
    /// The value is interpreted according to the component kind. If the
    /// answer hides the current page, the session moves to the nearest
    /// visible page. On a
    /// completed session this is a no-op, or `SessionError::ReadOnly` with
    /// `strict_read_only`.
    pub fn record_answer(
        &mut self,
        component_id: &str,
        raw_value: impl Into<ResponseValue>,
    ) -> Result<(), SessionError> {
        if self.response_complete {
            if self.options.strict_read_only {
                return Err(SessionError::ReadOnly);
            }
            debug!(component = component_id, "ignoring answer for completed response");
            return Ok(());
        }

        let (_, component) = self
            .definition
            .find_question(component_id)
            .ok_or_else(|| SessionError::UnknownComponent(component_id.into()))?;
        let id = ComponentId::from(component_id);
        let value = interpret(component, &id, raw_value.into(), self.options.today())?;

        debug!(component = %id, "recording answer");
        self.responses_data.insert(id, value);
        self.refresh();
        if !self.visibility.page(self.current_page_num) {
            let page = self.settle(self.current_page_num);
            debug!(from = self.current_page_num, to = page, "current page hidden, moving");
            self.current_page_num = page;
        }
        Ok(())
    }

    /// Move to the next or previous visible page.
    ///
    /// Returns the new page number, or `None` (and changes nothing) if no
    /// visible page exists in that direction.
    pub fn handle_page_change(&mut self, direction: Direction) -> Option<usize> {
        let target = match direction {
            Direction::Next => (self.current_page_num + 1..self.definition.len())
                .find(|&page| self.visibility.page(page)),
            Direction::Prev => (0..self.current_page_num)
                .rev()
                .find(|&page| self.visibility.page(page)),
        };
        let Some(target) = target else {
            debug!(?direction, page = self.current_page_num, "no visible page");
            return None;
        };

        self.current_page_num = target;
        if direction == Direction::Next {
            self.furthest_page_completed = self.furthest_page_completed.max(target);
        }
        debug!(?direction, page = target, "page changed");
        Some(target)
    }

    /// Make the session read-only after a submit.
    pub fn mark_complete(&mut self) {
        self.response_complete = true;
    }

    /// Return to the state of a fresh session with no prior responses.
    pub fn reset(&mut self) {
        self.current_page_num = 0;
        self.furthest_page_completed = 0;
        self.responses_data = Responses::new();
        self.response_complete = false;
        self.responses_id = None;
        self.mounted.clear();
        self.refresh();
        self.current_page_num = self.settle(0);
    }

    /// Remember the id the response store assigned.
    pub fn set_responses_id(&mut self, id: RecordId) {
        self.responses_id = Some(id);
    }

    // === Validation ===

    /// Whether a visible, required question on the page is still unanswered.
    pub fn check_for_unanswered_in_page(&self, page_num: usize) -> bool {
        !self.unanswered_in_page(page_num).is_empty()
    }

    /// Ids of the visible, required questions on the page that lack an answer.
    ///
    /// Hidden and out-of-range pages have none.
    pub fn unanswered_in_page(&self, page_num: usize) -> Vec<&ComponentId> {
        let Some(page) = self.definition.pages.get(page_num) else {
            return Vec::new();
        };
        page.components
            .iter()
            .enumerate()
            .filter(|(index, component)| {
                component.is_required && self.visibility.component(page_num, *index)
            })
            .filter_map(|(_, component)| component.answer_id())
            .filter(|id| !self.responses_data.has_value(id.as_str()))
            .collect()
    }

    /// The first visible page with unanswered required questions.
    pub fn first_unanswered_page(&self) -> Option<usize> {
        self.visibility
            .visible_pages()
            .find(|&page| self.check_for_unanswered_in_page(page))
    }

    // === Derived queries ===

    /// The page being shown.
    pub fn current_page(&self) -> PageView<'_> {
        self.view(self.current_page_num)
    }

    /// Any page by number, hidden or not.
    pub fn page(&self, number: usize) -> Option<PageView<'_>> {
        (number < self.definition.len()).then(|| self.view(number))
    }

    /// All pages, hidden ones included.
    pub fn pages(&self) -> impl Iterator<Item = PageView<'_>> {
        (0..self.definition.len()).map(|number| self.view(number))
    }

    /// True when no visible page follows the current one.
    pub fn is_last_page(&self) -> bool {
        !(self.current_page_num + 1..self.definition.len()).any(|page| self.visibility.page(page))
    }

    /// Number of visible pages.
    pub fn total_pages(&self) -> usize {
        self.visibility.visible_page_count()
    }

    /// Number of visible question components across the whole survey.
    pub fn question_count(&self) -> usize {
        self.pages()
            .flat_map(|page| page.visible_components())
            .filter(|view| view.is_question())
            .count()
    }

    /// 1-based position of the current page among visible pages, and their total.
    pub fn progress(&self) -> (usize, usize) {
        let position = self
            .visibility
            .visible_pages()
            .take_while(|&page| page <= self.current_page_num)
            .count();
        (position, self.total_pages())
    }

    /// The forward action to offer on the current page.
    pub fn next_action(&self) -> NextAction {
        match self.current_page().next_action() {
            Some(action) => action,
            None if self.is_last_page() => NextAction::Submit,
            None => NextAction::Next,
        }
    }

    /// Whether the first component with this id is visible.
    pub fn is_component_visible(&self, id: &str) -> bool {
        self.definition
            .pages
            .iter()
            .enumerate()
            .find_map(|(page_number, page)| {
                page.components
                    .iter()
                    .position(|c| c.id.as_ref().is_some_and(|own| own.as_str() == id))
                    .map(|index| self.visibility.component(page_number, index))
            })
            .unwrap_or(false)
    }

    /// Whether reopening this completed response should offer withdrawal.
    pub fn can_withdraw(&self) -> bool {
        self.response_complete && self.definition.shows_withdraw_if_complete()
    }

    /// Build the record the host hands to the response store.
    pub fn to_record(
        &self,
        form_id: impl Into<String>,
        participant_id: impl Into<String>,
    ) -> ResponseRecord {
        ResponseRecord {
            form_id: form_id.into(),
            participant_id: participant_id.into(),
            responses: self.responses_data.clone(),
            is_complete: self.response_complete,
            furthest_page: self.furthest_page_completed,
        }
    }

    // === State accessors ===

    pub fn definition(&self) -> &SurveyDefinition {
        &self.definition
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn current_page_num(&self) -> usize {
        self.current_page_num
    }

    pub fn furthest_page_completed(&self) -> usize {
        self.furthest_page_completed
    }

    /// Current answers, hidden questions included.
    pub fn responses(&self) -> &Responses {
        &self.responses_data
    }

    pub fn is_complete(&self) -> bool {
        self.response_complete
    }

    pub fn responses_id(&self) -> Option<&RecordId> {
        self.responses_id.as_ref()
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    // === Internals ===

    fn view(&self, number: usize) -> PageView<'_> {
        PageView {
            number,
            is_visible: self.visibility.page(number),
            page: &self.definition.pages[number],
            component_visibility: self.visibility.page_components(number),
        }
    }

    /// Recompute visibility, seeding defaults for newly shown questions.
    fn refresh(&mut self) {
        loop {
            self.visibility = compute_visibility(&self.definition, &self.responses_data);
            if !self.mount_visible_questions() {
                break;
            }
        }
    }

    /// Register questions shown for the first time. Date pickers pinned to
    /// today get today's date if empty. Returns true if any answer was seeded.
    fn mount_visible_questions(&mut self) -> bool {
        let today = self.options.today();
        let mut seeded = false;
        for (page_number, page) in self.definition.pages.iter().enumerate() {
            for (index, component) in page.components.iter().enumerate() {
                if !self.visibility.component(page_number, index) {
                    continue;
                }
                let Some(id) = component.answer_id() else {
                    continue;
                };
                if !self.mounted.insert(id.clone()) {
                    continue;
                }
                if component.defaults_to_today()
                    && !self.response_complete
                    && !self.responses_data.has_value(id.as_str())
                {
                    let date = today.format(DATE_FORMAT).to_string();
                    debug!(component = %id, %date, "seeding date default");
                    self.responses_data.insert(id.clone(), date);
                    seeded = true;
                }
            }
        }
        seeded
    }

    /// The nearest visible page to `start`, looking backwards first.
    fn settle(&self, start: usize) -> usize {
        if self.visibility.page(start) {
            return start;
        }
        (0..start)
            .rev()
            .find(|&page| self.visibility.page(page))
            .or_else(|| (start + 1..self.definition.len()).find(|&page| self.visibility.page(page)))
            .unwrap_or(start)
    }
}
