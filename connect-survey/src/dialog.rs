//! The host side of a survey: open, save-and-exit, submit, cancel.
//!
//! The dialog owns the session while it is open and decides when the
//! response store is called. A failed save leaves the session open and
//! unchanged, so the participant can simply retry.

use connect_survey_types::{
    RecordId, ResponseStore, SessionError, SurveyDefinition,
};
use tracing::{debug, info};

use crate::{SessionOptions, SurveySession};

/// Error type for dialog operations.
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    /// The dialog has no open session.
    #[error("Survey dialog is not open")]
    NotOpen,

    /// Submit was refused because a visible page has unanswered required questions.
    #[error("Page {page} has unanswered required questions")]
    Unanswered { page: usize },

    /// The session rejected the operation.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The response store failed. Retryable.
    #[error("Persistence error: {0}")]
    Persistence(anyhow::Error),
}

impl DialogError {
    /// Create a persistence error from any store error.
    pub fn persistence(err: impl Into<anyhow::Error>) -> Self {
        Self::Persistence(err.into())
    }

    /// Check if retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

/// A survey dialog for one form and one participant.
#[derive(Debug)]
pub struct SurveyDialog<S> {
    store: S,
    form_id: String,
    participant_id: String,
    definition: SurveyDefinition,
    options: SessionOptions,
    session: Option<SurveySession>,
}

impl<S: ResponseStore> SurveyDialog<S> {
    /// Create a closed dialog.
    pub fn new(
        store: S,
        form_id: impl Into<String>,
        participant_id: impl Into<String>,
        definition: SurveyDefinition,
    ) -> Self {
        Self {
            store,
            form_id: form_id.into(),
            participant_id: participant_id.into(),
            definition,
            options: SessionOptions::default(),
            session: None,
        }
    }

    /// Options for sessions opened by this dialog.
    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Open the dialog, resuming any saved progress.
    ///
    /// Opening an already open dialog returns the existing session.
    pub fn open(&mut self) -> Result<&mut SurveySession, DialogError> {
        if self.session.is_none() {
            let stored = self
                .store
                .load(&self.form_id)
                .map_err(DialogError::persistence)?;
            let mut builder = SurveySession::builder(self.definition.clone())
                .options(self.options.clone());
            if let Some(stored) = stored {
                debug!(form = %self.form_id, record = %stored.record_id, "resuming saved response");
                builder = builder.resume(stored);
            }
            let session = builder.build()?;
            info!(
                form = %self.form_id,
                participant = %self.participant_id,
                page = session.current_page_num(),
                "survey dialog opened"
            );
            self.session = Some(session);
        }
        self.session.as_mut().ok_or(DialogError::NotOpen)
    }

    /// Persist progress without completing, then close.
    pub fn save_and_exit(&mut self) -> Result<RecordId, DialogError> {
        let session = self.session.as_mut().ok_or(DialogError::NotOpen)?;
        if session.is_complete() {
            return Err(SessionError::ReadOnly.into());
        }

        let record = session.to_record(&self.form_id, &self.participant_id);
        let id = self
            .store
            .save(&record)
            .map_err(DialogError::persistence)?;
        info!(form = %self.form_id, record = %id, furthest_page = record.furthest_page, "survey progress saved");

        self.close();
        Ok(id)
    }

    /// Submit the response, then close.
    ///
    /// Refused while any visible page has unanswered required questions.
    pub fn submit(&mut self) -> Result<RecordId, DialogError> {
        let session = self.session.as_mut().ok_or(DialogError::NotOpen)?;
        if session.is_complete() {
            return Err(SessionError::ReadOnly.into());
        }
        if let Some(page) = session.first_unanswered_page() {
            return Err(DialogError::Unanswered { page });
        }

        let mut record = session.to_record(&self.form_id, &self.participant_id);
        record.is_complete = true;
        let id = self
            .store
            .save(&record)
            .map_err(DialogError::persistence)?;
        session.set_responses_id(id.clone());
        session.mark_complete();
        info!(form = %self.form_id, record = %id, "survey submitted");

        self.close();
        Ok(id)
    }

    /// Close without saving.
    pub fn cancel(&mut self) {
        debug!(form = %self.form_id, "survey dialog cancelled");
        self.close();
    }

    /// Whether a session is open.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any.
    pub fn session(&self) -> Option<&SurveySession> {
        self.session.as_ref()
    }

    /// The open session, if any, for renderer input.
    pub fn session_mut(&mut self) -> Option<&mut SurveySession> {
        self.session.as_mut()
    }

    /// Whether the open session should offer withdrawal.
    pub fn can_withdraw(&self) -> bool {
        self.session.as_ref().is_some_and(SurveySession::can_withdraw)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.reset();
        }
    }
}
