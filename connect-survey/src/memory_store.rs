//! In-memory response store for tests and demos.
//!
//! `MemoryStore` keeps one record per form, the way the remote service does
//! for a single signed-in participant. Saves can be made to fail on demand to
//! exercise retry paths.
//!
//! # Example
//!
//! ```rust,ignore
//! use connect_survey::{MemoryStore, SurveyDialog};
//!
//! let store = MemoryStore::new();
//! let mut dialog = SurveyDialog::new(&store, "baseline", "p-1", definition);
//! dialog.open()?.record_answer("q1", "yes")?;
//! dialog.save_and_exit()?;
//!
//! assert_eq!(store.load("baseline")?.unwrap().responses.len(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::{RecordId, ResponseRecord, ResponseStore, Responses, StoredResponse};

/// A response store that keeps records in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<HashMap<String, (RecordId, ResponseRecord)>>,
    next_id: Cell<u64>,
    fail_next_save: Cell<bool>,
    saves: Cell<usize>,
}

/// Error type for MemoryStore.
#[derive(Debug, thiserror::Error)]
pub enum MemoryStoreError {
    #[error("Save failed for form '{0}'")]
    SaveFailed(String),
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a previously saved, incomplete response for a form.
    pub fn with_response(
        self,
        form_id: impl Into<String>,
        responses: Responses,
        furthest_page: usize,
    ) -> Self {
        self.insert(form_id.into(), responses, furthest_page, false);
        self
    }

    /// Seed a submitted response for a form.
    pub fn with_completed_response(self, form_id: impl Into<String>, responses: Responses) -> Self {
        self.insert(form_id.into(), responses, 0, true);
        self
    }

    /// Make the next call to `save` fail.
    pub fn fail_next_save(&self) {
        self.fail_next_save.set(true);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// The last record saved for a form.
    pub fn record(&self, form_id: &str) -> Option<ResponseRecord> {
        self.records
            .borrow()
            .get(form_id)
            .map(|(_, record)| record.clone())
    }

    fn insert(&self, form_id: String, responses: Responses, furthest_page: usize, complete: bool) {
        let record = ResponseRecord {
            form_id: form_id.clone(),
            participant_id: String::new(),
            responses,
            is_complete: complete,
            furthest_page,
        };
        let id = self.allocate_id();
        self.records.borrow_mut().insert(form_id, (id, record));
    }

    fn allocate_id(&self) -> RecordId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        RecordId::new(format!("response-{id}"))
    }
}

impl ResponseStore for MemoryStore {
    type Error = MemoryStoreError;

    fn save(&self, record: &ResponseRecord) -> Result<RecordId, Self::Error> {
        if self.fail_next_save.replace(false) {
            return Err(MemoryStoreError::SaveFailed(record.form_id.clone()));
        }

        let existing = self
            .records
            .borrow()
            .get(&record.form_id)
            .map(|(id, _)| id.clone());
        let id = existing.unwrap_or_else(|| self.allocate_id());
        self.records
            .borrow_mut()
            .insert(record.form_id.clone(), (id.clone(), record.clone()));
        self.saves.set(self.saves.get() + 1);
        Ok(id)
    }

    fn load(&self, form_id: &str) -> Result<Option<StoredResponse>, Self::Error> {
        Ok(self
            .records
            .borrow()
            .get(form_id)
            .map(|(id, record)| StoredResponse {
                responses: record.responses.clone(),
                furthest_page: record.furthest_page,
                record_id: id.clone(),
                is_complete: record.is_complete,
            }))
    }
}
