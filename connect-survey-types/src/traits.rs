use crate::{RecordId, ResponseRecord, StoredResponse};

/// Trait for the remote service that persists survey responses.
///
/// The engine never calls a store itself. The host dialog decides when to
/// load and save, and a failed save must leave the session untouched so the
/// participant can retry.
pub trait ResponseStore {
    /// The error type for this store.
    type Error: Into<anyhow::Error>;

    /// Persist a response record.
    ///
    /// Saving again for the same form and participant updates the existing
    /// record and returns the same id.
    ///
    /// # Returns
    /// * `Ok(id)` identifying the stored record
    /// * `Err` on transport or service failure
    fn save(&self, record: &ResponseRecord) -> Result<RecordId, Self::Error>;

    /// Load the participant's saved response for a form, if any.
    fn load(&self, form_id: &str) -> Result<Option<StoredResponse>, Self::Error>;
}

impl<T: ResponseStore + ?Sized> ResponseStore for &T {
    type Error = T::Error;

    fn save(&self, record: &ResponseRecord) -> Result<RecordId, Self::Error> {
        (**self).save(record)
    }

    fn load(&self, form_id: &str) -> Result<Option<StoredResponse>, Self::Error> {
        (**self).load(form_id)
    }
}
