use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Per-session configuration.
///
/// Every field has a default, so hosts can deserialize a partial object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionOptions {
    /// Return `SessionError::ReadOnly` for writes to a completed session
    /// instead of ignoring them.
    pub strict_read_only: bool,

    /// The date the `"today"` sentinel resolves to. Defaults to the local date.
    pub today: Option<NaiveDate>,
}

impl SessionOptions {
    /// Options that reject writes to completed sessions.
    pub fn strict() -> Self {
        Self {
            strict_read_only: true,
            ..Self::default()
        }
    }

    /// Pin the date used for `"today"`.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The date `"today"` resolves to.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
