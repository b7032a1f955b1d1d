//! # connect-survey
//!
//! Survey engine for the Connect Portal. Presentation-agnostic.
//!
//! A survey is a JSON definition of pages and components. Pages and
//! components can be gated on earlier answers with `enableWhen` conditions.
//! The engine tracks the participant's answers, which pages and components
//! are visible, where the participant is, and whether the response has been
//! submitted. Renderers read that state and feed input back in.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use connect_survey::{Direction, SurveyDefinition, create_session};
//!
//! let definition = SurveyDefinition::from_json(json)?;
//! let mut session = create_session(definition, None, None, None)?;
//!
//! session.record_answer("smoker", "yes")?;
//! if !session.check_for_unanswered_in_page(session.current_page_num()) {
//!     session.handle_page_change(Direction::Next);
//! }
//! ```
//!
//! ## Persistence
//!
//! The engine performs no I/O. `SurveyDialog` drives a `ResponseStore` for
//! open, save-and-exit and submit; `MemoryStore` is an in-memory store for
//! tests.

// Re-export all types from connect-survey-types
pub use connect_survey_types::*;

mod answer;

mod dialog;
pub use dialog::{DialogError, SurveyDialog};

mod lint;
pub use lint::{LintWarning, lint};

mod options;
pub use options::SessionOptions;

mod session;
pub use session::{Direction, SessionBuilder, SurveySession, create_session};

mod view;
pub use view::{ComponentView, PageView};

mod visibility;
pub use visibility::{Visibility, compute_visibility};

// In-memory store for testing hosts without a backend
mod memory_store;
pub use memory_store::{MemoryStore, MemoryStoreError};
