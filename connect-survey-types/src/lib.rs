//! Core types for the connect-survey crate.
//!
//! This crate provides the foundational types for describing surveys and
//! their answers:
//! - `SurveyDefinition` and `SurveyPage` - The survey structure
//! - `SurveyComponent` and `ComponentKind` - Individual questions and content
//! - `Condition` - `enableWhen` visibility rules
//! - `Responses` and `ComponentId` - Collected answers keyed by component id
//! - `ResponseStore` - The seam to the remote response service

mod component_id;
pub use component_id::ComponentId;

mod response_value;
pub use response_value::ResponseValue;

mod responses;
pub use responses::{ResponseError, Responses};

mod condition;
pub use condition::Condition;

mod component;
pub use component::{
    Choice, ComponentKind, DATE_FORMAT, DateBound, DatePicker, Radiogroup, SurveyComponent,
    TODAY_SENTINEL, TextField,
};

mod survey_definition;
pub use survey_definition::{NextAction, SurveyDefinition, SurveyPage};

mod record;
pub use record::{RecordId, ResponseRecord, StoredResponse};

mod error;
pub use error::{DefinitionError, SessionError};

mod traits;
pub use traits::ResponseStore;
