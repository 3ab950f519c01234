//! examhall-core — questionnaires, student sessions and the shared registry.
//!
//! [`registry::SessionRegistry`] owns every questionnaire and session behind a
//! single lock and scores sessions when they complete. The remaining modules
//! define the values it manages, read-side statistics, and a concurrent
//! simulation driver.

pub mod error;
pub mod model;
pub mod question;
pub mod questionnaire;
pub mod registry;
pub mod session;
pub mod simulation;
pub mod statistics;

pub use error::RegistryError;
pub use model::{QuestionId, QuestionType, QuestionnaireId, SessionId, StudentId};
pub use question::Question;
pub use questionnaire::Questionnaire;
pub use registry::SessionRegistry;
pub use session::StudentSession;
