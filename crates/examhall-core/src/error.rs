//! Registry error types.
//!
//! Only precondition violations are errors. Operations on sessions that are
//! not active report `false`, and lookups of missing ids return `None`.

use thiserror::Error;

use crate::model::QuestionnaireId;

/// Errors surfaced by [`crate::registry::SessionRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A session was started against a questionnaire that does not exist.
    #[error("questionnaire not found: {0}")]
    QuestionnaireNotFound(QuestionnaireId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_questionnaire() {
        let err = RegistryError::QuestionnaireNotFound(QuestionnaireId(42));
        assert_eq!(err.to_string(), "questionnaire not found: 42");
        assert_eq!(err, RegistryError::QuestionnaireNotFound(QuestionnaireId(42)));
    }
}
