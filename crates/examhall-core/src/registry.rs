//! The shared questionnaire and session registry.
//!
//! All state lives behind one mutex. Every public method takes the lock for
//! its whole duration, so each call observes and leaves a consistent state:
//! a session is always in exactly one of the active or completed maps, and
//! ids are handed out without gaps or repeats.
//!
//! Callers never get references into the registry. Lookups return cloned
//! snapshots and all handles are ids.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::RegistryError;
use crate::model::{QuestionId, QuestionnaireId, SessionId, StudentId};
use crate::question::Question;
use crate::questionnaire::Questionnaire;
use crate::session::StudentSession;
use crate::statistics::{self, ScoreSummary};

#[derive(Debug)]
struct RegistryState {
    questionnaires: BTreeMap<QuestionnaireId, Questionnaire>,
    active: HashMap<SessionId, StudentSession>,
    completed: HashMap<SessionId, StudentSession>,
    next_questionnaire_id: u64,
    next_session_id: u64,
}

impl Default for RegistryState {
    fn default() -> Self {
        Self {
            questionnaires: BTreeMap::new(),
            active: HashMap::new(),
            completed: HashMap::new(),
            next_questionnaire_id: 1,
            next_session_id: 1,
        }
    }
}

/// Owner of every questionnaire and student session in the process.
///
/// Share it between threads with `Arc<SessionRegistry>`.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    state: Mutex<RegistryState>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // No method panics while holding the guard, so a poisoned lock still
    // holds consistent state.
    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -----------------------------------------------------------------------
    // Questionnaires
    // -----------------------------------------------------------------------

    /// Create an empty questionnaire and return its id.
    pub fn create_questionnaire(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        time_limit_minutes: u32,
    ) -> QuestionnaireId {
        let mut state = self.lock();
        let id = QuestionnaireId(state.next_questionnaire_id);
        state.next_questionnaire_id += 1;

        let questionnaire = Questionnaire::new(id, title, description, time_limit_minutes);
        tracing::debug!(
            questionnaire = %id,
            title = questionnaire.title(),
            "questionnaire created"
        );
        state.questionnaires.insert(id, questionnaire);
        id
    }

    /// Append a question. Returns `false` if the questionnaire does not exist.
    pub fn add_question(&self, questionnaire_id: QuestionnaireId, question: Question) -> bool {
        let mut state = self.lock();
        let Some(questionnaire) = state.questionnaires.get_mut(&questionnaire_id) else {
            tracing::warn!(
                questionnaire = %questionnaire_id,
                "add_question: unknown questionnaire"
            );
            return false;
        };
        tracing::debug!(
            questionnaire = %questionnaire_id,
            question = %question.id(),
            points = question.points(),
            "question added"
        );
        questionnaire.add_question(question);
        true
    }

    /// Snapshot of a questionnaire.
    pub fn questionnaire(&self, id: QuestionnaireId) -> Option<Questionnaire> {
        self.lock().questionnaires.get(&id).cloned()
    }

    pub fn questionnaire_count(&self) -> usize {
        self.lock().questionnaires.len()
    }

    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    /// Start a session for a student.
    ///
    /// Unlike the other session operations this is an error, not a `false`,
    /// when the questionnaire does not exist.
    pub fn start_session(
        &self,
        student_id: StudentId,
        student_name: impl Into<String>,
        questionnaire_id: QuestionnaireId,
    ) -> Result<SessionId, RegistryError> {
        let mut state = self.lock();
        if !state.questionnaires.contains_key(&questionnaire_id) {
            return Err(RegistryError::QuestionnaireNotFound(questionnaire_id));
        }

        let id = SessionId(state.next_session_id);
        state.next_session_id += 1;

        let session = StudentSession::new(id, student_id, student_name, questionnaire_id);
        tracing::debug!(
            session = %id,
            student = %student_id,
            questionnaire = %questionnaire_id,
            "session started"
        );
        state.active.insert(id, session);
        Ok(id)
    }

    /// Record an answer. Returns `false` unless the session is active.
    pub fn submit_answer(
        &self,
        session_id: SessionId,
        question_id: QuestionId,
        answer: impl Into<String>,
    ) -> bool {
        let mut state = self.lock();
        match state.active.get_mut(&session_id) {
            Some(session) => {
                session.submit_answer(question_id, answer);
                true
            }
            None => {
                tracing::warn!(session = %session_id, "submit_answer: session not active");
                false
            }
        }
    }

    /// Complete and score a session, moving it to the completed set.
    ///
    /// Returns `false` unless the session is active, so each session is
    /// completed and scored at most once.
    pub fn complete_session(&self, session_id: SessionId) -> bool {
        let mut state = self.lock();
        let Some(mut session) = state.active.remove(&session_id) else {
            tracing::warn!(session = %session_id, "complete_session: session not active");
            return false;
        };

        session.complete();
        match state.questionnaires.get(&session.questionnaire_id()) {
            Some(questionnaire) => {
                session.calculate_score(questionnaire);
            }
            None => tracing::warn!(
                session = %session_id,
                questionnaire = %session.questionnaire_id(),
                "completed session references a missing questionnaire, score left at 0"
            ),
        }

        tracing::debug!(session = %session_id, score = session.score(), "session completed");
        state.completed.insert(session_id, session);
        true
    }

    /// Snapshot of a session, active or completed.
    pub fn session(&self, id: SessionId) -> Option<StudentSession> {
        let state = self.lock();
        state
            .active
            .get(&id)
            .or_else(|| state.completed.get(&id))
            .cloned()
    }

    /// Active sessions for a questionnaire, in no particular order.
    pub fn active_sessions_for(&self, questionnaire_id: QuestionnaireId) -> Vec<StudentSession> {
        let state = self.lock();
        filter_by_questionnaire(&state.active, questionnaire_id)
            .cloned()
            .collect()
    }

    /// Completed sessions for a questionnaire, in no particular order.
    pub fn completed_sessions_for(&self, questionnaire_id: QuestionnaireId) -> Vec<StudentSession> {
        let state = self.lock();
        filter_by_questionnaire(&state.completed, questionnaire_id)
            .cloned()
            .collect()
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Mean score of completed sessions, 0.0 when there are none.
    pub fn average_score(&self, questionnaire_id: QuestionnaireId) -> f64 {
        let state = self.lock();
        statistics::mean_score(
            filter_by_questionnaire(&state.completed, questionnaire_id).map(StudentSession::score),
        )
    }

    pub fn active_session_count(&self) -> usize {
        self.lock().active.len()
    }

    pub fn completed_session_count(&self) -> usize {
        self.lock().completed.len()
    }

    /// Counts and score aggregates for one questionnaire, from one snapshot.
    pub fn score_summary(&self, questionnaire_id: QuestionnaireId) -> Option<ScoreSummary> {
        let state = self.lock();
        let questionnaire = state.questionnaires.get(&questionnaire_id)?;
        let active = filter_by_questionnaire(&state.active, questionnaire_id).count();
        Some(statistics::summarize(
            questionnaire,
            active,
            filter_by_questionnaire(&state.completed, questionnaire_id),
        ))
    }
}

fn filter_by_questionnaire(
    sessions: &HashMap<SessionId, StudentSession>,
    questionnaire_id: QuestionnaireId,
) -> impl Iterator<Item = &StudentSession> {
    sessions
        .values()
        .filter(move |s| s.questionnaire_id() == questionnaire_id)
}
