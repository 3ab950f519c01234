//! One student's attempt at a questionnaire.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, QuestionnaireId, SessionId, StudentId};
use crate::questionnaire::Questionnaire;

/// Answers, timing and score for one attempt.
///
/// The questionnaire is referenced by id and looked up at scoring time, so a
/// questionnaire that grows after the session started is scored as it stands
/// at completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSession {
    id: SessionId,
    student_id: StudentId,
    student_name: String,
    questionnaire_id: QuestionnaireId,
    answers: HashMap<QuestionId, String>,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    completed: bool,
    score: u32,
}

impl StudentSession {
    pub fn new(
        id: SessionId,
        student_id: StudentId,
        student_name: impl Into<String>,
        questionnaire_id: QuestionnaireId,
    ) -> Self {
        Self {
            id,
            student_id,
            student_name: student_name.into(),
            questionnaire_id,
            answers: HashMap::new(),
            started_at: Utc::now(),
            ended_at: None,
            completed: false,
            score: 0,
        }
    }

    /// Record an answer; a later answer to the same question replaces it.
    pub fn submit_answer(&mut self, question_id: QuestionId, answer: impl Into<String>) {
        self.answers.insert(question_id, answer.into());
    }

    /// Stamp the end time and mark the session completed.
    ///
    /// Calling this twice re-stamps the end time; the registry calls it once.
    pub(crate) fn complete(&mut self) {
        self.ended_at = Some(Utc::now());
        self.completed = true;
    }

    /// Score the current answers against `questionnaire` and store the result.
    ///
    /// Answers to unknown question ids contribute nothing.
    pub fn calculate_score(&mut self, questionnaire: &Questionnaire) -> u32 {
        self.score = self
            .answers
            .iter()
            .filter_map(|(id, answer)| {
                questionnaire
                    .question_by_id(*id)
                    .filter(|q| q.check_answer(answer))
                    .map(|q| q.points())
            })
            .fold(0u32, u32::saturating_add);
        self.score
    }

    /// Time spent so far, or the total time once completed.
    pub fn elapsed(&self) -> TimeDelta {
        let end = self.ended_at.unwrap_or_else(Utc::now);
        end - self.started_at
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    pub fn questionnaire_id(&self) -> QuestionnaireId {
        self.questionnaire_id
    }

    pub fn answers(&self) -> &HashMap<QuestionId, String> {
        &self.answers
    }

    pub fn answer(&self, question_id: QuestionId) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Final score; 0 until the session is completed.
    pub fn score(&self) -> u32 {
        self.score
    }
}
