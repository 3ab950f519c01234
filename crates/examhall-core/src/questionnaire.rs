//! Ordered question collections.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, QuestionnaireId};
use crate::question::Question;

/// A titled, ordered set of questions with an aggregate point total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    id: QuestionnaireId,
    title: String,
    description: String,
    /// Minutes allowed; 0 means unlimited.
    time_limit_minutes: u32,
    questions: Vec<Question>,
    total_points: u32,
}

impl Questionnaire {
    pub fn new(
        id: QuestionnaireId,
        title: impl Into<String>,
        description: impl Into<String>,
        time_limit_minutes: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            time_limit_minutes,
            questions: Vec::new(),
            total_points: 0,
        }
    }

    /// Append a question. Duplicate ids are not detected.
    pub fn add_question(&mut self, question: Question) {
        self.total_points = self.total_points.saturating_add(question.points());
        self.questions.push(question);
    }

    /// First question with the given id, in insertion order.
    pub fn question_by_id(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub fn id(&self) -> QuestionnaireId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn time_limit_minutes(&self) -> u32 {
        self.time_limit_minutes
    }

    /// The time limit, or `None` when unlimited.
    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_minutes > 0)
            .then(|| Duration::from_secs(u64::from(self.time_limit_minutes) * 60))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }
}
