//! A single gradeable question.

use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, QuestionType};

/// Points a question is worth when the loader does not say otherwise.
pub const DEFAULT_POINTS: u32 = 1;

/// A gradeable item. Options and the correct answer are filled in by the
/// builder before the question is handed to a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    kind: QuestionType,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_answer: String,
    points: u32,
}

impl Question {
    /// `points` must be positive; a zero-point question is a loader bug.
    pub fn new(id: QuestionId, text: impl Into<String>, kind: QuestionType, points: u32) -> Self {
        debug_assert!(points > 0, "question points must be positive");
        Self {
            id,
            text: text.into(),
            kind,
            options: Vec::new(),
            correct_answer: String::new(),
            points,
        }
    }

    /// Append a choice option.
    pub fn add_option(&mut self, option: impl Into<String>) {
        self.options.push(option.into());
    }

    pub fn set_correct_answer(&mut self, answer: impl Into<String>) {
        self.correct_answer = answer.into();
    }

    /// Builder form of [`Question::add_option`].
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.add_option(option);
        self
    }

    /// Builder form of [`Question::set_correct_answer`].
    pub fn with_correct_answer(mut self, answer: impl Into<String>) -> Self {
        self.set_correct_answer(answer);
        self
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> QuestionType {
        self.kind
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Whether `candidate` is the correct answer.
    ///
    /// Free-text questions compare ASCII-case-insensitively, and only when
    /// both strings have the same byte length. Choice questions require an
    /// exact match.
    pub fn check_answer(&self, candidate: &str) -> bool {
        if self.kind.is_free_text() {
            candidate.len() == self.correct_answer.len()
                && candidate.eq_ignore_ascii_case(&self.correct_answer)
        } else {
            candidate == self.correct_answer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stl() -> Question {
        Question::new(
            QuestionId(3),
            "What does STL stand for?",
            QuestionType::ShortAnswer,
            2,
        )
        .with_correct_answer("Standard Template Library")
    }

    #[test]
    fn short_answer_ignores_case() {
        let q = stl();
        assert!(q.check_answer("Standard Template Library"));
        assert!(q.check_answer("STANDARD TEMPLATE LIBRARY"));
        assert!(q.check_answer("standard template library"));
    }

    #[test]
    fn short_answer_length_mismatch_fails() {
        let q = stl();
        assert!(!q.check_answer("Standard Template Librar"));
        assert!(!q.check_answer("Standard Template Library "));
    }

    #[test]
    fn essay_is_case_insensitive() {
        let q = Question::new(QuestionId(1), "Explain RAII", QuestionType::Essay, 5)
            .with_correct_answer("Resource acquisition is initialization");
        assert!(q.check_answer("RESOURCE ACQUISITION IS INITIALIZATION"));
    }

    #[test]
    fn choice_questions_are_case_sensitive() {
        let q = Question::new(
            QuestionId(1),
            "What is the size of int in C++?",
            QuestionType::MultipleChoice,
            1,
        )
        .with_option("2 bytes")
        .with_option("4 bytes")
        .with_option("8 bytes")
        .with_correct_answer("4 bytes");
        assert_eq!(q.options().len(), 3);
        assert!(q.check_answer("4 bytes"));
        assert!(!q.check_answer("4 BYTES"));

        let tf = Question::new(QuestionId(2), "Is C++ object-oriented?", QuestionType::TrueFalse, 1)
            .with_correct_answer("True");
        assert!(tf.check_answer("True"));
        assert!(!tf.check_answer("true"));
    }

    #[test]
    fn unset_correct_answer_is_empty() {
        let q = Question::new(QuestionId(9), "Anything", QuestionType::ShortAnswer, DEFAULT_POINTS);
        assert_eq!(q.correct_answer(), "");
        assert!(q.check_answer(""));
        assert!(!q.check_answer("x"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "question points must be positive")]
    fn zero_points_are_rejected() {
        Question::new(QuestionId(1), "Free?", QuestionType::TrueFalse, 0);
    }
}
