//! Score aggregation over completed sessions.

use serde::{Deserialize, Serialize};

use crate::model::QuestionnaireId;
use crate::questionnaire::Questionnaire;
use crate::session::StudentSession;

/// Arithmetic mean of `scores`, or 0.0 when there are none.
pub fn mean_score<I>(scores: I) -> f64
where
    I: IntoIterator<Item = u32>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), s| (sum + u64::from(s), count + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// `score` as a percentage of `total_points`, or 0.0 when the total is zero.
pub fn percentage(score: f64, total_points: u32) -> f64 {
    if total_points == 0 {
        0.0
    } else {
        score / f64::from(total_points) * 100.0
    }
}

/// Aggregate view of one questionnaire, taken under a single registry lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub questionnaire_id: QuestionnaireId,
    pub title: String,
    pub question_count: usize,
    pub total_points: u32,
    pub active_sessions: usize,
    pub completed_sessions: usize,
    pub average_score: f64,
    /// Average score relative to the questionnaire's current total points.
    pub average_percentage: f64,
    pub highest_score: Option<u32>,
    pub lowest_score: Option<u32>,
}

/// Build a [`ScoreSummary`] from already-filtered sessions.
pub fn summarize<'a, I>(
    questionnaire: &Questionnaire,
    active_sessions: usize,
    completed: I,
) -> ScoreSummary
where
    I: IntoIterator<Item = &'a StudentSession>,
{
    let scores: Vec<u32> = completed.into_iter().map(StudentSession::score).collect();
    let average_score = mean_score(scores.iter().copied());

    ScoreSummary {
        questionnaire_id: questionnaire.id(),
        title: questionnaire.title().to_string(),
        question_count: questionnaire.question_count(),
        total_points: questionnaire.total_points(),
        active_sessions,
        completed_sessions: scores.len(),
        average_score,
        average_percentage: percentage(average_score, questionnaire.total_points()),
        highest_score: scores.iter().copied().max(),
        lowest_score: scores.iter().copied().min(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean_score(std::iter::empty::<u32>()), 0.0);
    }

    #[test]
    fn mean_of_ten_and_zero() {
        assert!((mean_score([10, 0]) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_does_not_overflow() {
        let avg = mean_score([u32::MAX, u32::MAX]);
        assert!((avg - f64::from(u32::MAX)).abs() < 1.0);
    }

    #[test]
    fn percentage_guards_zero_total() {
        assert_eq!(percentage(3.0, 0), 0.0);
        assert!((percentage(2.0, 4) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_of_empty_questionnaire() {
        let q = Questionnaire::new(QuestionnaireId(1), "Quiz", "", 0);
        let summary = summarize(&q, 2, std::iter::empty::<&StudentSession>());
        assert_eq!(summary.active_sessions, 2);
        assert_eq!(summary.completed_sessions, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.average_percentage, 0.0);
        assert!(summary.highest_score.is_none());
        assert!(summary.lowest_score.is_none());
    }
}
