//! Built-in sample questionnaire used by `examhall simulate`.

use examhall_core::{Question, QuestionId, QuestionType, QuestionnaireId, SessionRegistry};

/// Create the "C++ Programming Basics" quiz in `registry`.
pub fn load_sample_questionnaire(registry: &SessionRegistry) -> QuestionnaireId {
    let id = registry.create_questionnaire(
        "C++ Programming Basics",
        "A short quiz on C++ fundamentals",
        30,
    );

    let questions = [
        Question::new(
            QuestionId(1),
            "What is the size of int in C++?",
            QuestionType::MultipleChoice,
            1,
        )
        .with_option("2 bytes")
        .with_option("4 bytes")
        .with_option("8 bytes")
        .with_correct_answer("4 bytes"),
        Question::new(
            QuestionId(2),
            "Is C++ object-oriented?",
            QuestionType::TrueFalse,
            1,
        )
        .with_option("True")
        .with_option("False")
        .with_correct_answer("True"),
        Question::new(
            QuestionId(3),
            "What does STL stand for?",
            QuestionType::ShortAnswer,
            2,
        )
        .with_correct_answer("Standard Template Library"),
    ];

    for question in questions {
        registry.add_question(id, question);
    }
    tracing::info!(questionnaire = %id, "loaded sample questionnaire");
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_three_questions_worth_four_points() {
        let registry = SessionRegistry::new();
        let id = load_sample_questionnaire(&registry);
        let q = registry.questionnaire(id).unwrap();
        assert_eq!(q.question_count(), 3);
        assert_eq!(q.total_points(), 4);
        assert_eq!(q.time_limit_minutes(), 30);
    }
}
