//! Identifier and question-type vocabulary shared by every examhall component.
//!
//! All external handles into the registry are plain ids; the registry stays
//! the sole owner of questionnaires and sessions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// The raw numeric value.
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Registry-assigned questionnaire identifier. Starts at 1.
    QuestionnaireId(u64)
);
id_type!(
    /// Registry-assigned session identifier. Starts at 1.
    SessionId(u64)
);
id_type!(
    /// Question identifier, assigned by whoever builds the question.
    QuestionId(u32)
);
id_type!(
    /// Caller-supplied student identifier.
    StudentId(u64)
);

/// The kind of a question, which decides how answers are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Essay,
}

impl QuestionType {
    /// Free-text types are graded case-insensitively.
    pub fn is_free_text(self) -> bool {
        matches!(self, QuestionType::ShortAnswer | QuestionType::Essay)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::TrueFalse => write!(f, "true_false"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
            QuestionType::Essay => write!(f, "essay"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multiple_choice" | "multiplechoice" | "mcq" => Ok(QuestionType::MultipleChoice),
            "true_false" | "truefalse" | "bool" => Ok(QuestionType::TrueFalse),
            "short_answer" | "shortanswer" | "short" => Ok(QuestionType::ShortAnswer),
            "essay" => Ok(QuestionType::Essay),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}
