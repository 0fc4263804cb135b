//! Quiz content and recorded results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{QuestionId, QuizId, QuizResultId};

/// A multiple-choice question with one correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    pub explanation: String,
}

impl Question {
    /// Whether `option` is the correct answer.
    #[must_use]
    pub const fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }
}

/// A named sequence of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    pub name: String,
    pub questions: Vec<Question>,
}

/// One completed quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: QuizResultId,
    pub quiz_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub completed_at: DateTime<Utc>,
    pub time_spent_secs: u32,
}

impl QuizResult {
    /// Score as a rounded percentage of the question count (0 for an empty quiz).
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total_questions == 0 {
            return 0;
        }
        let pct = f64::from(self.score) / f64::from(self.total_questions) * 100.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // 0..=100
        let rounded = pct.round() as u32;
        rounded
    }
}
