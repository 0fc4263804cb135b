//! The learning portal quiz flow.
//!
//! ```text
//! NotStarted --start--> InProgress(0) --select--> AnswerRevealed(0) --advance--> InProgress(1) ...
//!                                                 AnswerRevealed(last) --advance--> Completed
//! Completed --retake--> NotStarted
//! ```
//!
//! Entering `Completed` records a [`QuizResult`] in the user store.

use std::sync::Arc;

use chrono::Utc;
use heritage_core::{Question, Quiz, QuizResult, QuizResultId};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::store::UserStore;

/// Errors for actions the current phase does not allow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("cannot {action} while quiz is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    #[error("option {option} out of range ({options} options)")]
    OptionOutOfRange { option: usize, options: usize },
}

/// Where a session is in the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum QuizPhase {
    NotStarted,
    /// Waiting for an answer to question `index`.
    InProgress { index: usize },
    /// Question `index` answered with `selected`.
    AnswerRevealed {
        index: usize,
        selected: usize,
        correct: bool,
    },
    Completed { score: u32, total: u32 },
}

impl QuizPhase {
    const fn name(self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::InProgress { .. } => "in progress",
            Self::AnswerRevealed { .. } => "showing an answer",
            Self::Completed { .. } => "completed",
        }
    }
}

/// Feedback shown after an answer is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: usize,
    pub explanation: String,
}

/// Closing message for a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizVerdict {
    Perfect,
    Great,
    Good,
    KeepLearning,
}

impl QuizVerdict {
    /// Perfect for a full score, great from 80%, good from 60%.
    #[must_use]
    pub fn for_score(score: u32, total: u32) -> Self {
        let (score, total) = (u64::from(score), u64::from(total));
        if score == total {
            Self::Perfect
        } else if score * 5 >= total * 4 {
            Self::Great
        } else if score * 5 >= total * 3 {
            Self::Good
        } else {
            Self::KeepLearning
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect Score!",
            Self::Great => "Great Job!",
            Self::Good => "Good Effort!",
            Self::KeepLearning => "Keep Learning!",
        }
    }
}

/// One user's pass through a quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Arc<Quiz>,
    phase: QuizPhase,
    score: u32,
    time_spent_secs: u32,
}

impl QuizSession {
    /// A session that has not started yet.
    ///
    /// `time_spent_secs` is recorded with the result on completion.
    #[must_use]
    pub const fn new(quiz: Arc<Quiz>, time_spent_secs: u32) -> Self {
        Self {
            quiz,
            phase: QuizPhase::NotStarted,
            score: 0,
            time_spent_secs,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub const fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Correct answers so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.quiz.questions.len()).unwrap_or(u32::MAX)
    }

    /// The question being asked or just answered.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::InProgress { index } | QuizPhase::AnswerRevealed { index, .. } => {
                self.quiz.questions.get(index)
            }
            QuizPhase::NotStarted | QuizPhase::Completed { .. } => None,
        }
    }

    /// Begin at the first question.
    ///
    /// A quiz without questions goes straight to `Completed`. Nothing is
    /// recorded for it since nothing was attempted.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless the quiz is not started.
    pub fn start(&mut self) -> Result<QuizPhase, QuizError> {
        self.expect("start", matches!(self.phase, QuizPhase::NotStarted))?;
        self.phase = if self.quiz.questions.is_empty() {
            QuizPhase::Completed { score: 0, total: 0 }
        } else {
            QuizPhase::InProgress { index: 0 }
        };
        debug!(quiz = %self.quiz.name, phase = ?self.phase, "quiz started");
        Ok(self.phase)
    }

    /// Answer the current question with option index `option`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless a question is waiting
    /// for an answer, or `QuizError::OptionOutOfRange` for an option the
    /// question does not have. State is unchanged on error.
    pub fn select_answer(&mut self, option: usize) -> Result<AnswerOutcome, QuizError> {
        let QuizPhase::InProgress { index } = self.phase else {
            return Err(self.invalid("select an answer"));
        };
        let Some(question) = self.quiz.questions.get(index) else {
            return Err(self.invalid("select an answer"));
        };
        if option >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                option,
                options: question.options.len(),
            });
        }

        let correct = question.is_correct(option);
        let outcome = AnswerOutcome {
            correct,
            correct_answer: question.correct_answer,
            explanation: question.explanation.clone(),
        };
        if correct {
            self.score += 1;
        }
        self.phase = QuizPhase::AnswerRevealed {
            index,
            selected: option,
            correct,
        };
        debug!(question = index, option, correct, score = self.score, "answer selected");
        Ok(outcome)
    }

    /// Move past a revealed answer.
    ///
    /// After the last question the session completes and its result is
    /// recorded in `store`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless an answer is revealed.
    pub fn advance(&mut self, store: &UserStore) -> Result<QuizPhase, QuizError> {
        let QuizPhase::AnswerRevealed { index, .. } = self.phase else {
            return Err(self.invalid("advance"));
        };

        let next = index + 1;
        if next < self.quiz.questions.len() {
            self.phase = QuizPhase::InProgress { index: next };
            debug!(question = next, "next question");
        } else {
            let total = self.total();
            self.phase = QuizPhase::Completed {
                score: self.score,
                total,
            };
            store.record_quiz_result(QuizResult {
                id: QuizResultId::new(Uuid::new_v4().to_string()),
                quiz_name: self.quiz.name.clone(),
                score: self.score,
                total_questions: total,
                completed_at: Utc::now(),
                time_spent_secs: self.time_spent_secs,
            });
            debug!(quiz = %self.quiz.name, score = self.score, total, "quiz completed");
        }
        Ok(self.phase)
    }

    /// Reset a completed quiz so it can be taken again.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless the quiz is completed.
    pub fn retake(&mut self) -> Result<QuizPhase, QuizError> {
        self.expect("retake", matches!(self.phase, QuizPhase::Completed { .. }))?;
        self.phase = QuizPhase::NotStarted;
        self.score = 0;
        debug!(quiz = %self.quiz.name, "quiz reset");
        Ok(self.phase)
    }

    /// Verdict for a completed session.
    #[must_use]
    pub fn verdict(&self) -> Option<QuizVerdict> {
        match self.phase {
            QuizPhase::Completed { score, total } => Some(QuizVerdict::for_score(score, total)),
            _ => None,
        }
    }

    fn expect(&self, action: &'static str, allowed: bool) -> Result<(), QuizError> {
        if allowed { Ok(()) } else { Err(self.invalid(action)) }
    }

    const fn invalid(&self, action: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            action,
            phase: self.phase.name(),
        }
    }
}
