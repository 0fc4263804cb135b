//! Unified error handling.
//!
//! Store mutations never fail; everything here comes from start-up (config
//! and fixtures) or from driving the quiz out of order.

use thiserror::Error;

use crate::config::ConfigError;
use crate::fixtures::FixtureError;
use crate::quiz::QuizError;
use crate::store::StoreError;

/// Application-level error type for the showcase.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A fixture could not be loaded.
    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// The store was wired up twice.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A quiz action was not allowed in the current phase.
    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    /// A catalog lookup found nothing.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `ShowcaseError`.
pub type Result<T> = std::result::Result<T, ShowcaseError>;
