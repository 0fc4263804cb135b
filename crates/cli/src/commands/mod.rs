//! Subcommand implementations.

pub mod catalog;
pub mod profile;
pub mod quiz;
pub mod session;

use heritage_showcase::ShowcaseError;
use heritage_showcase::quiz::QuizError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The showcase library rejected an operation.
    #[error(transparent)]
    Showcase(#[from] ShowcaseError),

    /// The quiz was driven out of order.
    #[error(transparent)]
    Quiz(#[from] QuizError),

    /// A command-line argument could not be used.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A session script line could not be parsed.
    #[error("Line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
