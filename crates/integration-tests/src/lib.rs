//! Integration tests for Heritage Showcase.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p heritage-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `store_properties` - favorites, cart and quiz history invariants
//! - `catalog_filtering` - category/search filtering and grouping
//! - `quiz_flow` - quiz state machine against the bundled quiz
//!
//! This crate only holds shared builders; the tests live in `tests/`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::{NaiveDate, Utc};
use heritage_core::{
    Email, ItemRef, ItemSummary, Language, QuizResult, QuizResultId, UserId, Variant,
};
use heritage_showcase::store::{QuizHistory, UserProfile, UserState, UserStore};
use uuid::Uuid;

/// A profile with no history, favorites or cart.
///
/// # Panics
///
/// Never; the literals are valid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn blank_profile() -> UserProfile {
    UserProfile {
        id: UserId::new("test-user"),
        name: "Abebe Kebede".to_owned(),
        email: Email::parse("abebe@example.com").unwrap(),
        profile_picture: None,
        interests: Vec::new(),
        preferred_language: Language::English,
        join_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        quiz_history: QuizHistory::default(),
    }
}

/// An empty store around [`blank_profile`].
#[must_use]
pub fn empty_store() -> UserStore {
    UserStore::new(UserState::new(blank_profile()), 64)
}

/// A catalog summary for `id` of `variant`.
#[must_use]
pub fn summary(id: &str, variant: Variant) -> ItemSummary {
    ItemSummary::new(ItemRef::new(id, variant), format!("{} {id}", variant.label()))
}

/// A quiz result with a fresh id.
#[must_use]
pub fn quiz_result(score: u32, total: u32) -> QuizResult {
    QuizResult {
        id: QuizResultId::new(Uuid::new_v4().to_string()),
        quiz_name: "Ethiopian Culture Quiz".to_owned(),
        score,
        total_questions: total,
        completed_at: Utc::now(),
        time_spent_secs: 300,
    }
}
