//! User profile, partial profile updates, and bounded quiz history.

use std::collections::VecDeque;

use chrono::NaiveDate;
use heritage_core::{Email, Language, QuizResult, UserId};
use serde::{Deserialize, Serialize};

/// The current user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub preferred_language: Language,
    pub join_date: NaiveDate,
    #[serde(default)]
    pub quiz_history: QuizHistory,
}

/// Fields to merge into a [`UserProfile`]. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub profile_picture: Option<String>,
    pub interests: Option<Vec<String>>,
    pub preferred_language: Option<Language>,
}

impl ProfileUpdate {
    /// Whether the update carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.profile_picture.is_none()
            && self.interests.is_none()
            && self.preferred_language.is_none()
    }

    /// Merge into `profile`.
    pub(crate) fn apply(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(picture) = self.profile_picture {
            profile.profile_picture = Some(picture);
        }
        if let Some(interests) = self.interests {
            profile.interests = interests;
        }
        if let Some(language) = self.preferred_language {
            profile.preferred_language = language;
        }
    }
}

/// Quiz results, most recent first, capped at [`QuizHistory::LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<QuizResult>", into = "Vec<QuizResult>")]
pub struct QuizHistory {
    results: VecDeque<QuizResult>,
}

impl QuizHistory {
    /// Maximum number of retained results.
    pub const LIMIT: usize = 10;

    /// Prepend `result`, returning the evicted oldest result on overflow.
    pub fn record(&mut self, result: QuizResult) -> Option<QuizResult> {
        self.results.push_front(result);
        if self.results.len() > Self::LIMIT {
            self.results.pop_back()
        } else {
            None
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The most recently recorded result.
    #[must_use]
    pub fn latest(&self) -> Option<&QuizResult> {
        self.results.front()
    }

    /// Results from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &QuizResult> {
        self.results.iter()
    }

    /// Mean of per-result score ratios as a rounded percentage; 0 when empty.
    #[must_use]
    pub fn average_percent(&self) -> u32 {
        if self.results.is_empty() {
            return 0;
        }
        let ratio_sum: f64 = self
            .results
            .iter()
            .filter(|r| r.total_questions > 0)
            .map(|r| f64::from(r.score) / f64::from(r.total_questions))
            .sum();
        #[allow(clippy::cast_precision_loss)] // at most LIMIT entries
        let mean = ratio_sum / self.results.len() as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // 0..=100
        let pct = (mean * 100.0).round() as u32;
        pct
    }

    /// Percentage of the most recent result.
    #[must_use]
    pub fn last_percent(&self) -> Option<u32> {
        self.latest().map(QuizResult::percent)
    }
}

impl From<Vec<QuizResult>> for QuizHistory {
    /// Treats `results` as most-recent-first and keeps the first `LIMIT`.
    fn from(mut results: Vec<QuizResult>) -> Self {
        results.truncate(Self::LIMIT);
        Self {
            results: results.into(),
        }
    }
}

impl From<QuizHistory> for Vec<QuizResult> {
    fn from(history: QuizHistory) -> Self {
        history.results.into()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use heritage_core::QuizResultId;

    use super::*;

    fn result(id: &str, score: u32, total: u32) -> QuizResult {
        QuizResult {
            id: QuizResultId::new(id),
            quiz_name: "Ethiopian Culture Quiz".to_owned(),
            score,
            total_questions: total,
            completed_at: Utc::now(),
            time_spent_secs: 300,
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::new("1"),
            name: "Desta Tadesse".to_owned(),
            email: Email::parse("desta@example.com").unwrap(),
            profile_picture: None,
            interests: vec!["history".to_owned()],
            preferred_language: Language::English,
            join_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            quiz_history: QuizHistory::default(),
        }
    }

    #[test]
    fn test_record_prepends_and_caps() {
        let mut history = QuizHistory::default();
        for i in 0..12 {
            let evicted = history.record(result(&i.to_string(), 1, 5));
            if i < 10 {
                assert!(evicted.is_none());
            } else {
                // Oldest surviving entry is the one evicted.
                assert_eq!(evicted.unwrap().id.as_str(), (i - 10).to_string());
            }
        }
        assert_eq!(history.len(), QuizHistory::LIMIT);
        assert_eq!(history.latest().unwrap().id.as_str(), "11");
    }

    #[test]
    fn test_average_and_last_percent() {
        let mut history = QuizHistory::default();
        assert_eq!(history.average_percent(), 0);
        assert_eq!(history.last_percent(), None);

        history.record(result("a", 3, 5));
        history.record(result("b", 4, 5));
        assert_eq!(history.average_percent(), 70);
        assert_eq!(history.last_percent(), Some(80));
    }

    #[test]
    fn test_from_vec_truncates() {
        let results = (0..15).map(|i| result(&i.to_string(), 0, 1)).collect::<Vec<_>>();
        let history = QuizHistory::from(results);
        assert_eq!(history.len(), 10);
        assert_eq!(history.latest().unwrap().id.as_str(), "0");
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let mut profile = profile();
        ProfileUpdate {
            preferred_language: Some(Language::Amharic),
            ..ProfileUpdate::default()
        }
        .apply(&mut profile);

        assert_eq!(profile.preferred_language, Language::Amharic);
        assert_eq!(profile.name, "Desta Tadesse");
        assert_eq!(profile.interests, vec!["history".to_owned()]);
    }

    #[test]
    fn test_empty_update() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            name: Some("Almaz".to_owned()),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
