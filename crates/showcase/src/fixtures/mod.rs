//! Static fixture data: the catalogs, the quiz and the starting profile.
//!
//! Every fixture is a YAML document compiled into the binary. A fixtures
//! directory can override individual files; anything missing from it falls
//! back to the bundled copy.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use heritage_core::{
    ArchiveItem, Artisan, Course, ItemId, ItemRef, ItemSummary, Product, Quiz, TourSite, Variant,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::catalog::Catalog;
use crate::store::{FavoriteEntry, UserProfile, UserState};

pub const ARCHIVE: &str = "archive.yaml";
pub const TOURS: &str = "tours.yaml";
pub const PRODUCTS: &str = "products.yaml";
pub const ARTISANS: &str = "artisans.yaml";
pub const COURSES: &str = "courses.yaml";
pub const QUIZ: &str = "quiz.yaml";
pub const PROFILE: &str = "profile.yaml";

const BUNDLED: &[(&str, &str)] = &[
    (ARCHIVE, include_str!("../../fixtures/archive.yaml")),
    (TOURS, include_str!("../../fixtures/tours.yaml")),
    (PRODUCTS, include_str!("../../fixtures/products.yaml")),
    (ARTISANS, include_str!("../../fixtures/artisans.yaml")),
    (COURSES, include_str!("../../fixtures/courses.yaml")),
    (QUIZ, include_str!("../../fixtures/quiz.yaml")),
    (PROFILE, include_str!("../../fixtures/profile.yaml")),
];

/// Errors that can occur while loading fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("No such fixture: {0}")]
    Unknown(String),

    #[error("Failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Duplicate id {id} in {file}")]
    DuplicateId { file: String, id: String },

    #[error("Invalid {file}: {reason}")]
    Invalid { file: String, reason: String },
}

/// Where fixture documents come from.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    overrides: Option<PathBuf>,
}

impl FixtureSource {
    /// Only the copies compiled into the binary.
    #[must_use]
    pub const fn bundled() -> Self {
        Self { overrides: None }
    }

    /// Prefer files found in `dir`, falling back to the bundled copies.
    #[must_use]
    pub fn with_overrides(dir: impl Into<PathBuf>) -> Self {
        Self {
            overrides: Some(dir.into()),
        }
    }

    #[must_use]
    pub fn overrides(&self) -> Option<&Path> {
        self.overrides.as_deref()
    }

    /// Raw text of one fixture file.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Unknown` for a name that is not a fixture, or
    /// `FixtureError::Io` if an override exists but cannot be read.
    pub fn read(&self, name: &str) -> Result<Cow<'static, str>, FixtureError> {
        let bundled = BUNDLED
            .iter()
            .find(|(file, _)| *file == name)
            .map(|(_, text)| *text)
            .ok_or_else(|| FixtureError::Unknown(name.to_owned()))?;

        if let Some(dir) = &self.overrides {
            let path = dir.join(name);
            if path.is_file() {
                debug!(path = %path.display(), "Using fixture override");
                return std::fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|source| FixtureError::Io {
                        file: name.to_owned(),
                        source,
                    });
            }
        }

        Ok(Cow::Borrowed(bundled))
    }

    fn parse<T: DeserializeOwned>(&self, name: &str) -> Result<T, FixtureError> {
        let text = self.read(name)?;
        serde_yaml::from_str(&text).map_err(|source| FixtureError::Parse {
            file: name.to_owned(),
            source,
        })
    }

    /// Load every catalog fixture and the quiz.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` naming the first file that fails to load or
    /// that repeats an id.
    #[instrument(skip(self), fields(overrides = ?self.overrides))]
    pub fn load_catalog(&self) -> Result<Catalog, FixtureError> {
        let archive: Vec<ArchiveItem> = self.parse(ARCHIVE)?;
        ensure_unique(ARCHIVE, &archive, |item| &item.id)?;

        let tours: Vec<TourSite> = self.parse(TOURS)?;
        ensure_unique(TOURS, &tours, |site| &site.id)?;

        let products: Vec<Product> = self.parse(PRODUCTS)?;
        ensure_unique(PRODUCTS, &products, |product| &product.id)?;

        let artisans: Vec<Artisan> = self.parse(ARTISANS)?;
        ensure_unique(ARTISANS, &artisans, |artisan| &artisan.id)?;

        let courses: Vec<Course> = self.parse(COURSES)?;
        ensure_unique(COURSES, &courses, |course| &course.id)?;

        let quiz: Quiz = self.parse(QUIZ)?;
        ensure_unique(QUIZ, &quiz.questions, |question| &question.id)?;
        validate_quiz(&quiz)?;

        info!(
            archive = archive.len(),
            tours = tours.len(),
            products = products.len(),
            artisans = artisans.len(),
            courses = courses.len(),
            questions = quiz.questions.len(),
            "Loaded catalog fixtures"
        );

        Ok(Catalog::new(archive, tours, products, artisans, courses, quiz))
    }

    /// Load the starting profile.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if the profile cannot be read or parsed.
    #[instrument(skip(self), fields(overrides = ?self.overrides))]
    pub fn load_profile(&self) -> Result<ProfileFixture, FixtureError> {
        let fixture: ProfileFixture = self.parse(PROFILE)?;
        info!(
            user = %fixture.profile.id,
            favorites = fixture.favorites.len(),
            quiz_results = fixture.profile.quiz_history.len(),
            "Loaded profile fixture"
        );
        Ok(fixture)
    }
}

/// The starting user and the favorites they begin with.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileFixture {
    pub profile: UserProfile,
    #[serde(default)]
    pub favorites: Vec<SeedFavorite>,
}

/// A favorite referenced by key; resolved against the catalog when seeding.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedFavorite {
    pub id: ItemId,
    pub variant: Variant,
    pub added_at: DateTime<Utc>,
}

impl ProfileFixture {
    /// Build the initial store state.
    ///
    /// Favorites that do not resolve to a catalog item, or repeat an earlier
    /// key, are skipped.
    #[must_use]
    pub fn into_state(self, catalog: &Catalog) -> UserState {
        let mut state = UserState::new(self.profile);
        for seed in self.favorites {
            let key = ItemRef::new(seed.id, seed.variant);
            let Some(item) = catalog.find(&key) else {
                warn!(item = %key, "Skipping seed favorite not found in catalog");
                continue;
            };
            if state.favorites.iter().any(|entry| entry.key() == &key) {
                warn!(item = %key, "Skipping duplicate seed favorite");
                continue;
            }
            state.favorites.push(FavoriteEntry {
                item: ItemSummary::from(&item),
                added_at: seed.added_at,
            });
        }
        state
    }
}

// =============================================================================
// Validation
// =============================================================================

fn ensure_unique<T, K>(file: &str, items: &[T], id: impl Fn(&T) -> &K) -> Result<(), FixtureError>
where
    K: Display + Eq + std::hash::Hash + ?Sized,
{
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let key = id(item);
        if !seen.insert(key) {
            return Err(FixtureError::DuplicateId {
                file: file.to_owned(),
                id: key.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_quiz(quiz: &Quiz) -> Result<(), FixtureError> {
    for question in &quiz.questions {
        if question.correct_answer >= question.options.len() {
            return Err(FixtureError::Invalid {
                file: QUIZ.to_owned(),
                reason: format!(
                    "question {} has answer {} but only {} options",
                    question.id,
                    question.correct_answer,
                    question.options.len()
                ),
            });
        }
    }
    Ok(())
}
