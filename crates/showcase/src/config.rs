//! Showcase configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `HERITAGE_FIXTURES_DIR` - Directory whose YAML files override the bundled fixtures
//! - `HERITAGE_LOADING_DELAY_MS` - Skeleton loading delay (default: 1500)
//! - `HERITAGE_ADDED_FLASH_MS` - "Added to cart" indicator duration (default: 2000)
//! - `HERITAGE_TOUR_BOOKING_FEE` - Cart unit price of a tour site (default: 1500)
//! - `HERITAGE_QUIZ_TIME_SPENT_SECS` - Mock time spent recorded per quiz (default: 300)
//! - `HERITAGE_EVENT_CAPACITY` - Buffered store events per subscriber (default: 64)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use heritage_core::Price;
use thiserror::Error;

const DEFAULT_LOADING_DELAY_MS: u64 = 1500;
const DEFAULT_ADDED_FLASH_MS: u64 = 2000;
const DEFAULT_TOUR_BOOKING_FEE: i64 = 1500;
const DEFAULT_QUIZ_TIME_SPENT_SECS: u32 = 300;
const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Showcase application configuration.
#[derive(Debug, Clone)]
pub struct ShowcaseConfig {
    /// Optional directory of fixture overrides
    pub fixtures_dir: Option<PathBuf>,
    /// How long catalog views show skeleton placeholders
    pub loading_delay: Duration,
    /// How long the "added to cart" indicator stays lit
    pub added_flash: Duration,
    /// Unit price charged for a tour site booking
    pub tour_booking_fee: Price,
    /// Time spent recorded with every quiz result
    pub quiz_time_spent_secs: u32,
    /// Broadcast channel capacity for store events
    pub event_capacity: usize,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: None,
            loading_delay: Duration::from_millis(DEFAULT_LOADING_DELAY_MS),
            added_flash: Duration::from_millis(DEFAULT_ADDED_FLASH_MS),
            tour_booking_fee: Price::from_units(DEFAULT_TOUR_BOOKING_FEE),
            quiz_time_spent_secs: DEFAULT_QUIZ_TIME_SPENT_SECS,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl ShowcaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let fixtures_dir = lookup("HERITAGE_FIXTURES_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        let loading_delay = parse_or(&lookup, "HERITAGE_LOADING_DELAY_MS", DEFAULT_LOADING_DELAY_MS)
            .map(Duration::from_millis)?;
        let added_flash = parse_or(&lookup, "HERITAGE_ADDED_FLASH_MS", DEFAULT_ADDED_FLASH_MS)
            .map(Duration::from_millis)?;

        let tour_booking_fee = parse_or(
            &lookup,
            "HERITAGE_TOUR_BOOKING_FEE",
            defaults.tour_booking_fee.amount(),
        )?;
        if tour_booking_fee.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                "HERITAGE_TOUR_BOOKING_FEE".to_string(),
                "must not be negative".to_string(),
            ));
        }

        let quiz_time_spent_secs = parse_or(
            &lookup,
            "HERITAGE_QUIZ_TIME_SPENT_SECS",
            DEFAULT_QUIZ_TIME_SPENT_SECS,
        )?;

        let event_capacity = parse_or(&lookup, "HERITAGE_EVENT_CAPACITY", DEFAULT_EVENT_CAPACITY)?;
        // tokio::sync::broadcast panics on a zero capacity
        if event_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "HERITAGE_EVENT_CAPACITY".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            fixtures_dir,
            loading_delay,
            added_flash,
            tour_booking_fee: Price::new(tour_booking_fee),
            quiz_time_spent_secs,
            event_capacity,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if present, falling back to `default` when unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
