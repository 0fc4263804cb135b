//! Application state shared across views.

use std::sync::Arc;

use heritage_core::{CatalogItem, ItemRef};
use tracing::info;

use crate::catalog::{Catalog, VariantGroup, group_by_variant};
use crate::config::ShowcaseConfig;
use crate::error::{Result, ShowcaseError};
use crate::fixtures::FixtureSource;
use crate::loading::ExpiringFlag;
use crate::quiz::QuizSession;
use crate::store::{CartEntry, FavoriteEntry, StoreContext, UserStore};

/// Application state shared across all views.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the loaded catalog and the single user store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShowcaseConfig,
    catalog: Catalog,
    context: StoreContext,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("store", &self.inner.context)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Load fixtures and seed the user store.
    ///
    /// # Errors
    ///
    /// Returns an error if a fixture cannot be loaded.
    pub fn load(config: ShowcaseConfig) -> Result<Self> {
        let source = config
            .fixtures_dir
            .as_ref()
            .map_or_else(FixtureSource::bundled, FixtureSource::with_overrides);

        let catalog = source
            .load_catalog()?
            .with_tour_booking_fee(config.tour_booking_fee);
        let state = source.load_profile()?.into_state(&catalog);

        info!(
            user = %state.profile.id,
            favorites = state.favorites.len(),
            "Seeded user store"
        );

        let context = StoreContext::new();
        context.provide(UserStore::new(state, config.event_capacity))?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                context,
            }),
        })
    }

    /// Get a reference to the showcase configuration.
    #[must_use]
    pub fn config(&self) -> &ShowcaseConfig {
        &self.inner.config
    }

    /// Get a reference to the loaded catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The provider slot views reach the store through.
    #[must_use]
    pub fn context(&self) -> &StoreContext {
        &self.inner.context
    }

    /// The user store.
    #[must_use]
    pub fn user(&self) -> &UserStore {
        self.inner.context.use_user()
    }

    /// Resolve `key` against the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ShowcaseError::NotFound` if no such item exists.
    pub fn item(&self, key: &ItemRef) -> Result<CatalogItem> {
        self.inner
            .catalog
            .find(key)
            .ok_or_else(|| ShowcaseError::NotFound(key.to_string()))
    }

    /// Favorite `key` if it is not yet a favorite, unfavorite it otherwise.
    /// Returns whether it is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ShowcaseError::NotFound` if no such item exists.
    pub fn toggle_favorite(&self, key: &ItemRef) -> Result<bool> {
        let store = self.user();
        if store.remove_favorite(key) {
            return Ok(false);
        }
        let item = self.item(key)?;
        store.add_favorite(&item);
        Ok(true)
    }

    /// Add one unit of `key` to the cart at its catalog price and return the
    /// new quantity.
    ///
    /// # Errors
    ///
    /// Returns `ShowcaseError::NotFound` if no such item exists.
    pub fn add_to_cart(&self, key: &ItemRef) -> Result<u64> {
        let item = self.item(key)?;
        let price = self.inner.catalog.cart_price(&item);
        Ok(self.user().add_to_cart(&item, price))
    }

    /// Favorites split into variant sections.
    #[must_use]
    pub fn favorite_groups(&self) -> Vec<VariantGroup<FavoriteEntry>> {
        group_by_variant(self.user().list_favorites(None))
    }

    /// Cart entries split into variant sections.
    #[must_use]
    pub fn cart_groups(&self) -> Vec<VariantGroup<CartEntry>> {
        group_by_variant(self.user().cart())
    }

    /// A fresh session over the bundled quiz.
    #[must_use]
    pub fn quiz_session(&self) -> QuizSession {
        QuizSession::new(
            Arc::clone(&self.inner.catalog.quiz),
            self.inner.config.quiz_time_spent_secs,
        )
    }

    /// Skeleton placeholder flag for a freshly opened catalog view.
    ///
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn loading_indicator(&self) -> ExpiringFlag {
        ExpiringFlag::start(self.inner.config.loading_delay)
    }

    /// Transient "added to cart" flag.
    ///
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn added_indicator(&self) -> ExpiringFlag {
        ExpiringFlag::start(self.inner.config.added_flash)
    }
}
