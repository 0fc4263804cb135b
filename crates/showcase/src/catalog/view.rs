//! Per-view presentation state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::filter::{CategoryFilter, Listing, filter_listings};

/// Grid or list layout. Never affects which items are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// A catalog view over one shared fixture.
///
/// Holds only the user's selections; [`CatalogView::visible`] recomputes
/// the shown items from scratch each time.
#[derive(Debug, Clone)]
pub struct CatalogView<L: Listing> {
    fixture: Arc<[L]>,
    category: CategoryFilter<L::Category>,
    search: String,
    view_mode: ViewMode,
}

impl<L: Listing> CatalogView<L> {
    /// A view showing every item in grid mode.
    #[must_use]
    pub const fn new(fixture: Arc<[L]>) -> Self {
        Self {
            fixture,
            category: CategoryFilter::All,
            search: String::new(),
            view_mode: ViewMode::Grid,
        }
    }

    pub fn select_category(&mut self, category: CategoryFilter<L::Category>) {
        self.category = category;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub const fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    #[must_use]
    pub const fn category(&self) -> &CategoryFilter<L::Category> {
        &self.category
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Every item in the fixture, unfiltered.
    #[must_use]
    pub fn fixture(&self) -> &[L] {
        &self.fixture
    }

    /// Items matching the current category and search, in fixture order.
    #[must_use]
    pub fn visible(&self) -> Vec<&L> {
        filter_listings(&self.fixture, &self.category, &self.search)
    }
}
