//! Favorite and cart entries held by the user store.

use chrono::{DateTime, Utc};
use heritage_core::{ItemRef, ItemSummary, Price};
use serde::{Deserialize, Serialize};

/// A favorited catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub item: ItemSummary,
    pub added_at: DateTime<Utc>,
}

impl FavoriteEntry {
    /// The `(id, variant)` key of the favorited item.
    #[must_use]
    pub const fn key(&self) -> &ItemRef {
        &self.item.key
    }
}

/// A cart line. `quantity` is always at least 1; an entry whose quantity
/// would drop to zero is removed instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub item: ItemSummary,
    pub quantity: u64,
    /// Price captured on the first add; repeat adds never change it.
    pub unit_price: Price,
    pub added_at: DateTime<Utc>,
}

impl CartEntry {
    #[must_use]
    pub const fn key(&self) -> &ItemRef {
        &self.item.key
    }

    /// `quantity × unit_price`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Anything that can be placed in a variant section.
pub trait Keyed {
    fn item_key(&self) -> &ItemRef;
}

impl Keyed for FavoriteEntry {
    fn item_key(&self) -> &ItemRef {
        self.key()
    }
}

impl Keyed for CartEntry {
    fn item_key(&self) -> &ItemRef {
        self.key()
    }
}

impl Keyed for ItemSummary {
    fn item_key(&self) -> &ItemRef {
        &self.key
    }
}

impl<T: Keyed + ?Sized> Keyed for &T {
    fn item_key(&self) -> &ItemRef {
        (**self).item_key()
    }
}
