//! The user-state container.
//!
//! [`UserStore`] is the single source of truth for the current user's
//! mutable state: profile, favorites, cart and quiz history. Views hold a
//! cloned handle (or reach it through a [`StoreContext`]) and call the fixed
//! operation set below. Every operation is total: operating on an absent
//! entry is a no-op reported through the return value, never an error.
//!
//! # Notification contract
//!
//! Each mutation that changes state publishes exactly one [`StoreEvent`] on a
//! broadcast channel after the write lock is released. No-op mutations
//! publish nothing. Subscribers see events in mutation order.

mod entries;
mod profile;

use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use heritage_core::{ItemId, ItemRef, ItemSummary, Price, QuizResult, Variant};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

pub use entries::{CartEntry, FavoriteEntry, Keyed};
pub use profile::{ProfileUpdate, QuizHistory, UserProfile};

/// Errors raised when wiring the store into a [`StoreContext`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// `provide` was called on a context that already holds a store.
    #[error("user store already provided")]
    AlreadyProvided,
}

/// A change published to store subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    ProfileUpdated,
    FavoritesChanged { variant: Variant },
    CartChanged,
    QuizRecorded,
}

/// Everything the store holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    pub profile: UserProfile,
    /// Insertion order; at most one entry per `(id, variant)`.
    pub favorites: Vec<FavoriteEntry>,
    /// Insertion order; at most one entry per `(id, variant)`.
    pub cart: Vec<CartEntry>,
}

impl UserState {
    /// A state with the given profile and no favorites or cart entries.
    #[must_use]
    pub const fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            favorites: Vec::new(),
            cart: Vec::new(),
        }
    }

    fn favorite_position(&self, key: &ItemRef) -> Option<usize> {
        self.favorites.iter().position(|entry| entry.key() == key)
    }

    fn cart_position(&self, key: &ItemRef) -> Option<usize> {
        self.cart.iter().position(|entry| entry.key() == key)
    }
}

/// Handle to the user-state container.
///
/// Cheaply cloneable via `Arc`; all clones observe the same state.
#[derive(Clone)]
pub struct UserStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: RwLock<UserState>,
    events: broadcast::Sender<StoreEvent>,
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("UserStore")
            .field("user", &state.profile.id)
            .field("favorites", &state.favorites.len())
            .field("cart", &state.cart.len())
            .field("subscribers", &self.inner.events.receiver_count())
            .finish()
    }
}

impl UserStore {
    /// Create a store from an initial state.
    ///
    /// # Panics
    ///
    /// Panics if `event_capacity` is zero.
    #[must_use]
    pub fn new(state: UserState, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity);
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(state),
                events,
            }),
        }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Clone of the full state.
    #[must_use]
    pub fn snapshot(&self) -> UserState {
        self.read().clone()
    }

    #[must_use]
    pub fn profile(&self) -> UserProfile {
        self.read().profile.clone()
    }

    /// Quiz history, most recent first.
    #[must_use]
    pub fn quiz_history(&self) -> QuizHistory {
        self.read().profile.quiz_history.clone()
    }

    /// Whether `(id, variant)` is favorited.
    #[must_use]
    pub fn is_favorite(&self, key: &ItemRef) -> bool {
        self.read().favorite_position(key).is_some()
    }

    /// Favorites in insertion order, optionally restricted to one variant.
    #[must_use]
    pub fn list_favorites(&self, variant: Option<Variant>) -> Vec<FavoriteEntry> {
        self.read()
            .favorites
            .iter()
            .filter(|entry| variant.is_none_or(|v| entry.key().variant == v))
            .cloned()
            .collect()
    }

    /// Ids favorited within one variant.
    #[must_use]
    pub fn favorite_ids(&self, variant: Variant) -> Vec<ItemId> {
        self.read()
            .favorites
            .iter()
            .filter(|entry| entry.key().variant == variant)
            .map(|entry| entry.key().id.clone())
            .collect()
    }

    /// Cart entries in insertion order.
    #[must_use]
    pub fn cart(&self) -> Vec<CartEntry> {
        self.read().cart.clone()
    }

    #[must_use]
    pub fn is_in_cart(&self, key: &ItemRef) -> bool {
        self.read().cart_position(key).is_some()
    }

    /// Sum of quantities across the cart.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.read()
            .cart
            .iter()
            .fold(0_u64, |acc, entry| acc.saturating_add(entry.quantity))
    }

    /// Sum of `quantity × unit_price` over all entries; zero when empty.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.read().cart.iter().map(CartEntry::line_total).sum()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Merge `update` into the profile. Always succeeds.
    pub fn update_profile(&self, update: ProfileUpdate) {
        if update.is_empty() {
            return;
        }
        self.mutate(|state| {
            update.apply(&mut state.profile);
            debug!(user = %state.profile.id, "profile updated");
            ((), Some(StoreEvent::ProfileUpdated))
        });
    }

    /// Favorite an item. Returns `false` (and changes nothing) if the
    /// `(id, variant)` pair is already favorited.
    pub fn add_favorite(&self, item: impl Into<ItemSummary>) -> bool {
        let item = item.into();
        self.mutate(|state| {
            if state.favorite_position(&item.key).is_some() {
                return (false, None);
            }
            let variant = item.key.variant;
            debug!(item = %item.key, "favorite added");
            state.favorites.push(FavoriteEntry {
                item,
                added_at: Utc::now(),
            });
            (true, Some(StoreEvent::FavoritesChanged { variant }))
        })
    }

    /// Remove a favorite. Returns `false` if it was not favorited.
    pub fn remove_favorite(&self, key: &ItemRef) -> bool {
        self.mutate(|state| match state.favorite_position(key) {
            Some(pos) => {
                state.favorites.remove(pos);
                debug!(item = %key, "favorite removed");
                (
                    true,
                    Some(StoreEvent::FavoritesChanged {
                        variant: key.variant,
                    }),
                )
            }
            None => (false, None),
        })
    }

    /// Add one unit of an item to the cart and return its new quantity.
    ///
    /// A repeat add increments the existing entry; `unit_price` is only used
    /// when the entry is first created.
    pub fn add_to_cart(&self, item: impl Into<ItemSummary>, unit_price: Price) -> u64 {
        let item = item.into();
        self.mutate(|state| {
            let existing = state.cart.iter_mut().find(|entry| entry.key() == &item.key);
            let quantity = if let Some(entry) = existing {
                entry.quantity = entry.quantity.saturating_add(1);
                entry.quantity
            } else {
                state.cart.push(CartEntry {
                    item: item.clone(),
                    quantity: 1,
                    unit_price,
                    added_at: Utc::now(),
                });
                1
            };
            debug!(item = %item.key, quantity, "added to cart");
            (quantity, Some(StoreEvent::CartChanged))
        })
    }

    /// Remove a cart entry. Returns `false` if it was not in the cart.
    pub fn remove_from_cart(&self, key: &ItemRef) -> bool {
        self.mutate(|state| match state.cart_position(key) {
            Some(pos) => {
                state.cart.remove(pos);
                debug!(item = %key, "removed from cart");
                (true, Some(StoreEvent::CartChanged))
            }
            None => (false, None),
        })
    }

    /// Set the quantity of an existing cart entry.
    ///
    /// A quantity of zero or less removes the entry. Any positive quantity
    /// is stored exactly. Returns `false` when no entry exists for `key`;
    /// this path never creates entries.
    pub fn set_cart_quantity(&self, key: &ItemRef, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_from_cart(key);
        }
        let quantity = quantity.unsigned_abs();
        self.mutate(|state| match state.cart.iter_mut().find(|entry| entry.key() == key) {
            Some(entry) => {
                if entry.quantity == quantity {
                    return (true, None);
                }
                entry.quantity = quantity;
                debug!(item = %key, quantity, "cart quantity set");
                (true, Some(StoreEvent::CartChanged))
            }
            None => (false, None),
        })
    }

    /// Empty the cart, returning how many entries were removed.
    pub fn clear_cart(&self) -> usize {
        self.mutate(|state| {
            let removed = state.cart.len();
            state.cart.clear();
            if removed == 0 {
                return (0, None);
            }
            debug!(removed, "cart cleared");
            (removed, Some(StoreEvent::CartChanged))
        })
    }

    /// Prepend a quiz result to the history, returning the result evicted
    /// to keep the history within [`QuizHistory::LIMIT`].
    pub fn record_quiz_result(&self, result: QuizResult) -> Option<QuizResult> {
        self.mutate(|state| {
            debug!(quiz = %result.quiz_name, score = result.score, "quiz result recorded");
            let evicted = state.profile.quiz_history.record(result);
            (evicted, Some(StoreEvent::QuizRecorded))
        })
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn read(&self) -> RwLockReadGuard<'_, UserState> {
        // No operation can leave the state half-updated, so a poisoned lock
        // still guards a consistent value.
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` under the write lock, then publish its event (if any).
    fn mutate<R>(&self, f: impl FnOnce(&mut UserState) -> (R, Option<StoreEvent>)) -> R {
        let (result, event) = {
            let mut state = self.write();
            f(&mut state)
        };
        if let Some(event) = event {
            // Sending only fails when nobody is subscribed.
            let _ = self.inner.events.send(event);
        }
        result
    }
}

/// The provider slot views use to reach the single [`UserStore`].
///
/// A context starts empty; the application provides the store once at
/// start-up. Reaching for the store before that is a programming error.
#[derive(Debug, Default)]
pub struct StoreContext {
    slot: OnceLock<UserStore>,
}

impl StoreContext {
    /// Create an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Install the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyProvided`] if a store is already installed.
    pub fn provide(&self, store: UserStore) -> Result<(), StoreError> {
        self.slot
            .set(store)
            .map_err(|_| StoreError::AlreadyProvided)
    }

    #[must_use]
    pub fn is_provided(&self) -> bool {
        self.slot.get().is_some()
    }

    /// The provided store.
    ///
    /// # Panics
    ///
    /// Panics if no store has been provided yet.
    #[must_use]
    pub fn use_user(&self) -> &UserStore {
        match self.slot.get() {
            Some(store) => store,
            None => panic!("use_user must be called after the user store is provided"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use heritage_core::{Email, Language, QuizResultId, UserId};
    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;

    fn store() -> UserStore {
        let profile = UserProfile {
            id: UserId::new("1"),
            name: "Desta Tadesse".to_owned(),
            email: Email::parse("desta@example.com").unwrap(),
            profile_picture: None,
            interests: vec!["history".to_owned(), "culture".to_owned()],
            preferred_language: Language::English,
            join_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            quiz_history: QuizHistory::default(),
        };
        UserStore::new(UserState::new(profile), 16)
    }

    fn item(id: &str, variant: Variant) -> ItemSummary {
        ItemSummary::new(ItemRef::new(id, variant), format!("{variant} {id}"))
    }

    fn quiz_result(id: &str) -> QuizResult {
        QuizResult {
            id: QuizResultId::new(id),
            quiz_name: "Ethiopian Culture Quiz".to_owned(),
            score: 4,
            total_questions: 5,
            completed_at: Utc::now(),
            time_spent_secs: 300,
        }
    }

    #[test]
    fn test_add_favorite_is_unique_per_key() {
        let store = store();
        assert!(store.add_favorite(item("1", Variant::Archive)));
        assert!(!store.add_favorite(item("1", Variant::Archive)));
        assert!(store.add_favorite(item("1", Variant::Product)));

        assert_eq!(store.list_favorites(None).len(), 2);
        assert_eq!(store.list_favorites(Some(Variant::Archive)).len(), 1);
    }

    #[test]
    fn test_remove_favorite_is_idempotent() {
        let store = store();
        let key = ItemRef::new("lalibela", Variant::Tour);
        store.add_favorite(item("lalibela", Variant::Tour));

        assert!(store.remove_favorite(&key));
        assert!(!store.is_favorite(&key));
        assert!(!store.remove_favorite(&key));
    }

    #[test]
    fn test_list_favorites_keeps_insertion_order() {
        let store = store();
        store.add_favorite(item("2", Variant::Product));
        store.add_favorite(item("1", Variant::Archive));
        store.add_favorite(item("1", Variant::Product));

        let ids: Vec<_> = store
            .list_favorites(Some(Variant::Product))
            .into_iter()
            .map(|entry| entry.item.key.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(
            store.favorite_ids(Variant::Archive),
            vec![ItemId::new("1")]
        );
    }

    #[test]
    fn test_repeat_add_keeps_first_price() {
        let store = store();
        assert_eq!(store.add_to_cart(item("p1", Variant::Product), Price::from_units(100)), 1);
        assert_eq!(store.add_to_cart(item("p1", Variant::Product), Price::from_units(999)), 2);

        let cart = store.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].unit_price, Price::from_units(100));
        assert_eq!(store.cart_total(), Price::from_units(200));
        assert_eq!(store.cart_item_count(), 2);
    }

    #[test]
    fn test_set_quantity() {
        let store = store();
        let key = ItemRef::new("p1", Variant::Product);

        // Absent entries are never created by this path.
        assert!(!store.set_cart_quantity(&key, 3));
        assert!(store.cart().is_empty());

        store.add_to_cart(item("p1", Variant::Product), Price::from_units(50));
        assert!(store.set_cart_quantity(&key, 4));
        assert_eq!(store.cart_total(), Price::from_units(200));

        assert!(store.set_cart_quantity(&key, -2));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_clear_cart() {
        let store = store();
        assert_eq!(store.clear_cart(), 0);
        store.add_to_cart(item("p1", Variant::Product), Price::from_units(1));
        store.add_to_cart(item("lalibela", Variant::Tour), Price::from_units(1500));
        assert_eq!(store.clear_cart(), 2);
        assert_eq!(store.cart_total(), Price::ZERO);
    }

    #[test]
    fn test_update_profile_merges() {
        let store = store();
        store.update_profile(ProfileUpdate {
            name: Some("Almaz Tadesse".to_owned()),
            ..ProfileUpdate::default()
        });
        let profile = store.profile();
        assert_eq!(profile.name, "Almaz Tadesse");
        assert_eq!(profile.email.as_str(), "desta@example.com");
    }

    #[test]
    fn test_record_quiz_result_caps_history() {
        let store = store();
        for i in 0..11 {
            store.record_quiz_result(quiz_result(&i.to_string()));
        }
        let history = store.quiz_history();
        assert_eq!(history.len(), QuizHistory::LIMIT);
        assert_eq!(history.latest().unwrap().id.as_str(), "10");
    }

    #[test]
    fn test_events_only_for_real_changes() {
        let store = store();
        let mut events = store.subscribe();
        let key = ItemRef::new("1", Variant::Archive);

        store.add_favorite(item("1", Variant::Archive));
        store.add_favorite(item("1", Variant::Archive));
        store.remove_from_cart(&key);
        store.update_profile(ProfileUpdate::default());
        store.add_to_cart(item("1", Variant::Archive), Price::ZERO);
        store.record_quiz_result(quiz_result("q"));

        assert_eq!(
            events.try_recv().unwrap(),
            StoreEvent::FavoritesChanged {
                variant: Variant::Archive
            }
        );
        assert_eq!(events.try_recv().unwrap(), StoreEvent::CartChanged);
        assert_eq!(events.try_recv().unwrap(), StoreEvent::QuizRecorded);
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_clones_share_state() {
        let store = store();
        let view = store.clone();
        store.add_favorite(item("axum", Variant::Tour));
        assert!(view.is_favorite(&ItemRef::new("axum", Variant::Tour)));
    }

    #[test]
    fn test_event_wire_format() {
        let event = StoreEvent::FavoritesChanged {
            variant: Variant::Product,
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"event":"favorites_changed","variant":"product"}"#
        );
    }

    #[test]
    fn test_context_provide_once() {
        let context = StoreContext::new();
        assert!(!context.is_provided());
        context.provide(store()).unwrap();
        assert!(context.is_provided());
        assert_eq!(context.provide(store()), Err(StoreError::AlreadyProvided));
    }

    #[test]
    #[should_panic(expected = "use_user must be called after the user store is provided")]
    fn test_use_user_before_provide_panics() {
        let context = StoreContext::new();
        let _ = context.use_user();
    }
}
