//! Favorites, cart and quiz history invariants of the user store.

use heritage_core::{ItemRef, Price, Variant};
use heritage_integration_tests::{empty_store, quiz_result, summary};
use heritage_showcase::store::{QuizHistory, StoreEvent};

// =============================================================================
// Favorites
// =============================================================================

#[test]
fn test_add_then_remove_favorite_for_every_variant() {
    let store = empty_store();

    for variant in Variant::ALL {
        for id in ["1", "2", "lalibela"] {
            let key = ItemRef::new(id, variant);
            assert!(store.add_favorite(summary(id, variant)));
            assert!(store.remove_favorite(&key));
            assert!(!store.is_favorite(&key));
            assert!(!store.remove_favorite(&key), "second removal is a no-op");
        }
    }
    assert!(store.list_favorites(None).is_empty());
}

#[test]
fn test_duplicate_favorite_keeps_one_entry() {
    let store = empty_store();
    store.add_favorite(summary("3", Variant::Archive));
    let before = store.list_favorites(None).len();

    assert!(!store.add_favorite(summary("3", Variant::Archive)));
    assert_eq!(store.list_favorites(None).len(), before);
}

#[test]
fn test_same_id_in_different_variants_is_distinct() {
    let store = empty_store();
    store.add_favorite(summary("1", Variant::Archive));
    store.add_favorite(summary("1", Variant::Product));

    store.remove_favorite(&ItemRef::new("1", Variant::Archive));
    assert!(store.is_favorite(&ItemRef::new("1", Variant::Product)));
    assert_eq!(store.favorite_ids(Variant::Archive).len(), 0);
    assert_eq!(store.favorite_ids(Variant::Product).len(), 1);
}

// =============================================================================
// Cart
// =============================================================================

#[test]
fn test_repeated_add_keeps_first_price() {
    let store = empty_store();
    let prices = [100, 250, 5, 100, 999];
    for (n, units) in prices.iter().enumerate() {
        let quantity = store.add_to_cart(summary("p1", Variant::Product), Price::from_units(*units));
        assert_eq!(quantity, u64::try_from(n + 1).expect("small"));
    }

    let cart = store.cart();
    assert_eq!(cart.len(), 1);
    let entry = cart.first().expect("one entry");
    assert_eq!(entry.quantity, 5);
    assert_eq!(entry.unit_price, Price::from_units(100));
}

#[test]
fn test_total_is_sum_of_line_totals() {
    let store = empty_store();
    assert_eq!(store.cart_total(), Price::ZERO);

    store.add_to_cart(summary("p1", Variant::Product), Price::from_units(650));
    store.add_to_cart(summary("p1", Variant::Product), Price::from_units(650));
    store.add_to_cart(summary("lalibela", Variant::Tour), Price::from_units(1500));
    store.add_to_cart(summary("3", Variant::Archive), Price::ZERO);

    let expected = store
        .cart()
        .iter()
        .fold(Price::ZERO, |sum, entry| sum + entry.line_total());
    assert_eq!(store.cart_total(), expected);
    assert_eq!(store.cart_total(), Price::from_units(2800));
    assert_eq!(store.cart_item_count(), 4);
}

#[test]
fn test_zero_and_negative_quantity_remove_entry() {
    for quantity in [0, -1, -40] {
        let store = empty_store();
        let key = ItemRef::new("p1", Variant::Product);
        store.add_to_cart(summary("p1", Variant::Product), Price::from_units(100));

        assert!(store.set_cart_quantity(&key, quantity));
        assert!(!store.is_in_cart(&key));
        assert_eq!(store.cart_total(), Price::ZERO);
    }
}

#[test]
fn test_add_twice_then_remove_scenario() {
    let store = empty_store();
    let key = ItemRef::new("p1", Variant::Product);

    store.add_to_cart(summary("p1", Variant::Product), Price::from_units(100));
    store.add_to_cart(summary("p1", Variant::Product), Price::from_units(100));
    assert_eq!(store.cart_total(), Price::from_units(200));

    assert!(store.remove_from_cart(&key));
    assert_eq!(store.cart_total(), Price::ZERO);
}

#[test]
fn test_large_quantity_is_stored_exactly() {
    let store = empty_store();
    let key = ItemRef::new("p1", Variant::Product);
    store.add_to_cart(summary("p1", Variant::Product), Price::from_units(1));

    assert!(store.set_cart_quantity(&key, 5_000_000_000));
    assert_eq!(store.cart_item_count(), 5_000_000_000);
    assert_eq!(store.cart_total(), Price::from_units(5_000_000_000));

    assert!(store.set_cart_quantity(&key, i64::MAX));
    assert_eq!(store.cart_item_count(), i64::MAX.unsigned_abs());
}

#[test]
fn test_total_saturates_instead_of_panicking() {
    let store = empty_store();
    let key = ItemRef::new("p1", Variant::Product);
    store.add_to_cart(summary("p1", Variant::Product), Price::from_units(i64::MAX));
    store.add_to_cart(summary("p2", Variant::Product), Price::from_units(i64::MAX));
    store.set_cart_quantity(&key, i64::MAX);

    let total = store.cart_total();
    assert!(total > Price::from_units(i64::MAX));
    assert_eq!(total + Price::from_units(1), total);
}

// =============================================================================
// Quiz history
// =============================================================================

#[test]
fn test_history_is_bounded_and_newest_first() {
    let store = empty_store();
    for score in 0..25 {
        let result = quiz_result(score % 6, 5);
        let id = result.id.clone();
        store.record_quiz_result(result);

        let history = store.quiz_history();
        assert!(history.len() <= QuizHistory::LIMIT);
        assert_eq!(history.latest().map(|r| &r.id), Some(&id));
    }
    assert_eq!(store.quiz_history().len(), QuizHistory::LIMIT);
}

// =============================================================================
// Notifications
// =============================================================================

#[tokio::test]
async fn test_readers_observe_each_effective_mutation() {
    let store = empty_store();
    let reader = store.clone();
    let mut events = reader.subscribe();

    store.add_favorite(summary("1", Variant::Archive));
    store.add_favorite(summary("1", Variant::Archive));
    store.add_to_cart(summary("p1", Variant::Product), Price::from_units(100));
    store.remove_from_cart(&ItemRef::new("missing", Variant::Product));
    store.record_quiz_result(quiz_result(5, 5));

    assert_eq!(
        events.recv().await.expect("favorite event"),
        StoreEvent::FavoritesChanged {
            variant: Variant::Archive
        }
    );
    assert_eq!(events.recv().await.expect("cart event"), StoreEvent::CartChanged);
    assert_eq!(events.recv().await.expect("quiz event"), StoreEvent::QuizRecorded);
    assert!(events.try_recv().is_err(), "no-ops publish nothing");

    assert!(reader.is_favorite(&ItemRef::new("1", Variant::Archive)));
    assert_eq!(reader.cart_item_count(), 1);
}

#[test]
fn test_snapshot_serializes() {
    let store = empty_store();
    store.add_favorite(summary("lalibela", Variant::Tour));
    store.add_to_cart(summary("p1", Variant::Product), Price::from_units(100));

    let json = serde_json::to_value(store.snapshot()).expect("serializable");
    assert_eq!(json["favorites"][0]["item"]["key"]["variant"], "tour");
    assert_eq!(json["cart"][0]["quantity"], 1);
}
