//! Category and search filtering over the bundled catalogs.

use std::str::FromStr;

use heritage_core::{ArchiveCategory, CraftCategory, ItemId, Price, Product, Variant};
use heritage_integration_tests::{empty_store, summary};
use heritage_showcase::catalog::{
    Catalog, CategoryFilter, Listing, ViewMode, filter_listings, group_by_variant,
};
use heritage_showcase::fixtures::FixtureSource;
use serde_json::json;

fn catalog() -> Catalog {
    FixtureSource::bundled()
        .load_catalog()
        .expect("bundled fixtures load")
}

fn product(id: &str, name: &str, category: &str) -> Product {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "description": format!("Handmade {category}"),
        "artisan_id": "1",
        "artisan_name": "Almaz Tesfaye",
        "price": "100 ETB - 200 ETB",
        "image_url": "",
        "category": category,
        "materials": [],
        "craft_time": "1 week",
    }))
    .expect("valid product")
}

/// Reference predicate written out longhand.
fn expected<'a, L: Listing>(fixture: &'a [L], category: Option<&L::Category>, query: &str) -> Vec<&'a L> {
    let needle = query.to_lowercase();
    fixture
        .iter()
        .filter(|item| category.is_none_or(|c| item.category() == c))
        .filter(|item| {
            item.title().to_lowercase().contains(&needle)
                || item.description().to_lowercase().contains(&needle)
        })
        .collect()
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_textiles_scenario_keeps_fixture_order() {
    let fixture = vec![
        product("p1", "Habesha Shawl", "textiles"),
        product("p2", "Coffee Jebena", "pottery"),
        product("p3", "Netela Scarf", "textiles"),
    ];

    let visible = filter_listings(&fixture, &CategoryFilter::Only(CraftCategory::Textiles), "");
    let ids: Vec<&ItemId> = visible.iter().map(|p| &p.id).collect();
    assert_eq!(ids, vec![&ItemId::new("p1"), &ItemId::new("p3")]);
}

#[test]
fn test_filtering_matches_reference_predicate() {
    let catalog = catalog();
    let categories = [
        None,
        Some(ArchiveCategory::Manuscripts),
        Some(ArchiveCategory::Stories),
        Some(ArchiveCategory::Artifacts),
        Some(ArchiveCategory::Places),
    ];

    for category in categories {
        let filter = category.map_or(CategoryFilter::All, CategoryFilter::Only);
        for query in ["", "lalibela", "LALIBELA", "the", "zzz"] {
            let visible = filter_listings(&catalog.archive, &filter, query);
            assert_eq!(
                visible,
                expected(&catalog.archive, category.as_ref(), query),
                "category {filter}, query {query:?}"
            );
        }
    }
}

#[test]
fn test_empty_search_returns_category_set() {
    let catalog = catalog();
    let all = filter_listings(&catalog.products, &CategoryFilter::All, "");
    assert_eq!(all.len(), catalog.products.len());

    let woodwork = filter_listings(&catalog.products, &CategoryFilter::Only(CraftCategory::Woodwork), "");
    assert!(!woodwork.is_empty());
    assert!(woodwork.iter().all(|p| p.category == CraftCategory::Woodwork));
}

#[test]
fn test_tours_filter_by_region() {
    let catalog = catalog();
    let filter = CategoryFilter::from_str("amhara").expect("any region parses");
    let visible = filter_listings(&catalog.tours, &filter, "");
    assert!(!visible.is_empty());
    assert!(visible.iter().all(|site| site.region == "amhara"));
}

#[test]
fn test_all_sentinel_parses() {
    let filter: CategoryFilter<CraftCategory> = "all".parse().expect("sentinel");
    assert_eq!(filter, CategoryFilter::All);
    assert!("ceramics".parse::<CategoryFilter<CraftCategory>>().is_err());
}

// =============================================================================
// Views
// =============================================================================

#[test]
fn test_view_mode_does_not_change_items() {
    let catalog = catalog();
    let mut view = catalog.course_view();
    view.set_search("amharic");
    let grid: Vec<_> = view.visible().iter().map(|c| c.id.clone()).collect();

    view.set_view_mode(ViewMode::List);
    let list: Vec<_> = view.visible().iter().map(|c| c.id.clone()).collect();
    assert_eq!(grid, list);
}

#[test]
fn test_artisan_search_covers_specialty() {
    let catalog = catalog();
    let mut view = catalog.artisan_view();
    let specialty = catalog.artisans.first().expect("artisans").specialty.clone();
    view.set_search(specialty.to_uppercase());
    assert!(!view.visible().is_empty());
}

// =============================================================================
// Grouping
// =============================================================================

#[test]
fn test_cart_groups_follow_variant_order() {
    let store = empty_store();
    store.add_to_cart(summary("p1", Variant::Product), Price::from_units(100));
    store.add_to_cart(summary("lalibela", Variant::Tour), Price::from_units(1500));
    store.add_to_cart(summary("p2", Variant::Product), Price::from_units(50));

    let groups = group_by_variant(store.cart());
    let labels: Vec<_> = groups.iter().map(|g| g.label).collect();
    assert_eq!(labels, vec!["Tour Sites", "Products"]);

    let products = groups.last().expect("products group");
    let ids: Vec<_> = products.entries.iter().map(|e| e.item.key.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
}
