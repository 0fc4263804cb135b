//! Category and free-text filtering shared by every catalog view.

use std::fmt;
use std::str::FromStr;

use heritage_core::{
    ArchiveCategory, ArchiveItem, Artisan, Course, CourseCategory, CraftCategory, Product,
    TourSite,
};

/// Sentinel category selecting every item.
pub const ALL_CATEGORIES: &str = "all";

/// A record shown in a catalog view.
pub trait Listing {
    /// What the category filter compares against.
    type Category: PartialEq + Clone + fmt::Debug;

    fn title(&self) -> &str;

    /// Second searchable field.
    fn description(&self) -> &str;

    fn category(&self) -> &Self::Category;
}

impl Listing for ArchiveItem {
    type Category = ArchiveCategory;

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &ArchiveCategory {
        &self.category
    }
}

impl Listing for TourSite {
    type Category = String;

    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &String {
        &self.region
    }
}

impl Listing for Product {
    type Category = CraftCategory;

    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &CraftCategory {
        &self.category
    }
}

impl Listing for Artisan {
    type Category = CraftCategory;

    fn title(&self) -> &str {
        &self.name
    }

    // Artisan search covers name and specialty.
    fn description(&self) -> &str {
        &self.specialty
    }

    fn category(&self) -> &CraftCategory {
        &self.craft
    }
}

impl Listing for Course {
    type Category = CourseCategory;

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &CourseCategory {
        &self.category
    }
}

/// The selected category of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter<C> {
    #[default]
    All,
    Only(C),
}

impl<C: PartialEq> CategoryFilter<C> {
    /// Whether an item in `category` passes.
    pub fn admits(&self, category: &C) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}

impl<C: FromStr> FromStr for CategoryFilter<C> {
    type Err = C::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<C: fmt::Display> fmt::Display for CategoryFilter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Only(category) => category.fmt(f),
        }
    }
}

/// Case-insensitive substring match against title or description.
///
/// An empty query matches everything.
pub fn matches_search<L: Listing + ?Sized>(listing: &L, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    listing.title().to_lowercase().contains(&needle)
        || listing.description().to_lowercase().contains(&needle)
}

/// Items passing both the category filter and the search, in fixture order.
pub fn filter_listings<'a, L: Listing>(
    fixture: &'a [L],
    filter: &CategoryFilter<L::Category>,
    query: &str,
) -> Vec<&'a L> {
    fixture
        .iter()
        .filter(|listing| filter.admits(listing.category()) && matches_search(*listing, query))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heritage_core::{ArtisanId, Email, ItemId, PriceRange};

    use super::*;

    fn product(id: &str, name: &str, category: CraftCategory) -> Product {
        Product {
            id: ItemId::new(id),
            name: name.to_owned(),
            description: format!("{name} made by hand"),
            artisan_id: ArtisanId::new("1"),
            artisan_name: "Almaz Tadesse".to_owned(),
            price: PriceRange::parse("100 ETB - 200 ETB").unwrap(),
            image_url: String::new(),
            category,
            materials: Vec::new(),
            craft_time: "1 week".to_owned(),
        }
    }

    fn fixture() -> Vec<Product> {
        vec![
            product("1", "Habesha Kemis", CraftCategory::Textiles),
            product("2", "Coffee Pot", CraftCategory::Pottery),
            product("3", "Netela Shawl", CraftCategory::Textiles),
        ]
    }

    fn ids(items: &[&Product]) -> Vec<String> {
        items.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_category_keeps_order() {
        let fixture = fixture();
        let filter = CategoryFilter::Only(CraftCategory::Textiles);
        assert_eq!(ids(&filter_listings(&fixture, &filter, "")), vec!["1", "3"]);
    }

    #[test]
    fn test_all_with_empty_query_is_identity() {
        let fixture = fixture();
        let visible = filter_listings(&fixture, &CategoryFilter::All, "");
        assert_eq!(visible.len(), fixture.len());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let fixture = fixture();
        let visible = filter_listings(&fixture, &CategoryFilter::All, "KEMIS");
        assert_eq!(ids(&visible), vec!["1"]);

        // Matches the description too.
        let visible = filter_listings(&fixture, &CategoryFilter::All, "by hand");
        assert_eq!(visible.len(), 3);
    }

    #[test]
    fn test_category_and_search_combine() {
        let fixture = fixture();
        let filter = CategoryFilter::Only(CraftCategory::Pottery);
        assert!(filter_listings(&fixture, &filter, "shawl").is_empty());
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            "all".parse::<CategoryFilter<CraftCategory>>().unwrap(),
            CategoryFilter::All
        );
        assert_eq!(
            "pottery".parse::<CategoryFilter<CraftCategory>>().unwrap(),
            CategoryFilter::Only(CraftCategory::Pottery)
        );
        assert!("ceramics".parse::<CategoryFilter<CraftCategory>>().is_err());
        assert_eq!(
            "amhara".parse::<CategoryFilter<String>>().unwrap(),
            CategoryFilter::Only("amhara".to_owned())
        );
    }

    #[test]
    fn test_artisan_search_uses_specialty() {
        let artisan = Artisan {
            id: ArtisanId::new("2"),
            name: "Bekele Worku".to_owned(),
            specialty: "Wood Carving".to_owned(),
            craft: CraftCategory::Woodwork,
            location: "Lalibela".to_owned(),
            bio: "Carves crosses".to_owned(),
            rating: 4.8,
            review_count: 89,
            image_url: String::new(),
            crafts: Vec::new(),
            experience: "20+ years".to_owned(),
            verified: true,
            phone: String::new(),
            email: Email::parse("bekele@example.com").unwrap(),
        };
        assert!(matches_search(&artisan, "carving"));
        assert!(!matches_search(&artisan, "crosses"));
    }
}
