//! Catalog records loaded from static fixtures.
//!
//! Records are immutable after deserialization. Archive items, tour sites and
//! products are the three variants that can be favorited or put in the cart;
//! artisans and courses are browse-only.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::{ArtisanId, CourseId, ItemId};
use super::price::PriceRange;
use super::variant::{ItemRef, Variant};

// =============================================================================
// Categories
// =============================================================================

/// Archive collection categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveCategory {
    Manuscripts,
    Stories,
    Artifacts,
    Places,
}

/// Marketplace craft categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CraftCategory {
    Textiles,
    Pottery,
    Jewelry,
    Woodwork,
    Metalwork,
}

/// Learning portal course categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseCategory {
    Language,
    History,
    Culture,
}

/// Course difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Implements `as_str`, `Display` and `FromStr` over the serde names of a
/// fieldless enum.
macro_rules! category_names {
    ($name:ident { $($variant:ident => $tag:literal),+ $(,)? }) => {
        impl $name {
            /// Lowercase fixture tag.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag),+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok(Self::$variant),)+
                    _ => Err(format!(concat!("invalid ", stringify!($name), ": {}"), s)),
                }
            }
        }
    };
}

category_names!(ArchiveCategory {
    Manuscripts => "manuscripts",
    Stories => "stories",
    Artifacts => "artifacts",
    Places => "places",
});

category_names!(CraftCategory {
    Textiles => "textiles",
    Pottery => "pottery",
    Jewelry => "jewelry",
    Woodwork => "woodwork",
    Metalwork => "metalwork",
});

category_names!(CourseCategory {
    Language => "language",
    History => "history",
    Culture => "culture",
});

category_names!(CourseLevel {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
});

// =============================================================================
// Records
// =============================================================================

/// An archive item (manuscript, story, artifact or place).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveItem {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub category: ArchiveCategory,
    pub image_url: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A virtual tour site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourSite {
    pub id: ItemId,
    pub name: String,
    /// Town and region, e.g. "Lalibela, Amhara Region".
    pub location: String,
    /// Region used as the browse category.
    pub region: String,
    pub description: String,
    pub historical_period: String,
    pub significance: String,
    pub image_url: String,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    #[serde(default)]
    pub facts: Vec<String>,
    pub visit_duration: String,
    pub best_time_to_visit: String,
}

/// A marketplace product made by an artisan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub artisan_id: ArtisanId,
    pub artisan_name: String,
    pub price: PriceRange,
    pub image_url: String,
    pub category: CraftCategory,
    #[serde(default)]
    pub materials: Vec<String>,
    pub craft_time: String,
}

/// A marketplace artisan profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artisan {
    pub id: ArtisanId,
    pub name: String,
    pub specialty: String,
    pub craft: CraftCategory,
    pub location: String,
    pub bio: String,
    pub rating: f32,
    pub review_count: u32,
    pub image_url: String,
    #[serde(default)]
    pub crafts: Vec<String>,
    pub experience: String,
    pub verified: bool,
    pub phone: String,
    pub email: Email,
}

/// A learning portal course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub category: CourseCategory,
    pub level: CourseLevel,
    pub duration: String,
    pub lessons: u32,
    pub students: u32,
    pub rating: f32,
    pub image_url: String,
    /// Completion percentage, when the user has started the course.
    #[serde(default)]
    pub progress: Option<u8>,
}

// =============================================================================
// Favoritable / cartable items
// =============================================================================

/// A catalog item that can be favorited or added to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum CatalogItem {
    Archive(ArchiveItem),
    Tour(TourSite),
    Product(Product),
}

impl CatalogItem {
    /// Which variant this item belongs to.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Archive(_) => Variant::Archive,
            Self::Tour(_) => Variant::Tour,
            Self::Product(_) => Variant::Product,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ItemId {
        match self {
            Self::Archive(item) => &item.id,
            Self::Tour(site) => &site.id,
            Self::Product(product) => &product.id,
        }
    }

    /// The `(id, variant)` key of this item.
    #[must_use]
    pub fn key(&self) -> ItemRef {
        ItemRef::new(self.id().clone(), self.variant())
    }

    /// Display title (tour and product records call this `name`).
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Archive(item) => &item.title,
            Self::Tour(site) => &site.name,
            Self::Product(product) => &product.name,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Archive(item) => &item.description,
            Self::Tour(site) => &site.description,
            Self::Product(product) => &product.description,
        }
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        match self {
            Self::Archive(item) => &item.image_url,
            Self::Tour(site) => &site.image_url,
            Self::Product(product) => &product.image_url,
        }
    }
}

impl From<ArchiveItem> for CatalogItem {
    fn from(item: ArchiveItem) -> Self {
        Self::Archive(item)
    }
}

impl From<TourSite> for CatalogItem {
    fn from(site: TourSite) -> Self {
        Self::Tour(site)
    }
}

impl From<Product> for CatalogItem {
    fn from(product: Product) -> Self {
        Self::Product(product)
    }
}

/// The snapshot of a catalog item kept by a favorite or cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub key: ItemRef,
    pub title: String,
    pub description: String,
    pub image_url: String,
}

impl ItemSummary {
    /// Create a summary with only a key and title.
    #[must_use]
    pub fn new(key: ItemRef, title: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            description: String::new(),
            image_url: String::new(),
        }
    }
}

impl From<&CatalogItem> for ItemSummary {
    fn from(item: &CatalogItem) -> Self {
        Self {
            key: item.key(),
            title: item.title().to_owned(),
            description: item.description().to_owned(),
            image_url: item.image_url().to_owned(),
        }
    }
}

impl From<CatalogItem> for ItemSummary {
    fn from(item: CatalogItem) -> Self {
        Self::from(&item)
    }
}
