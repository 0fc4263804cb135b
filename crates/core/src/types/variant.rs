//! Catalog variants and the `(id, variant)` key shared by favorites and cart entries.

use serde::{Deserialize, Serialize};

use super::id::ItemId;

/// Error returned when a string is not one of the three catalog variants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid variant: {0} (expected archive, tour or product)")]
pub struct VariantParseError(pub String);

/// One of the three catalog kinds an entry can point at.
///
/// Declaration order is the canonical display order used when grouping
/// entries into sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Archive,
    Tour,
    Product,
}

impl Variant {
    /// Every variant, in canonical order.
    pub const ALL: [Self; 3] = [Self::Archive, Self::Tour, Self::Product];

    /// Lowercase tag (`archive`, `tour`, `product`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Tour => "tour",
            Self::Product => "product",
        }
    }

    /// Section heading used by the cart and favorites views.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Archive => "Archive Items",
            Self::Tour => "Tour Sites",
            Self::Product => "Products",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Variant {
    type Err = VariantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "archive" => Ok(Self::Archive),
            "tour" => Ok(Self::Tour),
            "product" => Ok(Self::Product),
            _ => Err(VariantParseError(s.to_owned())),
        }
    }
}

/// Reference to a catalog item by `(id, variant)`.
///
/// Ids are only unique within a variant (archive item `"1"` and product `"1"`
/// are different items), so every lookup goes through this pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: ItemId,
    pub variant: Variant,
}

impl ItemRef {
    /// Create a new reference.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, variant: Variant) -> Self {
        Self {
            id: id.into(),
            variant,
        }
    }
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.variant, self.id)
    }
}
