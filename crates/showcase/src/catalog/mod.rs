//! Catalog browsing: the loaded fixtures, per-view filtering and the
//! variant grouping used by the cart and favorites pages.

mod filter;
mod group;
mod view;

use std::sync::Arc;

use heritage_core::{
    ArchiveItem, Artisan, ArtisanId, CatalogItem, Course, ItemRef, Price, Product, Quiz,
    TourSite, Variant,
};

pub use filter::{ALL_CATEGORIES, CategoryFilter, Listing, filter_listings, matches_search};
pub use group::{VariantGroup, group_by_variant};
pub use view::{CatalogView, ViewMode};

/// Every static collection the showcase browses.
///
/// Fixtures are shared behind `Arc` so views can hold them without copying.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub archive: Arc<[ArchiveItem]>,
    pub tours: Arc<[TourSite]>,
    pub products: Arc<[Product]>,
    pub artisans: Arc<[Artisan]>,
    pub courses: Arc<[Course]>,
    pub quiz: Arc<Quiz>,
    tour_booking_fee: Price,
}

impl Catalog {
    #[must_use]
    pub fn new(
        archive: Vec<ArchiveItem>,
        tours: Vec<TourSite>,
        products: Vec<Product>,
        artisans: Vec<Artisan>,
        courses: Vec<Course>,
        quiz: Quiz,
    ) -> Self {
        Self {
            archive: archive.into(),
            tours: tours.into(),
            products: products.into(),
            artisans: artisans.into(),
            courses: courses.into(),
            quiz: Arc::new(quiz),
            tour_booking_fee: Price::ZERO,
        }
    }

    /// Set the unit price charged for booking a tour site.
    #[must_use]
    pub const fn with_tour_booking_fee(mut self, fee: Price) -> Self {
        self.tour_booking_fee = fee;
        self
    }

    #[must_use]
    pub const fn tour_booking_fee(&self) -> Price {
        self.tour_booking_fee
    }

    /// Look up a favoritable item by its `(id, variant)` key.
    #[must_use]
    pub fn find(&self, key: &ItemRef) -> Option<CatalogItem> {
        match key.variant {
            Variant::Archive => self
                .archive
                .iter()
                .find(|item| item.id == key.id)
                .cloned()
                .map(CatalogItem::from),
            Variant::Tour => self
                .tours
                .iter()
                .find(|site| site.id == key.id)
                .cloned()
                .map(CatalogItem::from),
            Variant::Product => self
                .products
                .iter()
                .find(|product| product.id == key.id)
                .cloned()
                .map(CatalogItem::from),
        }
    }

    /// The unit price recorded when `item` is added to the cart.
    ///
    /// Products are charged the midpoint of their price range and tour sites
    /// the booking fee. Archive items have no price.
    #[must_use]
    pub fn cart_price(&self, item: &CatalogItem) -> Price {
        match item {
            CatalogItem::Archive(_) => Price::ZERO,
            CatalogItem::Tour(_) => self.tour_booking_fee,
            CatalogItem::Product(product) => product.price.midpoint(),
        }
    }

    #[must_use]
    pub fn artisan(&self, id: &ArtisanId) -> Option<&Artisan> {
        self.artisans.iter().find(|artisan| &artisan.id == id)
    }

    /// Products made by one artisan, in fixture order.
    pub fn products_by<'a>(&'a self, artisan: &'a ArtisanId) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |product| &product.artisan_id == artisan)
    }

    #[must_use]
    pub fn archive_view(&self) -> CatalogView<ArchiveItem> {
        CatalogView::new(Arc::clone(&self.archive))
    }

    #[must_use]
    pub fn tour_view(&self) -> CatalogView<TourSite> {
        CatalogView::new(Arc::clone(&self.tours))
    }

    #[must_use]
    pub fn product_view(&self) -> CatalogView<Product> {
        CatalogView::new(Arc::clone(&self.products))
    }

    #[must_use]
    pub fn artisan_view(&self) -> CatalogView<Artisan> {
        CatalogView::new(Arc::clone(&self.artisans))
    }

    #[must_use]
    pub fn course_view(&self) -> CatalogView<Course> {
        CatalogView::new(Arc::clone(&self.courses))
    }
}
