//! Catalog browsing.
//!
//! # Usage
//!
//! ```bash
//! heritage catalog products --category textiles --search shawl
//! heritage catalog tours --category amhara --view list
//! heritage catalog courses --json
//! ```

use std::fmt::Display;
use std::str::FromStr;

use clap::{Args, ValueEnum};
use heritage_core::{ArchiveItem, Artisan, Course, Product, TourSite};
use heritage_showcase::AppState;
use heritage_showcase::catalog::{
    ALL_CATEGORIES, Catalog, CatalogView, CategoryFilter, Listing, ViewMode,
};
use serde::Serialize;
use tracing::info;

use super::CommandError;

/// Which catalog to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogKind {
    Archive,
    Tours,
    Products,
    Artisans,
    Courses,
}

/// Layout of the printed listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    #[default]
    Grid,
    List,
}

impl From<ViewArg> for ViewMode {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Grid => Self::Grid,
            ViewArg::List => Self::List,
        }
    }
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Catalog to browse
    #[arg(value_enum)]
    kind: CatalogKind,

    /// Category to keep (`all` for every category)
    #[arg(short, long, default_value = ALL_CATEGORIES)]
    category: String,

    /// Case-insensitive text to look for in titles and descriptions
    #[arg(short, long, default_value = "")]
    search: String,

    /// Layout
    #[arg(short, long, value_enum, default_value_t = ViewArg::Grid)]
    view: ViewArg,

    /// Print matching records as JSON
    #[arg(long)]
    json: bool,

    /// Wait out the skeleton loading delay before printing
    #[arg(long)]
    simulate_loading: bool,
}

/// Print the filtered catalog.
///
/// # Errors
///
/// Returns an error if the category or view mode is not valid for the
/// chosen catalog.
pub async fn run(state: &AppState, args: &CatalogArgs) -> Result<(), CommandError> {
    if args.simulate_loading {
        let mut loading = state.loading_indicator();
        info!(delay = ?state.config().loading_delay, "Loading catalog");
        loading.cleared().await;
    }

    let catalog = state.catalog();
    match args.kind {
        CatalogKind::Archive => show(catalog.archive_view(), args, |item: &ArchiveItem| {
            let place = item.location.as_deref().unwrap_or("unknown");
            let date = item.date.as_deref().unwrap_or("undated");
            format!("{}, {place}, {date}", item.category)
        }),
        CatalogKind::Tours => show(catalog.tour_view(), args, |site: &TourSite| {
            format!("{}, {}", site.location, site.historical_period)
        }),
        CatalogKind::Products => show(catalog.product_view(), args, |product: &Product| {
            product_detail(catalog, product)
        }),
        CatalogKind::Artisans => show(catalog.artisan_view(), args, |artisan: &Artisan| {
            artisan_detail(catalog, artisan)
        }),
        CatalogKind::Courses => show(catalog.course_view(), args, |course: &Course| {
            let progress = course
                .progress
                .map(|p| format!(", {p}% done"))
                .unwrap_or_default();
            format!(
                "{}, {}, {} lessons{progress}",
                course.category, course.level, course.lessons
            )
        }),
    }
}

fn show<L>(
    mut view: CatalogView<L>,
    args: &CatalogArgs,
    detail: impl Fn(&L) -> String,
) -> Result<(), CommandError>
where
    L: Listing + Serialize,
    L::Category: FromStr,
    <L::Category as FromStr>::Err: Display,
{
    let category = CategoryFilter::<L::Category>::from_str(&args.category)
        .map_err(|e| CommandError::InvalidArgument(e.to_string()))?;
    view.select_category(category);
    view.set_search(args.search.as_str());
    view.set_view_mode(args.view.into());

    let visible = view.visible();
    info!(
        shown = visible.len(),
        total = view.fixture().len(),
        "Filtered catalog"
    );

    #[allow(clippy::print_stdout)]
    {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&visible)?);
            return Ok(());
        }

        for &listing in &visible {
            match view.view_mode() {
                ViewMode::Grid => println!("{}  [{}]", listing.title(), detail(listing)),
                ViewMode::List => {
                    println!("{}", listing.title());
                    println!("    {}", listing.description());
                    println!("    {}", detail(listing));
                }
            }
        }
        println!("{} of {} shown", visible.len(), view.fixture().len());
    }

    Ok(())
}

/// Category, price and maker, marking makers with a verified profile.
fn product_detail(catalog: &Catalog, product: &Product) -> String {
    let verified = catalog
        .artisan(&product.artisan_id)
        .is_some_and(|artisan| artisan.verified);
    let mark = if verified { " (verified)" } else { "" };
    format!(
        "{}, {} by {}{mark}",
        product.category, product.price, product.artisan_name
    )
}

/// Craft, location, rating and how many listed products the artisan has.
fn artisan_detail(catalog: &Catalog, artisan: &Artisan) -> String {
    let verified = if artisan.verified { ", verified" } else { "" };
    let products = catalog.products_by(&artisan.id).count();
    format!(
        "{}, {}, {} ({} reviews), {products} products{verified}",
        artisan.craft, artisan.location, artisan.rating, artisan.review_count
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heritage_showcase::fixtures::FixtureSource;

    use super::*;

    fn catalog() -> Catalog {
        FixtureSource::bundled().load_catalog().unwrap()
    }

    #[test]
    fn test_view_arg_maps_to_mode() {
        assert_eq!(ViewMode::from(ViewArg::default()), ViewMode::Grid);
        assert_eq!(ViewMode::from(ViewArg::List), ViewMode::List);
    }

    #[test]
    fn test_artisan_detail_counts_products() {
        let catalog = catalog();
        for artisan in catalog.artisans.iter() {
            let expected = catalog
                .products
                .iter()
                .filter(|p| p.artisan_id == artisan.id)
                .count();
            assert!(artisan_detail(&catalog, artisan).contains(&format!("{expected} products")));
        }
    }

    #[test]
    fn test_product_detail_names_maker() {
        let catalog = catalog();
        let product = catalog.products.first().unwrap();
        let detail = product_detail(&catalog, product);
        assert!(detail.contains(&product.artisan_name));

        let verified = catalog.artisan(&product.artisan_id).unwrap().verified;
        assert_eq!(detail.ends_with("(verified)"), verified);
    }
}
