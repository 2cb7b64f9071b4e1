//! Catalog module.
//!
//! Read-side types for products, variants, categories and bundles, plus the
//! listing filters.

mod bundle;
mod category;
mod filter;
mod product;

pub use bundle::{Bundle, BundleItem};
pub use category::Category;
pub use filter::{ProductFilters, SortOption};
pub use product::{Product, ProductBadge, ProductVariant};
