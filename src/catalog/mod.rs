//! Artwork catalog: document storage and browsing filters

pub mod filter;
pub mod store;

pub use filter::{CatalogFilter, PriceRange, StyleFilter};
pub use store::{Catalog, CatalogStore};
