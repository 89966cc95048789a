//! Catalog browsing filters (style and inclusive price range)

use std::collections::BTreeSet;

use crate::constants::report::ALL_STYLES;
use crate::types::ArtworkRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StyleFilter {
    #[default]
    All,
    Exact(String),
}

impl StyleFilter {
    /// "All" (any case) selects every style; anything else is an exact label
    pub fn parse(label: &str) -> Self {
        if label.eq_ignore_ascii_case(ALL_STYLES) {
            StyleFilter::All
        } else {
            StyleFilter::Exact(label.to_string())
        }
    }

    fn matches(&self, style: &str) -> bool {
        match self {
            StyleFilter::All => true,
            StyleFilter::Exact(label) => label == style,
        }
    }
}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogFilter {
    pub style: StyleFilter,
    pub price: PriceRange,
}

impl CatalogFilter {
    pub fn matches(&self, artwork: &ArtworkRecord) -> bool {
        self.style.matches(&artwork.style) && self.price.contains(artwork.price)
    }

    pub fn apply<'a>(&self, artworks: &'a [ArtworkRecord]) -> Vec<&'a ArtworkRecord> {
        artworks.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Distinct style labels, sorted
pub fn styles(artworks: &[ArtworkRecord]) -> Vec<String> {
    artworks
        .iter()
        .map(|a| a.style.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Cheapest and most expensive price in the catalog
pub fn price_bounds(artworks: &[ArtworkRecord]) -> Option<PriceRange> {
    artworks.iter().map(|a| a.price).fold(None, |bounds, price| {
        Some(match bounds {
            None => PriceRange::new(price, price),
            Some(b) => PriceRange::new(b.min.min(price), b.max.max(price)),
        })
    })
}
