//! Menu filters sent as query parameters to the product listing.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sort options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Most ordered first.
    #[default]
    Popular,
    /// Newest first.
    Newest,
    /// Price low to high.
    PriceAsc,
    /// Price high to low.
    PriceDesc,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Popular => "popular",
            SortOption::Newest => "newest",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "popular" => Ok(SortOption::Popular),
            "newest" => Ok(SortOption::Newest),
            "price_asc" => Ok(SortOption::PriceAsc),
            "price_desc" => Ok(SortOption::PriceDesc),
            other => Err(format!("unknown sort option: {}", other)),
        }
    }
}

/// Filters for the product listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilters {
    /// Category slug.
    pub cat: Option<String>,
    pub sort: Option<SortOption>,
    /// Minimum price.
    pub min: Option<i64>,
    /// Maximum price.
    pub max: Option<i64>,
    /// Only available products.
    pub available: Option<bool>,
    /// Dietary tags (e.g., "vegan").
    #[serde(default)]
    pub diet: Vec<String>,
    /// Free-text search.
    pub search: Option<String>,
    /// Page number, 1-based.
    pub page: Option<u32>,
}

impl ProductFilters {
    /// Create empty filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category slug.
    pub fn category(mut self, slug: impl Into<String>) -> Self {
        self.cat = Some(slug.into());
        self
    }

    /// Set search text.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Set sort order.
    pub fn sort(mut self, sort: SortOption) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Check if no filter is set.
    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }

    /// Encode as query pairs; unset fields are omitted.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(ref cat) = self.cat {
            pairs.push(("cat".to_string(), cat.clone()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort".to_string(), sort.as_str().to_string()));
        }
        if let Some(min) = self.min {
            pairs.push(("min".to_string(), min.to_string()));
        }
        if let Some(max) = self.max {
            pairs.push(("max".to_string(), max.to_string()));
        }
        if let Some(available) = self.available {
            pairs.push(("available".to_string(), available.to_string()));
        }
        for diet in &self.diet {
            pairs.push(("diet".to_string(), diet.clone()));
        }
        if let Some(ref search) = self.search {
            if !search.trim().is_empty() {
                pairs.push(("search".to_string(), search.trim().to_string()));
            }
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }

        pairs
    }
}
