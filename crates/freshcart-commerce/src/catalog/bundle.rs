//! Bundles: fixed sets of products sold at one price.

use crate::catalog::Product;
use crate::ids::BundleId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product within a bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BundleItem {
    pub product: Product,
    pub qty: u32,
}

/// A bundle as served by the catalog API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub id: BundleId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Bundle price.
    #[serde(with = "crate::money::amount", default)]
    pub price: Money,
    /// Sum of the individual prices.
    #[serde(with = "crate::money::amount", default)]
    pub original_price: Money,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub items: Vec<BundleItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_popular: Option<bool>,
}

impl Bundle {
    /// Amount saved against buying the items separately; never negative.
    pub fn savings(&self) -> Money {
        self.original_price
            .try_subtract(&self.price)
            .filter(|m| m.is_positive())
            .unwrap_or_else(|| Money::zero(self.price.currency))
    }

    /// Total number of units in the bundle.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.qty).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(price: i64, original: i64) -> Bundle {
        serde_json::from_value(serde_json::json!({
            "id": "b1",
            "name": "Healthy Starter",
            "price": price,
            "originalPrice": original,
            "items": []
        }))
        .unwrap()
    }

    #[test]
    fn test_savings() {
        assert_eq!(bundle(79_000, 95_000).savings(), Money::idr(16_000));
    }

    #[test]
    fn test_savings_never_negative() {
        assert_eq!(bundle(95_000, 0).savings(), Money::idr(0));
    }
}
