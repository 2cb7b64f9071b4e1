//! Product and variant types.

use crate::cart::CartLineItem;
use crate::catalog::Category;
use crate::error::CommerceError;
use crate::ids::{ProductId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Merchandising badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductBadge {
    Bestseller,
    New,
    Promo,
}

impl ProductBadge {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductBadge::Bestseller => "Bestseller",
            ProductBadge::New => "New",
            ProductBadge::Promo => "Promo",
        }
    }
}

/// A priced sub-option of a product (e.g., size).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Variant identifier.
    pub id: VariantId,
    /// Display name (e.g., "Large (+Protein)").
    pub name: String,
    /// Surcharge added to the product's base price.
    #[serde(with = "crate::money::amount", default)]
    pub additional_price: Money,
}

/// A menu item as served by the catalog API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Price before any variant surcharge.
    #[serde(with = "crate::money::amount", default)]
    pub base_price: Money,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
    /// Whether the product can be ordered.
    #[serde(default = "default_true")]
    pub is_available: bool,
    /// Owning category.
    #[serde(default)]
    pub category: Option<Category>,
    /// Priced variants; empty for simple products.
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    /// Average rating (0-5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    /// Merchandising badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<ProductBadge>,
    /// Price before promotion, for strike-through display.
    #[serde(
        with = "crate::money::amount::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Money>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Find a variant by ID.
    pub fn variant(&self, variant_id: &VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| &v.id == variant_id)
    }

    /// Check if product has variants.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Resolve the unit price: base price plus the variant surcharge.
    pub fn price_for(&self, variant_id: Option<&VariantId>) -> Result<Money, CommerceError> {
        match variant_id {
            None => Ok(self.base_price),
            Some(id) => {
                let variant = self
                    .variant(id)
                    .ok_or_else(|| CommerceError::VariantNotFound(id.to_string()))?;
                Ok(self
                    .base_price
                    .saturating_add(variant.additional_price.amount))
            }
        }
    }

    /// Build a fully priced cart line for this product.
    pub fn line_item(
        &self,
        variant_id: Option<&VariantId>,
        quantity: u32,
        note: Option<String>,
    ) -> Result<CartLineItem, CommerceError> {
        self.ensure_orderable(u64::from(quantity))?;
        let unit_price = self.price_for(variant_id)?;
        let variant = variant_id.and_then(|id| self.variant(id));

        Ok(CartLineItem {
            product_id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            unit_price,
            variant_id: variant.map(|v| v.id.clone()),
            variant_name: variant.map(|v| v.name.clone()),
            quantity,
            note: note.filter(|n| !n.trim().is_empty()),
        })
    }

    /// Discount against the original price, if the product is on promotion.
    pub fn discount(&self) -> Option<Money> {
        self.original_price
            .and_then(|orig| orig.try_subtract(&self.base_price))
            .filter(|d| d.is_positive())
    }

    /// Check if the product can be added to a cart.
    pub fn is_orderable(&self) -> bool {
        self.is_available && self.stock > 0
    }

    /// Refuse unavailable products and quantities above the stock level.
    ///
    /// `quantity` is the total the cart would hold for this product across
    /// all of its variants.
    pub fn ensure_orderable(&self, quantity: u64) -> Result<(), CommerceError> {
        if !self.is_available {
            return Err(CommerceError::ProductUnavailable(self.name.clone()));
        }
        let available = self.stock.max(0);
        if quantity > available as u64 {
            return Err(CommerceError::InsufficientStock {
                product: self.name.clone(),
                available,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salad() -> Product {
        serde_json::from_str(
            r#"{
                "id": "1",
                "name": "Garden Fresh Salad",
                "slug": "garden-fresh-salad",
                "description": "Mixed greens",
                "basePrice": 35000,
                "image": "https://img.example/salad.jpg",
                "stock": 10,
                "isAvailable": true,
                "category": { "id": "1", "name": "Salad", "slug": "salad" },
                "variants": [
                    { "id": "v1", "name": "Regular", "additionalPrice": 0 },
                    { "id": "v2", "name": "Large (+Protein)", "additionalPrice": 15000 }
                ],
                "rating": 4.9,
                "reviewCount": 124
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_product_deserializes_from_api_shape() {
        let product = salad();
        assert_eq!(product.base_price, Money::idr(35_000));
        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.category.as_ref().unwrap().slug, "salad");
        assert!(product.original_price.is_none());
    }

    #[test]
    fn test_price_for_variant_adds_surcharge() {
        let product = salad();
        assert_eq!(product.price_for(None).unwrap(), Money::idr(35_000));
        assert_eq!(
            product.price_for(Some(&VariantId::new("v2"))).unwrap(),
            Money::idr(50_000)
        );
    }

    #[test]
    fn test_price_for_unknown_variant_fails() {
        let product = salad();
        let err = product.price_for(Some(&VariantId::new("nope"))).unwrap_err();
        assert!(matches!(err, CommerceError::VariantNotFound(_)));
    }

    #[test]
    fn test_line_item_carries_variant_name_and_drops_blank_note() {
        let product = salad();
        let item = product
            .line_item(Some(&VariantId::new("v2")), 2, Some("  ".to_string()))
            .unwrap();
        assert_eq!(item.unit_price, Money::idr(50_000));
        assert_eq!(item.variant_name.as_deref(), Some("Large (+Protein)"));
        assert_eq!(item.quantity, 2);
        assert!(item.note.is_none());
    }

    #[test]
    fn test_line_item_refuses_sold_out_product() {
        let mut product = salad();
        product.is_available = false;
        product.stock = 2;
        let err = product.line_item(None, 1, None).unwrap_err();
        assert!(matches!(err, CommerceError::ProductUnavailable(ref name) if name == "Garden Fresh Salad"));
        assert_eq!(err.to_string(), "Garden Fresh Salad is sold out");
    }

    #[test]
    fn test_line_item_refuses_quantity_above_stock() {
        let mut product = salad();
        product.stock = 2;
        let err = product.line_item(None, 50, None).unwrap_err();
        assert!(matches!(err, CommerceError::InsufficientStock { available: 2, .. }));
        assert!(product.line_item(None, 2, None).is_ok());
    }

    #[test]
    fn test_ensure_orderable_counts_existing_quantity() {
        let mut product = salad();
        product.stock = 3;
        assert!(product.ensure_orderable(3).is_ok());
        assert!(product.ensure_orderable(4).is_err());

        product.stock = 0;
        assert!(matches!(
            product.ensure_orderable(1),
            Err(CommerceError::InsufficientStock { available: 0, .. })
        ));
    }

    #[test]
    fn test_discount() {
        let mut product = salad();
        assert!(product.discount().is_none());
        product.original_price = Some(Money::idr(40_000));
        assert_eq!(product.discount(), Some(Money::idr(5_000)));
    }
}
