//! Cart and line item types.

use crate::ids::{ProductId, VariantId};
use crate::money::{Currency, Money, STORE_CURRENCY};
use serde::{Deserialize, Serialize};

/// Identity of a cart line: product plus optional variant.
///
/// "No variant" is its own key, distinct from every variant of the product.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
}

impl LineKey {
    pub fn new(product_id: ProductId, variant_id: Option<VariantId>) -> Self {
        Self {
            product_id,
            variant_id,
        }
    }

    fn matches(&self, product_id: &ProductId, variant_id: Option<&VariantId>) -> bool {
        &self.product_id == product_id && self.variant_id.as_ref() == variant_id
    }
}

/// One orderable unit in the customer's cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product being ordered.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Image URL (denormalized for display).
    #[serde(default)]
    pub image: String,
    /// Unit price with the variant surcharge already applied.
    pub unit_price: Money,
    /// Selected variant, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    /// Variant display name (e.g., "Large (+Protein)").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
    /// Quantity.
    pub quantity: u32,
    /// Free-text note for the kitchen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CartLineItem {
    /// Identity key of this line.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.variant_id.clone())
    }

    /// Check if this line has the given identity.
    pub fn matches(&self, product_id: &ProductId, variant_id: Option<&VariantId>) -> bool {
        &self.product_id == product_id && self.variant_id.as_ref() == variant_id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_mul(i64::from(self.quantity))
    }

    /// Name with the variant appended, e.g. "Garden Fresh Salad (Large)".
    pub fn display_name(&self) -> String {
        match self.variant_name {
            Some(ref variant) => format!("{} ({})", self.name, variant),
            None => self.name.clone(),
        }
    }
}

/// The customer's in-progress order selection.
///
/// Holds at most one line per [`LineKey`]. Totals are computed on every read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Lines in insertion order.
    items: Vec<CartLineItem>,
    /// Currency totals are reported in.
    #[serde(default)]
    currency: Currency,
}

impl Cart {
    /// Create an empty cart in the store currency.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            currency: STORE_CURRENCY,
        }
    }

    /// Add a fully priced item.
    ///
    /// If a line with the same product and variant exists its quantity grows
    /// by `item.quantity`; otherwise the item is appended. The caller is
    /// responsible for price and quantity being sensible.
    pub fn add_item(&mut self, item: CartLineItem) {
        let key = item.key();
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| key.matches(&i.product_id, i.variant_id.as_ref()))
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            return;
        }
        self.items.push(item);
    }

    /// Remove the line for a product/variant. Returns false if absent.
    pub fn remove_item(&mut self, product_id: &ProductId, variant_id: Option<&VariantId>) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| !i.matches(product_id, variant_id));
        self.items.len() < len_before
    }

    /// Set a line's quantity to an exact value.
    ///
    /// A quantity below 1 removes the line. Returns false if no line matched.
    pub fn update_qty(
        &mut self,
        product_id: &ProductId,
        variant_id: Option<&VariantId>,
        qty: i64,
    ) -> bool {
        if qty < 1 {
            return self.remove_item(product_id, variant_id);
        }

        let qty = u32::try_from(qty).unwrap_or(u32::MAX);
        match self
            .items
            .iter_mut()
            .find(|i| i.matches(product_id, variant_id))
        {
            Some(item) => {
                item.quantity = qty;
                true
            }
            None => false,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of unit price times quantity across all lines.
    pub fn total_price(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(self.currency), |acc, i| {
                acc.saturating_add(i.line_total().amount)
            })
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Units of a product across all of its variants.
    pub fn product_quantity(&self, product_id: &ProductId) -> u64 {
        self.items
            .iter()
            .filter(|i| &i.product_id == product_id)
            .map(|i| u64::from(i.quantity))
            .sum()
    }

    /// Get the line for a product/variant.
    pub fn get(&self, product_id: &ProductId, variant_id: Option<&VariantId>) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.matches(product_id, variant_id))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency totals are reported in.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product: &str, variant: Option<&str>, price: i64, qty: u32) -> CartLineItem {
        CartLineItem {
            product_id: ProductId::new(product),
            name: format!("Product {}", product),
            image: String::new(),
            unit_price: Money::idr(price),
            variant_id: variant.map(VariantId::new),
            variant_name: variant.map(|v| v.to_uppercase()),
            quantity: qty,
            note: None,
        }
    }

    fn pid(id: &str) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Money::idr(0));
    }

    #[test]
    fn test_add_same_key_merges_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item("1", Some("v1"), 35_000, 1));
        cart.add_item(item("1", Some("v1"), 35_000, 2));
        cart.add_item(item("1", Some("v1"), 35_000, 4));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&pid("1"), Some(&VariantId::new("v1"))).unwrap().quantity, 7);
    }

    #[test]
    fn test_no_variant_is_distinct_key() {
        let mut cart = Cart::new();
        cart.add_item(item("1", None, 35_000, 1));
        cart.add_item(item("1", Some("v2"), 50_000, 1));
        cart.add_item(item("1", None, 35_000, 1));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(&pid("1"), None).unwrap().quantity, 2);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_product_quantity_spans_variants() {
        let mut cart = Cart::new();
        cart.add_item(item("1", None, 35_000, 1));
        cart.add_item(item("1", Some("v2"), 50_000, 2));
        cart.add_item(item("2", None, 45_000, 4));

        assert_eq!(cart.product_quantity(&pid("1")), 3);
        assert_eq!(cart.product_quantity(&pid("3")), 0);
    }

    #[test]
    fn test_merge_keeps_first_line_attributes() {
        let mut cart = Cart::new();
        let mut first = item("1", None, 35_000, 1);
        first.note = Some("no onion".into());
        cart.add_item(first);
        cart.add_item(item("1", None, 35_000, 1));

        assert_eq!(cart.items()[0].note.as_deref(), Some("no onion"));
    }

    #[test]
    fn test_totals_recomputed_after_each_mutation() {
        let mut cart = Cart::new();
        cart.add_item(item("1", None, 35_000, 2));
        cart.add_item(item("2", None, 45_000, 1));
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Money::idr(115_000));

        cart.update_qty(&pid("2"), None, 3);
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), Money::idr(205_000));

        cart.remove_item(&pid("1"), None);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Money::idr(135_000));
    }

    #[test]
    fn test_update_qty_sets_exact_value() {
        let mut cart = Cart::new();
        cart.add_item(item("1", None, 10_000, 5));
        assert!(cart.update_qty(&pid("1"), None, 2));
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_update_qty_below_one_removes() {
        for qty in [0, -1] {
            let mut by_update = Cart::new();
            by_update.add_item(item("1", Some("v1"), 10_000, 2));
            by_update.add_item(item("2", None, 20_000, 1));

            let mut by_remove = by_update.clone();

            assert!(by_update.update_qty(&pid("1"), Some(&VariantId::new("v1")), qty));
            assert!(by_remove.remove_item(&pid("1"), Some(&VariantId::new("v1"))));
            assert_eq!(by_update, by_remove);
        }
    }

    #[test]
    fn test_update_qty_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item("1", None, 10_000, 1));
        assert!(!cart.update_qty(&pid("9"), None, 4));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item("1", Some("v1"), 10_000, 1));
        assert!(!cart.remove_item(&pid("1"), None));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear_zeroes_totals() {
        let mut cart = Cart::new();
        cart.add_item(item("1", None, 10_000, 3));
        cart.add_item(item("2", Some("v"), 12_000, 1));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_cart_roundtrips_through_json() {
        let mut cart = Cart::new();
        cart.add_item(item("1", Some("v2"), 50_000, 2));
        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(item("1", Some("lg"), 1, 1).display_name(), "Product 1 (LG)");
        assert_eq!(item("1", None, 1, 1).display_name(), "Product 1");
    }
}
