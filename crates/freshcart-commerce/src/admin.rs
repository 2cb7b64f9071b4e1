//! Admin drafts and payloads.
//!
//! A draft is what an admin fills in; `into_payload` validates it locally
//! and produces the body sent to the admin endpoints.

use crate::checkout::{OrderStatus, MISSING_REQUIRED_FIELDS};
use crate::error::ValidationError;
use crate::ids::{CategoryId, VariantId};
use crate::money::Money;
use crate::text::{is_blank, slugify};
use serde::{Deserialize, Serialize};

/// Message shown when a category has no name.
pub const MISSING_CATEGORY_NAME: &str = "Category name is required.";

/// Message shown when a bundle has no name.
pub const MISSING_BUNDLE_NAME: &str = "Bundle name is required.";

/// Message shown when a bundle has no price.
pub const MISSING_BUNDLE_PRICE: &str = "Price is required.";

/// Prefix of variant ids created locally and not yet known to the server.
const NEW_VARIANT_PREFIX: &str = "new-";

/// Use the given slug, or derive one from the name.
fn slug_or_default(slug: Option<&str>, name: &str) -> String {
    match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(name),
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDraft {
    /// Server id, or a `new-` placeholder for variants added in the form.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub additional_price: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_price: Option<i64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub variants: Vec<VariantDraft>,
}

impl ProductDraft {
    /// Validate and build the request body.
    pub fn into_payload(self) -> Result<ProductPayload, ValidationError> {
        if self.name.trim().is_empty()
            || self.base_price.is_none()
            || self.category_id.trim().is_empty()
            || self.image.trim().is_empty()
        {
            return Err(ValidationError::new(MISSING_REQUIRED_FIELDS));
        }

        let slug = slug_or_default(self.slug.as_deref(), &self.name);
        let variants = self
            .variants
            .into_iter()
            .map(|v| VariantPayload {
                id: (!v.id.is_empty() && !v.id.starts_with(NEW_VARIANT_PREFIX))
                    .then(|| VariantId::new(v.id)),
                name: v.name,
                additional_price: Money::idr(v.additional_price.unwrap_or(0)),
            })
            .collect();

        Ok(ProductPayload {
            name: self.name,
            slug,
            description: self.description,
            base_price: Money::idr(self.base_price.unwrap_or_default()),
            stock: self.stock.unwrap_or(0),
            image: self.image,
            category_id: CategoryId::new(self.category_id),
            is_available: self.is_available,
            variants,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    /// Omitted for variants the server has not seen yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VariantId>,
    pub name: String,
    #[serde(with = "crate::money::amount")]
    pub additional_price: Money,
}

/// Body of `POST /admin/products` and `PUT /admin/products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(with = "crate::money::amount")]
    pub base_price: Money,
    pub stock: i64,
    pub image: String,
    pub category_id: CategoryId,
    pub is_available: bool,
    pub variants: Vec<VariantPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl CategoryDraft {
    pub fn into_payload(self) -> Result<CategoryPayload, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::field("name", MISSING_CATEGORY_NAME));
        }
        let slug = slug_or_default(self.slug.as_deref(), &self.name);
        Ok(CategoryPayload {
            name: self.name,
            slug,
        })
    }
}

/// Body of the category create/update endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub slug: String,
}

/// A bundle line as typed by the admin: product name and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleItemDraft {
    pub name: String,
    #[serde(default = "default_qty")]
    pub qty: u32,
}

fn default_qty() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub original_price: Option<i64>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub items: Vec<BundleItemDraft>,
}

impl BundleDraft {
    pub fn into_payload(self) -> Result<BundlePayload, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::field("name", MISSING_BUNDLE_NAME));
        }
        let Some(price) = self.price else {
            return Err(ValidationError::field("price", MISSING_BUNDLE_PRICE));
        };

        let slug = slug_or_default(self.slug.as_deref(), &self.name);
        Ok(BundlePayload {
            name: self.name,
            slug,
            description: self.description,
            price: Money::idr(price),
            original_price: Money::idr(self.original_price.unwrap_or(0)),
            image: self.image,
            is_popular: self.is_popular,
            items: self
                .items
                .into_iter()
                .filter(|i| !is_blank(Some(i.name.as_str())))
                .collect(),
        })
    }
}

/// Body of the bundle create/update endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlePayload {
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(with = "crate::money::amount")]
    pub price: Money,
    #[serde(with = "crate::money::amount")]
    pub original_price: Money,
    pub image: String,
    pub is_popular: bool,
    pub items: Vec<BundleItemDraft>,
}

/// Body of `PATCH /admin/orders/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Dashboard figures. The shape belongs to the server, so it is kept opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminStats(pub serde_json::Map<String, serde_json::Value>);

impl AdminStats {
    /// Entries sorted by key.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_draft() -> ProductDraft {
        ProductDraft {
            name: "Garden Fresh Salad".into(),
            base_price: Some(35_000),
            image: "https://img/salad.jpg".into(),
            category_id: "cat-1".into(),
            is_available: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_product_draft_requires_fields() {
        for draft in [
            ProductDraft { name: " ".into(), ..product_draft() },
            ProductDraft { base_price: None, ..product_draft() },
            ProductDraft { category_id: String::new(), ..product_draft() },
            ProductDraft { image: String::new(), ..product_draft() },
        ] {
            assert_eq!(draft.into_payload().unwrap_err().message, MISSING_REQUIRED_FIELDS);
        }
    }

    #[test]
    fn test_product_payload_defaults() {
        let payload = product_draft().into_payload().unwrap();
        assert_eq!(payload.slug, "garden-fresh-salad");
        assert_eq!(payload.stock, 0);
        assert_eq!(payload.base_price, Money::idr(35_000));
    }

    #[test]
    fn test_new_variants_are_sent_without_id() {
        let mut draft = product_draft();
        draft.variants = vec![
            VariantDraft {
                id: "v1".into(),
                name: "Regular".into(),
                additional_price: None,
            },
            VariantDraft {
                id: "new-1718000000".into(),
                name: "Large".into(),
                additional_price: Some(10_000),
            },
        ];

        let json = serde_json::to_value(draft.into_payload().unwrap()).unwrap();
        assert_eq!(json["variants"][0]["id"], "v1");
        assert_eq!(json["variants"][0]["additionalPrice"], 0);
        assert!(json["variants"][1].get("id").is_none());
        assert_eq!(json["variants"][1]["additionalPrice"], 10000);
    }

    #[test]
    fn test_explicit_slug_is_kept() {
        let draft = CategoryDraft {
            name: "Main Course".into(),
            slug: Some("mains".into()),
        };
        assert_eq!(draft.into_payload().unwrap().slug, "mains");
    }

    #[test]
    fn test_category_requires_name() {
        let err = CategoryDraft::default().into_payload().unwrap_err();
        assert_eq!(err.message, MISSING_CATEGORY_NAME);
    }

    #[test]
    fn test_bundle_validation_order() {
        let err = BundleDraft::default().into_payload().unwrap_err();
        assert_eq!(err.message, MISSING_BUNDLE_NAME);

        let draft = BundleDraft {
            name: "Family Feast".into(),
            ..Default::default()
        };
        assert_eq!(draft.into_payload().unwrap_err().message, MISSING_BUNDLE_PRICE);
    }

    #[test]
    fn test_bundle_payload_from_json_file_shape() {
        let draft: BundleDraft = serde_json::from_str(
            r#"{"name":"Family Feast","price":150000,"originalPrice":180000,
                "items":[{"name":"Salad","qty":2},{"name":""}]}"#,
        )
        .unwrap();
        let payload = draft.into_payload().unwrap();
        assert_eq!(payload.slug, "family-feast");
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.original_price, Money::idr(180_000));
    }

    #[test]
    fn test_status_update_body() {
        let body = OrderStatusUpdate {
            status: OrderStatus::OnDelivery,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"status":"ON_DELIVERY"}"#);
    }

    #[test]
    fn test_admin_stats_is_opaque() {
        let stats: AdminStats =
            serde_json::from_str(r#"{"totalOrders":12,"revenue":1500000}"#).unwrap();
        let keys: Vec<_> = stats.entries().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"totalOrders"));
    }
}
