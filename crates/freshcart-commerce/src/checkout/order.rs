//! Order types: the create-order request and orders read back from the API.

use crate::cart::{Cart, CartLineItem};
use crate::catalog::{Product, ProductVariant};
use crate::checkout::{CheckoutForm, OrderType};
use crate::ids::{OrderId, ProductId, VariantId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status, owned by the order service.
///
/// Statuses this client does not know are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Processing,
    Ready,
    OnDelivery,
    Completed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// Statuses an admin can set, in workflow order.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Processing,
        OrderStatus::Ready,
        OrderStatus::OnDelivery,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Ready => "READY",
            OrderStatus::OnDelivery => "ON_DELIVERY",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Other(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Paid",
            OrderStatus::Processing => "Processing",
            OrderStatus::Ready => "Ready",
            OrderStatus::OnDelivery => "On Delivery",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(s) => s,
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.to_uppercase().as_str() {
            "PENDING" => OrderStatus::Pending,
            "PAID" => OrderStatus::Paid,
            "PROCESSING" => OrderStatus::Processing,
            "READY" => OrderStatus::Ready,
            "ON_DELIVERY" => OrderStatus::OnDelivery,
            "COMPLETED" => OrderStatus::Completed,
            "CANCELLED" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(s),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        OrderStatus::from(s.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placed order as returned by the order service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(rename = "type", default)]
    pub order_type: OrderType,
    #[serde(with = "crate::money::amount", default)]
    pub total_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Get total item count.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.qty)).sum()
    }

    /// Check if the payment went through.
    pub fn is_paid(&self) -> bool {
        self.payment_status.eq_ignore_ascii_case("PAID")
    }
}

/// A line of a placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product: Product,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ProductVariant>,
    pub qty: u32,
    #[serde(with = "crate::money::amount", default)]
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One line of the create-order request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    pub qty: u32,
    /// Unit price the customer saw.
    #[serde(with = "crate::money::amount")]
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&CartLineItem> for OrderLineRequest {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            variant_id: item.variant_id.clone(),
            qty: item.quantity,
            price: item.unit_price,
            notes: item.note.clone(),
        }
    }
}

/// Body of `POST /orders`: the form fields plus the cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub name: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    pub items: Vec<OrderLineRequest>,
}

impl CreateOrderRequest {
    /// Assemble the request from a form and the cart.
    ///
    /// Blank optional fields are dropped, as is whichever of address and
    /// pickup time does not apply to the order type.
    pub fn new(form: &CheckoutForm, cart: &Cart) -> Self {
        let clean = |v: &Option<String>| {
            v.as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let (address, pickup_time) = match form.order_type {
            OrderType::Delivery => (clean(&form.address), None),
            OrderType::Pickup => (None, clean(&form.pickup_time)),
        };

        Self {
            name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            order_type: form.order_type,
            address,
            notes: clean(&form.notes),
            pickup_time,
            items: cart.items().iter().map(OrderLineRequest::from).collect(),
        }
    }
}

/// Response of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub id: OrderId,
}

/// Body of `POST /payments/initiate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentRequest {
    pub order_id: OrderId,
}

/// Response of `POST /payments/initiate`.
///
/// No URL means there is nothing to pay at the gateway and the customer goes
/// straight to their orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiation {
    #[serde(default)]
    pub payment_url: Option<String>,
}

impl PaymentInitiation {
    /// The gateway URL, ignoring empty strings.
    pub fn redirect_url(&self) -> Option<&str> {
        self.payment_url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(CartLineItem {
            product_id: ProductId::new("1"),
            name: "Garden Fresh Salad".into(),
            image: String::new(),
            unit_price: Money::idr(50_000),
            variant_id: Some(VariantId::new("v2")),
            variant_name: Some("Large".into()),
            quantity: 2,
            note: Some("no onion".into()),
        });
        cart
    }

    #[test]
    fn test_status_roundtrip_and_unknown() {
        let status: OrderStatus = serde_json::from_str("\"ON_DELIVERY\"").unwrap();
        assert_eq!(status, OrderStatus::OnDelivery);
        assert_eq!(status.label(), "On Delivery");

        let status: OrderStatus = serde_json::from_str("\"REFUNDED\"").unwrap();
        assert_eq!(status, OrderStatus::Other("REFUNDED".into()));
        assert_eq!(status.label(), "REFUNDED");
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"REFUNDED\"");
    }

    #[test]
    fn test_create_order_request_wire_shape() {
        let form = CheckoutForm::new("Ayu", "0812", OrderType::Delivery)
            .with_address("Jl. Merdeka 1")
            .with_pickup_time("09:00");
        let request = CreateOrderRequest::new(&form, &cart());

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ayu",
                "phone": "0812",
                "type": "DELIVERY",
                "address": "Jl. Merdeka 1",
                "items": [{
                    "productId": "1",
                    "variantId": "v2",
                    "qty": 2,
                    "price": 50000,
                    "notes": "no onion"
                }]
            })
        );
    }

    #[test]
    fn test_pickup_request_drops_address() {
        let form = CheckoutForm::new("Ayu", "0812", OrderType::Pickup)
            .with_address("ignored")
            .with_pickup_time("10:00");
        let request = CreateOrderRequest::new(&form, &cart());
        assert_eq!(request.address, None);
        assert_eq!(request.pickup_time.as_deref(), Some("10:00"));
    }

    #[test]
    fn test_order_deserializes_from_api_shape() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "ORD-001",
            "status": "COMPLETED",
            "type": "DELIVERY",
            "totalPrice": 108000,
            "paymentStatus": "PAID",
            "createdAt": "2026-02-25T10:30:00Z",
            "items": []
        }))
        .unwrap();

        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.total_price, Money::idr(108_000));
        assert!(order.is_paid());
        assert!(order.created_at.is_some());
    }

    #[test]
    fn test_payment_redirect_ignores_empty_url() {
        let p = PaymentInitiation {
            payment_url: Some(String::new()),
        };
        assert_eq!(p.redirect_url(), None);
        let p: PaymentInitiation =
            serde_json::from_str(r#"{"paymentUrl":"https://pay.example/x"}"#).unwrap();
        assert_eq!(p.redirect_url(), Some("https://pay.example/x"));
    }
}
