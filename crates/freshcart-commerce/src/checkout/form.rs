//! Checkout contact/delivery form.

use crate::error::{CommerceError, ValidationError};
use crate::text::is_blank;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message shown when name or phone is missing.
pub const MISSING_REQUIRED_FIELDS: &str = "Please fill in all required fields.";

/// Message shown when a delivery order has no address.
pub const MISSING_ADDRESS: &str = "Delivery address is required.";

/// Message shown when the pickup slot is not one we offer.
pub const INVALID_PICKUP_TIME: &str = "Please select a valid pickup time.";

/// First and last hour of the pickup window.
const PICKUP_FIRST_HOUR: u32 = 8;
const PICKUP_LAST_HOUR: u32 = 20;

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    #[default]
    Delivery,
    Pickup,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Delivery => "DELIVERY",
            OrderType::Pickup => "PICKUP",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderType::Delivery => "Delivery",
            OrderType::Pickup => "Pickup",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DELIVERY" => Ok(OrderType::Delivery),
            "PICKUP" => Ok(OrderType::Pickup),
            _ => Err(CommerceError::UnknownOrderType(s.to_string())),
        }
    }
}

/// Hourly pickup slots, "08:00" through "20:00".
pub fn pickup_times() -> Vec<String> {
    (PICKUP_FIRST_HOUR..=PICKUP_LAST_HOUR)
        .map(|h| format!("{:02}:00", h))
        .collect()
}

/// Customer input collected on the checkout screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Required for delivery orders.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Optional pickup slot for pickup orders.
    #[serde(default)]
    pub pickup_time: Option<String>,
}

impl CheckoutForm {
    /// Create a form with the required contact fields.
    pub fn new(name: impl Into<String>, phone: impl Into<String>, order_type: OrderType) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            order_type,
            ..Default::default()
        }
    }

    /// Set the delivery address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Set the pickup slot.
    pub fn with_pickup_time(mut self, time: impl Into<String>) -> Self {
        self.pickup_time = Some(time.into());
        self
    }

    /// Set order notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_delivery(&self) -> bool {
        self.order_type == OrderType::Delivery
    }

    /// Check the form before anything is sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::field("name", MISSING_REQUIRED_FIELDS));
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::field("phone", MISSING_REQUIRED_FIELDS));
        }

        match self.order_type {
            OrderType::Delivery => {
                if is_blank(self.address.as_deref()) {
                    return Err(ValidationError::field("address", MISSING_ADDRESS));
                }
            }
            OrderType::Pickup => {
                if let Some(time) = self.pickup_time.as_deref().filter(|t| !t.trim().is_empty()) {
                    if !pickup_times().iter().any(|slot| slot == time.trim()) {
                        return Err(ValidationError::field("pickupTime", INVALID_PICKUP_TIME));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_times() {
        let slots = pickup_times();
        assert_eq!(slots.len(), 13);
        assert_eq!(slots.first().map(String::as_str), Some("08:00"));
        assert_eq!(slots.last().map(String::as_str), Some("20:00"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let form = CheckoutForm::new("", "0812", OrderType::Pickup);
        let err = form.validate().unwrap_err();
        assert_eq!(err.message, MISSING_REQUIRED_FIELDS);
        assert_eq!(err.field, Some("name"));
    }

    #[test]
    fn test_blank_phone_is_rejected() {
        let form = CheckoutForm::new("Ayu", "   ", OrderType::Pickup);
        assert_eq!(form.validate().unwrap_err().field, Some("phone"));
    }

    #[test]
    fn test_delivery_requires_address() {
        let form = CheckoutForm::new("Ayu", "0812", OrderType::Delivery);
        assert_eq!(form.validate().unwrap_err().message, MISSING_ADDRESS);

        let form = form.with_address("Jl. Merdeka 1");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_pickup_does_not_require_address() {
        let form = CheckoutForm::new("Ayu", "0812", OrderType::Pickup);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_pickup_time_must_be_a_slot() {
        let form = CheckoutForm::new("Ayu", "0812", OrderType::Pickup).with_pickup_time("21:00");
        assert_eq!(form.validate().unwrap_err().message, INVALID_PICKUP_TIME);

        let form = CheckoutForm::new("Ayu", "0812", OrderType::Pickup).with_pickup_time("09:00");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_order_type_parse_and_serde() {
        assert_eq!("pickup".parse::<OrderType>().unwrap(), OrderType::Pickup);
        assert!("drone".parse::<OrderType>().is_err());
        assert_eq!(serde_json::to_string(&OrderType::Delivery).unwrap(), "\"DELIVERY\"");
    }
}
