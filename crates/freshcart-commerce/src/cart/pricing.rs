//! Delivery fee rules and order totals.

use crate::checkout::OrderType;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Flat delivery fee, in rupiah.
pub const DELIVERY_FEE: i64 = 10_000;

/// Subtotal at or above which delivery is free, in rupiah.
pub const FREE_DELIVERY_THRESHOLD: i64 = 100_000;

/// Delivery fee configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Flat fee charged on delivery orders below the threshold.
    pub delivery_fee: i64,
    /// Subtotal at or above which the delivery fee is waived.
    pub free_delivery_threshold: i64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            delivery_fee: DELIVERY_FEE,
            free_delivery_threshold: FREE_DELIVERY_THRESHOLD,
        }
    }
}

impl FeeSchedule {
    /// Create a schedule.
    pub fn new(delivery_fee: i64, free_delivery_threshold: i64) -> Self {
        Self {
            delivery_fee,
            free_delivery_threshold,
        }
    }

    /// Whether no delivery fee applies.
    ///
    /// Pickup orders never pay one; delivery orders are free at or above
    /// the threshold.
    pub fn is_free_delivery(&self, subtotal: Money, order_type: OrderType) -> bool {
        match order_type {
            OrderType::Pickup => true,
            OrderType::Delivery => subtotal.amount >= self.free_delivery_threshold,
        }
    }

    /// Delivery fee for a subtotal and order type.
    pub fn delivery_fee(&self, subtotal: Money, order_type: OrderType) -> Money {
        if self.is_free_delivery(subtotal, order_type) {
            Money::zero(subtotal.currency)
        } else {
            Money::new(self.delivery_fee, subtotal.currency)
        }
    }

    /// Fee breakdown for a subtotal and order type.
    pub fn compute_totals(&self, subtotal: Money, order_type: OrderType) -> OrderTotals {
        let delivery_fee = self.delivery_fee(subtotal, order_type);
        OrderTotals {
            subtotal,
            delivery_fee,
            total: subtotal.saturating_add(delivery_fee.amount),
        }
    }

    /// How much more the customer must add to get free delivery.
    pub fn remaining_for_free_delivery(&self, subtotal: Money) -> Option<Money> {
        let remaining = self.free_delivery_threshold - subtotal.amount;
        (remaining > 0).then(|| Money::new(remaining, subtotal.currency))
    }
}

/// Fee breakdown for an order. Computed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Delivery fee (zero for pickup or free delivery).
    pub delivery_fee: Money,
    /// Subtotal plus delivery fee.
    pub total: Money,
}

impl OrderTotals {
    /// Check if the delivery fee was waived or not applicable.
    pub fn is_free_delivery(&self) -> bool {
        self.delivery_fee.is_zero()
    }
}

/// Totals using the default fee schedule.
pub fn compute_totals(subtotal: Money, order_type: OrderType) -> OrderTotals {
    FeeSchedule::default().compute_totals(subtotal, order_type)
}
