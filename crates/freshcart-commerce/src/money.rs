//! Money type for representing monetary values.
//!
//! Amounts are integers in the smallest unit of the currency. The store
//! prices everything in rupiah, which has no minor unit, so for the store
//! currency the amount is simply the number of rupiah.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency every catalog price and fee is expressed in.
pub const STORE_CURRENCY: Currency = Currency::IDR;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    IDR,
}

impl Currency {
    /// Get the currency code (e.g., "IDR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::IDR => "IDR",
        }
    }

    /// Get the currency symbol (e.g., "Rp").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::IDR => "Rp",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create an amount in the store currency.
    ///
    /// ```
    /// use freshcart_commerce::money::{Currency, Money};
    /// let price = Money::idr(35_000);
    /// assert_eq!(price.currency, Currency::IDR);
    /// assert_eq!(price.display(), "Rp 35.000");
    /// ```
    pub fn idr(amount: i64) -> Self {
        Self::new(amount, STORE_CURRENCY)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount
            .checked_sub(other.amount)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Add an amount in this currency, clamping at the numeric bounds.
    pub fn saturating_add(&self, amount: i64) -> Money {
        Money::new(self.amount.saturating_add(amount), self.currency)
    }

    /// Multiply by a quantity, clamping at the numeric bounds.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::new(self.amount.saturating_mul(factor), self.currency)
    }

    /// Format for display, e.g. "Rp 35.000".
    pub fn display(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        format!(
            "{}{} {}",
            sign,
            self.currency.symbol(),
            group_thousands(self.amount.unsigned_abs(), '.')
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Serde adapter for API fields that carry a bare number in the store currency.
///
/// The remote API sends prices as plain JSON numbers (`"basePrice": 35000`).
/// Use with `#[serde(with = "crate::money::amount")]`.
pub mod amount {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(money.amount)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Ok(Money::idr(raw.round() as i64))
    }

    /// Same adapter for optional fields.
    pub mod option {
        use super::Money;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            money: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match money {
                Some(m) => serializer.serialize_some(&m.amount),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            let raw = Option::<f64>::deserialize(deserializer)?;
            Ok(raw.map(|r| Money::idr(r.round() as i64)))
        }
    }
}
