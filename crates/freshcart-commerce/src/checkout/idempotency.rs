//! Idempotency keys for order creation.

use crate::checkout::CreateOrderRequest;
use crate::ids::IdempotencyKey;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hands out the `Idempotency-Key` for create-order calls.
///
/// Resubmitting the same request after a failure reuses its key, so a retry
/// after a lost response cannot place a second order. Any change to the
/// request, or a completed order, gets a fresh key.
///
/// Serializable so a pending key can outlive the process that issued it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdempotencyKeys {
    #[serde(default)]
    pending: Option<(u64, IdempotencyKey)>,
}

impl IdempotencyKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key for submitting `request`.
    pub fn key_for(&mut self, request: &CreateOrderRequest) -> IdempotencyKey {
        let fingerprint = fingerprint(request);
        match &self.pending {
            Some((fp, key)) if *fp == fingerprint => key.clone(),
            _ => {
                let key = IdempotencyKey::generate();
                self.pending = Some((fingerprint, key.clone()));
                key
            }
        }
    }

    /// Forget the pending key once its order was placed.
    pub fn complete(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

fn fingerprint(request: &CreateOrderRequest) -> u64 {
    let mut hasher = DefaultHasher::new();
    request.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::checkout::{CheckoutForm, OrderType};

    fn request(name: &str) -> CreateOrderRequest {
        CreateOrderRequest::new(&CheckoutForm::new(name, "0812", OrderType::Pickup), &Cart::new())
    }

    #[test]
    fn test_retry_reuses_key() {
        let mut keys = IdempotencyKeys::new();
        let a = keys.key_for(&request("Ayu"));
        let b = keys.key_for(&request("Ayu"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_changed_request_gets_new_key() {
        let mut keys = IdempotencyKeys::new();
        let a = keys.key_for(&request("Ayu"));
        let b = keys.key_for(&request("Budi"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_complete_rotates_key() {
        let mut keys = IdempotencyKeys::new();
        let a = keys.key_for(&request("Ayu"));
        keys.complete();
        let b = keys.key_for(&request("Ayu"));
        assert_ne!(a, b);
        assert!(keys.is_pending());
    }

    #[test]
    fn test_pending_key_survives_serde() {
        let mut keys = IdempotencyKeys::new();
        let a = keys.key_for(&request("Ayu"));

        let json = serde_json::to_string(&keys).unwrap();
        let mut restored: IdempotencyKeys = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.key_for(&request("Ayu")), a);
    }
}
