//! Checkout module.
//!
//! The checkout form and its validation, the create-order and payment
//! payloads, submission state and idempotency keys.

mod flow;
mod form;
mod idempotency;
mod order;

pub use flow::{CheckoutFlow, CheckoutState};
pub use form::{
    pickup_times, CheckoutForm, OrderType, INVALID_PICKUP_TIME, MISSING_ADDRESS,
    MISSING_REQUIRED_FIELDS,
};
pub use idempotency::IdempotencyKeys;
pub use order::{
    CreateOrderRequest, CreatedOrder, InitiatePaymentRequest, Order, OrderItem, OrderLineRequest,
    OrderStatus, PaymentInitiation,
};
