//! Checkout orchestration.
//!
//! Turns a validated form plus the session's cart into a placed order and a
//! payment redirect:
//!
//! 1. validate the form locally (no request on failure)
//! 2. `POST /orders` with the cart lines and an idempotency key
//! 3. `POST /payments/initiate` for the new order
//! 4. only if both succeeded, clear the cart
//!
//! Any failure leaves the cart untouched so the customer can resubmit.

use crate::api::StorefrontApi;
use crate::{StorefrontError, GENERIC_FAILURE};
use freshcart_commerce::cart::{Cart, CartSession, FeeSchedule, OrderTotals};
use freshcart_commerce::checkout::{
    CheckoutFlow, CheckoutForm, CheckoutState, CreateOrderRequest, IdempotencyKeys, OrderType,
};
use freshcart_commerce::ids::{IdempotencyKey, OrderId};
use std::sync::{Arc, Mutex, MutexGuard};

/// Where to send the customer after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Continue at the payment gateway.
    RedirectToPayment { order_id: OrderId, url: String },
    /// Nothing to pay online; show the order list.
    ShowOrders { order_id: OrderId },
}

impl CheckoutOutcome {
    pub fn order_id(&self) -> &OrderId {
        match self {
            CheckoutOutcome::RedirectToPayment { order_id, .. } => order_id,
            CheckoutOutcome::ShowOrders { order_id } => order_id,
        }
    }
}

/// Places orders for one customer session.
pub struct CheckoutService {
    api: Arc<dyn StorefrontApi>,
    fees: FeeSchedule,
    flow: Mutex<CheckoutFlow>,
    keys: Mutex<IdempotencyKeys>,
}

impl CheckoutService {
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self::with_fees(api, FeeSchedule::default())
    }

    pub fn with_fees(api: Arc<dyn StorefrontApi>, fees: FeeSchedule) -> Self {
        Self {
            api,
            fees,
            flow: Mutex::new(CheckoutFlow::new()),
            keys: Mutex::new(IdempotencyKeys::new()),
        }
    }

    /// Resume with keys saved from an earlier run, so a resubmission after a
    /// failed attempt carries the same `Idempotency-Key`.
    pub fn with_keys(self, keys: IdempotencyKeys) -> Self {
        *self.keys() = keys;
        self
    }

    /// Snapshot of the pending key, for saving between runs.
    pub fn idempotency_keys(&self) -> IdempotencyKeys {
        self.keys().clone()
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Fee breakdown for the cart as it stands. No network.
    pub fn quote(&self, cart: &Cart, order_type: OrderType) -> OrderTotals {
        self.fees.compute_totals(cart.total_price(), order_type)
    }

    pub fn state(&self) -> CheckoutState {
        self.flow().state().clone()
    }

    /// Message from the last failed attempt.
    pub fn last_error(&self) -> Option<String> {
        self.flow().error().map(String::from)
    }

    /// Submit the session's cart.
    ///
    /// Fails with [`StorefrontError::Busy`] while another submission is in
    /// flight. On success the cart is cleared and the drawer closed.
    pub async fn submit(
        &self,
        session: &mut CartSession,
        form: &CheckoutForm,
    ) -> Result<CheckoutOutcome, StorefrontError> {
        let submission = Submission::begin(&self.flow)?;

        let result = self.place_order(session.cart(), form).await;
        match result {
            Ok(outcome) => {
                session.cart_mut().clear();
                session.drawer_mut().close();
                self.keys().complete();
                submission.succeed();
                tracing::info!(order_id = %outcome.order_id(), "checkout complete");
                Ok(outcome)
            }
            Err(e) => {
                if e.is_validation() {
                    tracing::debug!(error = %e, "checkout form rejected");
                } else {
                    tracing::warn!(error = %e, "checkout failed");
                }
                submission.fail(e.user_message());
                Err(e)
            }
        }
    }

    async fn place_order(
        &self,
        cart: &Cart,
        form: &CheckoutForm,
    ) -> Result<CheckoutOutcome, StorefrontError> {
        form.validate()?;
        if cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        let request = CreateOrderRequest::new(form, cart);
        let key: IdempotencyKey = self.keys().key_for(&request);

        tracing::info!(
            items = request.items.len(),
            order_type = %request.order_type,
            idempotency_key = %key,
            "creating order"
        );
        let created = self.api.create_order(&request, &key).await?;
        tracing::info!(order_id = %created.id, "order created, initiating payment");

        let payment = self.api.initiate_payment(&created.id).await?;

        Ok(match payment.redirect_url() {
            Some(url) => CheckoutOutcome::RedirectToPayment {
                order_id: created.id,
                url: url.to_string(),
            },
            None => CheckoutOutcome::ShowOrders {
                order_id: created.id,
            },
        })
    }

    fn flow(&self) -> MutexGuard<'_, CheckoutFlow> {
        lock_flow(&self.flow)
    }

    fn keys(&self) -> MutexGuard<'_, IdempotencyKeys> {
        self.keys.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn lock_flow(flow: &Mutex<CheckoutFlow>) -> MutexGuard<'_, CheckoutFlow> {
    flow.lock().unwrap_or_else(|e| e.into_inner())
}

/// An in-flight submission. If dropped before it is settled, for example
/// because the `submit` future was cancelled, the flow returns to idle.
struct Submission<'a> {
    flow: &'a Mutex<CheckoutFlow>,
    settled: bool,
}

impl<'a> Submission<'a> {
    fn begin(flow: &'a Mutex<CheckoutFlow>) -> Result<Self, StorefrontError> {
        lock_flow(flow).begin()?;
        Ok(Self {
            flow,
            settled: false,
        })
    }

    fn succeed(mut self) {
        lock_flow(self.flow).succeed();
        self.settled = true;
    }

    fn fail(mut self, message: String) {
        lock_flow(self.flow).fail(message);
        self.settled = true;
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("checkout submission dropped before completing");
            lock_flow(self.flow).fail(GENERIC_FAILURE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockStorefrontApi;
    use freshcart_commerce::cart::CartLineItem;
    use freshcart_commerce::checkout::{CreatedOrder, PaymentInitiation, MISSING_REQUIRED_FIELDS};
    use freshcart_commerce::ids::ProductId;
    use freshcart_commerce::money::Money;
    use freshcart_data::FetchError;

    fn session_with_items() -> CartSession {
        let mut session = CartSession::new();
        session.add_to_cart(CartLineItem {
            product_id: ProductId::new("1"),
            name: "Garden Fresh Salad".into(),
            image: String::new(),
            unit_price: Money::idr(35_000),
            variant_id: None,
            variant_name: None,
            quantity: 2,
            note: None,
        });
        session
    }

    fn delivery_form() -> CheckoutForm {
        CheckoutForm::new("Ayu", "0812", OrderType::Delivery).with_address("Jl. Merdeka 1")
    }

    fn server_error() -> StorefrontError {
        StorefrontError::Remote(FetchError::HttpError {
            status: 502,
            message: "Bad Gateway".into(),
        })
    }

    #[tokio::test]
    async fn test_empty_name_makes_no_request() {
        let mut api = MockStorefrontApi::new();
        api.expect_create_order().never();
        api.expect_initiate_payment().never();

        let service = CheckoutService::new(Arc::new(api));
        let mut session = session_with_items();
        let form = CheckoutForm::new("", "0812", OrderType::Pickup);

        let err = service.submit(&mut session, &form).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.user_message(), MISSING_REQUIRED_FIELDS);
        assert_eq!(service.state(), CheckoutState::Idle);
        assert_eq!(service.last_error().as_deref(), Some(MISSING_REQUIRED_FIELDS));
        assert_eq!(session.cart().total_items(), 2);
    }

    #[tokio::test]
    async fn test_empty_cart_makes_no_request() {
        let mut api = MockStorefrontApi::new();
        api.expect_create_order().never();

        let service = CheckoutService::new(Arc::new(api));
        let mut session = CartSession::new();

        let err = service.submit(&mut session, &delivery_form()).await.unwrap_err();
        assert!(matches!(err, StorefrontError::EmptyCart));
    }

    #[tokio::test]
    async fn test_payment_failure_keeps_cart() {
        let mut api = MockStorefrontApi::new();
        api.expect_create_order()
            .once()
            .returning(|_, _| Ok(CreatedOrder { id: OrderId::new("ORD-1") }));
        api.expect_initiate_payment()
            .once()
            .withf(|id| *id == OrderId::new("ORD-1"))
            .returning(|_| Err(server_error()));

        let service = CheckoutService::new(Arc::new(api));
        let mut session = session_with_items();

        let err = service.submit(&mut session, &delivery_form()).await.unwrap_err();
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert_eq!(session.cart().total_items(), 2);
        assert_eq!(session.cart().total_price(), Money::idr(70_000));
        assert_eq!(service.state(), CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_success_redirects_and_clears_cart() {
        let mut api = MockStorefrontApi::new();
        api.expect_create_order()
            .once()
            .withf(|req, _| {
                req.items.len() == 1
                    && req.items[0].qty == 2
                    && req.address.as_deref() == Some("Jl. Merdeka 1")
            })
            .returning(|_, _| Ok(CreatedOrder { id: OrderId::new("ORD-2") }));
        api.expect_initiate_payment().once().returning(|_| {
            Ok(PaymentInitiation {
                payment_url: Some("https://pay.example/ORD-2".into()),
            })
        });

        let service = CheckoutService::new(Arc::new(api));
        let mut session = session_with_items();

        let outcome = service.submit(&mut session, &delivery_form()).await.unwrap();
        assert_eq!(
            outcome,
            CheckoutOutcome::RedirectToPayment {
                order_id: OrderId::new("ORD-2"),
                url: "https://pay.example/ORD-2".into(),
            }
        );
        assert!(session.cart().is_empty());
        assert!(!session.drawer().is_open());
        assert_eq!(service.state(), CheckoutState::Succeeded);
    }

    #[tokio::test]
    async fn test_no_payment_url_shows_orders() {
        let mut api = MockStorefrontApi::new();
        api.expect_create_order()
            .returning(|_, _| Ok(CreatedOrder { id: OrderId::new("ORD-3") }));
        api.expect_initiate_payment()
            .returning(|_| Ok(PaymentInitiation::default()));

        let service = CheckoutService::new(Arc::new(api));
        let mut session = session_with_items();
        let form = CheckoutForm::new("Ayu", "0812", OrderType::Pickup);

        let outcome = service.submit(&mut session, &form).await.unwrap();
        assert_eq!(
            outcome,
            CheckoutOutcome::ShowOrders {
                order_id: OrderId::new("ORD-3")
            }
        );
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_resubmit_after_failure_reuses_key() {
        let seen = Arc::new(Mutex::new(Vec::<IdempotencyKey>::new()));
        let recorded = seen.clone();

        let mut api = MockStorefrontApi::new();
        api.expect_create_order().times(2).returning(move |_, key| {
            recorded.lock().unwrap().push(key.clone());
            Err(StorefrontError::Remote(FetchError::Timeout))
        });

        let service = CheckoutService::new(Arc::new(api));
        let mut session = session_with_items();

        service.submit(&mut session, &delivery_form()).await.unwrap_err();
        service.submit(&mut session, &delivery_form()).await.unwrap_err();

        let keys = seen.lock().unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], keys[1]);
    }

    #[tokio::test]
    async fn test_restored_keys_reuse_key_across_services() {
        let seen = Arc::new(Mutex::new(Vec::<IdempotencyKey>::new()));

        let recorded = seen.clone();
        let mut api = MockStorefrontApi::new();
        api.expect_create_order().once().returning(move |_, key| {
            recorded.lock().unwrap().push(key.clone());
            Err(StorefrontError::Remote(FetchError::Timeout))
        });
        let first = CheckoutService::new(Arc::new(api));
        let mut session = session_with_items();
        first.submit(&mut session, &delivery_form()).await.unwrap_err();
        let saved = first.idempotency_keys();
        assert!(saved.is_pending());

        let recorded = seen.clone();
        let mut api = MockStorefrontApi::new();
        api.expect_create_order().once().returning(move |_, key| {
            recorded.lock().unwrap().push(key.clone());
            Ok(CreatedOrder { id: OrderId::new("ORD-4") })
        });
        api.expect_initiate_payment()
            .returning(|_| Ok(PaymentInitiation::default()));
        let second = CheckoutService::new(Arc::new(api)).with_keys(saved);
        second.submit(&mut session, &delivery_form()).await.unwrap();

        let keys = seen.lock().unwrap();
        assert_eq!(keys[0], keys[1]);
        assert!(!second.idempotency_keys().is_pending());
    }

    #[tokio::test]
    async fn test_submission_in_flight_is_refused() {
        let mut api = MockStorefrontApi::new();
        api.expect_create_order().never();

        let service = CheckoutService::new(Arc::new(api));
        service.flow().begin().unwrap();

        let mut session = session_with_items();
        let err = service.submit(&mut session, &delivery_form()).await.unwrap_err();
        assert!(matches!(err, StorefrontError::Busy));
        assert_eq!(session.cart().total_items(), 2);
    }

    #[tokio::test]
    async fn test_abandoned_submission_releases_flow() {
        let mut api = MockStorefrontApi::new();
        api.expect_create_order()
            .once()
            .returning(|_, _| Ok(CreatedOrder { id: OrderId::new("ORD-5") }));
        api.expect_initiate_payment()
            .once()
            .returning(|_| Ok(PaymentInitiation::default()));
        let service = CheckoutService::new(Arc::new(api));

        let submission = Submission::begin(&service.flow).unwrap();
        assert_eq!(service.state(), CheckoutState::Submitting);
        drop(submission);
        assert_eq!(service.state(), CheckoutState::Idle);
        assert_eq!(service.last_error().as_deref(), Some(GENERIC_FAILURE));

        let mut session = session_with_items();
        service.submit(&mut session, &delivery_form()).await.unwrap();
        assert_eq!(service.state(), CheckoutState::Succeeded);
    }

    #[test]
    fn test_quote_uses_fee_schedule() {
        let service = CheckoutService::with_fees(
            Arc::new(MockStorefrontApi::new()),
            FeeSchedule::new(15_000, 200_000),
        );
        let session = session_with_items();

        let totals = service.quote(session.cart(), OrderType::Delivery);
        assert_eq!(totals.delivery_fee, Money::idr(15_000));
        assert_eq!(totals.total, Money::idr(85_000));

        let totals = service.quote(session.cart(), OrderType::Pickup);
        assert_eq!(totals.total, Money::idr(70_000));
    }
}
