//! The remote storefront API, as seen by this client.

use crate::StorefrontError;
use async_trait::async_trait;
use freshcart_auth::{AuthResponse, LoginForm, RegisterRequest, User};
use freshcart_commerce::admin::{
    AdminStats, BundlePayload, CategoryPayload, OrderStatusUpdate, ProductPayload,
};
use freshcart_commerce::checkout::{
    CreateOrderRequest, CreatedOrder, Order, OrderStatus, PaymentInitiation,
};
use freshcart_commerce::ids::{BundleId, CategoryId, IdempotencyKey, OrderId, ProductId};
use freshcart_commerce::catalog::{Bundle, Category, Product, ProductFilters};
use freshcart_data::PageMeta;

#[cfg(test)]
use mockall::automock;

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Present when the server paginated the list.
    pub meta: Option<PageMeta>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, meta: Option<PageMeta>) -> Self {
        Self { items, meta }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Customer-facing endpoints: catalog, orders, payments and accounts.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// `GET /products` with filter query.
    async fn products(&self, filters: &ProductFilters) -> Result<Page<Product>, StorefrontError>;

    /// `GET /products/{slug}`.
    async fn product_by_slug(&self, slug: &str) -> Result<Product, StorefrontError>;

    /// `GET /categories`.
    async fn categories(&self) -> Result<Vec<Category>, StorefrontError>;

    /// `GET /bundles`.
    async fn bundles(&self) -> Result<Vec<Bundle>, StorefrontError>;

    /// `GET /orders`, the signed-in customer's orders.
    async fn orders(&self) -> Result<Vec<Order>, StorefrontError>;

    /// `POST /orders`, sent with an `Idempotency-Key` header.
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
        key: &IdempotencyKey,
    ) -> Result<CreatedOrder, StorefrontError>;

    /// `POST /payments/initiate`.
    async fn initiate_payment(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentInitiation, StorefrontError>;

    /// `POST /auth/login`.
    async fn login(&self, form: &LoginForm) -> Result<AuthResponse, StorefrontError>;

    /// `POST /auth/register`.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, StorefrontError>;

    /// `GET /auth/me`.
    async fn me(&self) -> Result<User, StorefrontError>;
}

/// Admin endpoints. Thin pass-through; the server owns the rules.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_products(
        &self,
        filters: &ProductFilters,
    ) -> Result<Page<Product>, StorefrontError>;

    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, StorefrontError>;

    async fn update_product(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, StorefrontError>;

    async fn delete_product(&self, id: &ProductId) -> Result<(), StorefrontError>;

    async fn list_categories(&self) -> Result<Vec<Category>, StorefrontError>;

    async fn create_category(&self, payload: &CategoryPayload)
        -> Result<Category, StorefrontError>;

    async fn update_category(
        &self,
        id: &CategoryId,
        payload: &CategoryPayload,
    ) -> Result<Category, StorefrontError>;

    async fn delete_category(&self, id: &CategoryId) -> Result<(), StorefrontError>;

    async fn list_bundles(&self) -> Result<Vec<Bundle>, StorefrontError>;

    async fn create_bundle(&self, payload: &BundlePayload) -> Result<Bundle, StorefrontError>;

    async fn update_bundle(
        &self,
        id: &BundleId,
        payload: &BundlePayload,
    ) -> Result<Bundle, StorefrontError>;

    async fn delete_bundle(&self, id: &BundleId) -> Result<(), StorefrontError>;

    /// `GET /admin/orders`, optionally filtered by status.
    async fn list_orders(&self, status: Option<OrderStatus>)
        -> Result<Vec<Order>, StorefrontError>;

    /// `PATCH /admin/orders/{id}`.
    async fn update_order_status(
        &self,
        id: &OrderId,
        update: &OrderStatusUpdate,
    ) -> Result<(), StorefrontError>;

    /// `GET /admin/stats`.
    async fn stats(&self) -> Result<AdminStats, StorefrontError>;
}
