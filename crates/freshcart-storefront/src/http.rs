//! HTTP implementation of the storefront and admin APIs.

use crate::api::{AdminApi, Page, StorefrontApi};
use crate::StorefrontError;
use async_trait::async_trait;
use freshcart_auth::{AuthError, AuthResponse, CredentialStore, LoginForm, RegisterRequest, User};
use freshcart_commerce::admin::{
    AdminStats, BundlePayload, CategoryPayload, OrderStatusUpdate, ProductPayload,
};
use freshcart_commerce::catalog::{Bundle, Category, Product, ProductFilters};
use freshcart_commerce::checkout::{
    CreateOrderRequest, CreatedOrder, InitiatePaymentRequest, Order, OrderStatus,
    PaymentInitiation,
};
use freshcart_commerce::ids::{BundleId, CategoryId, IdempotencyKey, OrderId, ProductId};
use freshcart_commerce::ValidationError;
use freshcart_data::{path_segment, ClientRequestBuilder, FetchClient, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Talks to the storefront REST API.
///
/// Every request carries the stored bearer token, if there is one. Any 401
/// clears the stored credentials and fails with
/// [`StorefrontError::Unauthorized`].
#[derive(Clone)]
pub struct HttpStorefront {
    client: FetchClient,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpStorefront {
    pub fn new(client: FetchClient, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Send with the stored token and map the status.
    async fn execute(&self, request: ClientRequestBuilder) -> Result<Response, StorefrontError> {
        let request = match self.credentials.token() {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        };

        let response = request.send().await?;

        if response.is_unauthorized() {
            tracing::warn!("API rejected credentials, logging out");
            if let Err(e) = self.credentials.clear() {
                tracing::warn!(error = %e, "failed to clear stored credentials");
            }
            return Err(StorefrontError::Unauthorized);
        }

        Ok(response.error_for_status()?)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: ClientRequestBuilder,
    ) -> Result<T, StorefrontError> {
        let response = self.execute(request).await?;
        Ok(response.data()?)
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        request: ClientRequestBuilder,
    ) -> Result<Page<T>, StorefrontError> {
        let response = self.execute(request).await?;
        let envelope = response.envelope::<Vec<T>>()?;
        let meta = envelope.meta().copied();
        Ok(Page::new(envelope.into_data(), meta))
    }
}

/// `{collection}/{id}` with `id` escaped as one path segment.
fn resource_path(collection: &str, id: &str) -> Result<String, StorefrontError> {
    let segment = path_segment(id)
        .map_err(|_| ValidationError::new(format!("Invalid identifier: {:?}", id)))?;
    Ok(format!("{}/{}", collection, segment))
}

#[async_trait]
impl StorefrontApi for HttpStorefront {
    async fn products(&self, filters: &ProductFilters) -> Result<Page<Product>, StorefrontError> {
        self.fetch_page(self.client.get("/products").query(filters.to_query()))
            .await
    }

    async fn product_by_slug(&self, slug: &str) -> Result<Product, StorefrontError> {
        self.fetch(self.client.get(resource_path("/products", slug)?))
            .await
    }

    async fn categories(&self) -> Result<Vec<Category>, StorefrontError> {
        self.fetch(self.client.get("/categories")).await
    }

    async fn bundles(&self) -> Result<Vec<Bundle>, StorefrontError> {
        self.fetch(self.client.get("/bundles")).await
    }

    async fn orders(&self) -> Result<Vec<Order>, StorefrontError> {
        self.fetch(self.client.get("/orders")).await
    }

    async fn create_order(
        &self,
        request: &CreateOrderRequest,
        key: &IdempotencyKey,
    ) -> Result<CreatedOrder, StorefrontError> {
        let req = self
            .client
            .post("/orders")
            .idempotency_key(key.as_str())
            .json(request)?;
        self.fetch(req).await
    }

    async fn initiate_payment(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentInitiation, StorefrontError> {
        let body = InitiatePaymentRequest {
            order_id: order_id.clone(),
        };
        self.fetch(self.client.post("/payments/initiate").json(&body)?)
            .await
    }

    async fn login(&self, form: &LoginForm) -> Result<AuthResponse, StorefrontError> {
        form.validate()?;
        let req = self.client.post("/auth/login").json(form)?;
        self.fetch(req).await.map_err(|e| match e {
            StorefrontError::Unauthorized | StorefrontError::Remote(_) => {
                StorefrontError::Auth(AuthError::InvalidCredentials)
            }
            other => other,
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, StorefrontError> {
        let req = self.client.post("/auth/register").json(request)?;
        self.fetch(req).await.map_err(|e| match e {
            StorefrontError::Remote(err) => {
                StorefrontError::Auth(AuthError::RegistrationFailed(err.to_string()))
            }
            other => other,
        })
    }

    async fn me(&self) -> Result<User, StorefrontError> {
        self.fetch(self.client.get("/auth/me")).await
    }
}

#[async_trait]
impl AdminApi for HttpStorefront {
    async fn list_products(
        &self,
        filters: &ProductFilters,
    ) -> Result<Page<Product>, StorefrontError> {
        self.fetch_page(self.client.get("/admin/products").query(filters.to_query()))
            .await
    }

    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, StorefrontError> {
        self.fetch(self.client.post("/admin/products").json(payload)?)
            .await
    }

    async fn update_product(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, StorefrontError> {
        let req = self
            .client
            .put(resource_path("/admin/products", id.as_str())?)
            .json(payload)?;
        self.fetch(req).await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), StorefrontError> {
        self.execute(self.client.delete(resource_path("/admin/products", id.as_str())?))
            .await?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorefrontError> {
        self.fetch(self.client.get("/admin/categories")).await
    }

    async fn create_category(
        &self,
        payload: &CategoryPayload,
    ) -> Result<Category, StorefrontError> {
        self.fetch(self.client.post("/admin/categories").json(payload)?)
            .await
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        payload: &CategoryPayload,
    ) -> Result<Category, StorefrontError> {
        let req = self
            .client
            .put(resource_path("/admin/categories", id.as_str())?)
            .json(payload)?;
        self.fetch(req).await
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<(), StorefrontError> {
        self.execute(self.client.delete(resource_path("/admin/categories", id.as_str())?))
            .await?;
        Ok(())
    }

    async fn list_bundles(&self) -> Result<Vec<Bundle>, StorefrontError> {
        self.fetch(self.client.get("/admin/bundles")).await
    }

    async fn create_bundle(&self, payload: &BundlePayload) -> Result<Bundle, StorefrontError> {
        self.fetch(self.client.post("/admin/bundles").json(payload)?)
            .await
    }

    async fn update_bundle(
        &self,
        id: &BundleId,
        payload: &BundlePayload,
    ) -> Result<Bundle, StorefrontError> {
        let req = self
            .client
            .put(resource_path("/admin/bundles", id.as_str())?)
            .json(payload)?;
        self.fetch(req).await
    }

    async fn delete_bundle(&self, id: &BundleId) -> Result<(), StorefrontError> {
        self.execute(self.client.delete(resource_path("/admin/bundles", id.as_str())?))
            .await?;
        Ok(())
    }

    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, StorefrontError> {
        let query: Vec<(&str, String)> = status
            .map(|s| ("status", s.as_str().to_string()))
            .into_iter()
            .collect();
        self.fetch(self.client.get("/admin/orders").query(query))
            .await
    }

    async fn update_order_status(
        &self,
        id: &OrderId,
        update: &OrderStatusUpdate,
    ) -> Result<(), StorefrontError> {
        let req = self
            .client
            .patch(resource_path("/admin/orders", id.as_str())?)
            .json(update)?;
        self.execute(req).await?;
        Ok(())
    }

    async fn stats(&self) -> Result<AdminStats, StorefrontError> {
        self.fetch(self.client.get("/admin/stats")).await
    }
}
