//! HTTP client for the Product Store collection resource.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use stockdeck_catalog::{Product, ProductDraft, ProductId, ProductPatch};

use crate::error::StoreError;

/// Bounded per-request timeout. A timeout surfaces as
/// [`StoreError::Network`], keeping success/failure semantics unchanged.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The store's mutation surface, one method per round-trip.
///
/// The session layer is generic over this trait so it can be exercised
/// against an in-memory fake without a server.
#[allow(async_fn_in_trait)]
pub trait ProductStore {
    /// Fetch the full collection, in server order.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Create from a draft; the server assigns the id and returns the
    /// canonical record.
    async fn create(&self, draft: &ProductDraft) -> Result<Product, StoreError>;

    /// Apply a partial update; returns the canonical record.
    async fn update(&self, id: &ProductId, patch: &ProductPatch) -> Result<Product, StoreError>;

    /// Delete by id.
    async fn delete(&self, id: &ProductId) -> Result<(), StoreError>;
}

/// Single-record and list responses arrive wrapped under a `data` field.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Gateway to the remote Product Store over HTTP.
pub struct ProductStoreClient {
    base_url: String,
    http: reqwest::Client,
}

impl ProductStoreClient {
    /// Build a client for the store at `base_url` (the API root; the
    /// products collection lives at `{base_url}/products`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn record_url(&self, id: &ProductId) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    /// Check the status, then unwrap the `data` envelope.
    async fn into_data<T>(response: reqwest::Response) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

impl ProductStore for ProductStoreClient {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let response = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let products: Vec<Product> = Self::into_data(response).await.inspect_err(|err| {
            tracing::error!(%err, "product list fetch failed");
        })?;

        tracing::debug!(count = products.len(), "fetched product collection");
        Ok(products)
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(draft)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let product: Product = Self::into_data(response).await.inspect_err(|err| {
            tracing::warn!(%err, "product create failed");
        })?;

        tracing::debug!(id = %product.id, "product created");
        Ok(product)
    }

    async fn update(&self, id: &ProductId, patch: &ProductPatch) -> Result<Product, StoreError> {
        let response = self
            .http
            .put(self.record_url(id))
            .json(patch)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let product: Product = Self::into_data(response).await.inspect_err(|err| {
            tracing::warn!(%id, %err, "product update failed");
        })?;

        tracing::debug!(id = %product.id, "product updated");
        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(self.record_url(id))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Self::check_status(response).await.inspect_err(|err| {
            tracing::warn!(%id, %err, "product delete failed");
        })?;

        tracing::debug!(%id, "product deleted");
        Ok(())
    }
}
