//! HTTP client for the inventory and catalog collaborators.
//!
//! Both collaborators live behind the same base URL and speak plain JSON
//! over GET:
//!
//! - `GET {base}/stock/{productId}` -> `{ "amount": n }`
//! - `GET {base}/products/{productId}` -> full product record (no amount)
//!
//! The client enforces no timeout of its own; an unresponsive service simply
//! leaves the in-flight operation pending and the cart in its prior state.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use rocket_cart_core::{Product, ProductId, StockLevel};

use crate::config::CartConfig;
use crate::error::ServiceError;
use crate::store::{CatalogService, InventoryService};

/// Client for the inventory and catalog HTTP services.
///
/// Cheaply cloneable via `Arc`; one clone can serve as the inventory seam
/// and another as the catalog seam of the same store.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<CommerceClientInner>,
}

struct CommerceClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CommerceClient {
    /// Create a new client from configuration.
    #[must_use]
    pub fn new(config: &CartConfig) -> Self {
        Self {
            inner: Arc::new(CommerceClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_base_url.clone(),
            }),
        }
    }

    /// Execute a GET request and decode the JSON response.
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ServiceError> {
        let mut url = self.inner.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ServiceError::Url("base URL cannot carry path segments".to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }

        debug!(%url, "GET");

        let response = self.inner.client.get(url.clone()).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound(url.to_string()));
        }

        let body = response.error_for_status()?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl InventoryService for CommerceClient {
    #[instrument(skip(self))]
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel, ServiceError> {
        self.get_json(&["stock", &product_id.to_string()]).await
    }
}

impl CatalogService for CommerceClient {
    #[instrument(skip(self))]
    async fn product(&self, product_id: ProductId) -> Result<Product, ServiceError> {
        self.get_json(&["products", &product_id.to_string()]).await
    }
}
