//! REST implementation of the commerce service contract.
//!
//! Plain JSON over HTTP with a bearer token, using `reqwest`. The client is
//! a cheap clonable handle around a shared inner.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::api::{ApiError, CommerceApi};
use crate::catalog::Product;
use crate::checkout::address::{NewShippingAddress, ShippingAddress};
use crate::config::ApiConfig;

const PRODUCTS_PATH: &str = "products";
const ADDRESSES_PATH: &str = "shipping-addresses";

/// Client for the backend commerce REST API.
#[derive(Clone)]
pub struct RestCommerceClient {
    inner: Arc<RestCommerceClientInner>,
}

struct RestCommerceClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: String,
}

impl RestCommerceClient {
    /// Create a new client from API configuration.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            inner: Arc::new(RestCommerceClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_token: config.api_token.expose_secret().to_string(),
            }),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.inner.base_url.join(path)?;
        debug!(%url, "GET");
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(&self.inner.api_token)
            .send()
            .await?;
        Self::into_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.inner.base_url.join(path)?;
        debug!(%url, "POST");
        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(&self.inner.api_token)
            .json(body)
            .send()
            .await?;
        Self::into_json(response).await
    }

    async fn into_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CommerceApi for RestCommerceClient {
    #[instrument(skip(self))]
    async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json(PRODUCTS_PATH).await
    }

    #[instrument(skip(self))]
    async fn fetch_addresses(&self) -> Result<Vec<ShippingAddress>, ApiError> {
        self.get_json(ADDRESSES_PATH).await
    }

    #[instrument(skip(self, request))]
    async fn create_address(
        &self,
        request: NewShippingAddress,
    ) -> Result<ShippingAddress, ApiError> {
        self.post_json(ADDRESSES_PATH, &request).await
    }
}
