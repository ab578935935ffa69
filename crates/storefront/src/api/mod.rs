//! Backend commerce service contract.
//!
//! The catalog, address book, and address persistence live behind one
//! request/response boundary. The domain layer consumes it through the
//! [`CommerceApi`] trait; [`RestCommerceClient`] is the production
//! implementation, and tests substitute in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;

mod rest;

pub use rest::RestCommerceClient;

use crate::catalog::Product;
use crate::checkout::address::{NewShippingAddress, ShippingAddress};

/// Errors that can occur when calling the commerce service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint path did not join onto the base URL.
    #[error("invalid endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-success HTTP status.
    #[error("unexpected status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for logs.
        message: String,
    },

    /// Service-level failure reported by the backend or a test double.
    #[error("service error: {0}")]
    Service(String),
}

/// The backend commerce service as the domain layer sees it.
#[async_trait]
pub trait CommerceApi: Send + Sync {
    /// Fetch the product catalog.
    async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError>;

    /// Fetch all saved shipping addresses (each carries its owning user's
    /// id); filtering to a user happens client-side.
    async fn fetch_addresses(&self) -> Result<Vec<ShippingAddress>, ApiError>;

    /// Persist a new shipping address; the service assigns the id.
    async fn create_address(
        &self,
        request: NewShippingAddress,
    ) -> Result<ShippingAddress, ApiError>;
}
