//! Remembered shipping addresses and profile resolution.
//!
//! A shopper may have several saved addresses; this layer selects the first
//! one owned by the user in the order the address service returns them (the
//! service defines no tie-break). Resolution failure degrades: the checkout
//! simply stays unprefilled.

use onyx_core::{AddressId, UserId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::CommerceApi;

/// A persisted shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Address ID, assigned by the address service.
    pub id: AddressId,
    /// Owning user.
    pub user_id: UserId,
    /// Street address.
    pub address_line_1: String,
    /// Apartment, suite, etc.
    pub address_line_2: Option<String>,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Postal code.
    pub zip_code: String,
    /// Country.
    pub country: String,
}

/// A shipping address creation request (no ID yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShippingAddress {
    /// Owning user.
    pub user_id: UserId,
    /// Street address.
    pub address_line_1: String,
    /// Apartment, suite, etc.
    pub address_line_2: Option<String>,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Postal code.
    pub zip_code: String,
    /// Country.
    pub country: String,
}

/// Resolve the remembered address profile for `user_id`.
///
/// Fetches all addresses from the collaborator and returns the first whose
/// owner matches, in collaborator-provided order. A service failure is caught
/// and logged here - the checkout flow must stay usable unprefilled - so this
/// never returns an error.
#[instrument(skip(api))]
pub async fn resolve_for_user<C: CommerceApi>(api: &C, user_id: UserId) -> Option<ShippingAddress> {
    match api.fetch_addresses().await {
        Ok(addresses) => addresses
            .into_iter()
            .find(|address| address.user_id == user_id),
        Err(e) => {
            tracing::warn!("Failed to fetch shipping addresses: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::api::ApiError;
    use crate::catalog::Product;

    struct FakeAddressBook {
        addresses: Vec<ShippingAddress>,
        fail: bool,
    }

    #[async_trait]
    impl CommerceApi for FakeAddressBook {
        async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError> {
            Ok(Vec::new())
        }

        async fn fetch_addresses(&self) -> Result<Vec<ShippingAddress>, ApiError> {
            if self.fail {
                return Err(ApiError::Service("address service down".to_string()));
            }
            Ok(self.addresses.clone())
        }

        async fn create_address(
            &self,
            _request: NewShippingAddress,
        ) -> Result<ShippingAddress, ApiError> {
            Err(ApiError::Service("not under test".to_string()))
        }
    }

    fn address(id: i32, user_id: i32, city: &str) -> ShippingAddress {
        ShippingAddress {
            id: AddressId::new(id),
            user_id: UserId::new(user_id),
            address_line_1: "12 Park Rd".to_string(),
            address_line_2: None,
            city: city.to_string(),
            state: "MH".to_string(),
            zip_code: "411001".to_string(),
            country: "India".to_string(),
        }
    }

    #[tokio::test]
    async fn test_resolves_first_match_in_collaborator_order() {
        let api = FakeAddressBook {
            addresses: vec![
                address(1, 7, "Nagpur"),
                address(2, 3, "Pune"),
                address(3, 3, "Mumbai"),
            ],
            fail: false,
        };

        let resolved = resolve_for_user(&api, UserId::new(3)).await;
        assert_eq!(resolved.map(|a| a.city), Some("Pune".to_string()));
    }

    #[tokio::test]
    async fn test_no_match_returns_none() {
        let api = FakeAddressBook {
            addresses: vec![address(1, 7, "Nagpur")],
            fail: false,
        };

        assert!(resolve_for_user(&api, UserId::new(3)).await.is_none());
    }

    #[tokio::test]
    async fn test_service_failure_degrades_to_none() {
        let api = FakeAddressBook {
            addresses: Vec::new(),
            fail: true,
        };

        assert!(resolve_for_user(&api, UserId::new(3)).await.is_none());
    }
}
