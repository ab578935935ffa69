//! Checkout initialization flow.
//!
//! The original storefront pre-filled the form from an effect that ran when
//! both the user and the form were available. Here that is an explicit async
//! step: resolve the profile, then apply it only if the checkout view still
//! exists. A resolve that completes after the shopper navigated away is
//! discarded.

use tracing::instrument;

use crate::api::CommerceApi;
use crate::checkout::address::resolve_for_user;
use crate::checkout::draft::CheckoutDraft;
use crate::lifecycle::LifetimeHandle;
use crate::session::CurrentUser;

/// Resolve the shopper's address profile and pre-fill `draft` from it.
///
/// Does nothing without an authenticated user or a resolved profile, and
/// discards a profile that arrives after `view` is disposed. Returns whether
/// the pre-fill was applied.
#[instrument(skip_all)]
pub async fn prefill_from_profile<C: CommerceApi>(
    api: &C,
    user: Option<&CurrentUser>,
    draft: &mut CheckoutDraft,
    view: &LifetimeHandle,
) -> bool {
    let Some(user) = user else {
        tracing::debug!("Skipping address pre-fill; no authenticated user");
        return false;
    };

    let Some(profile) = resolve_for_user(api, user.id).await else {
        return false;
    };

    if !view.is_live() {
        tracing::debug!("Discarding resolved address profile; checkout view is gone");
        return false;
    }

    draft.prefill(&profile, &user.phone)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use onyx_core::{AddressId, Email, UserId};

    use super::*;
    use crate::api::ApiError;
    use crate::catalog::Product;
    use crate::checkout::address::{NewShippingAddress, ShippingAddress};
    use crate::lifecycle::ViewLifetime;

    struct FakeApi {
        addresses: Vec<ShippingAddress>,
        fail: bool,
        // Disposed mid-flight to simulate navigating away during the fetch.
        dispose_during_fetch: Mutex<Option<ViewLifetime>>,
    }

    impl FakeApi {
        fn with_addresses(addresses: Vec<ShippingAddress>) -> Self {
            Self {
                addresses,
                fail: false,
                dispose_during_fetch: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CommerceApi for FakeApi {
        async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError> {
            Ok(Vec::new())
        }

        async fn fetch_addresses(&self) -> Result<Vec<ShippingAddress>, ApiError> {
            if let Some(view) = self.dispose_during_fetch.lock().unwrap().take() {
                view.dispose();
            }
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

    fn shopper() -> CurrentUser {
        CurrentUser {
            id: UserId::new(3),
            email: Email::parse("shopper@example.com").unwrap(),
            phone: "9876543210".to_string(),
        }
    }

    fn saved_address() -> ShippingAddress {
        ShippingAddress {
            id: AddressId::new(1),
            user_id: UserId::new(3),
            address_line_1: "12 Park Rd".to_string(),
            address_line_2: None,
            city: "Pune".to_string(),
            state: "MH".to_string(),
            zip_code: "411001".to_string(),
            country: "India".to_string(),
        }
    }

    #[tokio::test]
    async fn test_prefills_when_user_and_profile_available() {
        let api = FakeApi::with_addresses(vec![saved_address()]);
        let view = ViewLifetime::new();
        let mut draft = CheckoutDraft::new();
        let user = shopper();

        let applied = prefill_from_profile(&api, Some(&user), &mut draft, &view.handle()).await;

        assert!(applied);
        assert_eq!(draft.address(), "12 Park Rd");
        assert_eq!(draft.city(), "Pune");
        assert_eq!(draft.phone(), "9876543210");
    }

    #[tokio::test]
    async fn test_skips_without_user() {
        let api = FakeApi::with_addresses(vec![saved_address()]);
        let view = ViewLifetime::new();
        let mut draft = CheckoutDraft::new();

        let applied = prefill_from_profile(&api, None, &mut draft, &view.handle()).await;

        assert!(!applied);
        assert!(draft.address().is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_leaves_draft_untouched() {
        let api = FakeApi {
            addresses: vec![saved_address()],
            fail: true,
            dispose_during_fetch: Mutex::new(None),
        };
        let view = ViewLifetime::new();
        let mut draft = CheckoutDraft::new();
        let user = shopper();

        let applied = prefill_from_profile(&api, Some(&user), &mut draft, &view.handle()).await;

        assert!(!applied);
        assert!(draft.address().is_empty());
        assert!(draft.city().is_empty());
        assert!(draft.phone().is_empty());
    }

    #[tokio::test]
    async fn test_late_profile_discarded_after_disposal() {
        let view = ViewLifetime::new();
        let handle = view.handle();
        let api = FakeApi {
            addresses: vec![saved_address()],
            fail: false,
            dispose_during_fetch: Mutex::new(Some(view)),
        };
        let mut draft = CheckoutDraft::new();
        let user = shopper();

        let applied = prefill_from_profile(&api, Some(&user), &mut draft, &handle).await;

        assert!(!applied);
        assert!(draft.address().is_empty());
    }
}
