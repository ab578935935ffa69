//! Session-scoped state and the current user.
//!
//! The original storefront held cart, featured product, and user in ambient
//! context containers. Here they are explicit owned state, created at session
//! start and injected into flows by reference - no globals.

use onyx_core::{Email, UserId};
use serde::{Deserialize, Serialize};

use crate::cart::CartStore;
use crate::checkout::{FeaturedProductSlot, OrderSummary};
use crate::shell::SignalQueue;

/// The authenticated shopper, as provided by the external auth collaborator.
///
/// `None` in the session means unauthenticated; checkout submission is then
/// refused before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User ID.
    pub id: UserId,
    /// Email address.
    pub email: Email,
    /// Phone number, used to pre-fill the checkout draft.
    pub phone: String,
}

/// All mutable state scoped to one shopper session.
///
/// Single-threaded by construction: only one event handler mutates it at a
/// time, so cart and featured-slot writes need no lock here. An embedding
/// that shares a session across threads must add its own mutual exclusion.
#[derive(Debug, Default)]
pub struct StorefrontSession {
    /// The shopper's cart.
    pub cart: CartStore,
    /// The single "currently purchased directly" product, if any.
    pub featured: FeaturedProductSlot,
    /// Pending UI intents, drained by the shell.
    pub signals: SignalQueue,
    user: Option<CurrentUser>,
}

impl StorefrontSession {
    /// Create a fresh anonymous session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for an authenticated shopper.
    #[must_use]
    pub fn with_user(user: CurrentUser) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    /// The authenticated shopper, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// Attach an authenticated shopper to the session.
    pub fn sign_in(&mut self, user: CurrentUser) {
        self.user = Some(user);
    }

    /// Detach the shopper. The featured slot is session-scoped presentation
    /// state and is cleared with the identity; the cart survives until an
    /// explicit [`CartStore::clear`].
    pub fn sign_out(&mut self) {
        self.user = None;
        self.featured.set(None);
    }

    /// Order summary for the current featured/cart state.
    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::compute(&self.featured, &self.cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shopper() -> CurrentUser {
        CurrentUser {
            id: UserId::new(1),
            email: Email::parse("shopper@example.com").expect("valid email"),
            phone: "9876543210".to_string(),
        }
    }

    #[test]
    fn test_new_session_is_anonymous_and_empty() {
        let session = StorefrontSession::new();
        assert!(session.user().is_none());
        assert!(session.cart.is_empty());
        assert!(session.featured.get().is_none());
        assert!(session.signals.is_empty());
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut session = StorefrontSession::new();
        session.sign_in(shopper());
        assert_eq!(session.user(), Some(&shopper()));

        session.sign_out();
        assert!(session.user().is_none());
    }
}
