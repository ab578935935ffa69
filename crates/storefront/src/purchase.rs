//! Size-selection / add-to-cart protocol.
//!
//! Triggering "add to cart" on a catalog product opens a size prompt holding
//! the product as a pending candidate, and provisionally sets the featured
//! slot so the order summary can already show the product. Confirming writes
//! the candidate into the slot and records the purchase in the cart; buy-now
//! additionally navigates to checkout. The purchase still lands in the cart
//! either way, so the checkout summary can show the single just-purchased
//! item while the multi-item cart keeps it for later.

use crate::catalog::Product;
use crate::session::StorefrontSession;
use crate::shell::{NavigationTarget, Notification, ShellSignal};

/// An open size-selection prompt holding the chosen product as its pending
/// candidate. Consumed by confirming or dismissing.
#[derive(Debug)]
pub struct SizeSelectionPrompt {
    candidate: Product,
}

impl SizeSelectionPrompt {
    /// Open the prompt for `product`, provisionally setting the featured
    /// slot so the summary panel reflects the selection while the prompt is
    /// up.
    #[must_use]
    pub fn begin(product: Product, session: &mut StorefrontSession) -> Self {
        session.featured.set(Some(product.clone()));
        Self { candidate: product }
    }

    /// The product the prompt was opened for.
    #[must_use]
    pub const fn candidate(&self) -> &Product {
        &self.candidate
    }

    /// Confirm "add to cart" with the chosen size.
    ///
    /// Writes the pending candidate into the featured slot, adds one unit at
    /// `size` to the cart, and raises a success notification. No navigation.
    pub fn confirm_add(self, size: impl Into<String>, session: &mut StorefrontSession) {
        self.record(size, session);
        session
            .signals
            .push(ShellSignal::Notify(Notification::success(
                "Product added to cart.",
            )));
    }

    /// Confirm "buy now" with the chosen size.
    ///
    /// Same slot write and cart add as [`confirm_add`](Self::confirm_add),
    /// immediately followed by a navigation intent to the checkout stage.
    pub fn confirm_buy_now(self, size: impl Into<String>, session: &mut StorefrontSession) {
        self.record(size, session);
        session
            .signals
            .push(ShellSignal::Navigate(NavigationTarget::Checkout));
    }

    /// Close the prompt without confirming.
    ///
    /// The cart is untouched. The provisional featured value is cleared so
    /// the summary never shows a product the shopper never confirmed.
    pub fn dismiss(self, session: &mut StorefrontSession) {
        session.featured.set(None);
    }

    fn record(self, size: impl Into<String>, session: &mut StorefrontSession) {
        session.featured.set(Some(self.candidate.clone()));
        session.cart.add(self.candidate, 1, size);
    }
}
