//! Checkout state model.
//!
//! - [`featured`] - the single "buy now" product slot
//! - [`summary`] - derived order summary (featured overrides cart)
//! - [`address`] - remembered shipping addresses and profile resolution
//! - [`draft`] - the in-progress shipping + payment form
//! - [`flow`] - async composition of resolve, lifetime guard, and pre-fill

pub mod address;
pub mod draft;
pub mod featured;
pub mod flow;
pub mod summary;

pub use address::{NewShippingAddress, ShippingAddress, resolve_for_user};
pub use draft::{CheckoutDraft, Field, PaymentMethod, SubmitError, ValidationErrors};
pub use featured::FeaturedProductSlot;
pub use flow::prefill_from_profile;
pub use summary::{OrderSummary, SummaryLine, summary_lines};
