//! Derived order summary.
//!
//! Computed, never stored. The precedence rule is a must-preserve invariant
//! of the display path: while a featured product is set it overrides the cart
//! entirely - both the item count/subtotal and the line listing - so the
//! checkout panel shows the single just-purchased item distinctly from a
//! multi-item cart view.

use onyx_core::Price;

use crate::cart::CartStore;
use crate::checkout::featured::FeaturedProductSlot;

/// Item count and subtotal shown to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    /// Number of items (1 while a featured product is set).
    pub item_count: u32,
    /// Subtotal in rupees.
    pub subtotal: Price,
}

impl OrderSummary {
    /// Compute the summary from the featured slot and the cart.
    ///
    /// Featured set: count 1, subtotal = that product's price, regardless of
    /// cart contents. Otherwise: count = sum of line quantities, subtotal =
    /// sum of line totals.
    #[must_use]
    pub fn compute(featured: &FeaturedProductSlot, cart: &CartStore) -> Self {
        featured.get().map_or_else(
            || Self {
                item_count: cart.total_quantity(),
                subtotal: cart.subtotal(),
            },
            |product| Self {
                item_count: 1,
                subtotal: product.price,
            },
        )
    }

    /// Subtotal formatted for display (e.g. `₹1,23,456`).
    #[must_use]
    pub fn subtotal_display(&self) -> String {
        self.subtotal.display()
    }
}

/// One row of the order-summary listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// Product name.
    pub name: String,
    /// Chosen size; absent for a featured product, which has no size at
    /// selection time.
    pub size: Option<String>,
    /// Quantity.
    pub quantity: u32,
    /// Unit price.
    pub unit_price: Price,
    /// Display image URL, if the product has one.
    pub image: Option<String>,
}

/// The line listing for the summary panel, honoring the same featured-over-
/// cart precedence as [`OrderSummary::compute`].
#[must_use]
pub fn summary_lines(featured: &FeaturedProductSlot, cart: &CartStore) -> Vec<SummaryLine> {
    featured.get().map_or_else(
        || {
            cart.lines()
                .iter()
                .map(|line| SummaryLine {
                    name: line.product.name.clone(),
                    size: Some(line.size.clone()),
                    quantity: line.quantity,
                    unit_price: line.product.price,
                    image: line.product.display_image().map(str::to_owned),
                })
                .collect()
        },
        |product| {
            vec![SummaryLine {
                name: product.name.clone(),
                size: None,
                quantity: 1,
                unit_price: product.price,
                image: product.display_image().map(str::to_owned),
            }]
        },
    )
}
