//! Cart state and line-item merging.
//!
//! A cart line is one `(product, size)` pairing with a quantity. Adding the
//! same product and size again increments the existing line instead of
//! duplicating it; a different size is a new line. Line order is insertion
//! order of the first add and is stable across re-adds.

use onyx_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// One cart line: a product at a chosen size, with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// The product this line refers to.
    pub product: Product,
    /// Positive quantity.
    pub quantity: u32,
    /// Size chosen at add time.
    pub size: String,
}

impl CartLineItem {
    /// Total for this line (`quantity` x unit price).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// The shopper's cart.
///
/// Mutations are synchronous; under the single-threaded session model no
/// additional locking is needed. A multi-threaded embedding must serialize
/// access externally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartStore {
    lines: Vec<CartLineItem>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` of `product` at `size`.
    ///
    /// Merges into an existing `(product id, size)` line when present,
    /// otherwise appends a new line. Adding a zero quantity is a no-op.
    /// No upper bound is enforced; inventory limits are the backend's concern.
    pub fn add(&mut self, product: Product, quantity: u32, size: impl Into<String>) {
        if quantity == 0 {
            return;
        }
        let size = size.into();
        let existing = self
            .lines
            .iter()
            .position(|line| line.product.id == product.id && line.size == size);
        match existing {
            Some(index) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.quantity += quantity;
                }
            }
            None => self.lines.push(CartLineItem {
                product,
                quantity,
                size,
            }),
        }
    }

    /// Set the quantity of the `(product_id, size)` line.
    ///
    /// A no-op when no such line exists. Setting the quantity to zero removes
    /// the line, matching the backend's cart-line semantics where quantity
    /// zero deletes the line.
    pub fn update_quantity(&mut self, product_id: ProductId, size: &str, new_quantity: u32) {
        if new_quantity == 0 {
            self.remove(product_id, size);
            return;
        }
        if let Some(line) = self.find_line_mut(product_id, size) {
            line.quantity = new_quantity;
        }
    }

    /// Remove the `(product_id, size)` line. Removing an absent line is a
    /// no-op, not an error.
    pub fn remove(&mut self, product_id: ProductId, size: &str) {
        self.lines
            .retain(|line| !(line.product.id == product_id && line.size == size));
    }

    /// Empty the cart. Invoked after an order is finalized.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The cart lines, in insertion order of first add.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum over lines of quantity x unit price.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    fn find_line_mut(&mut self, product_id: ProductId, size: &str) -> Option<&mut CartLineItem> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id && line.size == size)
    }
}
