//! The featured-product slot.
//!
//! Holds at most one product: the one currently being purchased directly
//! ("buy now" or the size-selection flow), as opposed to the accumulated
//! cart. While set, it takes precedence over the cart in the order summary.
//! Session-scoped, never persisted.

use crate::catalog::Product;

/// At most one "currently purchased directly" product. Last write wins.
#[derive(Debug, Clone, Default)]
pub struct FeaturedProductSlot {
    current: Option<Product>,
}

impl FeaturedProductSlot {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Replace the slot's value. `None` clears it.
    pub fn set(&mut self, product: Option<Product>) {
        self.current = product;
    }

    /// The featured product, if any.
    #[must_use]
    pub const fn get(&self) -> Option<&Product> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use onyx_core::{Price, ProductId};

    use super::*;

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_rupees(500),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_last_write_wins() {
        let mut slot = FeaturedProductSlot::new();
        slot.set(Some(product(1)));
        slot.set(Some(product(2)));
        assert_eq!(slot.get().map(|p| p.id), Some(ProductId::new(2)));

        slot.set(None);
        assert!(slot.get().is_none());
    }
}
