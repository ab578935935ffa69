//! Catalog product entity.
//!
//! Products are owned by the external catalog service; this layer only reads
//! them. Size options are implicit and resolved at cart-add time.

use onyx_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// An immutable catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price (non-negative).
    pub price: Price,
    /// Ordered image URLs; the first one is the display image. May be empty.
    pub images: Vec<String>,
}

impl Product {
    /// The image shown in listings and the order summary, if any.
    #[must_use]
    pub fn display_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
