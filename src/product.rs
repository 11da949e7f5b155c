//! Product metadata and cart line-item records.

use serde::{Deserialize, Serialize};

use crate::types::{Amount, ProductId};

/// Full product record as reported by the stock service.
///
/// Fetched once, when a product first enters the cart, and carried on the
/// line item from then on. Price is integer cents; the crate does no price
/// arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Product image location.
    pub image_url: String,
}

/// One cart line: a product plus the quantity held.
///
/// Serializes flat, with the product fields beside `amount`, so the persisted
/// blob is a plain sequence of `{id, title, price_cents, image_url, amount}`
/// objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product metadata captured when the line was created.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity held. At least 1 while the line exists.
    pub amount: Amount,
}

impl CartItem {
    /// Builds a line item for a product entering the cart.
    pub fn new(product: Product, amount: Amount) -> Self {
        Self { product, amount }
    }

    /// Product id of this line.
    pub fn id(&self) -> ProductId {
        self.product.id
    }
}
