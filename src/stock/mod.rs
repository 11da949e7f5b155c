//! Remote stock and product lookup port.

use async_trait::async_trait;

use crate::{product::Product, types::{Amount, ProductId}};

/// Errors raised by stock service implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    /// The service has no record for this product.
    UnknownProduct(ProductId),
    /// Transport failure or malformed response.
    Service(String),
}

/// Result alias for stock service calls.
pub type StockResult<T> = Result<T, StockError>;

/// Current available quantity for a product, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    /// Units available right now.
    pub amount: Amount,
}

/// Remote stock and product lookup.
///
/// Every cart validation queries live; the crate layers no retry, backoff,
/// or caching over implementations. How the lookups travel (HTTP client,
/// fixture, database) is the implementor's concern.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Current available stock for `id`.
    async fn stock(&self, id: ProductId) -> StockResult<StockLevel>;

    /// Full product record for `id`. Called only when a product first
    /// enters the cart.
    async fn product(&self, id: ProductId) -> StockResult<Product>;
}
