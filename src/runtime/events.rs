//! Runtime event stream payloads.

use crate::{product::CartItem, types::{Amount, ProductId}};

/// Transient user-facing failure category with a fixed message per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartNotice {
    /// Requested quantity exceeds the available stock.
    StockExceeded,
    /// The targeted product is not in the cart.
    EntryNotFound,
    /// Adding a product failed for any other reason.
    AddFailed,
    /// Removing a product failed for any other reason.
    RemoveFailed,
    /// Updating a quantity failed for any other reason.
    UpdateFailed,
}

impl CartNotice {
    /// Fixed display message for this notice.
    pub fn message(self) -> &'static str {
        match self {
            Self::StockExceeded => "Requested quantity is out of stock",
            Self::EntryNotFound => "Product is not in the cart",
            Self::AddFailed => "Failed to add product",
            Self::RemoveFailed => "Failed to remove product",
            Self::UpdateFailed => "Failed to update product amount",
        }
    }
}

/// Events emitted from the single-writer runtime loop.
///
/// Successful mutations carry the full post-commit snapshot so observers can
/// re-render without a follow-up query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added or its quantity bumped by one.
    Added {
        /// Affected product id.
        id: ProductId,
        /// Cart snapshot after the commit.
        cart: Vec<CartItem>,
    },
    /// A line item was removed entirely.
    Removed {
        /// Removed product id.
        id: ProductId,
        /// Cart snapshot after the commit.
        cart: Vec<CartItem>,
    },
    /// A line item's quantity was set to an explicit value.
    AmountSet {
        /// Affected product id.
        id: ProductId,
        /// Quantity now held.
        amount: Amount,
        /// Cart snapshot after the commit.
        cart: Vec<CartItem>,
    },
    /// A mutation was rejected; state did not change.
    Rejected {
        /// Targeted product id.
        id: ProductId,
        /// User-facing failure category.
        notice: CartNotice,
    },
}
