//! Pure in-memory cart: an ordered item list, unique by product id.

use crate::{
    core::indices::PosIndex,
    product::CartItem,
    types::{Amount, ProductId},
};

/// Errors raised by pure cart mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// No line item exists for this product.
    Missing(ProductId),
    /// A line item for this product is already present.
    AlreadyExists(ProductId),
    /// A line item may never hold an amount of zero.
    ZeroAmount(ProductId),
}

/// Ordered cart collection, unique by product id.
///
/// Holds no I/O. Mutations keep the position index in sync with the item
/// list and enforce the amount floor; stock limits are the caller's concern.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    pos: PosIndex,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from a deserialized item sequence.
    ///
    /// Rejects duplicate product ids and zero amounts, so a blob that decodes
    /// but violates the cart invariants cannot become live state.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for item in items {
            cart.insert(item)?;
        }
        Ok(cart)
    }

    /// Ordered view of the current line items.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Cloned snapshot of the current line items.
    pub fn items_cloned(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    /// Line item for `id`, if present.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.pos.get(&id).map(|&idx| &self.items[idx])
    }

    /// Quantity held for `id`; 0 when the product is not in the cart.
    pub fn amount_of(&self, id: ProductId) -> Amount {
        self.get(id).map(|item| item.amount).unwrap_or(0)
    }

    /// True when a line item for `id` exists.
    pub fn contains(&self, id: ProductId) -> bool {
        self.pos.contains_key(&id)
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    pub fn total_amount(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Product ids in cart order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.items.iter().map(CartItem::id).collect()
    }

    /// Appends a new line item at the end of the cart.
    pub fn insert(&mut self, item: CartItem) -> Result<(), CartError> {
        let id = item.id();
        if self.pos.contains_key(&id) {
            return Err(CartError::AlreadyExists(id));
        }
        if item.amount == 0 {
            return Err(CartError::ZeroAmount(id));
        }

        self.pos.insert(id, self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Replaces the quantity on an existing line item.
    pub fn set_amount(&mut self, id: ProductId, amount: Amount) -> Result<(), CartError> {
        if amount == 0 {
            return Err(CartError::ZeroAmount(id));
        }
        let idx = *self.pos.get(&id).ok_or(CartError::Missing(id))?;
        self.items[idx].amount = amount;
        Ok(())
    }

    /// Removes the line item for `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: ProductId) -> Result<CartItem, CartError> {
        let idx = self.pos.remove(&id).ok_or(CartError::Missing(id))?;
        let removed = self.items.remove(idx);
        for item in &self.items[idx..] {
            if let Some(slot) = self.pos.get_mut(&item.id()) {
                *slot -= 1;
            }
        }
        Ok(removed)
    }
}
