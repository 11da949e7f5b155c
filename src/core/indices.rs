//! Index aliases used by the core cart.

use hashbrown::HashMap;

use crate::types::ProductId;

/// Product id to slot position in the ordered item list.
pub type PosIndex = HashMap<ProductId, usize>;
