pub mod sqlite;

use hashbrown::HashMap;

use crate::{core::cart::Cart, product::CartItem};

/// Fixed key under which the serialized cart blob is stored.
pub const CART_STORAGE_KEY: &str = "cartstore:cart";

/// Errors raised by storage implementations and blob codecs.
#[derive(Debug)]
pub enum PersistError {
    /// Underlying SQLite failure.
    Sqlite(rusqlite::Error),
    /// Blob encode/decode failure.
    Serde(serde_json::Error),
    /// Any other storage fault.
    Message(String),
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Result alias for storage operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Key-value persistence port.
///
/// The cart uses a single fixed key, [`CART_STORAGE_KEY`]; the value is the
/// JSON array of flat line items. Implementations only need durable get/set.
pub trait CartStorage: Send {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> PersistResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> PersistResult<()>;
}

/// Serializes line items into the persisted blob format.
pub fn encode_items(items: &[CartItem]) -> PersistResult<String> {
    Ok(serde_json::to_string(items)?)
}

/// Rebuilds the cart from storage.
///
/// An absent key, an undecodable blob, or a decoded sequence that violates
/// the cart invariants (duplicate ids, zero amounts) all yield an empty cart.
/// Only a storage read fault propagates.
pub fn load_cart(storage: &dyn CartStorage) -> PersistResult<Cart> {
    let Some(blob) = storage.get(CART_STORAGE_KEY)? else {
        return Ok(Cart::new());
    };
    let Ok(items) = serde_json::from_str::<Vec<CartItem>>(&blob) else {
        return Ok(Cart::new());
    };
    Ok(Cart::from_items(items).unwrap_or_default())
}

/// Volatile in-process storage, the browser-local storage analog.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
