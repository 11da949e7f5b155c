//! Authoritative in-memory shopping cart with write-through local persistence
//! and live stock validation.
//!
//! # Examples
//!
//! In-memory usage with [`core::cart::Cart`]:
//! ```
//! use cartstore::{
//!     core::cart::Cart,
//!     product::{CartItem, Product},
//! };
//!
//! let mut cart = Cart::new();
//! cart.insert(CartItem::new(
//!     Product {
//!         id: 5,
//!         title: "Sneaker".to_string(),
//!         price_cents: 17_999,
//!         image_url: "https://shop.example/5.png".to_string(),
//!     },
//!     1,
//! ))
//! .expect("insert");
//! assert_eq!(cart.amount_of(5), 1);
//! ```
//!
//! Runtime usage with SQLite storage and a stock service:
//! ```no_run
//! use cartstore::{
//!     persist::{load_cart, sqlite::SqliteStorage},
//!     product::Product,
//!     runtime::handle::{RuntimeConfig, spawn_cartstore},
//!     stock::{StockLevel, StockResult, StockService},
//!     types::ProductId,
//! };
//!
//! struct CatalogFixture;
//!
//! #[async_trait::async_trait]
//! impl StockService for CatalogFixture {
//!     async fn stock(&self, _id: ProductId) -> StockResult<StockLevel> {
//!         Ok(StockLevel { amount: 3 })
//!     }
//!
//!     async fn product(&self, id: ProductId) -> StockResult<Product> {
//!         Ok(Product {
//!             id,
//!             title: "Sneaker".to_string(),
//!             price_cents: 17_999,
//!             image_url: String::new(),
//!         })
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let storage = SqliteStorage::open("cart.db").expect("open sqlite");
//! let cart = load_cart(&storage).expect("load cart");
//! let handle = spawn_cartstore(
//!     cart,
//!     Box::new(storage),
//!     Box::new(CatalogFixture),
//!     RuntimeConfig::default(),
//! );
//! handle.add_product(5).await.expect("add");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Core in-memory cart and index helpers.
pub mod core;
/// Persistence abstraction, blob codec, and SQLite implementation.
pub mod persist;
/// Product metadata and cart line-item records.
pub mod product;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Remote stock lookup abstraction.
pub mod stock;
/// Shared primitive types.
pub mod types;
