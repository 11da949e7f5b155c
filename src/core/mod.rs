//! In-memory authoritative cart and index helpers.

/// Authoritative cart collection.
pub mod cart;
/// Helper index aliases.
pub mod indices;
