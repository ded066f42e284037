//! Bakehouse Cart - client-held shopping cart
//!
//! An insertion-ordered mapping from product id to a product snapshot plus
//! quantity, with a derived total. Every mutation persists the entries
//! through a pluggable [`CartStorage`] backend; the total is never stored,
//! only recomputed, so it cannot drift from the entries.
//!
//! Prices are whatever snapshot was captured when the product was added;
//! the server reprices every line from the live catalog at checkout, so the
//! cart is never an authority on price or availability.

pub mod cart;
pub mod storage;

pub use cart::{Cart, CartEntry, CartProduct};
pub use storage::{CartError, CartStorage, JsonFileStorage, MemoryStorage};
