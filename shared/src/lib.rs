//! Shared types for the Bakehouse storefront
//!
//! Data models, request DTOs and the API response envelope, used by the
//! server and by client-side crates (cart, admin tooling).

pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use response::{ApiResponse, Pagination};
