//! Authentication
//!
//! Capability-token admin auth: argon2-verified credential, HS256 JWT with
//! explicit expiry, middleware validation on every privileged route.

pub mod credential;
pub mod jwt;
pub mod middleware;

pub use credential::AdminCredential;
pub use jwt::{Claims, CurrentAdmin, JwtConfig, JwtError, JwtService};
