//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait, authorization policy
//! - `application/` - Token manager, request authenticator and use cases
//! - `infra/` - PostgreSQL and in-memory account stores
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Account registration with an admin allow-list
//! - HTTP Basic login issuing an opaque bearer token (one per account)
//! - Token reuse while fresh, lazy expiry, revocation by backdating
//! - Authorization predicates for admin, superuser and ownership checks
//!
//! ## Security Model
//! - Secrets hashed with Argon2id, verified in constant time
//! - Tokens are 32 random bytes; only fingerprints are logged
//! - Basic and Bearer authentication never fall back to each other

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::entity::Principal;
pub use domain::policy::{AuthorizationPolicy, RolePolicy};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAccountRepository, PgAccountRepository};
pub use presentation::handlers::AuthAppState;
pub use presentation::router::account_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
