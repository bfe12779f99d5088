//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the
//! authorization policy.

pub mod entity;
pub mod policy;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Account, AccountPatch, NewAccount, Principal};
pub use policy::{AuthorizationPolicy, RolePolicy};
pub use repository::AccountRepository;
