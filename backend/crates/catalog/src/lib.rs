//! Catalog Backend Module
//!
//! Books and the Q&A board, gated by the `auth` crate.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, patch drafts, repository traits
//! - `application/` - Book catalog and question board services
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Access Rules
//! - Listing books and questions is public
//! - Bulk book creation: the configured superuser only
//! - Question create: admins
//! - Question update: admins whose id is encoded in the question's tag
//! - Question delete: admins whose email equals the stored author string

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{BookCatalog, QuestionBoard};
pub use error::{CatalogError, CatalogResult};
pub use infra::{InMemoryCatalogRepository, PgCatalogRepository};
pub use presentation::{BookAppState, QuestionAppState, book_router, question_router};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
