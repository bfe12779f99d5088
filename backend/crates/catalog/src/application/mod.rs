//! Application Layer
//!
//! Catalog services. Each takes the authenticated principal from the
//! presentation layer and consults the authorization policy itself.

pub mod books;
pub mod questions;

pub use books::BookCatalog;
pub use questions::QuestionBoard;
