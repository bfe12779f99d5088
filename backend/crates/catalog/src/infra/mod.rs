//! Infrastructure Layer
//!
//! Database implementations of the book and question stores.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCatalogRepository;
pub use postgres::PgCatalogRepository;
