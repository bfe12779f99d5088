//! Domain Layer
//!
//! This layer contains:
//! - Entities (Book, Question) and their creation/patch drafts
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;

pub use entities::{Book, NewBook, NewQuestion, Question, QuestionPatch};
pub use repository::{BookRepository, QuestionRepository};
