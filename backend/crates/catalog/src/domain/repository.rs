//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use kernel::id::{BookId, QuestionId};

use crate::domain::entities::{Book, NewBook, NewQuestion, Question};
use crate::error::CatalogResult;

/// Book repository trait
#[trait_variant::make(BookRepository: Send)]
pub trait LocalBookRepository {
    async fn list(&self) -> CatalogResult<Vec<Book>>;

    async fn find_by_id(&self, id: BookId) -> CatalogResult<Option<Book>>;

    /// Insert all books or none
    async fn create_many(&self, books: &[NewBook]) -> CatalogResult<Vec<Book>>;
}

/// Question repository trait
#[trait_variant::make(QuestionRepository: Send)]
pub trait LocalQuestionRepository {
    async fn list(&self) -> CatalogResult<Vec<Question>>;

    async fn find_by_id(&self, id: QuestionId) -> CatalogResult<Option<Question>>;

    async fn create(&self, question: &NewQuestion) -> CatalogResult<Question>;

    /// Persist question text and answer; the author tag is immutable
    async fn save(&self, question: &Question) -> CatalogResult<()>;

    async fn delete(&self, id: QuestionId) -> CatalogResult<bool>;
}
