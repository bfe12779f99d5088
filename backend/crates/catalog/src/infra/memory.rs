//! In-Memory Catalog Store
//!
//! Books and questions kept in process, for tests and database-less
//! development.

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::{BookId, QuestionId};
use platform::clock::Clock;
use tokio::sync::RwLock;

use crate::domain::entities::{Book, NewBook, NewQuestion, Question};
use crate::domain::repository::{BookRepository, QuestionRepository};
use crate::error::{CatalogError, CatalogResult};

#[derive(Default)]
struct State {
    books: BTreeMap<BookId, Book>,
    questions: BTreeMap<QuestionId, Question>,
    last_book_id: i64,
    last_question_id: i64,
}

#[derive(Clone)]
pub struct InMemoryCatalogRepository {
    state: Arc<RwLock<State>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCatalogRepository {
    /// `clock` stamps `created_on` for new books
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            clock,
        }
    }
}

impl BookRepository for InMemoryCatalogRepository {
    async fn list(&self) -> CatalogResult<Vec<Book>> {
        Ok(self.state.read().await.books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> CatalogResult<Option<Book>> {
        Ok(self.state.read().await.books.get(&id).cloned())
    }

    async fn create_many(&self, books: &[NewBook]) -> CatalogResult<Vec<Book>> {
        let now = self.clock.now();
        let mut state = self.state.write().await;
        let mut created = Vec::with_capacity(books.len());

        for draft in books {
            state.last_book_id += 1;
            let book = draft.clone().into_book(BookId::new(state.last_book_id), now);
            state.books.insert(book.id, book.clone());
            created.push(book);
        }

        Ok(created)
    }
}

impl QuestionRepository for InMemoryCatalogRepository {
    async fn list(&self) -> CatalogResult<Vec<Question>> {
        Ok(self.state.read().await.questions.values().cloned().collect())
    }

    async fn find_by_id(&self, id: QuestionId) -> CatalogResult<Option<Question>> {
        Ok(self.state.read().await.questions.get(&id).cloned())
    }

    async fn create(&self, question: &NewQuestion) -> CatalogResult<Question> {
        let mut state = self.state.write().await;
        state.last_question_id += 1;
        let created = question
            .clone()
            .into_question(QuestionId::new(state.last_question_id));
        state.questions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn save(&self, question: &Question) -> CatalogResult<()> {
        let mut state = self.state.write().await;
        let stored = state
            .questions
            .get_mut(&question.id)
            .ok_or(CatalogError::QuestionNotFound)?;

        stored.question = question.question.clone();
        stored.answer = question.answer.clone();
        Ok(())
    }

    async fn delete(&self, id: QuestionId) -> CatalogResult<bool> {
        Ok(self.state.write().await.questions.remove(&id).is_some())
    }
}
