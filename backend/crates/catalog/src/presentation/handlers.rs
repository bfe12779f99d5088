//! HTTP Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use auth::Principal;
use kernel::id::{BookId, QuestionId};
use std::sync::Arc;

use crate::application::{BookCatalog, QuestionBoard};
use crate::domain::repository::{BookRepository, QuestionRepository};
use crate::error::CatalogResult;
use crate::presentation::dto::{
    BookResponse, BooksResponse, NewBookRequest, NewQuestionRequest, QuestionResponse,
    QuestionsResponse, UpdateQuestionRequest,
};

const SUCCESS: &str = "success";

/// Shared state for book handlers
pub struct BookAppState<B>
where
    B: BookRepository + Send + Sync + 'static,
{
    pub catalog: Arc<BookCatalog<B>>,
}

impl<B> Clone for BookAppState<B>
where
    B: BookRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
        }
    }
}

/// Shared state for question handlers
pub struct QuestionAppState<Q>
where
    Q: QuestionRepository + Send + Sync + 'static,
{
    pub board: Arc<QuestionBoard<Q>>,
}

impl<Q> Clone for QuestionAppState<Q>
where
    Q: QuestionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            board: self.board.clone(),
        }
    }
}

// ============================================================================
// Books
// ============================================================================

/// GET /book
pub async fn list_books<B>(State(state): State<BookAppState<B>>) -> CatalogResult<Json<BooksResponse>>
where
    B: BookRepository + Send + Sync + 'static,
{
    let books = state.catalog.list().await?;
    Ok(Json(BooksResponse {
        books: books.into_iter().map(Into::into).collect(),
    }))
}

/// GET /book/{id}
pub async fn get_book<B>(
    State(state): State<BookAppState<B>>,
    Path(id): Path<i64>,
) -> CatalogResult<Json<BookResponse>>
where
    B: BookRepository + Send + Sync + 'static,
{
    let book = state.catalog.get(BookId::new(id)).await?;
    Ok(Json(book.into()))
}

/// POST /book (Bearer, superuser only)
pub async fn create_books<B>(
    State(state): State<BookAppState<B>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<Vec<NewBookRequest>>,
) -> CatalogResult<impl IntoResponse>
where
    B: BookRepository + Send + Sync + 'static,
{
    let drafts = req.into_iter().map(Into::into).collect();
    state.catalog.create_many(&principal, drafts).await?;
    Ok((StatusCode::OK, SUCCESS))
}

// ============================================================================
// Questions
// ============================================================================

/// GET /question
pub async fn list_questions<Q>(
    State(state): State<QuestionAppState<Q>>,
) -> CatalogResult<Json<QuestionsResponse>>
where
    Q: QuestionRepository + Send + Sync + 'static,
{
    let questions = state.board.list().await?;
    Ok(Json(QuestionsResponse {
        questions: questions.into_iter().map(Into::into).collect(),
    }))
}

/// POST /question (Bearer, admin)
pub async fn create_question<Q>(
    State(state): State<QuestionAppState<Q>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<NewQuestionRequest>,
) -> CatalogResult<Json<QuestionResponse>>
where
    Q: QuestionRepository + Send + Sync + 'static,
{
    let question = state.board.ask(&principal, req.question, req.answer).await?;
    Ok(Json(question.into()))
}

/// PUT /question/{id} (Bearer, admin and owner)
pub async fn update_question<Q>(
    State(state): State<QuestionAppState<Q>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateQuestionRequest>,
) -> CatalogResult<Json<QuestionResponse>>
where
    Q: QuestionRepository + Send + Sync + 'static,
{
    let question = state
        .board
        .update(&principal, QuestionId::new(id), req.into())
        .await?;
    Ok(Json(question.into()))
}

/// DELETE /question/{id} (Bearer, admin and author)
pub async fn delete_question<Q>(
    State(state): State<QuestionAppState<Q>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> CatalogResult<impl IntoResponse>
where
    Q: QuestionRepository + Send + Sync + 'static,
{
    state.board.delete(&principal, QuestionId::new(id)).await?;
    Ok((StatusCode::OK, SUCCESS))
}
