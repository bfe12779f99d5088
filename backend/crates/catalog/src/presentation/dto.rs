//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Book, NewBook, Question, QuestionPatch};

// ============================================================================
// Books
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<i32>,
    pub summary: Option<String>,
    pub subject: Option<String>,
    pub img: Option<String>,
    pub created_on: DateTime<Utc>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.value(),
            title: book.title,
            author: book.author,
            pages: book.pages,
            summary: book.summary,
            subject: book.subject,
            img: book.img,
            created_on: book.created_on,
        }
    }
}

/// GET /book
#[derive(Debug, Clone, Serialize)]
pub struct BooksResponse {
    pub books: Vec<BookResponse>,
}

/// One element of the POST /book array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<i32>,
    pub summary: Option<String>,
    pub subject: Option<String>,
    pub img: Option<String>,
}

impl From<NewBookRequest> for NewBook {
    fn from(req: NewBookRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            pages: req.pages,
            summary: req.summary,
            subject: req.subject,
            img: req.img,
        }
    }
}

// ============================================================================
// Questions
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub author: String,
    pub created_on: DateTime<Utc>,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id.value(),
            question: q.question,
            answer: q.answer,
            author: q.author.as_str().to_string(),
            created_on: q.created_on,
        }
    }
}

/// GET /question
#[derive(Debug, Clone, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionResponse>,
}

/// POST /question body; the author is never taken from the client
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestionRequest {
    pub question: String,
    pub answer: String,
}

/// PUT /question/{id} body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
}

impl From<UpdateQuestionRequest> for QuestionPatch {
    fn from(req: UpdateQuestionRequest) -> Self {
        Self {
            question: req.question,
            answer: req.answer,
        }
    }
}
