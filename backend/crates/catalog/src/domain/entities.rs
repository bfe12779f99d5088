//! Domain Entities

use auth::models::OwnershipTag;
use chrono::{DateTime, Utc};
use kernel::id::{BookId, QuestionId};

/// Book entity; every content field is optional
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<i32>,
    pub summary: Option<String>,
    pub subject: Option<String>,
    pub img: Option<String>,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<i32>,
    pub summary: Option<String>,
    pub subject: Option<String>,
    pub img: Option<String>,
}

impl NewBook {
    pub fn into_book(self, id: BookId, created_on: DateTime<Utc>) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            pages: self.pages,
            summary: self.summary,
            subject: self.subject,
            img: self.img,
            created_on,
        }
    }
}

/// Question entity
///
/// `author` is the ownership tag computed when the question was asked and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub author: OwnershipTag,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub author: OwnershipTag,
    pub created_on: DateTime<Utc>,
}

impl NewQuestion {
    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            author: self.author,
            created_on: self.created_on,
        }
    }
}

/// Question update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
}

impl Question {
    /// Apply a patch, returning the updated question
    pub fn apply(self, patch: QuestionPatch) -> Question {
        Question {
            question: patch.question.unwrap_or(self.question),
            answer: patch.answer.unwrap_or(self.answer),
            ..self
        }
    }
}
