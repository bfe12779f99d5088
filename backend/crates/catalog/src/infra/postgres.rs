//! PostgreSQL Catalog Repository

use auth::models::OwnershipTag;
use chrono::{DateTime, Utc};
use kernel::id::{BookId, QuestionId};
use sqlx::PgPool;

use crate::domain::entities::{Book, NewBook, NewQuestion, Question};
use crate::domain::repository::{BookRepository, QuestionRepository};
use crate::error::CatalogResult;

/// PostgreSQL-backed book and question repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Book Repository Implementation
// ============================================================================

impl BookRepository for PgCatalogRepository {
    async fn list(&self) -> CatalogResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, pages, summary, subject, img, created_on
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BookRow::into_book).collect())
    }

    async fn find_by_id(&self, id: BookId) -> CatalogResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, pages, summary, subject, img, created_on
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BookRow::into_book))
    }

    async fn create_many(&self, books: &[NewBook]) -> CatalogResult<Vec<Book>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(books.len());

        for book in books {
            let row = sqlx::query_as::<_, BookRow>(
                r#"
                INSERT INTO books (title, author, pages, summary, subject, img)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, title, author, pages, summary, subject, img, created_on
                "#,
            )
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.pages)
            .bind(&book.summary)
            .bind(&book.subject)
            .bind(&book.img)
            .fetch_one(&mut *tx)
            .await?;

            created.push(row.into_book());
        }

        tx.commit().await?;
        Ok(created)
    }
}

// ============================================================================
// Question Repository Implementation
// ============================================================================

impl QuestionRepository for PgCatalogRepository {
    async fn list(&self) -> CatalogResult<Vec<Question>> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            "SELECT id, question, answer, author, created_on FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(QuestionRow::into_question).collect())
    }

    async fn find_by_id(&self, id: QuestionId) -> CatalogResult<Option<Question>> {
        let row = sqlx::query_as::<_, QuestionRow>(
            "SELECT id, question, answer, author, created_on FROM questions WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(QuestionRow::into_question))
    }

    async fn create(&self, question: &NewQuestion) -> CatalogResult<Question> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            INSERT INTO questions (question, answer, author, created_on)
            VALUES ($1, $2, $3, $4)
            RETURNING id, question, answer, author, created_on
            "#,
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.author.as_str())
        .bind(question.created_on)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_question())
    }

    async fn save(&self, question: &Question) -> CatalogResult<()> {
        sqlx::query("UPDATE questions SET question = $2, answer = $3 WHERE id = $1")
            .bind(question.id.value())
            .bind(&question.question)
            .bind(&question.answer)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: QuestionId) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: Option<String>,
    author: Option<String>,
    pages: Option<i32>,
    summary: Option<String>,
    subject: Option<String>,
    img: Option<String>,
    created_on: DateTime<Utc>,
}

impl BookRow {
    fn into_book(self) -> Book {
        Book {
            id: BookId::new(self.id),
            title: self.title,
            author: self.author,
            pages: self.pages,
            summary: self.summary,
            subject: self.subject,
            img: self.img,
            created_on: self.created_on,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    question: String,
    answer: String,
    author: String,
    created_on: DateTime<Utc>,
}

impl QuestionRow {
    fn into_question(self) -> Question {
        Question {
            id: QuestionId::new(self.id),
            question: self.question,
            answer: self.answer,
            author: OwnershipTag::from_db(self.author),
            created_on: self.created_on,
        }
    }
}
