//! Book Catalog
//!
//! Reading is open to everyone. Bulk creation is reserved for the single
//! configured superuser.

use std::sync::Arc;

use auth::{AuthorizationPolicy, Principal};
use kernel::id::BookId;

use crate::domain::entities::{Book, NewBook};
use crate::domain::repository::BookRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct BookCatalog<B>
where
    B: BookRepository,
{
    repo: Arc<B>,
    policy: Arc<dyn AuthorizationPolicy>,
}

impl<B> BookCatalog<B>
where
    B: BookRepository,
{
    pub fn new(repo: Arc<B>, policy: Arc<dyn AuthorizationPolicy>) -> Self {
        Self { repo, policy }
    }

    pub async fn list(&self) -> CatalogResult<Vec<Book>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: BookId) -> CatalogResult<Book> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::BookNotFound)
    }

    pub async fn create_many(
        &self,
        principal: &Principal,
        books: Vec<NewBook>,
    ) -> CatalogResult<Vec<Book>> {
        if !self.policy.is_hardcoded_superuser(principal) {
            tracing::warn!(account_id = %principal.account_id, "Book creation denied");
            return Err(CatalogError::Forbidden);
        }

        let created = self.repo.create_many(&books).await?;

        tracing::info!(
            account_id = %principal.account_id,
            count = created.len(),
            "Books created"
        );

        Ok(created)
    }
}
