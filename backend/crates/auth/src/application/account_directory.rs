//! Account Directory
//!
//! Read-side lookups over the account store. Identifiers are matched
//! case-insensitively; store failures propagate rather than reading as
//! "no such account".

use std::sync::Arc;

use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{AccountId, Email};
use crate::error::AuthResult;

pub struct AccountDirectory<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> AccountDirectory<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Option<Account>> {
        let canonical = Email::canonicalize(identifier);
        if canonical.is_empty() {
            return Ok(None);
        }
        self.repo.find_by_email(&canonical).await
    }

    /// Exact token match; expiry is not checked here
    pub async fn find_by_token(&self, token: &str) -> AuthResult<Option<Account>> {
        if token.is_empty() {
            return Ok(None);
        }
        self.repo.find_by_token(token).await
    }

    pub async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>> {
        self.repo.find_by_id(account_id).await
    }
}
