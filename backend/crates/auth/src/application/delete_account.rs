//! Delete Account Use Case

use std::sync::Arc;

use crate::domain::repository::AccountRepository;
use crate::domain::value_object::AccountId;
use crate::error::{AuthError, AuthResult};

pub struct DeleteAccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Remove the account row, token included
    pub async fn execute(&self, account_id: AccountId) -> AuthResult<()> {
        if !self.repo.delete(account_id).await? {
            return Err(AuthError::AccountNotFound);
        }

        tracing::info!(account_id = %account_id, "Account deleted");
        Ok(())
    }
}
