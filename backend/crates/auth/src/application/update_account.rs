//! Update Account Use Case
//!
//! Applies a profile patch to the calling account. The admin flag and the
//! token slot are out of reach of this path.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::password_verifier::PasswordVerifier;
use crate::domain::entity::{Account, AccountPatch};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{AccountId, Email, RawPassword};
use crate::error::{AuthError, AuthResult};

/// Raw profile fields from the client; `None` keeps the stored value
#[derive(Default)]
pub struct UpdateAccountInput {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for UpdateAccountInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateAccountInput")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

pub struct UpdateAccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    verifier: PasswordVerifier,
    clock: Arc<dyn Clock>,
}

impl<R> UpdateAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, verifier: PasswordVerifier, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            verifier,
            clock,
        }
    }

    pub async fn execute(&self, account_id: AccountId, input: UpdateAccountInput) -> AuthResult<Account> {
        let account = self
            .repo
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let patch = self.build_patch(&account, input).await?;
        let changed_password = patch.password_hash.is_some();
        let now = self.clock.now();
        let updated = account.apply(patch, now);

        self.repo.save(&updated, now).await?;

        tracing::info!(
            account_id = %account_id,
            changed_password,
            "Account updated"
        );

        Ok(updated)
    }

    async fn build_patch(&self, account: &Account, input: UpdateAccountInput) -> AuthResult<AccountPatch> {
        let email = match input.email {
            Some(raw) => {
                let email = Email::new(&raw)?;
                if email != account.email {
                    if let Some(holder) = self.repo.find_by_email(email.as_str()).await? {
                        if holder.account_id != account.account_id {
                            return Err(AuthError::EmailTaken);
                        }
                    }
                }
                Some(email)
            }
            None => None,
        };

        let password_hash = match input.password {
            Some(raw) => Some(self.verifier.hash(&RawPassword::new(raw)?)?),
            None => None,
        };

        Ok(AccountPatch {
            email,
            first_name: input.first_name.map(|s| s.trim().to_string()),
            last_name: input.last_name.map(|s| s.trim().to_string()),
            password_hash,
        })
    }
}
