//! Register Use Case
//!
//! Creates a new account. The admin flag is decided here, once, from the
//! configured allow-list.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::application::password_verifier::PasswordVerifier;
use crate::domain::entity::{Account, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{Email, RawPassword};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub struct RegisterUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    verifier: PasswordVerifier,
    clock: Arc<dyn Clock>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(
        repo: Arc<R>,
        verifier: PasswordVerifier,
        clock: Arc<dyn Clock>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            verifier,
            clock,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<Account> {
        let email = Email::new(&input.email)?;

        if self.repo.find_by_email(email.as_str()).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = self.verifier.hash(&raw_password)?;

        let is_admin = self.config.is_admin_email(&email);

        // The store's unique index still catches a concurrent duplicate
        let account = self
            .repo
            .create(&NewAccount {
                email,
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
                password_hash,
                is_admin,
                created_on: self.clock.now(),
            })
            .await?;

        tracing::info!(
            account_id = %account.account_id,
            is_admin,
            "Account registered"
        );

        Ok(account)
    }
}
