//! Request Authenticator
//!
//! Resolves the credentials carried by one request into a [`Principal`].
//! Basic and Bearer are separate entry points and never fall back to each
//! other. Holds no per-request state.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::account_directory::AccountDirectory;
use crate::application::password_verifier::PasswordVerifier;
use crate::application::token_manager::{IssuedToken, TokenManager};
use crate::domain::entity::{Account, Principal};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Token handed to a client after login
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for TokenGrant {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at,
        }
    }
}

pub struct RequestAuthenticator<R>
where
    R: AccountRepository,
{
    directory: AccountDirectory<R>,
    tokens: TokenManager<R>,
    verifier: PasswordVerifier,
}

impl<R> RequestAuthenticator<R>
where
    R: AccountRepository,
{
    pub fn new(
        directory: AccountDirectory<R>,
        tokens: TokenManager<R>,
        verifier: PasswordVerifier,
    ) -> Self {
        Self {
            directory,
            tokens,
            verifier,
        }
    }

    pub fn directory(&self) -> &AccountDirectory<R> {
        &self.directory
    }

    pub fn tokens(&self) -> &TokenManager<R> {
        &self.tokens
    }

    pub fn verifier(&self) -> &PasswordVerifier {
        &self.verifier
    }

    /// Basic scheme: identifier lookup, then secret verification
    ///
    /// Unknown identifier and wrong secret are indistinguishable to the
    /// caller.
    pub async fn authenticate_basic(&self, identifier: &str, secret: &str) -> AuthResult<Principal> {
        Ok(Principal::from(&self.basic_account(identifier, secret).await?))
    }

    /// Basic scheme returning the full account row (login response)
    pub async fn basic_account(&self, identifier: &str, secret: &str) -> AuthResult<Account> {
        let Some(account) = self.directory.find_by_identifier(identifier).await? else {
            tracing::info!("Basic authentication failed: unknown identifier");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verifier.verify(secret, &account.password_hash) {
            tracing::info!(account_id = %account.account_id, "Basic authentication failed: wrong secret");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Bearer scheme: the token must be present and live
    pub async fn authenticate_token(&self, token: &str) -> AuthResult<Principal> {
        match self.tokens.validate(token).await? {
            Some(account) => Ok(Principal::from(&account)),
            None => {
                tracing::debug!("Bearer authentication failed");
                Err(AuthError::InvalidToken)
            }
        }
    }

    pub async fn issue_token(&self, principal: &Principal) -> AuthResult<TokenGrant> {
        Ok(self.tokens.issue(principal.account_id).await?.into())
    }

    pub async fn revoke_token(&self, principal: &Principal) -> AuthResult<()> {
        self.tokens.revoke(principal.account_id).await
    }
}
