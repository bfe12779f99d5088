//! In-Memory Account Store
//!
//! Process-local implementation of the repository contract, for tests and
//! database-less development.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::{Account, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::AccountId;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    accounts: BTreeMap<AccountId, Account>,
    last_id: i64,
}

#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.state.read().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: &NewAccount) -> AuthResult<Account> {
        let mut state = self.state.write().await;

        if state.accounts.values().any(|a| a.email == account.email) {
            return Err(AuthError::EmailTaken);
        }

        state.last_id += 1;
        let account_id = AccountId::new(state.last_id);
        let created = account.clone().into_account(account_id);
        state.accounts.insert(account_id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>> {
        Ok(self.state.read().await.accounts.get(&account_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>> {
        Ok(self
            .state
            .read()
            .await
            .accounts
            .values()
            .find(|a| a.email.as_str() == email)
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<Account>> {
        Ok(self
            .state
            .read()
            .await
            .accounts
            .values()
            .find(|a| a.token.as_ref().is_some_and(|t| t.as_str() == token))
            .cloned())
    }

    async fn save(&self, account: &Account, now: DateTime<Utc>) -> AuthResult<()> {
        let mut state = self.state.write().await;

        if !state.accounts.contains_key(&account.account_id) {
            return Err(AuthError::AccountNotFound);
        }

        if state
            .accounts
            .values()
            .any(|a| a.account_id != account.account_id && a.email == account.email)
        {
            return Err(AuthError::EmailTaken);
        }

        if let Some(token) = &account.token {
            let held_elsewhere =
                |a: &Account| a.account_id != account.account_id && a.token.as_ref() == Some(token);

            if state
                .accounts
                .values()
                .any(|a| held_elsewhere(a) && a.has_live_token(now))
            {
                return Err(AuthError::TokenCollision);
            }

            for other in state.accounts.values_mut().filter(|a| held_elsewhere(&**a)) {
                other.token = None;
                other.token_expires_at = None;
            }
        }

        state.accounts.insert(account.account_id, account.clone());
        Ok(())
    }

    async fn delete(&self, account_id: AccountId) -> AuthResult<bool> {
        Ok(self.state.write().await.accounts.remove(&account_id).is_some())
    }
}
