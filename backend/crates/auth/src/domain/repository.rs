//! Repository Traits
//!
//! Query contract for the account store. Uniqueness of emails and of live
//! tokens is the store's job; the subsystem only relies on it.

use chrono::{DateTime, Utc};

use crate::domain::entity::{Account, NewAccount};
use crate::domain::value_object::AccountId;
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account and return it with its assigned id
    async fn create(&self, account: &NewAccount) -> AuthResult<Account>;

    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>>;

    /// Exact match on the canonical (lower-cased) email
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>>;

    /// Exact match on the token string, regardless of expiry
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<Account>>;

    /// Persist every mutable column of an existing account
    ///
    /// When the account carries a token that another account also holds,
    /// the other holder gives it up if its copy is expired at `now`. A live
    /// copy is never overwritten: the call fails with `TokenCollision`.
    async fn save(&self, account: &Account, now: DateTime<Utc>) -> AuthResult<()>;

    /// Returns whether a row was deleted
    async fn delete(&self, account_id: AccountId) -> AuthResult<bool>;
}
