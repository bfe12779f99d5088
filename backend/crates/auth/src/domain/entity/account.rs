//! Account Entity
//!
//! An account holds the login identifier, the secret hash and the single
//! session-token slot. Expired tokens are kept in the slot until a new
//! issue overwrites them.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{AccountId, Email, SessionToken, UserPassword};

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Store-assigned key
    pub account_id: AccountId,
    /// Login identifier (unique, lower-cased)
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: UserPassword,
    /// Last issued token, live or not
    pub token: Option<SessionToken>,
    pub token_expires_at: Option<DateTime<Utc>>,
    /// Fixed at registration from the admin allow-list
    pub is_admin: bool,
    pub created_on: DateTime<Utc>,
    pub modified_on: Option<DateTime<Utc>>,
}

/// Registration draft; the store assigns the id on insert
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: UserPassword,
    pub is_admin: bool,
    pub created_on: DateTime<Utc>,
}

/// Profile update: every field optional, `None` leaves the value unchanged
///
/// `is_admin` and the token slot are intentionally absent.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub email: Option<Email>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<UserPassword>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.password_hash.is_none()
    }
}

impl NewAccount {
    /// Materialize with the key the store assigned
    pub fn into_account(self, account_id: AccountId) -> Account {
        Account {
            account_id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash: self.password_hash,
            token: None,
            token_expires_at: None,
            is_admin: self.is_admin,
            created_on: self.created_on,
            modified_on: None,
        }
    }
}

impl Account {
    /// Token that still authenticates at `now`
    ///
    /// Live means `expires_at > now`; a token expiring exactly now is dead.
    pub fn live_token(&self, now: DateTime<Utc>) -> Option<&SessionToken> {
        match (&self.token, self.token_expires_at) {
            (Some(token), Some(expires_at)) if expires_at > now => Some(token),
            _ => None,
        }
    }

    pub fn has_live_token(&self, now: DateTime<Utc>) -> bool {
        self.live_token(now).is_some()
    }

    /// Remaining lifetime of the live token, if any
    pub fn token_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.live_token(now)?;
        self.token_expires_at.map(|expires_at| expires_at - now)
    }

    /// Store a new token (last write wins)
    pub fn set_token(&mut self, token: SessionToken, expires_at: DateTime<Utc>) {
        self.token = Some(token);
        self.token_expires_at = Some(expires_at);
    }

    /// Push expiry into the past without clearing the token string
    pub fn backdate_token(&mut self, now: DateTime<Utc>, by: Duration) {
        self.token_expires_at = Some(now - by);
    }

    /// Apply a profile patch, returning the updated account
    pub fn apply(self, patch: AccountPatch, now: DateTime<Utc>) -> Account {
        if patch.is_empty() {
            return self;
        }
        Account {
            email: patch.email.unwrap_or(self.email),
            first_name: patch.first_name.unwrap_or(self.first_name),
            last_name: patch.last_name.unwrap_or(self.last_name),
            password_hash: patch.password_hash.unwrap_or(self.password_hash),
            modified_on: Some(now),
            ..self
        }
    }
}
