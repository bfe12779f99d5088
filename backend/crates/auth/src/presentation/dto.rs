//! API DTOs (Data Transfer Objects)
//!
//! Keys are snake_case to match the existing client contract.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{RegisterInput, UpdateAccountInput};
use crate::domain::entity::Account;

// ============================================================================
// Register
// ============================================================================

/// POST /user body
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
        }
    }
}

// ============================================================================
// Update
// ============================================================================

/// PUT /user body; omitted keys stay unchanged
#[derive(Clone, Default, Deserialize)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for UpdateAccountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateAccountRequest")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl From<UpdateAccountRequest> for UpdateAccountInput {
    fn from(req: UpdateAccountRequest) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
        }
    }
}

// ============================================================================
// Account
// ============================================================================

/// Account view returned by GET /login
///
/// Carries the caller's own token; the secret hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
    pub is_admin: bool,
    pub created_on: DateTime<Utc>,
    pub modified_on: Option<DateTime<Utc>>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            user_id: account.account_id.value(),
            email: account.email.as_str().to_string(),
            first_name: account.first_name,
            last_name: account.last_name,
            token: account.token.map(|t| t.into_inner()),
            token_expires_at: account.token_expires_at,
            is_admin: account.is_admin,
            created_on: account.created_on,
            modified_on: account.modified_on,
        }
    }
}
