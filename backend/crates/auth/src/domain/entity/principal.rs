//! Principal
//!
//! The authenticated account attached to a request. Carries no secret hash
//! and no token.

use serde::Serialize;

use crate::domain::entity::account::Account;
use crate::domain::value_object::{AccountId, Email};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub account_id: AccountId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

impl From<&Account> for Principal {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.account_id,
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            is_admin: account.is_admin,
        }
    }
}
