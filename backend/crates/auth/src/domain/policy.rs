//! Authorization Policy
//!
//! Explicit predicates composed at each call site. Several predicates
//! overlap on purpose:
//! - `require_admin` reads the admin flag (question mutations)
//! - `is_hardcoded_superuser` matches one configured email (book creation)
//! - `owns_resource` decodes the id suffix of an ownership tag (question update)
//! - `is_author_by_identifier` compares a whole author string to the caller's
//!   email (question delete)
//!
//! The last two look at different encodings of authorship and are kept
//! separate rather than unified.

use crate::domain::entity::Principal;
use crate::domain::value_object::{Email, OwnershipTag};

pub trait AuthorizationPolicy: Send + Sync {
    /// Flag-based admin check
    fn require_admin(&self, principal: &Principal) -> bool;

    /// Exact, case-insensitive match against the single superuser email
    fn is_hardcoded_superuser(&self, principal: &Principal) -> bool;

    /// Trailing 4-digit id of `tag` equals the caller's id
    ///
    /// Fails closed: a malformed tag yields `false`.
    fn owns_resource(&self, principal: &Principal, tag: &OwnershipTag) -> bool;

    /// Whole author string equals the caller's email
    fn is_author_by_identifier(&self, principal: &Principal, author: &str) -> bool;
}

/// Default policy backed by configuration
#[derive(Debug, Clone)]
pub struct RolePolicy {
    superuser_email: String,
}

impl RolePolicy {
    pub fn new(superuser_email: impl AsRef<str>) -> Self {
        Self {
            superuser_email: Email::canonicalize(superuser_email.as_ref()),
        }
    }
}

impl AuthorizationPolicy for RolePolicy {
    fn require_admin(&self, principal: &Principal) -> bool {
        principal.is_admin
    }

    fn is_hardcoded_superuser(&self, principal: &Principal) -> bool {
        !self.superuser_email.is_empty() && principal.email.matches(&self.superuser_email)
    }

    fn owns_resource(&self, principal: &Principal, tag: &OwnershipTag) -> bool {
        match tag.account_id() {
            Ok(owner) => owner == principal.account_id,
            Err(e) => {
                tracing::debug!(error = %e, "Ownership tag did not decode");
                false
            }
        }
    }

    fn is_author_by_identifier(&self, principal: &Principal, author: &str) -> bool {
        principal.email.as_str() == author
    }
}
