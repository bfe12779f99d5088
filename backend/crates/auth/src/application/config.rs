//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::collections::HashSet;
use std::time::Duration;

use crate::domain::value_object::Email;

/// Superuser allowed to bulk-create books unless overridden
pub const DEFAULT_SUPERUSER_EMAIL: &str = "kevinb@codingtemple.com";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of a freshly issued token (24 hours)
    pub token_ttl: Duration,
    /// A live token with more than this left is handed out again on login
    pub token_min_freshness: Duration,
    /// How far into the past a revoked token's expiry is pushed
    pub revoke_backdate: Duration,
    /// Fresh tokens to try when one collides with another live token
    pub token_issue_attempts: u32,
    /// Emails that register as admins (lower-cased)
    pub admin_emails: HashSet<String>,
    /// The single superuser email
    pub superuser_email: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(24 * 3600),
            token_min_freshness: Duration::from_secs(60),
            revoke_backdate: Duration::from_secs(61),
            token_issue_attempts: 5,
            admin_emails: HashSet::new(),
            superuser_email: DEFAULT_SUPERUSER_EMAIL.to_string(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Local development: the superuser is also an admin
    pub fn development() -> Self {
        let config = Self::default();
        let superuser = config.superuser_email.clone();
        config.with_admin_emails([superuser])
    }

    /// Replace the admin allow-list; entries are canonicalized
    pub fn with_admin_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.admin_emails = emails
            .into_iter()
            .map(|e| Email::canonicalize(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    pub fn with_superuser_email(mut self, email: impl AsRef<str>) -> Self {
        self.superuser_email = Email::canonicalize(email.as_ref());
        self
    }

    pub fn is_admin_email(&self, email: &Email) -> bool {
        self.admin_emails.contains(email.as_str())
    }

    pub fn token_min_freshness_chrono(&self) -> chrono::Duration {
        to_chrono(self.token_min_freshness)
    }

    pub fn revoke_backdate_chrono(&self) -> chrono::Duration {
        to_chrono(self.revoke_backdate)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

/// Saturates instead of failing on absurd durations
pub(crate) fn to_chrono(d: Duration) -> chrono::Duration {
    chrono::Duration::from_std(d).unwrap_or(chrono::Duration::MAX)
}
