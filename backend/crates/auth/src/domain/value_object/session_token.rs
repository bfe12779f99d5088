//! Session Token Value Object
//!
//! Opaque bearer token: 32 random bytes, URL-safe base64 without padding.

use platform::crypto::{TOKEN_BYTES, random_token, token_fingerprint};
use std::fmt;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Fresh token from the OS RNG
    pub fn generate() -> Self {
        Self(random_token(TOKEN_BYTES))
    }

    pub fn from_db(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Log-safe label
    pub fn fingerprint(&self) -> String {
        token_fingerprint(&self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken")
            .field(&self.fingerprint())
            .finish()
    }
}
