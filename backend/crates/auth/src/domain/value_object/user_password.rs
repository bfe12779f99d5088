//! User Password Value Objects
//!
//! Domain wrappers around `platform::password`.

use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Secret supplied at registration or profile update (policy-checked)
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored one-way hash of an account secret
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_hashed(hashed: HashedPassword) -> Self {
        Self(hashed)
    }

    /// Load from the database without parsing
    ///
    /// Rows with an unparseable hash stay loadable; they just never verify.
    pub fn from_db(phc: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(phc))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_phc_string()
    }

    pub(crate) fn hashed(&self) -> &HashedPassword {
        &self.0
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}
