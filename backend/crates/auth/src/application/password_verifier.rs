//! Password Verifier
//!
//! Salted hashing and constant-time verification of account secrets.

use platform::password::ClearTextPassword;

use crate::domain::value_object::{RawPassword, UserPassword};
use crate::error::AuthResult;

#[derive(Clone, Default)]
pub struct PasswordVerifier {
    pepper: Option<Vec<u8>>,
}

impl PasswordVerifier {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self { pepper }
    }

    /// Hash a policy-checked secret; two calls yield different hashes
    pub fn hash(&self, secret: &RawPassword) -> AuthResult<UserPassword> {
        let hashed = secret.inner().hash(self.pepper.as_deref())?;
        Ok(UserPassword::from_hashed(hashed))
    }

    /// True iff `secret` matches `hash`; false for malformed hashes
    pub fn verify(&self, secret: &str, hash: &UserPassword) -> bool {
        let candidate = ClearTextPassword::normalized(secret.to_string());
        hash.hashed().verify(&candidate, self.pepper.as_deref())
    }
}

impl std::fmt::Debug for PasswordVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordVerifier")
            .field("pepper", &self.pepper.as_ref().map(|_| "[SET]"))
            .finish()
    }
}
