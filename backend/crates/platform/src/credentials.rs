//! Request Credential Extraction
//!
//! Parses the `Authorization` header into one of the two supported schemes.
//! The schemes are parsed independently: a request carrying a Bearer token is
//! never re-interpreted as Basic credentials, and vice versa.

use axum::http::{HeaderMap, header};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::from_base64;

/// Decoded HTTP Basic credentials
///
/// The secret is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BasicCredentials {
    pub identifier: String,
    pub secret: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Error when extracting credentials
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Unsupported authorization scheme")]
    WrongScheme,

    #[error("Malformed credentials")]
    Malformed,
}

fn authorization(headers: &HeaderMap) -> Result<&str, CredentialsError> {
    headers
        .get(header::AUTHORIZATION)
        .ok_or(CredentialsError::Missing)?
        .to_str()
        .map(str::trim)
        .map_err(|_| CredentialsError::Malformed)
}

/// Split `"<Scheme> <value>"`, matching the scheme case-insensitively
fn strip_scheme<'a>(value: &'a str, scheme: &str) -> Option<&'a str> {
    let (given, rest) = value.split_once(' ')?;
    given.eq_ignore_ascii_case(scheme).then(|| rest.trim())
}

/// Extract `Authorization: Basic base64(identifier:secret)`
pub fn extract_basic(headers: &HeaderMap) -> Result<BasicCredentials, CredentialsError> {
    let value = authorization(headers)?;
    let encoded = strip_scheme(value, "Basic").ok_or(CredentialsError::WrongScheme)?;

    let decoded = from_base64(encoded).map_err(|_| CredentialsError::Malformed)?;
    let decoded = String::from_utf8(decoded).map_err(|_| CredentialsError::Malformed)?;

    // The secret may itself contain ':'; only the first one separates.
    let (identifier, secret) = decoded
        .split_once(':')
        .ok_or(CredentialsError::Malformed)?;

    if identifier.is_empty() {
        return Err(CredentialsError::Malformed);
    }

    Ok(BasicCredentials {
        identifier: identifier.to_string(),
        secret: secret.to_string(),
    })
}

/// Extract `Authorization: Bearer <token>`
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, CredentialsError> {
    let value = authorization(headers)?;
    let token = strip_scheme(value, "Bearer").ok_or(CredentialsError::WrongScheme)?;

    if token.is_empty() {
        return Err(CredentialsError::Malformed);
    }

    Ok(token.to_string())
}
