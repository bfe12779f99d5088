//! Ownership Tag Value Object
//!
//! Attributes a resource to the account that created it without a foreign
//! key: `"<display name>_<account id, zero-padded to 4 digits>"`.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::ownership_tag::OwnershipTag;
//! use kernel::id::AccountId;
//!
//! let tag = OwnershipTag::for_account("Kevin", AccountId::new(7)).unwrap();
//! assert_eq!(tag.as_str(), "Kevin_0007");
//! assert_eq!(tag.account_id().unwrap(), AccountId::new(7));
//! ```

use derive_more::Display;
use kernel::id::AccountId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of the numeric suffix
pub const ID_SUFFIX_LEN: usize = 4;

/// Largest id the suffix can carry
pub const MAX_TAGGABLE_ID: i64 = 9_999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipTagError {
    #[error("tag is shorter than its 4-digit id suffix")]
    TooShort,

    #[error("tag suffix is not a 4-digit number")]
    NonNumericSuffix,

    #[error("account id {0} does not fit a 4-digit tag")]
    IdOutOfRange(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnershipTag(String);

impl OwnershipTag {
    /// Build the tag for a new resource
    ///
    /// Ids outside `0..=9999` are refused: their padded form would be wider
    /// than the suffix and decode to a different account.
    pub fn for_account(display_name: &str, account_id: AccountId) -> Result<Self, OwnershipTagError> {
        let id = account_id.value();
        if !(0..=MAX_TAGGABLE_ID).contains(&id) {
            return Err(OwnershipTagError::IdOutOfRange(id));
        }
        Ok(Self(format!("{}_{:04}", display_name, id)))
    }

    /// Wrap a stored tag as-is; decoding happens lazily and may fail
    pub fn from_db(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the trailing id
    ///
    /// Only the last four characters are read, and all of them must be ASCII
    /// digits (no sign, no whitespace).
    pub fn account_id(&self) -> Result<AccountId, OwnershipTagError> {
        let Some((start, _)) = self.0.char_indices().nth_back(ID_SUFFIX_LEN - 1) else {
            return Err(OwnershipTagError::TooShort);
        };

        // Four ASCII digits are exactly four bytes; any multibyte char fails here
        let suffix = &self.0.as_bytes()[start..];
        if !suffix.iter().all(u8::is_ascii_digit) {
            return Err(OwnershipTagError::NonNumericSuffix);
        }

        let id = suffix
            .iter()
            .fold(0i64, |acc, b| acc * 10 + i64::from(b - b'0'));
        Ok(AccountId::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_account_pads_id() {
        let tag = OwnershipTag::for_account("Ann", AccountId::new(42)).unwrap();
        assert_eq!(tag.as_str(), "Ann_0042");
        assert_eq!(tag.to_string(), "Ann_0042");
    }

    #[test]
    fn test_for_account_rejects_wide_ids() {
        assert_eq!(
            OwnershipTag::for_account("Ann", AccountId::new(10_000)).unwrap_err(),
            OwnershipTagError::IdOutOfRange(10_000)
        );
        assert!(OwnershipTag::for_account("Ann", AccountId::new(-1)).is_err());
        assert!(OwnershipTag::for_account("Ann", AccountId::new(9_999)).is_ok());
    }

    #[test]
    fn test_decode_round_trip_for_edge_ids() {
        for id in [0, 1, 999, 9_999] {
            let tag = OwnershipTag::for_account("x", AccountId::new(id)).unwrap();
            assert_eq!(tag.account_id().unwrap().value(), id);
        }
    }

    #[test]
    fn test_decode_reads_only_suffix() {
        // Digits in the display name are irrelevant
        let tag = OwnershipTag::from_db("R2D2_0007");
        assert_eq!(tag.account_id().unwrap(), AccountId::new(7));
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(
            OwnershipTag::from_db("007").account_id().unwrap_err(),
            OwnershipTagError::TooShort
        );
        assert_eq!(
            OwnershipTag::from_db("Ann_00a7").account_id().unwrap_err(),
            OwnershipTagError::NonNumericSuffix
        );
        assert_eq!(
            OwnershipTag::from_db("Ann_+007").account_id().unwrap_err(),
            OwnershipTagError::NonNumericSuffix
        );
        assert_eq!(
            OwnershipTag::from_db("a@x.com").account_id().unwrap_err(),
            OwnershipTagError::NonNumericSuffix
        );
    }

    #[test]
    fn test_decode_multibyte_display_name() {
        let tag = OwnershipTag::from_db("José_0012");
        assert_eq!(tag.account_id().unwrap(), AccountId::new(12));

        let tag = OwnershipTag::for_account("Zoë", AccountId::new(42)).unwrap();
        assert_eq!(tag.account_id().unwrap(), AccountId::new(42));
    }

    #[test]
    fn test_decode_counts_chars_not_bytes() {
        // Three chars but five bytes
        assert_eq!(
            OwnershipTag::from_db("é_7").account_id().unwrap_err(),
            OwnershipTagError::TooShort
        );
        // Multibyte char inside the suffix window
        assert_eq!(
            OwnershipTag::from_db("Ann_é007").account_id().unwrap_err(),
            OwnershipTagError::NonNumericSuffix
        );
        // A bare suffix is a complete tag
        assert_eq!(OwnershipTag::from_db("0042").account_id().unwrap(), AccountId::new(42));
    }
}
