//! Value Objects

pub mod email;
pub mod ownership_tag;
pub mod session_token;
pub mod user_password;

pub use email::Email;
pub use ownership_tag::{OwnershipTag, OwnershipTagError};
pub use session_token::SessionToken;
pub use user_password::{RawPassword, UserPassword};

/// Account identifier (store-assigned)
pub use kernel::id::AccountId;
