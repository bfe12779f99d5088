//! Application Layer
//!
//! Use cases and application services.

pub mod account_directory;
pub mod authenticator;
pub mod config;
pub mod delete_account;
pub mod password_verifier;
pub mod register;
pub mod token_manager;
pub mod update_account;

// Re-exports
pub use account_directory::AccountDirectory;
pub use authenticator::{RequestAuthenticator, TokenGrant};
pub use config::AuthConfig;
pub use delete_account::DeleteAccountUseCase;
pub use password_verifier::PasswordVerifier;
pub use register::{RegisterInput, RegisterUseCase};
pub use token_manager::{IssuedToken, TokenManager};
pub use update_account::{UpdateAccountInput, UpdateAccountUseCase};
