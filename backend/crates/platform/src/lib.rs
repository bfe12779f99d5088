//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, salted, constant-time verification)
//! - Opaque token generation and constant-time comparison
//! - Injectable clock for expiry arithmetic
//! - `Authorization` header credential parsing (Basic / Bearer)

pub mod clock;
pub mod credentials;
pub mod crypto;
pub mod password;
