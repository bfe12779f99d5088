//! Entities

pub mod account;
pub mod principal;

pub use account::{Account, AccountPatch, NewAccount};
pub use principal::Principal;
