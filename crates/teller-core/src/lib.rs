//! Core types and traits for Teller account registries.
//!
//! This crate provides the account model, the withdrawal rules for each
//! account kind and the `AccountRegistry` trait, so registry implementations
//! can live in separate crates.

pub mod models;
pub mod registry;

// Re-export key types at crate root for convenience
pub use models::{AccountKind, AccountConfig, SavingsConfig, CheckingConfig};
pub use models::account::{Account, AccountError, Withdrawable};
pub use registry::{AccountRegistry, BankError};
