pub mod bank;
pub mod config;
pub mod session;

pub use teller_core::{
    Account, AccountConfig, AccountError, AccountKind, CheckingConfig, SavingsConfig, Withdrawable,
};
