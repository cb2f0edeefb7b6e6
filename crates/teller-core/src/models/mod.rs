use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;

use crate::registry::BankError;

pub mod account;

use account::{AccountError, Withdrawable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Savings,
    Checking,
}

impl Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountKind::Savings => f.write_str("savings"),
            AccountKind::Checking => f.write_str("checking"),
        }
    }
}

impl FromStr for AccountKind {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "savings" => Ok(AccountKind::Savings),
            "checking" => Ok(AccountKind::Checking),
            _ => Err(BankError::UnknownAccountKind(s.to_string())),
        }
    }
}

/// Savings accounts reject any withdrawal that would leave the balance
/// below `minimum_balance`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SavingsConfig {
    pub minimum_balance: Decimal,
}

/// Checking accounts may go negative, but never below `-overdraft_limit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckingConfig {
    pub overdraft_limit: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountConfig {
    Savings(SavingsConfig),
    Checking(CheckingConfig),
}

impl AccountConfig {
    /// Builds the config for `kind`, with an omitted limit defaulting to zero.
    pub fn for_kind(kind: AccountKind, limit: Option<Decimal>) -> Self {
        let limit = limit.unwrap_or(Decimal::ZERO);
        match kind {
            AccountKind::Savings => AccountConfig::Savings(SavingsConfig { minimum_balance: limit }),
            AccountKind::Checking => AccountConfig::Checking(CheckingConfig { overdraft_limit: limit }),
        }
    }

    pub fn kind(&self) -> AccountKind {
        self.rules().kind()
    }

    pub fn limit(&self) -> Decimal {
        self.rules().limit()
    }

    pub fn rules(&self) -> &dyn Withdrawable {
        match self {
            AccountConfig::Savings(c) => c,
            AccountConfig::Checking(c) => c,
        }
    }

    pub fn validate(&self) -> Result<(), AccountError> {
        let limit = self.limit();
        if limit < Decimal::ZERO {
            return Err(AccountError::InvalidAmount(limit));
        }
        Ok(())
    }
}

impl From<SavingsConfig> for AccountConfig {
    fn from(config: SavingsConfig) -> Self {
        AccountConfig::Savings(config)
    }
}

impl From<CheckingConfig> for AccountConfig {
    fn from(config: CheckingConfig) -> Self {
        AccountConfig::Checking(config)
    }
}
