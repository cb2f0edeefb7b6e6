use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use time::OffsetDateTime;

use super::{AccountConfig, AccountKind, CheckingConfig, SavingsConfig};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountError {
    #[error("invalid amount: {0} (must not be negative)")]
    InvalidAmount(Decimal),
    #[error("insufficient funds: balance {balance}, requested {amount}")]
    InsufficientFunds { balance: Decimal, amount: Decimal },
    #[error("withdrawal of {amount} would leave balance below minimum of {minimum_balance}")]
    BelowMinimumBalance { minimum_balance: Decimal, balance: Decimal, amount: Decimal },
    #[error("overdraft limit of {overdraft_limit} exceeded (resulting balance {resulting_balance})")]
    OverdraftExceeded { overdraft_limit: Decimal, resulting_balance: Decimal },
    #[error("amount {amount} is out of range for balance {balance}")]
    Overflow { balance: Decimal, amount: Decimal },
    #[error("account balance must be zero to close (balance {0})")]
    NonZeroBalance(Decimal),
    #[error("account is closed: {0}")]
    Closed(String),
}

/// Withdrawal rules for one kind of account.
///
/// `check_withdrawal` only validates; the balance itself is mutated by
/// [`Account::withdraw`] once the check passes. The provided implementation
/// is the base rule used when a kind has nothing more specific: the amount
/// must be non-negative and covered by the current balance.
pub trait Withdrawable {
    fn kind(&self) -> AccountKind;

    /// Minimum balance for savings, overdraft limit for checking.
    fn limit(&self) -> Decimal;

    fn check_withdrawal(&self, balance: Decimal, amount: Decimal) -> Result<(), AccountError> {
        if amount < Decimal::ZERO {
            return Err(AccountError::InvalidAmount(amount));
        }
        if amount > balance {
            return Err(AccountError::InsufficientFunds { balance, amount });
        }
        Ok(())
    }
}

impl Withdrawable for SavingsConfig {
    fn kind(&self) -> AccountKind {
        AccountKind::Savings
    }

    fn limit(&self) -> Decimal {
        self.minimum_balance
    }

    fn check_withdrawal(&self, balance: Decimal, amount: Decimal) -> Result<(), AccountError> {
        if amount < Decimal::ZERO {
            return Err(AccountError::InvalidAmount(amount));
        }
        let remaining = balance.checked_sub(amount)
            .ok_or(AccountError::Overflow { balance, amount })?;
        if remaining < self.minimum_balance {
            return Err(AccountError::BelowMinimumBalance {
                minimum_balance: self.minimum_balance,
                balance,
                amount,
            });
        }
        Ok(())
    }
}

impl Withdrawable for CheckingConfig {
    fn kind(&self) -> AccountKind {
        AccountKind::Checking
    }

    fn limit(&self) -> Decimal {
        self.overdraft_limit
    }

    fn check_withdrawal(&self, balance: Decimal, amount: Decimal) -> Result<(), AccountError> {
        if amount < Decimal::ZERO {
            return Err(AccountError::InvalidAmount(amount));
        }
        let remaining = balance.checked_sub(amount)
            .ok_or(AccountError::Overflow { balance, amount })?;
        if remaining < -self.overdraft_limit {
            return Err(AccountError::OverdraftExceeded {
                overdraft_limit: self.overdraft_limit,
                resulting_balance: remaining,
            });
        }
        Ok(())
    }
}

/// A single account held by a registry.
///
/// Accounts are opened through [`crate::AccountRegistry::open_account`]; the
/// balance only ever changes through `deposit` and `withdraw`.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: Arc<str>,
    balance: Decimal,
    config: AccountConfig,
    opened_at: OffsetDateTime,
    closed: bool,
}

impl Account {
    /// For registry implementations; everyone else opens accounts through
    /// [`crate::AccountRegistry::open_account`].
    #[doc(hidden)]
    pub fn new(id: Arc<str>, config: AccountConfig) -> Self {
        Self {
            id,
            balance: Decimal::ZERO,
            config,
            opened_at: OffsetDateTime::now_utc(),
            closed: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn kind(&self) -> AccountKind {
        self.config.kind()
    }

    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    pub fn limit(&self) -> Decimal {
        self.config.limit()
    }

    pub fn opened_at(&self) -> OffsetDateTime {
        self.opened_at
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        self.ensure_open()?;
        if amount < Decimal::ZERO {
            return Err(AccountError::InvalidAmount(amount));
        }
        self.balance = self.balance.checked_add(amount)
            .ok_or(AccountError::Overflow { balance: self.balance, amount })?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        self.ensure_open()?;
        self.config.rules().check_withdrawal(self.balance, amount)?;
        self.balance = self.balance.checked_sub(amount)
            .ok_or(AccountError::Overflow { balance: self.balance, amount })?;
        Ok(())
    }

    /// Fails when the magnitude of a negative balance exceeds `limit`.
    ///
    /// This is a standalone query; `withdraw` never calls it.
    pub fn overdraft_allowed(&self, limit: Decimal) -> Result<(), AccountError> {
        if self.balance < Decimal::ZERO && -self.balance > limit {
            return Err(AccountError::OverdraftExceeded {
                overdraft_limit: limit,
                resulting_balance: self.balance,
            });
        }
        Ok(())
    }

    /// Marks the account closed. Closed is terminal: every later mutation
    /// fails with [`AccountError::Closed`]. Only reachable through
    /// [`crate::AccountRegistry::close_account`], which also drops the account.
    pub(crate) fn close(&mut self) -> Result<(), AccountError> {
        self.ensure_open()?;
        if !self.balance.is_zero() {
            return Err(AccountError::NonZeroBalance(self.balance));
        }
        self.closed = true;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), AccountError> {
        if self.closed {
            return Err(AccountError::Closed(self.id.to_string()));
        }
        Ok(())
    }
}
