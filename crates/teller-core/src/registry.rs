use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    account::{Account, AccountError},
    AccountConfig, AccountKind,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    #[error("account already exists: {0}")]
    DuplicateAccount(String),
    #[error("unknown account kind: {0} (expected savings or checking)")]
    UnknownAccountKind(String),
    #[error("account not found: {0}")]
    AccountNotFound(String),
    #[error(transparent)]
    Account(#[from] AccountError),
}

/// A registry that exclusively owns its accounts, keyed by id.
///
/// Lookups return `Option` since a miss is expected; everything that mutates
/// fails loudly with a [`BankError`].
pub trait AccountRegistry {
    fn open_account(&mut self, id: &str, config: AccountConfig) -> Result<&mut Account, BankError>;
    fn remove_account(&mut self, id: &str) -> Option<Account>;
    fn search_account(&self, id: &str) -> Option<&Account>;
    fn account_mut(&mut self, id: &str) -> Option<&mut Account>;
    fn accounts(&self) -> Box<dyn Iterator<Item = &Account> + '_>;

    /// Opens an account from a textual kind, as typed by a user.
    ///
    /// The duplicate check runs before the kind is parsed.
    fn open_account_by_kind(&mut self, id: &str, kind: &str, limit: Option<Decimal>) -> Result<&mut Account, BankError> {
        if self.search_account(id).is_some() {
            return Err(BankError::DuplicateAccount(id.to_string()));
        }
        let kind: AccountKind = kind.parse()?;
        self.open_account(id, AccountConfig::for_kind(kind, limit))
    }

    fn deposit(&mut self, id: &str, amount: Decimal) -> Result<Decimal, BankError> {
        let account = self.account_mut(id)
            .ok_or_else(|| BankError::AccountNotFound(id.to_string()))?;
        account.deposit(amount)?;
        Ok(account.balance())
    }

    fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<Decimal, BankError> {
        let account = self.account_mut(id)
            .ok_or_else(|| BankError::AccountNotFound(id.to_string()))?;
        account.withdraw(amount)?;
        Ok(account.balance())
    }

    /// Closes the account and drops it from the registry. On failure the
    /// account stays registered and unchanged.
    fn close_account(&mut self, id: &str) -> Result<Account, BankError> {
        let account = self.account_mut(id)
            .ok_or_else(|| BankError::AccountNotFound(id.to_string()))?;
        account.close()?;
        self.remove_account(id)
            .ok_or_else(|| BankError::AccountNotFound(id.to_string()))
    }
}
