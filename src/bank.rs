use std::{collections::BTreeMap, sync::Arc};

use rust_decimal::Decimal;
use teller_core::{Account, AccountConfig};

// Re-export core registry types so callers can use crate::bank::* directly
pub use teller_core::registry::{AccountRegistry, BankError};

/// In-memory registry. Accounts are kept ordered by id so listings are stable.
#[derive(Debug, Default)]
pub struct Bank {
    accounts: BTreeMap<Arc<str>, Account>,
}

impl Bank {
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of all balances, or `None` if it does not fit in a `Decimal`.
    pub fn total_balance(&self) -> Option<Decimal> {
        self.accounts.values()
            .try_fold(Decimal::ZERO, |total, account| total.checked_add(account.balance()))
    }
}

impl AccountRegistry for Bank {
    fn open_account(&mut self, id: &str, config: AccountConfig) -> Result<&mut Account, BankError> {
        if self.accounts.contains_key(id) {
            return Err(BankError::DuplicateAccount(id.to_string()));
        }
        config.validate()?;

        let key: Arc<str> = Arc::from(id);
        let account = self.accounts
            .entry(key.clone())
            .or_insert_with(|| Account::new(key, config));
        Ok(account)
    }

    fn remove_account(&mut self, id: &str) -> Option<Account> {
        self.accounts.remove(id)
    }

    fn search_account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    fn account_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }

    fn accounts(&self) -> Box<dyn Iterator<Item = &Account> + '_> {
        Box::new(self.accounts.values())
    }
}
