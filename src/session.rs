use std::{io::{BufRead, Write}, str::FromStr};

use prettytable::{Table, row};
use rust_decimal::Decimal;
use teller_core::{AccountKind, BankError};
use thiserror::Error;

use crate::{bank::{AccountRegistry, Bank}, config::AccountDefaults};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
}

const MENU: &str = "\
Banking Menu:
1. Open Account
2. Deposit
3. Withdraw
4. Close Account
5. Show All Accounts
6. Exit
";

/// Interactive menu over a [`Bank`].
///
/// Reads one answer per line from `input` and writes prompts and results to
/// `output`. End of input is treated the same as choosing Exit.
pub struct Session<R, W> {
    bank: Bank,
    defaults: AccountDefaults,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(bank: Bank, defaults: AccountDefaults, input: R, output: W) -> Self {
        Self {
            bank,
            defaults,
            input,
            output,
        }
    }

    pub fn into_bank(self) -> Bank {
        self.bank
    }

    pub fn run(&mut self) -> Result<(), SessionError> {
        loop {
            self.output.write_all(MENU.as_bytes())?;
            let choice = match self.prompt("Enter your choice: ")? {
                Some(c) => c,
                None => break,
            };

            match choice.as_str() {
                "1" => self.open_account()?,
                "2" => self.deposit()?,
                "3" => self.withdraw()?,
                "4" => self.close_account()?,
                "5" => self.show_all_accounts()?,
                "6" => break,
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }

        writeln!(self.output, "Exiting the application. Goodbye!")?;
        tracing::debug!(accounts = self.bank.len(), "Session ended");
        Ok(())
    }

    fn open_account(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.prompt_account_number()? else { return Ok(()) };
        let Some(kind_text) = self.prompt("Enter account type (Savings/Checking): ")? else { return Ok(()) };

        let limit = match AccountKind::from_str(&kind_text) {
            Ok(kind) => {
                let (label, default) = match kind {
                    AccountKind::Savings => ("minimum balance", self.defaults.savings_minimum_balance),
                    AccountKind::Checking => ("overdraft limit", self.defaults.checking_overdraft_limit),
                };
                let message = format!("Enter {} (blank for {}): ", label, format_money(default));
                let Some(text) = self.prompt(&message)? else { return Ok(()) };
                if text.is_empty() {
                    Some(default)
                } else {
                    match parse_amount(&text) {
                        Some(limit) => Some(limit),
                        None => return self.invalid_amount(&text),
                    }
                }
            },
            // Leave the error to the registry so duplicates are still reported first
            Err(_) => None,
        };

        match self.bank.open_account_by_kind(&id, &kind_text, limit) {
            Ok(account) => {
                tracing::info!(account_id = %id, kind = %account.kind(), limit = %account.limit(), "Account opened");
                writeln!(self.output, "Account {} opened successfully.", id)?;
            },
            Err(e) => self.report("open", &id, e)?,
        }
        Ok(())
    }

    fn deposit(&mut self) -> Result<(), SessionError> {
        let Some((id, amount)) = self.prompt_transaction("deposit")? else { return Ok(()) };

        match self.bank.deposit(&id, amount) {
            Ok(balance) => {
                tracing::debug!(account_id = %id, %amount, %balance, "Deposit");
                writeln!(self.output, "Deposited {}. New balance: {}", format_money(amount), format_money(balance))?;
            },
            Err(e) => self.report("deposit", &id, e)?,
        }
        Ok(())
    }

    fn withdraw(&mut self) -> Result<(), SessionError> {
        let Some((id, amount)) = self.prompt_transaction("withdraw")? else { return Ok(()) };

        match self.bank.withdraw(&id, amount) {
            Ok(balance) => {
                tracing::debug!(account_id = %id, %amount, %balance, "Withdrawal");
                writeln!(self.output, "Withdrew {}. New balance: {}", format_money(amount), format_money(balance))?;
            },
            Err(e) => self.report("withdraw", &id, e)?,
        }
        Ok(())
    }

    fn close_account(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.prompt_account_number()? else { return Ok(()) };

        match self.bank.close_account(&id) {
            Ok(_) => {
                tracing::info!(account_id = %id, "Account closed");
                writeln!(self.output, "Account {} closed.", id)?;
            },
            Err(e) => self.report("close", &id, e)?,
        }
        Ok(())
    }

    fn show_all_accounts(&mut self) -> Result<(), SessionError> {
        if self.bank.is_empty() {
            writeln!(self.output, "No accounts.")?;
            return Ok(());
        }

        let mut table = Table::new();
        table.add_row(row!["Account", "Type", "Balance", "Limit", "Opened"]);
        table.add_empty_row();

        for account in self.bank.accounts() {
            table.add_row(row![
                account.id(),
                account.kind(),
                format_money(account.balance()),
                format_money(account.limit()),
                account.opened_at().date()
            ]);
        }

        writeln!(self.output, "All Accounts:")?;
        write!(self.output, "{}", table)?;
        match self.bank.total_balance() {
            Some(total) => writeln!(self.output, "Total: {}", format_money(total))?,
            None => writeln!(self.output, "Total: out of range")?,
        }
        Ok(())
    }

    fn prompt_transaction(&mut self, verb: &str) -> Result<Option<(String, Decimal)>, SessionError> {
        let Some(id) = self.prompt_account_number()? else { return Ok(None) };
        let Some(text) = self.prompt(&format!("Enter amount to {}: ", verb))? else { return Ok(None) };

        match parse_amount(&text) {
            Some(amount) => Ok(Some((id, amount))),
            None => {
                self.invalid_amount(&text)?;
                Ok(None)
            },
        }
    }

    fn prompt_account_number(&mut self) -> Result<Option<String>, SessionError> {
        let id = self.prompt("Enter account number: ")?;
        if let Some("") = id.as_deref() {
            writeln!(self.output, "Error: account number cannot be empty")?;
            return Ok(None);
        }
        Ok(id)
    }

    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, SessionError> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn invalid_amount(&mut self, text: &str) -> Result<(), SessionError> {
        writeln!(self.output, "Error: invalid amount: {}", text)?;
        Ok(())
    }

    fn report(&mut self, operation: &str, id: &str, error: BankError) -> Result<(), SessionError> {
        tracing::warn!(account_id = %id, operation, error = %error, "Operation rejected");
        writeln!(self.output, "Error: {}", error)?;
        Ok(())
    }
}

fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.strip_prefix('$').unwrap_or(text);
    Decimal::from_str(text.trim()).ok()
}

pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded < Decimal::ZERO {
        format!("-${:.2}", -rounded)
    } else {
        format!("${:.2}", rounded)
    }
}
