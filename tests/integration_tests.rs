use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use teller::bank::{AccountRegistry, Bank, BankError};
use teller::{AccountError, AccountKind, CheckingConfig, SavingsConfig};

fn setup() -> Bank {
    let mut bank = Bank::new();
    bank.open_account("A1", SavingsConfig { minimum_balance: dec!(50) }.into())
        .expect("Failed to open savings account");
    bank.open_account("C1", CheckingConfig { overdraft_limit: dec!(100) }.into())
        .expect("Failed to open checking account");
    bank
}

#[test]
fn test_savings_walkthrough() {
    let mut bank = setup();
    assert_eq!(bank.search_account("A1").unwrap().balance(), Decimal::ZERO);

    let account = bank.account_mut("A1").unwrap();
    account.deposit(dec!(200)).unwrap();
    assert_eq!(account.balance(), dec!(200));

    account.withdraw(dec!(100)).unwrap();
    assert_eq!(account.balance(), dec!(100));

    let err = account.withdraw(dec!(51)).unwrap_err();
    assert!(matches!(err, AccountError::BelowMinimumBalance { .. }), "got {:?}", err);
    assert_eq!(account.balance(), dec!(100));
}

#[test]
fn test_checking_walkthrough() {
    let mut bank = setup();

    let account = bank.account_mut("C1").unwrap();
    account.withdraw(dec!(80)).unwrap();
    assert_eq!(account.balance(), dec!(-80));

    let err = account.withdraw(dec!(30)).unwrap_err();
    assert!(matches!(err, AccountError::OverdraftExceeded { .. }), "got {:?}", err);
    assert_eq!(account.balance(), dec!(-80));
}

#[test]
fn test_reopen_is_rejected() {
    let mut bank = setup();
    bank.deposit("A1", dec!(200)).unwrap();

    for kind in ["savings", "checking"] {
        let err = bank.open_account_by_kind("A1", kind, None).unwrap_err();
        assert_eq!(err, BankError::DuplicateAccount("A1".to_string()));
    }
    // Even an unknown kind reports the duplicate first
    let err = bank.open_account_by_kind("A1", "brokerage", None).unwrap_err();
    assert_eq!(err, BankError::DuplicateAccount("A1".to_string()));

    assert_eq!(bank.search_account("A1").unwrap().balance(), dec!(200));
    assert_eq!(bank.len(), 2);
}

#[test]
fn test_savings_withdrawal_boundary() {
    let minimum = dec!(25.50);
    for (deposit, withdraw, ok) in [
        (dec!(100), dec!(74.50), true),
        (dec!(100), dec!(74.51), false),
        (dec!(25.50), dec!(0), true),
        (dec!(25.50), dec!(0.01), false),
        (dec!(0), dec!(0), false),
    ] {
        let mut bank = Bank::new();
        let account = bank.open_account("S", SavingsConfig { minimum_balance: minimum }.into()).unwrap();
        account.deposit(deposit).unwrap();

        let result = account.withdraw(withdraw);
        assert_eq!(result.is_ok(), ok, "deposit {} withdraw {}", deposit, withdraw);
        if ok {
            assert_eq!(account.balance(), deposit - withdraw);
        } else {
            assert_eq!(account.balance(), deposit);
        }
    }
}

#[test]
fn test_checking_withdrawal_boundary() {
    for (limit, withdraw, ok) in [
        (dec!(0), dec!(0), true),
        (dec!(0), dec!(0.01), false),
        (dec!(100), dec!(100), true),
        (dec!(100), dec!(100.01), false),
    ] {
        let mut bank = Bank::new();
        let account = bank.open_account("C", CheckingConfig { overdraft_limit: limit }.into()).unwrap();

        assert_eq!(account.withdraw(withdraw).is_ok(), ok, "limit {} withdraw {}", limit, withdraw);
        assert!(account.balance() >= -limit);
    }
}

#[test]
fn test_balance_has_no_drift() {
    let mut bank = setup();
    let mut expected = Decimal::ZERO;

    let amounts = [dec!(0.10), dec!(0.20), dec!(0.30), dec!(19.99), dec!(1000.01)];
    for round in 0..50 {
        for amount in amounts {
            bank.deposit("C1", amount).unwrap();
            expected += amount;
        }
        if round % 2 == 1 {
            bank.withdraw("C1", dec!(0.7)).unwrap();
            expected -= dec!(0.7);
        }
    }

    assert_eq!(bank.search_account("C1").unwrap().balance(), expected);
}

#[test]
fn test_close_only_at_zero() {
    let mut bank = setup();

    bank.withdraw("C1", dec!(10)).unwrap();
    let err = bank.close_account("C1").unwrap_err();
    assert_eq!(err, BankError::Account(AccountError::NonZeroBalance(dec!(-10))));
    assert!(bank.search_account("C1").is_some());

    bank.deposit("C1", dec!(10)).unwrap();
    let mut closed = bank.close_account("C1").unwrap();
    assert!(closed.is_closed());
    assert_eq!(closed.kind(), AccountKind::Checking);
    assert!(bank.search_account("C1").is_none());

    assert_eq!(closed.deposit(dec!(1)), Err(AccountError::Closed("C1".to_string())));
}

#[test]
fn test_remove_account() {
    let mut bank = setup();
    bank.deposit("A1", dec!(60)).unwrap();

    // Removal does not require a zero balance
    let removed = bank.remove_account("A1").unwrap();
    assert_eq!(removed.balance(), dec!(60));
    assert!(bank.search_account("A1").is_none());
    assert!(bank.remove_account("A1").is_none());
    assert_eq!(bank.len(), 1);
}
