//! # Domain Services
//!
//! Stateless checks shared by the engine and the dispatcher.

use super::amount::Amount;
use super::errors::{LedgerError, LedgerResult};
use super::identity::AccountKey;

/// Fails unless exactly `expected` arguments were supplied.
pub fn ensure_arg_count(args: &[String], expected: usize) -> LedgerResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(LedgerError::InvalidArgumentCount {
            expected: expected.to_string(),
            actual: args.len(),
        })
    }
}

/// Fails unless `base` or `base + 1` arguments were supplied. Returns true
/// when the optional trailing argument is present.
pub fn ensure_arg_count_with_optional(args: &[String], base: usize) -> LedgerResult<bool> {
    match args.len() {
        n if n == base => Ok(false),
        n if n == base + 1 => Ok(true),
        actual => Err(LedgerError::InvalidArgumentCount {
            expected: format!("{base} or {}", base + 1),
            actual,
        }),
    }
}

/// Fails unless the caller is the current owner.
pub fn ensure_caller_is_owner(caller: &AccountKey, owner: Option<&AccountKey>) -> LedgerResult<()> {
    match owner {
        Some(owner) if owner == caller => Ok(()),
        Some(owner) => Err(LedgerError::Unauthorized {
            caller: caller.to_string(),
            owner: owner.to_string(),
        }),
        None => Err(LedgerError::Unauthorized {
            caller: caller.to_string(),
            owner: String::new(),
        }),
    }
}

/// Debits `amount` from `balance`, reporting the shortfall against `account`.
pub fn debit_balance(account: &AccountKey, balance: &Amount, amount: &Amount) -> LedgerResult<Amount> {
    balance
        .checked_sub(amount)
        .ok_or_else(|| LedgerError::InsufficientBalance {
            account: account.to_string(),
            available: balance.clone(),
            required: amount.clone(),
        })
}

/// Checks that `spender` may move `amount` out of `owner`'s balance.
///
/// A zero allowance is [`LedgerError::NoApproval`] regardless of `amount`.
pub fn check_allowance(
    owner: &AccountKey,
    spender: &AccountKey,
    allowance: &Amount,
    amount: &Amount,
) -> LedgerResult<()> {
    if allowance.is_zero() {
        return Err(LedgerError::NoApproval {
            owner: owner.to_string(),
            spender: spender.to_string(),
        });
    }
    if amount > allowance {
        return Err(LedgerError::InsufficientAllowance {
            owner: owner.to_string(),
            spender: spender.to_string(),
            available: allowance.clone(),
            required: amount.clone(),
        });
    }
    Ok(())
}
