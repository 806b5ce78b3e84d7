//! # World-State Key Layout
//!
//! | Key | Value |
//! |-----|-------|
//! | `owner` | owner account key |
//! | `name`, `symbol`, `decimals` | token metadata |
//! | `totalSupply` | decimal amount |
//! | `isPaused` | `true` / `false` |
//! | `{account}` | balance, decimal amount |
//! | `{owner}-{spender}` | allowance, decimal amount |
//! | `\0Memo\0{account}\0` | latest memo for `account` |

use super::identity::{AccountKey, ALLOWANCE_JOINER};

pub const OWNER_KEY: &str = "owner";
pub const NAME_KEY: &str = "name";
pub const SYMBOL_KEY: &str = "symbol";
pub const DECIMALS_KEY: &str = "decimals";
pub const TOTAL_SUPPLY_KEY: &str = "totalSupply";
pub const PAUSED_KEY: &str = "isPaused";

/// Object type of memo composite keys.
pub const MEMO_OBJECT_TYPE: &str = "Memo";

/// Delimiter of composite keys. No simple key can start with it.
const COMPOSITE_KEY_DELIMITER: char = '\u{0}';

/// Balance key of an account.
#[must_use]
pub fn balance_key(account: &AccountKey) -> String {
    account.as_str().to_string()
}

/// Allowance key of `(owner, spender)`.
#[must_use]
pub fn allowance_key(owner: &AccountKey, spender: &AccountKey) -> String {
    format!("{owner}{ALLOWANCE_JOINER}{spender}")
}

/// Namespaced composite key, laid out as `\0{object_type}\0{attr}\0...`.
#[must_use]
pub fn composite_key(object_type: &str, attributes: &[&str]) -> String {
    let mut key = String::with_capacity(
        2 + object_type.len() + attributes.iter().map(|a| a.len() + 1).sum::<usize>(),
    );
    key.push(COMPOSITE_KEY_DELIMITER);
    key.push_str(object_type);
    key.push(COMPOSITE_KEY_DELIMITER);
    for attribute in attributes {
        key.push_str(attribute);
        key.push(COMPOSITE_KEY_DELIMITER);
    }
    key
}

/// Memo key of an account.
#[must_use]
pub fn memo_key(account: &AccountKey) -> String {
    composite_key(MEMO_OBJECT_TYPE, &[account.as_str()])
}

/// Returns true if `key` is a fixed key, never a balance or allowance.
#[must_use]
pub fn is_reserved(key: &str) -> bool {
    matches!(
        key,
        OWNER_KEY | NAME_KEY | SYMBOL_KEY | DECIMALS_KEY | TOTAL_SUPPLY_KEY | PAUSED_KEY
    ) || key.starts_with(COMPOSITE_KEY_DELIMITER)
}
