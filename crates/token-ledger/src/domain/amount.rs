//! # Amount
//!
//! Exact, non-negative token quantities.
//!
//! Every stored quantity (balances, allowances, total supply) is an
//! arbitrary-precision unsigned integer. The persisted and wire form is the
//! plain base-10 digit string, without separators or sign.

use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while decoding an amount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The input was empty.
    #[error("amount is empty")]
    Empty,

    /// The input is not a base-10 integer.
    #[error("malformed amount {0:?}: expected base-10 digits")]
    Malformed(String),

    /// The input denotes a value below zero.
    #[error("amount {0} should be >= 0")]
    Negative(String),

    /// Stored bytes were not valid UTF-8.
    #[error("amount bytes are not valid UTF-8")]
    InvalidEncoding,
}

/// A non-negative, arbitrary-precision token quantity.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(BigUint);

impl Amount {
    /// The zero amount.
    #[must_use]
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Returns true if this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parses a caller-supplied decimal string.
    ///
    /// Accepts an optional leading `+` followed by ASCII digits. A leading
    /// `-` on a non-zero value is reported as [`AmountError::Negative`];
    /// anything else that is not a plain integer is [`AmountError::Malformed`].
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        if input.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, digits) = if let Some(rest) = input.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = input.strip_prefix('+') {
            (false, rest)
        } else {
            (false, input)
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::Malformed(input.to_string()));
        }

        let value = BigUint::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| AmountError::Malformed(input.to_string()))?;

        if negative && !value.is_zero() {
            return Err(AmountError::Negative(input.to_string()));
        }

        Ok(Self(value))
    }

    /// Decodes a stored value.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AmountError> {
        let text = std::str::from_utf8(bytes).map_err(|_| AmountError::InvalidEncoding)?;
        Self::parse(text)
    }

    /// Canonical stored form.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_str_radix(10).into_bytes()
    }

    /// `10^exponent`, computed exactly.
    #[must_use]
    pub fn pow10(exponent: u32) -> Self {
        Self(BigUint::from(10u32).pow(exponent))
    }

    /// `self - other`, or `None` if the result would be negative.
    #[must_use]
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        if self.0 >= other.0 {
            Some(Self(&self.0 - &other.0))
        } else {
            None
        }
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn add(self, rhs: &'a Amount) -> Amount {
        Amount(&self.0 + &rhs.0)
    }
}

impl<'a> Mul<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn mul(self, rhs: &'a Amount) -> Amount {
        Amount(&self.0 * &rhs.0)
    }
}

impl<'a> std::iter::Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, x| &acc + x)
    }
}
