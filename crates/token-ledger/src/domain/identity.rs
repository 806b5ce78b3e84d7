//! # Identity Keys
//!
//! Account keys are derived from the caller's verified identity attributes.
//! The membership service provider id is unique within the federation and a
//! certificate's common name is unique within its issuer, so the triple
//! `{msp_id},{issuer_cn},{subject_cn}` names exactly one participant.

use super::errors::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the three key components.
pub const KEY_SEPARATOR: char = ',';

/// Joins owner and spender in allowance keys; never part of an msp id.
pub const ALLOWANCE_JOINER: char = '-';

/// Verified attributes produced by the external identity resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityAttributes {
    /// Organization (MSP) identifier.
    pub msp_id: String,
    /// Common name of the certificate issuer.
    pub issuer_cn: String,
    /// Common name of the certificate subject.
    pub subject_cn: String,
}

impl IdentityAttributes {
    /// Convenience constructor.
    pub fn new(
        msp_id: impl Into<String>,
        issuer_cn: impl Into<String>,
        subject_cn: impl Into<String>,
    ) -> Self {
        Self {
            msp_id: msp_id.into(),
            issuer_cn: issuer_cn.into(),
            subject_cn: subject_cn.into(),
        }
    }
}

/// Canonical account key: `{msp_id},{issuer_cn},{subject_cn}`.
///
/// Always exactly three non-empty components, none containing the separator
/// or a control character. Balance keys therefore never collide with the
/// fixed keys (`owner`, `totalSupply`, ...), with composite keys (which start
/// with `\0`) or with allowance keys, which join two account keys and carry
/// four separators.
///
/// The msp id never contains [`ALLOWANCE_JOINER`], so in `{owner}-{spender}`
/// the owner ends at the last joiner before the spender's first separator.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountKey(String);

impl AccountKey {
    /// Derives the key of a resolved identity.
    pub fn from_attributes(attrs: &IdentityAttributes) -> LedgerResult<Self> {
        for (name, value) in [
            ("msp id", &attrs.msp_id),
            ("issuer common name", &attrs.issuer_cn),
            ("subject common name", &attrs.subject_cn),
        ] {
            if value.is_empty() {
                return Err(LedgerError::IdentityResolutionFailure(format!(
                    "{name} is empty"
                )));
            }
            if value.contains(KEY_SEPARATOR) || value.chars().any(char::is_control) {
                return Err(LedgerError::IdentityResolutionFailure(format!(
                    "{name} {value:?} contains {KEY_SEPARATOR:?} or a control character"
                )));
            }
        }
        if attrs.msp_id.contains(ALLOWANCE_JOINER) {
            return Err(LedgerError::IdentityResolutionFailure(format!(
                "msp id {:?} contains {ALLOWANCE_JOINER:?}",
                attrs.msp_id
            )));
        }

        Ok(Self(format!(
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
            attrs.msp_id, attrs.issuer_cn, attrs.subject_cn
        )))
    }

    /// Validates an account key received as an operation argument.
    pub fn parse(raw: &str) -> LedgerResult<Self> {
        let parts: Vec<&str> = raw.split(KEY_SEPARATOR).collect();
        let well_formed = parts.len() == 3
            && parts.iter().all(|p| !p.is_empty())
            && !parts[0].contains(ALLOWANCE_JOINER)
            && !raw.chars().any(char::is_control);

        if well_formed {
            Ok(Self(raw.to_string()))
        } else {
            Err(LedgerError::InvalidAccountKey(raw.to_string()))
        }
    }

    /// The key as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountKey {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountKey> for String {
    fn from(key: AccountKey) -> Self {
        key.0
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountKey({})", self.0)
    }
}
