//! Identity resolver adapters.
//!
//! Certificate parsing belongs to the hosting substrate. These adapters
//! cover the two cases the ledger itself needs: a fixed identity for tests
//! and a creator that already carries its attributes as JSON.

use crate::domain::{IdentityAttributes, LedgerError, LedgerResult};
use crate::ports::IdentityResolver;

/// Resolves every creator to the same attributes.
#[derive(Debug, Clone)]
pub struct StaticIdentityResolver {
    attributes: IdentityAttributes,
}

impl StaticIdentityResolver {
    pub fn new(attributes: IdentityAttributes) -> Self {
        Self { attributes }
    }
}

impl IdentityResolver for StaticIdentityResolver {
    fn resolve(&self, _creator: &[u8]) -> LedgerResult<IdentityAttributes> {
        Ok(self.attributes.clone())
    }
}

/// Decodes `{"msp_id": ..., "issuer_cn": ..., "subject_cn": ...}` creators.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonIdentityResolver;

impl IdentityResolver for JsonIdentityResolver {
    fn resolve(&self, creator: &[u8]) -> LedgerResult<IdentityAttributes> {
        if creator.is_empty() {
            return Err(LedgerError::IdentityResolutionFailure(
                "creator is empty".to_string(),
            ));
        }
        serde_json::from_slice(creator).map_err(|e| {
            LedgerError::IdentityResolutionFailure(format!("malformed creator: {e}"))
        })
    }
}
