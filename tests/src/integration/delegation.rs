//! # Delegated Spending
//!
//! Allowances belong to exactly one `(owner, spender)` pair, including for
//! identities whose names contain the allowance key joiner.

#[cfg(test)]
mod tests {
    use crate::fixtures::{genesis_config, TestLedger};
    use token_ledger::{ErrorKind, IdentityAttributes};

    fn identity(raw: &str) -> IdentityAttributes {
        let parts: Vec<&str> = raw.split(',').collect();
        IdentityAttributes::new(parts[0], parts[1], parts[2])
    }

    #[test]
    fn test_approval_cannot_be_spent_through_overlapping_key() {
        let ledger = TestLedger::new();
        let owner = identity("a,b,c");
        assert!(ledger.init_as(&owner, &[&genesis_config(0)]).is_ok());
        assert!(ledger
            .invoke_as(&owner, "Transfer", &["a,b,c-d", "500"])
            .is_ok());

        // `a,b,c` + `d-x,y,z` would share a key with `a,b,c-d` + `x,y,z`.
        let response = ledger.invoke_as(&owner, "UpdateApproval", &["d-x,y,z", "100"]);
        assert_eq!(response.error, Some(ErrorKind::InvalidAccountKey));

        let thief = identity("x,y,z");
        let response = ledger.invoke_as(&thief, "TransferFrom", &["a,b,c-d", "x,y,z", "100"]);
        assert_eq!(response.error, Some(ErrorKind::NoApproval));

        assert_eq!(ledger.query("GetBalanceOf", &["a,b,c-d"]), "500");
        assert_eq!(ledger.query("GetBalanceOf", &["x,y,z"]), "0");
        assert_eq!(ledger.query("GetAllowance", &["a,b,c-d", "x,y,z"]), "0");
    }

    #[test]
    fn test_joiner_in_msp_id_fails_identity_resolution() {
        let ledger = TestLedger::new();
        assert!(ledger
            .init_as(&identity("a,b,c"), &[&genesis_config(0)])
            .is_ok());

        let response = ledger.invoke_as(&identity("d-x,y,z"), "GetTotalSupply", &[]);
        assert_eq!(response.error, Some(ErrorKind::IdentityResolutionFailure));
    }

    #[test]
    fn test_joiner_in_subject_name_is_allowed() {
        let ledger = TestLedger::new();
        let owner = identity("Org1MSP,Org1,Org1-child1");
        assert!(ledger.init_as(&owner, &[&genesis_config(0)]).is_ok());
        assert!(ledger
            .invoke_as(&owner, "UpdateApproval", &["Org2MSP,Org2,Org2-child1", "10"])
            .is_ok());

        let spender = identity("Org2MSP,Org2,Org2-child1");
        assert!(ledger
            .invoke_as(&spender, "TransferFrom", &["Org1MSP,Org1,Org1-child1", "Org2MSP,Org2,Org2-child1", "10"])
            .is_ok());
        assert_eq!(ledger.query("GetBalanceOf", &["Org2MSP,Org2,Org2-child1"]), "10");
    }
}
