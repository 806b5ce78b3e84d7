//! # Genesis Flow
//!
//! Initializes a token with two decimals, then walks through transfer,
//! approval and delegated transfer:
//!
//! 1. `Init` by O mints `1_000_000_000 * 10^2` to O
//! 2. O transfers 30 to R
//! 3. O approves S for 100
//! 4. S moves 60 from O to R, leaving an allowance of 40
//! 5. A second 60 from S exceeds the allowance

#[cfg(test)]
mod tests {
    use crate::fixtures::{account, genesis_config, TestLedger};
    use token_ledger::ErrorKind;

    // =============================================================================
    // SCENARIO
    // =============================================================================

    #[test]
    fn test_two_decimal_scenario() {
        let ledger = TestLedger::genesis("O", 2);
        assert_eq!(ledger.total_supply(), "100000000000");
        assert_eq!(ledger.balance("O"), "100000000000");

        let response = ledger.invoke("O", "Transfer", &[&account("R"), "30"]);
        assert!(response.is_ok(), "{response:?}");
        assert_eq!(ledger.balance("O"), "99999999970");
        assert_eq!(ledger.balance("R"), "30");

        let response = ledger.invoke("O", "UpdateApproval", &[&account("S"), "100"]);
        assert!(response.is_ok(), "{response:?}");

        let response = ledger.invoke("S", "TransferFrom", &[&account("O"), &account("R"), "60"]);
        assert!(response.is_ok(), "{response:?}");
        assert_eq!(ledger.allowance("O", "S"), "40");
        assert_eq!(ledger.balance("O"), "99999999910");
        assert_eq!(ledger.balance("R"), "90");

        let response = ledger.invoke("S", "TransferFrom", &[&account("O"), &account("R"), "60"]);
        assert_eq!(response.error, Some(ErrorKind::InsufficientAllowance));
        assert_eq!(ledger.allowance("O", "S"), "40");

        assert_eq!(ledger.audit().unwrap().to_string(), "100000000000");
    }

    #[test]
    fn test_metadata_after_genesis() {
        let ledger = TestLedger::genesis("O", 6);
        assert_eq!(ledger.query("GetName", &[]), "Test Token");
        assert_eq!(ledger.query("GetSymbol", &[]), "TT");
        assert_eq!(ledger.query("GetDecimals", &[]), "6");
        assert_eq!(ledger.query("GetOwner", &[]), account("O"));
        assert_eq!(ledger.total_supply(), "1000000000000000");
    }

    #[test]
    fn test_empty_name_and_symbol_are_kept() {
        let ledger = TestLedger::new();
        let response = ledger.init("O", &[r#"{"name":"","symbol":"","decimals":"0"}"#]);
        assert!(response.is_ok(), "{response:?}");

        for query in ["GetName", "GetSymbol"] {
            let response = ledger.invoke("X", query, &[]);
            assert!(response.is_ok(), "{query}: {response:?}");
            assert_eq!(response.payload.as_deref(), Some(""), "{query}");
        }

        // Still initialized: a second Init is an upgrade.
        let response = ledger.init("X", &[&genesis_config(0)]);
        assert_eq!(response.error, Some(ErrorKind::Unauthorized));
    }

    // =============================================================================
    // UPGRADES
    // =============================================================================

    #[test]
    fn test_upgrade_by_owner_is_a_no_op() {
        let ledger = TestLedger::genesis("O", 2);
        let before = ledger.snapshot();
        let events = ledger.events.len();

        let response = ledger.init("O", &[&genesis_config(9)]);
        assert!(response.is_ok(), "{response:?}");
        assert_eq!(ledger.snapshot(), before);
        assert_eq!(ledger.events.len(), events);
    }

    #[test]
    fn test_upgrade_by_stranger_is_unauthorized() {
        let ledger = TestLedger::genesis("O", 2);
        let response = ledger.init("M", &[]);
        assert_eq!(response.error, Some(ErrorKind::Unauthorized));
        assert_eq!(
            response.message,
            format!("function only accessible to token owner: {}", account("O"))
        );
    }

    #[test]
    fn test_upgrade_follows_ownership_transfer() {
        let ledger = TestLedger::genesis("O", 2);
        let response = ledger.invoke("O", "TransferOwnership", &[&account("N")]);
        assert!(response.is_ok());

        assert_eq!(ledger.init("O", &[]).error, Some(ErrorKind::Unauthorized));
        assert!(ledger.init("N", &[]).is_ok());
    }

    #[test]
    fn test_genesis_decimals_bounds() {
        let ledger = TestLedger::new();
        let response = ledger.init("O", &[&genesis_config(19)]);
        assert_eq!(response.error, Some(ErrorKind::ParseError));
        // Nothing was written; a valid genesis can still follow.
        assert!(ledger.snapshot().is_empty());

        assert!(ledger.init("O", &[&genesis_config(18)]).is_ok());
        assert_eq!(ledger.total_supply(), "1000000000000000000000000000");
    }

    #[test]
    fn test_queries_before_genesis() {
        let ledger = TestLedger::new();
        assert_eq!(ledger.total_supply(), "0");
        assert_eq!(ledger.balance("anyone"), "0");

        let response = ledger.invoke("O", "GetOwner", &[]);
        assert_eq!(response.error, Some(ErrorKind::NotFound));
        let response = ledger.invoke("O", "Mint", &[&account("O"), "5"]);
        assert_eq!(response.error, Some(ErrorKind::Unauthorized));
    }
}
