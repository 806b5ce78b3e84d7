//! # Pause Gate and Memos

#[cfg(test)]
mod tests {
    use crate::fixtures::{account, TestLedger};
    use token_ledger::ErrorKind;

    fn paused_ledger() -> TestLedger {
        let ledger = TestLedger::genesis("O", 0);
        assert!(ledger
            .invoke("O", "UpdateApproval", &[&account("S"), "50"])
            .is_ok());
        assert!(ledger.invoke("O", "Pause", &[]).is_ok());
        ledger
    }

    #[test]
    fn test_gated_operations_fail_while_paused() {
        let ledger = paused_ledger();
        let before = ledger.snapshot();

        let o = account("O");
        let r = account("R");
        let s = account("S");
        let gated: [(&str, &str, Vec<&str>); 4] = [
            ("O", "Transfer", vec![r.as_str(), "1"]),
            ("O", "Transfer", vec![r.as_str(), "1", "memo"]),
            ("S", "TransferFrom", vec![o.as_str(), r.as_str(), "1"]),
            ("O", "UpdateApproval", vec![s.as_str(), "10"]),
        ];
        for (caller, function, args) in gated {
            let response = ledger.invoke(caller, function, &args);
            assert_eq!(response.error, Some(ErrorKind::OperationPaused), "{function}");
        }
        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn test_ungated_operations_succeed_while_paused() {
        let ledger = TestLedger::genesis("O", 0);
        let o = account("O");
        let r = account("R");
        let s = account("S");
        assert!(ledger.invoke("O", "UpdateApproval", &[&s, "50"]).is_ok());
        assert!(ledger.invoke("O", "Transfer", &[&r, "7", "before pause"]).is_ok());
        assert!(ledger.invoke("O", "Pause", &[]).is_ok());

        assert_eq!(ledger.query("GetBalanceOf", &[&r]), "7");
        assert_eq!(ledger.query("GetAllowance", &[&o, &s]), "50");
        assert_eq!(ledger.query("GetMemo", &[&r]), "before pause");

        assert!(ledger.invoke("O", "Mint", &[&o, "10"]).is_ok());
        assert!(ledger.invoke("O", "Burn", &["5"]).is_ok());
        assert!(ledger.invoke("S", "BurnFrom", &[&o, "5"]).is_ok());
        for query in ["GetTotalSupply", "GetOwner", "GetName", "GetSymbol", "GetDecimals"] {
            assert!(ledger.invoke("X", query, &[]).is_ok(), "{query}");
        }
        assert!(ledger.invoke("O", "Pause", &[]).is_ok());
        assert!(ledger.invoke("O", "Unpause", &[]).is_ok());

        assert!(ledger.invoke("O", "Transfer", &[&r, "1"]).is_ok());
        assert_eq!(ledger.balance("R"), "8");
        assert_eq!(ledger.total_supply(), "1000000000");
    }

    #[test]
    fn test_only_owner_pauses() {
        let ledger = TestLedger::genesis("O", 0);
        let response = ledger.invoke("X", "Pause", &[]);
        assert_eq!(response.error, Some(ErrorKind::Unauthorized));
        assert!(ledger
            .invoke("O", "Transfer", &[&account("R"), "1"])
            .is_ok());
    }

    #[test]
    fn test_memo_keeps_latest_only() {
        let ledger = TestLedger::genesis("O", 0);
        let r = account("R");

        assert!(ledger.invoke("O", "Transfer", &[&r, "3", "first"]).is_ok());
        assert!(ledger.invoke("O", "Transfer", &[&r, "4", "second"]).is_ok());
        assert_eq!(ledger.query("GetMemo", &[&r]), "second");
        assert_eq!(ledger.balance("R"), "7");
    }

    #[test]
    fn test_plain_transfer_keeps_memo() {
        let ledger = TestLedger::genesis("O", 0);
        let r = account("R");

        assert!(ledger.invoke("O", "Transfer", &[&r, "3", "note"]).is_ok());
        assert!(ledger.invoke("O", "Transfer", &[&r, "3"]).is_ok());
        assert_eq!(ledger.query("GetMemo", &[&r]), "note");
    }

    #[test]
    fn test_failed_transfer_writes_no_memo() {
        let ledger = TestLedger::genesis("O", 0);
        let r = account("R");

        let response = ledger.invoke("X", "Transfer", &[&r, "3", "note"]);
        assert_eq!(response.error, Some(ErrorKind::InsufficientBalance));
        let response = ledger.invoke("X", "GetMemo", &[&r]);
        assert_eq!(response.error, Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_delegated_transfer_with_memo() {
        let ledger = TestLedger::genesis("O", 0);
        let (o, r, s) = (account("O"), account("R"), account("S"));

        assert!(ledger.invoke("O", "UpdateApproval", &[&s, "10"]).is_ok());
        assert!(ledger
            .invoke("S", "TransferFrom", &[&o, &r, "10", "payroll"])
            .is_ok());
        assert_eq!(ledger.query("GetMemo", &[&r]), "payroll");
        assert_eq!(ledger.allowance("O", "S"), "0");

        // An exhausted allowance counts as no approval at all.
        let response = ledger.invoke("S", "TransferFrom", &[&o, &r, "1"]);
        assert_eq!(response.error, Some(ErrorKind::NoApproval));
    }

    #[test]
    fn test_memo_does_not_touch_balance_keys() {
        let ledger = TestLedger::genesis("O", 0);
        let r = account("R");
        assert!(ledger.invoke("O", "Transfer", &[&r, "12", "99999"]).is_ok());
        assert_eq!(ledger.balance("R"), "12");
        assert!(ledger.audit().is_ok());
    }
}
