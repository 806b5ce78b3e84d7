//! # Runtime Flow
//!
//! Drives the runtime host line by line and round-trips its state file.

#[cfg(test)]
mod tests {
    use crate::fixtures::{account, genesis_config, ISSUER_CN, MSP_ID};
    use std::sync::Arc;
    use token_ledger::adapters::InMemoryLedgerStore;
    use token_ledger::{ErrorKind, LedgerConfig};
    use token_runtime::{load_state, save_state, Host};

    fn line(function: &str, args: &[&str], subject: &str) -> String {
        serde_json::json!({
            "function": function,
            "args": args,
            "creator": {"msp_id": MSP_ID, "issuer_cn": ISSUER_CN, "subject_cn": subject},
        })
        .to_string()
    }

    #[test]
    fn test_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let store = Arc::new(load_state(&path).unwrap());
            let mut host = Host::new(Arc::clone(&store), LedgerConfig::default());
            assert!(host
                .handle_line(&line("Init", &[&genesis_config(2)], "O"))
                .response
                .is_ok());
            assert!(host
                .handle_line(&line("Transfer", &[&account("R"), "30", "hello"], "O"))
                .response
                .is_ok());
            save_state(&path, &store).unwrap();
        }

        let store = Arc::new(load_state(&path).unwrap());
        let mut host = Host::new(store, LedgerConfig::default());
        let out = host.handle_line(&line("GetBalanceOf", &[&account("R")], "X"));
        assert_eq!(out.response.payload.as_deref(), Some("30"));
        let out = host.handle_line(&line("GetMemo", &[&account("R")], "X"));
        assert_eq!(out.response.payload.as_deref(), Some("hello"));
    }

    #[test]
    fn test_failed_lines_do_not_commit() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let mut host = Host::new(Arc::clone(&store), LedgerConfig::default());
        host.handle_line(&line("Init", &[&genesis_config(0)], "O"));
        let before = store.entries();

        let out = host.handle_line(&line("Transfer", &[&account("R"), "-1"], "O"));
        assert_eq!(out.response.error, Some(ErrorKind::NegativeOrInvalidAmount));
        let out = host.handle_line(&line("Nope", &[], "O"));
        assert_eq!(out.response.error, Some(ErrorKind::UnknownFunction));
        let out = host.handle_line("garbage");
        assert_eq!(out.response.error, Some(ErrorKind::ParseError));

        assert_eq!(store.entries(), before);
        assert_eq!(host.commits(), 1);
        assert_eq!(host.stats().invocations, 4);
        assert_eq!(host.stats().failures, 3);
    }

    #[test]
    fn test_events_reported_per_line() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let mut host = Host::new(store, LedgerConfig::default());
        host.handle_line(&line("Init", &[&genesis_config(0)], "O"));

        let out = host.handle_line(&line("UpdateApproval", &[&account("S"), "7"], "O"));
        assert_eq!(out.events.len(), 1);
        assert_eq!(out.events[0].name, "approval");
        assert_eq!(out.events[0].payload["origin"], account("O"));
        assert_eq!(out.events[0].payload["payload"]["to"], account("S"));
        assert_eq!(out.events[0].payload["payload"]["amount"], "7");
    }
}
