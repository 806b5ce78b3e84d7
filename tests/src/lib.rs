//! # Token Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Ledger harness driven through the dispatcher
//! └── integration/      # End-to-end flows
//!     ├── genesis_flow.rs
//!     ├── pause_and_memo.rs
//!     ├── conservation.rs
//!     ├── delegation.rs
//!     └── runtime_flow.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p token-tests
//!
//! # By flow
//! cargo test -p token-tests integration::genesis_flow
//!
//! # Benchmarks
//! cargo bench -p token-tests
//! ```

pub mod fixtures;
