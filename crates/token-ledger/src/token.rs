//! # Token Façade
//!
//! Aggregates the capability facets into the single token value the
//! dispatcher drives. Each facet is an independent trait object, so a test
//! can replace one (say, a `PausableToken` that is always paused) without
//! touching the others.

use crate::engine::TokenEngine;
use crate::memo::MemoExtension;
use crate::ports::{
    BasicToken, BurnableToken, DetailedToken, GenesisToken, LedgerStore, MemoToken,
    MintableToken, OwnableToken, PausableToken,
};
use std::sync::Arc;

/// The token as seen by the dispatcher.
#[derive(Clone)]
pub struct Token {
    pub basic: Arc<dyn BasicToken>,
    pub ownable: Arc<dyn OwnableToken>,
    pub detailed: Arc<dyn DetailedToken>,
    pub mintable: Arc<dyn MintableToken>,
    pub burnable: Arc<dyn BurnableToken>,
    pub pausable: Arc<dyn PausableToken>,
    pub memo: Arc<dyn MemoToken>,
    pub genesis: Arc<dyn GenesisToken>,
}

impl Token {
    /// Wires every facet to `engine`, with the memo extension in front of
    /// the basic facet.
    pub fn from_engine<S: LedgerStore + 'static>(engine: Arc<TokenEngine<S>>) -> Self {
        let memo = Arc::new(MemoExtension::new(
            Arc::clone(&engine) as Arc<dyn BasicToken>,
            engine.state().clone(),
        ));

        Self {
            basic: Arc::clone(&memo) as Arc<dyn BasicToken>,
            ownable: Arc::clone(&engine) as Arc<dyn OwnableToken>,
            detailed: Arc::clone(&engine) as Arc<dyn DetailedToken>,
            mintable: Arc::clone(&engine) as Arc<dyn MintableToken>,
            burnable: Arc::clone(&engine) as Arc<dyn BurnableToken>,
            pausable: Arc::clone(&engine) as Arc<dyn PausableToken>,
            memo,
            genesis: engine,
        }
    }

    /// Token backed by a fresh engine over `store`.
    pub fn for_store<S: LedgerStore + 'static>(store: Arc<S>) -> Self {
        Self::from_engine(Arc::new(TokenEngine::new(store)))
    }
}
