//! # Ports Layer
//!
//! - `inbound`: capability facets the token exposes
//! - `outbound`: store, identity and notification dependencies

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
