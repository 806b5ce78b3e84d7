//! # Domain Layer (Inner Hexagon)
//!
//! Pure token logic: amounts, identity keys, key layout, validation rules.
//! No I/O; the store, identity resolver and event channel live behind ports.

pub mod amount;
pub mod entities;
pub mod errors;
pub mod identity;
pub mod invariants;
pub mod keys;
pub mod services;

pub use amount::*;
pub use entities::*;
pub use errors::*;
pub use identity::*;
pub use invariants::*;
pub use services::*;
