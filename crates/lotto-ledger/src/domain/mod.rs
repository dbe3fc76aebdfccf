//! Domain layer: the pure lottery state machine.

pub mod entities;
pub mod errors;

pub use entities::{LedgerSnapshot, LedgerState, RoundPhase};
pub use errors::LedgerError;
