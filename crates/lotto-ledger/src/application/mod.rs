//! Application layer: the single-writer ledger service.

pub mod service;

pub use service::{LedgerService, OpOutcome};
