//! # Lotto Runtime Library
//!
//! Exposes the runtime's wiring for the binary and the integration test
//! suite.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from environment
//! 2. Validate config (fail fast on misconfiguration)
//! 3. Construct chain log and ledger service
//! 4. Spawn the indexer fetch loop
//! 5. Hand the read API to consumers
//!
//! ## Data Flow
//!
//! ```text
//! wallets ──▶ LedgerService ──▶ ChainLog ──▶ IndexerService ──▶ ReadApi ──▶ consumers
//!             (writes)          (append-only) (reads)           (queries)
//! ```
//!
//! The ledger never calls the indexer and the indexer never mutates the
//! ledger; they agree only by interpreting the same log.

pub mod adapters;
pub mod config;
pub mod wiring;

pub use adapters::ChainLogSource;
pub use config::RuntimeConfig;
pub use wiring::Node;
