//! Ports layer: outbound dependencies of the indexer.

pub mod outbound;

pub use outbound::{FetchedLog, SourceError, TransactionLogSource};
