//! # Outbound Port: Transaction Log Source
//!
//! The indexer's only dependency on the outside world. Implemented over a
//! node RPC in production and over the in-memory chain log in the runtime
//! and tests.

use async_trait::async_trait;
use shared_types::RawTransaction;
use thiserror::Error;

use crate::domain::ClassifyContext;

/// One fetched window of the account's history, plus the context the log
/// alone cannot provide.
#[derive(Debug, Clone)]
pub struct FetchedLog {
    /// Raw records; any order, duplicates tolerated.
    pub records: Vec<RawTransaction>,
    /// Classification context as of this fetch.
    pub context: ClassifyContext,
}

/// Transient failures fetching the log. Retried with backoff and reported
/// as staleness, never as hard errors to read-side callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Upstream did not answer in time.
    #[error("Log fetch timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },
    /// Upstream unreachable or returned garbage.
    #[error("Log source unavailable: {message}")]
    Unavailable { message: String },
}

/// Provider of the lottery account's transaction history.
#[async_trait]
pub trait TransactionLogSource: Send + Sync {
    /// Fetch the current log window and classification context.
    async fn fetch(&self) -> Result<FetchedLog, SourceError>;
}
