//! # Adapters
//!
//! Port implementations connecting the subsystems.

use std::sync::Arc;

use async_trait::async_trait;
use shared_log::ChainLog;
use shared_types::Amount;

use lotto_indexer::{ClassifyContext, FetchedLog, SourceError, TransactionLogSource};
use lotto_ledger::LedgerService;

/// In-process implementation of the indexer's log source over the
/// simulated chain. Production deployments would implement the same port
/// over a node RPC; the indexer cannot tell the difference.
pub struct ChainLogSource {
    log: Arc<ChainLog>,
    ledger: Arc<LedgerService>,
    near_zero_threshold: Amount,
}

impl ChainLogSource {
    /// Build the source over a log and the ledger it belongs to.
    pub fn new(log: Arc<ChainLog>, ledger: Arc<LedgerService>, near_zero_threshold: Amount) -> Self {
        Self {
            log,
            ledger,
            near_zero_threshold,
        }
    }
}

#[async_trait]
impl TransactionLogSource for ChainLogSource {
    async fn fetch(&self) -> Result<FetchedLog, SourceError> {
        let snapshot = self.ledger.snapshot();
        Ok(FetchedLog {
            records: self.log.snapshot().records,
            context: ClassifyContext {
                owner: snapshot.owner,
                current_winner: snapshot.winner,
                near_zero_threshold: self.near_zero_threshold,
            },
        })
    }
}
