//! # Wiring
//!
//! Constructs the full pipeline and owns its lifecycle.

use std::sync::Arc;

use shared_log::ChainLog;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use lotto_indexer::{IndexerHandle, IndexerService};
use lotto_ledger::LedgerService;
use lotto_read_api::ReadApi;

use crate::adapters::ChainLogSource;
use crate::config::RuntimeConfig;

/// A fully wired node: ledger write side, indexer read side, query API.
pub struct Node {
    /// The simulated chain log.
    pub log: Arc<ChainLog>,
    /// Single-writer ledger service.
    pub ledger: Arc<LedgerService>,
    /// Read handle onto the indexer's latest reconstruction.
    pub indexer: IndexerHandle,
    /// Query surface for external consumers.
    pub read_api: Arc<ReadApi>,
    shutdown_tx: watch::Sender<bool>,
    indexer_task: JoinHandle<()>,
}

impl Node {
    /// Validate the config and wire everything together, spawning the
    /// indexer fetch loop on the current tokio runtime.
    pub fn build(config: &RuntimeConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let log = Arc::new(ChainLog::new());
        let ledger = Arc::new(LedgerService::new(&config.ledger, Arc::clone(&log)));

        let source = Arc::new(ChainLogSource::new(
            Arc::clone(&log),
            Arc::clone(&ledger),
            config.ledger.gas_reserve,
        ));
        let (indexer_service, indexer) =
            IndexerService::new(source, config.indexer.clone());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let indexer_task = tokio::spawn(indexer_service.run(shutdown_rx));

        let read_api = Arc::new(ReadApi::new(
            Arc::clone(&ledger),
            indexer.clone(),
            config.read_api.clone(),
        ));

        tracing::info!("node wired, indexer polling");
        Ok(Self {
            log,
            ledger,
            indexer,
            read_api,
            shutdown_tx,
            indexer_task,
        })
    }

    /// Stop the indexer loop and wait for it to finish.
    pub async fn shutdown(self) {
        // Receiver may already be gone if the loop exited on its own.
        let _ = self.shutdown_tx.send(true);
        let _ = self.indexer_task.await;
        tracing::info!("node stopped");
    }
}
