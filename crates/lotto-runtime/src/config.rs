//! Runtime configuration from environment variables.
//!
//! Every sub-config is validated here, once, before any wiring happens.

use std::env;
use std::time::Duration;

use anyhow::Context;
use shared_types::Address;

use lotto_indexer::IndexerConfig;
use lotto_ledger::LedgerConfig;
use lotto_read_api::ReadApiConfig;

/// Aggregated configuration for the whole node.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Ledger construction parameters.
    pub ledger: LedgerConfig,
    /// Indexer fetch loop tuning.
    pub indexer: IndexerConfig,
    /// Read API tuning.
    pub read_api: ReadApiConfig,
}

impl RuntimeConfig {
    /// Load from environment with defaults.
    ///
    /// - `LOTTO_OWNER`: owner wallet, 64 hex chars (default: 0x01 repeated)
    /// - `LOTTO_TICKET_PRICE`: stake per entry (default: 1000000)
    /// - `LOTTO_GAS_RESERVE`: payout gas reserve (default: 10000)
    /// - `LOTTO_POLL_INTERVAL_SECS`: indexer poll interval (default: 5)
    pub fn from_env() -> anyhow::Result<Self> {
        let owner = match env::var("LOTTO_OWNER") {
            Ok(raw) => parse_address(&raw).context("LOTTO_OWNER")?,
            Err(_) => [0x01; 32],
        };

        let mut ledger = LedgerConfig {
            owner,
            ..Default::default()
        };
        if let Ok(raw) = env::var("LOTTO_TICKET_PRICE") {
            ledger.ticket_price = raw.parse().context("LOTTO_TICKET_PRICE")?;
        }
        if let Ok(raw) = env::var("LOTTO_GAS_RESERVE") {
            ledger.gas_reserve = raw.parse().context("LOTTO_GAS_RESERVE")?;
        }

        let mut indexer = IndexerConfig::default();
        if let Ok(raw) = env::var("LOTTO_POLL_INTERVAL_SECS") {
            indexer.poll_interval =
                Duration::from_secs(raw.parse().context("LOTTO_POLL_INTERVAL_SECS")?);
        }

        Ok(Self {
            ledger,
            indexer,
            read_api: ReadApiConfig::default(),
        })
    }

    /// Validate every sub-config. Any failure aborts startup.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.ledger.validate().context("ledger config")?;
        self.indexer.validate().context("indexer config")?;
        self.read_api.validate().context("read api config")?;
        Ok(())
    }
}

fn parse_address(raw: &str) -> anyhow::Result<Address> {
    let bytes = hex::decode(raw.trim_start_matches("0x")).context("address must be hex")?;
    let arr: Address = bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("address must be exactly 32 bytes"))?;
    Ok(arr)
}
