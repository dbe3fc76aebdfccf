//! Ledger configuration with startup validation.
//!
//! Misconfiguration is caught once, at wiring time: `validate()` runs
//! before the service is constructed and a failure aborts startup.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount};
use thiserror::Error;

/// Default ticket price in the smallest unit of account.
pub const DEFAULT_TICKET_PRICE: Amount = 1_000_000;

/// Default gas reserve retained on payout.
pub const DEFAULT_GAS_RESERVE: Amount = 10_000;

/// Ledger construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Contract owner wallet.
    pub owner: Address,
    /// Stake required to enter, immutable after construction.
    pub ticket_price: Amount,
    /// Amount retained from the pool on payout to cover forwarding gas.
    pub gas_reserve: Amount,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            owner: [0u8; 32],
            ticket_price: DEFAULT_TICKET_PRICE,
            gas_reserve: DEFAULT_GAS_RESERVE,
        }
    }
}

impl LedgerConfig {
    /// Validate configuration; called at startup, before wiring.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticket_price == 0 {
            return Err(ConfigError::InvalidTicketPrice(
                "ticket_price cannot be 0".into(),
            ));
        }
        // The smallest payout is a single-entrant round: ticket_price
        // minus the reserve. It must stay strictly above the reserve,
        // which downstream readers treat as the gas-only threshold.
        if self.gas_reserve.saturating_mul(2) >= self.ticket_price {
            return Err(ConfigError::InvalidGasReserve(format!(
                "gas_reserve {} must be below half of ticket_price {}",
                self.gas_reserve, self.ticket_price
            )));
        }
        if self.owner == [0u8; 32] {
            return Err(ConfigError::MissingOwner);
        }
        Ok(())
    }
}

/// Configuration validation failures. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Ticket price failed validation.
    #[error("Invalid ticket price: {0}")]
    InvalidTicketPrice(String),
    /// Gas reserve failed validation.
    #[error("Invalid gas reserve: {0}")]
    InvalidGasReserve(String),
    /// Owner address absent.
    #[error("Owner address is required")]
    MissingOwner,
}
