//! # Core Domain Entities
//!
//! Defines the entities both sides of the system agree on: wallet
//! addresses, amounts, and the raw transaction records that make up the
//! chain log of the lottery account.
//!
//! ## Clusters
//!
//! - **Identity & money**: `Address`, `Amount`, `TxHash`, `LogicalSeq`
//! - **Chain log**: `RawTransaction`, `Direction`

use serde::{Deserialize, Serialize};

/// A 32-byte wallet address.
pub type Address = [u8; 32];

/// A 32-byte transaction hash.
pub type TxHash = [u8; 32];

/// An amount in the smallest unit of account.
pub type Amount = u64;

/// Per-account logical ordering counter. The chain assigns these strictly
/// monotonically, so `(tx_hash, logical_seq)` uniquely identifies a record
/// even across overlapping fetch windows.
pub type LogicalSeq = u64;

/// Render an address as a short hex prefix for logs.
pub fn short_addr(addr: &Address) -> String {
    hex::encode(&addr[..4])
}

/// Which way value moved relative to the lottery account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Value arrived at the lottery account.
    Inbound,
    /// Value (or a zero-value confirmation) left the lottery account.
    Outbound,
}

/// One raw transaction against the lottery account, as the chain records it.
///
/// This is the only shape the off-chain reconstructor is allowed to read.
/// The counterparty is the *origin* wallet for inbound records and the
/// *destination* wallet for outbound records; records with no counterparty
/// are possible on a real chain and must be tolerated (skipped) downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Chain-assigned transaction hash.
    pub tx_hash: TxHash,
    /// Chain-assigned per-account ordering counter.
    pub logical_seq: LogicalSeq,
    /// Unix timestamp (seconds) of the enclosing block.
    pub timestamp: u64,
    /// Inbound or outbound relative to the lottery account.
    pub direction: Direction,
    /// Origin (inbound) or destination (outbound) wallet, when known.
    pub counterparty: Option<Address>,
    /// Value moved, in the smallest unit of account.
    pub value: Amount,
    /// Opcode carried in the message body, when the body parsed.
    pub opcode: Option<u32>,
}

impl RawTransaction {
    /// Dedup key: the chain may serve the same record in overlapping
    /// fetch windows, but never two distinct records with the same key.
    pub fn dedup_key(&self) -> (TxHash, LogicalSeq) {
        (self.tx_hash, self.logical_seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_addr_is_hex_prefix() {
        let addr: Address = [0xAB; 32];
        assert_eq!(short_addr(&addr), "abababab");
    }

    #[test]
    fn test_dedup_key_identifies_record() {
        let tx = RawTransaction {
            tx_hash: [1u8; 32],
            logical_seq: 7,
            timestamp: 1_700_000_000,
            direction: Direction::Inbound,
            counterparty: Some([2u8; 32]),
            value: 500,
            opcode: None,
        };
        assert_eq!(tx.dedup_key(), ([1u8; 32], 7));
    }
}
