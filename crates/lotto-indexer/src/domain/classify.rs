//! # Transaction Classification
//!
//! Maps one raw transaction to at most one typed event.
//!
//! ## Rules
//!
//! | Record | Classified as |
//! |--------|---------------|
//! | Inbound, positive value, known origin | `Entry` |
//! | Inbound, gas-only value | ignored (command traffic) |
//! | Outbound, zero / near-zero value | `Draw` (draws move state, not money) |
//! | Outbound, positive, destination == last known winner | `Claim` |
//! | Outbound, positive, destination == owner | ignored (emergency sweep) |
//! | Outbound, positive, other destination | `Claim` |
//! | Any transfer with no counterparty | malformed, skipped |
//!
//! "Near-zero" is anything at or below the configured gas threshold; real
//! draws bounce only excess gas back.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Direction, RawTransaction};

use super::entities::{Event, EventKind};

/// Context the log alone cannot provide: who owns the contract, who the
/// ledger currently names as winner, and where gas-only traffic ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyContext {
    /// Contract owner wallet.
    pub owner: Address,
    /// Winner per the current ledger state, if any.
    pub current_winner: Option<Address>,
    /// Values at or below this are treated as gas, not stakes or payouts.
    pub near_zero_threshold: Amount,
}

/// Outcome of classifying a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A lottery event.
    Event(Event),
    /// Well-formed but not a lottery event.
    Ignored,
    /// Unparseable; skipped and counted, never fatal.
    Malformed,
}

/// Classify one raw transaction.
pub fn classify_record(record: &RawTransaction, ctx: &ClassifyContext) -> Classification {
    let Some(counterparty) = record.counterparty else {
        return Classification::Malformed;
    };

    match record.direction {
        Direction::Inbound => {
            if record.value > ctx.near_zero_threshold {
                Classification::Event(event(EventKind::Entry, counterparty, record))
            } else {
                // Gas-only command (draw/reset triggers arrive this way).
                Classification::Ignored
            }
        }
        Direction::Outbound => {
            if record.value <= ctx.near_zero_threshold {
                return Classification::Event(event(EventKind::Draw, counterparty, record));
            }
            if ctx.current_winner == Some(counterparty) {
                return Classification::Event(event(EventKind::Claim, counterparty, record));
            }
            if counterparty == ctx.owner {
                // Emergency sweep to the owner, not a round event.
                return Classification::Ignored;
            }
            Classification::Event(event(EventKind::Claim, counterparty, record))
        }
    }
}

fn event(kind: EventKind, actor: Address, record: &RawTransaction) -> Event {
    Event {
        kind,
        actor,
        amount: record.value,
        tx_hash: record.tx_hash,
        logical_seq: record.logical_seq,
        timestamp: record.timestamp,
    }
}
