//! # Projection Entities
//!
//! The shapes the reconstructor produces. All of it is derived read-only
//! from the log and recomputable at any time; none of it is a source of
//! truth.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, LogicalSeq, TxHash};

/// Typed event derived from one raw transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// What the transaction was.
    pub kind: EventKind,
    /// Entrant wallet (Entry), owner (Draw), or payout destination (Claim).
    pub actor: Address,
    /// Value moved; zero for draws.
    pub amount: Amount,
    /// Chain transaction hash.
    pub tx_hash: TxHash,
    /// Per-account ordering counter.
    pub logical_seq: LogicalSeq,
    /// Block timestamp, unix seconds.
    pub timestamp: u64,
}

/// The three event kinds the lottery log produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Stake deposit registering a wallet in the current round.
    Entry,
    /// Round-closing winner selection; moves no value.
    Draw,
    /// Pool payout to the winner.
    Claim,
}

/// One reconstructed round.
///
/// `round_id` is *relative to the query*: the still-open current round is
/// `1` and ids increase into the past. The ledger emits no round number
/// on-chain, so these are recomputed identifiers, never stable keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructedRound {
    /// Relative round id, 1 = current.
    pub round_id: u64,
    /// True once a Draw closed this round.
    pub closed: bool,
    /// Events in ascending logical-sequence order.
    pub events: Vec<Event>,
    /// Sum of entry stakes observed in this round.
    pub stake_total: Amount,
}

impl ReconstructedRound {
    /// Number of entries in this round.
    pub fn entry_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Entry)
            .count()
    }
}

/// Counters describing what the classifier saw.
///
/// `malformed_skipped` counts records the classifier could not interpret
/// (for example a transfer with no counterparty); they are dropped without
/// aborting reconstruction. `ignored_non_events` counts well-formed
/// records that are not lottery events (gas-only commands, owner sweeps).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierStats {
    /// Records in the raw input, duplicates included.
    pub total_records: usize,
    /// Records dropped as duplicate `(tx_hash, logical_seq)` pairs.
    pub duplicates: usize,
    /// Records skipped as unparseable.
    pub malformed_skipped: usize,
    /// Well-formed records that are not Entry/Draw/Claim.
    pub ignored_non_events: usize,
}

/// The complete derived view of the log at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconstruction {
    /// Rounds newest first (`rounds[0].round_id == 1`).
    pub rounds: Vec<ReconstructedRound>,
    /// All events, deduplicated, ascending logical sequence.
    pub events: Vec<Event>,
    /// Classifier counters for this pass.
    pub stats: ClassifierStats,
}

impl Reconstruction {
    /// Events most-recent-first, the "current round view" ordering.
    pub fn events_desc(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().rev()
    }

    /// Look up a round by its relative id.
    pub fn round(&self, round_id: u64) -> Option<&ReconstructedRound> {
        self.rounds.iter().find(|r| r.round_id == round_id)
    }

    /// All events a wallet appears in, ascending.
    pub fn events_for_wallet<'a>(&'a self, wallet: &'a Address) -> impl Iterator<Item = &'a Event> {
        self.events.iter().filter(move |e| &e.actor == wallet)
    }
}
