//! # Chain Log
//!
//! In-memory append-only log with chained tip hashing.
//!
//! The chain assigns `logical_seq` and `tx_hash` at append time; callers
//! submit a [`PendingRecord`] without either field, mirroring how a wallet
//! submits a transaction and the chain stamps its ordering.

use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use shared_types::{Address, Amount, Direction, LogicalSeq, RawTransaction, TxHash};

/// Domain separator for record hashing.
const RECORD_DOMAIN: &[u8] = b"lotto.log.record.v1";

/// The finalized tip of the log at some instant.
///
/// Commits to the entire history via the chained hash, which makes it
/// usable as draw entropy: it is fixed only after every entry that will
/// participate in the draw has been appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogTip {
    /// Logical sequence of the most recent record (0 when empty).
    pub logical_seq: LogicalSeq,
    /// Chained hash over all records appended so far.
    pub tip_hash: TxHash,
    /// Timestamp of the most recent record (0 when empty).
    pub timestamp: u64,
}

/// An immutable copy of the log taken at one instant.
#[derive(Debug, Clone)]
pub struct LogSnapshot {
    /// All records, in append (ascending logical sequence) order.
    pub records: Vec<RawTransaction>,
    /// The tip at snapshot time.
    pub tip: LogTip,
}

/// A record submitted for appending, before the chain stamps it.
#[derive(Debug, Clone)]
pub struct PendingRecord {
    /// Inbound or outbound relative to the lottery account.
    pub direction: Direction,
    /// Origin (inbound) or destination (outbound) wallet.
    pub counterparty: Option<Address>,
    /// Value moved.
    pub value: Amount,
    /// Opcode carried in the message body.
    pub opcode: Option<u32>,
    /// Block timestamp, unix seconds.
    pub timestamp: u64,
}

struct LogInner {
    records: Vec<RawTransaction>,
    tip_hash: TxHash,
}

/// Append-only transaction log for a single account.
pub struct ChainLog {
    inner: RwLock<LogInner>,
}

impl ChainLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LogInner {
                records: Vec::new(),
                tip_hash: [0u8; 32],
            }),
        }
    }

    /// Append a record, assigning its sequence number and hash.
    ///
    /// Returns the stamped record. Appends are totally ordered: the caller
    /// holds the write lock for the duration of the stamp-and-push, so no
    /// two records ever share a `logical_seq`.
    pub fn append(&self, pending: PendingRecord) -> RawTransaction {
        let mut inner = self.inner.write();
        let logical_seq = inner.records.len() as LogicalSeq + 1;
        let tx_hash = hash_record(&pending, logical_seq, &inner.tip_hash);

        let record = RawTransaction {
            tx_hash,
            logical_seq,
            timestamp: pending.timestamp,
            direction: pending.direction,
            counterparty: pending.counterparty,
            value: pending.value,
            opcode: pending.opcode,
        };

        inner.tip_hash = chain_tip(&inner.tip_hash, &tx_hash);
        inner.records.push(record.clone());
        tracing::debug!(
            seq = logical_seq,
            value = record.value,
            "appended log record"
        );
        record
    }

    /// Take an immutable snapshot of the full log.
    pub fn snapshot(&self) -> LogSnapshot {
        let inner = self.inner.read();
        LogSnapshot {
            records: inner.records.clone(),
            tip: tip_of(&inner),
        }
    }

    /// The current finalized tip.
    pub fn tip(&self) -> LogTip {
        tip_of(&self.inner.read())
    }

    /// Number of records appended so far.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// True when no records have been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ChainLog {
    fn default() -> Self {
        Self::new()
    }
}

fn tip_of(inner: &LogInner) -> LogTip {
    match inner.records.last() {
        Some(last) => LogTip {
            logical_seq: last.logical_seq,
            tip_hash: inner.tip_hash,
            timestamp: last.timestamp,
        },
        None => LogTip {
            logical_seq: 0,
            tip_hash: inner.tip_hash,
            timestamp: 0,
        },
    }
}

fn hash_record(pending: &PendingRecord, seq: LogicalSeq, prev_tip: &TxHash) -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(RECORD_DOMAIN);
    hasher.update(prev_tip);
    hasher.update(seq.to_be_bytes());
    hasher.update(pending.timestamp.to_be_bytes());
    hasher.update(match pending.direction {
        Direction::Inbound => [0u8],
        Direction::Outbound => [1u8],
    });
    if let Some(cp) = &pending.counterparty {
        hasher.update(cp);
    }
    hasher.update(pending.value.to_be_bytes());
    hasher.update(pending.opcode.unwrap_or(0).to_be_bytes());
    hasher.finalize().into()
}

fn chain_tip(prev: &TxHash, record_hash: &TxHash) -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(prev);
    hasher.update(record_hash);
    hasher.finalize().into()
}
