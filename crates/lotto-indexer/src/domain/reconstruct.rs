//! # Round Reconstruction
//!
//! Pure derivation of the round/event history from a log snapshot.
//!
//! ## Algorithm
//!
//! 1. Deduplicate by `(tx_hash, logical_seq)` — overlapping fetch windows
//!    may serve the same record twice.
//! 2. Classify each record ([`classify_record`]).
//! 3. Walk ascending logical sequence; every Draw closes the bucket
//!    containing it and the next event opens a new one. Events between two
//!    Draws belong to the round closed by the following Draw; trailing
//!    events belong to the still-open current round.
//! 4. Number rounds relative to the query: current = 1, increasing into
//!    the past.
//!
//! Running this twice on the same input (in any arrival order) yields
//! byte-identical output.

use std::collections::BTreeMap;

use shared_types::RawTransaction;

use super::classify::{classify_record, Classification, ClassifyContext};
use super::entities::{
    ClassifierStats, Event, EventKind, Reconstruction, ReconstructedRound,
};

/// Reconstruct rounds and events from raw records.
///
/// `records` may arrive in any order and with duplicates; the result is
/// the same either way.
pub fn reconstruct(records: &[RawTransaction], ctx: &ClassifyContext) -> Reconstruction {
    let mut stats = ClassifierStats {
        total_records: records.len(),
        ..Default::default()
    };

    // BTreeMap keyed by (logical_seq, tx_hash) both deduplicates and
    // yields ascending order in one pass.
    let mut unique = BTreeMap::new();
    for record in records {
        let (tx_hash, seq) = record.dedup_key();
        if unique.insert((seq, tx_hash), record).is_some() {
            stats.duplicates += 1;
        }
    }

    let mut events = Vec::new();
    for record in unique.values() {
        match classify_record(record, ctx) {
            Classification::Event(event) => events.push(event),
            Classification::Ignored => stats.ignored_non_events += 1,
            Classification::Malformed => {
                stats.malformed_skipped += 1;
                tracing::debug!(seq = record.logical_seq, "skipping malformed record");
            }
        }
    }

    let rounds = partition(&events);
    Reconstruction {
        rounds,
        events,
        stats,
    }
}

/// Partition ascending events into rounds, newest first.
fn partition(events: &[Event]) -> Vec<ReconstructedRound> {
    let mut closed: Vec<Vec<Event>> = Vec::new();
    let mut bucket: Vec<Event> = Vec::new();

    for event in events {
        let is_draw = event.kind == EventKind::Draw;
        bucket.push(event.clone());
        if is_draw {
            closed.push(std::mem::take(&mut bucket));
        }
    }

    // The trailing bucket is the current round, present even when empty:
    // "round 1" always denotes the view from the present.
    let mut rounds = Vec::with_capacity(closed.len() + 1);
    rounds.push(make_round(1, false, bucket));
    for (age, events) in closed.into_iter().rev().enumerate() {
        rounds.push(make_round(age as u64 + 2, true, events));
    }
    rounds
}

fn make_round(round_id: u64, closed: bool, events: Vec<Event>) -> ReconstructedRound {
    let stake_total = events
        .iter()
        .filter(|e| e.kind == EventKind::Entry)
        .map(|e| e.amount)
        .sum();
    ReconstructedRound {
        round_id,
        closed,
        events,
        stake_total,
    }
}
