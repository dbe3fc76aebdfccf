//! # Lotto Indexer
//!
//! Off-chain event classifier and round reconstructor for the lottery
//! account's transaction log.
//!
//! ## Purpose
//!
//! Consumes the raw, append-only transaction log and derives:
//!
//! 1. A flat, deduplicated, sequence-ordered list of typed events
//!    (Entry / Draw / Claim)
//! 2. A partition of those events into rounds with boundaries aligned to
//!    Draw events, numbered relative to the present (current round = 1)
//!
//! ## Agreement With the Ledger
//!
//! The indexer never calls the ledger and the ledger never calls the
//! indexer; both deterministically interpret the same log, which is the
//! only way they agree. The reconstruction is a pure function of a log
//! snapshot: idempotent, replayable, and never written back to any store
//! a third reader could mistake for truth.
//!
//! ## Failure Semantics
//!
//! A failed or timed-out fetch keeps serving the best-known previous
//! reconstruction, flagged stale with a capped age, instead of erroring.
//! Malformed individual records are skipped and counted so one corrupt
//! entry cannot block reconstruction of the rest.
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): pure classification and partitioning
//! - **Ports Layer** (`ports/`): the outbound `TransactionLogSource` trait
//! - **Application Layer** (`application/`): the polling fetch loop with
//!   jittered backoff, staleness tracking, and clean shutdown

pub mod application;
pub mod domain;
pub mod ports;

pub use application::{IndexerConfig, IndexerHandle, IndexerService, ReconstructionStatus};
pub use domain::{
    reconstruct, ClassifierStats, ClassifyContext, Event, EventKind, Reconstruction,
    ReconstructedRound,
};
pub use ports::{FetchedLog, SourceError, TransactionLogSource};
