//! # Shared Log - Append-Only Transaction Log
//!
//! Stands in for the host chain's per-account transaction history.
//!
//! ## Architecture Rules
//!
//! - **Single writer**: only the ledger appends, under its own write lock.
//! - **Snapshot readers**: the reconstructor reads an immutable snapshot
//!   taken at invocation time; readers never block the writer and the
//!   writer never blocks readers beyond the snapshot copy.
//! - **Total order**: every record carries a strictly increasing
//!   `logical_seq`; the tip hash chains over record hashes so the log tip
//!   commits to the whole history.
//!
//! ```text
//! ┌──────────────┐   append()    ┌──────────────┐   snapshot()   ┌──────────────┐
//! │    Ledger    │ ────────────▶ │   ChainLog   │ ─────────────▶ │   Indexer    │
//! └──────────────┘               └──────────────┘                └──────────────┘
//! ```

pub mod log;

pub use log::{ChainLog, LogSnapshot, LogTip, PendingRecord};
