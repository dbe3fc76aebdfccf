//! # Query Shapes
//!
//! Request and response types for the read surface.

use lotto_indexer::{Event, ReconstructedRound};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pagination parameters. `page` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    pub page: usize,
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self { page: 0, limit: 20 }
    }
}

/// Freshness of the reconstruction a response was served from.
///
/// Staleness is a state, not an error: a struggling upstream shows up as
/// "last updated N seconds ago" on otherwise ordinary responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Freshness {
    /// True while the most recent log fetch failed.
    pub stale: bool,
    /// Seconds since the last successful fetch, capped upstream.
    pub last_updated_secs: u64,
}

/// A page of reconstructed rounds, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundsPage {
    pub rounds: Vec<ReconstructedRound>,
    /// Total rounds available before paging.
    pub total: usize,
    pub freshness: Freshness,
}

/// A page of one wallet's events, ascending logical sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEventsPage {
    pub events: Vec<Event>,
    /// Total matching events before paging.
    pub total: usize,
    pub freshness: Freshness,
}

/// Read-side failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No relative round with this id in the current reconstruction.
    #[error("Round {round_id} not found")]
    RoundNotFound { round_id: u64 },
    /// No fetch has succeeded yet; there is nothing to serve and an empty
    /// answer would be fabrication.
    #[error("Reconstruction not available yet")]
    NotReady,
}
