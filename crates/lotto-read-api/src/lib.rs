//! # Lotto Read API
//!
//! The query surface external collaborators (UI, bots) consume.
//!
//! ## Queries
//!
//! | Query | Source | Shape |
//! |-------|--------|-------|
//! | `ledger_state` | Ledger getters | one consistent snapshot |
//! | `list_rounds` | Reconstruction | paginated, newest first |
//! | `get_round` | Reconstruction | single round by relative id |
//! | `list_events_for_wallet` | Reconstruction | paginated, ascending |
//!
//! Round/event queries are cached for a short TTL — the underlying log
//! only grows, so a TTL-stale page can be missing recent events but never
//! wrong about old ones. Cached entries are additionally dropped whenever
//! the round partition changes: relative round ids are renumbered by every
//! draw, so an entry computed against an older partition would answer for
//! the wrong round. Every reconstruction-backed response carries the
//! indexer's freshness marker instead of failing when the upstream fetch
//! is struggling.

pub mod config;
pub mod queries;
pub mod service;

pub use config::{ReadApiConfig, ReadApiConfigError};
pub use queries::{Freshness, Page, QueryError, RoundsPage, WalletEventsPage};
pub use service::ReadApi;
