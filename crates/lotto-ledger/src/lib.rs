//! # Lotto Ledger
//!
//! The authoritative lottery state machine.
//!
//! ## Purpose
//!
//! Owns money and participant identity for one lottery account: ticket
//! price, participant registry, pool balance, round-active flag, winner
//! and claim flag. Validates and applies the five admissible operations
//! (Enter, Draw, Claim, Reset, EmergencyWithdraw).
//!
//! ## State Machine
//!
//! ```text
//!            Enter (xN)
//!           ┌─────────┐
//!           ▼         │
//!        ┌──────────────┐   Draw    ┌──────────────────┐
//!   ───▶ │     Open     │ ────────▶ │ Closed-Unclaimed │
//!        └──────────────┘           └──────────────────┘
//!           ▲                                │ Claim
//!           │         Reset                  ▼
//!           └──────────────────── ┌──────────────────┐
//!                                 │  Closed-Settled  │
//!                                 └──────────────────┘
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | INVARIANT-1 | `pool == ticket_price * participants.len()` while open | entities.rs (checked sums on entry) |
//! | INVARIANT-2 | `winner.is_some()` implies round closed | only `draw` sets winner and it closes the round |
//! | INVARIANT-3 | `winner_can_claim` implies `winner.is_some()` | only `draw` sets the claim flag |
//! | INVARIANT-4 | Reset unreachable while a prize is unclaimed | `reset` checks the claim flag first |
//! | INVARIANT-5 | No money-out path while entries are open | `claim`/`emergency_withdraw` require a closed round |
//!
//! Every rejected operation leaves state byte-for-byte unchanged: each
//! operation validates all preconditions before its first mutation.
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): the pure state machine, no I/O
//! - **Application Layer** (`application/`): the single-writer service that
//!   decodes inbound messages, applies them under one lock, and appends the
//!   matching record to the shared chain log atomically with the mutation

pub mod application;
pub mod config;
pub mod domain;

pub use application::{LedgerService, OpOutcome};
pub use config::{ConfigError, LedgerConfig};
pub use domain::{LedgerError, LedgerSnapshot, LedgerState, RoundPhase};
