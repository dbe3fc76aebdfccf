//! # Ledger Errors
//!
//! One stable variant per precondition violation. These are terminal for
//! the caller: the ledger never retries them and state is unchanged after
//! every rejection.

use shared_types::{Address, Amount, DecodeError};
use thiserror::Error;

/// Errors rejecting a ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Entry stake differs from the ticket price.
    #[error("Incorrect stake: expected {expected}, got {got}")]
    IncorrectStake { expected: Amount, got: Amount },

    /// Wallet already holds a slot in the current round.
    #[error("Wallet already entered this round")]
    AlreadyEntered { wallet: Address },

    /// Operation requires an open round.
    #[error("Round is not active")]
    RoundNotActive,

    /// Draw attempted with an empty participant registry.
    #[error("Cannot draw a winner with no participants")]
    NoParticipants,

    /// Owner-only operation attempted by another wallet.
    #[error("Access denied: caller is not the owner")]
    AccessDenied,

    /// Claim attempted by a wallet other than the winner.
    #[error("Only the winner can claim the prize")]
    OnlyWinnerCanClaim,

    /// Claim attempted before any draw happened.
    #[error("No winner has been drawn yet")]
    NoWinnerYet,

    /// The single permitted claim already happened.
    #[error("Prize has already been claimed")]
    PrizeAlreadyClaimed,

    /// Reset attempted while the prize is still claimable.
    #[error("Prize must be claimed before the round can reset")]
    PrizeMustBeClaimedFirst,

    /// Reset attempted while entries are still open.
    #[error("Round is still active")]
    RoundStillActive,

    /// Emergency withdrawal attempted while entries are still open.
    #[error("Cannot withdraw during an active round")]
    CannotWithdrawDuringActiveRound,

    /// Non-entry operation carried more than the gas reserve.
    #[error("Operation accepts at most the gas reserve: limit {limit}, got {got}")]
    ExcessValue { limit: Amount, got: Amount },

    /// Pool arithmetic would overflow.
    #[error("Pool arithmetic overflow")]
    ArithmeticOverflow,

    /// Inbound message carried an unknown opcode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
