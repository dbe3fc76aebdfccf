//! # Ledger State Machine
//!
//! The aggregate owning all lottery state. Operations are plain methods
//! that validate every precondition before the first mutation, so a
//! rejected operation can never leave partial effects behind.
//!
//! No money-out operation is reachable while entries are open: `enter`
//! only grows the pool, `draw` only flips flags, and `claim` /
//! `emergency_withdraw` both require a closed round.

use lotto_randomness::{draw_index, DrawBeacon};
use serde::{Deserialize, Serialize};
use shared_types::{short_addr, Address, Amount};

use super::errors::LedgerError;

/// The three reachable phases of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Entries accepted, no winner.
    Open,
    /// Winner drawn, prize unclaimed.
    ClosedUnclaimed,
    /// Prize claimed (or round swept); reset is reachable.
    ClosedSettled,
}

/// Read-only snapshot of every getter the ledger exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub ticket_price: Amount,
    pub participant_count: usize,
    pub pool: Amount,
    pub round_active: bool,
    pub winner: Option<Address>,
    pub winner_can_claim: bool,
    pub owner: Address,
}

/// The lottery aggregate. Mutable access exists only through the
/// operation methods below; the application layer wraps the whole
/// aggregate in a single writer lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    owner: Address,
    ticket_price: Amount,
    gas_reserve: Amount,
    participants: Vec<Address>,
    pool: Amount,
    round_active: bool,
    winner: Option<Address>,
    winner_can_claim: bool,
}

impl LedgerState {
    /// Create a ledger with an open, empty first round.
    pub fn new(owner: Address, ticket_price: Amount, gas_reserve: Amount) -> Self {
        Self {
            owner,
            ticket_price,
            gas_reserve,
            participants: Vec::new(),
            pool: 0,
            round_active: true,
            winner: None,
            winner_can_claim: false,
        }
    }

    // ---------------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------------

    /// Enter the current round with the attached stake.
    ///
    /// Returns the dense slot assigned to the wallet.
    pub fn enter(&mut self, wallet: Address, stake: Amount) -> Result<u32, LedgerError> {
        if !self.round_active {
            return Err(LedgerError::RoundNotActive);
        }
        if stake != self.ticket_price {
            return Err(LedgerError::IncorrectStake {
                expected: self.ticket_price,
                got: stake,
            });
        }
        if self.participants.contains(&wallet) {
            return Err(LedgerError::AlreadyEntered { wallet });
        }
        let new_pool = self
            .pool
            .checked_add(stake)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        let slot = self.participants.len() as u32;
        self.participants.push(wallet);
        self.pool = new_pool;
        self.assert_invariants();
        tracing::info!(wallet = %short_addr(&wallet), slot, pool = self.pool, "entry accepted");
        Ok(slot)
    }

    /// Close entries and select a winner from the beacon.
    ///
    /// Returns the winning wallet and its slot.
    pub fn draw(
        &mut self,
        caller: Address,
        beacon: &DrawBeacon,
        salt: Option<u64>,
    ) -> Result<(Address, usize), LedgerError> {
        if caller != self.owner {
            return Err(LedgerError::AccessDenied);
        }
        if !self.round_active {
            return Err(LedgerError::RoundNotActive);
        }
        if self.participants.is_empty() {
            return Err(LedgerError::NoParticipants);
        }

        let index = draw_index(self.participants.len(), beacon, salt);
        let winner = self.participants[index];
        self.round_active = false;
        self.winner = Some(winner);
        self.winner_can_claim = true;
        self.assert_invariants();
        tracing::info!(
            winner = %short_addr(&winner),
            index,
            entrants = self.participants.len(),
            "winner drawn"
        );
        Ok((winner, index))
    }

    /// Claim the pool. Permitted exactly once, by the winner, after a draw.
    ///
    /// Returns the payout (pool minus the gas reserve).
    pub fn claim(&mut self, caller: Address) -> Result<Amount, LedgerError> {
        let winner = self.winner.ok_or(LedgerError::NoWinnerYet)?;
        if caller != winner {
            return Err(LedgerError::OnlyWinnerCanClaim);
        }
        if !self.winner_can_claim {
            return Err(LedgerError::PrizeAlreadyClaimed);
        }

        let payout = self.pool.saturating_sub(self.gas_reserve);
        self.pool = 0;
        self.winner_can_claim = false;
        self.assert_invariants();
        tracing::info!(winner = %short_addr(&winner), payout, "prize claimed");
        Ok(payout)
    }

    /// Archive the settled round and reopen for entries.
    pub fn reset(&mut self, caller: Address) -> Result<(), LedgerError> {
        if caller != self.owner {
            return Err(LedgerError::AccessDenied);
        }
        if self.round_active {
            return Err(LedgerError::RoundStillActive);
        }
        if self.winner_can_claim {
            return Err(LedgerError::PrizeMustBeClaimedFirst);
        }

        self.participants.clear();
        self.pool = 0;
        self.winner = None;
        self.round_active = true;
        self.assert_invariants();
        tracing::info!("round reset");
        Ok(())
    }

    /// Sweep whatever remains in the pool to the owner.
    ///
    /// Only reachable once entries are closed, so live stakes can never
    /// be drained. Returns the swept amount.
    pub fn emergency_withdraw(&mut self, caller: Address) -> Result<Amount, LedgerError> {
        if caller != self.owner {
            return Err(LedgerError::AccessDenied);
        }
        if self.round_active {
            return Err(LedgerError::CannotWithdrawDuringActiveRound);
        }

        let amount = self.pool;
        self.pool = 0;
        self.assert_invariants();
        tracing::warn!(amount, "emergency withdrawal");
        Ok(amount)
    }

    // ---------------------------------------------------------------------
    // Getters
    // ---------------------------------------------------------------------

    /// Current phase of the round lifecycle.
    pub fn phase(&self) -> RoundPhase {
        if self.round_active {
            RoundPhase::Open
        } else if self.winner_can_claim {
            RoundPhase::ClosedUnclaimed
        } else {
            RoundPhase::ClosedSettled
        }
    }

    /// All getters in one read.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            ticket_price: self.ticket_price,
            participant_count: self.participants.len(),
            pool: self.pool,
            round_active: self.round_active,
            winner: self.winner,
            winner_can_claim: self.winner_can_claim,
            owner: self.owner,
        }
    }

    /// Contract owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Ticket price fixed at construction.
    pub fn ticket_price(&self) -> Amount {
        self.ticket_price
    }

    /// Gas reserve retained on payout.
    pub fn gas_reserve(&self) -> Amount {
        self.gas_reserve
    }

    /// Dense participant registry, slot order.
    pub fn participants(&self) -> &[Address] {
        &self.participants
    }

    fn assert_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            if self.round_active {
                assert_eq!(
                    self.pool,
                    self.ticket_price * self.participants.len() as Amount,
                    "pool must equal ticket_price * participant_count while open"
                );
                assert!(self.winner.is_none(), "open round cannot have a winner");
            }
            if self.winner_can_claim {
                assert!(self.winner.is_some(), "claim flag requires a winner");
            }
        }
    }
}
