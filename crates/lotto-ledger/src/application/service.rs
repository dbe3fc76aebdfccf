//! # Ledger Service
//!
//! The single serialization point for all writes. Decodes each inbound
//! message once, applies it to the state machine, and appends the matching
//! record to the chain log — all under one writer lock, so there is no
//! read-modify-write gap between "check not already entered" and "append
//! entrant", and no two operations ever interleave partially.

use std::sync::Arc;

use lotto_randomness::DrawBeacon;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_log::{ChainLog, PendingRecord};
use shared_types::{Address, Amount, Direction, InboundMessage, LedgerOp};

use crate::config::LedgerConfig;
use crate::domain::{LedgerError, LedgerSnapshot, LedgerState};

/// What an accepted operation did. Mirrors the on-chain effects table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpOutcome {
    /// Wallet registered at the given slot.
    Entered { slot: u32 },
    /// Round closed; winner selected at the given slot.
    WinnerDrawn { winner: Address, index: usize },
    /// Pool paid out to the winner.
    PrizeClaimed { amount: Amount },
    /// Settled round archived; entries reopened.
    RoundReset,
    /// Remaining pool swept to the owner.
    PoolSwept { amount: Amount },
}

/// Single-writer service owning the ledger aggregate.
pub struct LedgerService {
    state: Mutex<LedgerState>,
    log: Arc<ChainLog>,
}

impl LedgerService {
    /// Build the service from a validated config and the shared chain log.
    pub fn new(config: &LedgerConfig, log: Arc<ChainLog>) -> Self {
        Self {
            state: Mutex::new(LedgerState::new(
                config.owner,
                config.ticket_price,
                config.gas_reserve,
            )),
            log,
        }
    }

    /// Apply one inbound message atomically.
    ///
    /// `now` is the block timestamp stamped onto any log record the
    /// operation produces. A rejected message appends nothing and changes
    /// nothing.
    pub fn apply(&self, msg: &InboundMessage, now: u64) -> Result<OpOutcome, LedgerError> {
        let op = LedgerOp::from_opcode(msg.opcode)?;
        let mut state = self.state.lock();

        // Every operation except Enter carries gas only; a stake-sized
        // value on a command message is a caller mistake, not a deposit.
        if op != LedgerOp::Enter && msg.value > state.gas_reserve() {
            return Err(LedgerError::ExcessValue {
                limit: state.gas_reserve(),
                got: msg.value,
            });
        }

        match op {
            LedgerOp::Enter => {
                let slot = state.enter(msg.sender, msg.value)?;
                self.log.append(PendingRecord {
                    direction: Direction::Inbound,
                    counterparty: Some(msg.sender),
                    value: msg.value,
                    opcode: Some(msg.opcode),
                    timestamp: now,
                });
                Ok(OpOutcome::Entered { slot })
            }
            LedgerOp::Draw => {
                // The beacon is the log tip before this draw's own record:
                // it chains over every entry of the round and nothing else
                // the drawer controls.
                let beacon = tip_beacon(&self.log);
                let (winner, index) = state.draw(msg.sender, &beacon, None)?;
                // Zero-value confirmation bounce to the owner. Draws move
                // state, never money.
                self.log.append(PendingRecord {
                    direction: Direction::Outbound,
                    counterparty: Some(state.owner()),
                    value: 0,
                    opcode: Some(msg.opcode),
                    timestamp: now,
                });
                Ok(OpOutcome::WinnerDrawn { winner, index })
            }
            LedgerOp::Claim => {
                let amount = state.claim(msg.sender)?;
                // A claim after a sweep settles the round but moves no
                // value; the chain records no transfer, so neither do we.
                // A zero-value outbound here would read as a draw marker
                // downstream.
                if amount > 0 {
                    self.log.append(PendingRecord {
                        direction: Direction::Outbound,
                        counterparty: Some(msg.sender),
                        value: amount,
                        opcode: Some(msg.opcode),
                        timestamp: now,
                    });
                }
                Ok(OpOutcome::PrizeClaimed { amount })
            }
            LedgerOp::Reset => {
                state.reset(msg.sender)?;
                // Gas-only inbound command record; carries no stake and is
                // not an event for the reconstructor.
                self.log.append(PendingRecord {
                    direction: Direction::Inbound,
                    counterparty: Some(msg.sender),
                    value: msg.value,
                    opcode: Some(msg.opcode),
                    timestamp: now,
                });
                Ok(OpOutcome::RoundReset)
            }
            LedgerOp::EmergencyWithdraw => {
                let amount = state.emergency_withdraw(msg.sender)?;
                // Sweeping an already-empty pool moves nothing.
                if amount > 0 {
                    self.log.append(PendingRecord {
                        direction: Direction::Outbound,
                        counterparty: Some(state.owner()),
                        value: amount,
                        opcode: Some(msg.opcode),
                        timestamp: now,
                    });
                }
                Ok(OpOutcome::PoolSwept { amount })
            }
        }
    }

    /// Read-only snapshot of all getters.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.lock().snapshot()
    }
}

fn tip_beacon(log: &ChainLog) -> DrawBeacon {
    let tip = log.tip();
    DrawBeacon {
        tip_hash: tip.tip_hash,
        logical_seq: tip.logical_seq,
        timestamp: tip.timestamp,
    }
}
