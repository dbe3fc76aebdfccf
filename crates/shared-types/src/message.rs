//! # Inbound Messages & Opcodes
//!
//! Ledger operations arrive as opcode-tagged messages carrying value.
//! The opcode namespace is fixed; decoding happens exactly once at the
//! ledger boundary and produces the closed [`LedgerOp`] sum type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{Address, Amount};

/// Opcode constants for the five admissible operations.
pub mod opcodes {
    /// Enter the current round (must carry exactly the ticket price).
    pub const ENTER: u32 = 0xB4B8_6E5A;
    /// Close entries and select a winner (owner only).
    pub const DRAW: u32 = 0xA92A_3CF9;
    /// Withdraw the pool (winner only, once).
    pub const CLAIM: u32 = 0x9D54_6687;
    /// Archive the settled round and reopen (owner only).
    pub const RESET: u32 = 0x2CE2_6A5E;
    /// Sweep a closed round's remaining pool to the owner.
    pub const EMERGENCY_WITHDRAW: u32 = 0xD805_921B;
}

/// A message sent to the lottery account by an external wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Wallet that signed and sent the message.
    pub sender: Address,
    /// Value attached to the message (stake for Enter, gas reserve otherwise).
    pub value: Amount,
    /// Operation opcode.
    pub opcode: u32,
}

/// The closed set of ledger operations.
///
/// Decoded from an opcode exactly once at the boundary; every consumer
/// matches exhaustively, so a sixth operation cannot be added silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerOp {
    Enter,
    Draw,
    Claim,
    Reset,
    EmergencyWithdraw,
}

impl LedgerOp {
    /// Decode an opcode into an operation.
    pub fn from_opcode(opcode: u32) -> Result<Self, DecodeError> {
        match opcode {
            opcodes::ENTER => Ok(Self::Enter),
            opcodes::DRAW => Ok(Self::Draw),
            opcodes::CLAIM => Ok(Self::Claim),
            opcodes::RESET => Ok(Self::Reset),
            opcodes::EMERGENCY_WITHDRAW => Ok(Self::EmergencyWithdraw),
            other => Err(DecodeError::UnknownOpcode { opcode: other }),
        }
    }

    /// The opcode this operation is tagged with on the wire.
    pub fn opcode(self) -> u32 {
        match self {
            Self::Enter => opcodes::ENTER,
            Self::Draw => opcodes::DRAW,
            Self::Claim => opcodes::CLAIM,
            Self::Reset => opcodes::RESET,
            Self::EmergencyWithdraw => opcodes::EMERGENCY_WITHDRAW,
        }
    }
}

/// Errors decoding an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Opcode is not one of the five admissible operations.
    #[error("Unknown opcode: {opcode:#010X}")]
    UnknownOpcode { opcode: u32 },
}
