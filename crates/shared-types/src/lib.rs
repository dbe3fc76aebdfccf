//! # Shared Types Crate
//!
//! This crate contains the domain entities and the opcode-tagged inbound
//! message types shared between the ledger (writer side) and the indexer
//! (reader side).
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Integer money**: Every amount is a `u64` in the smallest unit of
//!   account. No floating point exists on the value path; conversion to a
//!   human-readable decimal happens only at the presentation boundary.
//! - **Closed operation set**: The five ledger operations form a closed
//!   enum decoded once at the boundary, so adding a sixth operation is a
//!   compile-time-visible change everywhere it matters.

pub mod entities;
pub mod message;

pub use entities::*;
pub use message::*;
