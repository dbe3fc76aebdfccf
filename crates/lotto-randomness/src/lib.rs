//! # Lotto Randomness
//!
//! Randomness for the lottery, split into two generators of very different
//! strength that must never be confused:
//!
//! | Module | Strength | Use Case |
//! |--------|----------|----------|
//! | `beacon` | Chain-finalized entropy | Selecting the round winner |
//! | `seed` | Single-server HMAC trust | Cosmetic mini-game seeds |
//!
//! ## Separation
//!
//! [`DrawBeacon`] is built from the finalized log tip, which is fixed only
//! after the participant set is frozen, so neither the drawer nor any
//! entrant can steer it. [`SignedSeed`] trusts one server key and is a
//! distinct type with no conversion into a beacon; the draw path cannot
//! accept it by construction.

#![warn(clippy::all)]

pub mod beacon;
pub mod seed;

pub use beacon::{draw_index, DrawBeacon};
pub use seed::{SeedError, SeedService, SignedSeed};
