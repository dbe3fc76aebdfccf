//! # Draw Beacon
//!
//! Uniform winner selection from chain-finalized entropy.
//!
//! ## Fairness Properties
//!
//! - The beacon is derived from the log tip at draw time: the tip hash
//!   chains over every entry, so it is unknowable until the last entry of
//!   the round has landed and uncontrollable by whoever triggers the draw.
//! - A caller-supplied salt may be mixed in, but it is never the sole
//!   input; with a fixed beacon the salt cannot make any index unreachable.
//! - Modulo reduction uses rejection sampling, so every index in
//!   `[0, participant_count)` is equally likely rather than the low
//!   indices being favored by the biased tail of `u64`.

use sha2::{Digest, Sha256};

/// Domain separator so beacon hashes can never collide with other
/// SHA-256 uses in the system.
const BEACON_DOMAIN: &[u8] = b"lotto.draw.beacon.v1";

/// Chain-finalized entropy for one draw.
///
/// Built from the log tip *after* the participant set is frozen. Not
/// constructible from a mini-game seed; see the crate docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawBeacon {
    /// Chained hash over the full account history at draw time.
    pub tip_hash: [u8; 32],
    /// Logical sequence of the most recent record.
    pub logical_seq: u64,
    /// Block timestamp of the most recent record, unix seconds.
    pub timestamp: u64,
}

/// Select a winner index in `[0, participant_count)`.
///
/// `participant_count == 0` is a caller precondition (the ledger rejects
/// the draw before reaching this module); debug builds assert it.
///
/// The optional `salt` is mixed into the hash input alongside the beacon.
pub fn draw_index(participant_count: usize, beacon: &DrawBeacon, salt: Option<u64>) -> usize {
    debug_assert!(participant_count > 0, "caller must reject empty rounds");
    let count = participant_count as u64;

    // Rejection sampling: discard values from the biased tail and re-hash
    // with an incremented counter until a value below the threshold lands.
    let threshold = u64::MAX - (u64::MAX % count);
    let mut counter: u32 = 0;
    loop {
        let word = beacon_word(beacon, salt, counter);
        if word < threshold {
            return (word % count) as usize;
        }
        counter += 1;
    }
}

fn beacon_word(beacon: &DrawBeacon, salt: Option<u64>, counter: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(BEACON_DOMAIN);
    hasher.update(beacon.tip_hash);
    hasher.update(beacon.logical_seq.to_be_bytes());
    hasher.update(beacon.timestamp.to_be_bytes());
    hasher.update(salt.unwrap_or(0).to_be_bytes());
    hasher.update(counter.to_be_bytes());
    let digest = hasher.finalize();
    u64::from_be_bytes(digest[..8].try_into().expect("digest is 32 bytes"))
}
