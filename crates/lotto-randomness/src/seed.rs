//! # Seed Service
//!
//! Short-lived HMAC-signed seeds for low-stakes cosmetic mini-games.
//!
//! A client derives a value from the seed deterministically; the server
//! can later verify the client did not forge it. This trusts a single
//! server key and is strictly weaker than the draw beacon — [`SignedSeed`]
//! has no conversion into a `DrawBeacon`, so it cannot leak into the
//! lottery draw path.

use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// HMAC tag length in bytes (SHA-256 output).
pub const TAG_LEN: usize = 32;

/// A seed the server issued and will vouch for until it expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedSeed {
    /// Random seed bytes.
    pub seed: [u8; 16],
    /// HMAC-SHA256 over `seed || expires_at`.
    pub signature: [u8; TAG_LEN],
    /// Unix seconds after which verification fails.
    pub expires_at: u64,
}

/// Errors verifying a seed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// Seed lifetime elapsed.
    #[error("Seed expired at {expires_at} (now {now})")]
    Expired { expires_at: u64, now: u64 },
    /// Signature does not match the seed.
    #[error("Seed signature verification failed")]
    BadSignature,
}

/// Issues and verifies signed seeds with a single server key.
pub struct SeedService {
    key: Vec<u8>,
    ttl_secs: u64,
}

impl SeedService {
    /// Create a service with the given server key and seed lifetime.
    pub fn new(key: impl Into<Vec<u8>>, ttl_secs: u64) -> Self {
        Self {
            key: key.into(),
            ttl_secs,
        }
    }

    /// Issue a fresh seed valid for the configured lifetime.
    pub fn issue(&self, now: u64) -> SignedSeed {
        let mut seed = [0u8; 16];
        rand::rngs::OsRng.fill_bytes(&mut seed);
        let expires_at = now.saturating_add(self.ttl_secs);
        SignedSeed {
            seed,
            signature: self.tag(&seed, expires_at),
            expires_at,
        }
    }

    /// Verify a seed the client presented.
    ///
    /// Tag comparison is constant-time via the `hmac` crate.
    pub fn verify(&self, seed: &SignedSeed, now: u64) -> Result<(), SeedError> {
        if now > seed.expires_at {
            return Err(SeedError::Expired {
                expires_at: seed.expires_at,
                now,
            });
        }
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("hmac accepts any key length");
        mac.update(&seed.seed);
        mac.update(&seed.expires_at.to_be_bytes());
        mac.verify_slice(&seed.signature)
            .map_err(|_| SeedError::BadSignature)
    }

    fn tag(&self, seed: &[u8; 16], expires_at: u64) -> [u8; TAG_LEN] {
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("hmac accepts any key length");
        mac.update(seed);
        mac.update(&expires_at.to_be_bytes());
        let out = mac.finalize().into_bytes();
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&out);
        tag
    }
}
