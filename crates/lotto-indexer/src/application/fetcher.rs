//! # Fetch Loop
//!
//! Periodically pulls the transaction log, reconstructs, and publishes the
//! result through a shared handle.
//!
//! ## Failure Behavior
//!
//! - A failed fetch marks the published view stale and keeps the previous
//!   reconstruction; callers see "last updated N seconds ago", never an
//!   error banner, and never rounds fabricated from partial data.
//! - Retries back off exponentially with jitter, bounded by a cap, instead
//!   of tight-looping against a struggling upstream.
//! - Shutdown is a watch-channel signal; the loop exits from inside its
//!   sleep without leaving timers behind.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::{reconstruct, Reconstruction};
use crate::ports::TransactionLogSource;

/// Fetch loop tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Interval between successful fetches.
    pub poll_interval: Duration,
    /// First retry delay after a failure.
    pub backoff_base: Duration,
    /// Upper bound on the retry delay.
    pub backoff_cap: Duration,
    /// Jitter fraction applied to each retry delay (0.0 to 1.0).
    pub jitter: f64,
    /// Cap on the staleness age reported to callers.
    pub max_reported_staleness: Duration,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            backoff_base: Duration::from_millis(500),
            backoff_cap: Duration::from_secs(30),
            jitter: 0.2,
            max_reported_staleness: Duration::from_secs(300),
        }
    }
}

impl IndexerConfig {
    /// Validate configuration; called at startup.
    pub fn validate(&self) -> Result<(), IndexerConfigError> {
        if self.poll_interval.is_zero() {
            return Err(IndexerConfigError::InvalidInterval(
                "poll_interval cannot be 0".into(),
            ));
        }
        if self.backoff_base.is_zero() || self.backoff_cap < self.backoff_base {
            return Err(IndexerConfigError::InvalidBackoff(format!(
                "base {:?} must be nonzero and at most cap {:?}",
                self.backoff_base, self.backoff_cap
            )));
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(IndexerConfigError::InvalidJitter(self.jitter));
        }
        Ok(())
    }
}

/// Fetch-loop configuration failures. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexerConfigError {
    /// Poll interval failed validation.
    #[error("Invalid poll interval: {0}")]
    InvalidInterval(String),
    /// Backoff bounds failed validation.
    #[error("Invalid backoff: {0}")]
    InvalidBackoff(String),
    /// Jitter fraction outside [0, 1].
    #[error("Invalid jitter fraction: {0}")]
    InvalidJitter(f64),
}

/// What the read side sees: the latest reconstruction plus freshness.
#[derive(Debug, Clone)]
pub struct ReconstructionStatus {
    /// Best-known reconstruction, if any fetch ever succeeded.
    pub reconstruction: Option<Arc<Reconstruction>>,
    /// True while the most recent fetch attempt failed.
    pub stale: bool,
    /// Seconds since the last successful fetch, capped.
    pub age_secs: u64,
}

struct Shared {
    latest: Option<Arc<Reconstruction>>,
    updated_at: Option<Instant>,
    stale: bool,
}

/// Cheap cloneable read handle onto the fetch loop's output.
#[derive(Clone)]
pub struct IndexerHandle {
    shared: Arc<RwLock<Shared>>,
    max_reported_staleness: Duration,
}

impl IndexerHandle {
    /// Current reconstruction and freshness.
    pub fn status(&self) -> ReconstructionStatus {
        let shared = self.shared.read();
        let age = shared
            .updated_at
            .map(|at| at.elapsed())
            .unwrap_or(self.max_reported_staleness)
            .min(self.max_reported_staleness);
        ReconstructionStatus {
            reconstruction: shared.latest.clone(),
            stale: shared.stale,
            age_secs: age.as_secs(),
        }
    }
}

/// Owns the polling loop.
pub struct IndexerService {
    source: Arc<dyn TransactionLogSource>,
    config: IndexerConfig,
    shared: Arc<RwLock<Shared>>,
}

impl IndexerService {
    /// Build the service and its read handle.
    pub fn new(
        source: Arc<dyn TransactionLogSource>,
        config: IndexerConfig,
    ) -> (Self, IndexerHandle) {
        let shared = Arc::new(RwLock::new(Shared {
            latest: None,
            updated_at: None,
            stale: false,
        }));
        let handle = IndexerHandle {
            shared: Arc::clone(&shared),
            max_reported_staleness: config.max_reported_staleness,
        };
        (
            Self {
                source,
                config,
                shared,
            },
            handle,
        )
    }

    /// One fetch-and-reconstruct pass. Publishes on success; marks the
    /// previous view stale on failure.
    pub async fn refresh_once(&self) -> bool {
        match self.source.fetch().await {
            Ok(fetched) => {
                let view = reconstruct(&fetched.records, &fetched.context);
                tracing::debug!(
                    events = view.events.len(),
                    rounds = view.rounds.len(),
                    skipped = view.stats.malformed_skipped,
                    "reconstruction refreshed"
                );
                let mut shared = self.shared.write();
                shared.latest = Some(Arc::new(view));
                shared.updated_at = Some(Instant::now());
                shared.stale = false;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "log fetch failed, serving stale view");
                self.shared.write().stale = true;
                false
            }
        }
    }

    /// Run until the shutdown signal flips.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut failures: u32 = 0;
        loop {
            let ok = self.refresh_once().await;
            failures = if ok { 0 } else { failures.saturating_add(1) };

            let delay = if ok {
                self.config.poll_interval
            } else {
                backoff_delay(&self.config, failures, rand::thread_rng().gen::<f64>())
            };

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("indexer shutting down");
                        return;
                    }
                }
            }
        }
    }
}

/// Exponential backoff with jitter: `base * 2^(failures-1)`, capped, plus
/// a random fraction of itself.
fn backoff_delay(config: &IndexerConfig, failures: u32, unit_random: f64) -> Duration {
    let exp = failures.saturating_sub(1).min(16);
    let raw = config
        .backoff_base
        .saturating_mul(1u32 << exp)
        .min(config.backoff_cap);
    let jitter = raw.mul_f64(config.jitter * unit_random);
    (raw + jitter).min(config.backoff_cap)
}
