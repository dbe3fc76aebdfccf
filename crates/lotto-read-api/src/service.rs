//! # Read API Service
//!
//! In-process query layer over (ledger snapshot, latest reconstruction).
//! Strictly read-only: it never mutates the ledger and never writes back
//! to any store another reader could observe.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use lru::LruCache;
use parking_lot::Mutex;
use shared_types::Address;

use lotto_indexer::{Event, IndexerHandle, ReconstructedRound, ReconstructionStatus};
use lotto_ledger::{LedgerService, LedgerSnapshot};

use crate::config::ReadApiConfig;
use crate::queries::{Freshness, Page, QueryError, RoundsPage, WalletEventsPage};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    Rounds { page: usize, limit: usize },
    Round { round_id: u64 },
    Wallet { wallet: Address, page: usize, limit: usize },
}

#[derive(Clone)]
enum CachedValue {
    Rounds(RoundsPage),
    Round(Box<(ReconstructedRound, Freshness)>),
    Wallet(WalletEventsPage),
}

struct CacheEntry {
    value: CachedValue,
    inserted: Instant,
    /// Round count of the reconstruction the entry was computed from.
    /// Every draw renumbers the relative round ids, so an entry from a
    /// different partition is wrong even inside its TTL.
    rounds_seen: usize,
}

/// The query surface handed to external collaborators.
pub struct ReadApi {
    ledger: Arc<LedgerService>,
    indexer: IndexerHandle,
    cache: Mutex<LruCache<CacheKey, CacheEntry>>,
    config: ReadApiConfig,
}

impl ReadApi {
    /// Build the service from its two read-only sources.
    pub fn new(
        ledger: Arc<LedgerService>,
        indexer: IndexerHandle,
        config: ReadApiConfig,
    ) -> Self {
        let capacity =
            NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            ledger,
            indexer,
            cache: Mutex::new(LruCache::new(capacity)),
            config,
        }
    }

    /// All seven ledger getters in one consistent snapshot. Served live,
    /// never cached: it is a single lock acquisition either way.
    pub fn ledger_state(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    /// Reconstructed rounds, newest first.
    pub fn list_rounds(&self, page: Page) -> Result<RoundsPage, QueryError> {
        let page = self.clamp(page);
        let key = CacheKey::Rounds {
            page: page.page,
            limit: page.limit,
        };
        let (view, freshness) = self.view()?;
        if let Some(CachedValue::Rounds(hit)) = self.cache_get(&key, view.rounds.len()) {
            return Ok(hit);
        }

        let total = view.rounds.len();
        let rounds = paginate(&view.rounds, page).to_vec();
        let result = RoundsPage {
            rounds,
            total,
            freshness,
        };
        self.cache_put(key, CachedValue::Rounds(result.clone()), view.rounds.len());
        Ok(result)
    }

    /// One round by its relative id (1 = current).
    pub fn get_round(
        &self,
        round_id: u64,
    ) -> Result<(ReconstructedRound, Freshness), QueryError> {
        let key = CacheKey::Round { round_id };
        let (view, freshness) = self.view()?;
        if let Some(CachedValue::Round(hit)) = self.cache_get(&key, view.rounds.len()) {
            return Ok(*hit);
        }

        let round = view
            .round(round_id)
            .cloned()
            .ok_or(QueryError::RoundNotFound { round_id })?;
        self.cache_put(
            key,
            CachedValue::Round(Box::new((round.clone(), freshness))),
            view.rounds.len(),
        );
        Ok((round, freshness))
    }

    /// Events a wallet appears in, ascending, paginated.
    pub fn list_events_for_wallet(
        &self,
        wallet: Address,
        page: Page,
    ) -> Result<WalletEventsPage, QueryError> {
        let page = self.clamp(page);
        let key = CacheKey::Wallet {
            wallet,
            page: page.page,
            limit: page.limit,
        };
        let (view, freshness) = self.view()?;
        if let Some(CachedValue::Wallet(hit)) = self.cache_get(&key, view.rounds.len()) {
            return Ok(hit);
        }

        let all: Vec<Event> = view.events_for_wallet(&wallet).cloned().collect();
        let total = all.len();
        let events = paginate(&all, page).to_vec();
        let result = WalletEventsPage {
            events,
            total,
            freshness,
        };
        self.cache_put(key, CachedValue::Wallet(result.clone()), view.rounds.len());
        Ok(result)
    }

    fn view(
        &self,
    ) -> Result<(Arc<lotto_indexer::Reconstruction>, Freshness), QueryError> {
        let ReconstructionStatus {
            reconstruction,
            stale,
            age_secs,
        } = self.indexer.status();
        let view = reconstruction.ok_or(QueryError::NotReady)?;
        Ok((
            view,
            Freshness {
                stale,
                last_updated_secs: age_secs,
            },
        ))
    }

    fn clamp(&self, page: Page) -> Page {
        Page {
            page: page.page,
            limit: page.limit.clamp(1, self.config.max_page_limit),
        }
    }

    fn cache_get(&self, key: &CacheKey, rounds_seen: usize) -> Option<CachedValue> {
        let mut cache = self.cache.lock();
        let entry = cache.get(key)?;
        if entry.inserted.elapsed() > self.config.cache_ttl || entry.rounds_seen != rounds_seen
        {
            cache.pop(key);
            return None;
        }
        Some(entry.value.clone())
    }

    fn cache_put(&self, key: CacheKey, value: CachedValue, rounds_seen: usize) {
        self.cache.lock().put(
            key,
            CacheEntry {
                value,
                inserted: Instant::now(),
                rounds_seen,
            },
        );
    }
}

fn paginate<T>(items: &[T], page: Page) -> &[T] {
    let start = page.page.saturating_mul(page.limit).min(items.len());
    let end = start.saturating_add(page.limit).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lotto_indexer::{
        ClassifyContext, FetchedLog, IndexerConfig, IndexerService, SourceError,
        TransactionLogSource,
    };
    use lotto_ledger::LedgerConfig;
    use shared_log::ChainLog;
    use shared_types::{opcodes, Amount, InboundMessage};

    const OWNER: Address = [0x01; 32];
    const ALICE: Address = [0xA1; 32];
    const BOB: Address = [0xB2; 32];
    const CAROL: Address = [0xC3; 32];

    const PRICE: Amount = 1_000;
    const GAS: Amount = 10;
    const NOW: u64 = 1_700_000_000;

    struct LogSource {
        log: Arc<ChainLog>,
        ledger: Arc<LedgerService>,
    }

    #[async_trait]
    impl TransactionLogSource for LogSource {
        async fn fetch(&self) -> Result<FetchedLog, SourceError> {
            let snap = self.ledger.snapshot();
            Ok(FetchedLog {
                records: self.log.snapshot().records,
                context: ClassifyContext {
                    owner: snap.owner,
                    current_winner: snap.winner,
                    near_zero_threshold: GAS,
                },
            })
        }
    }

    fn apply(ledger: &LedgerService, sender: Address, value: Amount, opcode: u32, now: u64) {
        ledger
            .apply(
                &InboundMessage {
                    sender,
                    value,
                    opcode,
                },
                now,
            )
            .unwrap();
    }

    async fn wired() -> (ReadApi, Arc<LedgerService>, IndexerService) {
        let log = Arc::new(ChainLog::new());
        let ledger = Arc::new(LedgerService::new(
            &LedgerConfig {
                owner: OWNER,
                ticket_price: PRICE,
                gas_reserve: GAS,
            },
            Arc::clone(&log),
        ));

        for wallet in [ALICE, BOB] {
            apply(&ledger, wallet, PRICE, opcodes::ENTER, NOW);
        }
        apply(&ledger, OWNER, 0, opcodes::DRAW, NOW + 1);

        let source = Arc::new(LogSource {
            log,
            ledger: Arc::clone(&ledger),
        });
        let (svc, handle) = IndexerService::new(source, IndexerConfig::default());
        assert!(svc.refresh_once().await);

        let api = ReadApi::new(Arc::clone(&ledger), handle, ReadApiConfig::default());
        (api, ledger, svc)
    }

    async fn api_with_round() -> ReadApi {
        wired().await.0
    }

    #[tokio::test]
    async fn test_ledger_state_exposes_getters() {
        let api = api_with_round().await;
        let s = api.ledger_state();
        assert_eq!(s.ticket_price, PRICE);
        assert_eq!(s.participant_count, 2);
        assert!(!s.round_active);
        assert!(s.winner_can_claim);
        assert_eq!(s.owner, OWNER);
    }

    #[tokio::test]
    async fn test_list_rounds_newest_first() {
        let api = api_with_round().await;
        let page = api.list_rounds(Page::default()).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.rounds[0].round_id, 1);
        assert!(!page.rounds[0].closed);
        assert!(page.rounds[1].closed);
        assert_eq!(page.rounds[1].entry_count(), 2);
        assert!(!page.freshness.stale);
    }

    #[tokio::test]
    async fn test_get_round_and_missing_round() {
        let api = api_with_round().await;
        let (round, _) = api.get_round(2).unwrap();
        assert_eq!(round.stake_total, 2 * PRICE);
        assert_eq!(
            api.get_round(9).unwrap_err(),
            QueryError::RoundNotFound { round_id: 9 }
        );
    }

    #[tokio::test]
    async fn test_wallet_events_paginated() {
        let api = api_with_round().await;
        let page = api
            .list_events_for_wallet(ALICE, Page { page: 0, limit: 10 })
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.events[0].actor, ALICE);

        let empty = api
            .list_events_for_wallet([0xEE; 32], Page::default())
            .unwrap();
        assert_eq!(empty.total, 0);
    }

    #[tokio::test]
    async fn test_limit_clamped_to_config_cap() {
        let api = api_with_round().await;
        let page = api
            .list_rounds(Page {
                page: 0,
                limit: 10_000,
            })
            .unwrap();
        // Cap is 100; both rounds still fit.
        assert_eq!(page.rounds.len(), 2);
    }

    #[tokio::test]
    async fn test_cached_result_reused_within_ttl() {
        let api = api_with_round().await;
        let first = api.list_rounds(Page::default()).unwrap();
        let second = api.list_rounds(Page::default()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_cached_round_dropped_when_ids_renumber() {
        let (api, ledger, svc) = wired().await;

        // Id 2 currently denotes the closed two-entry round.
        let (round, _) = api.get_round(2).unwrap();
        assert_eq!(round.entry_count(), 2);

        // Settle it and run another round: every relative id shifts.
        let winner = ledger.snapshot().winner.unwrap();
        apply(&ledger, winner, 0, opcodes::CLAIM, NOW + 2);
        apply(&ledger, OWNER, 0, opcodes::RESET, NOW + 3);
        apply(&ledger, CAROL, PRICE, opcodes::ENTER, NOW + 4);
        apply(&ledger, OWNER, 0, opcodes::DRAW, NOW + 5);
        assert!(svc.refresh_once().await);

        // The same id must now serve the newer round, TTL or not.
        let (round, _) = api.get_round(2).unwrap();
        assert_eq!(round.entry_count(), 1);
        assert!(round.closed);
    }
}
