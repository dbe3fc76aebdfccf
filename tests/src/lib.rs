//! # LottoChain Test Suite
//!
//! Cross-crate integration tests exercising the real wiring: in-memory
//! chain log, single-writer ledger service, indexer reconstruction and
//! the read API, with no mocks on the value path.

#[cfg(test)]
mod integration;
