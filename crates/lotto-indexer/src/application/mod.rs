//! Application layer: the polling fetch loop.

pub mod fetcher;

pub use fetcher::{IndexerConfig, IndexerHandle, IndexerService, ReconstructionStatus};
