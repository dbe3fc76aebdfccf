//! Domain layer: pure classification and round partitioning.

pub mod classify;
pub mod entities;
pub mod reconstruct;

pub use classify::{classify_record, Classification, ClassifyContext};
pub use entities::{ClassifierStats, Event, EventKind, Reconstruction, ReconstructedRound};
pub use reconstruct::reconstruct;
