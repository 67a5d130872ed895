//! shardscan-core: gap-limit address discovery for group-sharded HD wallets
//!
//! This crate implements the discovery engine for wallets whose address
//! space is partitioned into a fixed number of groups:
//! - one shared, strictly increasing derivation index stream (with a skip
//!   set so known indices are never re-derived)
//! - one gap tracker per group, stopping that group independently after
//!   `min_gap` consecutive unused addresses
//! - a batched derive/probe loop that drives both until every group is done
//!
//! Which group an index lands in is decided by the derive capability from
//! the derived address bytes, not by this engine. The engine only routes.
//!
//! # Termination Warning
//!
//! Termination is **probabilistic**, not worst-case. The loop ends because
//! group assignment behaves like a uniform hash of the address, so every
//! group keeps accumulating its own misses as the shared stream advances.
//!
//! A pathological deriver that never (or almost never) lands in some group
//! would starve that group's tracker and the session would not terminate.
//! The engine does not defend against this; it is the deriver's contract to
//! distribute addresses roughly uniformly.
//!
//! ## Failure Model
//!
//! | Event | Session outcome |
//! |-------|-----------------|
//! | Derive call fails | Whole session aborts, nothing surfaced |
//! | Oracle probe fails | Whole session aborts, nothing surfaced |
//! | Oracle answer length mismatch | Abort (contract violation) |
//! | Deriver returns group out of range | Abort (contract violation) |
//!
//! No retries live in this crate. Callers that want resilience re-run a
//! fresh session, optionally seeded with indices already confirmed active.

mod address;
mod capability;
mod config;
mod error;
mod grouping;
mod index_stream;
mod session;
mod tracker;

pub use address::DerivedAddress;
pub use capability::{ActivityOracle, AddressDeriver, BoxError};
pub use config::DiscoveryConfig;
pub use error::Error;
pub use grouping::group_of_address;
pub use index_stream::next_free_index;
pub use session::{DiscoveryReport, DiscoverySession, GroupReport};
pub use tracker::GroupTracker;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Derivation index within the wallet's shared index space
pub type DerivationIndex = u32;

/// Group identifier in `[0, group_count)`
pub type GroupId = u32;

/// Opaque derived address payload
pub type AddressBytes = Vec<u8>;

/// Constants for the sharded discovery engine
pub mod constants {
    /// Network-wide number of address groups
    pub const DEFAULT_GROUP_COUNT: u32 = 4;

    /// Consecutive unused addresses before a group stops scanning
    pub const DEFAULT_MIN_GAP: u32 = 5;

    /// Addresses derived and probed per round trip
    pub const DEFAULT_BATCH_SIZE: usize = 10;
}
