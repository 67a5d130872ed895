//! Umbrella crate: re-exports the discovery engine and its client adapters
//! so downstream code (and the workspace e2e tests) depend on one crate.

pub use shardscan_client::{ClientError, HttpOracle, SeedDeriver};
pub use shardscan_core::*;
