//! shardscan-client: concrete collaborators for the discovery engine
//!
//! Provides an HTTP batch activity oracle speaking to an explorer-style
//! service, and a deterministic software deriver for wallets whose keys are
//! held locally. Hardware-backed derivers implement the same trait outside
//! this crate.

pub mod deriver;
pub mod error;
pub mod oracle;

pub use deriver::SeedDeriver;
pub use error::ClientError;
pub use oracle::HttpOracle;
