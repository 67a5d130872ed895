//! Engine error types

use crate::capability::BoxError;
use crate::{DerivationIndex, GroupId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("derivation failed at index {index}: {source}")]
    Derivation {
        index: DerivationIndex,
        #[source]
        source: BoxError,
    },

    #[error("activity probe failed for batch of {batch_len}: {source}")]
    Oracle {
        batch_len: usize,
        #[source]
        source: BoxError,
    },

    #[error("oracle returned {got} flags for {expected} addresses")]
    ProbeLengthMismatch { expected: usize, got: usize },

    #[error("deriver assigned group {group} to index {index}, but only {group_count} groups exist")]
    GroupOutOfRange {
        group: GroupId,
        group_count: u32,
        index: DerivationIndex,
    },

    #[error("invalid discovery config: {0}")]
    InvalidConfig(String),
}
