//! Discovery session configuration

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_GROUP_COUNT, DEFAULT_MIN_GAP};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for one discovery session.
///
/// `group_count` is a network-wide constant: every wallet on the same
/// network must agree on it, or group routing diverges between clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Total number of address groups
    pub group_count: u32,
    /// Consecutive unused addresses before a group stops scanning
    pub min_gap: u32,
    /// Addresses derived and probed per round trip
    pub batch_size: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            group_count: DEFAULT_GROUP_COUNT,
            min_gap: DEFAULT_MIN_GAP,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl DiscoveryConfig {
    /// Validate the configuration.
    ///
    /// All three values must be non-zero: zero groups means nothing to
    /// scan, a zero gap would complete every group before its first probe,
    /// and a zero batch size would make the loop spin without progress.
    pub fn validate(&self) -> Result<()> {
        if self.group_count == 0 {
            return Err(Error::InvalidConfig("group_count must be > 0".into()));
        }
        if self.min_gap == 0 {
            return Err(Error::InvalidConfig("min_gap must be > 0".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be > 0".into()));
        }
        Ok(())
    }
}
