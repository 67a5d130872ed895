//! Per-group gap tracking state machine

use crate::{DerivedAddress, GroupId};
use serde::{Deserialize, Serialize};

/// Gap tracker for one address group.
///
/// Two states: `Scanning` (initial) and `Complete` (terminal). While
/// scanning, an active address is appended and resets the miss counter; an
/// inactive one increments it, and reaching `min_gap` consecutive misses
/// ends the group. Addresses arrive in derivation order, so the list stays
/// sorted by ascending index without sorting.
///
/// Once complete, the tracker carries only its addresses. The shared index
/// stream keeps advancing for the benefit of other groups, and results
/// landing in a completed group are dropped here: the `Complete` variant
/// has no miss counter to bump and accepts no further appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupTracker {
    Scanning {
        group: GroupId,
        misses: u32,
        addresses: Vec<DerivedAddress>,
    },
    Complete {
        group: GroupId,
        addresses: Vec<DerivedAddress>,
    },
}

impl GroupTracker {
    /// Fresh tracker for `group`, scanning with no misses
    pub fn new(group: GroupId) -> Self {
        Self::Scanning {
            group,
            misses: 0,
            addresses: Vec::new(),
        }
    }

    /// Route one probe result into this tracker.
    ///
    /// Returns `true` if this call moved the tracker to `Complete`. Calls
    /// on an already-complete tracker do nothing and return `false`.
    pub fn record(&mut self, address: DerivedAddress, is_active: bool, min_gap: u32) -> bool {
        match self {
            Self::Scanning {
                group,
                misses,
                addresses,
            } => {
                debug_assert_eq!(address.group, *group);
                if is_active {
                    addresses.push(address);
                    *misses = 0;
                    false
                } else {
                    *misses += 1;
                    if *misses >= min_gap {
                        *self = Self::Complete {
                            group: *group,
                            addresses: std::mem::take(addresses),
                        };
                        true
                    } else {
                        false
                    }
                }
            }
            Self::Complete { .. } => false,
        }
    }

    pub fn group(&self) -> GroupId {
        match self {
            Self::Scanning { group, .. } | Self::Complete { group, .. } => *group,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Active addresses found so far, ascending by index
    pub fn addresses(&self) -> &[DerivedAddress] {
        match self {
            Self::Scanning { addresses, .. } | Self::Complete { addresses, .. } => addresses,
        }
    }

    /// Current run of consecutive misses; `None` once complete
    pub fn misses(&self) -> Option<u32> {
        match self {
            Self::Scanning { misses, .. } => Some(*misses),
            Self::Complete { .. } => None,
        }
    }

    pub fn into_addresses(self) -> Vec<DerivedAddress> {
        match self {
            Self::Scanning { addresses, .. } | Self::Complete { addresses, .. } => addresses,
        }
    }
}
