//! Discovery session: drives the derive/probe loop until every group is done

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::capability::{ActivityOracle, AddressDeriver};
use crate::index_stream::next_free_index;
use crate::tracker::GroupTracker;
use crate::{AddressBytes, DerivationIndex, DerivedAddress, DiscoveryConfig, Error, GroupId, Result};

/// One discovery run over a wallet's shared index space.
///
/// Created fresh per discovery request and discarded afterwards; nothing in
/// here survives across sessions. The caller seeds it with indices it
/// already holds addresses for, so those are never re-derived.
///
/// The session owns the skip set and the cursor. Every index handed to the
/// deriver is inserted into the skip set before the next one is requested,
/// which is what makes the stream strictly increasing and repeat-free.
#[derive(Debug)]
pub struct DiscoverySession {
    config: DiscoveryConfig,
    trackers: Vec<GroupTracker>,
    skip: BTreeSet<DerivationIndex>,
    cursor: Option<DerivationIndex>,
    derived_count: usize,
}

impl DiscoverySession {
    /// Create a session with the given config and already-known indices
    pub fn new(
        config: DiscoveryConfig,
        seed: impl IntoIterator<Item = DerivationIndex>,
    ) -> Result<Self> {
        config.validate()?;
        let trackers = (0..config.group_count).map(GroupTracker::new).collect();
        Ok(Self {
            config,
            trackers,
            skip: seed.into_iter().collect(),
            cursor: None,
            derived_count: 0,
        })
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Per-group trackers, indexed by group id
    pub fn trackers(&self) -> &[GroupTracker] {
        &self.trackers
    }

    /// True once every group has reached its gap limit
    pub fn is_complete(&self) -> bool {
        self.trackers.iter().all(GroupTracker::is_complete)
    }

    fn scanning_count(&self) -> usize {
        self.trackers.iter().filter(|t| !t.is_complete()).count()
    }

    /// Run one batch: derive, probe once, route every result.
    ///
    /// Returns `Ok(true)` while at least one group is still scanning after
    /// the batch, `Ok(false)` once the session is complete. Calling `step`
    /// on a complete session derives nothing and returns `Ok(false)`.
    ///
    /// This is the cancellation granularity: callers may stop between
    /// batches, but a batch is not interruptible once started (derivation
    /// may involve a non-cancellable hardware interaction).
    pub async fn step<D, O>(&mut self, deriver: &mut D, oracle: &mut O) -> Result<bool>
    where
        D: AddressDeriver,
        O: ActivityOracle,
    {
        if self.is_complete() {
            return Ok(false);
        }

        let mut batch = Vec::with_capacity(self.config.batch_size);
        for _ in 0..self.config.batch_size {
            let index = next_free_index(self.cursor, &self.skip);
            self.skip.insert(index);
            self.cursor = Some(index);

            let derived = deriver
                .derive(index)
                .await
                .map_err(|source| Error::Derivation { index, source })?;
            self.derived_count += 1;

            if derived.group >= self.config.group_count {
                return Err(Error::GroupOutOfRange {
                    group: derived.group,
                    group_count: self.config.group_count,
                    index,
                });
            }
            batch.push(derived);
        }

        tracing::debug!(
            batch_len = batch.len(),
            scanning = self.scanning_count(),
            "probing batch"
        );

        let addresses: Vec<AddressBytes> = batch.iter().map(|d| d.address.clone()).collect();
        let flags = oracle
            .probe(&addresses)
            .await
            .map_err(|source| Error::Oracle {
                batch_len: addresses.len(),
                source,
            })?;
        if flags.len() != batch.len() {
            return Err(Error::ProbeLengthMismatch {
                expected: batch.len(),
                got: flags.len(),
            });
        }

        // Route in batch order: derivation order is what keeps per-group
        // address lists sorted by index.
        for (derived, is_active) in batch.into_iter().zip(flags) {
            let group = derived.group;
            let index = derived.index;
            let finished = self.trackers[group as usize].record(derived, is_active, self.config.min_gap);
            if finished {
                tracing::debug!(group, last_index = index, "group reached gap limit");
            }
        }

        Ok(!self.is_complete())
    }

    /// Drive `step` until every group is complete.
    ///
    /// Returns the flattened active set across groups, in group order.
    /// Callers needing per-group structure read [`Self::trackers`] instead.
    /// Any derive or oracle error aborts the whole session with no partial
    /// result.
    pub async fn run<D, O>(&mut self, deriver: &mut D, oracle: &mut O) -> Result<Vec<DerivedAddress>>
    where
        D: AddressDeriver,
        O: ActivityOracle,
    {
        while self.step(deriver, oracle).await? {}

        let found = self.active_addresses();
        tracing::info!(
            active = found.len(),
            derived = self.derived_count,
            "discovery complete"
        );
        Ok(found)
    }

    /// Flattened active addresses across all groups, in group order
    pub fn active_addresses(&self) -> Vec<DerivedAddress> {
        self.trackers
            .iter()
            .flat_map(|t| t.addresses().iter().cloned())
            .collect()
    }

    /// Consume the session, keeping only the flattened active set
    pub fn into_active_addresses(self) -> Vec<DerivedAddress> {
        self.trackers
            .into_iter()
            .flat_map(GroupTracker::into_addresses)
            .collect()
    }

    /// Summary of the session so far
    pub fn report(&self) -> DiscoveryReport {
        DiscoveryReport {
            groups: self
                .trackers
                .iter()
                .map(|t| GroupReport {
                    group: t.group(),
                    active: t.addresses().len(),
                    complete: t.is_complete(),
                })
                .collect(),
            total_active: self.trackers.iter().map(|t| t.addresses().len()).sum(),
            derived: self.derived_count,
            highest_index: self.cursor,
        }
    }
}

/// Per-group slice of a [`DiscoveryReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    pub group: GroupId,
    pub active: usize,
    pub complete: bool,
}

/// Session summary, serializable for CLI output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    pub groups: Vec<GroupReport>,
    pub total_active: usize,
    /// Indices actually derived this session (seeded indices excluded)
    pub derived: usize,
    /// Highest index handed to the deriver, if any
    pub highest_index: Option<DerivationIndex>,
}
