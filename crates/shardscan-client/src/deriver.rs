//! Deterministic software deriver
//!
//! Derives address payloads by hashing the wallet seed with the index.
//! Stands in for hardware derivation when the seed is held locally; the
//! engine only sees the [`AddressDeriver`] trait either way.

use shardscan_core::{
    group_of_address, AddressDeriver, BoxError, DerivationIndex, DerivedAddress,
};

/// Software deriver: blake3(seed || index) with hash-based group assignment.
///
/// Deterministic for a given (seed, index) pair, so repeated sessions over
/// the same wallet always see the same addresses.
pub struct SeedDeriver {
    seed: Vec<u8>,
    group_count: u32,
}

impl SeedDeriver {
    pub fn new(seed: Vec<u8>, group_count: u32) -> Self {
        Self { seed, group_count }
    }

    fn derive_payload(&self, index: DerivationIndex) -> Vec<u8> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed);
        hasher.update(&index.to_le_bytes());
        hasher.finalize().as_bytes().to_vec()
    }
}

impl AddressDeriver for SeedDeriver {
    async fn derive(
        &mut self,
        index: DerivationIndex,
    ) -> std::result::Result<DerivedAddress, BoxError> {
        let payload = self.derive_payload(index);
        let group = group_of_address(&payload, self.group_count)
            .ok_or_else(|| -> BoxError { "group_count must be > 0".into() })?;
        Ok(DerivedAddress::new(index, group, payload))
    }
}
