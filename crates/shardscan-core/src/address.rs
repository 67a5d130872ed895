//! Derived address record

use crate::{AddressBytes, DerivationIndex, GroupId};
use serde::{Deserialize, Serialize};

/// One address produced by the derive capability.
///
/// Produced exactly once per index and immutable afterwards. The payload is
/// opaque to the engine; only the deriver and the activity oracle interpret
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAddress {
    /// Derivation index this address came from
    pub index: DerivationIndex,
    /// Group the deriver assigned from the address bytes
    pub group: GroupId,
    /// Opaque address payload
    pub address: AddressBytes,
}

impl DerivedAddress {
    pub fn new(index: DerivationIndex, group: GroupId, address: AddressBytes) -> Self {
        Self {
            index,
            group,
            address,
        }
    }
}

impl std::fmt::Display for DerivedAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}#{}",
            hex::encode(&self.address),
            self.group,
            self.index
        )
    }
}
