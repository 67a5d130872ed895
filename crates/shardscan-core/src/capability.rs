//! External capabilities the engine depends on
//!
//! Derivation and activity probing are supplied by the caller: derivation
//! may run on a hardware device, probing is a network round trip to an
//! explorer-style service. Both are modeled as one-method traits so tests
//! can plug in deterministic fakes.

use crate::{AddressBytes, DerivationIndex, DerivedAddress};
use std::future::Future;

/// Error type collaborators report; the engine wraps it verbatim
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Turns a derivation index into an address with its group label.
///
/// Must be deterministic for a given wallet seed and index, and must assign
/// exactly one group per address. Calls are issued strictly one at a time
/// and are not cancelled once started (hardware derivation is not
/// interruptible).
pub trait AddressDeriver {
    fn derive(
        &mut self,
        index: DerivationIndex,
    ) -> impl Future<Output = std::result::Result<DerivedAddress, BoxError>> + Send;
}

/// Answers "has this address ever appeared on-chain" for a whole batch.
///
/// One round trip per call. The answer must have the same length and order
/// as the input; the engine rejects anything else. Failure is
/// all-or-nothing, and retry policy (if any) lives behind this trait, not
/// in the engine.
pub trait ActivityOracle {
    fn probe(
        &mut self,
        addresses: &[AddressBytes],
    ) -> impl Future<Output = std::result::Result<Vec<bool>, BoxError>> + Send;
}
