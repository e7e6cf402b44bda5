//! Resolution of previously created outputs.
//!
//! The UTXO set itself belongs to the caller. This crate only ever reads it,
//! through [`UtxoLookup`], and never adds or removes entries.

use crate::messages::{OutPoint, TxOut};
use crate::network::Network;
use crate::util::Result;
use linked_hash_map::LinkedHashMap;

/// Resolves an out point to the output it references.
pub trait UtxoLookup {
    /// Returns the unspent output at `outpoint` on `network`.
    ///
    /// `Ok(None)` means the output is unknown or already spent.
    ///
    /// # Errors
    /// Backend failures, which callers propagate unchanged.
    fn resolve(&self, network: Network, outpoint: &OutPoint) -> Result<Option<TxOut>>;
}

impl<T: UtxoLookup + ?Sized> UtxoLookup for &T {
    fn resolve(&self, network: Network, outpoint: &OutPoint) -> Result<Option<TxOut>> {
        (**self).resolve(network, outpoint)
    }
}

/// Network-agnostic map of unspent outputs.
impl UtxoLookup for LinkedHashMap<OutPoint, TxOut> {
    fn resolve(&self, _network: Network, outpoint: &OutPoint) -> Result<Option<TxOut>> {
        Ok(self.get(outpoint).cloned())
    }
}

/// In-memory unspent outputs for a single network.
#[derive(Debug, Default, Clone)]
pub struct UtxoSet {
    network: Network,
    outputs: LinkedHashMap<OutPoint, TxOut>,
}

impl UtxoSet {
    /// Creates an empty set serving lookups for `network`.
    #[must_use]
    pub fn new(network: Network) -> UtxoSet {
        UtxoSet {
            network,
            outputs: LinkedHashMap::new(),
        }
    }

    /// Network this set serves.
    #[must_use]
    pub fn network(&self) -> Network {
        self.network
    }

    /// Adds or replaces an unspent output.
    pub fn insert(&mut self, outpoint: OutPoint, output: TxOut) -> Option<TxOut> {
        self.outputs.insert(outpoint, output)
    }

    /// Removes a spent output.
    pub fn remove(&mut self, outpoint: &OutPoint) -> Option<TxOut> {
        self.outputs.remove(outpoint)
    }

    /// Number of outputs held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl UtxoLookup for UtxoSet {
    fn resolve(&self, network: Network, outpoint: &OutPoint) -> Result<Option<TxOut>> {
        if network != self.network {
            return Ok(None);
        }
        Ok(self.outputs.get(outpoint).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Script;
    use crate::util::Hash256;
    use pretty_assertions::assert_eq;

    #[test]
    fn routes_by_network() -> Result<()> {
        let outpoint = OutPoint {
            hash: Hash256([1; 32]),
            index: 2,
        };
        let out = TxOut::new(5, Script(vec![1]));
        let mut set = UtxoSet::new(Network::Testnet);
        assert!(set.is_empty());
        set.insert(outpoint, out.clone());
        assert_eq!(set.resolve(Network::Testnet, &outpoint)?, Some(out.clone()));
        assert_eq!(set.resolve(Network::Mainnet, &outpoint)?, None);
        assert_eq!(set.remove(&outpoint), Some(out));
        assert_eq!(set.resolve(Network::Testnet, &outpoint)?, None);
        Ok(())
    }

    #[test]
    fn plain_map() -> Result<()> {
        let mut map = LinkedHashMap::new();
        map.insert(OutPoint::default(), TxOut::new(1, Script::new()));
        assert!(map.resolve(Network::STN, &OutPoint::default())?.is_some());
        Ok(())
    }
}
