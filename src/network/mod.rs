//! Network selection for address versions and UTXO lookup routing.
//!
//! The network never changes how a transaction is encoded. It only tells a
//! lookup backend which chain the referenced outputs live on.

use std::fmt;

/// Network type
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// Production network
    #[default]
    Mainnet,
    /// Public test network
    Testnet,
    /// Scaling test network
    STN,
}

impl Network {
    /// Version byte for pay-to-public-key-hash addresses.
    #[must_use]
    #[inline]
    pub fn p2pkh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet | Network::STN => 0x6f,
        }
    }

    /// Whether this is one of the test networks.
    #[must_use]
    #[inline]
    pub fn is_test(self) -> bool {
        !matches!(self, Network::Mainnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
            Network::STN => f.write_str("stn"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn versions() {
        assert_eq!(Network::Mainnet.p2pkh_version(), 0x00);
        assert_eq!(Network::Testnet.p2pkh_version(), 0x6f);
        assert_eq!(Network::STN.p2pkh_version(), 0x6f);
        assert!(!Network::default().is_test());
        assert_eq!(Network::Testnet.to_string(), "testnet");
    }
}
